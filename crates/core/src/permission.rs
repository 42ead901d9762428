// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Location permission state transitions.
//!
//! A permission update either revokes a user's access or grants it at
//! exactly one hierarchy level. `plan_change` validates the request shape
//! into a `PermissionChange`; `apply_change` rewrites a stored record
//! accordingly. Reference-code existence is checked separately, in bulk,
//! before any change is applied (see `validate`).

use crate::error::CoreError;
use regsync_domain::{DomainError, LocationLevel, LocationPermission, UserRecord, split_code_list};
use std::str::FromStr;

/// A validated grant: the parsed payload of an `is_allowed = true` update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGrant {
    /// Agent codes, trimmed and non-empty.
    pub agents: Vec<String>,
    /// Field codes, trimmed and non-empty.
    pub fields: Vec<String>,
    /// The single hierarchy level being granted.
    pub level: LocationLevel,
    /// Location values for that level, split from the raw comma list.
    pub values: Vec<String>,
}

/// The planned outcome of one permission-update record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionChange {
    /// Revoke access: clear permissions, approval, and location.
    Revoke,
    /// Grant access at one hierarchy level.
    Grant(PermissionGrant),
}

/// Validates the shape of one permission-update record.
///
/// For revocations no payload is required. For grants the agent and field
/// lists must be non-empty, the level must be one of the six recognized
/// names (case-insensitive), and the raw value must contain at least one
/// non-blank token after comma-splitting.
///
/// # Errors
///
/// Returns the domain error naming the offending field; the caller aborts
/// the whole batch on the first failure.
pub fn plan_change(
    username: &str,
    is_allowed: bool,
    agents: Option<&[String]>,
    fields: Option<&[String]>,
    location: Option<(&str, &str)>,
) -> Result<PermissionChange, DomainError> {
    if !is_allowed {
        return Ok(PermissionChange::Revoke);
    }

    let agents: Vec<String> = agents
        .unwrap_or_default()
        .iter()
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty())
        .collect();
    if agents.is_empty() {
        return Err(DomainError::MissingAgents {
            username: username.to_string(),
        });
    }

    let fields: Vec<String> = fields
        .unwrap_or_default()
        .iter()
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty())
        .collect();
    if fields.is_empty() {
        return Err(DomainError::MissingFields {
            username: username.to_string(),
        });
    }

    let Some((raw_level, raw_value)) = location else {
        return Err(DomainError::MissingLocationPermission {
            username: username.to_string(),
        });
    };

    let level = LocationLevel::from_str(raw_level)?;
    let values = split_code_list(raw_value);
    if values.is_empty() {
        return Err(DomainError::EmptyLocationValue { level });
    }

    Ok(PermissionChange::Grant(PermissionGrant {
        agents,
        fields,
        level,
        values,
    }))
}

/// Applies a planned change to a stored user record.
///
/// Revocations clear the agent/field permissions, the approval timestamp,
/// and every location level. Grants set the comma-joined permission strings,
/// stamp the approval time, and activate exactly the granted level, clearing
/// the other five in the same write. `station_default` is never touched;
/// that column belongs to the station sync collaborator.
///
/// # Errors
///
/// Returns `CoreError::Internal` if the record's username is blank, which
/// cannot happen for records loaded from storage.
pub fn apply_change(
    record: &mut UserRecord,
    change: &PermissionChange,
    approved_at: &str,
) -> Result<(), CoreError> {
    if record.username.value().is_empty() {
        return Err(CoreError::Internal(String::from(
            "Stored record has a blank username",
        )));
    }

    match change {
        PermissionChange::Revoke => {
            record.is_allowed = false;
            record.agent_permission.clear();
            record.field_permission.clear();
            record.approved_at = None;
            record.location = LocationPermission::cleared();
        }
        PermissionChange::Grant(grant) => {
            record.is_allowed = true;
            record.agent_permission = grant.agents.join(",");
            record.field_permission = grant.fields.join(",");
            record.approved_at = Some(approved_at.to_string());
            record.location = LocationPermission::with_level(grant.level, &grant.values.join(","));
        }
    }

    Ok(())
}
