// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference validator.
//!
//! Every code a batch references is checked against its reference domain
//! exactly once: the union of codes is collected across the whole batch,
//! the storage collaborator answers one bulk existence query per domain,
//! and a non-empty missing set fails the batch before any write.

use crate::permission::PermissionChange;
use regsync_domain::{DomainError, LocationLevel};
use std::collections::{BTreeMap, BTreeSet};

/// The union of reference codes across one permission-update batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferencedCodes {
    /// All agent codes referenced by any grant in the batch.
    pub agents: BTreeSet<String>,
    /// All field codes referenced by any grant in the batch.
    pub fields: BTreeSet<String>,
    /// Location values grouped by hierarchy level.
    pub locations: BTreeMap<LocationLevel, BTreeSet<String>>,
}

impl ReferencedCodes {
    /// Collects the code union from a batch of planned changes.
    ///
    /// Revocations reference nothing; grants contribute their agent codes,
    /// field codes, and per-level location values.
    #[must_use]
    pub fn collect<'a, I>(changes: I) -> Self
    where
        I: IntoIterator<Item = &'a PermissionChange>,
    {
        let mut referenced = Self::default();
        for change in changes {
            let PermissionChange::Grant(grant) = change else {
                continue;
            };
            referenced.agents.extend(grant.agents.iter().cloned());
            referenced.fields.extend(grant.fields.iter().cloned());
            referenced
                .locations
                .entry(grant.level)
                .or_default()
                .extend(grant.values.iter().cloned());
        }
        referenced
    }
}

/// Parses agent codes into numeric ids for the bulk existence query.
///
/// # Errors
///
/// Returns `AgentCodeNotNumeric` naming the first malformed code. This is
/// deliberately distinguishable from a well-formed but unknown code.
pub fn parse_agent_ids(codes: &BTreeSet<String>) -> Result<Vec<i64>, DomainError> {
    codes
        .iter()
        .map(|code| {
            code.parse::<i64>()
                .map_err(|_| DomainError::AgentCodeNotNumeric(code.clone()))
        })
        .collect()
}

/// Parses field codes into numeric ids for the bulk existence query.
///
/// # Errors
///
/// Returns `FieldCodeNotNumeric` naming the first malformed code.
pub fn parse_field_ids(codes: &BTreeSet<String>) -> Result<Vec<i64>, DomainError> {
    codes
        .iter()
        .map(|code| {
            code.parse::<i64>()
                .map_err(|_| DomainError::FieldCodeNotNumeric(code.clone()))
        })
        .collect()
}

/// Fails the batch if the agent existence query reported missing ids.
///
/// # Errors
///
/// Returns `AgentCodeUnknown` naming the first missing code.
pub fn check_missing_agents(missing: &[i64]) -> Result<(), DomainError> {
    missing.first().map_or(Ok(()), |id| {
        Err(DomainError::AgentCodeUnknown(id.to_string()))
    })
}

/// Fails the batch if the field existence query reported missing ids.
///
/// # Errors
///
/// Returns `FieldCodeUnknown` naming the first missing code.
pub fn check_missing_fields(missing: &[i64]) -> Result<(), DomainError> {
    missing.first().map_or(Ok(()), |id| {
        Err(DomainError::FieldCodeUnknown(id.to_string()))
    })
}

/// Fails the batch if a location existence query reported missing codes.
///
/// # Errors
///
/// Returns `UnknownLocationCode` naming the level and the first missing code.
pub fn check_missing_location_codes(
    level: LocationLevel,
    missing: &[String],
) -> Result<(), DomainError> {
    missing.first().map_or(Ok(()), |code| {
        Err(DomainError::UnknownLocationCode {
            level,
            code: code.clone(),
        })
    })
}
