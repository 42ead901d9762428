// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::location::LocationPermission;
use serde::{Deserialize, Serialize};

/// A user's registry key, derived from the local part of their email.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Username {
    /// The username value (non-blank).
    value: String,
}

impl Username {
    /// Creates a `Username` from an already-derived value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUsername` if the value is blank after
    /// trimming.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidUsername(value.to_string()));
        }
        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Derives a username from an email address.
    ///
    /// The username is the substring before the first `@` when the `@` is
    /// not the first character; an email without an `@` (or starting with
    /// one) is used whole. Blank emails yield `None` — callers drop such
    /// records with a warning instead of failing the batch.
    #[must_use]
    pub fn from_email(email: &str) -> Option<Self> {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return None;
        }
        let local = match trimmed.find('@') {
            Some(at) if at > 0 => &trimmed[..at],
            _ => trimmed,
        };
        Some(Self {
            value: local.to_string(),
        })
    }

    /// Returns the username value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Profile attributes carried by the bulk upsert feed.
///
/// These are the only fields an upsert may overwrite on an existing user;
/// permission state is owned by the permission-update operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The user's email address.
    pub email: String,
    /// External employee identifier.
    pub employee_id: Option<String>,
    /// Full display name.
    pub fullname: Option<String>,
    /// Department name.
    pub department: Option<String>,
    /// Position title.
    pub position: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Birth year, carried as supplied by the feed.
    pub birth_year: Option<String>,
}

/// A complete stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The registry key.
    pub username: Username,
    /// Profile attributes from the upsert feed.
    pub profile: UserProfile,
    /// Whether the user currently has access.
    pub is_allowed: bool,
    /// Comma-joined agent codes. Empty when not allowed.
    pub agent_permission: String,
    /// Comma-joined field codes. Empty when not allowed.
    pub field_permission: String,
    /// RFC 3339 approval timestamp. Present iff allowed.
    pub approved_at: Option<String>,
    /// The single-active-level location permission.
    pub location: LocationPermission,
    /// Default station. Written only by the station sync collaborator.
    pub station_default: Option<String>,
}

impl UserRecord {
    /// Creates a new record in the not-allowed default state.
    ///
    /// New users carry empty permissions, a cleared location, and no
    /// approval timestamp until a permission update enables them.
    #[must_use]
    pub const fn new_unprivileged(username: Username, profile: UserProfile) -> Self {
        Self {
            username,
            profile,
            is_allowed: false,
            agent_permission: String::new(),
            field_permission: String::new(),
            approved_at: None,
            location: LocationPermission::cleared(),
            station_default: None,
        }
    }
}

/// Splits a raw comma-delimited code list into trimmed, non-empty tokens.
#[must_use]
pub fn split_code_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .collect()
}
