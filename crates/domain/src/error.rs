// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::location::LocationLevel;

/// Errors raised by domain rule validation.
///
/// Each variant names the offending value so callers can surface a precise,
/// machine-readable failure without re-deriving context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A batch operation was invoked with no records.
    EmptyBatch,
    /// A record carried a null or blank username.
    InvalidUsername(String),
    /// An agent code did not parse as a number.
    AgentCodeNotNumeric(String),
    /// An agent code parsed but does not exist in the reference table.
    AgentCodeUnknown(String),
    /// A field code did not parse as a number.
    FieldCodeNotNumeric(String),
    /// A field code parsed but does not exist in the reference table.
    FieldCodeUnknown(String),
    /// An allowed user was submitted without any agent codes.
    MissingAgents {
        /// The username of the offending record.
        username: String,
    },
    /// An allowed user was submitted without any field codes.
    MissingFields {
        /// The username of the offending record.
        username: String,
    },
    /// An allowed user was submitted without a location permission.
    MissingLocationPermission {
        /// The username of the offending record.
        username: String,
    },
    /// The location level name is not one of the six recognized levels.
    InvalidLocationLevel(String),
    /// The location value was empty after trimming.
    EmptyLocationValue {
        /// The level the empty value was supplied for.
        level: LocationLevel,
    },
    /// A location code does not exist in the reference table for its level.
    UnknownLocationCode {
        /// The hierarchy level the code was checked against.
        level: LocationLevel,
        /// The offending code.
        code: String,
    },
    /// A permission update referenced a username that is not stored.
    UserNotFound(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyBatch => write!(f, "Request data cannot be empty"),
            Self::InvalidUsername(username) => {
                write!(f, "Username cannot be empty: '{username}'")
            }
            Self::AgentCodeNotNumeric(code) => {
                write!(f, "Agent code {code} is not a valid number")
            }
            Self::AgentCodeUnknown(code) => {
                write!(f, "Agent code {code} does not exist")
            }
            Self::FieldCodeNotNumeric(code) => {
                write!(f, "Field code {code} is not a valid number")
            }
            Self::FieldCodeUnknown(code) => {
                write!(f, "Field code {code} does not exist")
            }
            Self::MissingAgents { username } => {
                write!(f, "Agent list cannot be empty for user {username}")
            }
            Self::MissingFields { username } => {
                write!(f, "Field list cannot be empty for user {username}")
            }
            Self::MissingLocationPermission { username } => {
                write!(f, "Location permission cannot be null for user {username}")
            }
            Self::InvalidLocationLevel(level) => {
                write!(f, "Invalid location level: {level}")
            }
            Self::EmptyLocationValue { level } => {
                write!(f, "Location value cannot be empty for level {level}")
            }
            Self::UnknownLocationCode { level, code } => {
                write!(f, "{} code {code} does not exist", level.display_name())
            }
            Self::UserNotFound(username) => {
                write!(f, "User {username} not found")
            }
        }
    }
}

impl std::error::Error for DomainError {}
