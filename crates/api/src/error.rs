// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Every error carries a stable machine-readable code alongside its
//! human-readable message; clients branch on the code, not the text.

use regsync::CoreError;
use regsync_domain::{DomainError, LocationLevel};
use regsync_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. Validation failures map to client errors; storage failures
/// map to processing errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A batch or permission rule was violated.
    Validation(DomainError),
    /// The requested page number was negative.
    InvalidPage,
    /// The requested page size was out of range.
    InvalidSize,
    /// The station lookup found no stored station with the given code.
    ///
    /// Distinct from [`ApiError::Validation`] so the transport layer can
    /// answer a plain lookup miss with a not-found status instead of a
    /// validation failure.
    StationNotFound {
        /// The station code that was looked up.
        code: String,
    },
    /// The batch failed while deleting absent users.
    DeleteFailed {
        /// A description of the failure.
        message: String,
    },
    /// The batch failed while writing to storage.
    Processing {
        /// A description of the failure.
        message: String,
    },
    /// An unexpected internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(inner) => validation_code(inner),
            Self::InvalidPage => "INVALID_PAGE",
            Self::InvalidSize => "INVALID_SIZE",
            Self::StationNotFound { .. } => "INVALID_STATION",
            Self::DeleteFailed { .. } => "DELETE_ERROR",
            Self::Processing { .. } => "PROCESSING_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Returns true when the error is the caller's fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidPage | Self::InvalidSize | Self::StationNotFound { .. }
        )
    }
}

const fn validation_code(error: &DomainError) -> &'static str {
    match error {
        DomainError::EmptyBatch => "INVALID_REQUEST",
        DomainError::InvalidUsername(_) => "INVALID_USERNAME",
        DomainError::AgentCodeNotNumeric(_)
        | DomainError::AgentCodeUnknown(_)
        | DomainError::MissingAgents { .. } => "INVALID_AGENT",
        DomainError::FieldCodeNotNumeric(_)
        | DomainError::FieldCodeUnknown(_)
        | DomainError::MissingFields { .. } => "INVALID_FIELD",
        DomainError::InvalidLocationLevel(_) => "INVALID_LEVEL",
        DomainError::MissingLocationPermission { .. } | DomainError::EmptyLocationValue { .. } => {
            "INVALID_LOCATION"
        }
        DomainError::UnknownLocationCode { level, .. } => match level {
            LocationLevel::Nation => "INVALID_NATION",
            LocationLevel::Area => "INVALID_AREA",
            LocationLevel::Province => "INVALID_PROVINCE",
            LocationLevel::District => "INVALID_DISTRICT",
            LocationLevel::MainStation => "INVALID_MAIN_STATION",
            LocationLevel::Station => "INVALID_STATION",
        },
        DomainError::UserNotFound(_) => "USER_NOT_FOUND",
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(inner) => write!(f, "{inner}"),
            Self::InvalidPage => write!(f, "Page number must be non-negative"),
            Self::InvalidSize => write!(f, "Page size must be between 1 and 100"),
            Self::StationNotFound { code } => {
                write!(f, "Station code {code} does not exist")
            }
            Self::DeleteFailed { message } => {
                write!(f, "Failed to delete users: {message}")
            }
            Self::Processing { message } => {
                write!(f, "Failed to process user batch: {message}")
            }
            Self::Internal { message } => {
                write!(f, "An unexpected error occurred: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self::Validation(error)
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::DomainViolation(inner) => Self::Validation(inner),
            CoreError::Internal(message) => Self::Internal { message },
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(error: PersistenceError) -> Self {
        match error {
            PersistenceError::DeletePhaseFailed(message) => Self::DeleteFailed { message },
            other => Self::Processing {
                message: other.to_string(),
            },
        }
    }
}
