//! Error types for the innkeep library.
//!
//! This module provides the error taxonomy for every core operation, using
//! `thiserror` for ergonomic error handling. Errors are grouped into
//! [`ErrorCategory`] values so callers can tell "try again" apart from
//! "no availability" and "contact support".

use std::path::PathBuf;

use thiserror::Error;

use crate::dates::DateRange;
use crate::reservation::ReservationId;
use crate::room::RoomId;

/// Result type alias for operations that may fail with an innkeep error.
///
/// # Examples
///
/// ```
/// use innkeep::{Error, Result};
///
/// fn example_operation() -> Result<bool> {
///     Ok(true)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the innkeep library.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied input failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The SQLite store failed a read or write.
    #[error("storage error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A non-SQLite store failed a read or write.
    #[error("storage error during {operation}: {message}")]
    Storage {
        /// The store operation that failed.
        operation: String,
        /// Details from the store.
        message: String,
    },

    /// A storage operation waited longer than its configured bound.
    #[error("storage timeout after {seconds}s")]
    StorageTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The room already has a restriction overlapping the requested stay.
    #[error("room {room_id} is not available for {range}")]
    RoomUnavailable {
        /// The room that was requested.
        room_id: RoomId,
        /// The requested stay.
        range: DateRange,
    },

    /// The reservation row was written but its restriction row was not.
    ///
    /// The reservation stays persisted and must be reconciled.
    #[error("reservation {reservation_id} was saved but its room restriction was not: {source}")]
    PartialBooking {
        /// The id of the reservation that is now orphaned.
        reservation_id: ReservationId,
        /// The failure from the restriction insert.
        #[source]
        source: Box<Error>,
    },

    /// The requested row was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A cached projection could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The schema version this build understands.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

/// How a caller should react to an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The input was malformed; fix it and resubmit.
    InvalidInput,
    /// A transient storage failure; the operation may be retried.
    Retryable,
    /// The room is taken for the requested dates.
    Unavailable,
    /// Data was left half-written and needs an operator.
    NeedsReconciliation,
    /// The referenced row does not exist.
    NotFound,
    /// Anything else; not expected to succeed on retry.
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "invalid input"),
            Self::Retryable => write!(f, "try again"),
            Self::Unavailable => write!(f, "no availability"),
            Self::NeedsReconciliation => write!(f, "contact support"),
            Self::NotFound => write!(f, "not found"),
            Self::Internal => write!(f, "internal error"),
        }
    }
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Classifies the error for caller-side messaging and retry decisions.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::{Error, ErrorCategory};
    ///
    /// let err = Error::StorageTimeout { seconds: 3 };
    /// assert_eq!(err.category(), ErrorCategory::Retryable);
    /// ```
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } => ErrorCategory::InvalidInput,
            Self::Database(_) | Self::Storage { .. } | Self::StorageTimeout { .. } => {
                ErrorCategory::Retryable
            }
            Self::RoomUnavailable { .. } => ErrorCategory::Unavailable,
            Self::PartialBooking { .. } => ErrorCategory::NeedsReconciliation,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Configuration(_)
            | Self::Serialization(_)
            | Self::Io(_)
            | Self::DataDirectoryNotFound { .. }
            | Self::DatabaseCorruption { .. }
            | Self::UnsupportedSchemaVersion { .. } => ErrorCategory::Internal,
        }
    }

    /// Returns `true` if the error came from the persistence layer.
    #[must_use]
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Storage { .. } | Self::StorageTimeout { .. }
        )
    }

    /// Shorthand for building a [`Error::Storage`] value.
    pub(crate) fn storage(operation: &str, message: impl Into<String>) -> Self {
        Self::Storage {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[test]
    fn test_validation_error() {
        let err = Error::Validation {
            field: "start".to_string(),
            message: "must be before end".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("start"));
        assert_eq!(err.category(), ErrorCategory::InvalidInput);
    }

    #[test]
    fn test_room_unavailable_error() {
        let err = Error::RoomUnavailable {
            room_id: RoomId::new(1),
            range: DateRange::new(june(1), june(5)),
        };
        let display = format!("{err}");
        assert!(display.contains("room 1"));
        assert!(display.contains("2025-06-01"));
        assert_eq!(err.category(), ErrorCategory::Unavailable);
    }

    #[test]
    fn test_partial_booking_is_distinct_from_storage_error() {
        let err = Error::PartialBooking {
            reservation_id: ReservationId::new(7),
            source: Box::new(Error::storage("insert_restriction", "disk full")),
        };
        assert_eq!(err.category(), ErrorCategory::NeedsReconciliation);
        assert!(!err.is_storage_error());
        assert!(format!("{err}").contains("reservation 7"));

        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("disk full"));
    }

    #[test]
    fn test_storage_errors_are_retryable() {
        let timeout = Error::StorageTimeout { seconds: 3 };
        assert!(timeout.is_storage_error());
        assert_eq!(timeout.category(), ErrorCategory::Retryable);
        assert!(format!("{timeout}").contains("3s"));

        let sqlite = Error::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(sqlite.is_storage_error());
    }

    #[test]
    fn test_not_found_error() {
        let err = Error::NotFound {
            resource: "reservation 42".to_string(),
        };
        assert!(format!("{err}").contains("reservation 42"));
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn test_unsupported_schema_version_error() {
        let err = Error::UnsupportedSchemaVersion {
            expected: 1,
            found: 2,
        };
        let display = format!("{err}");
        assert!(display.contains("expected 1"));
        assert!(display.contains("found 2"));
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::Retryable.to_string(), "try again");
        assert_eq!(ErrorCategory::Unavailable.to_string(), "no availability");
        assert_eq!(
            ErrorCategory::NeedsReconciliation.to_string(),
            "contact support"
        );
    }
}
