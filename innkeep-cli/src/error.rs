//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use std::fmt;
use std::path::PathBuf;

use innkeep::Error as LibError;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// A storage operation exceeded its timeout.
    Timeout(u64),

    /// Data directory not found (and auto-init disabled).
    NoDataDirectory(PathBuf),

    /// Configuration error.
    Config(String),

    /// Semantic failure (e.g., room not free) - exit code 1.
    SemanticFailure(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Semantic failure (room unavailable, nothing free, no such row)
    /// - 2: Storage timeout
    /// - 3: No data directory found
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    /// - 8: Partial booking, run `innkeep reconcile`
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::SemanticFailure(_) => 1,
            CliError::Library(lib_err) => match lib_err {
                LibError::RoomUnavailable { .. } | LibError::NotFound { .. } => 1,
                LibError::Validation { .. } => 4,
                LibError::Configuration(_) => 7,
                LibError::PartialBooking { .. } => 8,
                _ => 6,
            },
            CliError::Timeout(_) => 2,
            CliError::NoDataDirectory(_) => 3,
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(LibError::PartialBooking {
                reservation_id,
                source,
            }) => write!(
                f,
                "reservation {reservation_id} was saved but its room was not held ({source}); \
                 run `innkeep reconcile`"
            ),
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Timeout(seconds) => {
                write!(f, "Storage busy: gave up after {seconds}s, try again")
            }
            CliError::NoDataDirectory(path) => write!(
                f,
                "Database not found at {} (run `innkeep init` or enable auto-init)",
                path.display()
            ),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::StorageTimeout { seconds } => CliError::Timeout(seconds),
            LibError::DataDirectoryNotFound { path } => CliError::NoDataDirectory(path),
            other => CliError::Library(other),
        }
    }
}

impl From<innkeep::ValidationError> for CliError {
    fn from(e: innkeep::ValidationError) -> Self {
        CliError::InvalidArguments(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<csv::Error> for CliError {
    fn from(e: csv::Error) -> Self {
        CliError::Io(std::io::Error::other(e))
    }
}
