//! Shared helpers for database unit tests.

use chrono::NaiveDate;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::reservation::Guest;

/// Creates a database in a temporary directory that outlives the test.
///
/// # Panics
///
/// Panics if the directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive for the life of the handle
    std::mem::forget(dir);

    db
}

/// A guest that passes form validation.
#[must_use]
pub fn guest() -> Guest {
    Guest::new("Ada", "Lovelace", "ada@example.com", "555-0100")
}

/// A day in June 2025.
///
/// # Panics
///
/// Panics if `day` is not a valid June day.
#[must_use]
pub fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
}
