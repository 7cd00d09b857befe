//! Common test utilities for integration tests.

use std::path::PathBuf;

use chrono::NaiveDate;
use innkeep::database::{Database, DatabaseConfig};
use innkeep::{DateRange, Guest, Reservation, RoomId};
use tempfile::TempDir;

/// A data directory holding `innkeep.db`, removed when dropped.
#[allow(dead_code)]
pub struct TestDatabase {
    pub dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestDatabase {
    /// Creates the directory and the schema, seeding `rooms` in id order.
    pub fn with_rooms(rooms: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("innkeep.db");
        let mut db = Database::open(DatabaseConfig::new(&path)).unwrap();
        for name in rooms {
            db.insert_room(name).unwrap();
        }
        Self { dir, path }
    }

    /// Opens another handle on the same file.
    pub fn open(&self) -> Database {
        Database::open(DatabaseConfig::new(&self.path)).unwrap()
    }
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[allow(dead_code)]
pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::parse(start, end).unwrap()
}

#[allow(dead_code)]
pub fn guest(first: &str) -> Guest {
    Guest::new(
        first,
        "Lovelace",
        &format!("{}@example.com", first.to_lowercase()),
        "555-0100",
    )
}

#[allow(dead_code)]
pub fn reservation(first: &str, room: i64, start: &str, end: &str) -> Reservation {
    Reservation::builder(guest(first), RoomId::new(room), range(start, end)).build()
}
