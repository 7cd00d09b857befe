//! Room reference data.
//!
//! Rooms are managed outside the booking engine; the engine only reads them.

use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// The identifier of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(i64);

impl RoomId {
    /// Wraps a raw room id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for RoomId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// The room id.
    pub id: RoomId,
    /// The display name, e.g. "General's Quarters".
    pub name: String,
    /// When the room was created.
    pub created_at: SystemTime,
    /// When the room was last updated.
    pub updated_at: SystemTime,
}

impl Room {
    /// Creates a room stamped with the current time.
    #[must_use]
    pub fn new(id: RoomId, name: impl Into<String>) -> Self {
        let now = SystemTime::now();
        Self {
            id,
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
