//! SQL table definitions and schema constants.
//!
//! Calendar dates are stored as `YYYY-MM-DD` text, so string comparison in
//! SQL orders them correctly. Timestamps are Unix seconds.

/// Current schema version, stored in `metadata`.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key/value metadata, including the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// The room catalog.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_name TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// Guest reservations.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT NOT NULL DEFAULT '',
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        room_id INTEGER NOT NULL,
        processed INTEGER NOT NULL DEFAULT 0,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// Room restrictions. `reservation_id` is NULL (or 0 in legacy rows) for blocks.
pub const CREATE_RESTRICTIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS room_restrictions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        room_id INTEGER NOT NULL,
        reservation_id INTEGER,
        restriction_id INTEGER NOT NULL,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// Speeds up the overlap query.
pub const CREATE_RESTRICTIONS_ROOM_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_room_restrictions_room_dates
    ON room_restrictions(room_id, start_date, end_date)";

/// Speeds up reservation to restriction lookups.
pub const CREATE_RESTRICTIONS_RESERVATION_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_room_restrictions_reservation
    ON room_restrictions(reservation_id)";

/// Speeds up listing by start date.
pub const CREATE_RESERVATIONS_START_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_start_date
    ON reservations(start_date)";

/// Message raised by [`CREATE_OVERLAP_TRIGGER`].
pub const OVERLAP_ABORT_MESSAGE: &str = "room_restriction_overlap";

/// Rejects a reservation-derived restriction that overlaps any restriction
/// on the same room. Blocks are not checked.
pub const CREATE_OVERLAP_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS trg_room_restrictions_no_overlap
    BEFORE INSERT ON room_restrictions
    WHEN NEW.reservation_id IS NOT NULL AND NEW.reservation_id > 0
    BEGIN
        SELECT RAISE(ABORT, 'room_restriction_overlap')
        WHERE EXISTS (
            SELECT 1 FROM room_restrictions
            WHERE room_id = NEW.room_id
              AND start_date < NEW.end_date
              AND end_date > NEW.start_date
        );
    END";

/// Reads the schema version.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// Writes the schema version.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
