//! `SQLite` storage for rooms, reservations and room restrictions.
//!
//! [`Database`] implements every trait in [`crate::store`]. Overlapping
//! reservation-derived restrictions are rejected by a trigger, so the
//! double-booking check holds even across processes.
//!
//! # Examples
//!
//! ```no_run
//! use innkeep::database::{Database, DatabaseConfig};
//! use innkeep::store::RoomStore;
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
//! db.insert_room("General's Quarters").unwrap();
//!
//! for room in db.all_rooms().unwrap() {
//!     println!("{} {}", room.id, room.name);
//! }
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod restrictions;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME, DATA_DIR_ENV,
    DEFAULT_STORAGE_TIMEOUT,
};
pub use connection::Database;
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use schema::CURRENT_SCHEMA_VERSION;
