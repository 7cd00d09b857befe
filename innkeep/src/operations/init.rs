//! Data directory and database initialization.
//!
//! Creates the data directory, a fresh database, the room catalog and,
//! optionally, a commented configuration file.

use std::fs;
use std::path::PathBuf;

use log::info;

use crate::database::{Database, DatabaseConfig, DATABASE_FILE_NAME};
use crate::error::{Error, Result};
use crate::room::RoomId;
use crate::store::RoomStore;

/// Options for [`init_database`].
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write a default `config.yaml` if none exists.
    pub create_config: bool,
    /// Room names to seed, in id order.
    pub rooms: Vec<String>,
}

impl InitOptions {
    /// Creates options for `data_dir` with no rooms.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
            rooms: Vec::new(),
        }
    }

    /// Sets whether to replace an existing database.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether to write a default configuration file.
    #[must_use]
    pub fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }

    /// Sets the room catalog to seed.
    #[must_use]
    pub fn with_rooms(mut self, rooms: Vec<String>) -> Self {
        self.rooms = rooms;
        self
    }
}

/// What [`init_database`] did.
#[derive(Debug)]
pub struct InitResult {
    /// Whether the data directory was created.
    pub data_dir_created: bool,
    /// Whether a configuration file was written.
    pub config_created: bool,
    /// Ids of the seeded rooms.
    pub rooms: Vec<RoomId>,
    /// The data directory.
    pub data_dir: PathBuf,
}

const DEFAULT_CONFIG_TEMPLATE: &str = r"# innkeep configuration

# Seconds a storage operation may wait on a lock (1-60, default: 3)
# storage_timeout_seconds: 3

# Fail instead of creating a missing database
# disable_autoinit: false

# Room catalog seeded by `innkeep init`
# rooms:
#   - General's Quarters
#   - Major's Suite

# Default output for `innkeep list`: table, json or csv
# output_format: table

# What `innkeep reconcile` does with reservations that lost their
# restriction: restore or remove
# orphan_strategy: restore
";

/// Initializes the data directory and database.
///
/// # Errors
///
/// Returns [`Error::Validation`] if a database already exists and
/// `overwrite` is off, or an I/O or storage error if any step fails.
///
/// # Examples
///
/// ```no_run
/// use innkeep::operations::{init_database, InitOptions};
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/innkeep"))
///     .with_rooms(vec!["General's Quarters".into(), "Major's Suite".into()]);
/// let result = init_database(&options).unwrap();
/// println!("seeded {} room(s)", result.rooms.len());
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        config_created: false,
        rooms: Vec::new(),
        data_dir: options.data_dir.clone(),
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE_NAME);
    if db_path.exists() {
        if !options.overwrite {
            return Err(Error::Validation {
                field: "database".into(),
                message: format!(
                    "Database already exists at {}. Use --overwrite to replace it.",
                    db_path.display()
                ),
            });
        }
        fs::remove_file(&db_path)?;
        // A stale WAL would be replayed into the new file
        for suffix in ["-wal", "-shm"] {
            let mut sidecar = db_path.clone().into_os_string();
            sidecar.push(suffix);
            let sidecar = PathBuf::from(sidecar);
            if sidecar.exists() {
                fs::remove_file(&sidecar)?;
            }
        }
    }

    let mut db = Database::open(DatabaseConfig::new(&db_path))?;
    if db.all_rooms()?.is_empty() {
        for name in &options.rooms {
            result.rooms.push(db.insert_room(name)?);
        }
    }

    if options.create_config {
        let config_path = options.data_dir.join("config.yaml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
            result.config_created = true;
        }
    }

    info!(
        "initialized {} with {} room(s)",
        db_path.display(),
        result.rooms.len()
    );
    Ok(result)
}
