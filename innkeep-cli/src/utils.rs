//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including data directory resolution, configuration loading, database
//! management, and output formatting.

use crate::error::CliError;
use clap::ValueEnum;
use innkeep::config::OutputFormat;
use innkeep::database::{default_data_dir, DATABASE_FILE_NAME};
use innkeep::dates::parse_date;
use innkeep::operations::{init_database, InitOptions};
use innkeep::{Config, ConfigBuilder, Database, DatabaseConfig, Reservation, Room};
use serde::Serialize;
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // verbose/quiet are consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the storage timeout (in seconds).
    pub storage_timeout: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Output format flag accepted by listing commands.
#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    /// Tab-separated table (human-readable)
    Table,
    /// JSON array
    Json,
    /// CSV with a header row
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

/// Picks the flag value if given, else the configured default.
pub fn resolve_format(arg: Option<FormatArg>, config: &Config) -> OutputFormat {
    arg.map_or_else(|| config.output_format(), OutputFormat::from)
}

/// Resolve the data directory: `--data-dir` (or `INNKEEP_DATA_DIR`), else `~/.innkeep`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => default_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Project file (`innkeep.yaml`, searched upward from the working directory)
/// 4. User file (`config.yaml` in the data directory)
/// 5. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let overrides = Config {
        storage_timeout_seconds: global.storage_timeout,
        disable_autoinit: global.disable_autoinit.then_some(true),
        ..Config::default()
    };

    ConfigBuilder::new()
        .with_data_dir(resolve_data_dir(global)?)
        .with_working_dir(env::current_dir()?)
        .with_config(overrides)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the database, initializing it first when it is missing.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let data_dir = resolve_data_dir(global)?;
    let db_path = data_dir.join(DATABASE_FILE_NAME);

    if !db_path.exists() {
        if config.autoinit_disabled() {
            return Err(CliError::NoDataDirectory(db_path));
        }
        log::debug!("no database at {}, auto-initializing", shorten_path(&db_path));
        init_database(&InitOptions::new(data_dir).with_rooms(config.rooms().to_vec()))?;
    }

    let db_config = DatabaseConfig::new(db_path)
        .with_busy_timeout(config.storage_timeout())
        .without_auto_create();
    Database::open(db_config).map_err(CliError::from)
}

/// Parse a `YYYY-MM-DD` argument.
pub fn parse_day(field: &str, value: &str) -> Result<chrono::NaiveDate, CliError> {
    parse_date(field, value).map_err(CliError::from)
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: SystemTime) -> String {
    use chrono::{DateTime, Utc};
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

/// One room as printed by `rooms` and `search`.
#[derive(Serialize)]
struct RoomRow<'a> {
    id: i64,
    name: &'a str,
}

const ROOM_HEADERS: [&str; 2] = ["id", "name"];

/// Write rooms in the requested format.
pub fn write_rooms<W: Write>(out: W, rooms: &[Room], format: OutputFormat) -> Result<(), CliError> {
    let rows: Vec<RoomRow<'_>> = rooms
        .iter()
        .map(|room| RoomRow {
            id: room.id.value(),
            name: &room.name,
        })
        .collect();
    write_rows(out, &ROOM_HEADERS, &rows, format, |row| {
        vec![row.id.to_string(), row.name.to_string()]
    })
}

/// One reservation as printed by `list` and `show`.
#[derive(Serialize)]
struct ReservationRow {
    id: i64,
    room_id: i64,
    start: String,
    end: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    status: &'static str,
    created_at: String,
}

const RESERVATION_HEADERS: [&str; 10] = [
    "id",
    "room_id",
    "start",
    "end",
    "first_name",
    "last_name",
    "email",
    "phone",
    "status",
    "created_at",
];

impl From<&Reservation> for ReservationRow {
    fn from(r: &Reservation) -> Self {
        let guest = r.guest();
        Self {
            id: r.id().map_or(0, innkeep::ReservationId::value),
            room_id: r.room_id().value(),
            start: r.stay().start().to_string(),
            end: r.stay().end().to_string(),
            first_name: guest.first_name.clone(),
            last_name: guest.last_name.clone(),
            email: guest.email.clone(),
            phone: guest.phone.clone(),
            status: match r.status() {
                innkeep::ProcessingStatus::New => "new",
                innkeep::ProcessingStatus::Processed => "processed",
            },
            created_at: format_timestamp(r.created_at()),
        }
    }
}

/// Write reservations in the requested format.
pub fn write_reservations<W: Write>(
    out: W,
    reservations: &[Reservation],
    format: OutputFormat,
) -> Result<(), CliError> {
    let rows: Vec<ReservationRow> = reservations.iter().map(ReservationRow::from).collect();
    write_rows(out, &RESERVATION_HEADERS, &rows, format, |row| {
        vec![
            row.id.to_string(),
            row.room_id.to_string(),
            row.start.clone(),
            row.end.clone(),
            row.first_name.clone(),
            row.last_name.clone(),
            row.email.clone(),
            row.phone.clone(),
            row.status.to_string(),
            row.created_at.clone(),
        ]
    })
}

fn write_rows<W, T, F>(
    mut out: W,
    headers: &[&str],
    rows: &[T],
    format: OutputFormat,
    fields: F,
) -> Result<(), CliError>
where
    W: Write,
    T: Serialize,
    F: Fn(&T) -> Vec<String>,
{
    match format {
        OutputFormat::Table => {
            let header_line = headers
                .iter()
                .map(|s| s.to_uppercase())
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(out, "{header_line}")?;
            for row in rows {
                let line = fields(row)
                    .into_iter()
                    .map(|f| if f.is_empty() { "-".to_string() } else { f })
                    .collect::<Vec<_>>()
                    .join("\t");
                writeln!(out, "{line}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, rows)
                .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(headers)?;
            for row in rows {
                writer.write_record(fields(row))?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}
