//! Configuration schema definitions.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::operations::OrphanStrategy;

/// Default bound, in seconds, on how long a storage operation may wait.
pub const DEFAULT_STORAGE_TIMEOUT_SECONDS: u64 = 3;

/// Largest accepted storage timeout, in seconds.
pub const MAX_STORAGE_TIMEOUT_SECONDS: u64 = 60;

/// Complete configuration structure.
///
/// Every field is optional so that sources can be layered; unset fields fall
/// back to the accessor defaults.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, OutputFormat};
///
/// let config: Config = serde_yaml::from_str("
/// storage_timeout_seconds: 5
/// rooms: [General's Quarters, Major's Suite]
/// output_format: json
/// ").unwrap();
/// assert_eq!(config.storage_timeout().as_secs(), 5);
/// assert_eq!(config.rooms().len(), 2);
/// assert_eq!(config.output_format(), OutputFormat::Json);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Seconds a storage operation may wait on a lock before failing.
    pub storage_timeout_seconds: Option<u64>,

    /// Fail instead of creating a missing database.
    pub disable_autoinit: Option<bool>,

    /// Room catalog seeded by `init`, in id order.
    pub rooms: Option<Vec<String>>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,

    /// What reconciliation does with orphaned reservations.
    pub orphan_strategy: Option<OrphanStrategy>,
}

impl Config {
    /// The built-in defaults with every field set.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            storage_timeout_seconds: Some(DEFAULT_STORAGE_TIMEOUT_SECONDS),
            disable_autoinit: Some(false),
            rooms: Some(Vec::new()),
            output_format: Some(OutputFormat::default()),
            orphan_strategy: Some(OrphanStrategy::default()),
        }
    }

    /// The storage timeout as a [`Duration`].
    #[must_use]
    pub fn storage_timeout(&self) -> Duration {
        Duration::from_secs(
            self.storage_timeout_seconds
                .unwrap_or(DEFAULT_STORAGE_TIMEOUT_SECONDS),
        )
    }

    /// Whether automatic database creation is off.
    #[must_use]
    pub fn autoinit_disabled(&self) -> bool {
        self.disable_autoinit.unwrap_or(false)
    }

    /// The configured room names.
    #[must_use]
    pub fn rooms(&self) -> &[String] {
        self.rooms.as_deref().unwrap_or_default()
    }

    /// The output format for list commands.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }

    /// The orphan strategy for reconciliation.
    #[must_use]
    pub fn orphan_strategy(&self) -> OrphanStrategy {
        self.orphan_strategy.unwrap_or_default()
    }
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use innkeep::config::OutputFormat;
///
/// assert_eq!(OutputFormat::Json.to_string(), "json");
/// assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(Error::Validation {
                field: "output_format".into(),
                message: format!("unknown format '{other}', expected table, json or csv"),
            }),
        }
    }
}
