//! `INNKEEP_*` environment variable overrides.

use std::env;

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Overrides the storage timeout, in seconds.
pub const STORAGE_TIMEOUT_ENV: &str = "INNKEEP_STORAGE_TIMEOUT_SECONDS";
/// Disables automatic database creation.
pub const DISABLE_AUTOINIT_ENV: &str = "INNKEEP_DISABLE_AUTOINIT";
/// Comma-separated room catalog.
pub const ROOMS_ENV: &str = "INNKEEP_ROOMS";
/// Output format for list commands.
pub const OUTPUT_FORMAT_ENV: &str = "INNKEEP_OUTPUT_FORMAT";
/// Orphan strategy for reconciliation.
pub const ORPHAN_STRATEGY_ENV: &str = "INNKEEP_ORPHAN_STRATEGY";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use innkeep::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Applies every set `INNKEEP_*` variable to `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the variable if a value cannot be
    /// parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(seconds) = env::var(STORAGE_TIMEOUT_ENV) {
            config.storage_timeout_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::Validation {
                    field: STORAGE_TIMEOUT_ENV.into(),
                    message: format!("Must be a positive integer, got '{seconds}'"),
                })?);
        }

        if let Ok(val) = env::var(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        if let Ok(rooms) = env::var(ROOMS_ENV) {
            config.rooms = Some(Self::parse_rooms(&rooms));
        }

        if let Ok(format) = env::var(OUTPUT_FORMAT_ENV) {
            config.output_format = Some(format.parse().map_err(|_| Error::Validation {
                field: OUTPUT_FORMAT_ENV.into(),
                message: format!("Expected table, json or csv, got '{format}'"),
            })?);
        }

        if let Ok(strategy) = env::var(ORPHAN_STRATEGY_ENV) {
            config.orphan_strategy = Some(strategy.parse().map_err(|_| Error::Validation {
                field: ORPHAN_STRATEGY_ENV.into(),
                message: format!("Expected restore or remove, got '{strategy}'"),
            })?);
        }

        Ok(())
    }

    /// Parses a boolean value.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    /// Splits a comma-separated room list, dropping blank entries.
    fn parse_rooms(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::operations::OrphanStrategy;
    use serial_test::serial;

    const ALL: [&str; 5] = [
        STORAGE_TIMEOUT_ENV,
        DISABLE_AUTOINIT_ENV,
        ROOMS_ENV,
        OUTPUT_FORMAT_ENV,
        ORPHAN_STRATEGY_ENV,
    ];

    fn clear() {
        for var in ALL {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_parse_bool_variants() {
        for s in ["true", "TRUE", "1", "yes", "On"] {
            assert!(EnvironmentConfig::parse_bool("test", s).unwrap());
        }
        for s in ["false", "0", "NO", "off"] {
            assert!(!EnvironmentConfig::parse_bool("test", s).unwrap());
        }
        assert!(EnvironmentConfig::parse_bool("test", "maybe").is_err());
    }

    #[test]
    fn test_parse_rooms() {
        assert_eq!(
            EnvironmentConfig::parse_rooms(" General's Quarters , ,Major's Suite"),
            vec!["General's Quarters".to_string(), "Major's Suite".to_string()]
        );
        assert!(EnvironmentConfig::parse_rooms("").is_empty());
    }

    #[test]
    #[serial]
    fn test_apply_overrides_no_env_vars() {
        clear();
        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_apply_overrides_all() {
        clear();
        env::set_var(STORAGE_TIMEOUT_ENV, "7");
        env::set_var(DISABLE_AUTOINIT_ENV, "yes");
        env::set_var(ROOMS_ENV, "A,B");
        env::set_var(OUTPUT_FORMAT_ENV, "json");
        env::set_var(ORPHAN_STRATEGY_ENV, "remove");

        let mut config = Config::default();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear();

        result.unwrap();
        assert_eq!(config.storage_timeout_seconds, Some(7));
        assert_eq!(config.disable_autoinit, Some(true));
        assert_eq!(config.rooms(), ["A".to_string(), "B".to_string()]);
        assert_eq!(config.output_format, Some(OutputFormat::Json));
        assert_eq!(config.orphan_strategy, Some(OrphanStrategy::Remove));
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_names_variable() {
        clear();
        env::set_var(STORAGE_TIMEOUT_ENV, "soon");
        let result = EnvironmentConfig::apply_overrides(&mut Config::default());
        clear();

        match result {
            Err(Error::Validation { field, .. }) => assert_eq!(field, STORAGE_TIMEOUT_ENV),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
