//! Configuration validation.

use std::collections::HashSet;

use crate::config::schema::{Config, MAX_STORAGE_TIMEOUT_SECONDS};
use crate::error::{Error, Result};

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::with_defaults()).unwrap();
///
/// let bad = Config { storage_timeout_seconds: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Checks every set field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(seconds) = config.storage_timeout_seconds {
            Self::validate_timeout(seconds)?;
        }
        if let Some(ref rooms) = config.rooms {
            Self::validate_rooms(rooms)?;
        }
        Ok(())
    }

    fn validate_timeout(seconds: u64) -> Result<()> {
        if (1..=MAX_STORAGE_TIMEOUT_SECONDS).contains(&seconds) {
            Ok(())
        } else {
            Err(Error::Validation {
                field: "storage_timeout_seconds".into(),
                message: format!(
                    "Must be between 1 and {MAX_STORAGE_TIMEOUT_SECONDS} seconds, got {seconds}"
                ),
            })
        }
    }

    fn validate_rooms(rooms: &[String]) -> Result<()> {
        let mut seen = HashSet::new();
        for name in rooms {
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::Validation {
                    field: "rooms".into(),
                    message: "Room names cannot be empty".into(),
                });
            }
            if !seen.insert(name) {
                return Err(Error::Validation {
                    field: "rooms".into(),
                    message: format!("Duplicate room name: {name}"),
                });
            }
        }
        Ok(())
    }
}
