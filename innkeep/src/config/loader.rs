//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::schema::Config;
use crate::database::{default_data_dir, DATA_DIR_ENV};
use crate::error::{Error, Result};

/// File name of the user configuration inside the data directory.
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// File name of a project configuration.
pub const PROJECT_CONFIG_FILE: &str = "innkeep.yaml";

/// A loaded configuration file.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration files.
///
/// # Examples
///
/// ```no_run
/// use innkeep::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Path::new("."), None).unwrap();
/// println!("Found {} configuration file(s)", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discovers and loads every configuration file, lowest precedence first.
    ///
    /// 1. `<data_dir>/config.yaml` (precedence 1)
    /// 2. the nearest `innkeep.yaml` walking up from `working_dir` (precedence 2)
    ///
    /// Without `data_dir`, `INNKEEP_DATA_DIR` and then `~/.innkeep` are used.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read or parsed.
    pub fn load_all(working_dir: &Path, data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        let user_path = Self::user_config_path(data_dir)?;
        if user_path.exists() {
            sources.push(ConfigSource {
                config: Self::load_file(&user_path)?,
                path: user_path,
                precedence: 1,
            });
        }

        if let Some(project) = Self::discover_project_config(working_dir)? {
            sources.push(project);
        }

        sources.sort_by_key(|s| s.precedence);
        Ok(sources)
    }

    /// Finds the nearest `innkeep.yaml` at or above `start_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the discovered file cannot be read or parsed.
    pub fn discover_project_config(start_dir: &Path) -> Result<Option<ConfigSource>> {
        let mut current = start_dir.to_path_buf();
        loop {
            let candidate = current.join(PROJECT_CONFIG_FILE);
            if candidate.exists() {
                return Ok(Some(ConfigSource {
                    config: Self::load_file(&candidate)?,
                    path: candidate,
                    precedence: 2,
                }));
            }
            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Loads and parses one YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the file cannot be read and
    /// [`Error::Configuration`] if it is not a valid configuration.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: format!("Failed to read configuration file: {e}"),
        })?;
        debug!("loading configuration from {}", path.display());

        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(&contents)?)
    }

    fn user_config_path(data_dir: Option<&Path>) -> Result<PathBuf> {
        let dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => match std::env::var_os(DATA_DIR_ENV) {
                Some(dir) if !dir.is_empty() => PathBuf::from(dir),
                _ => default_data_dir()?,
            },
        };
        Ok(dir.join(USER_CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load_file(Path::new("/nonexistent/path/config.yaml"));
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.yaml");
        fs::write(&config_path, "invalid: yaml: syntax:").unwrap();

        let result = ConfigLoader::load_file(&config_path);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_load_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "\n").unwrap();

        assert_eq!(ConfigLoader::load_file(&config_path).unwrap(), Config::default());
    }

    #[test]
    fn test_discover_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let child = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&child).unwrap();
        fs::write(temp_dir.path().join(PROJECT_CONFIG_FILE), "rooms: [Attic]\n").unwrap();

        let found = ConfigLoader::discover_project_config(&child)
            .unwrap()
            .unwrap();
        assert_eq!(found.precedence, 2);
        assert_eq!(found.config.rooms(), ["Attic".to_string()]);
    }

    #[test]
    fn test_load_all_orders_by_precedence() {
        let data_dir = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(data_dir.path().join(USER_CONFIG_FILE), "storage_timeout_seconds: 9\n").unwrap();
        fs::write(project.path().join(PROJECT_CONFIG_FILE), "output_format: json\n").unwrap();

        let sources = ConfigLoader::load_all(project.path(), Some(data_dir.path())).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].precedence, 1);
        assert_eq!(sources[0].config.storage_timeout_seconds, Some(9));
        assert_eq!(sources[1].precedence, 2);
    }
}
