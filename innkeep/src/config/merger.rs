//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration layers.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigMerger};
///
/// let low = Config { storage_timeout_seconds: Some(3), ..Default::default() };
/// let high = Config { storage_timeout_seconds: Some(10), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.storage_timeout_seconds, Some(10));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merges sources given lowest precedence first.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merges `source` over `target`: every field set in `source` wins.
    ///
    /// The room list is replaced as a whole, never concatenated.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.storage_timeout_seconds.is_some() {
            target.storage_timeout_seconds = source.storage_timeout_seconds;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.rooms.is_some() {
            target.rooms.clone_from(&source.rooms);
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if source.orphan_strategy.is_some() {
            target.orphan_strategy = source.orphan_strategy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::path::PathBuf;

    fn make_source(precedence: u8, config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from(format!("test-{precedence}.yaml")),
            precedence,
            config,
        }
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut target = Config {
            storage_timeout_seconds: Some(5),
            disable_autoinit: Some(true),
            ..Default::default()
        };
        let source = Config {
            output_format: Some(OutputFormat::Csv),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &source);
        assert_eq!(target.storage_timeout_seconds, Some(5));
        assert_eq!(target.disable_autoinit, Some(true));
        assert_eq!(target.output_format, Some(OutputFormat::Csv));
    }

    #[test]
    fn test_rooms_replaced_not_appended() {
        let mut target = Config {
            rooms: Some(vec!["A".into(), "B".into()]),
            ..Default::default()
        };
        let source = Config {
            rooms: Some(vec!["C".into()]),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &source);
        assert_eq!(target.rooms(), ["C".to_string()]);
    }

    #[test]
    fn test_merge_sources_in_order() {
        let sources = vec![
            make_source(
                1,
                Config {
                    storage_timeout_seconds: Some(4),
                    rooms: Some(vec!["A".into()]),
                    ..Default::default()
                },
            ),
            make_source(
                2,
                Config {
                    storage_timeout_seconds: Some(8),
                    ..Default::default()
                },
            ),
        ];

        let merged = ConfigMerger::merge(sources);
        assert_eq!(merged.storage_timeout_seconds, Some(8));
        assert_eq!(merged.rooms(), ["A".to_string()]);
    }
}
