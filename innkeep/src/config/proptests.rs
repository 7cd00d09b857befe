//! Property-based tests for configuration merging and validation.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat};
use super::validator::ConfigValidator;
use crate::operations::OrphanStrategy;
use proptest::prelude::*;

fn format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Table),
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
    ]
}

fn strategy_strategy() -> impl Strategy<Value = OrphanStrategy> {
    prop_oneof![Just(OrphanStrategy::Restore), Just(OrphanStrategy::Remove)]
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(1u64..=60),
        prop::option::of(any::<bool>()),
        prop::option::of(prop::collection::vec("[A-Z][a-z]{2,8}", 0..4)),
        prop::option::of(format_strategy()),
        prop::option::of(strategy_strategy()),
    )
        .prop_map(
            |(storage_timeout_seconds, disable_autoinit, rooms, output_format, orphan_strategy)| {
                Config {
                    storage_timeout_seconds,
                    disable_autoinit,
                    rooms,
                    output_format,
                    orphan_strategy,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(
            merged.storage_timeout_seconds,
            high.storage_timeout_seconds.or(low.storage_timeout_seconds)
        );
        prop_assert_eq!(merged.disable_autoinit, high.disable_autoinit.or(low.disable_autoinit));
        let expected_rooms = if high.rooms.is_some() { &high.rooms } else { &low.rooms };
        prop_assert_eq!(&merged.rooms, expected_rooms);
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));
        prop_assert_eq!(merged.orphan_strategy, high.orphan_strategy.or(low.orphan_strategy));
    }

    #[test]
    fn merging_empty_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(&merged, &config);

        let mut from_empty = Config::default();
        ConfigMerger::merge_into(&mut from_empty, &config);
        prop_assert_eq!(from_empty, config);
    }

    #[test]
    fn timeouts_in_range_validate(seconds in 1u64..=60) {
        let config = Config { storage_timeout_seconds: Some(seconds), ..Default::default() };
        prop_assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn timeouts_out_of_range_fail(seconds in prop_oneof![Just(0u64), 61u64..=10_000]) {
        let config = Config { storage_timeout_seconds: Some(seconds), ..Default::default() };
        prop_assert!(ConfigValidator::validate(&config).is_err());
    }
}
