//! Configuration layering from real files and environment variables.

use std::env;
use std::fs;

use innkeep::config::{Config, ConfigBuilder, OutputFormat};
use innkeep::operations::OrphanStrategy;
use innkeep::Error;
use serial_test::serial;
use tempfile::TempDir;

const ENV_VARS: [&str; 5] = [
    "INNKEEP_STORAGE_TIMEOUT_SECONDS",
    "INNKEEP_DISABLE_AUTOINIT",
    "INNKEEP_ROOMS",
    "INNKEEP_OUTPUT_FORMAT",
    "INNKEEP_ORPHAN_STRATEGY",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_user_config_from_data_dir() {
    clear_env();
    let data_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    fs::write(
        data_dir.path().join("config.yaml"),
        "rooms:\n  - General's Quarters\n  - Major's Suite\norphan_strategy: remove\n",
    )
    .unwrap();

    let config = ConfigBuilder::new()
        .with_data_dir(data_dir.path())
        .with_working_dir(project.path())
        .build()
        .unwrap();

    assert_eq!(config.rooms().len(), 2);
    assert_eq!(config.orphan_strategy(), OrphanStrategy::Remove);
    assert_eq!(config.storage_timeout().as_secs(), 3);
}

#[test]
#[serial]
fn test_project_file_overrides_user_file_and_env_overrides_both() {
    clear_env();
    let data_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let nested = project.path().join("wing").join("east");
    fs::create_dir_all(&nested).unwrap();

    fs::write(data_dir.path().join("config.yaml"), "output_format: csv\n").unwrap();
    fs::write(
        project.path().join("innkeep.yaml"),
        "output_format: json\nstorage_timeout_seconds: 12\n",
    )
    .unwrap();

    let config = ConfigBuilder::new()
        .with_data_dir(data_dir.path())
        .with_working_dir(&nested)
        .build()
        .unwrap();
    assert_eq!(config.output_format(), OutputFormat::Json);
    assert_eq!(config.storage_timeout().as_secs(), 12);

    env::set_var("INNKEEP_OUTPUT_FORMAT", "table");
    env::set_var("INNKEEP_ROOMS", "Attic, Cellar");
    let config = ConfigBuilder::new()
        .with_data_dir(data_dir.path())
        .with_working_dir(&nested)
        .build();
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.output_format(), OutputFormat::Table);
    assert_eq!(config.rooms(), ["Attic".to_string(), "Cellar".to_string()]);
}

#[test]
#[serial]
fn test_env_value_out_of_range_rejected() {
    clear_env();
    env::set_var("INNKEEP_STORAGE_TIMEOUT_SECONDS", "120");
    let result = ConfigBuilder::new().skip_files().build();
    clear_env();

    assert!(matches!(result, Err(Error::Validation { .. })));
}

#[test]
#[serial]
fn test_programmatic_layer_is_highest() {
    clear_env();
    env::set_var("INNKEEP_DISABLE_AUTOINIT", "true");
    let result = ConfigBuilder::new()
        .skip_files()
        .with_config(Config {
            disable_autoinit: Some(false),
            ..Default::default()
        })
        .build();
    clear_env();

    assert!(!result.unwrap().autoinit_disabled());
}

#[test]
fn test_duplicate_rooms_rejected() {
    let data_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    fs::write(data_dir.path().join("config.yaml"), "rooms: [A, B, A]\n").unwrap();

    let result = ConfigBuilder::new()
        .skip_env()
        .with_data_dir(data_dir.path())
        .with_working_dir(project.path())
        .build();
    assert!(matches!(result, Err(Error::Validation { .. })));
}
