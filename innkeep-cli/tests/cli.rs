//! Basic CLI surface: help, version, completions and auto-init.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let env = TestEnv::new();
    env.command_bare()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("calendar"))
        .stdout(predicate::str::contains("reconcile"));
}

#[test]
fn test_version() {
    let env = TestEnv::new();
    env.command_bare()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_completions_bash() {
    let env = TestEnv::new();
    env.command_bare()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("innkeep"));
}

#[test]
fn test_autoinit_creates_database_on_first_use() {
    let env = TestEnv::new();
    assert!(!env.db_path().exists());

    env.command()
        .arg("rooms")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ID\tNAME"));
    assert!(env.db_path().exists());
}

#[test]
fn test_autoinit_seeds_rooms_from_env() {
    let env = TestEnv::new();
    env.command()
        .env("INNKEEP_ROOMS", "General's Quarters, Major's Suite")
        .arg("rooms")
        .assert()
        .success()
        .stdout(predicate::str::contains("1\tGeneral's Quarters"))
        .stdout(predicate::str::contains("2\tMajor's Suite"));
}

#[test]
fn test_init_and_add_room() {
    let env = TestEnv::with_rooms(&["Garden"]);
    env.command()
        .args(["rooms", "--add", "Attic"])
        .assert()
        .success()
        .stdout("2\n");

    let out = env.stdout(&["rooms", "--format", "csv"]);
    assert_eq!(out, "id,name\n1,Garden\n2,Attic\n");
}

#[test]
fn test_init_with_config_writes_template() {
    let env = TestEnv::new();
    env.command()
        .args(["init", "--with-config", "--room", "Garden"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded 1 room(s)"))
        .stdout(predicate::str::contains("Created default configuration file"));
    assert!(env.data_dir.join("config.yaml").exists());
}

#[test]
fn test_init_dry_run_writes_nothing() {
    let env = TestEnv::new();
    env.command()
        .args(["init", "--dry-run", "--room", "Garden"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seed room: Garden"));
    assert!(!env.data_dir.exists());
}

#[test]
fn test_verbose_logs_to_stderr() {
    let env = TestEnv::with_rooms(&["Garden"]);
    env.command()
        .args(["--verbose", "rooms"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}
