//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak the caller's setup into a test.
const ENV_VARS: [&str; 7] = [
    "INNKEEP_DATA_DIR",
    "INNKEEP_STORAGE_TIMEOUT_SECONDS",
    "INNKEEP_DISABLE_AUTOINIT",
    "INNKEEP_ROOMS",
    "INNKEEP_OUTPUT_FORMAT",
    "INNKEEP_ORPHAN_STRATEGY",
    "INNKEEP_LOG_MODE",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the innkeep data directory (not created until first use)
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("innkeep-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// A test environment initialized with the given rooms (ids 1, 2, ...).
    pub fn with_rooms(rooms: &[&str]) -> Self {
        let env = Self::new();
        let mut cmd = env.command();
        cmd.arg("init");
        for room in rooms {
            cmd.arg("--room").arg(room);
        }
        cmd.assert().success();
        env
    }

    /// Get a bare command builder without `--data-dir`.
    ///
    /// The working directory is the temp dir and innkeep variables are
    /// cleared so the caller's environment cannot leak in.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("innkeep").expect("Failed to find innkeep binary");
        cmd.current_dir(&self.temp_path);
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Path of the database file.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("innkeep.db")
    }

    /// Book a room and return the reservation id.
    ///
    /// # Panics
    /// Panics if the book command fails.
    pub fn book(&self, room: i64, start: &str, end: &str, first_name: &str) -> i64 {
        let output = self
            .command()
            .args(["book", "--room", &room.to_string()])
            .args(["--start", start, "--end", end])
            .args(["--first-name", first_name, "--last-name", "Guest"])
            .args(["--email", "guest@example.com"])
            .output()
            .expect("Failed to run book command");

        assert!(
            output.status.success(),
            "Book failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        parse_id(&String::from_utf8_lossy(&output.stdout))
    }

    /// Run a command and return stdout, asserting success.
    pub fn stdout(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run command");
        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an id printed on its own line.
#[allow(dead_code)]
pub fn parse_id(output: &str) -> i64 {
    output.trim().parse().expect("Output is not a valid id")
}
