//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including an
//! isolated test environment with a temporary data directory and shortcuts
//! for the usual init/submit setup steps.

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// A labeling scheme with a premium row A and a standard row B.
pub const DEFAULT_SCHEME: &str = "\
rows:
  - row: A
    seats: 5
    tier: premium
  - row: B
    seats: 5
";

/// Bytes standing in for a payment proof image.
pub const PROOF_BYTES: &[u8] = b"not really a png, but the store does not care";

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the platea data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("platea-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("platea").expect("Failed to find platea binary");
        cmd.env_remove("PLATEA_DATA_DIR")
            .env_remove("PLATEA_BUSY_TIMEOUT")
            .env_remove("PLATEA_DISABLE_AUTOINIT");
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Write the default labeling scheme to a file and return its path.
    pub fn write_scheme(&self) -> PathBuf {
        let path = self.temp_path.join("hall.yaml");
        std::fs::write(&path, DEFAULT_SCHEME).expect("Failed to write scheme");
        path
    }

    /// Write a payment proof file and return its path.
    pub fn write_proof(&self) -> PathBuf {
        let path = self.temp_path.join("proof.png");
        std::fs::write(&path, PROOF_BYTES).expect("Failed to write proof");
        path
    }

    /// Initialize the inventory from the default scheme.
    pub fn init(&self) {
        let scheme = self.write_scheme();
        self.command().arg("init").arg(scheme).assert().success();
    }

    /// Submit a booking for the given seats and return its id.
    pub fn submit(&self, seats: &str) -> String {
        let proof = self.write_proof();
        let output = self
            .command()
            .arg("submit")
            .arg("--email")
            .arg("buyer@example.com")
            .arg("--phone")
            .arg("+7 900 123-45-67")
            .arg("--amount")
            .arg("150.00")
            .arg("--seats")
            .arg(seats)
            .arg("--attachment")
            .arg(proof)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        String::from_utf8(output)
            .expect("submit output is not UTF-8")
            .trim()
            .to_string()
    }
}
