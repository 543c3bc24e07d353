//! Configuration system for platea.
//!
//! Configuration is merged from three sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via [`ConfigBuilder`] setters)
//! 2. Environment variables (`PLATEA_DATA_DIR`, `PLATEA_BUSY_TIMEOUT`)
//! 3. User config file (`<data-dir>/config.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use platea::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! println!("database at {}", config.database_path().display());
//! ```

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::attachment::DEFAULT_MAX_ATTACHMENT_BYTES;
use crate::error::{Error, Result};

/// Default busy timeout in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    data_dir: PathBuf,
    busy_timeout: Duration,
    max_attachment_bytes: u64,
}

impl Config {
    /// Returns the data directory holding the database and attachments.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the busy timeout applied to database connections.
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        self.busy_timeout
    }

    /// Returns the size cap for a single attachment, in bytes.
    #[must_use]
    pub const fn max_attachment_bytes(&self) -> u64 {
        self.max_attachment_bytes
    }

    /// Returns the path of the database file inside the data directory.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("platea.db")
    }

    /// Returns the directory holding attachment blobs.
    #[must_use]
    pub fn attachments_dir(&self) -> PathBuf {
        self.data_dir.join("attachments")
    }
}

/// Optional settings as they appear in `config.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    busy_timeout_ms: Option<u64>,
    max_attachment_bytes: Option<u64>,
}

/// Builder assembling a [`Config`] from defaults, files, environment, and
/// programmatic overrides.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    busy_timeout: Option<Duration>,
    max_attachment_bytes: Option<u64>,
}

impl ConfigBuilder {
    /// Creates a builder with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Overrides the busy timeout.
    #[must_use]
    pub const fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = Some(timeout);
        self
    }

    /// Overrides the attachment size cap.
    #[must_use]
    pub const fn with_max_attachment_bytes(mut self, bytes: u64) -> Self {
        self.max_attachment_bytes = Some(bytes);
        self
    }

    /// Resolves the final configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory can be determined, or if the
    /// config file exists but cannot be read or parsed.
    pub fn build(self) -> Result<Config> {
        let data_dir = match self.data_dir {
            Some(dir) => dir,
            None => resolve_data_dir()?,
        };

        let file = load_file_config(&data_dir.join("config.yaml"))?;

        let busy_timeout = self
            .busy_timeout
            .or_else(env_busy_timeout)
            .or(file.busy_timeout_ms.map(Duration::from_millis))
            .unwrap_or(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS));

        let max_attachment_bytes = self
            .max_attachment_bytes
            .or(file.max_attachment_bytes)
            .unwrap_or(DEFAULT_MAX_ATTACHMENT_BYTES);

        Ok(Config {
            data_dir,
            busy_timeout,
            max_attachment_bytes,
        })
    }
}

/// Returns the default data directory, `~/.platea`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".platea"))
        .ok_or_else(|| Error::Validation {
            field: "data_dir".into(),
            message: "cannot determine home directory".into(),
        })
}

fn resolve_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = env::var("PLATEA_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    default_data_dir()
}

fn env_busy_timeout() -> Option<Duration> {
    let raw = env::var("PLATEA_BUSY_TIMEOUT").ok()?;
    raw.parse::<u64>().ok().map(Duration::from_millis)
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    if !path.is_file() {
        return Ok(FileConfig::default());
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_apply_without_overrides() {
        env::remove_var("PLATEA_BUSY_TIMEOUT");
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigBuilder::new()
            .with_data_dir(dir.path())
            .build()
            .unwrap();
        assert_eq!(config.data_dir(), dir.path());
        assert_eq!(
            config.busy_timeout(),
            Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS)
        );
        assert_eq!(config.max_attachment_bytes(), DEFAULT_MAX_ATTACHMENT_BYTES);
        assert!(config.database_path().ends_with("platea.db"));
        assert!(config.attachments_dir().ends_with("attachments"));
    }

    #[test]
    #[serial]
    fn file_config_is_read_from_data_dir() {
        env::remove_var("PLATEA_BUSY_TIMEOUT");
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.yaml"),
            "busy_timeout_ms: 250\nmax_attachment_bytes: 1024\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .with_data_dir(dir.path())
            .build()
            .unwrap();
        assert_eq!(config.busy_timeout(), Duration::from_millis(250));
        assert_eq!(config.max_attachment_bytes(), 1024);
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.yaml"), "busy_timeout_ms: 250\n").unwrap();

        env::set_var("PLATEA_BUSY_TIMEOUT", "9000");
        let config = ConfigBuilder::new()
            .with_data_dir(dir.path())
            .build()
            .unwrap();
        env::remove_var("PLATEA_BUSY_TIMEOUT");

        assert_eq!(config.busy_timeout(), Duration::from_millis(9000));
    }

    #[test]
    #[serial]
    fn builder_overrides_everything() {
        env::set_var("PLATEA_BUSY_TIMEOUT", "9000");
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigBuilder::new()
            .with_data_dir(dir.path())
            .with_busy_timeout(Duration::from_millis(42))
            .with_max_attachment_bytes(7)
            .build()
            .unwrap();
        env::remove_var("PLATEA_BUSY_TIMEOUT");

        assert_eq!(config.busy_timeout(), Duration::from_millis(42));
        assert_eq!(config.max_attachment_bytes(), 7);
    }

    #[test]
    #[serial]
    fn env_data_dir_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        env::set_var("PLATEA_DATA_DIR", dir.path());
        let config = ConfigBuilder::new().build().unwrap();
        env::remove_var("PLATEA_DATA_DIR");

        assert_eq!(config.data_dir(), dir.path());
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.yaml"), "busy_timeout_ms: [").unwrap();
        let err = ConfigBuilder::new()
            .with_data_dir(dir.path())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
