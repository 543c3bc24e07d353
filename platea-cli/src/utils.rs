//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database and attachment store access,
//! and argument parsing helpers.

use crate::error::CliError;
use chrono::{DateTime, Utc};
use platea::{
    Amount, AttachmentStore, Config, ConfigBuilder, Database, DatabaseConfig, SeatLabel,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in milliseconds).
    pub busy_timeout: Option<u64>,

    /// Fail instead of creating a missing database.
    pub disable_autoinit: bool,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration file in the data directory
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();

    if let Some(ref data_dir) = global.data_dir {
        builder = builder.with_data_dir(data_dir);
    }
    if let Some(millis) = global.busy_timeout {
        builder = builder.with_busy_timeout(Duration::from_millis(millis));
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Open the database described by the configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init
/// is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = config.database_path();

    if !db_path.exists() && global.disable_autoinit {
        return Err(CliError::NoDataDirectory);
    }

    let db_config = DatabaseConfig::new(db_path).with_busy_timeout(config.busy_timeout());

    Database::open(db_config).map_err(CliError::from)
}

/// Open the attachment store next to the database.
pub fn attachment_store(config: &Config) -> Result<AttachmentStore, CliError> {
    AttachmentStore::open(config.attachments_dir(), config.max_attachment_bytes())
        .map_err(CliError::from)
}

/// Parse a comma-separated seat list like `A1,A2,B5`.
pub fn parse_seat_list(raw: &str) -> Result<Vec<SeatLabel>, CliError> {
    let mut labels = Vec::new();
    for part in raw.split(',') {
        let text = part.trim();
        if text.is_empty() {
            continue;
        }
        let label = text
            .parse::<SeatLabel>()
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
        labels.push(label);
    }

    if labels.is_empty() {
        return Err(CliError::InvalidArguments(
            "at least one seat label is required".to_string(),
        ));
    }

    Ok(labels)
}

/// Parse a decimal amount like `150` or `150.00` into minor units.
pub fn parse_amount(raw: &str) -> Result<Amount, CliError> {
    let invalid = || CliError::InvalidArguments(format!("invalid amount '{raw}'"));

    let text = raw.trim();
    let (whole, frac) = match text.split_once('.') {
        Some((w, f)) => (w, f),
        None => (text, ""),
    };

    if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let major: i64 = whole.parse().map_err(|_| invalid())?;
    let cents: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => frac.parse().map_err(|_| invalid())?,
    };

    let minor = major
        .checked_mul(100)
        .and_then(|m| m.checked_add(cents))
        .ok_or_else(invalid)?;

    Amount::from_minor(minor).map_err(|e| CliError::InvalidArguments(e.to_string()))
}

/// Infer the attachment content type from a file extension.
pub fn content_type_for(path: &Path) -> Result<&'static str, CliError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "pdf" => Ok("application/pdf"),
        other => Err(CliError::InvalidArguments(format!(
            "unsupported attachment type '.{other}' (expected png, jpg, or pdf)"
        ))),
    }
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
