//! Release command implementation.
//!
//! This module implements the `release` command, which frees a single
//! occupied seat without touching the booking that held it. Releasing an
//! already-available seat is idempotent.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use platea::{release_seat, ReleaseOptions, SeatLabel};

/// Free an occupied seat.
#[derive(Args)]
pub struct ReleaseCommand {
    /// Seat label, e.g. A5
    #[arg(value_name = "LABEL")]
    pub label: String,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl ReleaseCommand {
    /// Execute the release command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Parse the seat label
        let label = self
            .label
            .parse::<SeatLabel>()
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        // 2. Load configuration
        let config = load_configuration(global)?;

        // 3. Open database
        let mut db = open_database(global, &config)?;

        // 4. Release
        let options = ReleaseOptions::new(label).with_dry_run(self.dry_run);
        let result = release_seat(&mut db, &options).map_err(CliError::from)?;

        if !global.quiet {
            if self.dry_run {
                eprintln!("Dry run - would perform the following actions:");
                for (i, action) in result.actions_taken.iter().enumerate() {
                    eprintln!("  {}. {action}", i + 1);
                }
            } else if result.actions_taken.is_empty() {
                eprintln!("Seat was already available");
            } else {
                eprintln!("Released seat successfully");
            }

            for warning in &result.warnings {
                eprintln!("Warning: {warning}");
            }
        }

        Ok(())
    }
}
