//! Init command implementation.
//!
//! This module implements the `init` command, which expands a labeling
//! scheme file into the seat inventory. Re-running against a grown scheme
//! adds the new seats; occupancy is never touched.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use platea::{initialize_inventory, LabelingScheme};
use std::path::PathBuf;

/// Create or update the seat inventory from a labeling scheme.
#[derive(Args)]
pub struct InitCommand {
    /// Path to the labeling scheme file (YAML)
    #[arg(value_name = "SCHEME")]
    pub scheme: PathBuf,
}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load and validate the scheme
        let scheme =
            LabelingScheme::load(&self.scheme).map_err(|e| CliError::Config(e.to_string()))?;

        // 2. Load configuration
        let config = load_configuration(global)?;

        // 3. Open database
        let mut db = open_database(global, &config)?;

        // 4. Expand the scheme into the inventory
        let result = initialize_inventory(&mut db, &scheme).map_err(CliError::from)?;

        if !global.quiet {
            eprintln!(
                "Inventory holds {} seat(s): {} inserted, {} updated",
                result.total_seats, result.inserted, result.updated
            );
        }

        Ok(())
    }
}
