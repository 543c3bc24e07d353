//! Reject command implementation.
//!
//! This module implements the `reject` command. Rejection is seat-blind:
//! it marks a pending booking rejected and never touches the inventory.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use platea::{reject_booking, BookingId, RejectOptions};

/// Reject a pending booking.
#[derive(Args)]
pub struct RejectCommand {
    /// Booking identifier
    #[arg(value_name = "BOOKING_ID")]
    pub booking_id: i64,

    /// Reviewer notes to record with the decision
    #[arg(long, value_name = "TEXT")]
    pub notes: Option<String>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl RejectCommand {
    /// Execute the reject command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration
        let config = load_configuration(global)?;

        // 2. Open database
        let mut db = open_database(global, &config)?;

        // 3. Build options
        let id = BookingId::new(self.booking_id);
        let mut options = RejectOptions::new(id).with_dry_run(self.dry_run);
        if let Some(notes) = self.notes {
            options = options.with_notes(notes);
        }

        // 4. Reject
        reject_booking(&mut db, &options).map_err(CliError::from)?;

        if !global.quiet {
            if self.dry_run {
                eprintln!("Dry run - booking {id} would be rejected");
            } else {
                eprintln!("Rejected booking {id}");
            }
        }

        Ok(())
    }
}
