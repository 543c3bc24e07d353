//! Approve command implementation.
//!
//! This module implements the `approve` command, which allocates every
//! requested seat to the booking and marks it approved, atomically. On any
//! precondition failure nothing changes and the booking stays pending.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use platea::{approve_booking, ApproveOptions, BookingId};

/// Approve a pending booking, allocating its seats.
#[derive(Args)]
pub struct ApproveCommand {
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

impl ApproveCommand {
    /// Execute the approve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration
        let config = load_configuration(global)?;

        // 2. Open database
        let mut db = open_database(global, &config)?;

        // 3. Build options
        let id = BookingId::new(self.booking_id);
        let mut options = ApproveOptions::new(id).with_dry_run(self.dry_run);
        if let Some(notes) = self.notes {
            options = options.with_notes(notes);
        }

        // 4. Approve (planning and execution share one transaction)
        let outcome = approve_booking(&mut db, &options).map_err(CliError::from)?;

        if self.dry_run {
            if !global.quiet {
                eprintln!("Dry run - booking {id} would be approved with:");
                for label in &outcome.approved_seat_labels {
                    eprintln!("  {label}");
                }
            }
        } else {
            if !global.quiet {
                eprintln!(
                    "Approved booking {id} ({} seat(s))",
                    outcome.approved_seat_labels.len()
                );
            }
            // Print allocated seats to stdout, in request order
            for label in &outcome.approved_seat_labels {
                println!("{label}");
            }
        }

        Ok(())
    }
}
