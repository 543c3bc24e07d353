//! Attachment command implementation.
//!
//! This module implements the `attachment` command, which looks up a
//! booking's payment proof in the blob store and either prints its path
//! or copies it to a file.

use crate::error::CliError;
use crate::utils::{attachment_store, load_configuration, open_database, GlobalOptions};
use clap::Args;
use platea::{BookingId, Error as LibError};
use std::path::PathBuf;

/// Retrieve a booking's payment proof.
#[derive(Args)]
pub struct AttachmentCommand {
    /// Booking identifier
    #[arg(value_name = "BOOKING_ID")]
    pub booking_id: i64,

    /// Copy the blob to this file instead of printing its path
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl AttachmentCommand {
    /// Execute the attachment command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration
        let config = load_configuration(global)?;

        // 2. Look up the booking
        let db = open_database(global, &config)?;
        let id = BookingId::new(self.booking_id);
        let booking = db
            .get_booking(id)
            .map_err(CliError::from)?
            .ok_or_else(|| {
                CliError::Library(LibError::NotFound {
                    resource: format!("booking {id}"),
                })
            })?;

        // 3. Resolve the blob
        let store = attachment_store(&config)?;
        let reference = booking.attachment_ref();

        match self.output {
            Some(path) => {
                let mut blob = store.open_blob(reference).map_err(CliError::from)?;
                let mut file = std::fs::File::create(&path)?;
                std::io::copy(&mut blob, &mut file)?;

                if !global.quiet {
                    eprintln!("Wrote {reference} to {}", path.display());
                }
            }
            None => {
                if !store.exists(reference) {
                    return Err(CliError::Library(LibError::NotFound {
                        resource: format!("attachment {reference}"),
                    }));
                }
                println!("{}", store.root().join(reference.as_str()).display());
            }
        }

        Ok(())
    }
}
