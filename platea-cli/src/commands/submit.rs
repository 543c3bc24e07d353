//! Submit command implementation.
//!
//! This module implements the `submit` command, which stores the payment
//! proof and records a pending booking. Intake never allocates seats; the
//! requested labels are checked for format and duplicates only.

use crate::error::CliError;
use crate::utils::{
    attachment_store, content_type_for, load_configuration, open_database, parse_amount,
    parse_seat_list, GlobalOptions,
};
use clap::Args;
use platea::{create_pending_booking, BookingRequest, Contact};
use std::path::PathBuf;

/// Record a booking request with its payment proof.
#[derive(Args)]
pub struct SubmitCommand {
    /// Contact email address
    #[arg(long, value_name = "EMAIL")]
    pub email: String,

    /// Contact phone number
    #[arg(long, value_name = "PHONE")]
    pub phone: String,

    /// Declared payment amount, e.g. 150 or 150.00
    #[arg(long, value_name = "AMOUNT")]
    pub amount: String,

    /// Comma-separated seat labels, e.g. A1,A2
    #[arg(long, value_name = "LABELS")]
    pub seats: String,

    /// Path to the payment proof file (png, jpg, or pdf)
    #[arg(long, value_name = "FILE")]
    pub attachment: PathBuf,
}

impl SubmitCommand {
    /// Execute the submit command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Validate intake fields before touching storage
        let contact = Contact::new(&self.email, &self.phone)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
        let amount = parse_amount(&self.amount)?;
        let labels = parse_seat_list(&self.seats)?;
        let content_type = content_type_for(&self.attachment)?;

        // 2. Load configuration
        let config = load_configuration(global)?;

        // 3. Store the payment proof
        let bytes = std::fs::read(&self.attachment)?;
        let store = attachment_store(&config)?;
        let reference = store
            .store(&bytes, content_type)
            .map_err(CliError::from)?;

        // 4. Record the pending booking
        let request = BookingRequest::new(contact, amount, labels, reference)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let mut db = open_database(global, &config)?;
        let booking = create_pending_booking(&mut db, &request).map_err(CliError::from)?;

        if !global.quiet {
            eprintln!("Recorded booking {} (pending review)", booking.id());
        }

        // Print the id to stdout for scripting
        println!("{}", booking.id());

        Ok(())
    }
}
