//! Bookings command implementation.
//!
//! This module implements the `bookings` command, which displays bookings
//! with an optional lifecycle-state filter.

use crate::commands::seats::OutputFormat;
use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_database, GlobalOptions};
use clap::{Args, ValueEnum};
use platea::{Booking, BookingStatus, SeatLabel};
use std::io::Write;

/// List bookings.
#[derive(Args)]
pub struct BookingsCommand {
    /// Filter by lifecycle state
    #[arg(long, value_enum, ignore_case = true)]
    pub status: Option<StatusFilter>,

    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

/// Booking lifecycle states accepted by `--status`.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Awaiting a decision
    Pending,
    /// Decided positively; seats are held
    Approved,
    /// Decided negatively
    Rejected,
}

impl From<StatusFilter> for BookingStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Pending => BookingStatus::Pending,
            StatusFilter::Approved => BookingStatus::Approved,
            StatusFilter::Rejected => BookingStatus::Rejected,
        }
    }
}

impl BookingsCommand {
    /// Execute the bookings command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration
        let config = load_configuration(global)?;

        // 2. Open database (read-only access is fine)
        let db = open_database(global, &config)?;

        // 3. Query bookings, oldest first
        let bookings = db
            .list_bookings(self.status.map(BookingStatus::from))
            .map_err(CliError::from)?;

        // 4. Format and output to stdout
        match self.format {
            OutputFormat::Table => format_as_table(&bookings)?,
            OutputFormat::Json => format_as_json(&bookings)?,
        }

        Ok(())
    }
}

fn join_labels(labels: &[SeatLabel]) -> String {
    labels
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Format bookings as a human-readable table.
fn format_as_table(bookings: &[Booking]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(
        handle,
        "ID\tSTATUS\tEMAIL\tAMOUNT\tREQUESTED\tRESOLVED\tCREATED\tDECIDED"
    )?;

    for booking in bookings {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            booking.id(),
            booking.status(),
            booking.contact().email(),
            booking.amount(),
            join_labels(booking.requested_seat_labels()),
            booking
                .resolved_seat_labels()
                .map_or_else(|| "-".to_string(), join_labels),
            format_timestamp(booking.created_at()),
            booking
                .decided_at()
                .map_or_else(|| "-".to_string(), format_timestamp),
        )?;
    }

    Ok(())
}

/// Format bookings as JSON.
fn format_as_json(bookings: &[Booking]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = bookings
        .iter()
        .map(|b| {
            serde_json::json!({
                "id": b.id().value(),
                "status": b.status().as_str(),
                "email": b.contact().email(),
                "phone": b.contact().phone(),
                "amount_minor": b.amount().minor(),
                "requested_seats": b.requested_seat_labels(),
                "resolved_seats": b.resolved_seat_labels(),
                "attachment": b.attachment_ref(),
                "notes": b.admin_notes(),
                "created_at": format_timestamp(b.created_at()),
                "decided_at": b.decided_at().map(format_timestamp),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

    writeln!(handle)?;

    Ok(())
}
