//! Seats command implementation.
//!
//! This module implements the `seats` command, which displays the seat
//! inventory in table or JSON form.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::{Args, ValueEnum};
use platea::{Seat, SeatStatus};
use std::io::Write;

/// List seats and their occupancy.
#[derive(Args)]
pub struct SeatsCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,

    /// Only show available seats
    #[arg(long)]
    pub available: bool,

    /// Print occupancy counts instead of the listing
    #[arg(long, conflicts_with = "available")]
    pub summary: bool,
}

/// Output format for listing commands.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
}

impl SeatsCommand {
    /// Execute the seats command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration
        let config = load_configuration(global)?;

        // 2. Open database (read-only access is fine)
        let db = open_database(global, &config)?;

        // 3. Query the inventory, ordered by row then number
        let mut seats = db.list_seats().map_err(CliError::from)?;

        // 4. Apply filters
        if self.available {
            seats.retain(|s| s.status().is_available());
        }

        // 5. Format and output to stdout
        if self.summary {
            format_summary(&seats, self.format)?;
        } else {
            match self.format {
                OutputFormat::Table => format_as_table(&seats)?,
                OutputFormat::Json => format_as_json(&seats)?,
            }
        }

        Ok(())
    }
}

/// Print occupancy counts for the inventory.
fn format_summary(seats: &[Seat], format: OutputFormat) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let total = seats.len();
    let available = seats.iter().filter(|s| s.status().is_available()).count();
    let occupied = total - available;

    match format {
        OutputFormat::Table => {
            writeln!(handle, "TOTAL\tAVAILABLE\tOCCUPIED")?;
            writeln!(handle, "{total}\t{available}\t{occupied}")?;
        }
        OutputFormat::Json => {
            let json_data = serde_json::json!({
                "total": total,
                "available": available,
                "occupied": occupied,
            });
            serde_json::to_writer_pretty(&mut handle, &json_data)
                .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
            writeln!(handle)?;
        }
    }

    Ok(())
}

/// Format seats as a human-readable table.
fn format_as_table(seats: &[Seat]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "LABEL\tTIER\tSTATUS\tBOOKING")?;

    for seat in seats {
        let holder = match seat.status() {
            SeatStatus::Occupied(id) => id.to_string(),
            SeatStatus::Available => "-".to_string(),
        };
        writeln!(
            handle,
            "{}\t{}\t{}\t{}",
            seat.label(),
            seat.tier().as_str(),
            seat.status().as_str(),
            holder,
        )?;
    }

    Ok(())
}

/// Format seats as JSON.
fn format_as_json(seats: &[Seat]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = seats
        .iter()
        .map(|s| {
            serde_json::json!({
                "label": s.label().to_string(),
                "tier": s.tier().as_str(),
                "status": s.status().as_str(),
                "occupied_by": s.status().occupant().map(platea::BookingId::value),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

    writeln!(handle)?;

    Ok(())
}
