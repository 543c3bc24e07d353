//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    ApproveCommand, AttachmentCommand, BookingsCommand, InitCommand, RejectCommand,
    ReleaseCommand, SeatsCommand, SubmitCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for managing reviewed seat reservations.
#[derive(Parser)]
#[command(name = "platea")]
#[command(version, about = "Manage reviewed seat reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "PLATEA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in milliseconds)
    #[arg(long, value_name = "MILLIS", global = true, env = "PLATEA_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u64>,

    /// Fail instead of creating a missing database
    #[arg(long, global = true, env = "PLATEA_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create or update the seat inventory from a labeling scheme
    Init(InitCommand),

    /// Record a booking request with its payment proof
    Submit(SubmitCommand),

    /// Approve a pending booking, allocating its seats
    Approve(ApproveCommand),

    /// Reject a pending booking
    Reject(RejectCommand),

    /// List seats and their occupancy
    Seats(SeatsCommand),

    /// List bookings
    Bookings(BookingsCommand),

    /// Free an occupied seat
    Release(ReleaseCommand),

    /// Retrieve a booking's payment proof
    Attachment(AttachmentCommand),
}
