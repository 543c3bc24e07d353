//! Main entry point for the platea CLI.
//!
//! This is the command-line interface for the platea seat reservation
//! system. It provides commands for the full booking lifecycle:
//! - `init`: Create or update the seat inventory from a labeling scheme
//! - `submit`: Record a booking request with its payment proof
//! - `approve`: Approve a pending booking, allocating its seats
//! - `reject`: Reject a pending booking
//! - `seats` / `bookings`: Inspect inventory and booking state
//! - `release`: Free an occupied seat
//! - `attachment`: Retrieve a booking's payment proof

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _logger = platea::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Submit(cmd) => cmd.execute(&global),
        cli::Command::Approve(cmd) => cmd.execute(&global),
        cli::Command::Reject(cmd) => cmd.execute(&global),
        cli::Command::Seats(cmd) => cmd.execute(&global),
        cli::Command::Bookings(cmd) => cmd.execute(&global),
        cli::Command::Release(cmd) => cmd.execute(&global),
        cli::Command::Attachment(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
