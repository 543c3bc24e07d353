//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Create or update the seat inventory from a labeling scheme
//! - `submit`: Record a booking request with its payment proof
//! - `approve`: Approve a pending booking, allocating its seats
//! - `reject`: Reject a pending booking
//! - `seats`: List seats and their occupancy
//! - `bookings`: List bookings
//! - `release`: Free an occupied seat
//! - `attachment`: Retrieve a booking's payment proof

pub mod approve;
pub mod attachment;
pub mod bookings;
pub mod init;
pub mod reject;
pub mod release;
pub mod seats;
pub mod submit;

pub use approve::ApproveCommand;
pub use attachment::AttachmentCommand;
pub use bookings::BookingsCommand;
pub use init::InitCommand;
pub use reject::RejectCommand;
pub use release::ReleaseCommand;
pub use seats::SeatsCommand;
pub use submit::SubmitCommand;
