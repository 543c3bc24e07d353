#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # platea
//!
//! A library for managing reviewed seat reservations.
//!
//! Customers submit booking requests for specific seats; an administrator
//! approves or rejects each one. Approval is the only operation that
//! allocates seats, and it is atomic: all requested seats flip to occupied
//! together with the booking, or nothing changes. Two bookings can never
//! end up holding the same seat, even when decisions race from separate
//! processes.
//!
//! ## Core Types
//!
//! - [`SeatLabel`], [`Seat`], and [`Tier`]: the seat inventory
//! - [`Booking`] and [`BookingRequest`]: booking records and intake
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use platea::SeatLabel;
//!
//! let label: SeatLabel = "A5".parse().unwrap();
//! assert_eq!(label.row(), "A");
//! assert_eq!(label.number(), 5);
//! ```

pub mod attachment;
pub mod booking;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod operations;
pub mod scheme;
pub mod seat;

// Re-export key types at crate root for convenience
pub use attachment::{AttachmentRef, AttachmentStore};
pub use booking::{Amount, Booking, BookingId, BookingRequest, BookingStatus, Contact};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    approve_booking, create_pending_booking, initialize_inventory, reject_booking, release_seat,
    ApproveOptions, ApproveOutcome, ExecutionResult, InitResult, OperationPlan, PlanAction,
    PlanExecutor, RejectOptions, ReleaseOptions,
};
pub use scheme::{LabelingScheme, RowSpec};
pub use seat::{Seat, SeatLabel, SeatStatus, Tier};
