//! Reject operation planning and execution.
//!
//! Rejection is deliberately seat-blind: a pending booking has never held
//! any seat, so declining it only flips the booking record. In particular
//! it never frees seats other bookings hold.

use rusqlite::Connection;

use crate::booking::{Booking, BookingId, BookingStatus};
use crate::database::{bookings, Database};
use crate::error::{Error, Result};

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};

/// Options for a reject operation.
#[derive(Debug, Clone)]
pub struct RejectOptions {
    /// The booking to reject.
    pub booking_id: BookingId,

    /// Reviewer notes to record with the decision.
    pub notes: Option<String>,

    /// Validate and report without writing.
    pub dry_run: bool,
}

impl RejectOptions {
    /// Creates reject options for the given booking.
    #[must_use]
    pub const fn new(booking_id: BookingId) -> Self {
        Self {
            booking_id,
            notes: None,
            dry_run: false,
        }
    }

    /// Sets the reviewer notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the dry-run flag.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// A reject plan generator.
pub struct RejectPlan {
    options: RejectOptions,
}

impl RejectPlan {
    /// Creates a new reject plan with the given options.
    #[must_use]
    pub const fn new(options: RejectOptions) -> Self {
        Self { options }
    }

    /// Builds an operation plan for this rejection.
    ///
    /// The booking must exist and still be pending. No seat is inspected
    /// or touched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the booking does not exist, `InvalidState` if
    /// it has already been decided.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let id = self.options.booking_id;

        let booking = bookings::get_booking(conn, id)?.ok_or_else(|| Error::NotFound {
            resource: format!("booking {id}"),
        })?;

        if booking.status() != BookingStatus::Pending {
            return Err(Error::InvalidState {
                booking: id,
                current: booking.status(),
            });
        }

        Ok(
            OperationPlan::new(format!("Reject booking {id}")).add_action(
                PlanAction::MarkRejected {
                    booking: id,
                    notes: self.options.notes.clone(),
                },
            ),
        )
    }
}

/// Rejects a pending booking.
///
/// # Errors
///
/// Returns `NotFound` if the booking does not exist, `InvalidState` if it
/// has already been decided, or a storage error.
pub fn reject_booking(db: &mut Database, options: &RejectOptions) -> Result<Booking> {
    let dry_run = options.dry_run;
    let tx = db.begin_transaction()?;

    let plan = RejectPlan::new(options.clone()).build_plan(&tx)?;
    log::debug!("rejecting booking {}", options.booking_id);

    let executor = if dry_run {
        PlanExecutor::new(&tx).dry_run()
    } else {
        PlanExecutor::new(&tx)
    };
    executor.execute(&plan)?;

    let booking =
        bookings::get_booking(&tx, options.booking_id)?.ok_or_else(|| Error::NotFound {
            resource: format!("booking {}", options.booking_id),
        })?;

    if !dry_run {
        tx.commit()?;
    }

    Ok(booking)
}
