//! Approve operation planning and execution.
//!
//! Approval is the only path that allocates seats. All four preconditions
//! are checked, the plan built, and the guarded writes applied inside a
//! single immediate write transaction, so no other writer can take a seat
//! between the availability check and the occupation.

use rusqlite::Connection;

use crate::booking::{Booking, BookingId, BookingStatus};
use crate::database::{bookings, seats, Database};
use crate::error::{Error, Result};
use crate::seat::SeatLabel;

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};

/// Options for an approve operation.
#[derive(Debug, Clone)]
pub struct ApproveOptions {
    /// The booking to approve.
    pub booking_id: BookingId,

    /// Reviewer notes to record with the decision.
    pub notes: Option<String>,

    /// Validate and report without writing.
    pub dry_run: bool,
}

impl ApproveOptions {
    /// Creates approve options for the given booking.
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

/// An approve plan generator.
pub struct ApprovePlan {
    options: ApproveOptions,
}

impl ApprovePlan {
    /// Creates a new approve plan with the given options.
    #[must_use]
    pub const fn new(options: ApproveOptions) -> Self {
        Self { options }
    }

    /// Builds an operation plan for this approval.
    ///
    /// Checks the preconditions in a fixed order so callers always see the
    /// most fundamental failure first:
    ///
    /// 1. the booking exists
    /// 2. the booking is still pending
    /// 3. every requested label resolves to a seat
    /// 4. every resolved seat is available
    ///
    /// Does NOT modify the database. Build the plan on the transaction that
    /// will execute it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InvalidState`, `UnresolvedSeats`, or
    /// `SeatConflict` when the corresponding precondition fails.
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

        let (found, missing) = seats::find_seats_by_labels(conn, booking.requested_seat_labels())?;
        if !missing.is_empty() {
            return Err(Error::UnresolvedSeats { labels: missing });
        }

        let conflicts: Vec<SeatLabel> = found
            .iter()
            .filter(|seat| !seat.status().is_available())
            .map(|seat| seat.label().clone())
            .collect();
        if !conflicts.is_empty() {
            return Err(Error::SeatConflict { labels: conflicts });
        }

        let resolved: Vec<SeatLabel> = found.iter().map(|seat| seat.label().clone()).collect();
        let mut plan = OperationPlan::new(format!("Approve booking {id}"));
        for label in &resolved {
            plan = plan.add_action(PlanAction::OccupySeat {
                label: label.clone(),
                booking: id,
            });
        }
        plan = plan.add_action(PlanAction::MarkApproved {
            booking: id,
            resolved,
            notes: self.options.notes.clone(),
        });

        Ok(plan)
    }
}

/// Outcome of a successful approval.
#[derive(Debug)]
pub struct ApproveOutcome {
    /// The booking as recorded after the decision (or as it stands, in a
    /// dry run).
    pub booking: Booking,

    /// The seats allocated, in request order.
    pub approved_seat_labels: Vec<SeatLabel>,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

/// Approves a pending booking, occupying every requested seat.
///
/// The whole decision is one transaction: either the booking becomes
/// approved and every seat becomes occupied, or nothing changes.
///
/// # Errors
///
/// Returns `NotFound`, `InvalidState`, `UnresolvedSeats`, `SeatConflict`,
/// or a storage error. On any error no change is committed, and the
/// operation is safe to retry.
pub fn approve_booking(db: &mut Database, options: &ApproveOptions) -> Result<ApproveOutcome> {
    let dry_run = options.dry_run;
    let tx = db.begin_transaction()?;

    let plan = ApprovePlan::new(options.clone()).build_plan(&tx)?;
    log::debug!(
        "approving booking {}: {} action(s)",
        options.booking_id,
        plan.len()
    );

    let executor = if dry_run {
        PlanExecutor::new(&tx).dry_run()
    } else {
        PlanExecutor::new(&tx)
    };
    let result = executor.execute(&plan)?;

    let booking =
        bookings::get_booking(&tx, options.booking_id)?.ok_or_else(|| Error::NotFound {
            resource: format!("booking {}", options.booking_id),
        })?;

    if !dry_run {
        tx.commit()?;
    }

    Ok(ApproveOutcome {
        booking,
        approved_seat_labels: result.approved_seats,
        dry_run,
    })
}
