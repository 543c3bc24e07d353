//! Plan execution engine.
//!
//! The executor applies a plan's guarded statements to the caller's
//! transaction. Every statement re-asserts its precondition in its WHERE
//! clause, so a stale plan fails cleanly instead of corrupting state. Any
//! error leaves the transaction to roll back as a whole.

use chrono::Utc;
use rusqlite::Connection;

use crate::database::{bookings, seats};
use crate::error::{Error, Result};
use crate::seat::SeatLabel;

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// Seats allocated by an approval in this plan, in request order.
    pub approved_seats: Vec<SeatLabel>,
}

impl ExecutionResult {
    fn from_plan(plan: &OperationPlan, dry_run: bool) -> Self {
        Self {
            success: true,
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            approved_seats: approved_seats_from_plan(plan),
        }
    }
}

fn approved_seats_from_plan(plan: &OperationPlan) -> Vec<SeatLabel> {
    for action in &plan.actions {
        if let PlanAction::MarkApproved { resolved, .. } = action {
            return resolved.clone();
        }
    }
    Vec::new()
}

/// Executes operation plans against a connection.
///
/// Callers pass the transaction the plan was built in; a rusqlite
/// `Transaction` dereferences to `Connection`. In dry-run mode the plan is
/// reported but nothing is written.
pub struct PlanExecutor<'a> {
    conn: &'a Connection,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor over the given connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            dry_run: false,
        }
    }

    /// Sets the executor to dry-run mode.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// # Errors
    ///
    /// Returns an error if any action fails to execute; the caller's
    /// transaction should then be dropped so the whole operation rolls
    /// back.
    pub fn execute(&self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            return Ok(ExecutionResult::from_plan(plan, true));
        }

        for action in &plan.actions {
            self.execute_action(action)?;
        }

        Ok(ExecutionResult::from_plan(plan, false))
    }

    fn execute_action(&self, action: &PlanAction) -> Result<()> {
        match action {
            PlanAction::OccupySeat { label, booking } => {
                let affected = seats::occupy_seat(self.conn, label, *booking)?;
                if affected == 0 {
                    // Distinguish a vanished seat from a lost race.
                    return match seats::get_seat(self.conn, label)? {
                        None => Err(Error::UnresolvedSeats {
                            labels: vec![label.clone()],
                        }),
                        Some(_) => Err(Error::SeatConflict {
                            labels: vec![label.clone()],
                        }),
                    };
                }
                Ok(())
            }
            PlanAction::MarkApproved {
                booking,
                resolved,
                notes,
            } => {
                let affected = bookings::mark_approved(
                    self.conn,
                    *booking,
                    resolved,
                    notes.as_deref(),
                    Utc::now(),
                )?;
                if affected == 0 {
                    return Err(self.booking_transition_failure(*booking)?);
                }
                Ok(())
            }
            PlanAction::MarkRejected { booking, notes } => {
                let affected =
                    bookings::mark_rejected(self.conn, *booking, notes.as_deref(), Utc::now())?;
                if affected == 0 {
                    return Err(self.booking_transition_failure(*booking)?);
                }
                Ok(())
            }
            PlanAction::FreeSeat { label } => {
                let affected = seats::free_seat(self.conn, label)?;
                if affected == 0 && seats::get_seat(self.conn, label)?.is_none() {
                    return Err(Error::NotFound {
                        resource: format!("seat {label}"),
                    });
                }
                Ok(())
            }
        }
    }

    /// Diagnoses why a guarded booking transition matched no rows.
    fn booking_transition_failure(&self, booking: crate::booking::BookingId) -> Result<Error> {
        match bookings::get_booking(self.conn, booking)? {
            None => Ok(Error::NotFound {
                resource: format!("booking {booking}"),
            }),
            Some(record) => Ok(Error::InvalidState {
                booking,
                current: record.status(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{Amount, BookingId, BookingRequest, BookingStatus, Contact};
    use crate::database::test_util::create_test_database;
    use crate::seat::{Seat, SeatStatus, Tier};

    fn label(text: &str) -> SeatLabel {
        text.parse().unwrap()
    }

    fn insert_pending(conn: &Connection, seat_labels: &[&str]) -> BookingId {
        let contact = Contact::new("a@b.com", "1234567").unwrap();
        let amount = Amount::from_minor(100).unwrap();
        let labels: Vec<SeatLabel> = seat_labels.iter().map(|l| l.parse().unwrap()).collect();
        let request =
            BookingRequest::new(contact, amount, labels, "0ref-1-0-png".parse().unwrap()).unwrap();
        bookings::insert_booking(conn, &request, Utc::now()).unwrap()
    }

    fn insert_seat(conn: &Connection, text: &str) {
        seats::upsert_seat_structural(conn, &Seat::new(label(text), Tier::Standard)).unwrap();
    }

    #[test]
    fn executes_occupy_and_approve() {
        let db = create_test_database();
        let conn = db.connection();
        insert_seat(conn, "A1");
        let id = insert_pending(conn, &["A1"]);

        let plan = OperationPlan::new("Test")
            .add_action(PlanAction::OccupySeat {
                label: label("A1"),
                booking: id,
            })
            .add_action(PlanAction::MarkApproved {
                booking: id,
                resolved: vec![label("A1")],
                notes: Some("ok".into()),
            });

        let result = PlanExecutor::new(conn).execute(&plan).unwrap();
        assert!(result.success);
        assert!(!result.dry_run);
        assert_eq!(result.approved_seats, vec![label("A1")]);

        let seat = seats::get_seat(conn, &label("A1")).unwrap().unwrap();
        assert_eq!(seat.status(), SeatStatus::Occupied(id));
        let booking = bookings::get_booking(conn, id).unwrap().unwrap();
        assert_eq!(booking.status(), BookingStatus::Approved);
    }

    #[test]
    fn occupy_of_missing_seat_is_unresolved() {
        let db = create_test_database();
        let conn = db.connection();
        let id = insert_pending(conn, &["Z9"]);

        let plan = OperationPlan::new("Test").add_action(PlanAction::OccupySeat {
            label: label("Z9"),
            booking: id,
        });
        let err = PlanExecutor::new(conn).execute(&plan).unwrap_err();
        assert!(matches!(err, Error::UnresolvedSeats { .. }));
    }

    #[test]
    fn occupy_of_taken_seat_is_conflict() {
        let db = create_test_database();
        let conn = db.connection();
        insert_seat(conn, "A1");
        let holder = insert_pending(conn, &["A1"]);
        let loser = insert_pending(conn, &["A1"]);
        seats::occupy_seat(conn, &label("A1"), holder).unwrap();

        let plan = OperationPlan::new("Test").add_action(PlanAction::OccupySeat {
            label: label("A1"),
            booking: loser,
        });
        let err = PlanExecutor::new(conn).execute(&plan).unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn approve_of_decided_booking_reports_current_state() {
        let db = create_test_database();
        let conn = db.connection();
        let id = insert_pending(conn, &["A1"]);
        bookings::mark_rejected(conn, id, None, Utc::now()).unwrap();

        let plan = OperationPlan::new("Test").add_action(PlanAction::MarkApproved {
            booking: id,
            resolved: vec![label("A1")],
            notes: None,
        });
        let err = PlanExecutor::new(conn).execute(&plan).unwrap_err();
        match err {
            Error::InvalidState { booking, current } => {
                assert_eq!(booking, id);
                assert_eq!(current, BookingStatus::Rejected);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn dry_run_writes_nothing() {
        let db = create_test_database();
        let conn = db.connection();
        insert_seat(conn, "A1");
        let id = insert_pending(conn, &["A1"]);

        let plan = OperationPlan::new("Test")
            .add_action(PlanAction::OccupySeat {
                label: label("A1"),
                booking: id,
            })
            .add_action(PlanAction::MarkApproved {
                booking: id,
                resolved: vec![label("A1")],
                notes: None,
            });

        let result = PlanExecutor::new(conn).dry_run().execute(&plan).unwrap();
        assert!(result.dry_run);
        assert_eq!(result.actions_taken.len(), 2);
        assert_eq!(result.approved_seats, vec![label("A1")]);

        let seat = seats::get_seat(conn, &label("A1")).unwrap().unwrap();
        assert!(seat.status().is_available());
        let booking = bookings::get_booking(conn, id).unwrap().unwrap();
        assert_eq!(booking.status(), BookingStatus::Pending);
    }

    #[test]
    fn free_seat_of_missing_seat_is_not_found() {
        let db = create_test_database();
        let plan =
            OperationPlan::new("Test").add_action(PlanAction::FreeSeat { label: label("Z1") });
        let err = PlanExecutor::new(db.connection())
            .execute(&plan)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn result_carries_plan_warnings() {
        let db = create_test_database();
        let plan = OperationPlan::new("Test").add_warning("already available");
        let result = PlanExecutor::new(db.connection()).execute(&plan).unwrap();
        assert_eq!(result.warnings, ["already available"]);
    }
}
