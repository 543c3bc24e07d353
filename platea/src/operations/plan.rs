//! Plan types for allocation operations.
//!
//! Plans describe what a decision will do without doing it. They are built
//! inside the same write transaction that later executes them, so the state
//! the plan was computed from is the state the commit applies to.

use crate::booking::BookingId;
use crate::seat::SeatLabel;

/// A single action to be taken during plan execution.
///
/// Each action corresponds to one guarded database statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Mark an available seat as held by a booking.
    OccupySeat {
        /// The seat to occupy.
        label: SeatLabel,
        /// The booking taking the seat.
        booking: BookingId,
    },

    /// Transition a pending booking to approved.
    MarkApproved {
        /// The booking being approved.
        booking: BookingId,
        /// The seats allocated to it, in request order.
        resolved: Vec<SeatLabel>,
        /// Reviewer notes to record with the decision.
        notes: Option<String>,
    },

    /// Transition a pending booking to rejected.
    MarkRejected {
        /// The booking being rejected.
        booking: BookingId,
        /// Reviewer notes to record with the decision.
        notes: Option<String>,
    },

    /// Mark an occupied seat as available again.
    FreeSeat {
        /// The seat to release.
        label: SeatLabel,
    },
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::OccupySeat { label, booking } => {
                format!("Occupy seat {label} for booking {booking}")
            }
            Self::MarkApproved {
                booking, resolved, ..
            } => {
                format!("Approve booking {booking} with {} seat(s)", resolved.len())
            }
            Self::MarkRejected { booking, .. } => {
                format!("Reject booking {booking}")
            }
            Self::FreeSeat { label } => {
                format!("Release seat {label}")
            }
        }
    }
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans can be inspected, logged, or executed. They include a description,
/// a sequence of actions, and any warnings for the user.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use platea::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Approve booking 1");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &str) -> SeatLabel {
        text.parse().unwrap()
    }

    #[test]
    fn action_descriptions_name_the_subject() {
        let occupy = PlanAction::OccupySeat {
            label: label("A1"),
            booking: BookingId::new(7),
        };
        assert!(occupy.description().contains("A1"));
        assert!(occupy.description().contains('7'));

        let approve = PlanAction::MarkApproved {
            booking: BookingId::new(7),
            resolved: vec![label("A1"), label("A2")],
            notes: None,
        };
        assert!(approve.description().contains("2 seat(s)"));

        let free = PlanAction::FreeSeat { label: label("B3") };
        assert!(free.description().contains("B3"));
    }

    #[test]
    fn plan_starts_empty() {
        let plan = OperationPlan::new("Test operation");
        assert_eq!(plan.description, "Test operation");
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
    }

    #[test]
    fn plan_accumulates_actions_in_order() {
        let plan = OperationPlan::new("Test")
            .add_action(PlanAction::OccupySeat {
                label: label("A1"),
                booking: BookingId::new(1),
            })
            .add_action(PlanAction::MarkApproved {
                booking: BookingId::new(1),
                resolved: vec![label("A1")],
                notes: None,
            });

        assert_eq!(plan.len(), 2);
        assert!(matches!(plan.actions[0], PlanAction::OccupySeat { .. }));
        assert!(matches!(plan.actions[1], PlanAction::MarkApproved { .. }));
    }

    #[test]
    fn plan_accumulates_warnings() {
        let plan = OperationPlan::new("Test")
            .add_warning("Warning 1")
            .add_warning("Warning 2");

        assert_eq!(plan.warnings, ["Warning 1", "Warning 2"]);
    }
}
