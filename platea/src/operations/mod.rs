//! Allocation operations for platea.
//!
//! Every operation follows the same two-phase shape: a plan generator
//! checks preconditions and describes the writes, and the executor applies
//! them with guarded statements. For mutating operations both phases run
//! inside one immediate write transaction, which is what makes a decision
//! atomic: either the booking flips and every seat flips with it, or the
//! transaction rolls back and nothing happened.

pub mod approve;
pub mod executor;
pub mod init;
pub mod intake;
pub mod plan;
pub mod reject;
pub mod release;

#[cfg(test)]
mod proptests;

pub use approve::{approve_booking, ApproveOptions, ApproveOutcome, ApprovePlan};
pub use executor::{ExecutionResult, PlanExecutor};
pub use init::{initialize_inventory, InitResult};
pub use intake::create_pending_booking;
pub use plan::{OperationPlan, PlanAction};
pub use reject::{reject_booking, RejectOptions, RejectPlan};
pub use release::{release_seat, ReleaseOptions, ReleasePlan};
