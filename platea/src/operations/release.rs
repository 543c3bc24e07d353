//! Administrative seat release.
//!
//! Releasing frees a single occupied seat without touching the booking
//! that held it (refunds and record corrections stay in the booking
//! history). Releasing an already-available seat is idempotent: a warning,
//! not an error.

use rusqlite::Connection;

use crate::database::{seats, Database};
use crate::error::{Error, Result};
use crate::seat::SeatLabel;

use super::executor::{ExecutionResult, PlanExecutor};
use super::plan::{OperationPlan, PlanAction};

/// Options for a release operation.
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    /// The seat to release.
    pub label: SeatLabel,

    /// Validate and report without writing.
    pub dry_run: bool,
}

impl ReleaseOptions {
    /// Creates release options for the given seat.
    #[must_use]
    pub const fn new(label: SeatLabel) -> Self {
        Self {
            label,
            dry_run: false,
        }
    }

    /// Sets the dry-run flag.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// A release plan generator.
pub struct ReleasePlan {
    options: ReleaseOptions,
}

impl ReleasePlan {
    /// Creates a new release plan with the given options.
    #[must_use]
    pub const fn new(options: ReleaseOptions) -> Self {
        Self { options }
    }

    /// Builds an operation plan for this release.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the seat does not exist.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let label = &self.options.label;
        let mut plan = OperationPlan::new(format!("Release seat {label}"));

        let seat = seats::get_seat(conn, label)?.ok_or_else(|| Error::NotFound {
            resource: format!("seat {label}"),
        })?;

        if seat.status().is_available() {
            plan = plan.add_warning(format!("seat {label} is already available"));
        } else {
            plan = plan.add_action(PlanAction::FreeSeat {
                label: label.clone(),
            });
        }

        Ok(plan)
    }
}

/// Frees an occupied seat.
///
/// # Errors
///
/// Returns `NotFound` if the seat does not exist, or a storage error.
pub fn release_seat(db: &mut Database, options: &ReleaseOptions) -> Result<ExecutionResult> {
    let dry_run = options.dry_run;
    let tx = db.begin_transaction()?;

    let plan = ReleasePlan::new(options.clone()).build_plan(&tx)?;
    log::debug!("releasing seat {}", options.label);

    let executor = if dry_run {
        PlanExecutor::new(&tx).dry_run()
    } else {
        PlanExecutor::new(&tx)
    };
    let result = executor.execute(&plan)?;

    if !dry_run {
        tx.commit()?;
    }

    Ok(result)
}
