//! Inventory initialization.
//!
//! Expands a labeling scheme into seat rows. The operation is idempotent:
//! re-running it with the same scheme changes nothing, and re-running it
//! with an updated scheme rewrites structural fields (row, number, tier)
//! while never touching occupancy.

use crate::database::{seats, Database};
use crate::error::Result;
use crate::scheme::LabelingScheme;

/// Result of an inventory initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitResult {
    /// Total seats the scheme describes.
    pub total_seats: usize,
    /// Seats newly created by this run.
    pub inserted: usize,
    /// Seats that already existed and had structural fields rewritten.
    pub updated: usize,
}

/// Creates or refreshes the seat inventory from a labeling scheme.
///
/// All seats are written in one transaction, so a half-initialized
/// inventory is never observable.
///
/// # Errors
///
/// Returns a storage error if any write fails; nothing is committed in
/// that case.
pub fn initialize_inventory(db: &mut Database, scheme: &LabelingScheme) -> Result<InitResult> {
    let seats = scheme.expand();
    let total_seats = seats.len();

    let tx = db.begin_transaction()?;
    let mut inserted = 0;
    for seat in &seats {
        if seats::upsert_seat_structural(&tx, seat)? {
            inserted += 1;
        }
    }
    tx.commit()?;

    let updated = total_seats - inserted;
    log::debug!("inventory initialized: {inserted} inserted, {updated} updated");

    Ok(InitResult {
        total_seats,
        inserted,
        updated,
    })
}
