//! Booking intake.
//!
//! Intake records a request and nothing else. Whether the requested seats
//! exist or are free is deliberately not checked here: availability can
//! change while the booking waits for review, so the only check that
//! matters is the one made at decision time.

use chrono::Utc;

use crate::booking::{Booking, BookingRequest};
use crate::database::{bookings, Database};
use crate::error::{Error, Result};

/// Records a new pending booking.
///
/// The request has already been format-validated by
/// [`BookingRequest::new`]; this only persists it and returns the stored
/// record with its assigned identifier.
///
/// # Errors
///
/// Returns a storage error if the insert fails.
pub fn create_pending_booking(db: &mut Database, request: &BookingRequest) -> Result<Booking> {
    let tx = db.begin_transaction()?;

    let id = bookings::insert_booking(&tx, request, Utc::now())?;
    let booking = bookings::get_booking(&tx, id)?.ok_or_else(|| Error::Corruption {
        details: format!("booking {id} vanished between insert and read"),
    })?;

    tx.commit()?;
    log::debug!("recorded pending booking {id}");

    Ok(booking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{Amount, BookingStatus, Contact};
    use crate::database::test_util::create_test_database;
    use crate::seat::SeatLabel;

    fn request(seat_labels: &[&str]) -> BookingRequest {
        let contact = Contact::new("buyer@example.com", "+7 900 1234567").unwrap();
        let amount = Amount::from_minor(5000).unwrap();
        let labels: Vec<SeatLabel> = seat_labels.iter().map(|l| l.parse().unwrap()).collect();
        BookingRequest::new(contact, amount, labels, "0ref-1-0-pdf".parse().unwrap()).unwrap()
    }

    #[test]
    fn intake_records_a_pending_booking() {
        let mut db = create_test_database();
        let booking = create_pending_booking(&mut db, &request(&["A1", "B2"])).unwrap();

        assert_eq!(booking.status(), BookingStatus::Pending);
        assert!(booking.resolved_seat_labels().is_none());
        assert!(booking.decided_at().is_none());
        assert_eq!(booking.contact().email(), "buyer@example.com");
    }

    #[test]
    fn intake_accepts_seats_that_do_not_exist() {
        // Seat resolution belongs to approval, not intake.
        let mut db = create_test_database();
        let booking = create_pending_booking(&mut db, &request(&["Z99"])).unwrap();
        assert_eq!(booking.status(), BookingStatus::Pending);
    }

    #[test]
    fn intake_assigns_increasing_identifiers() {
        let mut db = create_test_database();
        let first = create_pending_booking(&mut db, &request(&["A1"])).unwrap();
        let second = create_pending_booking(&mut db, &request(&["A2"])).unwrap();
        assert!(second.id() > first.id());
    }
}
