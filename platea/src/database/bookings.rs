//! Booking queries.
//!
//! Status transitions use guarded UPDATEs that only match a pending row,
//! so a booking leaves `pending` exactly once no matter how many writers
//! race on it.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::attachment::AttachmentRef;
use crate::booking::{Amount, Booking, BookingId, BookingRequest, BookingStatus, Contact};
use crate::error::Result;
use crate::seat::SeatLabel;

use super::connection::Database;
use super::schema::{APPROVE_BOOKING, INSERT_BOOKING, REJECT_BOOKING};

const BOOKING_COLUMNS: &str = "id, email, phone, amount_cents, requested_seats, \
     resolved_seats, attachment_ref, status, admin_notes, created_at, decided_at";

fn decode_failure(message: String) -> rusqlite::Error {
    rusqlite::Error::ToSqlConversionFailure(message.into())
}

fn boxed_failure<E: std::error::Error + Send + Sync + 'static>(e: E) -> rusqlite::Error {
    rusqlite::Error::ToSqlConversionFailure(Box::new(e))
}

fn decode_booking(row: &rusqlite::Row<'_>) -> rusqlite::Result<Booking> {
    let id: i64 = row.get(0)?;
    let email: String = row.get(1)?;
    let phone: String = row.get(2)?;
    let amount_cents: i64 = row.get(3)?;
    let requested_text: String = row.get(4)?;
    let resolved_text: Option<String> = row.get(5)?;
    let attachment_text: String = row.get(6)?;
    let status_text: String = row.get(7)?;
    let admin_notes: Option<String> = row.get(8)?;
    let created_secs: i64 = row.get(9)?;
    let decided_secs: Option<i64> = row.get(10)?;

    let amount = Amount::from_minor(amount_cents).map_err(boxed_failure)?;
    let requested: Vec<SeatLabel> =
        serde_json::from_str(&requested_text).map_err(boxed_failure)?;
    let resolved: Option<Vec<SeatLabel>> = match resolved_text {
        Some(text) => Some(serde_json::from_str(&text).map_err(boxed_failure)?),
        None => None,
    };
    let attachment_ref: AttachmentRef = attachment_text
        .parse()
        .map_err(|e: crate::error::Error| decode_failure(e.to_string()))?;
    let status = BookingStatus::parse(&status_text)
        .ok_or_else(|| decode_failure(format!("unknown booking status '{status_text}'")))?;
    let created_at = DateTime::from_timestamp(created_secs, 0)
        .ok_or_else(|| decode_failure(format!("invalid created_at {created_secs}")))?;
    let decided_at = match decided_secs {
        Some(secs) => Some(
            DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| decode_failure(format!("invalid decided_at {secs}")))?,
        ),
        None => None,
    };

    Ok(Booking::from_parts(
        BookingId::new(id),
        Contact::from_parts(email, phone),
        amount,
        requested,
        resolved,
        attachment_ref,
        status,
        admin_notes,
        created_at,
        decided_at,
    ))
}

/// Records a new pending booking and returns its identifier.
///
/// # Errors
///
/// Returns an error if the insert fails or the seat list cannot be
/// encoded.
pub fn insert_booking(
    conn: &Connection,
    request: &BookingRequest,
    created_at: DateTime<Utc>,
) -> Result<BookingId> {
    let requested_json = serde_json::to_string(request.requested_seat_labels())?;
    conn.execute(
        INSERT_BOOKING,
        params![
            request.contact().email(),
            request.contact().phone(),
            request.amount().minor(),
            requested_json,
            request.attachment_ref().as_str(),
            created_at.timestamp(),
        ],
    )?;
    Ok(BookingId::new(conn.last_insert_rowid()))
}

/// Looks up a booking by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
pub fn get_booking(conn: &Connection, id: BookingId) -> Result<Option<Booking>> {
    let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?");
    Ok(conn
        .query_row(&sql, [id.value()], decode_booking)
        .optional()?)
}

/// Lists bookings, optionally filtered by status, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_bookings(conn: &Connection, status: Option<BookingStatus>) -> Result<Vec<Booking>> {
    let mut bookings = Vec::new();
    match status {
        Some(status) => {
            let sql = format!(
                "SELECT {BOOKING_COLUMNS} FROM bookings WHERE status = ? ORDER BY created_at, id"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([status.as_str()], decode_booking)?;
            for booking in rows {
                bookings.push(booking?);
            }
        }
        None => {
            let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at, id");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], decode_booking)?;
            for booking in rows {
                bookings.push(booking?);
            }
        }
    }
    Ok(bookings)
}

/// Transitions a pending booking to approved, recording the allocated
/// seats, optional notes, and the decision time.
///
/// Returns the number of rows affected: 0 means the booking is missing or
/// no longer pending.
///
/// # Errors
///
/// Returns an error if the statement fails or the seat list cannot be
/// encoded.
pub fn mark_approved(
    conn: &Connection,
    id: BookingId,
    resolved: &[SeatLabel],
    notes: Option<&str>,
    decided_at: DateTime<Utc>,
) -> Result<usize> {
    let resolved_json = serde_json::to_string(resolved)?;
    Ok(conn.execute(
        APPROVE_BOOKING,
        params![resolved_json, notes, decided_at.timestamp(), id.value()],
    )?)
}

/// Transitions a pending booking to rejected, recording optional notes and
/// the decision time. Never touches seats.
///
/// Returns the number of rows affected: 0 means the booking is missing or
/// no longer pending.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn mark_rejected(
    conn: &Connection,
    id: BookingId,
    notes: Option<&str>,
    decided_at: DateTime<Utc>,
) -> Result<usize> {
    Ok(conn.execute(
        REJECT_BOOKING,
        params![notes, decided_at.timestamp(), id.value()],
    )?)
}

impl Database {
    /// Looks up a booking by identifier.
    ///
    /// # Errors
    ///
    /// See [`get_booking`].
    pub fn get_booking(&self, id: BookingId) -> Result<Option<Booking>> {
        get_booking(self.connection(), id)
    }

    /// Lists bookings, optionally filtered by status, oldest first.
    ///
    /// # Errors
    ///
    /// See [`list_bookings`].
    pub fn list_bookings(&self, status: Option<BookingStatus>) -> Result<Vec<Booking>> {
        list_bookings(self.connection(), status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;

    fn sample_request(labels: &[&str]) -> BookingRequest {
        let contact = Contact::new("a@example.com", "1234567").unwrap();
        let amount = Amount::from_minor(2500).unwrap();
        let parsed: Vec<SeatLabel> = labels.iter().map(|l| l.parse().unwrap()).collect();
        BookingRequest::new(contact, amount, parsed, "0abc-1-0-png".parse().unwrap()).unwrap()
    }

    #[test]
    fn insert_and_get_roundtrip() {
        let db = create_test_database();
        let conn = db.connection();
        let request = sample_request(&["A1", "B2"]);
        let created = Utc::now();

        let id = insert_booking(conn, &request, created).unwrap();
        let booking = get_booking(conn, id).unwrap().unwrap();

        assert_eq!(booking.id(), id);
        assert_eq!(booking.status(), BookingStatus::Pending);
        assert_eq!(booking.contact().email(), "a@example.com");
        assert_eq!(booking.amount().minor(), 2500);
        assert_eq!(
            booking
                .requested_seat_labels()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            ["A1", "B2"]
        );
        assert!(booking.resolved_seat_labels().is_none());
        assert!(booking.decided_at().is_none());
        assert_eq!(booking.created_at().timestamp(), created.timestamp());
    }

    #[test]
    fn get_missing_booking_is_none() {
        let db = create_test_database();
        assert!(get_booking(db.connection(), BookingId::new(99))
            .unwrap()
            .is_none());
    }

    #[test]
    fn approve_is_guarded() {
        let db = create_test_database();
        let conn = db.connection();
        let id = insert_booking(conn, &sample_request(&["A1"]), Utc::now()).unwrap();
        let resolved: Vec<SeatLabel> = vec!["A1".parse().unwrap()];

        assert_eq!(
            mark_approved(conn, id, &resolved, Some("ok"), Utc::now()).unwrap(),
            1
        );
        // second transition matches nothing
        assert_eq!(
            mark_approved(conn, id, &resolved, None, Utc::now()).unwrap(),
            0
        );
        assert_eq!(mark_rejected(conn, id, None, Utc::now()).unwrap(), 0);

        let booking = get_booking(conn, id).unwrap().unwrap();
        assert_eq!(booking.status(), BookingStatus::Approved);
        assert_eq!(booking.admin_notes(), Some("ok"));
        assert_eq!(booking.resolved_seat_labels().unwrap(), resolved.as_slice());
        assert!(booking.decided_at().is_some());
    }

    #[test]
    fn reject_is_guarded_and_terminal() {
        let db = create_test_database();
        let conn = db.connection();
        let id = insert_booking(conn, &sample_request(&["A1"]), Utc::now()).unwrap();

        assert_eq!(
            mark_rejected(conn, id, Some("illegible proof"), Utc::now()).unwrap(),
            1
        );
        assert_eq!(mark_rejected(conn, id, None, Utc::now()).unwrap(), 0);
        assert_eq!(
            mark_approved(conn, id, &["A1".parse().unwrap()], None, Utc::now()).unwrap(),
            0
        );

        let booking = get_booking(conn, id).unwrap().unwrap();
        assert_eq!(booking.status(), BookingStatus::Rejected);
        assert!(booking.resolved_seat_labels().is_none());
    }

    #[test]
    fn list_filters_by_status() {
        let db = create_test_database();
        let conn = db.connection();
        let first = insert_booking(conn, &sample_request(&["A1"]), Utc::now()).unwrap();
        let second = insert_booking(conn, &sample_request(&["B1"]), Utc::now()).unwrap();
        mark_rejected(conn, second, None, Utc::now()).unwrap();

        let pending = list_bookings(conn, Some(BookingStatus::Pending)).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id(), first);

        let all = list_bookings(conn, None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id(), first);
    }
}
