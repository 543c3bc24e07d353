//! Seat queries.
//!
//! The mutation statements here are guarded: they match zero rows unless
//! the seat is in the state the transition requires. Callers check the
//! affected-row count instead of re-reading first, so the check and the
//! write are a single statement.

use std::collections::HashMap;

use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::booking::BookingId;
use crate::error::Result;
use crate::seat::{Seat, SeatLabel, SeatStatus, Tier};

use super::connection::Database;
use super::schema::{FREE_SEAT, INSERT_SEAT_IF_ABSENT, OCCUPY_SEAT, UPDATE_SEAT_STRUCTURAL};

const SELECT_SEAT: &str = "SELECT label, tier, status, occupied_by FROM seats WHERE label = ?";
const LIST_SEATS: &str =
    "SELECT label, tier, status, occupied_by FROM seats ORDER BY row, number";

fn decode_failure(message: String) -> rusqlite::Error {
    rusqlite::Error::ToSqlConversionFailure(message.into())
}

fn decode_seat(row: &rusqlite::Row<'_>) -> rusqlite::Result<Seat> {
    let label_text: String = row.get(0)?;
    let tier_text: String = row.get(1)?;
    let status_text: String = row.get(2)?;
    let occupied_by: Option<i64> = row.get(3)?;

    let label: SeatLabel = label_text
        .parse()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let tier = Tier::parse(&tier_text)
        .ok_or_else(|| decode_failure(format!("unknown tier '{tier_text}'")))?;
    let status = match (status_text.as_str(), occupied_by) {
        ("available", None) => SeatStatus::Available,
        ("occupied", Some(id)) => SeatStatus::Occupied(BookingId::new(id)),
        _ => {
            return Err(decode_failure(format!(
                "inconsistent occupancy for seat {label_text}"
            )))
        }
    };

    Ok(Seat::from_parts(label, tier, status))
}

/// Inserts a seat or rewrites its structural fields (row, number, tier).
///
/// Never touches status or occupant. Returns true if the seat was newly
/// inserted, false if an existing seat was updated. The insert is attempted
/// first and its affected-row count decides the report, so the function
/// holds no read-then-write window even outside a transaction.
///
/// # Errors
///
/// Returns an error if a statement fails.
pub fn upsert_seat_structural(conn: &Connection, seat: &Seat) -> Result<bool> {
    let inserted = conn.execute(
        INSERT_SEAT_IF_ABSENT,
        params![
            seat.label().to_string(),
            seat.label().row(),
            seat.label().number(),
            seat.tier().as_str(),
        ],
    )?;
    if inserted == 1 {
        return Ok(true);
    }

    conn.execute(
        UPDATE_SEAT_STRUCTURAL,
        params![
            seat.label().row(),
            seat.label().number(),
            seat.tier().as_str(),
            seat.label().to_string(),
        ],
    )?;
    Ok(false)
}

/// Looks up a single seat by label.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
pub fn get_seat(conn: &Connection, label: &SeatLabel) -> Result<Option<Seat>> {
    Ok(conn
        .query_row(SELECT_SEAT, [label.to_string()], decode_seat)
        .optional()?)
}

/// Looks up a set of seats by label.
///
/// Returns the seats that exist (in request order) and the labels that
/// matched nothing (also in request order).
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn find_seats_by_labels(
    conn: &Connection,
    labels: &[SeatLabel],
) -> Result<(Vec<Seat>, Vec<SeatLabel>)> {
    if labels.is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }

    let placeholders = vec!["?"; labels.len()].join(", ");
    let sql = format!(
        "SELECT label, tier, status, occupied_by FROM seats WHERE label IN ({placeholders})"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params_from_iter(labels.iter().map(ToString::to_string)),
        decode_seat,
    )?;

    let mut by_label: HashMap<SeatLabel, Seat> = HashMap::new();
    for seat in rows {
        let seat = seat?;
        by_label.insert(seat.label().clone(), seat);
    }

    let mut found = Vec::with_capacity(labels.len());
    let mut missing = Vec::new();
    for label in labels {
        match by_label.remove(label) {
            Some(seat) => found.push(seat),
            None => missing.push(label.clone()),
        }
    }

    Ok((found, missing))
}

/// Lists all seats ordered by row, then number.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_seats(conn: &Connection) -> Result<Vec<Seat>> {
    let mut stmt = conn.prepare(LIST_SEATS)?;
    let rows = stmt.query_map([], decode_seat)?;
    let mut seats = Vec::new();
    for seat in rows {
        seats.push(seat?);
    }
    Ok(seats)
}

/// Marks an available seat as occupied by a booking.
///
/// Returns the number of rows affected: 0 means the seat is missing or
/// already occupied, 1 means the transition happened.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn occupy_seat(conn: &Connection, label: &SeatLabel, booking: BookingId) -> Result<usize> {
    Ok(conn.execute(OCCUPY_SEAT, params![booking.value(), label.to_string()])?)
}

/// Marks an occupied seat as available again.
///
/// Returns the number of rows affected: 0 means the seat is missing or was
/// already available.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn free_seat(conn: &Connection, label: &SeatLabel) -> Result<usize> {
    Ok(conn.execute(FREE_SEAT, [label.to_string()])?)
}

impl Database {
    /// Looks up a single seat by label.
    ///
    /// # Errors
    ///
    /// See [`get_seat`].
    pub fn get_seat(&self, label: &SeatLabel) -> Result<Option<Seat>> {
        get_seat(self.connection(), label)
    }

    /// Lists all seats ordered by row, then number.
    ///
    /// # Errors
    ///
    /// See [`list_seats`].
    pub fn list_seats(&self) -> Result<Vec<Seat>> {
        list_seats(self.connection())
    }
}
