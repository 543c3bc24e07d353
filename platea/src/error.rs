//! Error types for the platea library.
//!
//! Every failure mode of the allocation engine is a distinct variant so that
//! callers can decide whether to retry, re-select seats, or surface a
//! user-facing message. Storage internals are never exposed beyond the
//! variant's display summary.

use thiserror::Error;

use crate::booking::{BookingId, BookingStatus};
use crate::seat::SeatLabel;

/// Result type alias for operations that may fail with a platea error.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the platea library.
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced booking, seat, or attachment does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// Description of the missing resource (e.g. "booking 42").
        resource: String,
    },

    /// The operation is not valid for the booking's current lifecycle state.
    ///
    /// Covers double-approve, double-reject, and approve-after-reject: a
    /// booking leaves `pending` exactly once.
    #[error("invalid state: booking {booking} is {current}, expected pending")]
    InvalidState {
        /// The booking whose state blocked the operation.
        booking: BookingId,
        /// The status the booking actually has.
        current: BookingStatus,
    },

    /// One or more requested seat labels have no matching seat.
    #[error("unresolved seats: {}", format_labels(labels))]
    UnresolvedSeats {
        /// The labels that did not resolve, in request order.
        labels: Vec<SeatLabel>,
    },

    /// One or more requested seats exist but are already occupied.
    #[error("seat conflict: {} already occupied", format_labels(labels))]
    SeatConflict {
        /// The occupied labels, in request order.
        labels: Vec<SeatLabel>,
    },

    /// Malformed intake input.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A seat label could not be parsed.
    #[error("invalid seat label '{label}': {reason}")]
    InvalidLabel {
        /// The offending label text.
        label: String,
        /// The reason the label is invalid.
        reason: String,
    },

    /// The underlying storage engine failed; nothing was committed.
    ///
    /// An approval that fails with this variant is safe to retry: the
    /// transaction either commits fully or leaves no trace.
    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    /// An I/O error occurred (attachment store, data directory).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration or scheme file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A stored JSON column could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored data violates an invariant the schema should enforce.
    #[error("data corruption detected: {details}")]
    Corruption {
        /// Details about the corrupt record.
        details: String,
    },

    /// The database schema version does not match this client.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The schema version this client expects.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

fn format_labels(labels: &[SeatLabel]) -> String {
    labels
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Check if the error reports a missing resource.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the error reports an already-occupied seat.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::SeatConflict { .. })
    }

    /// Check if the error reports a booking outside the pending state.
    #[must_use]
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }

    /// Check if the error is a lock wait that exceeded the busy timeout.
    #[must_use]
    pub fn is_lock_timeout(&self) -> bool {
        matches!(
            self,
            Self::Storage(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::DatabaseBusy
        )
    }
}

impl From<crate::seat::InvalidLabelError> for Error {
    fn from(err: crate::seat::InvalidLabelError) -> Self {
        Self::InvalidLabel {
            label: err.label,
            reason: err.reason,
        }
    }
}

impl From<crate::booking::ValidationError> for Error {
    fn from(err: crate::booking::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_state_reports_current_status() {
        let err = Error::InvalidState {
            booking: BookingId::new(7),
            current: BookingStatus::Approved,
        };
        let display = format!("{err}");
        assert!(display.contains("booking 7"));
        assert!(display.contains("approved"));
        assert!(err.is_invalid_state());
    }

    #[test]
    fn unresolved_seats_lists_labels() {
        let labels = vec!["Z9".parse().unwrap(), "Z10".parse().unwrap()];
        let err = Error::UnresolvedSeats { labels };
        let display = format!("{err}");
        assert!(display.contains("Z9"));
        assert!(display.contains("Z10"));
    }

    #[test]
    fn conflict_lists_labels() {
        let err = Error::SeatConflict {
            labels: vec!["A1".parse().unwrap()],
        };
        assert!(err.is_conflict());
        assert!(format!("{err}").contains("A1"));
    }

    #[test]
    fn validation_error_display() {
        let err = Error::Validation {
            field: "email".to_string(),
            message: "missing '@'".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("email"));
        assert!(display.contains("missing '@'"));
    }

    #[test]
    fn not_found_helper() {
        let err = Error::NotFound {
            resource: "booking 42".to_string(),
        };
        assert!(err.is_not_found());
        assert!(format!("{err}").contains("booking 42"));
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
    }
}
