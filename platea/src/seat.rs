//! Seat types: labels, tiers, and occupancy state.
//!
//! A seat is an individually addressable unit of inventory. Its label is the
//! row letters immediately followed by the seat number (e.g. `"A5"`) and is
//! globally unique. Occupancy is a sum type so that an occupied seat without
//! an occupant (or the reverse) cannot be represented.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::booking::BookingId;

/// Error returned when a seat label fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLabelError {
    /// The offending label text.
    pub label: String,
    /// Why the label is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid seat label '{}': {}", self.label, self.reason)
    }
}

impl std::error::Error for InvalidLabelError {}

/// A unique seat identifier composed of a row and a number.
///
/// The canonical text form concatenates the two: row `"A"`, number `5` is
/// `"A5"`. Rows are one or more ASCII letters, normalized to uppercase;
/// numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatLabel {
    row: String,
    number: u16,
}

impl SeatLabel {
    /// Creates a seat label from a row name and seat number.
    ///
    /// # Errors
    ///
    /// Returns an error if the row is empty, contains non-ASCII-alphabetic
    /// characters, or the number is zero.
    pub fn new(row: impl Into<String>, number: u16) -> Result<Self, InvalidLabelError> {
        let row: String = row.into();
        let text = format!("{row}{number}");

        if row.is_empty() {
            return Err(InvalidLabelError {
                label: text,
                reason: "row must be non-empty".into(),
            });
        }
        if !row.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(InvalidLabelError {
                label: text,
                reason: "row must contain only ASCII letters".into(),
            });
        }
        if number == 0 {
            return Err(InvalidLabelError {
                label: text,
                reason: "seat number must be at least 1".into(),
            });
        }

        Ok(Self {
            row: row.to_ascii_uppercase(),
            number,
        })
    }

    /// Returns the row component (uppercase).
    #[must_use]
    pub fn row(&self) -> &str {
        &self.row
    }

    /// Returns the seat number within the row.
    #[must_use]
    pub const fn number(&self) -> u16 {
        self.number
    }
}

impl fmt::Display for SeatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.number)
    }
}

impl FromStr for SeatLabel {
    type Err = InvalidLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .char_indices()
            .find(|(_, c)| !c.is_ascii_alphabetic())
            .map_or(trimmed.len(), |(i, _)| i);

        let (row, digits) = trimmed.split_at(split);
        if row.is_empty() || digits.is_empty() {
            return Err(InvalidLabelError {
                label: s.to_string(),
                reason: "expected row letters followed by a seat number".into(),
            });
        }

        let number: u16 = digits.parse().map_err(|_| InvalidLabelError {
            label: s.to_string(),
            reason: "seat number must be a positive integer".into(),
        })?;

        Self::new(row, number)
    }
}

impl Serialize for SeatLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SeatLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Seat classification derived from the row at inventory-creation time.
///
/// The row-to-tier mapping lives in the labeling scheme and is fixed once
/// the inventory is created; re-initialization may rewrite it, but it is
/// never derived from anything except the row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Regular seating.
    #[default]
    Standard,
    /// Premium seating.
    Premium,
}

impl Tier {
    /// Returns the tier's lowercase storage form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }

    /// Parses a tier from its storage form.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "standard" => Some(Self::Standard),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occupancy state of a seat.
///
/// The occupant link exists exactly when the seat is occupied; there is no
/// way to construct an occupied seat without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatStatus {
    /// The seat is free.
    Available,
    /// The seat is held by an approved booking.
    Occupied(BookingId),
}

impl SeatStatus {
    /// Whether the seat is free.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }

    /// The booking holding the seat, if any.
    #[must_use]
    pub const fn occupant(self) -> Option<BookingId> {
        match self {
            Self::Available => None,
            Self::Occupied(id) => Some(id),
        }
    }

    /// Returns the status's lowercase storage form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied(_) => "occupied",
        }
    }
}

/// A seat in the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    label: SeatLabel,
    tier: Tier,
    status: SeatStatus,
}

impl Seat {
    /// Creates a new, available seat.
    #[must_use]
    pub const fn new(label: SeatLabel, tier: Tier) -> Self {
        Self {
            label,
            tier,
            status: SeatStatus::Available,
        }
    }

    /// Reconstructs a seat from stored parts.
    pub(crate) const fn from_parts(label: SeatLabel, tier: Tier, status: SeatStatus) -> Self {
        Self {
            label,
            tier,
            status,
        }
    }

    /// Returns the seat's label.
    #[must_use]
    pub const fn label(&self) -> &SeatLabel {
        &self.label
    }

    /// Returns the seat's tier.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// Returns the seat's occupancy state.
    #[must_use]
    pub const fn status(&self) -> SeatStatus {
        self.status
    }
}
