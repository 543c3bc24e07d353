//! Labeling schemes: the declarative description of the seat inventory.
//!
//! A scheme is a YAML document listing rows, how many seats each row has,
//! and the tier its seats belong to:
//!
//! ```yaml
//! rows:
//!   - row: A
//!     seats: 10
//!     tier: premium
//!   - row: B
//!     seats: 12
//! ```
//!
//! Tier defaults to `standard`. Expanding a scheme yields the full seat
//! list deterministically: row order as written, numbers 1..=seats.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::seat::{Seat, SeatLabel, Tier};

/// One row declaration in a labeling scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowSpec {
    /// Row name (ASCII letters, normalized to uppercase on expansion).
    pub row: String,
    /// Number of seats in the row, numbered from 1.
    pub seats: u16,
    /// Tier assigned to every seat in the row.
    #[serde(default)]
    pub tier: Tier,
}

/// A validated seat-inventory description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelingScheme {
    rows: Vec<RowSpec>,
}

impl LabelingScheme {
    /// Creates a scheme from row declarations.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the scheme is empty, a row repeats, a row
    /// name is malformed, or a row declares zero seats.
    pub fn new(rows: Vec<RowSpec>) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::Validation {
                field: "rows".to_string(),
                message: "scheme must declare at least one row".to_string(),
            });
        }

        let mut seen = std::collections::HashSet::new();
        for spec in &rows {
            if spec.seats == 0 {
                return Err(Error::Validation {
                    field: "seats".to_string(),
                    message: format!("row '{}' declares zero seats", spec.row),
                });
            }
            // Runs the same label validation the expansion will.
            let first = SeatLabel::new(spec.row.clone(), 1)?;
            if !seen.insert(first.row().to_string()) {
                return Err(Error::Validation {
                    field: "rows".to_string(),
                    message: format!("row '{}' declared more than once", spec.row),
                });
            }
        }

        Ok(Self { rows })
    }

    /// Loads and validates a scheme from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `Configuration` if the YAML
    /// is malformed, or `Validation` if the scheme content is invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parses and validates a scheme from YAML text.
    ///
    /// # Errors
    ///
    /// See [`LabelingScheme::load`].
    pub fn from_yaml(text: &str) -> Result<Self> {
        let raw: RawScheme = serde_yaml::from_str(text)?;
        Self::new(raw.rows)
    }

    /// Returns the row declarations.
    #[must_use]
    pub fn rows(&self) -> &[RowSpec] {
        &self.rows
    }

    /// Returns the total number of seats the scheme describes.
    #[must_use]
    pub fn total(&self) -> usize {
        self.rows.iter().map(|r| usize::from(r.seats)).sum()
    }

    /// Expands the scheme into the full seat list.
    ///
    /// Seats appear row by row in declaration order, numbered from 1, all
    /// available. Expansion cannot fail once the scheme is constructed.
    #[must_use]
    pub fn expand(&self) -> Vec<Seat> {
        let mut seats = Vec::with_capacity(self.total());
        for spec in &self.rows {
            for number in 1..=spec.seats {
                // Row names were validated in `new`.
                if let Ok(label) = SeatLabel::new(spec.row.clone(), number) {
                    seats.push(Seat::new(label, spec.tier));
                }
            }
        }
        seats
    }
}

#[derive(Deserialize)]
struct RawScheme {
    rows: Vec<RowSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seat::SeatStatus;

    const SAMPLE: &str = "\
rows:
  - row: A
    seats: 3
    tier: premium
  - row: b
    seats: 2
";

    #[test]
    fn parses_yaml_with_default_tier() {
        let scheme = LabelingScheme::from_yaml(SAMPLE).unwrap();
        assert_eq!(scheme.rows().len(), 2);
        assert_eq!(scheme.rows()[0].tier, Tier::Premium);
        assert_eq!(scheme.rows()[1].tier, Tier::Standard);
        assert_eq!(scheme.total(), 5);
    }

    #[test]
    fn expansion_is_deterministic_and_available() {
        let scheme = LabelingScheme::from_yaml(SAMPLE).unwrap();
        let seats = scheme.expand();
        let labels: Vec<String> = seats.iter().map(|s| s.label().to_string()).collect();
        assert_eq!(labels, ["A1", "A2", "A3", "B1", "B2"]);
        assert!(seats.iter().all(|s| s.status() == SeatStatus::Available));
        assert_eq!(seats[0].tier(), Tier::Premium);
        assert_eq!(seats[3].tier(), Tier::Standard);
    }

    #[test]
    fn rejects_empty_scheme() {
        assert!(LabelingScheme::new(vec![]).is_err());
    }

    #[test]
    fn rejects_zero_seat_row() {
        let err = LabelingScheme::from_yaml("rows:\n  - row: A\n    seats: 0\n").unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn rejects_duplicate_rows_case_insensitively() {
        let text = "rows:\n  - row: A\n    seats: 1\n  - row: a\n    seats: 1\n";
        let err = LabelingScheme::from_yaml(text).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn rejects_malformed_row_name() {
        let err = LabelingScheme::from_yaml("rows:\n  - row: \"A1\"\n    seats: 1\n").unwrap_err();
        assert!(matches!(err, Error::InvalidLabel { .. }));
    }

    #[test]
    fn malformed_yaml_is_configuration_error() {
        let err = LabelingScheme::from_yaml("rows: [").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
