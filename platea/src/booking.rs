//! Booking types: identifiers, contact details, amounts, and lifecycle state.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attachment::AttachmentRef;
use crate::seat::SeatLabel;

/// Error returned when intake input fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the failure.
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Opaque identifier assigned to a booking when it is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(i64);

impl BookingId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated customer contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    email: String,
    phone: String,
}

impl Contact {
    /// Creates a contact after validating the email and phone formats.
    ///
    /// The email must have a non-empty local part, an `@`, and a domain
    /// containing a dot. The phone may start with `+` and must contain
    /// 7 to 15 digits once spaces and dashes are stripped.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending field.
    pub fn new(
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let email: String = email.into();
        let phone: String = phone.into();

        let Some((local, domain)) = email.split_once('@') else {
            return Err(ValidationError::new("email", "missing '@'"));
        };
        if local.is_empty() {
            return Err(ValidationError::new("email", "empty local part"));
        }
        if domain.is_empty() || !domain.contains('.') || domain.starts_with('.') {
            return Err(ValidationError::new("email", "invalid domain"));
        }

        let digits: String = phone.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
        let rest = digits.strip_prefix('+').unwrap_or(&digits);
        if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new("phone", "must contain only digits"));
        }
        if rest.len() < 7 || rest.len() > 15 {
            return Err(ValidationError::new("phone", "must have 7 to 15 digits"));
        }

        Ok(Self { email, phone })
    }

    /// Reconstructs a contact from stored parts without re-validation.
    pub(crate) const fn from_parts(email: String, phone: String) -> Self {
        Self { email, phone }
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the phone number as entered.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// A positive monetary amount in minor units (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Creates an amount from minor units.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the amount is not strictly positive.
    pub fn from_minor(cents: i64) -> Result<Self, ValidationError> {
        if cents <= 0 {
            return Err(ValidationError::new("amount", "must be positive"));
        }
        Ok(Self(cents))
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Lifecycle state of a booking.
///
/// A booking leaves `Pending` at most once, to exactly one of the two
/// terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Recorded, awaiting a decision.
    Pending,
    /// Decided positively; seats are held.
    Approved,
    /// Decided negatively; no seats were ever held.
    Rejected,
}

impl BookingStatus {
    /// Returns the status's lowercase storage form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from its storage form.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated intake payload for a new booking.
///
/// Seat labels are checked for format and duplicates only; whether the
/// seats exist or are free is decided at approval time, not here.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    contact: Contact,
    amount: Amount,
    requested_seat_labels: Vec<SeatLabel>,
    attachment_ref: AttachmentRef,
}

impl BookingRequest {
    /// Creates a request after validating the seat list.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the seat list is empty or contains
    /// the same label twice.
    pub fn new(
        contact: Contact,
        amount: Amount,
        requested_seat_labels: Vec<SeatLabel>,
        attachment_ref: AttachmentRef,
    ) -> Result<Self, ValidationError> {
        if requested_seat_labels.is_empty() {
            return Err(ValidationError::new("seats", "at least one seat required"));
        }
        let mut seen = std::collections::HashSet::new();
        for label in &requested_seat_labels {
            if !seen.insert(label) {
                return Err(ValidationError::new(
                    "seats",
                    format!("duplicate seat label {label}"),
                ));
            }
        }
        Ok(Self {
            contact,
            amount,
            requested_seat_labels,
            attachment_ref,
        })
    }

    /// Returns the contact details.
    #[must_use]
    pub const fn contact(&self) -> &Contact {
        &self.contact
    }

    /// Returns the declared amount.
    #[must_use]
    pub const fn amount(&self) -> Amount {
        self.amount
    }

    /// Returns the requested seat labels in request order.
    #[must_use]
    pub fn requested_seat_labels(&self) -> &[SeatLabel] {
        &self.requested_seat_labels
    }

    /// Returns the payment-proof attachment reference.
    #[must_use]
    pub const fn attachment_ref(&self) -> &AttachmentRef {
        &self.attachment_ref
    }
}

/// A recorded booking.
#[derive(Debug, Clone)]
pub struct Booking {
    id: BookingId,
    contact: Contact,
    amount: Amount,
    requested_seat_labels: Vec<SeatLabel>,
    resolved_seat_labels: Option<Vec<SeatLabel>>,
    attachment_ref: AttachmentRef,
    status: BookingStatus,
    admin_notes: Option<String>,
    created_at: DateTime<Utc>,
    decided_at: Option<DateTime<Utc>>,
}

impl Booking {
    #[allow(clippy::too_many_arguments)]
    pub(crate) const fn from_parts(
        id: BookingId,
        contact: Contact,
        amount: Amount,
        requested_seat_labels: Vec<SeatLabel>,
        resolved_seat_labels: Option<Vec<SeatLabel>>,
        attachment_ref: AttachmentRef,
        status: BookingStatus,
        admin_notes: Option<String>,
        created_at: DateTime<Utc>,
        decided_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            contact,
            amount,
            requested_seat_labels,
            resolved_seat_labels,
            attachment_ref,
            status,
            admin_notes,
            created_at,
            decided_at,
        }
    }

    /// Returns the booking's identifier.
    #[must_use]
    pub const fn id(&self) -> BookingId {
        self.id
    }

    /// Returns the contact details.
    #[must_use]
    pub const fn contact(&self) -> &Contact {
        &self.contact
    }

    /// Returns the declared amount.
    #[must_use]
    pub const fn amount(&self) -> Amount {
        self.amount
    }

    /// Returns the seat labels as requested at intake, in request order.
    #[must_use]
    pub fn requested_seat_labels(&self) -> &[SeatLabel] {
        &self.requested_seat_labels
    }

    /// Returns the seats actually allocated, if the booking was approved.
    #[must_use]
    pub fn resolved_seat_labels(&self) -> Option<&[SeatLabel]> {
        self.resolved_seat_labels.as_deref()
    }

    /// Returns the payment-proof attachment reference.
    #[must_use]
    pub const fn attachment_ref(&self) -> &AttachmentRef {
        &self.attachment_ref
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn status(&self) -> BookingStatus {
        self.status
    }

    /// Returns the reviewer's notes, if any were recorded with the decision.
    #[must_use]
    pub fn admin_notes(&self) -> Option<&str> {
        self.admin_notes.as_deref()
    }

    /// Returns when the booking was recorded.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the booking was decided, if it has been.
    #[must_use]
    pub const fn decided_at(&self) -> Option<DateTime<Utc>> {
        self.decided_at
    }
}
