//! Reservation types.
//!
//! A reservation records who is staying, in which room, and for which nights.
//! Creating one through [`Reservation::builder`] does not touch storage; the
//! booking transaction persists it together with its room restriction.

use std::fmt;
use std::time::SystemTime;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dates::DateRange;
use crate::room::RoomId;

/// The identifier of a persisted reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Wraps a raw reservation id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for ReservationId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contact details of the person holding a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Guest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number, free-form.
    pub phone: String,
}

impl Guest {
    /// Creates a guest record, trimming surrounding whitespace.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into().trim().to_string(),
            last_name: last_name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            phone: phone.into().trim().to_string(),
        }
    }

    /// Applies the booking form rules.
    ///
    /// First name, last name and email are required, the first name must be
    /// at least three characters, and the email must look like an address.
    /// The booking engine never calls this; it is offered to callers that
    /// accept guest details from users.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::Guest;
    ///
    /// let guest = Guest::new("Ada", "Lovelace", "ada@example.com", "555-0100");
    /// assert!(guest.validate().is_ok());
    ///
    /// let guest = Guest::new("Al", "Turing", "alan@example.com", "");
    /// assert_eq!(guest.validate().unwrap_err().field, "first_name");
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError {
                    field: field.into(),
                    message: "this field cannot be blank".into(),
                });
            }
        }

        if self.first_name.chars().count() < 3 {
            return Err(ValidationError {
                field: "first_name".into(),
                message: "must be at least 3 characters long".into(),
            });
        }

        if !looks_like_email(&self.email) {
            return Err(ValidationError {
                field: "email".into(),
                message: format!("'{}' is not a valid email address", self.email),
            });
        }

        Ok(())
    }
}

lazy_static! {
    // local@host.tld, with a letters-only top-level label
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9-]+(?:\.[A-Z0-9-]+)*\.[A-Z]{2,}$")
            .expect("email pattern compiles");
}

fn looks_like_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Whether staff have handled a reservation yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    /// Not yet reviewed (stored as 0).
    #[default]
    New,
    /// Reviewed by staff (stored as 1).
    Processed,
}

impl ProcessingStatus {
    /// Returns the stored integer code.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::New => 0,
            Self::Processed => 1,
        }
    }

    /// Decodes a stored integer; anything other than 0 counts as processed.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        if code == 0 {
            Self::New
        } else {
            Self::Processed
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Processed => write!(f, "processed"),
        }
    }
}

/// A guest's booking of one room for a range of nights.
///
/// # Examples
///
/// ```
/// use innkeep::{DateRange, Guest, Reservation, RoomId};
///
/// let stay = DateRange::parse("2025-06-01", "2025-06-05").unwrap();
/// let guest = Guest::new("Ada", "Lovelace", "ada@example.com", "555-0100");
/// let reservation = Reservation::builder(guest, RoomId::new(1), stay).build();
///
/// assert!(reservation.id().is_none());
/// assert_eq!(reservation.stay().nights(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: Option<ReservationId>,
    guest: Guest,
    room_id: RoomId,
    stay: DateRange,
    status: ProcessingStatus,
    created_at: SystemTime,
    updated_at: SystemTime,
}

impl Reservation {
    /// Starts building a reservation.
    #[must_use]
    pub fn builder(guest: Guest, room_id: RoomId, stay: DateRange) -> ReservationBuilder {
        ReservationBuilder {
            id: None,
            guest,
            room_id,
            stay,
            status: ProcessingStatus::New,
            created_at: None,
            updated_at: None,
        }
    }

    /// Returns the id, or `None` if the reservation has not been persisted.
    #[must_use]
    pub const fn id(&self) -> Option<ReservationId> {
        self.id
    }

    /// Returns the guest details.
    #[must_use]
    pub const fn guest(&self) -> &Guest {
        &self.guest
    }

    /// Returns the booked room.
    #[must_use]
    pub const fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Returns the booked nights.
    #[must_use]
    pub const fn stay(&self) -> DateRange {
        self.stay
    }

    /// Returns the processing status.
    #[must_use]
    pub const fn status(&self) -> ProcessingStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> SystemTime {
        self.updated_at
    }

    /// Returns a copy carrying the given id.
    #[must_use]
    pub fn with_id(mut self, id: ReservationId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Builder for [`Reservation`].
#[derive(Debug)]
pub struct ReservationBuilder {
    id: Option<ReservationId>,
    guest: Guest,
    room_id: RoomId,
    stay: DateRange,
    status: ProcessingStatus,
    created_at: Option<SystemTime>,
    updated_at: Option<SystemTime>,
}

impl ReservationBuilder {
    /// Sets the id of an already-persisted reservation.
    #[must_use]
    pub const fn id(mut self, id: ReservationId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the processing status.
    #[must_use]
    pub const fn status(mut self, status: ProcessingStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the last update timestamp.
    #[must_use]
    pub const fn updated_at(mut self, updated_at: SystemTime) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Builds the reservation. Missing timestamps default to now.
    #[must_use]
    pub fn build(self) -> Reservation {
        let now = SystemTime::now();
        Reservation {
            id: self.id,
            guest: self.guest,
            room_id: self.room_id,
            stay: self.stay,
            status: self.status,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
