//! Date range and calendar month types.
//!
//! Stays and restrictions are expressed as half-open date ranges
//! `[start, end)`: a guest checking out on the 5th frees the room for a guest
//! checking in on the 5th. The calendar view, by contrast, walks concrete
//! days and treats the end date as inclusive (see [`DateRange::days_inclusive`]).

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::reservation::ValidationError;

/// The wire format for calendar dates (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date, reporting failures against `field`.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the string is not a valid calendar date.
///
/// # Examples
///
/// ```
/// use innkeep::dates::parse_date;
///
/// let date = parse_date("start", "2025-06-01").unwrap();
/// assert_eq!(date.to_string(), "2025-06-01");
/// assert!(parse_date("start", "06/01/2025").is_err());
/// ```
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| ValidationError {
        field: field.into(),
        message: format!("'{value}' is not a YYYY-MM-DD date: {e}"),
    })
}

/// A half-open range of calendar dates `[start, end)`.
///
/// Construction through [`DateRange::new`] performs no validation; the
/// availability engine evaluates whatever range it is handed. Callers that
/// accept user input should use [`DateRange::checked`] or [`DateRange::parse`].
///
/// # Examples
///
/// ```
/// use innkeep::DateRange;
///
/// let stay = DateRange::parse("2025-06-01", "2025-06-05").unwrap();
/// let next = DateRange::parse("2025-06-05", "2025-06-06").unwrap();
///
/// assert_eq!(stay.nights(), 4);
/// assert!(!stay.overlaps(&next));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range without validating it.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Creates a range, requiring `start < end`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for zero-length or inverted ranges.
    pub fn checked(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError {
                field: "end".into(),
                message: format!("end date {end} must be after start date {start}"),
            });
        }
        Ok(Self { start, end })
    }

    /// Parses and validates a range from two `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if either date is malformed or the
    /// range is empty or inverted.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start = parse_date("start", start)?;
        let end = parse_date("end", end)?;
        Self::checked(start, end)
    }

    /// Returns the one-day range `[date, date + 1)` used for manual blocks.
    ///
    /// At [`NaiveDate::MAX`] there is no following day and the range is
    /// empty; [`DateRange::checked_single_day`] rejects that case instead.
    #[must_use]
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date.succ_opt().unwrap_or(date),
        }
    }

    /// Like [`DateRange::single_day`], but fails on the last representable day.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `date` has no following day.
    pub fn checked_single_day(date: NaiveDate) -> Result<Self, ValidationError> {
        let end = date.succ_opt().ok_or_else(|| ValidationError {
            field: "date".into(),
            message: format!("{date} is the last supported date"),
        })?;
        Ok(Self { start: date, end })
    }

    /// Returns the first day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the exclusive end of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns `true` if the range covers no nights (`start >= end`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns the number of nights in the range, or 0 if it is empty.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days().max(0)
    }

    /// The half-open overlap test: `self.start < other.end && self.end > other.start`.
    ///
    /// Touching ranges do not overlap. The test is applied literally, so an
    /// inverted range can still report an overlap.
    #[must_use]
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Returns `true` if `date` falls in `[start, end)`.
    #[must_use]
    pub fn contains_day(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Iterates every day from `start` through `end`, both inclusive.
    pub fn days_inclusive(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), |d| d.succ_opt()).take_while(move |d| *d <= end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// A calendar month, used to drive the staff calendar.
///
/// # Examples
///
/// ```
/// use innkeep::Month;
///
/// let july = Month::parse("2025-07").unwrap();
/// assert_eq!(july.first_day().to_string(), "2025-07-01");
/// assert_eq!(july.last_day().to_string(), "2025-07-31");
/// assert_eq!(july.next().to_string(), "2025-08");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Creates a month.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `month` is not in `1..=12` or the
    /// year is outside chrono's supported range.
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(ValidationError {
                field: "month".into(),
                message: format!("{year}-{month:02} is not a valid month"),
            });
        }
        Ok(Self { year, month })
    }

    /// Parses a `YYYY-MM` string.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the string is malformed.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError {
            field: "month".into(),
            message: format!("'{value}' is not a YYYY-MM month"),
        };
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }

    /// Returns the month containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month number (1-12).
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Returns the first day of the month.
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        // Validated on construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Returns the last day of the month.
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        let next = self.next();
        NaiveDate::from_ymd_opt(next.year, next.month, 1)
            .and_then(|day| day.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Returns the following month.
    #[must_use]
    pub const fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Returns the preceding month.
    #[must_use]
    pub const fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod proptests;
