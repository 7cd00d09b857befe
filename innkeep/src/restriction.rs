//! Room restrictions: the stored unit of "this room is unavailable".
//!
//! A restriction is either derived from a reservation (it carries the
//! reservation's id and covers the stay) or a manual block placed by staff on
//! a single day.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::DateRange;
use crate::reservation::ReservationId;
use crate::room::RoomId;

/// The identifier of a restriction row.
///
/// For manual blocks this doubles as the block id staff use to remove it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestrictionId(i64);

impl RestrictionId {
    /// Wraps a raw restriction id.
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

impl From<i64> for RestrictionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RestrictionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The category marker stored in `restriction_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestrictionKind {
    /// Created by a booking (code 1).
    Reservation,
    /// Placed manually by staff (code 2).
    Block,
}

impl RestrictionKind {
    /// Returns the stored category code.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Reservation => 1,
            Self::Block => 2,
        }
    }

    /// Decodes a stored category code.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Reservation),
            2 => Some(Self::Block),
            _ => None,
        }
    }
}

impl fmt::Display for RestrictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reservation => write!(f, "reservation"),
            Self::Block => write!(f, "block"),
        }
    }
}

/// A persisted restriction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRestriction {
    /// Row id.
    pub id: RestrictionId,
    /// The restricted room.
    pub room_id: RoomId,
    /// The restricted nights, half-open.
    pub range: DateRange,
    /// The owning reservation, if any.
    pub reservation_id: Option<ReservationId>,
    /// The category marker.
    pub kind: RestrictionKind,
}

impl RoomRestriction {
    /// Returns `true` for manual blocks.
    ///
    /// A restriction without a reservation id is treated as a block
    /// regardless of its category marker.
    #[must_use]
    pub const fn is_block(&self) -> bool {
        self.reservation_id.is_none()
    }
}

/// A restriction that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestriction {
    /// The restricted room.
    pub room_id: RoomId,
    /// The restricted nights, half-open.
    pub range: DateRange,
    /// The owning reservation, if any.
    pub reservation_id: Option<ReservationId>,
    /// The category marker.
    pub kind: RestrictionKind,
}

impl NewRestriction {
    /// The restriction written alongside a reservation.
    #[must_use]
    pub const fn for_reservation(
        reservation_id: ReservationId,
        room_id: RoomId,
        range: DateRange,
    ) -> Self {
        Self {
            room_id,
            range,
            reservation_id: Some(reservation_id),
            kind: RestrictionKind::Reservation,
        }
    }

    /// A one-day manual block `[date, date + 1)`.
    #[must_use]
    pub fn block(room_id: RoomId, date: NaiveDate) -> Self {
        Self {
            room_id,
            range: DateRange::single_day(date),
            reservation_id: None,
            kind: RestrictionKind::Block,
        }
    }

    /// Attaches a row id, producing the persisted form.
    #[must_use]
    pub fn into_restriction(self, id: RestrictionId) -> RoomRestriction {
        RoomRestriction {
            id,
            room_id: self.room_id,
            range: self.range,
            reservation_id: self.reservation_id,
            kind: self.kind,
        }
    }
}

/// Normalizes a stored reservation id: NULL and 0 both mean "no reservation".
pub(crate) fn reservation_ref(raw: Option<i64>) -> Option<ReservationId> {
    raw.filter(|id| *id > 0).map(ReservationId::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, day).unwrap()
    }

    #[test]
    fn test_block_covers_one_night() {
        let block = NewRestriction::block(RoomId::new(2), date(4));
        assert_eq!(block.range, DateRange::new(date(4), date(5)));
        assert_eq!(block.kind, RestrictionKind::Block);
        assert!(block.reservation_id.is_none());
    }

    #[test]
    fn test_for_reservation() {
        let range = DateRange::new(date(1), date(5));
        let new = NewRestriction::for_reservation(ReservationId::new(7), RoomId::new(1), range);
        assert_eq!(new.kind.code(), 1);

        let stored = new.into_restriction(RestrictionId::new(3));
        assert_eq!(stored.id, RestrictionId::new(3));
        assert_eq!(stored.reservation_id, Some(ReservationId::new(7)));
        assert!(!stored.is_block());
    }

    #[test]
    fn test_kind_codes() {
        assert_eq!(RestrictionKind::from_code(1), Some(RestrictionKind::Reservation));
        assert_eq!(RestrictionKind::from_code(2), Some(RestrictionKind::Block));
        assert_eq!(RestrictionKind::from_code(9), None);
    }

    #[test]
    fn test_zero_reservation_id_means_block() {
        assert_eq!(reservation_ref(None), None);
        assert_eq!(reservation_ref(Some(0)), None);
        assert_eq!(reservation_ref(Some(5)), Some(ReservationId::new(5)));
    }
}
