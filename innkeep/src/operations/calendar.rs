//! Per-room, per-day calendar projection for the staff view.
//!
//! Unlike the availability test, the projection walks concrete days: a
//! reservation marks every day from its start through its end date
//! inclusive, and a block marks only its start day. When two restrictions
//! land on the same day the one processed later wins.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::dates::{DateRange, Month};
use crate::error::Result;
use crate::reservation::ReservationId;
use crate::restriction::RestrictionId;
use crate::room::RoomId;
use crate::store::{RestrictionStore, RoomStore};

/// The state of one room on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "id", rename_all = "lowercase")]
pub enum DayState {
    /// Nothing restricts the day.
    Free,
    /// Covered by a reservation.
    Reserved(ReservationId),
    /// Blocked by staff; the id addresses the block for removal.
    Blocked(RestrictionId),
}

/// The day map for one room over one date window.
///
/// Callers may serialize it with [`MonthProjection::to_json`] and keep it for
/// the following request, when staff submit edits against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthProjection {
    /// The projected room.
    pub room_id: RoomId,
    /// First day in the map.
    pub first_day: NaiveDate,
    /// Last day in the map, inclusive.
    pub last_day: NaiveDate,
    /// Every day in `first_day..=last_day`.
    pub days: BTreeMap<NaiveDate, DayState>,
}

impl MonthProjection {
    /// Returns the state of `date`, or `None` outside the window.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<DayState> {
        self.days.get(&date).copied()
    }

    /// Returns `true` if `date` is inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    /// Blocked days and their block ids.
    #[must_use]
    pub fn blocks(&self) -> BTreeMap<NaiveDate, RestrictionId> {
        self.days
            .iter()
            .filter_map(|(day, state)| match state {
                DayState::Blocked(id) => Some((*day, *id)),
                _ => None,
            })
            .collect()
    }

    /// Reserved days and the reservation covering each.
    #[must_use]
    pub fn reserved_days(&self) -> BTreeMap<NaiveDate, ReservationId> {
        self.days
            .iter()
            .filter_map(|(day, state)| match state {
                DayState::Reserved(id) => Some((*day, *id)),
                _ => None,
            })
            .collect()
    }

    /// Encodes the projection for a session or cache.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a projection produced by [`MonthProjection::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] if the input is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Builds [`MonthProjection`]s from the restriction store.
///
/// # Examples
///
/// ```
/// use innkeep::operations::{BookingTransaction, CalendarProjector, DayState};
/// use innkeep::store::MemoryStore;
/// use innkeep::{Month, RoomId};
/// use chrono::NaiveDate;
///
/// let mut store = MemoryStore::with_rooms(["Garden", "Attic"]);
/// let july_4 = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
/// let block = BookingTransaction::new(&mut store)
///     .insert_block(RoomId::new(2), july_4)
///     .unwrap();
///
/// let july = Month::new(2025, 7).unwrap();
/// let view = CalendarProjector::new(&store).project(RoomId::new(2), july).unwrap();
/// assert_eq!(view.get(july_4), Some(DayState::Blocked(block)));
/// assert_eq!(view.blocks().len(), 1);
/// ```
#[derive(Debug)]
pub struct CalendarProjector<'a, S> {
    store: &'a S,
}

impl<'a, S> CalendarProjector<'a, S>
where
    S: RoomStore + RestrictionStore,
{
    /// Creates a projector reading from `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Projects `room_id` over `month_start..=month_end`.
    ///
    /// Every day in the window starts as [`DayState::Free`]; restrictions are
    /// then applied in store order. Marks falling outside the window are
    /// dropped. An inverted window yields an empty map.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the read fails.
    pub fn project_month(
        &self,
        room_id: RoomId,
        month_start: NaiveDate,
        month_end: NaiveDate,
    ) -> Result<MonthProjection> {
        let mut days: BTreeMap<NaiveDate, DayState> =
            DateRange::new(month_start, month_end)
                .days_inclusive()
                .map(|day| (day, DayState::Free))
                .collect();

        // Widened by a day on each side: stays ending on month_start still
        // mark it, and month_end is the window's last night
        let window = DateRange::new(
            month_start.checked_sub_days(Days::new(1)).unwrap_or(month_start),
            month_end.checked_add_days(Days::new(1)).unwrap_or(month_end),
        );
        let restrictions = self.store.overlapping_restrictions(Some(room_id), &window)?;

        for restriction in restrictions
            .iter()
            .filter(|r| r.room_id == room_id && window.overlaps(&r.range))
        {
            match restriction.reservation_id {
                Some(reservation_id) => {
                    for day in restriction.range.days_inclusive() {
                        if let Some(state) = days.get_mut(&day) {
                            *state = DayState::Reserved(reservation_id);
                        }
                    }
                }
                None => {
                    if let Some(state) = days.get_mut(&restriction.range.start()) {
                        *state = DayState::Blocked(restriction.id);
                    }
                }
            }
        }

        debug!(
            "projected room {room_id} over {month_start}..={month_end} from {} restriction(s)",
            restrictions.len()
        );

        Ok(MonthProjection {
            room_id,
            first_day: month_start,
            last_day: month_end,
            days,
        })
    }

    /// Projects `room_id` over a calendar month.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the read fails.
    pub fn project(&self, room_id: RoomId, month: Month) -> Result<MonthProjection> {
        self.project_month(room_id, month.first_day(), month.last_day())
    }

    /// Projects every room over a calendar month, in room order.
    ///
    /// # Errors
    ///
    /// Returns the store's error if any read fails.
    pub fn project_all(&self, month: Month) -> Result<Vec<MonthProjection>> {
        self.store
            .all_rooms()?
            .into_iter()
            .map(|room| self.project(room.id, month))
            .collect()
    }
}
