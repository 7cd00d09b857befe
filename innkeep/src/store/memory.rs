//! In-process store for tests and development.

use std::collections::{BTreeMap, HashSet};
use std::time::SystemTime;

use log::{debug, trace};

use crate::dates::DateRange;
use crate::error::{Error, Result};
use crate::reservation::{Guest, ProcessingStatus, Reservation, ReservationId};
use crate::restriction::{NewRestriction, RestrictionId, RoomRestriction};
use crate::room::{Room, RoomId};

use super::{ReservationFilter, ReservationStore, RestrictionStore, RoomStore, Storage};

#[derive(Debug, Clone, Default)]
struct Tables {
    rooms: BTreeMap<RoomId, Room>,
    reservations: BTreeMap<ReservationId, Reservation>,
    restrictions: BTreeMap<RestrictionId, RoomRestriction>,
    next_reservation_id: i64,
    next_restriction_id: i64,
}

#[derive(Debug, Default)]
struct Faults {
    reservation_insert: HashSet<RoomId>,
    restriction_insert: HashSet<RoomId>,
    reads: bool,
}

/// A [`Storage`] implementation backed by ordered maps.
///
/// Data is lost when the store is dropped. Failures can be injected per room
/// to exercise the error paths of the booking engine.
///
/// # Examples
///
/// ```
/// use innkeep::store::{MemoryStore, RoomStore};
/// use innkeep::RoomId;
///
/// let store = MemoryStore::with_rooms(["Garden", "Attic"]);
/// let rooms = store.all_rooms().unwrap();
/// assert_eq!(rooms.len(), 2);
/// assert_eq!(rooms[0].id, RoomId::new(1));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Tables,
    faults: Faults,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the named rooms with ids `1..=n`.
    #[must_use]
    pub fn with_rooms<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::new();
        for (index, name) in names.into_iter().enumerate() {
            let id = i64::try_from(index).map_or(i64::MAX, |i| i + 1);
            store.add_room(Room::new(RoomId::new(id), name));
        }
        store
    }

    /// Adds or replaces a room.
    pub fn add_room(&mut self, room: Room) {
        self.tables.rooms.insert(room.id, room);
    }

    /// Makes every reservation insert for `room_id` fail.
    pub fn fail_reservation_insert_for(&mut self, room_id: RoomId) {
        self.faults.reservation_insert.insert(room_id);
    }

    /// Makes every restriction insert for `room_id` fail.
    pub fn fail_restriction_insert_for(&mut self, room_id: RoomId) {
        self.faults.restriction_insert.insert(room_id);
    }

    /// Makes every read fail until [`MemoryStore::clear_faults`] is called.
    pub fn fail_reads(&mut self) {
        self.faults.reads = true;
    }

    /// Removes all injected failures.
    pub fn clear_faults(&mut self) {
        self.faults = Faults::default();
    }

    fn check_read(&self, operation: &str) -> Result<()> {
        if self.faults.reads {
            return Err(Error::storage(operation, "injected read failure"));
        }
        Ok(())
    }
}

impl RoomStore for MemoryStore {
    fn all_rooms(&self) -> Result<Vec<Room>> {
        self.check_read("all_rooms")?;
        Ok(self.tables.rooms.values().cloned().collect())
    }

    fn get_room(&self, id: RoomId) -> Result<Option<Room>> {
        self.check_read("get_room")?;
        Ok(self.tables.rooms.get(&id).cloned())
    }
}

impl RestrictionStore for MemoryStore {
    fn insert_restriction(&mut self, restriction: &NewRestriction) -> Result<RestrictionId> {
        if self.faults.restriction_insert.contains(&restriction.room_id) {
            return Err(Error::storage(
                "insert_restriction",
                format!("injected failure for room {}", restriction.room_id),
            ));
        }

        if restriction.reservation_id.is_some() {
            let taken = self
                .tables
                .restrictions
                .values()
                .any(|r| r.room_id == restriction.room_id && r.range.overlaps(&restriction.range));
            if taken {
                return Err(Error::RoomUnavailable {
                    room_id: restriction.room_id,
                    range: restriction.range,
                });
            }
        }

        self.tables.next_restriction_id += 1;
        let id = RestrictionId::new(self.tables.next_restriction_id);
        self.tables
            .restrictions
            .insert(id, restriction.clone().into_restriction(id));
        trace!("memory store: inserted restriction {id}");
        Ok(id)
    }

    fn get_restriction(&self, id: RestrictionId) -> Result<Option<RoomRestriction>> {
        self.check_read("get_restriction")?;
        Ok(self.tables.restrictions.get(&id).cloned())
    }

    fn overlapping_restrictions(
        &self,
        room_id: Option<RoomId>,
        range: &DateRange,
    ) -> Result<Vec<RoomRestriction>> {
        self.check_read("overlapping_restrictions")?;
        Ok(self
            .tables
            .restrictions
            .values()
            .filter(|r| room_id.map_or(true, |room| r.room_id == room))
            .filter(|r| range.overlaps(&r.range))
            .cloned()
            .collect())
    }

    fn restrictions_for_reservation(&self, id: ReservationId) -> Result<Vec<RoomRestriction>> {
        self.check_read("restrictions_for_reservation")?;
        Ok(self
            .tables
            .restrictions
            .values()
            .filter(|r| r.reservation_id == Some(id))
            .cloned()
            .collect())
    }

    fn all_restrictions(&self) -> Result<Vec<RoomRestriction>> {
        self.check_read("all_restrictions")?;
        Ok(self.tables.restrictions.values().cloned().collect())
    }

    fn delete_restriction(&mut self, id: RestrictionId) -> Result<bool> {
        Ok(self.tables.restrictions.remove(&id).is_some())
    }

    fn delete_restrictions_for_reservation(&mut self, id: ReservationId) -> Result<usize> {
        let before = self.tables.restrictions.len();
        self.tables
            .restrictions
            .retain(|_, r| r.reservation_id != Some(id));
        Ok(before - self.tables.restrictions.len())
    }
}

impl ReservationStore for MemoryStore {
    fn insert_reservation(&mut self, reservation: &Reservation) -> Result<ReservationId> {
        if self.faults.reservation_insert.contains(&reservation.room_id()) {
            return Err(Error::storage(
                "insert_reservation",
                format!("injected failure for room {}", reservation.room_id()),
            ));
        }

        self.tables.next_reservation_id += 1;
        let id = ReservationId::new(self.tables.next_reservation_id);
        self.tables
            .reservations
            .insert(id, reservation.clone().with_id(id));
        trace!("memory store: inserted reservation {id}");
        Ok(id)
    }

    fn get_reservation(&self, id: ReservationId) -> Result<Option<Reservation>> {
        self.check_read("get_reservation")?;
        Ok(self.tables.reservations.get(&id).cloned())
    }

    fn list_reservations(&self, filter: ReservationFilter) -> Result<Vec<Reservation>> {
        self.check_read("list_reservations")?;
        let mut list: Vec<Reservation> = self
            .tables
            .reservations
            .values()
            .filter(|r| match filter {
                ReservationFilter::All => true,
                ReservationFilter::New => r.status() == ProcessingStatus::New,
            })
            .cloned()
            .collect();
        list.sort_by_key(|r| (r.stay().start(), r.id()));
        Ok(list)
    }

    fn update_guest(&mut self, id: ReservationId, guest: &Guest) -> Result<bool> {
        let Some(existing) = self.tables.reservations.get_mut(&id) else {
            return Ok(false);
        };
        *existing = Reservation::builder(guest.clone(), existing.room_id(), existing.stay())
            .id(id)
            .status(existing.status())
            .created_at(existing.created_at())
            .updated_at(SystemTime::now())
            .build();
        Ok(true)
    }

    fn set_status(&mut self, id: ReservationId, status: ProcessingStatus) -> Result<bool> {
        let Some(existing) = self.tables.reservations.get_mut(&id) else {
            return Ok(false);
        };
        *existing = Reservation::builder(existing.guest().clone(), existing.room_id(), existing.stay())
            .id(id)
            .status(status)
            .created_at(existing.created_at())
            .updated_at(SystemTime::now())
            .build();
        Ok(true)
    }

    fn delete_reservation(&mut self, id: ReservationId) -> Result<bool> {
        Ok(self.tables.reservations.remove(&id).is_some())
    }
}

impl Storage for MemoryStore {
    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let snapshot = self.tables.clone();
        match f(self) {
            Ok(value) => Ok(value),
            Err(e) => {
                debug!("memory store: rolling back unit after error: {e}");
                self.tables = snapshot;
                Err(e)
            }
        }
    }
}
