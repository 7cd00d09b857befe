//! Storage capability traits.
//!
//! The engines in [`crate::operations`] never name a concrete store. They are
//! generic over these traits and receive a store handle at construction time.
//! Two implementations ship with the crate:
//!
//! - [`crate::Database`]: `SQLite` via `rusqlite`
//! - [`MemoryStore`]: an in-process fake with fault injection, for tests
//!
//! Both enforce the same exclusion rule: a reservation-derived restriction
//! may not overlap any other restriction on the same room.

mod memory;

pub use memory::MemoryStore;

use crate::dates::DateRange;
use crate::error::Result;
use crate::reservation::{Guest, ProcessingStatus, Reservation, ReservationId};
use crate::restriction::{NewRestriction, RestrictionId, RoomRestriction};
use crate::room::{Room, RoomId};

/// Read access to the room catalog.
pub trait RoomStore {
    /// Returns every room, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn all_rooms(&self) -> Result<Vec<Room>>;

    /// Returns one room, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn get_room(&self, id: RoomId) -> Result<Option<Room>>;
}

/// Persistence of room restriction rows.
pub trait RestrictionStore {
    /// Writes a restriction and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::RoomUnavailable`] if a reservation-derived
    /// restriction would overlap an existing one on the same room, or a
    /// storage error if the write fails.
    fn insert_restriction(&mut self, restriction: &NewRestriction) -> Result<RestrictionId>;

    /// Returns one restriction by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn get_restriction(&self, id: RestrictionId) -> Result<Option<RoomRestriction>>;

    /// Returns restrictions that may overlap `range`, optionally for one room.
    ///
    /// Implementations return at least every restriction satisfying
    /// [`DateRange::overlaps`]; callers re-apply the exact test.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn overlapping_restrictions(
        &self,
        room_id: Option<RoomId>,
        range: &DateRange,
    ) -> Result<Vec<RoomRestriction>>;

    /// Returns the restrictions owned by a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn restrictions_for_reservation(&self, id: ReservationId) -> Result<Vec<RoomRestriction>>;

    /// Returns every restriction, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn all_restrictions(&self) -> Result<Vec<RoomRestriction>>;

    /// Deletes one restriction. Returns `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_restriction(&mut self, id: RestrictionId) -> Result<bool>;

    /// Deletes every restriction owned by a reservation, returning the count.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_restrictions_for_reservation(&mut self, id: ReservationId) -> Result<usize>;
}

/// Which reservations to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReservationFilter {
    /// Every reservation.
    #[default]
    All,
    /// Only reservations staff have not processed yet.
    New,
}

/// Persistence of reservation rows.
pub trait ReservationStore {
    /// Writes a reservation and returns its new id. Any id on the input is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn insert_reservation(&mut self, reservation: &Reservation) -> Result<ReservationId>;

    /// Returns one reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn get_reservation(&self, id: ReservationId) -> Result<Option<Reservation>>;

    /// Lists reservations ordered by start date.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn list_reservations(&self, filter: ReservationFilter) -> Result<Vec<Reservation>>;

    /// Replaces the guest details. Returns `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn update_guest(&mut self, id: ReservationId, guest: &Guest) -> Result<bool>;

    /// Sets the processing status. Returns `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn set_status(&mut self, id: ReservationId, status: ProcessingStatus) -> Result<bool>;

    /// Hard-deletes a reservation. Its restrictions are left in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_reservation(&mut self, id: ReservationId) -> Result<bool>;
}

/// A complete store: rooms, reservations and restrictions, plus atomic units.
pub trait Storage: RoomStore + ReservationStore + RestrictionStore {
    /// Runs `f` as one serializable unit.
    ///
    /// If `f` returns an error, every write it made is undone and the error
    /// is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a storage error if the unit could not
    /// be started or committed.
    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>;
}
