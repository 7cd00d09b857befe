//! Availability decisions.
//!
//! A room is free for `[start, end)` when none of its restrictions overlaps
//! the range under [`DateRange::overlaps`]. Nothing is cached; every call
//! reads the store.

use std::collections::HashSet;

use log::debug;

use crate::dates::DateRange;
use crate::error::Result;
use crate::restriction::RoomRestriction;
use crate::room::{Room, RoomId};
use crate::store::{RestrictionStore, RoomStore};

/// Answers "is this room free" and "which rooms are free".
///
/// The engine does not validate ranges. An empty or inverted range is
/// evaluated literally.
///
/// # Examples
///
/// ```
/// use innkeep::operations::AvailabilityEngine;
/// use innkeep::store::MemoryStore;
/// use innkeep::{DateRange, RoomId};
///
/// let store = MemoryStore::with_rooms(["Garden"]);
/// let engine = AvailabilityEngine::new(&store);
/// let stay = DateRange::parse("2025-06-01", "2025-06-03").unwrap();
///
/// assert!(engine.is_room_free(RoomId::new(1), &stay).unwrap());
/// assert_eq!(engine.find_free_rooms(&stay).unwrap().len(), 1);
/// ```
#[derive(Debug)]
pub struct AvailabilityEngine<'a, S> {
    store: &'a S,
}

impl<'a, S> AvailabilityEngine<'a, S>
where
    S: RoomStore + RestrictionStore,
{
    /// Creates an engine reading from `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Returns `true` if no restriction on `room_id` overlaps `range`.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the read fails. A failed read is never
    /// reported as "not free".
    pub fn is_room_free(&self, room_id: RoomId, range: &DateRange) -> Result<bool> {
        let free = self.conflicts(room_id, range)?.is_empty();
        debug!("room {room_id} free for {range}: {free}");
        Ok(free)
    }

    /// Returns the restrictions on `room_id` that overlap `range`.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the read fails.
    pub fn conflicts(&self, room_id: RoomId, range: &DateRange) -> Result<Vec<RoomRestriction>> {
        Ok(self
            .store
            .overlapping_restrictions(Some(room_id), range)?
            .into_iter()
            .filter(|r| r.room_id == room_id && range.overlaps(&r.range))
            .collect())
    }

    /// Returns every room with no restriction overlapping `range`, in store order.
    ///
    /// An empty list means "no availability" and is not an error.
    ///
    /// # Errors
    ///
    /// Returns the store's error if either read fails.
    pub fn find_free_rooms(&self, range: &DateRange) -> Result<Vec<Room>> {
        let taken: HashSet<RoomId> = self
            .store
            .overlapping_restrictions(None, range)?
            .into_iter()
            .filter(|r| range.overlaps(&r.range))
            .map(|r| r.room_id)
            .collect();

        let free: Vec<Room> = self
            .store
            .all_rooms()?
            .into_iter()
            .filter(|room| !taken.contains(&room.id))
            .collect();

        debug!(
            "{} room(s) free for {range}, {} taken",
            free.len(),
            taken.len()
        );
        Ok(free)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::reservation::ReservationId;
    use crate::restriction::{NewRestriction, RestrictionId, RestrictionKind};
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use mockall::mock;

    mock! {
        Store {}

        impl RoomStore for Store {
            fn all_rooms(&self) -> Result<Vec<Room>>;
            fn get_room(&self, id: RoomId) -> Result<Option<Room>>;
        }

        impl RestrictionStore for Store {
            fn insert_restriction(&mut self, restriction: &NewRestriction) -> Result<RestrictionId>;
            fn get_restriction(&self, id: RestrictionId) -> Result<Option<RoomRestriction>>;
            fn overlapping_restrictions(
                &self,
                room_id: Option<RoomId>,
                range: &DateRange,
            ) -> Result<Vec<RoomRestriction>>;
            fn restrictions_for_reservation(&self, id: ReservationId) -> Result<Vec<RoomRestriction>>;
            fn all_restrictions(&self) -> Result<Vec<RoomRestriction>>;
            fn delete_restriction(&mut self, id: RestrictionId) -> Result<bool>;
            fn delete_restrictions_for_reservation(&mut self, id: ReservationId) -> Result<usize>;
        }
    }

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn range(start: u32, end: u32) -> DateRange {
        DateRange::new(june(start), june(end))
    }

    fn store_with_stay(room: i64, start: u32, end: u32) -> MemoryStore {
        let mut store = MemoryStore::with_rooms(["A", "B", "C"]);
        store
            .insert_restriction(&NewRestriction::for_reservation(
                ReservationId::new(7),
                RoomId::new(room),
                range(start, end),
            ))
            .unwrap();
        store
    }

    #[test]
    fn test_room_without_restrictions_is_free() {
        let store = MemoryStore::with_rooms(["A"]);
        let engine = AvailabilityEngine::new(&store);
        assert!(engine.is_room_free(RoomId::new(1), &range(1, 3)).unwrap());
    }

    #[test]
    fn test_overlap_and_boundary_touch() {
        let store = store_with_stay(1, 1, 5);
        let engine = AvailabilityEngine::new(&store);
        let room = RoomId::new(1);

        assert!(!engine.is_room_free(room, &range(4, 6)).unwrap());
        assert!(engine.is_room_free(room, &range(5, 6)).unwrap());
        assert!(!engine.is_room_free(room, &range(1, 5)).unwrap());
        assert!(engine.is_room_free(RoomId::new(2), &range(1, 5)).unwrap());
    }

    #[test]
    fn test_find_free_rooms_excludes_exactly_the_taken() {
        let store = store_with_stay(2, 1, 5);
        let engine = AvailabilityEngine::new(&store);

        let free: Vec<_> = engine
            .find_free_rooms(&range(3, 4))
            .unwrap()
            .into_iter()
            .map(|r| r.id.value())
            .collect();
        assert_eq!(free, vec![1, 3]);

        let all = engine.find_free_rooms(&range(5, 8)).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_no_availability_is_empty_not_error() {
        let mut store = MemoryStore::with_rooms(["A"]);
        store
            .insert_restriction(&NewRestriction::block(RoomId::new(1), june(2)))
            .unwrap();
        let engine = AvailabilityEngine::new(&store);
        assert!(engine.find_free_rooms(&range(1, 3)).unwrap().is_empty());
    }

    #[test]
    fn test_inverted_range_is_evaluated_literally() {
        let store = store_with_stay(1, 1, 5);
        let engine = AvailabilityEngine::new(&store);

        // start=6 < end(5)? no, so no overlap
        assert!(engine.is_room_free(RoomId::new(1), &range(6, 2)).unwrap());
        // start=3 < 5 and end=2 > 1: the literal test reports a conflict
        assert!(!engine.is_room_free(RoomId::new(1), &range(3, 2)).unwrap());
    }

    #[test]
    fn test_conflicts_lists_overlapping_rows() {
        let store = store_with_stay(1, 1, 5);
        let engine = AvailabilityEngine::new(&store);
        let conflicts = engine.conflicts(RoomId::new(1), &range(2, 3)).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].reservation_id, Some(ReservationId::new(7)));
    }

    #[test]
    fn test_engine_reapplies_overlap_filter() {
        let mut mock = MockStore::new();
        // A sloppy store returning a non-overlapping row must not block the room
        mock.expect_overlapping_restrictions().returning(|_, _| {
            Ok(vec![RoomRestriction {
                id: RestrictionId::new(1),
                room_id: RoomId::new(1),
                range: range(10, 12),
                reservation_id: None,
                kind: RestrictionKind::Block,
            }])
        });

        let engine = AvailabilityEngine::new(&mock);
        assert!(engine.is_room_free(RoomId::new(1), &range(1, 3)).unwrap());
    }

    #[test]
    fn test_storage_error_propagates_from_is_room_free() {
        let mut mock = MockStore::new();
        mock.expect_overlapping_restrictions()
            .returning(|_, _| Err(Error::StorageTimeout { seconds: 3 }));

        let engine = AvailabilityEngine::new(&mock);
        let err = engine.is_room_free(RoomId::new(1), &range(1, 3)).unwrap_err();
        assert!(matches!(err, Error::StorageTimeout { .. }));
    }

    #[test]
    fn test_storage_error_propagates_from_find_free_rooms() {
        let mut mock = MockStore::new();
        mock.expect_overlapping_restrictions()
            .returning(|_, _| Ok(Vec::new()));
        mock.expect_all_rooms()
            .returning(|| Err(Error::storage("all_rooms", "connection reset")));

        let engine = AvailabilityEngine::new(&mock);
        let err = engine.find_free_rooms(&range(1, 3)).unwrap_err();
        assert!(err.is_storage_error());
    }
}
