//! Property-based tests for availability and calendar projection.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use super::{AvailabilityEngine, CalendarProjector, DayState};
use crate::dates::{DateRange, Month};
use crate::reservation::ReservationId;
use crate::restriction::{NewRestriction, RoomRestriction};
use crate::room::RoomId;
use crate::store::{MemoryStore, RestrictionStore};

fn month() -> Month {
    Month::new(2025, 7).unwrap()
}

fn july(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, day).unwrap()
}

#[derive(Debug, Clone)]
enum Seed {
    Block { room: i64, day: u32 },
    Stay { room: i64, day: u32, nights: i64 },
}

fn seed_strategy() -> impl Strategy<Value = Seed> {
    prop_oneof![
        (1i64..=3, 1u32..=31).prop_map(|(room, day)| Seed::Block { room, day }),
        (1i64..=3, 1u32..=31, 1i64..=6).prop_map(|(room, day, nights)| Seed::Stay {
            room,
            day,
            nights
        }),
    ]
}

/// Applies seeds in order; overlapping stays are rejected by the store.
fn seeded_store(seeds: &[Seed]) -> MemoryStore {
    let mut store = MemoryStore::with_rooms(["A", "B", "C"]);
    for (n, seed) in (1i64..).zip(seeds) {
        let restriction = match *seed {
            Seed::Block { room, day } => NewRestriction::block(RoomId::new(room), july(day)),
            Seed::Stay { room, day, nights } => NewRestriction::for_reservation(
                ReservationId::new(n),
                RoomId::new(room),
                DateRange::new(july(day), july(day) + Duration::days(nights)),
            ),
        };
        let _ = store.insert_restriction(&restriction);
    }
    store
}

fn marks(restriction: &RoomRestriction, day: NaiveDate) -> bool {
    if restriction.is_block() {
        restriction.range.start() == day
    } else {
        restriction.range.start() <= day && day <= restriction.range.end()
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 300,
        .. ProptestConfig::default()
    })]

    #[test]
    fn projection_is_idempotent(seeds in prop::collection::vec(seed_strategy(), 0..20)) {
        let store = seeded_store(&seeds);
        let projector = CalendarProjector::new(&store);
        let first = projector.project(RoomId::new(1), month()).unwrap();
        let second = projector.project(RoomId::new(1), month()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn projection_covers_exactly_the_month(seeds in prop::collection::vec(seed_strategy(), 0..20)) {
        let store = seeded_store(&seeds);
        let view = CalendarProjector::new(&store).project(RoomId::new(2), month()).unwrap();
        prop_assert_eq!(view.days.len(), 31);
        prop_assert!(view.days.keys().all(|d| month().first_day() <= *d && *d <= month().last_day()));
    }

    #[test]
    fn day_state_comes_from_a_covering_restriction(
        seeds in prop::collection::vec(seed_strategy(), 0..20),
        room in 1i64..=3,
    ) {
        let store = seeded_store(&seeds);
        let room_id = RoomId::new(room);
        let restrictions: Vec<_> = store
            .all_restrictions()
            .unwrap()
            .into_iter()
            .filter(|r| r.room_id == room_id)
            .collect();
        let view = CalendarProjector::new(&store).project(room_id, month()).unwrap();

        for (day, state) in &view.days {
            let covering: Vec<_> = restrictions.iter().filter(|r| marks(r, *day)).collect();
            match state {
                DayState::Free => prop_assert!(covering.is_empty()),
                DayState::Blocked(id) => {
                    prop_assert!(covering.iter().any(|r| r.id == *id && r.is_block()));
                }
                DayState::Reserved(id) => {
                    prop_assert!(covering.iter().any(|r| r.reservation_id == Some(*id)));
                }
            }
        }
    }

    #[test]
    fn free_rooms_agree_with_single_room_check(
        seeds in prop::collection::vec(seed_strategy(), 0..20),
        start in 1u32..=28,
        nights in 1i64..=5,
    ) {
        let store = seeded_store(&seeds);
        let engine = AvailabilityEngine::new(&store);
        let range = DateRange::new(july(start), july(start) + Duration::days(nights));

        let free: HashSet<RoomId> = engine
            .find_free_rooms(&range)
            .unwrap()
            .into_iter()
            .map(|room| room.id)
            .collect();
        for room in 1..=3 {
            let room_id = RoomId::new(room);
            prop_assert_eq!(free.contains(&room_id), engine.is_room_free(room_id, &range).unwrap());
        }
    }

    #[test]
    fn stays_never_overlap_after_exclusion(seeds in prop::collection::vec(seed_strategy(), 0..30)) {
        let store = seeded_store(&seeds);
        let stays: Vec<_> = store
            .all_restrictions()
            .unwrap()
            .into_iter()
            .filter(|r| !r.is_block())
            .collect();
        for (i, a) in stays.iter().enumerate() {
            for b in &stays[i + 1..] {
                prop_assert!(a.room_id != b.room_id || !a.range.overlaps(&b.range));
            }
        }
    }
}
