//! Availability and calendar behavior against a real `SQLite` file.

mod common;

use common::{date, range, reservation, TestDatabase};
use innkeep::operations::{AvailabilityEngine, BookingTransaction, CalendarProjector, DayState};
use innkeep::store::RestrictionStore;
use innkeep::{Month, NewRestriction, ReservationId, RoomId};

#[test]
fn test_room_without_restrictions_is_free() {
    let test_db = TestDatabase::with_rooms(&["General's Quarters"]);
    let db = test_db.open();

    let engine = AvailabilityEngine::new(&db);
    assert!(engine
        .is_room_free(RoomId::new(1), &range("2025-06-01", "2025-06-03"))
        .unwrap());
}

#[test]
fn test_overlap_and_boundary_touch() {
    let test_db = TestDatabase::with_rooms(&["General's Quarters"]);
    let mut db = test_db.open();
    db.insert_restriction(&NewRestriction::for_reservation(
        ReservationId::new(7),
        RoomId::new(1),
        range("2025-06-01", "2025-06-05"),
    ))
    .unwrap();

    let engine = AvailabilityEngine::new(&db);
    assert!(!engine
        .is_room_free(RoomId::new(1), &range("2025-06-04", "2025-06-06"))
        .unwrap());
    assert!(engine
        .is_room_free(RoomId::new(1), &range("2025-06-05", "2025-06-06"))
        .unwrap());
}

#[test]
fn test_block_then_project_july() {
    let test_db = TestDatabase::with_rooms(&["General's Quarters", "Major's Suite"]);
    let mut db = test_db.open();

    let block = BookingTransaction::new(&mut db)
        .insert_block(RoomId::new(2), date(2025, 7, 4))
        .unwrap();

    let july = Month::new(2025, 7).unwrap();
    let view = CalendarProjector::new(&db).project(RoomId::new(2), july).unwrap();

    assert_eq!(view.days.len(), 31);
    for (day, state) in &view.days {
        if *day == date(2025, 7, 4) {
            assert_eq!(*state, DayState::Blocked(block));
        } else {
            assert_eq!(*state, DayState::Free, "{day}");
        }
    }
}

#[test]
fn test_find_free_rooms_excludes_taken_rooms_only() {
    let test_db = TestDatabase::with_rooms(&["A", "B", "C"]);
    let mut db = test_db.open();

    let mut tx = BookingTransaction::new(&mut db);
    tx.book_exclusive(&reservation("Ada", 1, "2025-06-01", "2025-06-04"))
        .unwrap();
    tx.insert_block(RoomId::new(3), date(2025, 6, 2)).unwrap();

    let engine = AvailabilityEngine::new(&db);
    let mut free: Vec<_> = engine
        .find_free_rooms(&range("2025-06-02", "2025-06-03"))
        .unwrap()
        .into_iter()
        .map(|room| room.id)
        .collect();
    free.sort();
    assert_eq!(free, vec![RoomId::new(2)]);

    let later = engine
        .find_free_rooms(&range("2025-06-04", "2025-06-06"))
        .unwrap();
    assert_eq!(later.len(), 3);
}

#[test]
fn test_reservation_marks_checkout_day_in_calendar() {
    let test_db = TestDatabase::with_rooms(&["A"]);
    let mut db = test_db.open();

    let id = BookingTransaction::new(&mut db)
        .book_exclusive(&reservation("Ada", 1, "2025-06-28", "2025-07-02"))
        .unwrap();

    let june = CalendarProjector::new(&db)
        .project(RoomId::new(1), Month::new(2025, 6).unwrap())
        .unwrap();
    assert_eq!(june.get(date(2025, 6, 27)), Some(DayState::Free));
    assert_eq!(june.get(date(2025, 6, 28)), Some(DayState::Reserved(id)));
    assert_eq!(june.get(date(2025, 6, 30)), Some(DayState::Reserved(id)));
    assert_eq!(june.get(date(2025, 7, 1)), None);

    let july = CalendarProjector::new(&db)
        .project(RoomId::new(1), Month::new(2025, 7).unwrap())
        .unwrap();
    // Inclusive end: check-out day shows as reserved on the calendar
    assert_eq!(july.get(date(2025, 7, 2)), Some(DayState::Reserved(id)));
    assert_eq!(july.get(date(2025, 7, 3)), Some(DayState::Free));
    assert_eq!(july.reserved_days().len(), 2);
}

#[test]
fn test_block_on_last_day_of_month_is_visible() {
    let test_db = TestDatabase::with_rooms(&["A"]);
    let mut db = test_db.open();

    let block = BookingTransaction::new(&mut db)
        .insert_block(RoomId::new(1), date(2025, 7, 31))
        .unwrap();

    let july = CalendarProjector::new(&db)
        .project(RoomId::new(1), Month::new(2025, 7).unwrap())
        .unwrap();
    assert_eq!(july.get(date(2025, 7, 31)), Some(DayState::Blocked(block)));
}
