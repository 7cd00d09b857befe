//! The availability and booking-consistency engine.
//!
//! Every engine here is generic over the traits in [`crate::store`] and
//! borrows its store handle; none of them owns a connection.
//!
//! - [`AvailabilityEngine`]: is a room free, which rooms are free
//! - [`BookingTransaction`]: writes reservations, restrictions and blocks
//! - [`CalendarProjector`]: per-day room state for the staff calendar
//! - [`CalendarEditPlan`] and [`PlanExecutor`]: staff calendar edits, planned
//!   first and then applied in one atomic unit
//! - [`Reconciler`]: repairs rows left behind by partial bookings and
//!   non-cascading deletes
//!
//! # Examples
//!
//! ```
//! use innkeep::operations::{AvailabilityEngine, BookingTransaction};
//! use innkeep::store::MemoryStore;
//! use innkeep::{DateRange, Guest, Reservation, RoomId};
//!
//! let mut store = MemoryStore::with_rooms(["General's Quarters", "Major's Suite"]);
//! let stay = DateRange::parse("2025-06-01", "2025-06-03").unwrap();
//!
//! let guest = Guest::new("Ada", "Lovelace", "ada@example.com", "555-0100");
//! let reservation = Reservation::builder(guest, RoomId::new(1), stay).build();
//! BookingTransaction::new(&mut store).book_exclusive(&reservation).unwrap();
//!
//! let free = AvailabilityEngine::new(&store).find_free_rooms(&stay).unwrap();
//! assert_eq!(free.len(), 1);
//! assert_eq!(free[0].id, RoomId::new(2));
//! ```

pub mod availability;
pub mod booking;
pub mod calendar;
pub mod executor;
pub mod init;
pub mod plan;
pub mod reconcile;

#[cfg(test)]
mod proptests;

pub use availability::AvailabilityEngine;
pub use booking::BookingTransaction;
pub use calendar::{CalendarProjector, DayState, MonthProjection};
pub use executor::{ExecutionResult, PlanExecutor};
pub use init::{init_database, InitOptions, InitResult};
pub use plan::{CalendarEdit, CalendarEditPlan, OperationPlan, PlanAction};
pub use reconcile::{OrphanStrategy, ReconcileReport, Reconciler};
