#![deny(unsafe_code)]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # innkeep
//!
//! Room availability and booking consistency for a small lodging business.
//!
//! Visitors search a date range for free rooms and book one; staff review
//! reservations and block rooms on a monthly calendar. This crate decides
//! whether a room is free, persists a reservation together with the
//! restriction that takes the room out of availability, and projects
//! per-day room state for the calendar.
//!
//! ## Core Types
//!
//! - [`DateRange`] and [`Month`]: stay and calendar windows
//! - [`Room`], [`Reservation`] and [`RoomRestriction`]: the stored rows
//! - [`store`]: storage traits, with [`Database`] (`SQLite`) and
//!   [`store::MemoryStore`] implementations
//! - [`operations`]: the availability, booking, calendar and reconcile engines
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: stderr sink for the `log` facade
//!
//! ## Examples
//!
//! ```
//! use innkeep::{DateRange, Guest, Reservation, RoomId};
//! use innkeep::operations::{AvailabilityEngine, BookingTransaction};
//! use innkeep::store::MemoryStore;
//!
//! let mut store = MemoryStore::with_rooms(["General's Quarters"]);
//! let stay = DateRange::parse("2025-06-01", "2025-06-03").unwrap();
//! let guest = Guest::new("Ada", "Lovelace", "ada@example.com", "");
//!
//! let reservation = Reservation::builder(guest, RoomId::new(1), stay).build();
//! BookingTransaction::new(&mut store).book_exclusive(&reservation).unwrap();
//!
//! // Check-out day is free again
//! let next = DateRange::parse("2025-06-03", "2025-06-05").unwrap();
//! assert!(AvailabilityEngine::new(&store).is_room_free(RoomId::new(1), &next).unwrap());
//! ```

pub mod config;
pub mod database;
pub mod dates;
pub mod error;
pub mod logging;
pub mod operations;
pub mod reservation;
pub mod restriction;
pub mod room;
pub mod store;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use dates::{DateRange, Month};
pub use error::{Error, ErrorCategory, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    AvailabilityEngine, BookingTransaction, CalendarEdit, CalendarEditPlan, CalendarProjector,
    DayState, ExecutionResult, MonthProjection, OperationPlan, OrphanStrategy, PlanAction,
    PlanExecutor, ReconcileReport, Reconciler,
};
pub use reservation::{
    Guest, ProcessingStatus, Reservation, ReservationBuilder, ReservationId, ValidationError,
};
pub use restriction::{NewRestriction, RestrictionId, RestrictionKind, RoomRestriction};
pub use room::{Room, RoomId};
