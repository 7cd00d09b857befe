//! CLI command implementations.
//!
//! Availability:
//! - `search`: Rooms free for a stay
//! - `check`: Whether one room is free for a stay
//! - `calendar`: Per-day room state for a month, and block edits
//!
//! Bookings:
//! - `book`: Book a room
//! - `list`, `show`: Review reservations
//! - `process`, `update-guest`: Staff follow-up
//! - `cancel`: Delete a reservation and release its room
//! - `delete`: Delete the reservation row only
//! - `block`, `unblock`: Single-day manual blocks
//!
//! Maintenance:
//! - `init`: Create the database and seed rooms
//! - `rooms`: List or add rooms
//! - `reconcile`: Repair rows left by partial bookings and deletes
//! - `completions`: Shell completion scripts

pub mod block;
pub mod book;
pub mod calendar;
pub mod cancel;
pub mod check;
pub mod completions;
pub mod delete;
pub mod init;
pub mod list;
pub mod process;
pub mod reconcile;
pub mod rooms;
pub mod search;
pub mod show;
pub mod update_guest;

pub use block::{BlockCommand, UnblockCommand};
pub use book::BookCommand;
pub use calendar::CalendarCommand;
pub use cancel::CancelCommand;
pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use delete::DeleteCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use process::ProcessCommand;
pub use reconcile::ReconcileCommand;
pub use rooms::RoomsCommand;
pub use search::SearchCommand;
pub use show::ShowCommand;
pub use update_guest::UpdateGuestCommand;
