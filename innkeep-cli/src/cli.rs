//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    BlockCommand, BookCommand, CalendarCommand, CancelCommand, CheckCommand, CompletionsCommand,
    DeleteCommand, InitCommand, ListCommand, ProcessCommand, ReconcileCommand, RoomsCommand,
    SearchCommand, ShowCommand, UnblockCommand, UpdateGuestCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Staff command line for room availability and bookings.
#[derive(Parser)]
#[command(name = "innkeep")]
#[command(version, about = "Room availability and booking for a small inn", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "INNKEEP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Seconds a storage operation may wait on a lock
    #[arg(
        long,
        value_name = "SECONDS",
        global = true,
        env = "INNKEEP_STORAGE_TIMEOUT_SECONDS"
    )]
    pub storage_timeout: Option<u64>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "INNKEEP_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create the database and seed rooms
    Init(InitCommand),

    /// List rooms
    Rooms(RoomsCommand),

    /// Find rooms free for a stay
    Search(SearchCommand),

    /// Check whether one room is free for a stay
    Check(CheckCommand),

    /// Book a room
    Book(BookCommand),

    /// Block a room for one day
    Block(BlockCommand),

    /// Remove a block
    Unblock(UnblockCommand),

    /// Show or edit a room's monthly calendar
    Calendar(CalendarCommand),

    /// List reservations
    List(ListCommand),

    /// Show one reservation
    Show(ShowCommand),

    /// Mark a reservation as processed
    Process(ProcessCommand),

    /// Change the guest details of a reservation
    UpdateGuest(UpdateGuestCommand),

    /// Delete a reservation row only
    Delete(DeleteCommand),

    /// Cancel a reservation and free its room
    Cancel(CancelCommand),

    /// Repair orphaned reservations and dangling restrictions
    Reconcile(ReconcileCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
