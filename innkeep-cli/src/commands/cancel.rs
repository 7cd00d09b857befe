//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use innkeep::operations::BookingTransaction;
use innkeep::ReservationId;

/// Cancel a reservation and release its room.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    #[arg(long, value_name = "ID")]
    id: i64,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let id = ReservationId::new(self.id);
        let released = BookingTransaction::new(&mut db).cancel_reservation(id)?;

        if !global.quiet {
            println!("Cancelled reservation {id} ({released} restriction(s) released)");
        }
        Ok(())
    }
}
