//! Process command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use innkeep::operations::BookingTransaction;
use innkeep::ReservationId;

/// Mark a reservation as processed.
#[derive(Args)]
pub struct ProcessCommand {
    /// Reservation id
    #[arg(long, value_name = "ID")]
    id: i64,
}

impl ProcessCommand {
    /// Execute the process command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let id = ReservationId::new(self.id);
        BookingTransaction::new(&mut db).mark_processed(id)?;

        if !global.quiet {
            println!("Reservation {id} marked processed");
        }
        Ok(())
    }
}
