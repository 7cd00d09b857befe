//! Delete command implementation.
//!
//! Removes the reservation row only. Any restriction it held stays in
//! place and keeps the room unavailable until `innkeep reconcile` clears it
//! or the reservation is cancelled instead.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use innkeep::operations::BookingTransaction;
use innkeep::ReservationId;

/// Delete a reservation row without releasing its room.
#[derive(Args)]
pub struct DeleteCommand {
    /// Reservation id
    #[arg(long, value_name = "ID")]
    id: i64,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let id = ReservationId::new(self.id);
        if !BookingTransaction::new(&mut db).delete_reservation(id)? {
            return Err(innkeep::Error::NotFound {
                resource: format!("reservation {id}"),
            }
            .into());
        }

        log::warn!("reservation {id} deleted; its room stays held until `innkeep reconcile`");
        if !global.quiet {
            println!("Deleted reservation {id}");
        }
        Ok(())
    }
}
