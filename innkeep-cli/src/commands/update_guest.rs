//! Update-guest command implementation.

use crate::commands::book::GuestArgs;
use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use innkeep::operations::BookingTransaction;
use innkeep::ReservationId;

/// Replace the guest details of a reservation.
///
/// Dates and room are not editable; cancel and rebook instead.
#[derive(Args)]
pub struct UpdateGuestCommand {
    /// Reservation id
    #[arg(long, value_name = "ID")]
    id: i64,

    #[command(flatten)]
    guest: GuestArgs,
}

impl UpdateGuestCommand {
    /// Execute the update-guest command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let guest = self.guest.into_guest()?;
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let id = ReservationId::new(self.id);
        BookingTransaction::new(&mut db).update_guest(id, &guest)?;

        if !global.quiet {
            println!("Reservation {id} updated");
        }
        Ok(())
    }
}
