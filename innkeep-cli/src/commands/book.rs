//! Book command implementation.
//!
//! By default the availability check and both writes run in one exclusive
//! transaction, so a conflicting booking is rejected and nothing is stored.
//! `--unchecked` writes the reservation and its restriction as two separate
//! steps; if the second step fails the reservation is kept and reported for
//! `innkeep reconcile`.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use innkeep::operations::BookingTransaction;
use innkeep::{DateRange, Guest, Reservation, RoomId};

/// Guest details shared by `book` and `update-guest`.
#[derive(Args)]
pub struct GuestArgs {
    /// Guest first name (at least three characters)
    #[arg(long, value_name = "NAME")]
    pub first_name: String,

    /// Guest last name
    #[arg(long, value_name = "NAME")]
    pub last_name: String,

    /// Guest email address
    #[arg(long, value_name = "EMAIL")]
    pub email: String,

    /// Guest phone number
    #[arg(long, value_name = "PHONE", default_value = "")]
    pub phone: String,
}

impl GuestArgs {
    /// Build a guest and apply the booking form rules.
    pub fn into_guest(self) -> Result<Guest, CliError> {
        let guest = Guest::new(self.first_name, self.last_name, self.email, self.phone);
        guest.validate()?;
        Ok(guest)
    }
}

/// Book a room for a stay.
#[derive(Args)]
pub struct BookCommand {
    /// Room id
    #[arg(long, value_name = "ID")]
    room: i64,

    /// Arrival date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    start: String,

    /// Departure date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    end: String,

    #[command(flatten)]
    guest: GuestArgs,

    /// Skip the availability check and write in two steps
    #[arg(long)]
    unchecked: bool,
}

impl BookCommand {
    /// Execute the book command.
    ///
    /// Prints the new reservation id on success.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let stay = DateRange::parse(&self.start, &self.end)?;
        let guest = self.guest.into_guest()?;
        let reservation = Reservation::builder(guest, RoomId::new(self.room), stay).build();

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let mut tx = BookingTransaction::new(&mut db);

        let id = if self.unchecked {
            tx.book(&reservation)?
        } else {
            tx.book_exclusive(&reservation)?
        };

        log::info!("booked room {} as reservation {id}", self.room);
        println!("{id}");
        Ok(())
    }
}
