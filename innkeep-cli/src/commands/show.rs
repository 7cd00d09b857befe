//! Show command implementation.

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_database, GlobalOptions};
use clap::Args;
use innkeep::store::{ReservationStore, RestrictionStore};
use innkeep::{Reservation, ReservationId, RoomRestriction};
use serde::Serialize;

#[derive(Serialize)]
struct ShowJson<'a> {
    reservation: &'a Reservation,
    restrictions: &'a [RoomRestriction],
}

/// Show one reservation and the restrictions holding its room.
#[derive(Args)]
pub struct ShowCommand {
    /// Reservation id
    #[arg(long, value_name = "ID")]
    id: i64,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let id = ReservationId::new(self.id);
        let reservation = db.get_reservation(id)?.ok_or_else(|| {
            CliError::from(innkeep::Error::NotFound {
                resource: format!("reservation {id}"),
            })
        })?;
        let restrictions = db.restrictions_for_reservation(id)?;

        if self.json {
            let text = serde_json::to_string_pretty(&ShowJson {
                reservation: &reservation,
                restrictions: &restrictions,
            })
                .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
            println!("{text}");
            return Ok(());
        }

        let guest = reservation.guest();
        let stay = reservation.stay();
        println!("Reservation {id}");
        println!("  Room:     {}", reservation.room_id());
        println!(
            "  Stay:     {} to {} ({} night(s))",
            stay.start(),
            stay.end(),
            stay.nights()
        );
        println!("  Guest:    {} {}", guest.first_name, guest.last_name);
        println!("  Email:    {}", guest.email);
        if !guest.phone.is_empty() {
            println!("  Phone:    {}", guest.phone);
        }
        println!("  Status:   {:?}", reservation.status());
        println!("  Created:  {}", format_timestamp(reservation.created_at()));

        if restrictions.is_empty() {
            log::warn!("reservation {id} holds no restriction; run `innkeep reconcile`");
        }
        for restriction in &restrictions {
            println!(
                "  Holds:    {} to {} (restriction {})",
                restriction.range.start(),
                restriction.range.end(),
                restriction.id
            );
        }
        Ok(())
    }
}
