//! Check command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use innkeep::operations::AvailabilityEngine;
use innkeep::store::RoomStore;
use innkeep::{DateRange, RoomId};

/// Check whether one room is free for a stay.
///
/// Prints `free` and exits 0, or prints the conflicting restrictions and
/// exits 1.
#[derive(Args)]
pub struct CheckCommand {
    /// Room id
    #[arg(long, value_name = "ID")]
    room: i64,

    /// Arrival date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    start: String,

    /// Departure date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    end: String,
}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let stay = DateRange::parse(&self.start, &self.end)?;
        let room_id = RoomId::new(self.room);
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        if db.get_room(room_id)?.is_none() {
            return Err(innkeep::Error::NotFound {
                resource: format!("room {room_id}"),
            }
            .into());
        }

        let conflicts = AvailabilityEngine::new(&db).conflicts(room_id, &stay)?;
        if conflicts.is_empty() {
            println!("free");
            return Ok(());
        }

        for restriction in &conflicts {
            let owner = restriction
                .reservation_id
                .map_or_else(|| "block".to_string(), |id| format!("reservation {id}"));
            eprintln!(
                "  {} to {} ({owner})",
                restriction.range.start(),
                restriction.range.end()
            );
        }
        Err(CliError::SemanticFailure(format!(
            "Room {room_id} is not free from {} to {}",
            stay.start(),
            stay.end()
        )))
    }
}
