//! Block and unblock command implementations.
//!
//! A block takes a room out of availability for a single day without a
//! guest, e.g. for maintenance.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, parse_day, GlobalOptions};
use clap::Args;
use innkeep::operations::BookingTransaction;
use innkeep::store::RoomStore;
use innkeep::{RestrictionId, RoomId};

/// Block a room for one day.
#[derive(Args)]
pub struct BlockCommand {
    /// Room id
    #[arg(long, value_name = "ID")]
    room: i64,

    /// Day to block (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    date: String,
}

impl BlockCommand {
    /// Execute the block command. Prints the new block id.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let date = parse_day("date", &self.date)?;
        let room_id = RoomId::new(self.room);
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        if db.get_room(room_id)?.is_none() {
            return Err(innkeep::Error::NotFound {
                resource: format!("room {room_id}"),
            }
            .into());
        }

        let id = BookingTransaction::new(&mut db).insert_block(room_id, date)?;
        println!("{id}");
        Ok(())
    }
}

/// Remove a block by id.
#[derive(Args)]
pub struct UnblockCommand {
    /// Block id, as printed by `block`
    #[arg(long, value_name = "ID")]
    id: i64,
}

impl UnblockCommand {
    /// Execute the unblock command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let id = RestrictionId::new(self.id);
        if !BookingTransaction::new(&mut db).remove_block(id)? {
            return Err(CliError::SemanticFailure(format!("No block with id {id}")));
        }

        if !global.quiet {
            println!("Removed block {id}");
        }
        Ok(())
    }
}
