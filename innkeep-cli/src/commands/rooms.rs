//! Rooms command implementation.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, resolve_format, write_rooms, FormatArg, GlobalOptions,
};
use clap::Args;
use innkeep::store::RoomStore;

/// List the room catalog, or add a room to it.
#[derive(Args)]
pub struct RoomsCommand {
    /// Add a room with this name instead of listing
    #[arg(long, value_name = "NAME")]
    add: Option<String>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    format: Option<FormatArg>,
}

impl RoomsCommand {
    /// Execute the rooms command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        if let Some(name) = self.add {
            let name = name.trim();
            if name.is_empty() {
                return Err(CliError::InvalidArguments(
                    "room name cannot be empty".to_string(),
                ));
            }
            let id = db.insert_room(name)?;
            println!("{id}");
            return Ok(());
        }

        let rooms = db.all_rooms()?;
        write_rooms(
            std::io::stdout().lock(),
            &rooms,
            resolve_format(self.format, &config),
        )
    }
}
