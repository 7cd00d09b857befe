//! List command implementation.
//!
//! This module implements the `list` command, which displays reservations
//! in various formats (table, JSON, CSV).

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, resolve_format, write_reservations, FormatArg,
    GlobalOptions,
};
use clap::Args;
use innkeep::store::{ReservationFilter, ReservationStore};

/// List reservations ordered by arrival date.
#[derive(Args)]
pub struct ListCommand {
    /// Only reservations not yet processed by staff
    #[arg(long)]
    pub new: bool,

    /// Filter by room id
    #[arg(long, value_name = "ID")]
    pub room: Option<i64>,

    /// Output format (default from configuration)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let filter = if self.new {
            ReservationFilter::New
        } else {
            ReservationFilter::All
        };
        let mut reservations = db.list_reservations(filter)?;

        if let Some(room) = self.room {
            reservations.retain(|r| r.room_id().value() == room);
        }

        write_reservations(
            std::io::stdout().lock(),
            &reservations,
            resolve_format(self.format, &config),
        )
    }
}
