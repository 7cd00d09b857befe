//! Search command implementation.
//!
//! Lists every room that is free for a whole stay. Exits with status 1
//! when nothing is free so scripts can branch on availability.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, resolve_format, write_rooms, FormatArg, GlobalOptions,
};
use clap::Args;
use innkeep::operations::AvailabilityEngine;
use innkeep::DateRange;

/// Find rooms free for a stay.
#[derive(Args)]
pub struct SearchCommand {
    /// Arrival date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    start: String,

    /// Departure date (YYYY-MM-DD), the morning the room is vacated
    #[arg(long, value_name = "DATE")]
    end: String,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    format: Option<FormatArg>,
}

impl SearchCommand {
    /// Execute the search command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let stay = DateRange::parse(&self.start, &self.end)?;
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let free = AvailabilityEngine::new(&db).find_free_rooms(&stay)?;
        if free.is_empty() {
            return Err(CliError::SemanticFailure(format!(
                "No availability for {} to {}",
                stay.start(),
                stay.end()
            )));
        }

        write_rooms(
            std::io::stdout().lock(),
            &free,
            resolve_format(self.format, &config),
        )
    }
}
