//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the innkeep data directory and database.

use crate::error::CliError;
use crate::utils::{load_configuration, resolve_data_dir, shorten_path, GlobalOptions};
use clap::Args;
use innkeep::database::DATABASE_FILE_NAME;
use innkeep::operations::{init_database, InitOptions};

/// Create the database and seed the room catalog.
#[derive(Args)]
pub struct InitCommand {
    /// Overwrite existing database
    #[arg(long)]
    overwrite: bool,

    /// Create default configuration file
    #[arg(long)]
    with_config: bool,

    /// Room to seed (repeatable; overrides configured rooms)
    #[arg(long = "room", value_name = "NAME")]
    rooms: Vec<String>,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// Note: --disable-autoinit has no effect here.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = resolve_data_dir(global)?;
        let config = load_configuration(global)?;
        let rooms = if self.rooms.is_empty() {
            config.rooms().to_vec()
        } else {
            self.rooms
        };

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize innkeep in: {}", shorten_path(&data_dir));

            if data_dir.exists() {
                println!("  - Data directory already exists");
            } else {
                println!("  - Create data directory");
            }

            let db_path = data_dir.join(DATABASE_FILE_NAME);
            match (db_path.exists(), self.overwrite) {
                (true, true) => println!("  - Replace existing database"),
                (true, false) => {
                    println!("  - ERROR: Database already exists (use --overwrite to replace)");
                }
                (false, _) => println!("  - Create database"),
            }

            for room in &rooms {
                println!("  - Seed room: {room}");
            }

            if self.with_config {
                println!("  - Create configuration file if missing");
            }

            return Ok(());
        }

        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config)
            .with_rooms(rooms);

        let result = init_database(&options)?;

        println!("Initialized innkeep in: {}", shorten_path(&result.data_dir));

        if result.data_dir_created {
            println!("  - Created data directory");
        }

        if self.overwrite {
            println!("  - Recreated database");
        } else {
            println!("  - Created database");
        }

        if !result.rooms.is_empty() {
            println!("  - Seeded {} room(s)", result.rooms.len());
        }

        if result.config_created {
            println!("  - Created default configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }

        Ok(())
    }
}
