//! Build script for innkeep-cli.
//!
//! Generates the `innkeep.1` man page into OUT_DIR with clap_mangen.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! tree is restated here.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    let room = || {
        Arg::new("room")
            .long("room")
            .value_name("ID")
            .help("Room id")
    };
    let id = |what: &'static str| Arg::new("id").long("id").value_name("ID").help(what);
    let stay = || {
        [
            Arg::new("start")
                .long("start")
                .value_name("DATE")
                .required(true)
                .help("Arrival date (YYYY-MM-DD)"),
            Arg::new("end")
                .long("end")
                .value_name("DATE")
                .required(true)
                .help("Departure date (YYYY-MM-DD)"),
        ]
    };
    let guest = || {
        [
            Arg::new("first-name").long("first-name").value_name("NAME"),
            Arg::new("last-name").long("last-name").value_name("NAME"),
            Arg::new("email").long("email").value_name("EMAIL"),
            Arg::new("phone").long("phone").value_name("PHONE"),
        ]
    };

    Command::new("innkeep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Room availability and booking for a small inn")
        .long_about(
            "Staff command line for searching room availability, booking rooms, \
             managing the monthly calendar and reconciling the reservation store",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("INNKEEP_DATA_DIR"),
        )
        .arg(
            Arg::new("storage-timeout")
                .long("storage-timeout")
                .help("Seconds a storage operation may wait on a lock")
                .value_name("SECONDS")
                .global(true)
                .env("INNKEEP_STORAGE_TIMEOUT_SECONDS"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(ArgAction::SetTrue)
                .env("INNKEEP_DISABLE_AUTOINIT"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Create the database and seed rooms")
                .arg(Arg::new("overwrite").long("overwrite").action(ArgAction::SetTrue))
                .arg(Arg::new("with-config").long("with-config").action(ArgAction::SetTrue))
                .arg(Arg::new("room").long("room").action(ArgAction::Append))
                .arg(Arg::new("dry-run").long("dry-run").action(ArgAction::SetTrue)),
            Command::new("rooms")
                .about("List rooms")
                .arg(Arg::new("add").long("add").value_name("NAME"))
                .arg(Arg::new("format").long("format")),
            Command::new("search")
                .about("Find rooms free for a stay")
                .args(stay())
                .arg(Arg::new("format").long("format")),
            Command::new("check")
                .about("Check whether one room is free for a stay")
                .arg(room())
                .args(stay()),
            Command::new("book")
                .about("Book a room")
                .long_about(
                    "Book a room. The availability check and both writes run in one \
                     transaction unless --unchecked is given",
                )
                .arg(room())
                .args(stay())
                .args(guest())
                .arg(Arg::new("unchecked").long("unchecked").action(ArgAction::SetTrue)),
            Command::new("block")
                .about("Block a room for one day")
                .arg(room())
                .arg(Arg::new("date").long("date").value_name("DATE")),
            Command::new("unblock")
                .about("Remove a block")
                .arg(id("Block id")),
            Command::new("calendar")
                .about("Show or edit a room's monthly calendar")
                .arg(room())
                .arg(Arg::new("month").long("month").value_name("MONTH"))
                .arg(Arg::new("add-block").long("add-block").action(ArgAction::Append))
                .arg(
                    Arg::new("remove-block")
                        .long("remove-block")
                        .action(ArgAction::Append),
                )
                .arg(Arg::new("dry-run").long("dry-run").action(ArgAction::SetTrue))
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
            Command::new("list")
                .about("List reservations")
                .arg(Arg::new("new").long("new").action(ArgAction::SetTrue))
                .arg(room())
                .arg(Arg::new("format").long("format")),
            Command::new("show")
                .about("Show one reservation")
                .arg(id("Reservation id"))
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
            Command::new("process")
                .about("Mark a reservation as processed")
                .arg(id("Reservation id")),
            Command::new("update-guest")
                .about("Change the guest details of a reservation")
                .arg(id("Reservation id"))
                .args(guest()),
            Command::new("delete")
                .about("Delete a reservation row only")
                .long_about(
                    "Delete a reservation row. Its restriction stays and keeps the room \
                     held until `innkeep reconcile` or `innkeep cancel`",
                )
                .arg(id("Reservation id")),
            Command::new("cancel")
                .about("Cancel a reservation and free its room")
                .arg(id("Reservation id")),
            Command::new("reconcile")
                .about("Repair orphaned reservations and dangling restrictions")
                .arg(Arg::new("strategy").long("strategy"))
                .arg(Arg::new("dry-run").long("dry-run").action(ArgAction::SetTrue))
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(Arg::new("shell").required(true)),
        ])
}

fn main() -> io::Result<()> {
    let out_dir = std::env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR not set"))?;
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("innkeep.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
