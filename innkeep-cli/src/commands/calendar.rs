//! Calendar command implementation.
//!
//! Without edit flags this prints the per-day state of one room (or every
//! room) for a month. With `--add-block` / `--remove-block` it plans the
//! edit against the current projection and applies it in one atomic unit.

use std::collections::BTreeSet;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, parse_day, GlobalOptions};
use chrono::{Datelike, NaiveDate};
use clap::Args;
use innkeep::operations::{
    CalendarEdit, CalendarEditPlan, CalendarProjector, DayState, ExecutionResult, MonthProjection,
    PlanExecutor,
};
use innkeep::{Month, RoomId};

/// Show or edit a room's monthly calendar.
#[derive(Args)]
pub struct CalendarCommand {
    /// Room id (omit to show every room)
    #[arg(long, value_name = "ID")]
    room: Option<i64>,

    /// Month to show (YYYY-MM)
    #[arg(long, value_name = "MONTH")]
    month: String,

    /// Block this day (repeatable)
    #[arg(long = "add-block", value_name = "DATE", requires = "room")]
    add_blocks: Vec<String>,

    /// Remove the block on this day (repeatable)
    #[arg(long = "remove-block", value_name = "DATE", requires = "room")]
    remove_blocks: Vec<String>,

    /// Show planned changes without applying them
    #[arg(long)]
    dry_run: bool,

    /// Print the projection as JSON
    #[arg(long, conflicts_with_all = ["add_blocks", "remove_blocks"])]
    json: bool,
}

impl CalendarCommand {
    /// Execute the calendar command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let month = Month::parse(&self.month)?;
        let added = parse_days("add-block", &self.add_blocks)?;
        let removed = parse_days("remove-block", &self.remove_blocks)?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let projections = match self.room {
            Some(room) => vec![CalendarProjector::new(&db).project(RoomId::new(room), month)?],
            None => CalendarProjector::new(&db).project_all(month)?,
        };

        if added.is_empty() && removed.is_empty() {
            for projection in &projections {
                if self.json {
                    println!("{}", projection.to_json()?);
                } else {
                    print_projection(projection);
                }
            }
            return Ok(());
        }

        // `requires = "room"` guarantees exactly one projection here
        let Some(projection) = projections.first() else {
            return Err(CliError::InvalidArguments(
                "--room is required to edit".to_string(),
            ));
        };

        let current = projection.blocks();
        for day in removed.iter().filter(|day| !current.contains_key(*day)) {
            log::warn!("{day} is not blocked, nothing to remove");
        }

        let edit = CalendarEdit {
            room_id: projection.room_id,
            retained_blocks: current
                .into_keys()
                .filter(|day| !removed.contains(day))
                .collect(),
            new_blocks: added,
        };
        let plan = CalendarEditPlan::new(projection, edit).build_plan()?;

        let mut executor = PlanExecutor::new(&mut db);
        if self.dry_run {
            executor = executor.dry_run();
        }
        let result = executor.execute(&plan)?;
        print_result(&result, global.quiet);
        Ok(())
    }
}

fn parse_days(field: &str, values: &[String]) -> Result<BTreeSet<NaiveDate>, CliError> {
    values.iter().map(|value| parse_day(field, value)).collect()
}

/// Print one day per line: date, weekday, state.
fn print_projection(projection: &MonthProjection) {
    println!("Room {}", projection.room_id);
    for (day, state) in &projection.days {
        let state = match state {
            DayState::Free => "free".to_string(),
            DayState::Reserved(id) => format!("reserved ({id})"),
            DayState::Blocked(id) => format!("blocked ({id})"),
        };
        println!("  {day} {:<3} {state}", day.weekday());
    }
}

fn print_result(result: &ExecutionResult, quiet: bool) {
    for warning in &result.warnings {
        log::warn!("{warning}");
    }
    if quiet {
        return;
    }
    if result.actions_taken.is_empty() {
        println!("No changes");
        return;
    }
    let prefix = if result.dry_run { "Would: " } else { "" };
    for action in &result.actions_taken {
        println!("{prefix}{action}");
    }
}
