//! Reconcile command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::{Args, ValueEnum};
use innkeep::operations::{OrphanStrategy, ReconcileReport, Reconciler};

/// What to do with a reservation whose restriction is missing.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum StrategyArg {
    /// Write the missing restriction back if the room is still free
    Restore,
    /// Delete the reservation
    Remove,
}

impl From<StrategyArg> for OrphanStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Restore => OrphanStrategy::Restore,
            StrategyArg::Remove => OrphanStrategy::Remove,
        }
    }
}

/// Repair orphaned reservations and dangling restrictions.
#[derive(Args)]
pub struct ReconcileCommand {
    /// Orphan strategy (default from configuration)
    #[arg(long, value_enum, ignore_case = true)]
    strategy: Option<StrategyArg>,

    /// Report findings without repairing
    #[arg(long)]
    dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl ReconcileCommand {
    /// Execute the reconcile command.
    ///
    /// Exits 1 if an orphan could not be restored because its room was taken.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let strategy = self
            .strategy
            .map_or_else(|| config.orphan_strategy(), OrphanStrategy::from);
        let mut db = open_database(global, &config)?;

        let report = Reconciler::reconcile(&mut db, strategy, self.dry_run)?;

        if self.json {
            let text = serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
            println!("{text}");
        } else if !global.quiet {
            print_report(&report, strategy);
        }

        if report.conflicts.is_empty() {
            Ok(())
        } else {
            Err(CliError::SemanticFailure(format!(
                "{} reservation(s) could not be restored; their rooms are taken",
                report.conflicts.len()
            )))
        }
    }
}

fn print_report(report: &ReconcileReport, strategy: OrphanStrategy) {
    if report.is_clean() {
        println!("Nothing to reconcile");
        return;
    }

    println!(
        "Found {} orphaned reservation(s), {} dangling restriction(s)",
        report.orphaned_reservations.len(),
        report.dangling_restrictions.len()
    );

    if report.dry_run {
        for id in &report.orphaned_reservations {
            println!("  Would {strategy} reservation {id}");
        }
        for id in &report.dangling_restrictions {
            println!("  Would remove restriction {id}");
        }
        return;
    }

    for id in &report.restored {
        println!("  Restored reservation {id}");
    }
    for id in &report.removed_reservations {
        println!("  Removed reservation {id}");
    }
    for id in &report.removed_restrictions {
        println!("  Removed restriction {id}");
    }
    for id in &report.conflicts {
        println!("  Conflict: reservation {id} overlaps a newer booking");
    }
}
