//! Plan execution.

use log::{info, warn};

use crate::error::Result;
use crate::restriction::RestrictionId;
use crate::store::Storage;

use super::booking::BookingTransaction;
use super::plan::{OperationPlan, PlanAction};

/// The outcome of executing a plan.
#[derive(Debug, Clone, Default)]
pub struct ExecutionResult {
    /// Whether this was a dry run (nothing written).
    pub dry_run: bool,

    /// Descriptions of actions taken, or that would be taken in a dry run.
    pub actions_taken: Vec<String>,

    /// Warnings from the plan and from execution.
    pub warnings: Vec<String>,

    /// Ids of blocks created.
    pub inserted_blocks: Vec<RestrictionId>,

    /// Ids of blocks removed.
    pub removed_blocks: Vec<RestrictionId>,
}

impl ExecutionResult {
    fn from_plan(plan: &OperationPlan, dry_run: bool) -> Self {
        Self {
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            inserted_blocks: Vec::new(),
            removed_blocks: Vec::new(),
        }
    }
}

/// Applies [`OperationPlan`]s to a store.
///
/// All actions of one plan run inside a single atomic unit: either every
/// block change lands or none does.
///
/// # Examples
///
/// ```
/// use innkeep::operations::{OperationPlan, PlanAction, PlanExecutor};
/// use innkeep::store::MemoryStore;
/// use innkeep::RoomId;
/// use chrono::NaiveDate;
///
/// let mut store = MemoryStore::with_rooms(["Garden"]);
/// let plan = OperationPlan::new("Block the fourth").add_action(PlanAction::InsertBlock {
///     room_id: RoomId::new(1),
///     date: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
/// });
///
/// let preview = PlanExecutor::new(&mut store).dry_run().execute(&plan).unwrap();
/// assert!(preview.inserted_blocks.is_empty());
///
/// let result = PlanExecutor::new(&mut store).execute(&plan).unwrap();
/// assert_eq!(result.inserted_blocks.len(), 1);
/// ```
#[derive(Debug)]
pub struct PlanExecutor<'a, S> {
    store: &'a mut S,
    dry_run: bool,
}

impl<'a, S: Storage> PlanExecutor<'a, S> {
    /// Creates an executor writing to `store`.
    pub fn new(store: &'a mut S) -> Self {
        Self {
            store,
            dry_run: false,
        }
    }

    /// Reports what would happen without writing.
    #[must_use]
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes `plan`.
    ///
    /// Removing a block that has meanwhile disappeared is reported as a
    /// warning, not an error.
    ///
    /// # Errors
    ///
    /// Returns the first action's error; every earlier action in the plan is
    /// rolled back.
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        let mut result = ExecutionResult::from_plan(plan, self.dry_run);
        if self.dry_run {
            info!("dry run: {} ({} action(s))", plan.description, plan.len());
            return Ok(result);
        }

        let (inserted, removed, warnings) = self.store.atomically(|store| {
            let mut tx = BookingTransaction::new(store);
            let mut inserted = Vec::new();
            let mut removed = Vec::new();
            let mut warnings = Vec::new();

            for action in &plan.actions {
                match action {
                    PlanAction::InsertBlock { room_id, date } => {
                        inserted.push(tx.insert_block(*room_id, *date)?);
                    }
                    PlanAction::RemoveBlock { block_id, date, .. } => {
                        if tx.remove_block(*block_id)? {
                            removed.push(*block_id);
                        } else {
                            let message = format!("Block {block_id} on {date} was already removed");
                            warn!("{message}");
                            warnings.push(message);
                        }
                    }
                }
            }
            Ok((inserted, removed, warnings))
        })?;

        info!(
            "{}: {} block(s) added, {} removed",
            plan.description,
            inserted.len(),
            removed.len()
        );
        result.inserted_blocks = inserted;
        result.removed_blocks = removed;
        result.warnings.extend(warnings);
        Ok(result)
    }
}
