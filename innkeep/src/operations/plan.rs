//! Plans for staff calendar edits.
//!
//! Staff edit a projected month by unticking existing blocks and picking new
//! days to block. [`CalendarEditPlan`] compares that submission against the
//! projection it was made from and produces an [`OperationPlan`]; nothing is
//! written until a [`super::PlanExecutor`] runs it.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use log::warn;

use crate::error::{Error, Result};
use crate::restriction::RestrictionId;
use crate::room::RoomId;

use super::calendar::{DayState, MonthProjection};

/// A single write in a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Block a room for one day.
    InsertBlock {
        /// The room to block.
        room_id: RoomId,
        /// The blocked day.
        date: NaiveDate,
    },

    /// Remove an existing block.
    RemoveBlock {
        /// The room the block is on.
        room_id: RoomId,
        /// The block to remove.
        block_id: RestrictionId,
        /// The blocked day, for reporting.
        date: NaiveDate,
    },
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::InsertBlock { room_id, date } => format!("Block room {room_id} on {date}"),
            Self::RemoveBlock {
                room_id,
                block_id,
                date,
            } => format!("Remove block {block_id} from room {room_id} on {date}"),
        }
    }
}

/// A description of the writes an operation will perform.
#[derive(Debug, Clone, Default)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The writes to perform, in order.
    pub actions: Vec<PlanAction>,

    /// Warnings to show the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates an empty plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Edit July");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Appends an action.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Appends a warning.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Returns `true` if the plan performs no writes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

/// What staff submitted for one room's calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEdit {
    /// The edited room.
    pub room_id: RoomId,
    /// Blocked days whose block should stay. Blocks on other days are removed.
    pub retained_blocks: BTreeSet<NaiveDate>,
    /// Days to block.
    pub new_blocks: BTreeSet<NaiveDate>,
}

impl CalendarEdit {
    /// An edit that keeps every block in `projection` and adds nothing.
    #[must_use]
    pub fn keep_all(projection: &MonthProjection) -> Self {
        Self {
            room_id: projection.room_id,
            retained_blocks: projection.blocks().into_keys().collect(),
            new_blocks: BTreeSet::new(),
        }
    }
}

/// Turns a [`CalendarEdit`] into an [`OperationPlan`].
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use chrono::NaiveDate;
/// use innkeep::operations::{CalendarEdit, CalendarEditPlan, CalendarProjector};
/// use innkeep::store::MemoryStore;
/// use innkeep::{Month, RoomId};
///
/// let store = MemoryStore::with_rooms(["Garden"]);
/// let july = Month::new(2025, 7).unwrap();
/// let view = CalendarProjector::new(&store).project(RoomId::new(1), july).unwrap();
///
/// let edit = CalendarEdit {
///     room_id: RoomId::new(1),
///     retained_blocks: BTreeSet::new(),
///     new_blocks: [NaiveDate::from_ymd_opt(2025, 7, 4).unwrap()].into(),
/// };
/// let plan = CalendarEditPlan::new(&view, edit).build_plan().unwrap();
/// assert_eq!(plan.len(), 1);
/// ```
#[derive(Debug)]
pub struct CalendarEditPlan<'a> {
    projection: &'a MonthProjection,
    edit: CalendarEdit,
}

impl<'a> CalendarEditPlan<'a> {
    /// Prepares a plan for `edit` against the projection staff were shown.
    #[must_use]
    pub fn new(projection: &'a MonthProjection, edit: CalendarEdit) -> Self {
        Self { projection, edit }
    }

    /// Builds the plan.
    ///
    /// Blocks in the projection that are not retained become removals. New
    /// days become inserts, except days outside the projected window or
    /// already blocked, which are skipped with a warning. Reserved days are
    /// still blocked, with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the edit is for a different room than
    /// the projection.
    pub fn build_plan(&self) -> Result<OperationPlan> {
        let projection = self.projection;
        let room_id = self.edit.room_id;
        if room_id != projection.room_id {
            return Err(Error::Validation {
                field: "room_id".into(),
                message: format!(
                    "edit is for room {room_id} but the calendar shows room {}",
                    projection.room_id
                ),
            });
        }

        let mut plan = OperationPlan::new(format!(
            "Apply calendar edits to room {room_id} for {}..={}",
            projection.first_day, projection.last_day
        ));

        let blocks = projection.blocks();
        for (date, block_id) in &blocks {
            if !self.edit.retained_blocks.contains(date) {
                plan = plan.add_action(PlanAction::RemoveBlock {
                    room_id,
                    block_id: *block_id,
                    date: *date,
                });
            }
        }

        for date in &self.edit.retained_blocks {
            if !blocks.contains_key(date) {
                plan = plan.add_warning(format!("No block on {date} to keep; ignoring"));
            }
        }

        for date in &self.edit.new_blocks {
            match projection.get(*date) {
                None => {
                    plan = plan.add_warning(format!(
                        "{date} is outside the calendar window; not blocking"
                    ));
                }
                Some(DayState::Blocked(_)) => {
                    plan = plan.add_warning(format!("{date} is already blocked"));
                }
                Some(DayState::Reserved(reservation_id)) => {
                    plan = plan
                        .add_warning(format!(
                            "{date} is reserved by reservation {reservation_id}; blocking anyway"
                        ))
                        .add_action(PlanAction::InsertBlock {
                            room_id,
                            date: *date,
                        });
                }
                Some(DayState::Free) => {
                    plan = plan.add_action(PlanAction::InsertBlock {
                        room_id,
                        date: *date,
                    });
                }
            }
        }

        for warning in &plan.warnings {
            warn!("{warning}");
        }
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation::ReservationId;
    use std::collections::BTreeMap;

    fn july(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, day).unwrap()
    }

    fn projection() -> MonthProjection {
        let mut days: BTreeMap<NaiveDate, DayState> =
            (1..=31).map(|d| (july(d), DayState::Free)).collect();
        days.insert(july(4), DayState::Blocked(RestrictionId::new(10)));
        days.insert(july(5), DayState::Blocked(RestrictionId::new(11)));
        days.insert(july(20), DayState::Reserved(ReservationId::new(3)));
        MonthProjection {
            room_id: RoomId::new(1),
            first_day: july(1),
            last_day: july(31),
            days,
        }
    }

    fn edit(retained: &[u32], new: &[u32]) -> CalendarEdit {
        CalendarEdit {
            room_id: RoomId::new(1),
            retained_blocks: retained.iter().map(|d| july(*d)).collect(),
            new_blocks: new.iter().map(|d| july(*d)).collect(),
        }
    }

    #[test]
    fn test_keep_all_is_a_no_op() {
        let view = projection();
        let plan = CalendarEditPlan::new(&view, CalendarEdit::keep_all(&view))
            .build_plan()
            .unwrap();
        assert!(plan.is_empty());
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_unticked_block_is_removed() {
        let view = projection();
        let plan = CalendarEditPlan::new(&view, edit(&[4], &[]))
            .build_plan()
            .unwrap();
        assert_eq!(
            plan.actions,
            vec![PlanAction::RemoveBlock {
                room_id: RoomId::new(1),
                block_id: RestrictionId::new(11),
                date: july(5),
            }]
        );
    }

    #[test]
    fn test_new_blocks_on_free_days() {
        let view = projection();
        let plan = CalendarEditPlan::new(&view, edit(&[4, 5], &[1, 2]))
            .build_plan()
            .unwrap();
        assert_eq!(plan.len(), 2);
        assert!(plan
            .actions
            .iter()
            .all(|a| matches!(a, PlanAction::InsertBlock { .. })));
    }

    #[test]
    fn test_skips_blocked_and_out_of_window_days() {
        let view = projection();
        let mut submitted = edit(&[4, 5], &[4]);
        submitted
            .new_blocks
            .insert(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());

        let plan = CalendarEditPlan::new(&view, submitted).build_plan().unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.warnings.len(), 2);
    }

    #[test]
    fn test_reserved_day_is_blocked_with_warning() {
        let view = projection();
        let plan = CalendarEditPlan::new(&view, edit(&[4, 5], &[20]))
            .build_plan()
            .unwrap();
        assert_eq!(plan.len(), 1);
        assert!(plan.warnings[0].contains("reservation 3"));
    }

    #[test]
    fn test_retaining_a_missing_block_warns() {
        let view = projection();
        let plan = CalendarEditPlan::new(&view, edit(&[4, 5, 9], &[]))
            .build_plan()
            .unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.warnings.len(), 1);
    }

    #[test]
    fn test_room_mismatch_is_rejected() {
        let view = projection();
        let mut submitted = edit(&[], &[]);
        submitted.room_id = RoomId::new(2);
        assert!(matches!(
            CalendarEditPlan::new(&view, submitted).build_plan(),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_action_descriptions() {
        let insert = PlanAction::InsertBlock {
            room_id: RoomId::new(2),
            date: july(4),
        };
        assert_eq!(insert.description(), "Block room 2 on 2025-07-04");

        let remove = PlanAction::RemoveBlock {
            room_id: RoomId::new(2),
            block_id: RestrictionId::new(9),
            date: july(4),
        };
        assert!(remove.description().contains("block 9"));
    }
}
