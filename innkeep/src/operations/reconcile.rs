//! Repair of inconsistent reservation and restriction rows.
//!
//! Two kinds of damage are possible:
//!
//! - an orphaned reservation has no restriction, left behind when a booking
//!   failed after its first write
//! - a dangling restriction points at a reservation that no longer exists,
//!   left behind by a non-cascading delete
//!
//! Dangling restrictions are always removed. Orphans are handled per
//! [`OrphanStrategy`].

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::reservation::ReservationId;
use crate::restriction::{NewRestriction, RestrictionId};
use crate::store::{ReservationFilter, Storage};

/// What to do with a reservation that has no restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanStrategy {
    /// Write the missing restriction if the room is still free.
    #[default]
    Restore,
    /// Delete the reservation.
    Remove,
}

impl FromStr for OrphanStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "restore" => Ok(Self::Restore),
            "remove" => Ok(Self::Remove),
            other => Err(Error::Validation {
                field: "orphan_strategy".into(),
                message: format!("unknown strategy '{other}', expected 'restore' or 'remove'"),
            }),
        }
    }
}

impl fmt::Display for OrphanStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Restore => write!(f, "restore"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// What reconciliation found and did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Reservations without a restriction.
    pub orphaned_reservations: Vec<ReservationId>,
    /// Restrictions whose reservation is gone.
    pub dangling_restrictions: Vec<RestrictionId>,
    /// Orphans whose restriction was written back.
    pub restored: Vec<ReservationId>,
    /// Orphans that were deleted.
    pub removed_reservations: Vec<ReservationId>,
    /// Dangling restrictions that were deleted.
    pub removed_restrictions: Vec<RestrictionId>,
    /// Orphans that could not be restored because the room is now taken.
    pub conflicts: Vec<ReservationId>,
}

impl ReconcileReport {
    /// Returns `true` if no damage was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.orphaned_reservations.is_empty() && self.dangling_restrictions.is_empty()
    }
}

/// Finds and repairs orphaned reservations and dangling restrictions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler;

impl Reconciler {
    /// Scans `store` and, unless `dry_run`, repairs what it finds in one
    /// atomic unit.
    ///
    /// # Errors
    ///
    /// Returns a storage error if any read or write fails; no repair is
    /// kept in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::operations::{BookingTransaction, OrphanStrategy, Reconciler};
    /// use innkeep::store::MemoryStore;
    /// use innkeep::{DateRange, Guest, Reservation, RoomId};
    ///
    /// let mut store = MemoryStore::with_rooms(["Garden"]);
    /// store.fail_restriction_insert_for(RoomId::new(1));
    /// let stay = DateRange::parse("2025-06-01", "2025-06-03").unwrap();
    /// let guest = Guest::new("Ada", "Lovelace", "ada@example.com", "");
    /// let reservation = Reservation::builder(guest, RoomId::new(1), stay).build();
    /// assert!(BookingTransaction::new(&mut store).book(&reservation).is_err());
    ///
    /// store.clear_faults();
    /// let report = Reconciler::reconcile(&mut store, OrphanStrategy::Restore, false).unwrap();
    /// assert_eq!(report.restored.len(), 1);
    /// ```
    pub fn reconcile<S: Storage>(
        store: &mut S,
        strategy: OrphanStrategy,
        dry_run: bool,
    ) -> Result<ReconcileReport> {
        let reservations = store.list_reservations(ReservationFilter::All)?;
        let restrictions = store.all_restrictions()?;

        let existing: HashSet<ReservationId> =
            reservations.iter().filter_map(|r| r.id()).collect();
        let covered: HashSet<ReservationId> = restrictions
            .iter()
            .filter_map(|r| r.reservation_id)
            .collect();

        let orphans: Vec<_> = reservations
            .iter()
            .filter(|r| r.id().is_some_and(|id| !covered.contains(&id)))
            .cloned()
            .collect();
        let dangling: Vec<RestrictionId> = restrictions
            .iter()
            .filter(|r| r.reservation_id.is_some_and(|id| !existing.contains(&id)))
            .map(|r| r.id)
            .collect();

        let mut report = ReconcileReport {
            dry_run,
            orphaned_reservations: orphans.iter().filter_map(|r| r.id()).collect(),
            dangling_restrictions: dangling.clone(),
            ..ReconcileReport::default()
        };

        if report.is_clean() {
            info!("reconcile: no orphaned reservations or dangling restrictions");
            return Ok(report);
        }
        if dry_run {
            info!(
                "reconcile dry run: {} orphan(s), {} dangling restriction(s)",
                report.orphaned_reservations.len(),
                report.dangling_restrictions.len()
            );
            return Ok(report);
        }

        report = store.atomically(|store| {
            let mut report = report;

            // Dangling rows go first so they cannot block a restore
            for id in &dangling {
                if store.delete_restriction(*id)? {
                    report.removed_restrictions.push(*id);
                }
            }

            for reservation in &orphans {
                let Some(id) = reservation.id() else { continue };
                match strategy {
                    OrphanStrategy::Restore => {
                        let restriction = NewRestriction::for_reservation(
                            id,
                            reservation.room_id(),
                            reservation.stay(),
                        );
                        match store.insert_restriction(&restriction) {
                            Ok(_) => report.restored.push(id),
                            Err(Error::RoomUnavailable { room_id, range }) => {
                                warn!(
                                    "cannot restore reservation {id}: room {room_id} is taken for {range}"
                                );
                                report.conflicts.push(id);
                            }
                            Err(e) => return Err(e),
                        }
                    }
                    OrphanStrategy::Remove => {
                        if store.delete_reservation(id)? {
                            report.removed_reservations.push(id);
                        }
                    }
                }
            }
            Ok(report)
        })?;

        info!(
            "reconcile: restored {}, removed {} reservation(s) and {} restriction(s), {} conflict(s)",
            report.restored.len(),
            report.removed_reservations.len(),
            report.removed_restrictions.len(),
            report.conflicts.len()
        );
        Ok(report)
    }
}
