//! Writes that create, change or remove reservations and blocks.
//!
//! [`BookingTransaction::book`] is the plain two-step write: reservation row
//! first, restriction row second. If the second step fails the reservation
//! stays persisted and the caller gets [`Error::PartialBooking`].
//! [`BookingTransaction::book_exclusive`] re-checks availability and performs
//! both writes inside one atomic unit.

use chrono::NaiveDate;
use log::{error, info, warn};

use crate::dates::DateRange;
use crate::error::{Error, Result};
use crate::reservation::{Guest, ProcessingStatus, Reservation, ReservationId};
use crate::restriction::{NewRestriction, RestrictionId};
use crate::room::RoomId;
use crate::store::Storage;

use super::availability::AvailabilityEngine;

/// Booking and staff edit operations over a [`Storage`].
///
/// # Examples
///
/// ```
/// use innkeep::operations::{AvailabilityEngine, BookingTransaction};
/// use innkeep::store::MemoryStore;
/// use innkeep::{DateRange, Guest, Reservation, RoomId};
///
/// let mut store = MemoryStore::with_rooms(["Garden"]);
/// let stay = DateRange::parse("2025-06-01", "2025-06-04").unwrap();
/// let guest = Guest::new("Ada", "Lovelace", "ada@example.com", "");
/// let reservation = Reservation::builder(guest, RoomId::new(1), stay).build();
///
/// BookingTransaction::new(&mut store).book_exclusive(&reservation).unwrap();
///
/// let engine = AvailabilityEngine::new(&store);
/// assert!(!engine.is_room_free(RoomId::new(1), &stay).unwrap());
/// ```
#[derive(Debug)]
pub struct BookingTransaction<'a, S> {
    store: &'a mut S,
}

impl<'a, S: Storage> BookingTransaction<'a, S> {
    /// Creates a transaction writing to `store`.
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Inserts the reservation, then its restriction.
    ///
    /// Availability is not checked here; callers check first. The
    /// restriction insert is only attempted once the reservation exists.
    ///
    /// # Errors
    ///
    /// - The reservation insert's error, unchanged, if step one fails
    /// - [`Error::PartialBooking`] if step two fails; the reservation row
    ///   remains and needs reconciliation
    pub fn book(&mut self, reservation: &Reservation) -> Result<ReservationId> {
        let id = self.store.insert_reservation(reservation)?;

        let restriction =
            NewRestriction::for_reservation(id, reservation.room_id(), reservation.stay());
        if let Err(source) = self.store.insert_restriction(&restriction) {
            error!(
                "reservation {id} saved but restriction for room {} failed: {source}",
                reservation.room_id()
            );
            return Err(Error::PartialBooking {
                reservation_id: id,
                source: Box::new(source),
            });
        }

        info!(
            "booked reservation {id}: room {} for {}",
            reservation.room_id(),
            reservation.stay()
        );
        Ok(id)
    }

    /// Checks availability and books in one atomic unit.
    ///
    /// Nothing is persisted unless both rows are written.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the stay is empty or inverted
    /// - [`Error::NotFound`] if the room does not exist
    /// - [`Error::RoomUnavailable`] if the room is taken for any of the nights
    /// - a storage error if any read or write fails
    pub fn book_exclusive(&mut self, reservation: &Reservation) -> Result<ReservationId> {
        let room_id = reservation.room_id();
        let stay = reservation.stay();
        if stay.is_empty() {
            return Err(Error::Validation {
                field: "end".into(),
                message: format!("stay {stay} must cover at least one night"),
            });
        }

        let id = self.store.atomically(|store| {
            if store.get_room(room_id)?.is_none() {
                return Err(Error::NotFound {
                    resource: format!("room {room_id}"),
                });
            }

            if !AvailabilityEngine::new(&*store).is_room_free(room_id, &stay)? {
                warn!("room {room_id} is not available for {stay}");
                return Err(Error::RoomUnavailable {
                    room_id,
                    range: stay,
                });
            }

            let id = store.insert_reservation(reservation)?;
            store.insert_restriction(&NewRestriction::for_reservation(id, room_id, stay))?;
            Ok(id)
        })?;

        info!("booked reservation {id}: room {room_id} for {stay}");
        Ok(id)
    }

    /// Blocks `room_id` for the single night starting on `date`.
    ///
    /// A room carries at most one block per day.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the room is already blocked on `date`, or
    ///   `date` is the last supported date
    /// - a storage error if the read or write fails
    pub fn insert_block(&mut self, room_id: RoomId, date: NaiveDate) -> Result<RestrictionId> {
        let night = DateRange::checked_single_day(date)?;
        let id = self.store.atomically(|store| {
            let existing = store
                .overlapping_restrictions(Some(room_id), &night)?
                .into_iter()
                .find(|r| r.reservation_id.is_none() && r.range.start() == date);
            if let Some(block) = existing {
                return Err(Error::Validation {
                    field: "date".into(),
                    message: format!(
                        "room {room_id} is already blocked on {date} (block {})",
                        block.id
                    ),
                });
            }
            store.insert_restriction(&NewRestriction::block(room_id, date))
        })?;
        info!("blocked room {room_id} on {date} (block {id})");
        Ok(id)
    }

    /// Removes a manual block. Returns `false` if no such restriction exists.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the id names a reservation-derived restriction
    /// - a storage error if the read or delete fails
    pub fn remove_block(&mut self, block_id: RestrictionId) -> Result<bool> {
        let Some(restriction) = self.store.get_restriction(block_id)? else {
            return Ok(false);
        };

        if let Some(owner) = restriction.reservation_id {
            return Err(Error::Validation {
                field: "block_id".into(),
                message: format!(
                    "restriction {block_id} belongs to reservation {owner}; cancel the reservation instead"
                ),
            });
        }

        let removed = self.store.delete_restriction(block_id)?;
        if removed {
            info!("removed block {block_id} on room {}", restriction.room_id);
        }
        Ok(removed)
    }

    /// Hard-deletes a reservation. Its restriction rows are left in place.
    ///
    /// Use [`BookingTransaction::cancel_reservation`] to remove both.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the delete fails.
    pub fn delete_reservation(&mut self, id: ReservationId) -> Result<bool> {
        let removed = self.store.delete_reservation(id)?;
        if removed {
            info!("deleted reservation {id}; its restrictions remain");
        }
        Ok(removed)
    }

    /// Deletes a reservation and its restrictions atomically.
    ///
    /// Returns the number of restrictions removed.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the reservation does not exist
    /// - a storage error if any delete fails
    pub fn cancel_reservation(&mut self, id: ReservationId) -> Result<usize> {
        let released = self.store.atomically(|store| {
            if !store.delete_reservation(id)? {
                return Err(Error::NotFound {
                    resource: format!("reservation {id}"),
                });
            }
            store.delete_restrictions_for_reservation(id)
        })?;
        info!("cancelled reservation {id}, released {released} restriction(s)");
        Ok(released)
    }

    /// Replaces the guest details of a reservation.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the reservation does not exist
    /// - a storage error if the write fails
    pub fn update_guest(&mut self, id: ReservationId, guest: &Guest) -> Result<()> {
        if !self.store.update_guest(id, guest)? {
            return Err(Error::NotFound {
                resource: format!("reservation {id}"),
            });
        }
        info!("updated guest details on reservation {id}");
        Ok(())
    }

    /// Marks a reservation as processed by staff.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the reservation does not exist
    /// - a storage error if the write fails
    pub fn mark_processed(&mut self, id: ReservationId) -> Result<()> {
        if !self.store.set_status(id, ProcessingStatus::Processed)? {
            return Err(Error::NotFound {
                resource: format!("reservation {id}"),
            });
        }
        info!("marked reservation {id} processed");
        Ok(())
    }
}
