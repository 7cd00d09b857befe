//! Room and reservation operations on the `SQLite` store.

use std::time::{Duration, SystemTime};

use chrono::NaiveDate;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};

use crate::dates::{DateRange, DATE_FORMAT};
use crate::error::{Error, Result};
use crate::reservation::{Guest, ProcessingStatus, Reservation, ReservationId};
use crate::room::{Room, RoomId};
use crate::store::{ReservationFilter, ReservationStore, RoomStore};

use super::connection::Database;

/// Converts a `SystemTime` to Unix seconds for storage.
///
/// # Errors
///
/// Returns an error if the time is before the Unix epoch.
#[allow(clippy::cast_possible_wrap)]
pub(super) fn systemtime_to_unix_secs(time: SystemTime) -> Result<i64> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| Error::Validation {
            field: "timestamp".into(),
            message: format!("invalid timestamp: {e}"),
        })
        .map(|d| d.as_secs() as i64)
}

/// Converts stored Unix seconds to a `SystemTime`.
#[allow(clippy::cast_sign_loss)]
pub(super) fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

pub(super) fn date_to_sql(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Reads an ISO date column.
pub(super) fn date_column(row: &rusqlite::Row<'_>, index: usize) -> rusqlite::Result<NaiveDate> {
    let text: String = row.get(index)?;
    NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Expects: id, `room_name`, `created_at`, `updated_at`
fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    Ok(Room {
        id: RoomId::new(row.get(0)?),
        name: row.get(1)?,
        created_at: unix_secs_to_systemtime(row.get(2)?),
        updated_at: unix_secs_to_systemtime(row.get(3)?),
    })
}

/// Expects the columns of [`RESERVATION_COLUMNS`] in order.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let guest = Guest {
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
    };
    let stay = DateRange::new(date_column(row, 5)?, date_column(row, 6)?);

    Ok(Reservation::builder(guest, RoomId::new(row.get(7)?), stay)
        .id(ReservationId::new(row.get(0)?))
        .status(ProcessingStatus::from_code(row.get(8)?))
        .created_at(unix_secs_to_systemtime(row.get(9)?))
        .updated_at(unix_secs_to_systemtime(row.get(10)?))
        .build())
}

const RESERVATION_COLUMNS: &str = "id, first_name, last_name, email, phone, start_date, \
     end_date, room_id, processed, created_at, updated_at";

const SELECT_ROOMS: &str = "SELECT id, room_name, created_at, updated_at FROM rooms ORDER BY id";

const SELECT_ROOM: &str = "SELECT id, room_name, created_at, updated_at FROM rooms WHERE id = ?";

const INSERT_ROOM: &str =
    "INSERT INTO rooms (room_name, created_at, updated_at) VALUES (?, ?, ?)";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (first_name, last_name, email, phone, start_date, end_date, room_id, processed,
     created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const UPDATE_GUEST: &str = r"
    UPDATE reservations
    SET first_name = ?, last_name = ?, email = ?, phone = ?, updated_at = ?
    WHERE id = ?
";

const UPDATE_PROCESSED: &str =
    "UPDATE reservations SET processed = ?, updated_at = ? WHERE id = ?";

const DELETE_RESERVATION: &str = "DELETE FROM reservations WHERE id = ?";

impl Database {
    /// Runs a closure against the connection, classifying any failure.
    pub(super) fn run<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T> {
        f(&self.conn).map_err(|e| self.classify(e))
    }

    /// Adds a room to the catalog and returns its id.
    ///
    /// Rooms are reference data; this exists for seeding a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_room(&mut self, name: &str) -> Result<RoomId> {
        let now = systemtime_to_unix_secs(SystemTime::now())?;
        let id = self.run(|conn| {
            conn.execute(INSERT_ROOM, params![name, now, now])?;
            Ok(conn.last_insert_rowid())
        })?;
        info!("added room {id} ({name})");
        Ok(RoomId::new(id))
    }

    /// Runs `PRAGMA integrity_check`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseCorruption`] if the check reports problems.
    pub fn verify_integrity(&self) -> Result<()> {
        let result: String =
            self.run(|conn| conn.query_row("PRAGMA integrity_check", [], |row| row.get(0)))?;

        if result == "ok" {
            Ok(())
        } else {
            Err(Error::DatabaseCorruption {
                details: format!("integrity check failed: {result}"),
            })
        }
    }
}

impl RoomStore for Database {
    fn all_rooms(&self) -> Result<Vec<Room>> {
        self.run(|conn| {
            conn.prepare(SELECT_ROOMS)?
                .query_map([], row_to_room)?
                .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()
        })
    }

    fn get_room(&self, id: RoomId) -> Result<Option<Room>> {
        self.run(|conn| {
            conn.query_row(SELECT_ROOM, [id.value()], row_to_room)
                .optional()
        })
    }
}

impl ReservationStore for Database {
    fn insert_reservation(&mut self, reservation: &Reservation) -> Result<ReservationId> {
        let created = systemtime_to_unix_secs(reservation.created_at())?;
        let updated = systemtime_to_unix_secs(reservation.updated_at())?;
        let guest = reservation.guest();
        let stay = reservation.stay();

        let id = self.run(|conn| {
            conn.execute(
                INSERT_RESERVATION,
                params![
                    guest.first_name,
                    guest.last_name,
                    guest.email,
                    guest.phone,
                    date_to_sql(stay.start()),
                    date_to_sql(stay.end()),
                    reservation.room_id().value(),
                    reservation.status().code(),
                    created,
                    updated,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        debug!(
            "inserted reservation {id} for room {} ({stay})",
            reservation.room_id()
        );
        Ok(ReservationId::new(id))
    }

    fn get_reservation(&self, id: ReservationId) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?");
        self.run(|conn| {
            conn.query_row(&sql, [id.value()], row_to_reservation)
                .optional()
        })
    }

    fn list_reservations(&self, filter: ReservationFilter) -> Result<Vec<Reservation>> {
        let predicate = match filter {
            ReservationFilter::All => "",
            ReservationFilter::New => "WHERE processed = 0",
        };
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations {predicate} ORDER BY start_date, id"
        );
        self.run(|conn| {
            conn.prepare(&sql)?
                .query_map([], row_to_reservation)?
                .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()
        })
    }

    fn update_guest(&mut self, id: ReservationId, guest: &Guest) -> Result<bool> {
        let now = systemtime_to_unix_secs(SystemTime::now())?;
        let rows = self.run(|conn| {
            conn.execute(
                UPDATE_GUEST,
                params![
                    guest.first_name,
                    guest.last_name,
                    guest.email,
                    guest.phone,
                    now,
                    id.value()
                ],
            )
        })?;
        Ok(rows > 0)
    }

    fn set_status(&mut self, id: ReservationId, status: ProcessingStatus) -> Result<bool> {
        let now = systemtime_to_unix_secs(SystemTime::now())?;
        let rows = self.run(|conn| {
            conn.execute(UPDATE_PROCESSED, params![status.code(), now, id.value()])
        })?;
        Ok(rows > 0)
    }

    fn delete_reservation(&mut self, id: ReservationId) -> Result<bool> {
        let rows = self.run(|conn| conn.execute(DELETE_RESERVATION, [id.value()]))?;
        Ok(rows > 0)
    }
}
