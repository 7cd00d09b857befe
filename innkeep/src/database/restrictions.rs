//! Room restriction operations on the `SQLite` store.

use std::time::SystemTime;

use log::{debug, warn};
use rusqlite::{params, OptionalExtension};

use crate::dates::DateRange;
use crate::error::{Error, Result};
use crate::reservation::ReservationId;
use crate::restriction::{
    reservation_ref, NewRestriction, RestrictionId, RestrictionKind, RoomRestriction,
};
use crate::room::RoomId;
use crate::store::RestrictionStore;

use super::connection::{is_overlap_abort, Database};
use super::operations::{date_column, date_to_sql, systemtime_to_unix_secs};

const RESTRICTION_COLUMNS: &str =
    "id, start_date, end_date, room_id, reservation_id, restriction_id";

const INSERT_RESTRICTION: &str = r"
    INSERT INTO room_restrictions
    (start_date, end_date, room_id, reservation_id, restriction_id, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";

/// Expects the columns of [`RESTRICTION_COLUMNS`] in order.
fn row_to_restriction(row: &rusqlite::Row<'_>) -> rusqlite::Result<RoomRestriction> {
    let reservation_id = reservation_ref(row.get(4)?);
    let code: i64 = row.get(5)?;
    // Legacy rows may carry other markers; the reservation link decides.
    let kind = RestrictionKind::from_code(code).unwrap_or(if reservation_id.is_some() {
        RestrictionKind::Reservation
    } else {
        RestrictionKind::Block
    });

    Ok(RoomRestriction {
        id: RestrictionId::new(row.get(0)?),
        range: DateRange::new(date_column(row, 1)?, date_column(row, 2)?),
        room_id: RoomId::new(row.get(3)?),
        reservation_id,
        kind,
    })
}

impl Database {
    fn query_restrictions(
        &self,
        predicate: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<RoomRestriction>> {
        let sql =
            format!("SELECT {RESTRICTION_COLUMNS} FROM room_restrictions {predicate} ORDER BY id");
        self.run(|conn| {
            conn.prepare(&sql)?
                .query_map(params, row_to_restriction)?
                .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()
        })
    }
}

impl RestrictionStore for Database {
    fn insert_restriction(&mut self, restriction: &NewRestriction) -> Result<RestrictionId> {
        let now = systemtime_to_unix_secs(SystemTime::now())?;
        let result = self.conn.execute(
            INSERT_RESTRICTION,
            params![
                date_to_sql(restriction.range.start()),
                date_to_sql(restriction.range.end()),
                restriction.room_id.value(),
                restriction.reservation_id.map(ReservationId::value),
                restriction.kind.code(),
                now,
                now,
            ],
        );

        match result {
            Ok(_) => {
                let id = RestrictionId::new(self.conn.last_insert_rowid());
                debug!(
                    "inserted {} restriction {id} on room {} ({})",
                    restriction.kind, restriction.room_id, restriction.range
                );
                Ok(id)
            }
            Err(e) if is_overlap_abort(&e) => {
                warn!(
                    "room {} already restricted during {}",
                    restriction.room_id, restriction.range
                );
                Err(Error::RoomUnavailable {
                    room_id: restriction.room_id,
                    range: restriction.range,
                })
            }
            Err(e) => Err(self.classify(e)),
        }
    }

    fn get_restriction(&self, id: RestrictionId) -> Result<Option<RoomRestriction>> {
        let sql = format!("SELECT {RESTRICTION_COLUMNS} FROM room_restrictions WHERE id = ?");
        self.run(|conn| {
            conn.query_row(&sql, [id.value()], row_to_restriction)
                .optional()
        })
    }

    fn overlapping_restrictions(
        &self,
        room_id: Option<RoomId>,
        range: &DateRange,
    ) -> Result<Vec<RoomRestriction>> {
        let start = date_to_sql(range.start());
        let end = date_to_sql(range.end());
        match room_id {
            Some(room) => self.query_restrictions(
                "WHERE room_id = ?1 AND start_date < ?3 AND end_date > ?2",
                params![room.value(), start, end],
            ),
            None => self.query_restrictions(
                "WHERE start_date < ?2 AND end_date > ?1",
                params![start, end],
            ),
        }
    }

    fn restrictions_for_reservation(&self, id: ReservationId) -> Result<Vec<RoomRestriction>> {
        self.query_restrictions("WHERE reservation_id = ?", [id.value()])
    }

    fn all_restrictions(&self) -> Result<Vec<RoomRestriction>> {
        self.query_restrictions("", [])
    }

    fn delete_restriction(&mut self, id: RestrictionId) -> Result<bool> {
        let rows = self.run(|conn| {
            conn.execute("DELETE FROM room_restrictions WHERE id = ?", [id.value()])
        })?;
        Ok(rows > 0)
    }

    fn delete_restrictions_for_reservation(&mut self, id: ReservationId) -> Result<usize> {
        self.run(|conn| {
            conn.execute(
                "DELETE FROM room_restrictions WHERE reservation_id = ?",
                [id.value()],
            )
        })
    }
}
