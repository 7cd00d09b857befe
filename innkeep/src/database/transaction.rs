//! Atomic units of work on the `SQLite` store.
//!
//! The outermost unit opens a `BEGIN IMMEDIATE` transaction so the write lock
//! is taken before any read: two units that check availability and then
//! insert cannot interleave. Nested units use savepoints.

use log::{debug, error};

use crate::error::Result;
use crate::store::Storage;

use super::connection::Database;

const SAVEPOINT: &str = "innkeep_unit";

impl Storage for Database {
    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let outermost = self.conn.is_autocommit();
        let (begin, commit, rollback) = if outermost {
            ("BEGIN IMMEDIATE".to_string(), "COMMIT".to_string(), "ROLLBACK".to_string())
        } else {
            (
                format!("SAVEPOINT {SAVEPOINT}"),
                format!("RELEASE {SAVEPOINT}"),
                format!("ROLLBACK TO {SAVEPOINT}; RELEASE {SAVEPOINT}"),
            )
        };

        self.run(|conn| conn.execute_batch(&begin))?;

        match f(self) {
            Ok(value) => {
                if let Err(e) = self.run(|conn| conn.execute_batch(&commit)) {
                    if let Err(rollback_err) = self.conn.execute_batch(&rollback) {
                        error!("rollback after failed commit also failed: {rollback_err}");
                    }
                    return Err(e);
                }
                Ok(value)
            }
            Err(e) => {
                debug!("rolling back unit: {e}");
                if let Err(rollback_err) = self.conn.execute_batch(&rollback) {
                    error!("rollback failed: {rollback_err}");
                }
                Err(e)
            }
        }
    }
}
