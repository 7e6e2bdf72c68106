//! SQLite-backed key-value store.
//!
//! One `kv_entries` row per key. Survives process restarts when opened on a
//! file path.

use super::{KvError, KvResult, KvStore};
use crate::db::{open_db, open_db_in_memory};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Key-value store persisted in a single SQLite table.
pub struct SqliteKvStore {
    conn: Mutex<Connection>,
}

impl SqliteKvStore {
    /// Opens (or creates) the store file at `path`.
    pub fn open(path: impl AsRef<Path>) -> KvResult<Self> {
        let conn = open_db(path)?;
        Ok(Self::from_connection(conn))
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> KvResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self::from_connection(conn))
    }

    /// Wraps a connection already bootstrapped through [`open_db`].
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> KvResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            error!("event=kv_lock module=kv status=error error_code=lock_poisoned");
            KvError::LockPoisoned
        })
    }
}

impl KvStore for SqliteKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|err| log_failure("kv_get", key, err))?;
        debug!(
            "event=kv_get module=kv status=ok key={key} present={}",
            value.is_some()
        );
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )
        .map_err(|err| log_failure("kv_set", key, err))?;
        debug!(
            "event=kv_set module=kv status=ok key={key} bytes={}",
            value.len()
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        let conn = self.lock()?;
        let changed = conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])
            .map_err(|err| log_failure("kv_remove", key, err))?;
        debug!("event=kv_remove module=kv status=ok key={key} existed={}", changed > 0);
        Ok(())
    }

    fn keys(&self) -> KvResult<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT key FROM kv_entries ORDER BY key ASC;")?;
        let mut rows = stmt.query([])?;
        let mut keys = Vec::new();
        while let Some(row) = rows.next()? {
            keys.push(row.get(0)?);
        }
        Ok(keys)
    }

    fn clear(&self) -> KvResult<()> {
        let conn = self.lock()?;
        let removed = conn
            .execute("DELETE FROM kv_entries;", [])
            .map_err(|err| log_failure("kv_clear", "*", err))?;
        debug!("event=kv_clear module=kv status=ok removed={removed}");
        Ok(())
    }
}

fn log_failure(event: &str, key: &str, err: rusqlite::Error) -> KvError {
    error!("event={event} module=kv status=error key={key} error={err}");
    err.into()
}
