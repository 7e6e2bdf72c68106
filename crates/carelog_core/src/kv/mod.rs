//! Key-value substrate: the only physical persistence primitive.
//!
//! # Responsibility
//! - Get/set/remove opaque UTF-8 string values by string key.
//! - Surface storage failures as errors instead of swallowing them.
//!
//! # Invariants
//! - Each operation is individually atomic; there is no multi-key transaction.
//! - Writes on one store are serialized by the store's internal lock. A
//!   caller's read-modify-write cycle is not, so concurrent writers to the
//!   same key resolve as last-writer-wins.
//! - Values are never logged; events carry key names and byte lengths only.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory_kv;
mod sqlite_kv;

pub use memory_kv::MemoryKvStore;
pub use sqlite_kv::SqliteKvStore;

pub type KvResult<T> = Result<T, KvError>;

/// Storage-level failure from a key-value substrate.
#[derive(Debug)]
pub enum KvError {
    /// Backing database failed to open, bootstrap, read or write.
    Db(DbError),
    /// A previous holder of the store lock panicked mid-operation.
    LockPoisoned,
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "storage failure: {err}"),
            Self::LockPoisoned => write!(f, "storage lock poisoned by an earlier panic"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::LockPoisoned => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Contract shared by every key-value backend.
pub trait KvStore: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written
    /// (or has been removed).
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> KvResult<()>;
    /// Removes `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> KvResult<()>;
    /// Lists every stored key in ascending order.
    fn keys(&self) -> KvResult<Vec<String>>;
    /// Removes every key.
    fn clear(&self) -> KvResult<()>;
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> KvResult<Vec<String>> {
        (**self).keys()
    }

    fn clear(&self) -> KvResult<()> {
        (**self).clear()
    }
}
