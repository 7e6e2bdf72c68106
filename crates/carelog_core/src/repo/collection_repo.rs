//! Generic collection repository.
//!
//! # Responsibility
//! - Load a collection with default-seeding.
//! - Apply append/update/remove as read-modify-write of the whole array.
//!
//! # Invariants
//! - Defaults are a read-only view of a never-written key. Reading never
//!   persists them and mutations never build on them: the first mutation
//!   starts from an empty list.
//! - The read-modify-write cycle is not locked: two writers racing on the same
//!   key resolve as last-writer-wins.
//! - Removal does not cascade into other collections.

use crate::codec::{load_collection, save_collection, StoreResult};
use crate::kv::KvStore;
use crate::model::entity::{CollectionEntity, Patch};
use crate::model::locator::Locate;
use log::{error, info};
use std::time::Instant;

/// Typed access to one collection key.
pub struct CollectionRepository<'kv, E: CollectionEntity> {
    kv: &'kv dyn KvStore,
    defaults: Vec<E>,
}

impl<'kv, E: CollectionEntity> CollectionRepository<'kv, E> {
    /// Repository whose never-written key reads back as an empty list.
    pub fn new(kv: &'kv dyn KvStore) -> Self {
        Self::with_defaults(kv, Vec::new())
    }

    /// Repository whose never-written key reads back as `defaults`.
    pub fn with_defaults(kv: &'kv dyn KvStore, defaults: Vec<E>) -> Self {
        Self { kv, defaults }
    }

    /// Storage key backing this repository.
    pub fn key(&self) -> &'static str {
        E::KEY.as_str()
    }

    /// Read-time defaults for a never-written key.
    pub fn defaults(&self) -> &[E] {
        &self.defaults
    }

    /// Loads every record in stored order.
    pub fn load_all(&self) -> StoreResult<Vec<E>> {
        load_collection(self.kv, self.key(), &self.defaults).map_err(|err| {
            error!(
                "event=collection_load module=repo status=error key={} error={err}",
                self.key()
            );
            err
        })
    }

    /// Loads the stored records only, ignoring read-time defaults.
    fn load_stored(&self) -> StoreResult<Vec<E>> {
        load_collection(self.kv, self.key(), &[]).map_err(|err| {
            error!(
                "event=collection_load module=repo status=error key={} error={err}",
                self.key()
            );
            err
        })
    }

    /// Returns the addressed record, if any.
    pub fn find(&self, locator: &E::Locator) -> StoreResult<Option<E>> {
        let records = self.load_all()?;
        Ok(locator
            .position(&records)
            .map(|position| records[position].clone()))
    }

    /// Appends one record, assigning an id when it has none.
    pub fn append(&self, mut record: E) -> StoreResult<Vec<E>> {
        record.ensure_id();
        let mut records = self.load_stored()?;
        records.push(record);
        self.write("append", records)
    }

    /// Applies `patch` to the addressed record.
    ///
    /// Returns the current collection unchanged, without writing, when the
    /// locator matches no stored record.
    pub fn update_at(&self, locator: &E::Locator, patch: E::Patch) -> StoreResult<Vec<E>> {
        let mut records = self.load_stored()?;
        let Some(position) = locator.position(&records) else {
            self.log_noop("update", <E::Locator as Locate<E>>::mode(locator));
            return self.load_all();
        };
        patch.apply_to(&mut records[position]);
        self.write("update", records)
    }

    /// Removes the addressed record.
    ///
    /// Returns the current collection unchanged, without writing, when the
    /// locator matches no stored record (for example a second delete of the
    /// same row).
    pub fn remove_at(&self, locator: &E::Locator) -> StoreResult<Vec<E>> {
        let mut records = self.load_stored()?;
        let Some(position) = locator.position(&records) else {
            self.log_noop("remove", <E::Locator as Locate<E>>::mode(locator));
            return self.load_all();
        };
        records.remove(position);
        self.write("remove", records)
    }

    /// Persists a caller's whole in-memory copy of the collection.
    pub fn save_all(&self, records: Vec<E>) -> StoreResult<Vec<E>> {
        self.write("save_all", records)
    }

    fn write(&self, op: &'static str, records: Vec<E>) -> StoreResult<Vec<E>> {
        let started_at = Instant::now();
        match save_collection(self.kv, self.key(), &records) {
            Ok(()) => {
                info!(
                    "event=collection_write module=repo status=ok key={} op={op} count={} duration_ms={}",
                    self.key(),
                    records.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(records)
            }
            Err(err) => {
                error!(
                    "event=collection_write module=repo status=error key={} op={op} duration_ms={} error={err}",
                    self.key(),
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }

    fn log_noop(&self, op: &'static str, mode: &'static str) {
        info!(
            "event=collection_write module=repo status=noop key={} op={op} locator={mode} reason=not_found",
            self.key()
        );
    }
}
