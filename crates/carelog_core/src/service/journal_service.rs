//! Journal store facade.
//!
//! # Responsibility
//! - Own one key-value backend and hand out typed repositories over it.
//! - Apply the sample-data default policy per collection.
//!
//! # Invariants
//! - Repositories are cheap views; they hold no state besides defaults, so
//!   screens reload simply by calling `load_all` again.

use crate::codec::StoreResult;
use crate::config::StoreConfig;
use crate::kv::{KvStore, SqliteKvStore};
use crate::model::caregiver::Caregiver;
use crate::model::medication::Medication;
use crate::model::metric::Metric;
use crate::repo::collection_repo::CollectionRepository;
use crate::service::profile_service::ProfileService;
use crate::service::sample_data::{sample_caregivers, sample_medications};
use log::info;

/// Entry point used by screens (through FFI) to reach journal data.
pub struct JournalStore<S: KvStore> {
    kv: S,
    seed_sample_data: bool,
}

impl JournalStore<SqliteKvStore> {
    /// Opens the SQLite-backed store described by `config`.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let kv = SqliteKvStore::open(&config.db_path)?;
        info!(
            "event=journal_open module=core status=ok seed_sample_data={}",
            config.seed_sample_data
        );
        Ok(Self::new(kv, config.seed_sample_data))
    }
}

impl<S: KvStore> JournalStore<S> {
    pub fn new(kv: S, seed_sample_data: bool) -> Self {
        Self {
            kv,
            seed_sample_data,
        }
    }

    /// Medications, addressed by index.
    pub fn medications(&self) -> CollectionRepository<'_, Medication> {
        let defaults = if self.seed_sample_data {
            sample_medications()
        } else {
            Vec::new()
        };
        CollectionRepository::with_defaults(&self.kv, defaults)
    }

    /// Caregivers, addressed by id.
    pub fn caregivers(&self) -> CollectionRepository<'_, Caregiver> {
        let defaults = if self.seed_sample_data {
            sample_caregivers()
        } else {
            Vec::new()
        };
        CollectionRepository::with_defaults(&self.kv, defaults)
    }

    /// Tracked metrics, addressed by index. Never seeded.
    pub fn metrics(&self) -> CollectionRepository<'_, Metric> {
        CollectionRepository::new(&self.kv)
    }

    /// Scalar profile and settings slots.
    pub fn profile(&self) -> ProfileService<'_> {
        ProfileService::new(&self.kv)
    }

    /// Removes every stored key, returning the store to first-run state.
    pub fn reset(&self) -> StoreResult<()> {
        self.kv.clear()?;
        info!("event=journal_reset module=core status=ok");
        Ok(())
    }

    /// Underlying key-value backend.
    pub fn kv(&self) -> &S {
        &self.kv
    }
}

#[cfg(test)]
mod tests {
    use super::JournalStore;
    use crate::kv::{KvStore, MemoryKvStore};
    use crate::model::medication::Medication;
    use crate::service::sample_data::{sample_caregivers, sample_medications};

    #[test]
    fn seeded_store_reads_samples_without_persisting_them() {
        let store = JournalStore::new(MemoryKvStore::new(), true);
        assert_eq!(store.medications().load_all().unwrap(), sample_medications());
        assert_eq!(store.caregivers().load_all().unwrap(), sample_caregivers());
        assert!(store.metrics().load_all().unwrap().is_empty());
        assert!(store.kv().keys().unwrap().is_empty());
    }

    #[test]
    fn unseeded_store_reads_empty_collections() {
        let store = JournalStore::new(MemoryKvStore::new(), false);
        assert!(store.medications().load_all().unwrap().is_empty());
        assert!(store.caregivers().load_all().unwrap().is_empty());
    }

    #[test]
    fn reset_returns_to_first_run_state() {
        let store = JournalStore::new(MemoryKvStore::new(), true);
        store
            .medications()
            .append(Medication::new("Keppra", "10mg", "4x/day"))
            .unwrap();
        assert_eq!(store.medications().load_all().unwrap().len(), 1);

        store.reset().unwrap();
        assert_eq!(store.medications().load_all().unwrap(), sample_medications());
    }
}
