//! Core persistence layer for CareLog.
//! This crate owns every read and write against the device-local store.

pub mod codec;
pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use codec::{StoreError, StoreResult};
pub use config::StoreConfig;
pub use kv::{KvError, KvResult, KvStore, MemoryKvStore, SqliteKvStore};
pub use logging::init_logging;
pub use model::caregiver::{Caregiver, CaregiverPatch};
pub use model::entity::{CollectionEntity, Patch};
pub use model::keys::{CollectionKey, ScalarKey};
pub use model::locator::{ById, ByIndex, Identified, Locate};
pub use model::medication::{DoseUnit, Medication, MedicationPatch};
pub use model::metric::{Metric, MetricDetails, MetricPatch};
pub use repo::collection_repo::CollectionRepository;
pub use service::journal_service::JournalStore;
pub use service::profile_service::{
    NotificationSettings, ProfileService, SeizureDefaults, UserProfile,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
