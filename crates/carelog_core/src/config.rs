//! Store configuration resolved from the process environment.
//!
//! # Responsibility
//! - Decide where the on-device database file lives.
//! - Decide whether first-run reads are seeded with sample records.
//!
//! # Invariants
//! - Resolution never fails; unusable values fall back to defaults.

use std::path::PathBuf;

/// Environment variable overriding the database file location.
pub const DB_PATH_ENV: &str = "CARELOG_DB_PATH";
/// Environment variable toggling sample-data defaults (`"false"` disables).
pub const SEED_SAMPLES_ENV: &str = "CARELOG_SEED_SAMPLES";

const DEFAULT_DB_FILE_NAME: &str = "carelog.sqlite3";

/// Runtime configuration for opening a [`crate::JournalStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite file backing the key-value substrate.
    pub db_path: PathBuf,
    /// When `true`, never-written medication/caregiver keys read back as
    /// sample records instead of an empty list.
    pub seed_sample_data: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            seed_sample_data: true,
        }
    }
}

impl StoreConfig {
    /// Resolves configuration from `CARELOG_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(DB_PATH_ENV) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                config.db_path = PathBuf::from(trimmed);
            }
        }

        if let Some(raw) = lookup(SEED_SAMPLES_ENV) {
            config.seed_sample_data = !raw.trim().eq_ignore_ascii_case("false");
        }

        config
    }
}
