//! Journal domain model stored in the key-value substrate.
//!
//! # Responsibility
//! - Define the record shapes stored under collection keys.
//! - Define the typed key names and per-collection locators.
//!
//! # Invariants
//! - Serialized field names are camelCase and must stay byte-compatible with
//!   data already on the device.
//! - Deletion is destructive; there are no tombstones.

pub mod caregiver;
pub mod entity;
pub mod keys;
pub mod locator;
pub mod medication;
pub mod metric;

use uuid::Uuid;

/// Generates a fresh record identifier.
pub(crate) fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}
