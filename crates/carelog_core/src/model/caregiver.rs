//! Caregiver record stored under `caregivers`.
//!
//! # Invariants
//! - Records are addressed by stable id ([`ById`]).
//! - `name` is stored as one string. [`Caregiver::compose_name`] joins first
//!   and last name on write; [`Caregiver::split_name`] splits on whitespace on
//!   read and keeps only the first two tokens, so multi-word last names are
//!   truncated.

use crate::model::entity::{CollectionEntity, Patch};
use crate::model::keys::CollectionKey;
use crate::model::locator::{ById, Identified};
use crate::model::new_record_id;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caregiver {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}

impl Caregiver {
    /// Creates an unsaved caregiver from first/last name input.
    pub fn new(first_name: &str, last_name: &str, role: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: Self::compose_name(first_name, last_name),
            email_address: None,
            phone_number: None,
            role: role.into(),
            notes: None,
            image_uri: None,
        }
    }

    /// Joins first and last name with a single space.
    pub fn compose_name(first_name: &str, last_name: &str) -> String {
        let first = first_name.trim();
        let last = last_name.trim();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{first} {last}"),
            (false, true) => first.to_string(),
            (true, false) => last.to_string(),
            (true, true) => String::new(),
        }
    }

    /// Splits the stored name back into `(first, last)`.
    ///
    /// Only the first two whitespace-separated tokens are kept.
    pub fn split_name(&self) -> (String, String) {
        let mut parts = self.name.split_whitespace();
        let first = parts.next().unwrap_or_default().to_string();
        let last = parts.next().unwrap_or_default().to_string();
        (first, last)
    }
}

impl Identified for Caregiver {
    fn id(&self) -> &str {
        &self.id
    }
}

impl CollectionEntity for Caregiver {
    const KEY: CollectionKey = CollectionKey::Caregivers;
    type Locator = ById;
    type Patch = CaregiverPatch;

    fn ensure_id(&mut self) {
        if self.id.trim().is_empty() {
            self.id = new_record_id();
        }
    }
}

/// Field-level update for one caregiver.
///
/// Optional record fields use `Some(None)` to clear and `Some(Some(v))` to set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaregiverPatch {
    pub name: Option<String>,
    pub email_address: Option<Option<String>>,
    pub phone_number: Option<Option<String>>,
    pub role: Option<String>,
    pub notes: Option<Option<String>>,
    pub image_uri: Option<Option<String>>,
}

impl Patch<Caregiver> for CaregiverPatch {
    fn apply_to(self, record: &mut Caregiver) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(email_address) = self.email_address {
            record.email_address = email_address;
        }
        if let Some(phone_number) = self.phone_number {
            record.phone_number = phone_number;
        }
        if let Some(role) = self.role {
            record.role = role;
        }
        if let Some(notes) = self.notes {
            record.notes = notes;
        }
        if let Some(image_uri) = self.image_uri {
            record.image_uri = image_uri;
        }
    }
}
