//! Medication record stored under `medications`.
//!
//! # Invariants
//! - `id` is unique within the collection once assigned.
//! - Records are addressed by position ([`ByIndex`]), matching how the
//!   medication list and edit screens refer to rows.

use crate::model::entity::{CollectionEntity, Patch};
use crate::model::keys::CollectionKey;
use crate::model::locator::{ByIndex, Identified};
use crate::model::new_record_id;
use serde::{Deserialize, Serialize};

/// Unit the dosage is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoseUnit {
    Mg,
    Ml,
}

impl DoseUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mg => "mg",
            Self::Ml => "ml",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "mg" => Some(Self::Mg),
            "ml" => Some(Self::Ml),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredMedication")]
pub struct Medication {
    /// Empty until first persisted through `append`.
    pub id: String,
    /// Older entries stored this under `medication`; it is read from either
    /// and always written back as `name`.
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<DoseUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Decoding shape accepting both the current `name` and the legacy
/// `medication` field. `name` wins when both are present.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredMedication {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    medication: Option<String>,
    #[serde(default)]
    dosage: String,
    #[serde(default)]
    frequency: String,
    #[serde(default)]
    unit: Option<DoseUnit>,
    #[serde(default)]
    notes: Option<String>,
}

impl TryFrom<StoredMedication> for Medication {
    type Error = &'static str;

    fn try_from(value: StoredMedication) -> Result<Self, Self::Error> {
        let name = value.name.or(value.medication).ok_or("missing field `name`")?;
        Ok(Self {
            id: value.id,
            name,
            dosage: value.dosage,
            frequency: value.frequency,
            unit: value.unit,
            notes: value.notes,
        })
    }
}

impl Medication {
    /// Creates an unsaved medication without unit or notes.
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
            unit: None,
            notes: None,
        }
    }

    pub fn with_unit(mut self, unit: DoseUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl Identified for Medication {
    fn id(&self) -> &str {
        &self.id
    }
}

impl CollectionEntity for Medication {
    const KEY: CollectionKey = CollectionKey::Medications;
    type Locator = ByIndex;
    type Patch = MedicationPatch;

    fn ensure_id(&mut self) {
        if self.id.trim().is_empty() {
            self.id = new_record_id();
        }
    }
}

/// Field-level update for one medication.
///
/// Optional record fields use `Some(None)` to clear and `Some(Some(v))` to set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicationPatch {
    pub name: Option<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub unit: Option<Option<DoseUnit>>,
    pub notes: Option<Option<String>>,
}

impl MedicationPatch {
    pub fn dosage(value: impl Into<String>) -> Self {
        Self {
            dosage: Some(value.into()),
            ..Self::default()
        }
    }
}

impl Patch<Medication> for MedicationPatch {
    fn apply_to(self, record: &mut Medication) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(dosage) = self.dosage {
            record.dosage = dosage;
        }
        if let Some(frequency) = self.frequency {
            record.frequency = frequency;
        }
        if let Some(unit) = self.unit {
            record.unit = unit;
        }
        if let Some(notes) = self.notes {
            record.notes = notes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DoseUnit, Medication, MedicationPatch};
    use crate::model::entity::{CollectionEntity, Patch};

    #[test]
    fn legacy_medication_field_reads_as_name() {
        let parsed: Medication = serde_json::from_str(
            r#"{"id":"1700000000000","medication":"Keppra","dosage":"10","frequency":"4x/day","unit":"mg"}"#,
        )
        .unwrap();
        assert_eq!(parsed.name, "Keppra");
        assert_eq!(parsed.unit, Some(DoseUnit::Mg));

        let encoded = serde_json::to_string(&parsed).unwrap();
        assert!(encoded.contains(r#""name":"Keppra""#));
        assert!(!encoded.contains("notes"));
    }

    #[test]
    fn record_with_both_name_fields_prefers_name() {
        let parsed: Vec<Medication> = serde_json::from_str(
            r#"[{"id":"1","name":"Keppra XR","medication":"Keppra","dosage":"10mg","frequency":"4x/day"}]"#,
        )
        .unwrap();
        assert_eq!(parsed[0].name, "Keppra XR");

        let encoded = serde_json::to_string(&parsed).unwrap();
        assert!(!encoded.contains("\"medication\""));
    }

    #[test]
    fn record_without_any_name_is_rejected() {
        let raw = r#"{"id":"1","dosage":"10mg"}"#;
        let err = serde_json::from_str::<Medication>(raw).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn ensure_id_keeps_existing_and_fills_blank() {
        let mut existing = Medication::new("Vimpat", "20mg", "2x/day");
        existing.id = "2".to_string();
        existing.ensure_id();
        assert_eq!(existing.id, "2");

        let mut fresh = Medication::new("Vimpat", "20mg", "2x/day");
        fresh.ensure_id();
        assert!(!fresh.id.is_empty());
    }

    #[test]
    fn patch_touches_only_carried_fields() {
        let mut record = Medication::new("Keppra", "10mg", "4x/day").with_notes("with food");
        MedicationPatch {
            unit: Some(Some(DoseUnit::Ml)),
            notes: Some(None),
            ..MedicationPatch::dosage("20mg")
        }
        .apply_to(&mut record);

        assert_eq!(record.name, "Keppra");
        assert_eq!(record.dosage, "20mg");
        assert_eq!(record.frequency, "4x/day");
        assert_eq!(record.unit, Some(DoseUnit::Ml));
        assert_eq!(record.notes, None);
    }
}
