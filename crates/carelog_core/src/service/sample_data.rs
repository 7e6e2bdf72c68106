//! Placeholder records returned for never-written collection keys.
//!
//! A fresh install reads these instead of an empty list. They are read-time
//! defaults only and reach storage solely through the first mutation of the
//! collection. `StoreConfig::seed_sample_data = false` disables them.

use crate::model::caregiver::Caregiver;
use crate::model::medication::{DoseUnit, Medication};

pub fn sample_medications() -> Vec<Medication> {
    vec![
        Medication {
            id: "1".to_string(),
            name: "Lamotrigine".to_string(),
            dosage: "100".to_string(),
            frequency: "2x/day".to_string(),
            unit: Some(DoseUnit::Mg),
            notes: Some("Take with breakfast and dinner".to_string()),
        },
        Medication {
            id: "2".to_string(),
            name: "Clobazam".to_string(),
            dosage: "5".to_string(),
            frequency: "1x/day".to_string(),
            unit: Some(DoseUnit::Ml),
            notes: None,
        },
    ]
}

pub fn sample_caregivers() -> Vec<Caregiver> {
    vec![
        Caregiver {
            id: "1".to_string(),
            name: "Jane Doe".to_string(),
            email_address: Some("jane.doe@example.com".to_string()),
            phone_number: Some("555-0100".to_string()),
            role: "Parent".to_string(),
            notes: None,
            image_uri: None,
        },
        Caregiver {
            id: "2".to_string(),
            name: "John Smith".to_string(),
            email_address: Some("dr.smith@example.com".to_string()),
            phone_number: Some("555-0199".to_string()),
            role: "Neurologist".to_string(),
            notes: Some("Clinic visits every 3 months".to_string()),
            image_uri: None,
        },
    ]
}
