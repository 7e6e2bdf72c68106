//! Storage key names.
//!
//! These strings are the on-device protocol: renaming one orphans existing
//! data.

/// Keys whose value is a JSON array of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Medications,
    Caregivers,
    Metrics,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 3] = [Self::Medications, Self::Caregivers, Self::Metrics];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Medications => "medications",
            Self::Caregivers => "caregivers",
            Self::Metrics => "myMetrics",
        }
    }
}

/// Keys whose value is a single plain-text primitive.
///
/// `Caregiver` (singular) and the `Medication`/`Dosage`/`Frequency` slots are
/// independent of the `caregivers`/`medications` collections and are never
/// reconciled with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKey {
    Name,
    PreferredName,
    Sex,
    Email,
    Phone,
    Password,
    Caregiver,
    Type,
    SeizureType,
    SeizureFrequency,
    SeizureUnit,
    SeizureDuration,
    MedicationReminders,
    SurveyReminders,
    CompletedOnboarding,
    Medication,
    Dosage,
    Frequency,
}

impl ScalarKey {
    pub const ALL: [ScalarKey; 18] = [
        Self::Name,
        Self::PreferredName,
        Self::Sex,
        Self::Email,
        Self::Phone,
        Self::Password,
        Self::Caregiver,
        Self::Type,
        Self::SeizureType,
        Self::SeizureFrequency,
        Self::SeizureUnit,
        Self::SeizureDuration,
        Self::MedicationReminders,
        Self::SurveyReminders,
        Self::CompletedOnboarding,
        Self::Medication,
        Self::Dosage,
        Self::Frequency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PreferredName => "preferredName",
            Self::Sex => "sex",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Password => "password",
            Self::Caregiver => "caregiver",
            Self::Type => "type",
            Self::SeizureType => "seizureType",
            Self::SeizureFrequency => "seizureFrequency",
            Self::SeizureUnit => "seizureUnit",
            Self::SeizureDuration => "seizureDuration",
            Self::MedicationReminders => "medicationReminders",
            Self::SurveyReminders => "surveyReminders",
            Self::CompletedOnboarding => "@completedOnboarding",
            Self::Medication => "medication",
            Self::Dosage => "dosage",
            Self::Frequency => "frequency",
        }
    }

    /// Resolves a stored key name. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == value)
    }

    /// Whether the slot holds a `"true"`/`"false"` flag.
    pub fn is_flag(self) -> bool {
        matches!(
            self,
            Self::MedicationReminders | Self::SurveyReminders | Self::CompletedOnboarding
        )
    }
}
