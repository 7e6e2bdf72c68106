//! Scalar field accessors for profile and settings slots.
//!
//! # Responsibility
//! - Get/set individual named scalar fields by [`ScalarKey`].
//! - Group related slots into read/write snapshots for screens.
//!
//! # Invariants
//! - No validation: any string is accepted for any slot.
//! - Snapshot loads and saves touch each slot independently; there is no
//!   multi-key atomicity.
//! - Flags decode to `true` only for the exact literal `"true"`.

use crate::codec::{decode_flag, encode_flag, load_scalar, StoreError, StoreResult};
use crate::kv::KvStore;
use crate::model::keys::ScalarKey;
use log::{debug, error};

/// Personal details captured during onboarding and on the profile screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub preferred_name: String,
    pub sex: String,
    pub email: String,
    pub phone: String,
}

/// Defaults pre-filled into a new seizure log entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeizureDefaults {
    /// Stored under the bare `type` key.
    pub kind: String,
    pub seizure_type: String,
    pub frequency: String,
    pub unit: String,
    pub duration: String,
}

/// Reminder toggles from the settings screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationSettings {
    pub medication_reminders: bool,
    pub survey_reminders: bool,
}

/// Accessor over scalar slots of one store.
pub struct ProfileService<'kv> {
    kv: &'kv dyn KvStore,
}

impl<'kv> ProfileService<'kv> {
    pub fn new(kv: &'kv dyn KvStore) -> Self {
        Self { kv }
    }

    /// Returns the stored value, or `default` when the slot was never written.
    pub fn get_field(&self, key: ScalarKey, default: &str) -> StoreResult<String> {
        load_scalar(self.kv, key.as_str(), default)
    }

    /// Stores `value` verbatim.
    pub fn set_field(&self, key: ScalarKey, value: &str) -> StoreResult<()> {
        self.kv
            .set(key.as_str(), value)
            .map_err(|err| log_failure("field_set", key, err.into()))?;
        debug!("event=field_set module=profile status=ok key={}", key.as_str());
        Ok(())
    }

    /// Clears the slot so later reads fall back to their default.
    pub fn remove_field(&self, key: ScalarKey) -> StoreResult<()> {
        self.kv
            .remove(key.as_str())
            .map_err(|err| log_failure("field_remove", key, err.into()))?;
        Ok(())
    }

    /// Reads a `"true"`/`"false"` slot; `default` applies only when absent.
    pub fn get_flag(&self, key: ScalarKey, default: bool) -> StoreResult<bool> {
        Ok(match self.kv.get(key.as_str())? {
            Some(raw) => decode_flag(&raw),
            None => default,
        })
    }

    pub fn set_flag(&self, key: ScalarKey, value: bool) -> StoreResult<()> {
        self.set_field(key, encode_flag(value))
    }

    pub fn load_user_profile(&self) -> StoreResult<UserProfile> {
        Ok(UserProfile {
            name: self.get_field(ScalarKey::Name, "")?,
            preferred_name: self.get_field(ScalarKey::PreferredName, "")?,
            sex: self.get_field(ScalarKey::Sex, "")?,
            email: self.get_field(ScalarKey::Email, "")?,
            phone: self.get_field(ScalarKey::Phone, "")?,
        })
    }

    pub fn save_user_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        self.set_field(ScalarKey::Name, &profile.name)?;
        self.set_field(ScalarKey::PreferredName, &profile.preferred_name)?;
        self.set_field(ScalarKey::Sex, &profile.sex)?;
        self.set_field(ScalarKey::Email, &profile.email)?;
        self.set_field(ScalarKey::Phone, &profile.phone)
    }

    pub fn load_seizure_defaults(&self) -> StoreResult<SeizureDefaults> {
        Ok(SeizureDefaults {
            kind: self.get_field(ScalarKey::Type, "")?,
            seizure_type: self.get_field(ScalarKey::SeizureType, "")?,
            frequency: self.get_field(ScalarKey::SeizureFrequency, "")?,
            unit: self.get_field(ScalarKey::SeizureUnit, "")?,
            duration: self.get_field(ScalarKey::SeizureDuration, "")?,
        })
    }

    pub fn save_seizure_defaults(&self, defaults: &SeizureDefaults) -> StoreResult<()> {
        self.set_field(ScalarKey::Type, &defaults.kind)?;
        self.set_field(ScalarKey::SeizureType, &defaults.seizure_type)?;
        self.set_field(ScalarKey::SeizureFrequency, &defaults.frequency)?;
        self.set_field(ScalarKey::SeizureUnit, &defaults.unit)?;
        self.set_field(ScalarKey::SeizureDuration, &defaults.duration)
    }

    /// Missing toggles read as off.
    pub fn load_notification_settings(&self) -> StoreResult<NotificationSettings> {
        Ok(NotificationSettings {
            medication_reminders: self.get_flag(ScalarKey::MedicationReminders, false)?,
            survey_reminders: self.get_flag(ScalarKey::SurveyReminders, false)?,
        })
    }

    pub fn save_notification_settings(&self, settings: NotificationSettings) -> StoreResult<()> {
        self.set_flag(ScalarKey::MedicationReminders, settings.medication_reminders)?;
        self.set_flag(ScalarKey::SurveyReminders, settings.survey_reminders)
    }

    pub fn has_completed_onboarding(&self) -> StoreResult<bool> {
        self.get_flag(ScalarKey::CompletedOnboarding, false)
    }

    pub fn mark_onboarding_complete(&self) -> StoreResult<()> {
        self.set_flag(ScalarKey::CompletedOnboarding, true)
    }
}

fn log_failure(event: &str, key: ScalarKey, err: StoreError) -> StoreError {
    error!(
        "event={event} module=profile status=error key={} error={err}",
        key.as_str()
    );
    err
}
