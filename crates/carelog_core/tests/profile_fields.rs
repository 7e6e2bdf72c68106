use carelog_core::{
    JournalStore, KvStore, MemoryKvStore, NotificationSettings, ProfileService, ScalarKey,
    SeizureDefaults, UserProfile,
};

#[test]
fn reminder_flag_round_trips_through_string_field() {
    let kv = MemoryKvStore::new();
    let profile = ProfileService::new(&kv);

    profile
        .set_field(ScalarKey::MedicationReminders, "true")
        .unwrap();
    assert_eq!(
        profile
            .get_field(ScalarKey::MedicationReminders, "false")
            .unwrap(),
        "true"
    );
    assert!(profile
        .get_flag(ScalarKey::MedicationReminders, false)
        .unwrap());

    profile
        .set_field(ScalarKey::MedicationReminders, "yes")
        .unwrap();
    assert!(!profile
        .get_flag(ScalarKey::MedicationReminders, false)
        .unwrap());
}

#[test]
fn set_flag_writes_literal_strings() {
    let kv = MemoryKvStore::new();
    let profile = ProfileService::new(&kv);

    profile.set_flag(ScalarKey::SurveyReminders, true).unwrap();
    assert_eq!(kv.get("surveyReminders").unwrap().as_deref(), Some("true"));
    profile.set_flag(ScalarKey::SurveyReminders, false).unwrap();
    assert_eq!(kv.get("surveyReminders").unwrap().as_deref(), Some("false"));
}

#[test]
fn fields_are_stored_verbatim_without_validation() {
    let kv = MemoryKvStore::new();
    let profile = ProfileService::new(&kv);

    profile.set_field(ScalarKey::Email, "not an email").unwrap();
    profile.set_field(ScalarKey::Phone, "\"quoted\"").unwrap();
    assert_eq!(kv.get("email").unwrap().as_deref(), Some("not an email"));
    assert_eq!(kv.get("phone").unwrap().as_deref(), Some("\"quoted\""));
}

#[test]
fn snapshots_read_and_write_independent_slots() {
    let kv = MemoryKvStore::with_entries([("name", "Alex"), ("seizureUnit", "minutes")]);
    let profile = ProfileService::new(&kv);

    let loaded = profile.load_user_profile().unwrap();
    assert_eq!(
        loaded,
        UserProfile {
            name: "Alex".to_string(),
            ..UserProfile::default()
        }
    );

    let defaults = SeizureDefaults {
        kind: "Epilepsy".to_string(),
        seizure_type: "Focal aware".to_string(),
        frequency: "2".to_string(),
        unit: "per week".to_string(),
        duration: "30s".to_string(),
    };
    profile.save_seizure_defaults(&defaults).unwrap();
    assert_eq!(profile.load_seizure_defaults().unwrap(), defaults);
    assert_eq!(kv.get("type").unwrap().as_deref(), Some("Epilepsy"));
    assert_eq!(kv.get("seizureUnit").unwrap().as_deref(), Some("per week"));

    let settings = NotificationSettings {
        medication_reminders: true,
        survey_reminders: false,
    };
    profile.save_notification_settings(settings).unwrap();
    assert_eq!(profile.load_notification_settings().unwrap(), settings);
}

#[test]
fn onboarding_flag_uses_at_prefixed_key() {
    let store = JournalStore::new(MemoryKvStore::new(), false);
    assert!(!store.profile().has_completed_onboarding().unwrap());

    store.profile().mark_onboarding_complete().unwrap();
    assert!(store.profile().has_completed_onboarding().unwrap());
    assert_eq!(
        store.kv().get("@completedOnboarding").unwrap().as_deref(),
        Some("true")
    );
}

#[test]
fn singular_caregiver_slot_is_independent_of_collection() {
    let store = JournalStore::new(MemoryKvStore::new(), true);
    store
        .profile()
        .set_field(ScalarKey::Caregiver, "Someone Else")
        .unwrap();

    let caregivers = store.caregivers().load_all().unwrap();
    assert_ne!(caregivers[0].name, "Someone Else");
    assert_eq!(
        store.profile().get_field(ScalarKey::Caregiver, "").unwrap(),
        "Someone Else"
    );
    assert!(store.kv().get("caregivers").unwrap().is_none());
}
