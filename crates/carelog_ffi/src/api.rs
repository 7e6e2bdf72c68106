//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose collection and scalar-field operations to Dart via FRB.
//! - Translate core records into flat FFI items and core errors into
//!   response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Data functions are not `sync`: FRB runs them off the UI thread and Dart
//!   awaits them as futures.
//! - Every mutation returns the full post-operation collection so screens
//!   re-render from the response without a second read.

use carelog_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ById, ByIndex, Caregiver, CaregiverPatch, DoseUnit, JournalStore, KvStore, Medication,
    MedicationPatch, Metric, MetricPatch, ScalarKey, SqliteKvStore, StoreConfig, StoreError,
};
use log::warn;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

static STORE_CONFIG: OnceLock<StoreConfig> = OnceLock::new();

type ApiResult<T> = Result<T, ApiError>;

/// Failure of one use-case call, reported to Dart as an `ok=false` envelope.
#[derive(Debug)]
enum ApiError {
    /// Caller input that cannot be stored as-is.
    InvalidInput(String),
    Store(StoreError),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Medication row as seen by Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationItem {
    /// Empty on input lets core assign an id.
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    /// `mg` or `ml`; `None` or `""` for no unit. Anything else is rejected.
    pub unit: Option<String>,
    pub notes: Option<String>,
}

/// Partial medication update. For `unit` and `notes`, `Some("")` clears.
///
/// A `unit` other than `mg`, `ml` or `""` rejects the whole update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicationPatchItem {
    pub name: Option<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub unit: Option<String>,
    pub notes: Option<String>,
}

/// Caregiver row as seen by Dart, with the stored name split in two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaregiverItem {
    /// Empty on input lets core assign an id.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub role: String,
    pub notes: Option<String>,
    pub image_uri: Option<String>,
}

/// Partial caregiver update. For optional fields, `Some("")` clears.
///
/// Supplying only `first_name` replaces the first word of the stored name and
/// keeps everything after it. Supplying only `last_name` keeps the first word
/// and replaces the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaregiverPatchItem {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<String>,
    pub notes: Option<String>,
    pub image_uri: Option<String>,
}

/// Metric as seen by Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricItem {
    pub name: String,
    /// JSON object with the extra fields of a custom metric; `None` for a
    /// plain catalog metric. Anything but a JSON object is rejected.
    pub fields_json: Option<String>,
}

/// Partial metric update.
///
/// `fields_json` is a JSON object merged into the metric's extra fields; a
/// plain catalog metric becomes a custom one when it gains fields. Anything
/// but a JSON object rejects the whole update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricPatchItem {
    pub name: Option<String>,
    pub fields_json: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationListResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<MedicationItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaregiverListResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<CaregiverItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricListResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<MetricItem>,
}

/// Scalar field read result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldResponse {
    pub ok: bool,
    pub message: String,
    /// Stored value, or the caller's default when the slot is empty or on
    /// failure.
    pub value: String,
}

/// Flag read result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagResponse {
    pub ok: bool,
    pub message: String,
    pub value: bool,
}

/// Generic write result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
}

macro_rules! list_response {
    ($response:ident, $item:ty) => {
        impl $response {
            fn from_result(operation: &str, result: Result<Vec<$item>, String>) -> Self {
                match result {
                    Ok(items) => Self {
                        ok: true,
                        message: format!("{} record(s).", items.len()),
                        items,
                    },
                    Err(err) => {
                        warn!("event=ffi_call module=ffi status=error op={operation}");
                        Self {
                            ok: false,
                            message: format!("{operation} failed: {err}"),
                            items: Vec::new(),
                        }
                    }
                }
            }
        }
    };
}

list_response!(MedicationListResponse, MedicationItem);
list_response!(CaregiverListResponse, CaregiverItem);
list_response!(MetricListResponse, MetricItem);

impl ActionResponse {
    fn from_result(operation: &str, result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self {
                ok: true,
                message: String::new(),
            },
            Err(err) => {
                warn!("event=ffi_call module=ffi status=error op={operation}");
                Self {
                    ok: false,
                    message: format!("{operation} failed: {err}"),
                }
            }
        }
    }
}

/// Loads every medication in stored order.
pub fn medications_load_all() -> MedicationListResponse {
    MedicationListResponse::from_result(
        "medications_load_all",
        with_journal(|store| medications_load_all_in(store)),
    )
}

/// Appends one medication; an empty `id` is assigned by core.
pub fn medications_append(item: MedicationItem) -> MedicationListResponse {
    MedicationListResponse::from_result(
        "medications_append",
        with_journal(|store| medications_append_in(store, item)),
    )
}

/// Patches the medication at zero-based `index`. Out-of-range is a no-op.
pub fn medications_update_at(index: u32, patch: MedicationPatchItem) -> MedicationListResponse {
    MedicationListResponse::from_result(
        "medications_update_at",
        with_journal(|store| medications_update_at_in(store, index, patch)),
    )
}

/// Removes the medication at zero-based `index`. Out-of-range is a no-op.
pub fn medications_remove_at(index: u32) -> MedicationListResponse {
    MedicationListResponse::from_result(
        "medications_remove_at",
        with_journal(|store| medications_remove_at_in(store, index)),
    )
}

pub fn caregivers_load_all() -> CaregiverListResponse {
    CaregiverListResponse::from_result(
        "caregivers_load_all",
        with_journal(|store| caregivers_load_all_in(store)),
    )
}

pub fn caregivers_append(item: CaregiverItem) -> CaregiverListResponse {
    CaregiverListResponse::from_result(
        "caregivers_append",
        with_journal(|store| caregivers_append_in(store, item)),
    )
}

/// Patches the caregiver with stable `id`. Unknown ids are a no-op.
pub fn caregivers_update_at(id: String, patch: CaregiverPatchItem) -> CaregiverListResponse {
    CaregiverListResponse::from_result(
        "caregivers_update_at",
        with_journal(|store| caregivers_update_at_in(store, id, patch)),
    )
}

/// Removes the caregiver with stable `id`. Unknown ids are a no-op.
pub fn caregivers_remove_at(id: String) -> CaregiverListResponse {
    CaregiverListResponse::from_result(
        "caregivers_remove_at",
        with_journal(|store| caregivers_remove_at_in(store, id)),
    )
}

pub fn metrics_load_all() -> MetricListResponse {
    MetricListResponse::from_result(
        "metrics_load_all",
        with_journal(|store| metrics_load_all_in(store)),
    )
}

pub fn metrics_append(item: MetricItem) -> MetricListResponse {
    MetricListResponse::from_result(
        "metrics_append",
        with_journal(|store| metrics_append_in(store, item)),
    )
}

/// Patches the metric at zero-based `index`. Out-of-range is a no-op.
pub fn metrics_update_at(index: u32, patch: MetricPatchItem) -> MetricListResponse {
    MetricListResponse::from_result(
        "metrics_update_at",
        with_journal(|store| metrics_update_at_in(store, index, patch)),
    )
}

pub fn metrics_remove_at(index: u32) -> MetricListResponse {
    MetricListResponse::from_result(
        "metrics_remove_at",
        with_journal(|store| metrics_remove_at_in(store, index)),
    )
}

/// Reads one scalar slot by its stored key name (for example `seizureType`).
pub fn profile_get_field(key: String, default_value: String) -> FieldResponse {
    let result = parse_scalar_key(&key).and_then(|key| {
        with_journal(|store| store.profile().get_field(key, &default_value))
    });
    match result {
        Ok(value) => FieldResponse {
            ok: true,
            message: String::new(),
            value,
        },
        Err(err) => FieldResponse {
            ok: false,
            message: format!("profile_get_field failed: {err}"),
            value: default_value,
        },
    }
}

/// Writes one scalar slot verbatim.
pub fn profile_set_field(key: String, value: String) -> ActionResponse {
    let result = parse_scalar_key(&key)
        .and_then(|key| with_journal(|store| store.profile().set_field(key, &value)));
    ActionResponse::from_result("profile_set_field", result)
}

/// Reads a `"true"`/`"false"` slot.
pub fn settings_get_flag(key: String, default_value: bool) -> FlagResponse {
    let result = parse_scalar_key(&key)
        .and_then(|key| with_journal(|store| store.profile().get_flag(key, default_value)));
    match result {
        Ok(value) => FlagResponse {
            ok: true,
            message: String::new(),
            value,
        },
        Err(err) => FlagResponse {
            ok: false,
            message: format!("settings_get_flag failed: {err}"),
            value: default_value,
        },
    }
}

pub fn settings_set_flag(key: String, value: bool) -> ActionResponse {
    let result = parse_scalar_key(&key)
        .and_then(|key| with_journal(|store| store.profile().set_flag(key, value)));
    ActionResponse::from_result("settings_set_flag", result)
}

/// Erases every stored key (sign-out / start over).
pub fn journal_reset() -> ActionResponse {
    ActionResponse::from_result("journal_reset", with_journal(|store| store.reset()))
}

fn resolve_store_config() -> &'static StoreConfig {
    STORE_CONFIG.get_or_init(StoreConfig::from_env)
}

fn with_journal<T, E: Display>(
    f: impl FnOnce(&JournalStore<SqliteKvStore>) -> Result<T, E>,
) -> Result<T, String> {
    let store = JournalStore::open(resolve_store_config())
        .map_err(|err| format!("journal open failed: {err}"))?;
    f(&store).map_err(|err| err.to_string())
}

fn parse_scalar_key(key: &str) -> Result<ScalarKey, String> {
    ScalarKey::parse(key).ok_or_else(|| format!("unknown field key `{key}`"))
}

fn medications_load_all_in<S: KvStore>(store: &JournalStore<S>) -> ApiResult<Vec<MedicationItem>> {
    Ok(to_medication_items(store.medications().load_all()?))
}

fn medications_append_in<S: KvStore>(
    store: &JournalStore<S>,
    item: MedicationItem,
) -> ApiResult<Vec<MedicationItem>> {
    let unit = match item.unit.as_deref() {
        None | Some("") => None,
        Some(unit) => Some(parse_unit(unit)?),
    };
    let record = Medication {
        id: item.id,
        name: item.name,
        dosage: item.dosage,
        frequency: item.frequency,
        unit,
        notes: non_empty(item.notes),
    };
    Ok(to_medication_items(store.medications().append(record)?))
}

fn medications_update_at_in<S: KvStore>(
    store: &JournalStore<S>,
    index: u32,
    patch: MedicationPatchItem,
) -> ApiResult<Vec<MedicationItem>> {
    let unit = match clearable(patch.unit) {
        Some(Some(unit)) => Some(Some(parse_unit(&unit)?)),
        Some(None) => Some(None),
        None => None,
    };
    let patch = MedicationPatch {
        name: patch.name,
        dosage: patch.dosage,
        frequency: patch.frequency,
        unit,
        notes: clearable(patch.notes),
    };
    let records = store
        .medications()
        .update_at(&ByIndex(index as usize), patch)?;
    Ok(to_medication_items(records))
}

fn medications_remove_at_in<S: KvStore>(
    store: &JournalStore<S>,
    index: u32,
) -> ApiResult<Vec<MedicationItem>> {
    let records = store.medications().remove_at(&ByIndex(index as usize))?;
    Ok(to_medication_items(records))
}

fn caregivers_load_all_in<S: KvStore>(store: &JournalStore<S>) -> ApiResult<Vec<CaregiverItem>> {
    Ok(to_caregiver_items(store.caregivers().load_all()?))
}

fn caregivers_append_in<S: KvStore>(
    store: &JournalStore<S>,
    item: CaregiverItem,
) -> ApiResult<Vec<CaregiverItem>> {
    let record = Caregiver {
        id: item.id,
        name: Caregiver::compose_name(&item.first_name, &item.last_name),
        email_address: non_empty(item.email_address),
        phone_number: non_empty(item.phone_number),
        role: item.role,
        notes: non_empty(item.notes),
        image_uri: non_empty(item.image_uri),
    };
    Ok(to_caregiver_items(store.caregivers().append(record)?))
}

fn caregivers_update_at_in<S: KvStore>(
    store: &JournalStore<S>,
    id: String,
    patch: CaregiverPatchItem,
) -> ApiResult<Vec<CaregiverItem>> {
    let repo = store.caregivers();
    let locator = ById::new(id);

    let name = match (patch.first_name, patch.last_name) {
        (None, None) => None,
        (first, last) => {
            let (current_first, current_rest) = repo
                .find(&locator)?
                .map(|caregiver| first_word_and_rest(&caregiver.name))
                .unwrap_or_default();
            Some(Caregiver::compose_name(
                &first.unwrap_or(current_first),
                &last.unwrap_or(current_rest),
            ))
        }
    };

    let patch = CaregiverPatch {
        name,
        email_address: clearable(patch.email_address),
        phone_number: clearable(patch.phone_number),
        role: patch.role,
        notes: clearable(patch.notes),
        image_uri: clearable(patch.image_uri),
    };
    Ok(to_caregiver_items(repo.update_at(&locator, patch)?))
}

fn caregivers_remove_at_in<S: KvStore>(
    store: &JournalStore<S>,
    id: String,
) -> ApiResult<Vec<CaregiverItem>> {
    let records = store.caregivers().remove_at(&ById::new(id))?;
    Ok(to_caregiver_items(records))
}

fn metrics_load_all_in<S: KvStore>(store: &JournalStore<S>) -> ApiResult<Vec<MetricItem>> {
    Ok(to_metric_items(store.metrics().load_all()?))
}

fn metrics_append_in<S: KvStore>(
    store: &JournalStore<S>,
    item: MetricItem,
) -> ApiResult<Vec<MetricItem>> {
    let metric = match item.fields_json.as_deref() {
        Some(raw) => Metric::detailed(item.name, parse_fields(raw)?),
        None => Metric::named(item.name),
    };
    Ok(to_metric_items(store.metrics().append(metric)?))
}

fn metrics_update_at_in<S: KvStore>(
    store: &JournalStore<S>,
    index: u32,
    patch: MetricPatchItem,
) -> ApiResult<Vec<MetricItem>> {
    let fields = match patch.fields_json.as_deref() {
        Some(raw) => parse_fields(raw)?,
        None => Map::new(),
    };
    let patch = MetricPatch {
        name: patch.name,
        fields,
    };
    let records = store
        .metrics()
        .update_at(&ByIndex(index as usize), patch)?;
    Ok(to_metric_items(records))
}

fn metrics_remove_at_in<S: KvStore>(
    store: &JournalStore<S>,
    index: u32,
) -> ApiResult<Vec<MetricItem>> {
    let records = store.metrics().remove_at(&ByIndex(index as usize))?;
    Ok(to_metric_items(records))
}

fn to_medication_items(records: Vec<Medication>) -> Vec<MedicationItem> {
    records
        .into_iter()
        .map(|record| MedicationItem {
            id: record.id,
            name: record.name,
            dosage: record.dosage,
            frequency: record.frequency,
            unit: record.unit.map(|unit| unit.as_str().to_string()),
            notes: record.notes,
        })
        .collect()
}

fn to_caregiver_items(records: Vec<Caregiver>) -> Vec<CaregiverItem> {
    records
        .into_iter()
        .map(|record| {
            let (first_name, last_name) = record.split_name();
            CaregiverItem {
                id: record.id,
                first_name,
                last_name,
                email_address: record.email_address,
                phone_number: record.phone_number,
                role: record.role,
                notes: record.notes,
                image_uri: record.image_uri,
            }
        })
        .collect()
}

fn to_metric_items(records: Vec<Metric>) -> Vec<MetricItem> {
    records
        .into_iter()
        .map(|record| match record {
            Metric::Named(name) => MetricItem {
                name,
                fields_json: None,
            },
            Metric::Detailed(details) => MetricItem {
                name: details.name,
                fields_json: Some(Value::Object(details.extra).to_string()),
            },
        })
        .collect()
}

fn parse_unit(value: &str) -> ApiResult<DoseUnit> {
    DoseUnit::parse(value).ok_or_else(|| {
        ApiError::InvalidInput(format!("unsupported unit `{value}`; expected mg|ml"))
    })
}

fn parse_fields(raw: &str) -> ApiResult<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(ApiError::InvalidInput("fields_json must be a JSON object".to_string())),
        Err(err) => Err(ApiError::InvalidInput(format!("fields_json is not valid JSON: {err}"))),
    }
}

/// Splits a stored name at its first whitespace, keeping the rest verbatim.
fn first_word_and_rest(name: &str) -> (String, String) {
    match name.trim().split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim_start().to_string()),
        None => (name.trim().to_string(), String::new()),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|value| if value.is_empty() { None } else { Some(value) })
}

#[cfg(test)]
mod tests {
    use super::{
        caregivers_append, caregivers_append_in, caregivers_load_all, caregivers_remove_at,
        caregivers_update_at_in, core_version, init_logging, medications_append_in,
        medications_load_all_in, medications_remove_at_in, medications_update_at_in,
        metrics_append_in, metrics_update_at_in, ping, profile_get_field, profile_set_field,
        settings_get_flag, CaregiverItem, CaregiverPatchItem, MedicationItem,
        MedicationListResponse, MedicationPatchItem, MetricItem, MetricPatchItem,
    };
    use carelog_core::{JournalStore, KvStore, MemoryKvStore};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn medication(name: &str, dosage: &str, frequency: &str) -> MedicationItem {
        MedicationItem {
            id: String::new(),
            name: name.to_string(),
            dosage: dosage.to_string(),
            frequency: frequency.to_string(),
            unit: None,
            notes: None,
        }
    }

    fn caregiver(first: &str, last: &str) -> CaregiverItem {
        CaregiverItem {
            id: String::new(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email_address: None,
            phone_number: None,
            role: "Parent".to_string(),
            notes: None,
            image_uri: None,
        }
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn medication_scenario_by_index() {
        let store = JournalStore::new(MemoryKvStore::new(), false);

        medications_append_in(&store, medication("Keppra", "10mg", "4x/day")).unwrap();
        let items =
            medications_append_in(&store, medication("Vimpat", "20mg", "2x/day")).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| !item.id.is_empty()));

        let patch = MedicationPatchItem {
            dosage: Some("20mg".to_string()),
            unit: Some("mg".to_string()),
            ..MedicationPatchItem::default()
        };
        let updated = medications_update_at_in(&store, 0, patch).unwrap();
        assert_eq!(updated[0].dosage, "20mg");
        assert_eq!(updated[0].unit.as_deref(), Some("mg"));
        assert_eq!(updated[1], items[1]);

        let remaining = medications_remove_at_in(&store, 0).unwrap();
        assert_eq!(remaining, vec![items[1].clone()]);
        assert_eq!(medications_load_all_in(&store).unwrap(), remaining);
    }

    #[test]
    fn empty_string_clears_optional_medication_field() {
        let store = JournalStore::new(MemoryKvStore::new(), false);
        let mut item = medication("Keppra", "10mg", "4x/day");
        item.notes = Some("with food".to_string());
        medications_append_in(&store, item).unwrap();

        let patch = MedicationPatchItem {
            notes: Some(String::new()),
            ..MedicationPatchItem::default()
        };
        let updated = medications_update_at_in(&store, 0, patch).unwrap();
        assert_eq!(updated[0].notes, None);
    }

    #[test]
    fn caregiver_first_name_patch_keeps_last_name() {
        let store = JournalStore::new(MemoryKvStore::new(), false);
        let items = caregivers_append_in(&store, caregiver("Maria", "Lopez")).unwrap();

        let patch = CaregiverPatchItem {
            first_name: Some("Mariana".to_string()),
            ..CaregiverPatchItem::default()
        };
        let updated = caregivers_update_at_in(&store, items[0].id.clone(), patch).unwrap();
        assert_eq!(updated[0].first_name, "Mariana");
        assert_eq!(updated[0].last_name, "Lopez");
        assert!(store
            .kv()
            .get("caregivers")
            .unwrap()
            .unwrap()
            .contains("\"name\":\"Mariana Lopez\""));
    }

    #[test]
    fn metric_fields_json_round_trips() {
        let store = JournalStore::new(MemoryKvStore::new(), false);
        metrics_append_in(
            &store,
            MetricItem {
                name: "Sleep".to_string(),
                fields_json: None,
            },
        )
        .unwrap();
        let items = metrics_append_in(
            &store,
            MetricItem {
                name: "Fatigue".to_string(),
                fields_json: Some(r#"{"max":5}"#.to_string()),
            },
        )
        .unwrap();
        assert_eq!(items[0].fields_json, None);
        assert_eq!(items[1].fields_json.as_deref(), Some(r#"{"max":5}"#));

        let renamed = metrics_update_at_in(
            &store,
            1,
            MetricPatchItem {
                name: Some("Tiredness".to_string()),
                fields_json: None,
            },
        )
        .unwrap();
        assert_eq!(renamed[1].name, "Tiredness");
        assert_eq!(renamed[1].fields_json.as_deref(), Some(r#"{"max":5}"#));

        let promoted = metrics_update_at_in(
            &store,
            0,
            MetricPatchItem {
                name: None,
                fields_json: Some(r#"{"unit":"hours"}"#.to_string()),
            },
        )
        .unwrap();
        assert_eq!(promoted[0].name, "Sleep");
        assert_eq!(promoted[0].fields_json.as_deref(), Some(r#"{"unit":"hours"}"#));
    }

    #[test]
    fn unknown_unit_is_rejected_and_stored_unit_kept() {
        let store = JournalStore::new(MemoryKvStore::new(), false);
        let mut item = medication("Keppra", "10mg", "4x/day");
        item.unit = Some("mg".to_string());
        medications_append_in(&store, item).unwrap();

        for unit in ["mcg", "MG ", " mg"] {
            let patch = MedicationPatchItem {
                unit: Some(unit.to_string()),
                ..MedicationPatchItem::default()
            };
            let response = MedicationListResponse::from_result(
                "medications_update_at",
                medications_update_at_in(&store, 0, patch).map_err(|err| err.to_string()),
            );
            assert!(!response.ok);
            assert!(response.message.contains("unsupported unit"));
        }
        let stored = medications_load_all_in(&store).unwrap();
        assert_eq!(stored[0].unit.as_deref(), Some("mg"));

        let mut rejected = medication("Vimpat", "20mg", "2x/day");
        rejected.unit = Some("mcg".to_string());
        assert!(medications_append_in(&store, rejected).is_err());
        assert_eq!(medications_load_all_in(&store).unwrap().len(), 1);

        let clear = MedicationPatchItem {
            unit: Some(String::new()),
            ..MedicationPatchItem::default()
        };
        let cleared = medications_update_at_in(&store, 0, clear).unwrap();
        assert_eq!(cleared[0].unit, None);
    }

    #[test]
    fn malformed_metric_fields_are_rejected_without_writing() {
        let store = JournalStore::new(MemoryKvStore::new(), false);
        for raw in ["{max:5", "[1,2]", "\"text\""] {
            let item = MetricItem {
                name: "Fatigue".to_string(),
                fields_json: Some(raw.to_string()),
            };
            assert!(metrics_append_in(&store, item).is_err());
        }
        assert!(store.kv().get("myMetrics").unwrap().is_none());

        metrics_append_in(
            &store,
            MetricItem {
                name: "Fatigue".to_string(),
                fields_json: Some(r#"{"max":5}"#.to_string()),
            },
        )
        .unwrap();
        let before = store.kv().get("myMetrics").unwrap();
        let patch = MetricPatchItem {
            name: Some("Tiredness".to_string()),
            fields_json: Some("{max:".to_string()),
        };
        let err = metrics_update_at_in(&store, 0, patch).unwrap_err();
        assert!(err.to_string().contains("fields_json"));
        assert_eq!(store.kv().get("myMetrics").unwrap(), before);
    }

    #[test]
    fn first_name_patch_keeps_multi_word_surname() {
        let store = JournalStore::new(MemoryKvStore::new(), false);
        let items = caregivers_append_in(&store, caregiver("Ana", "de la Cruz")).unwrap();

        let patch = CaregiverPatchItem {
            first_name: Some("Mariana".to_string()),
            ..CaregiverPatchItem::default()
        };
        caregivers_update_at_in(&store, items[0].id.clone(), patch).unwrap();
        let raw = store.kv().get("caregivers").unwrap().unwrap();
        assert!(raw.contains("\"name\":\"Mariana de la Cruz\""));

        let patch = CaregiverPatchItem {
            last_name: Some("Reyes".to_string()),
            ..CaregiverPatchItem::default()
        };
        caregivers_update_at_in(&store, items[0].id.clone(), patch).unwrap();
        let raw = store.kv().get("caregivers").unwrap().unwrap();
        assert!(raw.contains("\"name\":\"Mariana Reyes\""));
    }

    #[test]
    fn file_backed_caregiver_flow_by_unique_id() {
        let token = unique_token("ffi-caregiver");
        let created = caregivers_append(caregiver(&token, "Tester"));
        assert!(created.ok, "{}", created.message);
        let id = created
            .items
            .iter()
            .find(|item| item.first_name == token)
            .map(|item| item.id.clone())
            .expect("created caregiver should be listed");

        let removed = caregivers_remove_at(id.clone());
        assert!(removed.ok, "{}", removed.message);
        assert!(removed.items.iter().all(|item| item.id != id));

        let listed = caregivers_load_all();
        assert!(listed.ok, "{}", listed.message);
        assert!(listed.items.iter().all(|item| item.id != id));
    }

    #[test]
    fn unknown_field_key_is_reported_not_panicked() {
        let response = profile_get_field("nickname".to_string(), "fallback".to_string());
        assert!(!response.ok);
        assert_eq!(response.value, "fallback");
        assert!(response.message.contains("nickname"));

        let write = profile_set_field("caregivers".to_string(), "x".to_string());
        assert!(!write.ok);
    }

    #[test]
    fn reminder_flag_set_as_field_reads_as_true() {
        let write = profile_set_field("medicationReminders".to_string(), "true".to_string());
        assert!(write.ok, "{}", write.message);
        let flag = settings_get_flag("medicationReminders".to_string(), false);
        assert!(flag.ok, "{}", flag.message);
        assert!(flag.value);
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
