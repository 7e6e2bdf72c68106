//! Tracked metric stored under `myMetrics`.
//!
//! Stored elements are either a bare string (a catalog metric added in one
//! tap) or an object with at least `name` (a custom metric). The shape is
//! resolved here, once, into [`Metric`].

use crate::model::entity::{CollectionEntity, Patch};
use crate::model::keys::CollectionKey;
use crate::model::locator::ByIndex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    /// Bare metric name.
    Named(String),
    /// Custom metric with arbitrary extra fields.
    Detailed(MetricDetails),
}

/// Object form of a custom metric.
///
/// Fields other than `name` are kept verbatim so custom-metric screens can
/// round-trip whatever they stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDetails {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metric {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn detailed(name: impl Into<String>, extra: Map<String, Value>) -> Self {
        Self::Detailed(MetricDetails {
            name: name.into(),
            extra,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Detailed(details) => &details.name,
        }
    }

    /// Extra fields of a custom metric; `None` for a bare name.
    pub fn extra(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Named(_) => None,
            Self::Detailed(details) => Some(&details.extra),
        }
    }
}

impl CollectionEntity for Metric {
    const KEY: CollectionKey = CollectionKey::Metrics;
    type Locator = ByIndex;
    type Patch = MetricPatch;
}

/// Field-level update for one metric.
///
/// `fields` are merged into the extra fields; a non-empty merge turns a bare
/// name into the object form. A `name` entry inside `fields` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricPatch {
    pub name: Option<String>,
    pub fields: Map<String, Value>,
}

impl MetricPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            fields: Map::new(),
        }
    }
}

impl Patch<Metric> for MetricPatch {
    fn apply_to(self, record: &mut Metric) {
        let mut fields = self.fields;
        fields.remove("name");

        let name = self.name.unwrap_or_else(|| record.name().to_string());
        *record = match std::mem::replace(record, Metric::Named(String::new())) {
            Metric::Named(_) if fields.is_empty() => Metric::Named(name),
            Metric::Named(_) => Metric::detailed(name, fields),
            Metric::Detailed(mut details) => {
                details.name = name;
                details.extra.extend(fields);
                Metric::Detailed(details)
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{Metric, MetricPatch};
    use crate::model::entity::Patch;
    use serde_json::{json, Map, Value};

    #[test]
    fn mixed_array_decodes_both_shapes() {
        let parsed: Vec<Metric> = serde_json::from_str(
            r#"["Sleep",{"name":"Aura intensity","scale":10,"unit":"points"}]"#,
        )
        .unwrap();
        assert_eq!(parsed[0], Metric::named("Sleep"));
        assert_eq!(parsed[1].name(), "Aura intensity");
        assert_eq!(parsed[1].extra().unwrap().get("scale"), Some(&json!(10)));
    }

    #[test]
    fn detailed_metric_keeps_extra_fields_on_reencode() {
        let raw = r#"[{"name":"Aura intensity","scale":10}]"#;
        let parsed: Vec<Metric> = serde_json::from_str(raw).unwrap();
        let reparsed: Vec<Metric> =
            serde_json::from_str(&serde_json::to_string(&parsed).unwrap()).unwrap();
        assert_eq!(parsed, reparsed);
    }

    #[test]
    fn object_without_name_is_rejected() {
        let parsed = serde_json::from_str::<Vec<Metric>>(r#"[{"scale":10}]"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn rename_keeps_shape() {
        let mut bare = Metric::named("Sleep");
        MetricPatch::rename("Sleep quality").apply_to(&mut bare);
        assert_eq!(bare, Metric::named("Sleep quality"));

        let mut extra = Map::new();
        extra.insert("scale".to_string(), json!(5));
        let mut detailed = Metric::detailed("Mood", extra.clone());
        MetricPatch::rename("Mood score").apply_to(&mut detailed);
        assert_eq!(detailed, Metric::detailed("Mood score", extra));
    }

    #[test]
    fn fields_promote_bare_name_and_ignore_name_entry() {
        let mut metric = Metric::named("Stress");
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::from("ignored"));
        fields.insert("scale".to_string(), json!(3));
        MetricPatch { name: None, fields }.apply_to(&mut metric);

        assert_eq!(metric.name(), "Stress");
        assert_eq!(metric.extra().unwrap().get("scale"), Some(&json!(3)));
        assert!(metric.extra().unwrap().get("name").is_none());
    }
}
