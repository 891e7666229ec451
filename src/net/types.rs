//! Wire schema for dashboard endpoints.
//!
//! DESIGN
//! ======
//! Every field is optional and leniently typed. A record that cannot be read
//! becomes its `Default`, which the renderer shows with sentinel placeholders;
//! a malformed entry never fails the whole render.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Named counters or metrics; values may be null.
pub type Metrics = BTreeMap<String, Value>;

/// One fetched payload, normalized.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot<R> {
    pub records: Vec<R>,
    pub summary: Option<Metrics>,
    pub accuracy: Option<Metrics>,
    pub generated_at: Option<String>,
    /// 1-based; missing or zero pages read as 1.
    pub page: u32,
    pub has_more: bool,
}

impl<R> Default for Snapshot<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            summary: None,
            accuracy: None,
            generated_at: None,
            page: 1,
            has_more: false,
        }
    }
}

impl<R: DeserializeOwned + Default> Snapshot<R> {
    /// Normalize a JSON payload. `records_key` names the array holding the
    /// panel's records (`jobs`, `logs`, `items`); `None` for summary-only
    /// endpoints.
    pub fn from_payload(payload: &Value, records_key: Option<&str>) -> Self {
        let records = records_key
            .and_then(|key| payload.get(key))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|item| R::deserialize(item).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();
        Self {
            records,
            summary: metrics(payload.get("summary")),
            accuracy: metrics(payload.get("accuracy")),
            generated_at: payload
                .get("generated_at")
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_owned),
            page: read_page(payload.get("page")),
            has_more: payload.get("has_more").is_some_and(truthy),
        }
    }
}

fn metrics(value: Option<&Value>) -> Option<Metrics> {
    value
        .and_then(Value::as_object)
        .map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
}

fn read_page(value: Option<&Value>) -> u32 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(1),
        Some(Value::String(s)) => s.trim().parse::<u64>().unwrap_or(1),
        _ => 1,
    };
    u32::try_from(raw).unwrap_or(u32::MAX).max(1)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}

/// Accept strings, numbers, and booleans as text; null and absent read as `None`.
fn loose_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn loose_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(truthy(&Value::deserialize(deserializer)?))
}

/// Row of the jobs table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JobRecord {
    #[serde(deserialize_with = "loose_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub source_name: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub profile_id: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub language: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub accuracy_status: Option<String>,
    #[serde(deserialize_with = "loose_bool")]
    pub accuracy_requires_review: bool,
}

/// Entry of a job's log timeline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogEntry {
    #[serde(deserialize_with = "loose_string")]
    pub level: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub event: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub message: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub timestamp: Option<String>,
}

/// Item of the live incident feed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Incident {
    #[serde(deserialize_with = "loose_string")]
    pub level: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub icon: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub event: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub message: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub timestamp_human: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub job_id: Option<String>,
}

/// Raw delivery template as returned by `/settings/templates/{id}/raw`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TemplateRaw {
    #[serde(deserialize_with = "loose_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub locale: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub body: Option<String>,
}

/// Template preview reply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderedPreview {
    #[serde(deserialize_with = "loose_string")]
    pub rendered: Option<String>,
}

/// Optional decorations on a successful mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MutationReply {
    #[serde(deserialize_with = "loose_string")]
    pub message: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub updated_at_human: Option<String>,
}

impl MutationReply {
    pub fn from_payload(payload: &Value) -> Self {
        read_lenient(payload)
    }
}

/// Read a whole payload as `T`, falling back to `T::default()`.
pub fn read_lenient<T: DeserializeOwned + Default>(payload: &Value) -> T {
    T::deserialize(payload).unwrap_or_default()
}
