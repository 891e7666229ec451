//! Pure display formatting for records and metrics.
//!
//! Every helper is total: missing, null, NaN, or unparseable input yields a
//! placeholder, never a panic and never the text "null"/"undefined".

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use chrono::{DateTime, Local, NaiveDateTime};
use serde_json::Value;

use crate::net::types::Metrics;

/// Sentinel shown for values that cannot be displayed.
pub const PLACEHOLDER: &str = "-";

/// `0.82` -> `"82.00%"`; `None`, NaN, and infinities -> `"-"`.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let text = format!("{:.2}%", v * 100.0);
            // Tiny negatives round to "-0.00".
            if text == "-0.00%" { "0.00%".to_owned() } else { text }
        }
        _ => PLACEHOLDER.to_owned(),
    }
}

/// Numeric reading of a JSON metric.
pub fn metric_number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64)
}

/// Counter text: numbers and strings as-is, null or absent as `"0"`.
pub fn metric_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => "0".to_owned(),
    }
}

/// Text for one accuracy field of the summary cards.
pub fn accuracy_text(field: &str, accuracy: &Metrics) -> String {
    match field {
        "average_score" => format_percent(metric_number(accuracy.get(field))),
        "average_wer" => match metric_number(accuracy.get(field)).filter(|v| v.is_finite()) {
            Some(v) => format!("Average WER {}", format_percent(Some(v))),
            None => "Average WER N/A".to_owned(),
        },
        _ => metric_text(accuracy.get(field)),
    }
}

/// `"awaiting_review"` -> `"Awaiting Review"`.
///
/// Words are only capitalized, never lower-cased, so labels that are already
/// human-readable come back unchanged.
pub fn humanize_status(status: &str) -> String {
    status
        .replace('_', " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Visual severity of a job status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Danger,
    Info,
    Neutral,
}

impl Severity {
    /// Badge CSS classes.
    pub fn badge_class(self) -> &'static str {
        match self {
            Self::Success => "badge badge-success",
            Self::Warning => "badge badge-warning",
            Self::Danger => "badge badge-danger",
            Self::Info => "badge badge-INFO",
            Self::Neutral => "badge",
        }
    }
}

/// Known pipeline statuses; anything else is neutral.
pub fn status_severity(status: &str) -> Severity {
    match status {
        "approved" => Severity::Success,
        "awaiting_review" | "adjustments_required" => Severity::Warning,
        "failed" | "rejected" => Severity::Danger,
        "processing" | "asr_completed" | "post_editing" => Severity::Info,
        _ => Severity::Neutral,
    }
}

/// Upper-cased log level, defaulting to `INFO`.
pub fn level_label(level: Option<&str>) -> String {
    match level.map(str::trim) {
        Some(l) if !l.is_empty() => l.to_uppercase(),
        _ => "INFO".to_owned(),
    }
}

/// `value` unless missing or blank.
pub fn text_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_owned(),
        _ => fallback.to_owned(),
    }
}

/// Parse a server timestamp into local wall time.
///
/// Offsets (RFC 3339) are converted to the local zone; naive ISO 8601
/// timestamps are taken as already local.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| match NaiveDateTime::parse_from_str(raw, fmt) {
            Ok(dt) => Some(dt),
            Err(_) => None,
        })
}

/// `HH:MM:SS` for a server timestamp.
pub fn clock_label(raw: &str) -> Option<String> {
    parse_timestamp(raw).map(|dt| dt.format("%H:%M:%S").to_string())
}

/// `dd/mm/YYYY HH:MM:SS` for a server timestamp.
pub fn datetime_label(raw: &str) -> Option<String> {
    parse_timestamp(raw).map(|dt| dt.format("%d/%m/%Y %H:%M:%S").to_string())
}

/// "Updated at HH:MM:SS", or `fallback` when the snapshot carries no usable time.
pub fn updated_label(generated_at: Option<&str>, fallback: &str) -> String {
    generated_at
        .and_then(clock_label)
        .map_or_else(|| fallback.to_owned(), |clock| format!("Updated at {clock}"))
}
