//! Deterministic list rendering from snapshot records.
//!
//! DESIGN
//! ======
//! Views never build markup from records directly. A panel keeps a
//! [`RenderedList`] of row view-models and applies each snapshot to it in
//! either replace or append mode; the Leptos view is a pure projection of
//! that list. Applying the same snapshot twice yields the same list.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use super::format::{
    PLACEHOLDER, datetime_label, humanize_status, level_label, status_severity, text_or,
};
use crate::net::types::{Incident, JobRecord, LogEntry};

/// How a snapshot is applied to an existing list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Clear previous rows first.
    #[default]
    Replace,
    /// Keep previous rows and add new ones after them.
    Append,
}

/// One entry of a rendered list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListItem<V> {
    /// Placeholder shown when there is nothing to list.
    Empty(String),
    Row(V),
}

/// Ordered row view-models of one panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedList<V> {
    items: Vec<ListItem<V>>,
}

impl<V> Default for RenderedList<V> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<V> RenderedList<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ListItem<V>] {
        &self.items
    }

    /// Rows only, in order.
    pub fn rows(&self) -> impl Iterator<Item = &V> {
        self.items.iter().filter_map(|item| match item {
            ListItem::Row(row) => Some(row),
            ListItem::Empty(_) => None,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows().count()
    }

    /// Whether the list currently shows only the empty-state placeholder.
    pub fn is_empty_state(&self) -> bool {
        matches!(self.items.as_slice(), [ListItem::Empty(_)])
    }

    /// Apply one snapshot's records.
    ///
    /// Replace mode rebuilds the list, yielding exactly one empty-state item
    /// when `records` is empty. Append mode keeps existing rows, drops a lone
    /// placeholder once real rows arrive, and leaves the list untouched when
    /// nothing new came back.
    pub fn apply<R>(&mut self, records: &[R], mode: RenderMode, placeholder: &str, row: impl Fn(&R) -> V) {
        match mode {
            RenderMode::Replace => {
                self.items.clear();
                if records.is_empty() {
                    self.items.push(ListItem::Empty(placeholder.to_owned()));
                    return;
                }
            }
            RenderMode::Append => {
                if records.is_empty() {
                    return;
                }
                if self.is_empty_state() {
                    self.items.clear();
                }
            }
        }
        self.items.extend(records.iter().map(|record| ListItem::Row(row(record))));
    }
}

/// A labelled badge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    pub class: String,
    pub text: String,
    pub aria_label: Option<String>,
}

/// Jobs table row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobRow {
    pub id: String,
    pub source_name: String,
    pub profile_id: String,
    pub status: Badge,
    pub language: String,
    /// `None` renders the placeholder cell.
    pub accuracy: Option<Badge>,
    pub detail_href: String,
}

impl JobRow {
    pub fn from_record(job: &JobRecord) -> Self {
        let status = job.status.as_deref().unwrap_or_default();
        let id = job.id.clone().unwrap_or_default();
        Self {
            detail_href: format!("/jobs/{id}"),
            id,
            source_name: job.source_name.clone().unwrap_or_default(),
            profile_id: job.profile_id.clone().unwrap_or_default(),
            status: Badge {
                class: status_severity(status).badge_class().to_owned(),
                text: humanize_status(status),
                aria_label: None,
            },
            language: text_or(job.language.as_deref(), PLACEHOLDER),
            accuracy: accuracy_badge(job),
        }
    }
}

fn accuracy_badge(job: &JobRecord) -> Option<Badge> {
    match job.accuracy_status.as_deref() {
        Some(status) if !status.is_empty() => {
            let (class, text) = match status {
                "needs_review" => ("badge badge-warning", "Review".to_owned()),
                "passing" => ("badge badge-success", "OK".to_owned()),
                other => ("badge", humanize_status(other)),
            };
            Some(Badge {
                class: class.to_owned(),
                aria_label: Some(format!("Accuracy: {text}")),
                text,
            })
        }
        _ if job.accuracy_requires_review => Some(Badge {
            class: "badge badge-warning".to_owned(),
            text: "Review".to_owned(),
            aria_label: Some("Accuracy: review required".to_owned()),
        }),
        _ => None,
    }
}

/// Log timeline entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRow {
    pub badge: Badge,
    pub event: String,
    pub message: String,
    /// Local date-time, empty when the entry carries no usable timestamp.
    pub when: String,
}

impl LogRow {
    pub fn from_record(entry: &LogEntry) -> Self {
        let level = level_label(entry.level.as_deref());
        Self {
            badge: Badge { class: format!("badge badge-{level}"), text: level, aria_label: None },
            event: text_or(entry.event.as_deref(), "Event"),
            message: text_or(entry.message.as_deref(), "No additional details."),
            when: entry.timestamp.as_deref().and_then(datetime_label).unwrap_or_default(),
        }
    }
}

/// Link from an incident to its job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobLink {
    pub href: String,
    pub text: String,
}

/// Incident feed entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncidentRow {
    pub badge: Badge,
    pub event: String,
    pub message: String,
    pub timestamp: String,
    pub job: Option<JobLink>,
}

impl IncidentRow {
    pub fn from_record(item: &Incident) -> Self {
        let level = level_label(item.level.as_deref());
        let icon = item.icon.as_deref().unwrap_or_default();
        Self {
            badge: Badge {
                class: format!("badge badge-{level}"),
                text: format!("{icon} {level}").trim().to_owned(),
                aria_label: None,
            },
            event: text_or(item.event.as_deref(), "Event"),
            message: text_or(item.message.as_deref(), "No additional details."),
            timestamp: item.timestamp_human.clone().unwrap_or_default(),
            job: item
                .job_id
                .as_deref()
                .filter(|id| !id.is_empty())
                .map(|id| JobLink { href: format!("/jobs/{id}"), text: format!("Job {id}") }),
        }
    }
}
