//! Typed panel registry and per-panel UI state.
//!
//! DESIGN
//! ======
//! Pages look panels up by [`PanelId`] instead of selector strings. The
//! registry resolves each panel's endpoint, surface key, refresh interval,
//! and label texts from the page configuration once, at mount.

#[cfg(test)]
#[path = "panels_test.rs"]
mod panels_test;

use std::collections::BTreeMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::query::{FilterState, JOB_PARAMS, LOG_PARAMS, PanelQuery};
use super::surface::SurfaceKey;
use crate::config::{DashboardConfig, LivePanelConfig, refresh_interval};
use crate::net::types::{Metrics, Snapshot};
use crate::util::format::{accuracy_text, metric_text, updated_label};
use crate::util::render::{RenderMode, RenderedList};

/// Logs page size requested by the timeline.
pub const LOG_PAGE_SIZE: u32 = 20;

/// Every reactive panel the client knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PanelId {
    Summary,
    Incidents,
    Jobs,
    Logs,
}

impl PanelId {
    pub const ALL: [Self; 4] = [Self::Summary, Self::Incidents, Self::Jobs, Self::Logs];

    fn default_surface(self) -> &'static str {
        match self {
            Self::Summary => "summary-cards",
            Self::Incidents => "incident-feed",
            Self::Jobs => "jobs-feed",
            Self::Logs => "logs-timeline",
        }
    }
}

/// Label texts of one panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelLabels {
    /// Shown while a fetch is in flight.
    pub loading: &'static str,
    /// Shown on success when the snapshot carries no timestamp.
    pub live: &'static str,
    /// Shown when a fetch fails.
    pub failure: &'static str,
    /// Toast on failure; `None` fails silently apart from the label.
    pub failure_toast: Option<&'static str>,
}

/// Static wiring of one panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelBinding {
    pub id: PanelId,
    /// Empty disables fetching.
    pub endpoint: String,
    pub surface: SurfaceKey,
    /// Zero for panels that only fetch on demand.
    pub interval: Duration,
    pub empty_label: String,
    pub labels: PanelLabels,
}

/// Minimum refresh intervals.
pub const SUMMARY_FLOOR: Duration = Duration::from_secs(5);
pub const INCIDENTS_FLOOR: Duration = Duration::from_secs(10);

/// Resolved bindings of the current page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PanelRegistry {
    bindings: BTreeMap<PanelId, PanelBinding>,
}

impl PanelRegistry {
    pub fn from_config(config: &DashboardConfig) -> Self {
        let mut bindings = BTreeMap::new();
        bindings.insert(
            PanelId::Summary,
            live_binding(
                PanelId::Summary,
                &config.summary,
                30.0,
                SUMMARY_FLOOR,
                "",
                PanelLabels {
                    loading: "Refreshing...",
                    live: "Live updates active",
                    failure: "Live updates unavailable",
                    failure_toast: None,
                },
            ),
        );
        bindings.insert(
            PanelId::Incidents,
            live_binding(
                PanelId::Incidents,
                &config.incidents,
                45.0,
                INCIDENTS_FLOOR,
                "No incidents recorded.",
                PanelLabels {
                    loading: "Refreshing...",
                    live: "Live monitoring active",
                    failure: "Failed to refresh incidents",
                    failure_toast: None,
                },
            ),
        );
        bindings.insert(
            PanelId::Jobs,
            PanelBinding {
                id: PanelId::Jobs,
                endpoint: config.jobs.endpoint.clone(),
                surface: surface_or(&config.jobs.surface, PanelId::Jobs),
                interval: Duration::ZERO,
                empty_label: "No jobs found yet.".to_owned(),
                labels: PanelLabels {
                    loading: "Updating filters...",
                    live: "Update complete",
                    failure: "Update failed",
                    failure_toast: Some("Could not refresh the jobs."),
                },
            },
        );
        bindings.insert(
            PanelId::Logs,
            PanelBinding {
                id: PanelId::Logs,
                endpoint: config.job.logs_endpoint.clone(),
                surface: SurfaceKey::from(PanelId::Logs.default_surface()),
                interval: Duration::ZERO,
                empty_label: "No events recorded.".to_owned(),
                labels: PanelLabels {
                    loading: "Updating...",
                    live: "Update complete",
                    failure: "Failed to refresh logs",
                    failure_toast: Some("Could not load the events."),
                },
            },
        );
        Self { bindings }
    }

    pub fn get(&self, id: PanelId) -> Option<&PanelBinding> {
        self.bindings.get(&id)
    }

    /// Binding for `id`, or a disabled binding when none is registered.
    pub fn binding(&self, id: PanelId) -> PanelBinding {
        self.get(id).cloned().unwrap_or_else(|| PanelBinding {
            id,
            endpoint: String::new(),
            surface: SurfaceKey::from(id.default_surface()),
            interval: Duration::ZERO,
            empty_label: String::new(),
            labels: PanelLabels { loading: "", live: "", failure: "", failure_toast: None },
        })
    }

    /// Surface keys of every registered panel.
    pub fn surfaces(&self) -> impl Iterator<Item = &SurfaceKey> {
        self.bindings.values().map(|binding| &binding.surface)
    }
}

fn surface_or(configured: &str, id: PanelId) -> SurfaceKey {
    if configured.trim().is_empty() {
        SurfaceKey::from(id.default_surface())
    } else {
        SurfaceKey::from(configured)
    }
}

fn live_binding(
    id: PanelId,
    panel: &LivePanelConfig,
    default_secs: f64,
    floor: Duration,
    default_empty: &str,
    labels: PanelLabels,
) -> PanelBinding {
    PanelBinding {
        id,
        endpoint: panel.endpoint.trim().to_owned(),
        surface: surface_or(panel.surface.as_deref().unwrap_or_default(), id),
        interval: refresh_interval(panel.refresh_interval, default_secs, floor),
        empty_label: panel
            .empty_label
            .clone()
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| default_empty.to_owned()),
        labels,
    }
}

/// Visual state of a status label (`data-state`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelState {
    Loading,
    Success,
    Error,
}

impl LabelState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// "Last updated" label of a panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusLabel {
    pub text: String,
    pub state: Option<LabelState>,
}

impl StatusLabel {
    pub fn set(&mut self, text: impl Into<String>, state: Option<LabelState>) {
        self.text = text.into();
        self.state = state;
    }

    pub fn loading(&mut self, text: &str) {
        self.set(text, Some(LabelState::Loading));
    }

    /// Success label from a snapshot timestamp, or `live` without one.
    pub fn updated(&mut self, generated_at: Option<&str>, live: &str) {
        self.set(updated_label(generated_at, live), Some(LabelState::Success));
    }

    pub fn failed(&mut self, text: &str) {
        self.set(text, Some(LabelState::Error));
    }

    /// `data-state` attribute value, if any.
    pub fn data_state(&self) -> Option<&'static str> {
        self.state.map(LabelState::as_str)
    }
}

/// Summary counters and accuracy metrics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SummaryState {
    pub summary: Metrics,
    pub accuracy: Metrics,
    pub label: StatusLabel,
}

impl SummaryState {
    /// Merge a snapshot's counters. Fields absent from the snapshot keep
    /// their previous value.
    pub fn apply<R>(&mut self, snapshot: &Snapshot<R>) {
        if let Some(summary) = &snapshot.summary {
            for (key, value) in summary {
                self.summary.insert(key.clone(), value.clone());
            }
        }
        if let Some(accuracy) = &snapshot.accuracy {
            for (key, value) in accuracy {
                self.accuracy.insert(key.clone(), value.clone());
            }
        }
    }

    /// Display text of a summary counter.
    pub fn field(&self, key: &str) -> String {
        metric_text(self.summary.get(key))
    }

    /// Display text of an accuracy metric.
    pub fn accuracy_field(&self, key: &str) -> String {
        accuracy_text(key, &self.accuracy)
    }

    /// Apply a summary poll payload and mark the label live.
    pub fn refresh(&mut self, payload: &Value, live: &str) {
        let snapshot = Snapshot::<Value>::from_payload(payload, None);
        self.apply(&snapshot);
        self.label.updated(snapshot.generated_at.as_deref(), live);
    }
}

/// Rows, label, and query state of one list panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelState<V> {
    pub rows: RenderedList<V>,
    pub label: StatusLabel,
    pub query: PanelQuery,
    /// Set once the first fetch succeeds; controls stay hidden until then.
    pub loaded: bool,
}

impl<V> Default for PanelState<V> {
    fn default() -> Self {
        Self::new(PanelQuery::default())
    }
}

impl<V> PanelState<V> {
    pub fn new(query: PanelQuery) -> Self {
        Self { rows: RenderedList::new(), label: StatusLabel::default(), query, loaded: false }
    }

    /// Replace the rows from a live feed payload (no pagination).
    pub fn refresh_feed<R: DeserializeOwned + Default>(
        &mut self,
        payload: &Value,
        records_key: &str,
        binding: &PanelBinding,
        row: impl Fn(&R) -> V,
    ) {
        let snapshot = Snapshot::<R>::from_payload(payload, Some(records_key));
        self.rows
            .apply(&snapshot.records, RenderMode::Replace, &binding.empty_label, row);
        self.label
            .updated(snapshot.generated_at.as_deref(), binding.labels.live);
        self.loaded = true;
    }

    /// Log timeline state with `level`/`event` filters.
    pub fn for_logs() -> Self {
        Self::new(PanelQuery::new(FilterState::with_keys(["level", "event"]), LOG_PAGE_SIZE, LOG_PARAMS))
    }

    /// Jobs table state with the configured filter inputs.
    pub fn for_jobs(config: &DashboardConfig) -> Self {
        let mut filters = FilterState::with_keys(config.jobs.filters.iter().map(|f| f.name.as_str()));
        for field in &config.jobs.filters {
            filters.set(&field.name, &field.value);
        }
        let mut query = PanelQuery::new(filters, config.jobs.limit, JOB_PARAMS);
        query.pagination.current_page = config.jobs.page.max(1);
        Self::new(query)
    }
}
