use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::config::{FilterField, JobsConfig};
use crate::net::poller::{BusyPolicy, PollSpec, Poller};
use crate::net::types::Incident;
use crate::state::store::cell;
use crate::state::surface::SurfaceRegistry;
use crate::util::render::{IncidentRow, ListItem};
use crate::util::test_support::FakePlatform;

#[test]
fn registry_resolves_defaults() {
    let registry = PanelRegistry::from_config(&DashboardConfig::default());
    let summary = registry.binding(PanelId::Summary);
    assert!(summary.endpoint.is_empty());
    assert_eq!(summary.surface.as_str(), "summary-cards");
    assert_eq!(summary.interval, Duration::from_secs(30));

    let incidents = registry.binding(PanelId::Incidents);
    assert_eq!(incidents.interval, Duration::from_secs(45));
    assert_eq!(incidents.empty_label, "No incidents recorded.");

    let jobs = registry.binding(PanelId::Jobs);
    assert_eq!(jobs.endpoint, "/api/dashboard/jobs");
    assert_eq!(jobs.surface.as_str(), "jobs-feed");
    assert_eq!(jobs.labels.failure_toast, Some("Could not refresh the jobs."));
}

#[test]
fn registry_clamps_intervals_to_floor() {
    let mut config = DashboardConfig::default();
    config.summary = LivePanelConfig {
        endpoint: " /api/summary ".to_owned(),
        refresh_interval: Some(1.0),
        surface: Some("cards".to_owned()),
        empty_label: None,
    };
    config.incidents.refresh_interval = Some(3.0);
    let registry = PanelRegistry::from_config(&config);
    let summary = registry.binding(PanelId::Summary);
    assert_eq!(summary.endpoint, "/api/summary");
    assert_eq!(summary.interval, SUMMARY_FLOOR);
    assert_eq!(summary.surface.as_str(), "cards");
    assert_eq!(registry.binding(PanelId::Incidents).interval, INCIDENTS_FLOOR);
}

#[test]
fn registry_lists_every_surface() {
    let registry = PanelRegistry::from_config(&DashboardConfig::default());
    let surfaces: Vec<&str> = registry.surfaces().map(SurfaceKey::as_str).collect();
    assert_eq!(surfaces.len(), PanelId::ALL.len());
    assert!(surfaces.contains(&"logs-timeline"));
}

#[test]
fn status_label_transitions() {
    let mut label = StatusLabel::default();
    assert_eq!(label.data_state(), None);
    label.loading("Updating...");
    assert_eq!(label.data_state(), Some("loading"));
    label.updated(Some("2024-05-01T10:00:05"), "Live");
    assert_eq!(label.text, "Updated at 10:00:05");
    assert_eq!(label.data_state(), Some("success"));
    label.updated(None, "Live");
    assert_eq!(label.text, "Live");
    label.failed("Broken");
    assert_eq!(label.data_state(), Some("error"));
    assert_eq!(label.text, "Broken");
}

#[test]
fn summary_state_merges_fields() {
    let mut state = SummaryState::default();
    let first = Snapshot::<()>::from_payload(&json!({"summary": {"total": 5, "failed": 1}}), None);
    state.apply(&first);
    assert_eq!(state.field("total"), "5");
    let second = Snapshot::<()>::from_payload(&json!({"summary": {"failed": 2}}), None);
    state.apply(&second);
    assert_eq!(state.field("total"), "5");
    assert_eq!(state.field("failed"), "2");
    assert_eq!(state.field("unknown"), "0");
}

#[test]
fn summary_state_formats_accuracy() {
    let mut state = SummaryState::default();
    let snap = Snapshot::<()>::from_payload(
        &json!({"accuracy": {"average_score": 0.82, "average_wer": null, "evaluated": 4}}),
        None,
    );
    state.apply(&snap);
    assert_eq!(state.accuracy_field("average_score"), "82.00%");
    assert_eq!(state.accuracy_field("average_wer"), "Average WER N/A");
    assert_eq!(state.accuracy_field("evaluated"), "4");
    assert_eq!(state.accuracy_field("passing"), "0");
}

#[test]
fn logs_panel_state_has_level_and_event_filters() {
    let state = PanelState::<String>::for_logs();
    assert_eq!(state.query.filters.pairs().len(), 2);
    assert_eq!(state.query.pagination.page_size, LOG_PAGE_SIZE);
    assert!(state.rows.items().is_empty());
    assert!(!state.loaded);
}

#[test]
fn jobs_panel_state_takes_configured_filters() {
    let config = DashboardConfig {
        jobs: JobsConfig {
            limit: 5,
            page: 0,
            filters: vec![FilterField {
                name: "status".to_owned(),
                value: "failed".to_owned(),
                ..FilterField::default()
            }],
            ..JobsConfig::default()
        },
        ..DashboardConfig::default()
    };
    let state = PanelState::<String>::for_jobs(&config);
    assert_eq!(state.query.filters.get("status"), "failed");
    assert_eq!(state.query.pagination.page_size, 5);
    assert_eq!(state.query.pagination.current_page, 1);
}

#[test]
fn summary_refresh_sets_success_label() {
    let mut state = SummaryState::default();
    state.refresh(&json!({"summary": {"total": 2}}), "Live updates active");
    assert_eq!(state.field("total"), "2");
    assert_eq!(state.label.text, "Live updates active");
    assert_eq!(state.label.data_state(), Some("success"));
}

#[test]
fn summary_poll_keeps_fields_after_failure() {
    let platform = FakePlatform::new();
    platform
        .respond_json(200, &json!({"summary": {"total": 5}, "generated_at": "2024-05-01T10:00:05"}))
        .respond(503, "unavailable");
    let mut config = DashboardConfig::default();
    config.summary.endpoint = "/api/summary".to_owned();
    let binding = PanelRegistry::from_config(&config).binding(PanelId::Summary);
    let poller = Poller::new(platform.clone(), PollSpec::from_binding(&binding, BusyPolicy::FirstLoadOnly));
    let surfaces = cell(SurfaceRegistry::default());
    surfaces.borrow_mut().register(&binding.surface);
    let summary = cell(SummaryState::default());
    let labels = binding.labels.clone();

    let fetch = || {
        block_on(poller.fetch_once(
            &[],
            &surfaces,
            |payload| summary.borrow_mut().refresh(&payload, labels.live),
            |_| summary.borrow_mut().label.failed(labels.failure),
        ))
    };

    fetch();
    assert_eq!(summary.borrow().field("total"), "5");
    assert_eq!(summary.borrow().label.text, "Updated at 10:00:05");
    assert_eq!(summary.borrow().label.data_state(), Some("success"));

    fetch();
    assert_eq!(summary.borrow().field("total"), "5");
    assert_eq!(summary.borrow().label.text, "Live updates unavailable");
    assert_eq!(summary.borrow().label.data_state(), Some("error"));
    assert!(surfaces.borrow().flags(&binding.surface).error);
}

#[test]
fn feed_refresh_replaces_rows() {
    let registry = PanelRegistry::from_config(&DashboardConfig::default());
    let binding = registry.binding(PanelId::Incidents);
    let mut state = PanelState::<IncidentRow>::default();
    state.refresh_feed::<Incident>(
        &json!({"items": [{"level": "error", "event": "asr_failed", "job_id": 7}]}),
        "items",
        &binding,
        IncidentRow::from_record,
    );
    assert_eq!(state.rows.row_count(), 1);
    assert!(state.loaded);
    assert_eq!(state.label.text, "Live monitoring active");

    state.refresh_feed::<Incident>(&json!({"items": []}), "items", &binding, IncidentRow::from_record);
    assert_eq!(
        state.rows.items(),
        &[ListItem::Empty("No incidents recorded.".to_owned())]
    );
}
