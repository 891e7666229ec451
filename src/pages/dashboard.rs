//! Operations overview: summary cards, incident feed, and the jobs table.
//!
//! SYSTEM CONTEXT
//! ==============
//! Summary and incidents refresh on their own timers while the page is
//! visible. The jobs table fetches on demand and feeds its counters back into
//! the summary so both stay consistent.

use leptos::prelude::*;

use crate::components::incident_feed::IncidentFeed;
use crate::components::jobs_table::JobsTable;
use crate::components::summary_cards::SummaryCards;
use crate::net::poller::{BusyPolicy, PollSpec, Poller};
use crate::state::panels::{PanelId, PanelRegistry, PanelState, StatusLabel, SummaryState};
use crate::state::surface::SurfaceRegistry;
use crate::util::platform::BrowserPlatform;
use crate::util::render::IncidentRow;

/// Payload array of the incidents feed.
const INCIDENT_RECORDS: &str = "items";

#[component]
pub fn DashboardPage() -> impl IntoView {
    let panels = expect_context::<PanelRegistry>();
    let surfaces = expect_context::<RwSignal<SurfaceRegistry>>();

    let summary_binding = panels.binding(PanelId::Summary);
    let summary_surface = summary_binding.surface.clone();
    let mut initial = StatusLabel::default();
    initial.loading(summary_binding.labels.loading);
    let summary = RwSignal::new(SummaryState { label: initial, ..SummaryState::default() });

    let live = summary_binding.labels.live;
    let failure = summary_binding.labels.failure;
    let summary_poll = Poller::new(BrowserPlatform, PollSpec::from_binding(&summary_binding, BusyPolicy::FirstLoadOnly)).start(
        surfaces,
        move |payload| summary.update(|s| s.refresh(&payload, live)),
        move |_| summary.update(|s| s.label.failed(failure)),
    );

    let incident_binding = panels.binding(PanelId::Incidents);
    let incident_surface = incident_binding.surface.clone();
    let incidents = RwSignal::new(PanelState::<IncidentRow>::default());
    incidents.update(|s| s.label.loading(incident_binding.labels.loading));
    let incident_failure = incident_binding.labels.failure;
    let spec = PollSpec::from_binding(&incident_binding, BusyPolicy::FirstLoadOnly);
    let incident_poll = Poller::new(BrowserPlatform, spec).start(
        surfaces,
        move |payload| {
            incidents.update(|s| s.refresh_feed(&payload, INCIDENT_RECORDS, &incident_binding, IncidentRow::from_record));
        },
        move |_| incidents.update(|s| s.label.failed(incident_failure)),
    );

    on_cleanup(move || {
        summary_poll.stop();
        incident_poll.stop();
    });

    view! {
        <div class="dashboard-page">
            <SummaryCards summary=summary surface=summary_surface/>
            <div class="dashboard-page__grid">
                <JobsTable summary=summary/>
                <IncidentFeed state=incidents surface=incident_surface/>
            </div>
        </div>
    }
}
