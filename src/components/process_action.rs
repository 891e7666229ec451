//! "Process now" button of the job detail page.
//!
//! Posts to the job's process endpoint without a body, reports the result in
//! a status line stamped with the local time, and asks the event timeline to
//! reload once processing has been accepted.

#[cfg(test)]
#[path = "process_action_test.rs"]
mod process_action_test;

use leptos::prelude::*;

use super::status_label::StatusText;
use crate::config::{DashboardConfig, JobDetailConfig};
use crate::net::mutation::{ControlState, MutationExecutor, MutationOutcome, MutationRequest};
use crate::state::auth::AuthContext;
use crate::state::panels::{LabelState, StatusLabel};
use crate::state::surface::{SurfaceKey, SurfaceRegistry};
use crate::state::toast::ToastState;
use crate::util::bindings::{Action, Control, EventKind, resolve};
use crate::util::platform::{BrowserPlatform, Platform, spawn};

pub const REQUESTING_TEXT: &str = "Requesting processing...";
pub const DEFAULT_SUCCESS_TEXT: &str = "Asynchronous processing started.";
pub const DEFAULT_ERROR_TEXT: &str = "Failed to start processing.";

fn success_text(job: &JobDetailConfig) -> String {
    job.process_success_label
        .clone()
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| DEFAULT_SUCCESS_TEXT.to_owned())
}

fn error_text(job: &JobDetailConfig) -> String {
    job.process_error_label
        .clone()
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| DEFAULT_ERROR_TEXT.to_owned())
}

/// The processing request, or `None` when the job offers no process endpoint.
pub fn process_request(job: &JobDetailConfig) -> Option<MutationRequest> {
    let endpoint = job.process_endpoint.trim();
    if endpoint.is_empty() {
        return None;
    }
    Some(
        MutationRequest::post(endpoint)
            .on_surface(SurfaceKey::from(job.process_surface.as_str()))
            .with_messages(Some(success_text(job)), Some(error_text(job)))
            .with_titles("Pipeline running", "Processing error"),
    )
}

/// Status line after an attempt; `None` leaves the line unchanged.
pub fn process_status(outcome: &MutationOutcome, job: &JobDetailConfig, clock: &str) -> Option<StatusLabel> {
    let (text, state) = match outcome {
        MutationOutcome::Succeeded(_) => (format!("{} ({clock})", success_text(job)), LabelState::Success),
        MutationOutcome::Failed(_) => (error_text(job), LabelState::Error),
        MutationOutcome::Skipped | MutationOutcome::Declined => return None,
    };
    Some(StatusLabel { text, state: Some(state) })
}

#[component]
pub fn ProcessAction(refresh_logs: RwSignal<u32>) -> impl IntoView {
    let config = expect_context::<DashboardConfig>();
    let auth = expect_context::<AuthContext>();
    let surfaces = expect_context::<RwSignal<SurfaceRegistry>>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let job = config.job.clone();
    let Some(request) = process_request(&job) else {
        return ().into_any();
    };
    let executor = MutationExecutor::new(BrowserPlatform, auth);
    let control = RwSignal::new(ControlState::new("Process now", None));
    let status = RwSignal::new(StatusLabel::default());

    let on_click = move |ev: leptos::ev::MouseEvent| {
        let handled = ev.default_prevented();
        ev.prevent_default();
        if resolve(Control::ProcessButton, EventKind::Click) != Some(Action::Process) {
            return;
        }
        if !handled {
            status.update(|s| s.loading(REQUESTING_TEXT));
        }
        let executor = executor.clone();
        let request = request.clone();
        let job = job.clone();
        spawn(async move {
            let outcome = executor.execute(&request, handled, &surfaces, &control, &toasts).await;
            if let Some(label) = process_status(&outcome, &job, &executor.platform().clock_label()) {
                status.set(label);
            }
            if outcome.is_success() {
                refresh_logs.update(|n| *n += 1);
            }
        });
    };

    view! {
        <div class="process-action">
            <button
                type="button"
                class=move || control.with(ControlState::class)
                disabled=move || control.with(|c| c.busy)
                on:click=on_click
            >
                {move || control.with(|c| c.label.clone())}
            </button>
            <StatusText label=Signal::derive(move || status.get()) class="process-status"/>
        </div>
    }
    .into_any()
}
