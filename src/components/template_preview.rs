//! Delivery template selector and rendered preview on the job page.

#[cfg(test)]
#[path = "template_preview_test.rs"]
mod template_preview_test;

use leptos::prelude::*;

use super::status_label::StatusText;
use crate::config::{DashboardConfig, TemplateEntry};
use crate::net::api::fetch_template_preview;
use crate::net::http::FetchError;
use crate::net::poller::Sequencer;
use crate::state::panels::StatusLabel;
use crate::util::bindings::{Action, Control, EventKind, resolve};
use crate::util::platform::{BrowserPlatform, Platform, spawn};

pub const LOADING_TEXT: &str = "Loading preview...";
pub const EMPTY_TEXT: &str = "No content to display.";
pub const FAILURE_TEXT: &str = "Failed to load preview.";
pub const UNAVAILABLE_LABEL: &str = "Preview unavailable";

/// Description of the selected template.
pub fn template_description(templates: &[TemplateEntry], id: &str) -> String {
    templates
        .iter()
        .find(|template| template.id == id)
        .map(|template| template.description.trim())
        .filter(|description| !description.is_empty())
        .unwrap_or("No description.")
        .to_owned()
}

/// Preview body and status label for a finished preview request.
pub fn preview_result(result: &Result<String, FetchError>, clock: &str) -> (String, StatusLabel) {
    let mut label = StatusLabel::default();
    match result {
        Ok(rendered) => {
            let rendered = rendered.trim();
            let text = if rendered.is_empty() { EMPTY_TEXT } else { rendered };
            label.updated(None, &format!("Updated at {clock}"));
            (text.to_owned(), label)
        }
        Err(_) => {
            label.failed(UNAVAILABLE_LABEL);
            (FAILURE_TEXT.to_owned(), label)
        }
    }
}

#[component]
pub fn TemplatePreview() -> impl IntoView {
    let config = expect_context::<DashboardConfig>();
    let templates = config.job.templates.clone();
    if templates.is_empty() {
        return ().into_any();
    }

    let initial = if config.job.selected_template.is_empty() {
        templates.first().map(|t| t.id.clone()).unwrap_or_default()
    } else {
        config.job.selected_template.clone()
    };
    let selected = RwSignal::new(initial);
    let output = RwSignal::new(String::new());
    let label = RwSignal::new(StatusLabel::default());
    let sequencer = Sequencer::default();

    let refresh = move || {
        let sequencer = sequencer.clone();
        let template_id = selected.get_untracked();
        output.set(LOADING_TEXT.to_owned());
        spawn(async move {
            let seq = sequencer.issue();
            let platform = BrowserPlatform;
            let result = fetch_template_preview(&platform, &template_id).await;
            if !sequencer.accept(seq) {
                return;
            }
            if let Err(e) = &result {
                leptos::logging::warn!("template preview {template_id} failed: {e}");
            }
            let (text, status) = preview_result(&result, &platform.clock_label());
            output.set(text);
            label.set(status);
        });
    };
    refresh();

    let on_change = {
        let refresh = refresh.clone();
        move |ev: leptos::ev::Event| {
            selected.set(event_target_value(&ev));
            if resolve(Control::TemplateSelect, EventKind::Change) == Some(Action::PreviewStored) {
                refresh();
            }
        }
    };

    let descriptions = templates.clone();
    let description = move || selected.with(|id| template_description(&descriptions, id));

    view! {
        <section class="template-preview" aria-label="Delivery preview">
            <header class="template-preview__header">
                <label class="template-preview__select">
                    <span>"Template"</span>
                    <select prop:value=move || selected.get() on:change=on_change>
                        {templates
                            .into_iter()
                            .map(|t| view! { <option value=t.id>{t.name}</option> })
                            .collect_view()}
                    </select>
                </label>
                <StatusText label=Signal::derive(move || label.get())/>
            </header>
            <p class="template-preview__description">{description}</p>
            <pre class="template-preview__content">{move || output.get()}</pre>
        </section>
    }
    .into_any()
}
