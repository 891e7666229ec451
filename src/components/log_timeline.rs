//! Job event timeline with level/event filters, load more, and export.
//!
//! SYSTEM CONTEXT
//! ==============
//! Fetched on demand through a [`ListController`]. Load more appends the next
//! page; filter submit and reset replace the list from page 1. A bump of the
//! `refresh` signal (e.g. after a processing request) reloads the first page
//! with the filters already applied.

#[cfg(test)]
#[path = "log_timeline_test.rs"]
mod log_timeline_test;

use leptos::prelude::*;

use super::status_label::StatusText;
use super::surface::{Skeleton, SurfaceContainer};
use crate::config::DashboardConfig;
use crate::net::api::export_url;
use crate::net::controller::{ListController, Trigger};
use crate::state::panels::{PanelId, PanelRegistry, PanelState};
use crate::state::query::FilterState;
use crate::state::surface::SurfaceRegistry;
use crate::state::toast::ToastState;
use crate::util::bindings::{Action, Control, EventKind, resolve};
use crate::util::platform::{BrowserPlatform, Platform, spawn};
use crate::util::render::{ListItem, LogRow};

/// Level filter choices as `(value, caption)`.
pub const LEVEL_OPTIONS: [(&str, &str); 5] = [
    ("", "All levels"),
    ("debug", "Debug"),
    ("info", "Info"),
    ("warning", "Warning"),
    ("error", "Error"),
];

/// Open the `format` export of the applied `filters` in a new tab.
/// Returns whether anything was opened.
pub fn export_logs<P: Platform>(platform: &P, base: &str, format: &str, filters: &FilterState) -> bool {
    match export_url(base, format, filters) {
        Some(url) => {
            platform.open_tab(&url);
            true
        }
        None => {
            leptos::logging::warn!("log export requested without an endpoint");
            false
        }
    }
}

#[component]
pub fn LogTimeline(refresh: RwSignal<u32>) -> impl IntoView {
    let config = expect_context::<DashboardConfig>();
    let panels = expect_context::<PanelRegistry>();
    let surfaces = expect_context::<RwSignal<SurfaceRegistry>>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let binding = panels.binding(PanelId::Logs);
    let surface = binding.surface.clone();
    let state = RwSignal::new(PanelState::<LogRow>::for_logs());
    let draft = RwSignal::new(state.with_untracked(|s| s.query.filters.clone()));
    let controller = ListController::new(BrowserPlatform, binding, "logs", LogRow::from_record);

    let run = Callback::new(move |trigger: Trigger| {
        let controller = controller.clone();
        spawn(async move {
            controller.dispatch(trigger, &state, &surfaces, &toasts).await;
        });
    });
    run.run(Trigger::Mount);

    Effect::new(move || {
        if refresh.get() > 0 {
            run.run(Trigger::Refresh);
        }
    });

    let list_event = move |control: Control, event: EventKind, fields: Vec<(String, String)>| {
        if let Some(trigger) = resolve(control, event).and_then(|action| action.list_trigger(fields, 0)) {
            run.run(trigger);
        }
    };
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        list_event(
            Control::FilterForm,
            EventKind::Submit,
            draft.with_untracked(|filters| filters.pairs().to_vec()),
        );
    };
    let on_reset = move |_| {
        draft.update(FilterState::reset);
        list_event(Control::FilterReset, EventKind::Click, Vec::new());
    };
    let on_more = move |_| list_event(Control::LoadMore, EventKind::Click, Vec::new());

    let export_base = config.job.logs_export.clone();
    let export_buttons = config
        .job
        .export_formats
        .iter()
        .map(|format| {
            let format = format.clone();
            let base = export_base.clone();
            let caption = format!("Export {}", format.to_uppercase());
            let on_export = move |_| {
                if resolve(Control::ExportButton, EventKind::Click) != Some(Action::Export) {
                    return;
                }
                state.with_untracked(|s| export_logs(&BrowserPlatform, &base, &format, &s.query.filters));
            };
            view! {
                <button type="button" class="btn" on:click=on_export>
                    {caption}
                </button>
            }
        })
        .collect_view();

    let label = Signal::derive(move || state.with(|s| s.label.clone()));
    let more_hidden = move || state.with(|s| !s.loaded || !s.query.can_load_more());

    view! {
        <section class="logs-panel" aria-label="Job events">
            <header class="logs-panel__header">
                <h2>"Events"</h2>
                <StatusText label=label/>
                <div class="logs-panel__exports">{export_buttons}</div>
            </header>
            <form class="logs-filters" on:submit=on_submit>
                <select
                    name="level"
                    prop:value=move || draft.with(|f| f.get("level").to_owned())
                    on:change=move |ev| draft.update(|f| f.set("level", &event_target_value(&ev)))
                >
                    {LEVEL_OPTIONS
                        .iter()
                        .map(|&(value, caption)| view! { <option value=value>{caption}</option> })
                        .collect_view()}
                </select>
                <input
                    type="text"
                    name="event"
                    placeholder="Event"
                    prop:value=move || draft.with(|f| f.get("event").to_owned())
                    on:input=move |ev| draft.update(|f| f.set("event", &event_target_value(&ev)))
                />
                <button type="submit" class="btn btn-primary">"Filter"</button>
                <button type="button" class="btn" on:click=on_reset>"Clear"</button>
            </form>
            <Skeleton surface=surface.clone() lines=4/>
            <SurfaceContainer surface=surface class="logs-timeline">
                <ol class="log-list">
                    {move || state.with(|s| s.rows.items().to_vec()).into_iter().map(log_item).collect_view()}
                </ol>
            </SurfaceContainer>
            <button type="button" class="btn logs-panel__more" hidden=more_hidden on:click=on_more>
                "Load more"
            </button>
        </section>
    }
}

fn log_item(item: ListItem<LogRow>) -> AnyView {
    match item {
        ListItem::Empty(text) => view! { <li class="log-list__empty">{text}</li> }.into_any(),
        ListItem::Row(row) => view! {
            <li class="log-entry">
                <span class=row.badge.class>{row.badge.text}</span>
                <div class="log-entry__body">
                    <strong class="log-entry__event">{row.event}</strong>
                    <p class="log-entry__message">{row.message}</p>
                </div>
                <time class="log-entry__time">{row.when}</time>
            </li>
        }
        .into_any(),
    }
}
