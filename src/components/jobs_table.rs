//! Jobs table with filter form and prev/next pagination.
//!
//! SYSTEM CONTEXT
//! ==============
//! The table fetches on demand through a [`ListController`]: on mount, on
//! filter submit or reset, and on page links. Each jobs snapshot also carries
//! the summary counters, which are merged into the dashboard's
//! [`SummaryState`] so the cards stay consistent with the filtered table.

use leptos::prelude::*;

use super::status_label::StatusText;
use super::surface::{Skeleton, SkeletonLink, SurfaceContainer};
use crate::config::{DashboardConfig, FilterField};
use crate::net::controller::{ListController, Trigger};
use crate::state::panels::{PanelId, PanelRegistry, PanelState, SummaryState};
use crate::state::query::{FilterState, PageLink};
use crate::state::surface::{SurfaceKey, SurfaceRegistry};
use crate::state::toast::ToastState;
use crate::util::bindings::{Control, EventKind, resolve};
use crate::util::platform::{BrowserPlatform, spawn};
use crate::util::render::{JobRow, ListItem};

/// Page links point back at the dashboard itself.
const PAGE_LINK_BASE: &str = "";

#[component]
pub fn JobsTable(summary: RwSignal<SummaryState>) -> impl IntoView {
    let config = expect_context::<DashboardConfig>();
    let panels = expect_context::<PanelRegistry>();
    let surfaces = expect_context::<RwSignal<SurfaceRegistry>>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let binding = panels.binding(PanelId::Jobs);
    let surface = binding.surface.clone();
    let state = RwSignal::new(PanelState::<JobRow>::for_jobs(&config));
    let draft = RwSignal::new(state.with_untracked(|s| s.query.filters.clone()));
    let controller = ListController::new(BrowserPlatform, binding, "jobs", JobRow::from_record);

    let run = Callback::new(move |trigger: Trigger| {
        let controller = controller.clone();
        spawn(async move {
            if let Some(snapshot) = controller.dispatch(trigger, &state, &surfaces, &toasts).await {
                summary.update(|s| s.apply(&snapshot));
            }
        });
    });
    run.run(Trigger::Mount);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let fields = draft.with_untracked(|filters| filters.pairs().to_vec());
        if let Some(trigger) = resolve(Control::FilterForm, EventKind::Submit).and_then(|a| a.list_trigger(fields, 0)) {
            run.run(trigger);
        }
    };
    let on_reset = move |_| {
        draft.update(FilterState::reset);
        if let Some(trigger) = resolve(Control::FilterReset, EventKind::Click).and_then(|a| a.list_trigger(Vec::new(), 0)) {
            run.run(trigger);
        }
    };

    let label = Signal::derive(move || state.with(|s| s.label.clone()));
    let links = Memo::new(move |_| state.with(|s| s.query.page_links(PAGE_LINK_BASE)));
    let fields = config.jobs.filters.clone();
    let row_surface = surface.clone();

    view! {
        <section class="jobs-panel" aria-label="Jobs">
            <header class="jobs-panel__header">
                <h2>"Jobs"</h2>
                <StatusText label=label/>
            </header>
            <form class="jobs-filters" on:submit=on_submit>
                {fields.into_iter().map(|field| filter_input(field, draft)).collect_view()}
                <button type="submit" class="btn btn-primary">"Filter"</button>
                <button type="button" class="btn" on:click=on_reset>"Clear"</button>
            </form>
            <Skeleton surface=surface.clone() lines=5/>
            <SurfaceContainer surface=surface class="jobs-feed">
                <table class="jobs-table">
                    <thead>
                        <tr>
                            <th>"Job"</th>
                            <th>"Source"</th>
                            <th>"Profile"</th>
                            <th>"Status"</th>
                            <th>"Language"</th>
                            <th>"Accuracy"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let surface = row_surface.clone();
                            state
                                .with(|s| s.rows.items().to_vec())
                                .into_iter()
                                .map(move |item| job_row(item, surface.clone()))
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </SurfaceContainer>
            <nav class="pagination" aria-label="Jobs pages">
                {move || page_link(links.get().prev, "Previous", run)}
                <span class="pagination__label">{move || links.get().label}</span>
                {move || page_link(links.get().next, "Next", run)}
            </nav>
        </section>
    }
}

fn filter_input(field: FilterField, draft: RwSignal<FilterState>) -> AnyView {
    let name = field.name.clone();
    let current = {
        let name = name.clone();
        move || draft.with(|filters| filters.get(&name).to_owned())
    };
    if field.options.is_empty() {
        view! {
            <label class="jobs-filters__field">
                <span>{field.label}</span>
                <input
                    type="text"
                    name=field.name
                    prop:value=current
                    on:input=move |ev| draft.update(|filters| filters.set(&name, &event_target_value(&ev)))
                />
            </label>
        }
        .into_any()
    } else {
        view! {
            <label class="jobs-filters__field">
                <span>{field.label}</span>
                <select
                    name=field.name
                    prop:value=current
                    on:change=move |ev| draft.update(|filters| filters.set(&name, &event_target_value(&ev)))
                >
                    {field
                        .options
                        .into_iter()
                        .map(|option| view! { <option value=option.value>{option.label}</option> })
                        .collect_view()}
                </select>
            </label>
        }
        .into_any()
    }
}

fn page_link(link: PageLink, text: &'static str, run: Callback<Trigger>) -> impl IntoView {
    let target = link.target;
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        let Some(page) = target else {
            return;
        };
        if let Some(trigger) = resolve(Control::PageLink, EventKind::Click).and_then(|a| a.list_trigger(Vec::new(), page)) {
            run.run(trigger);
        }
    };
    view! {
        <a
            class=link.class()
            href=link.href.clone()
            aria-disabled=link.aria_disabled()
            data-page=target.map(|page| page.to_string())
            on:click=on_click
        >
            {text}
        </a>
    }
}

fn job_row(item: ListItem<JobRow>, surface: SurfaceKey) -> AnyView {
    match item {
        ListItem::Empty(text) => view! {
            <tr class="jobs-table__empty">
                <td colspan="6">{text}</td>
            </tr>
        }
        .into_any(),
        ListItem::Row(row) => {
            let job_id = row.id.clone();
            view! {
                <tr data-job-id=job_id>
                    <td>
                        <SkeletonLink href=row.detail_href surface=surface>
                            {row.id}
                        </SkeletonLink>
                    </td>
                    <td>{row.source_name}</td>
                    <td>{row.profile_id}</td>
                    <td>
                        <span class=row.status.class>{row.status.text}</span>
                    </td>
                    <td>{row.language}</td>
                    <td>
                        {match row.accuracy {
                            Some(badge) => view! {
                                <span class=badge.class aria-label=badge.aria_label>{badge.text}</span>
                            }
                            .into_any(),
                            None => "-".into_any(),
                        }}
                    </td>
                </tr>
            }
            .into_any()
        }
    }
}
