//! Live incident feed.

use leptos::prelude::*;

use super::status_label::StatusText;
use super::surface::{Skeleton, SkeletonLink, SurfaceContainer};
use crate::state::panels::PanelState;
use crate::state::surface::SurfaceKey;
use crate::util::render::{IncidentRow, ListItem};

#[component]
pub fn IncidentFeed(state: RwSignal<PanelState<IncidentRow>>, #[prop(into)] surface: SurfaceKey) -> impl IntoView {
    let label = Signal::derive(move || state.with(|s| s.label.clone()));
    let link_surface = surface.clone();

    view! {
        <section class="incident-panel" aria-label="Incidents">
            <header class="incident-panel__header">
                <h2>"Incidents"</h2>
                <StatusText label=label/>
            </header>
            <Skeleton surface=surface.clone()/>
            <SurfaceContainer surface=surface class="incident-feed">
                <ul class="incident-list">
                    {move || {
                        let surface = link_surface.clone();
                        state
                            .with(|s| s.rows.items().to_vec())
                            .into_iter()
                            .map(move |item| incident_item(item, surface.clone()))
                            .collect_view()
                    }}
                </ul>
            </SurfaceContainer>
        </section>
    }
}

fn incident_item(item: ListItem<IncidentRow>, surface: SurfaceKey) -> AnyView {
    match item {
        ListItem::Empty(text) => view! { <li class="incident-list__empty">{text}</li> }.into_any(),
        ListItem::Row(row) => view! {
            <li class="incident-item">
                <span class=row.badge.class>{row.badge.text}</span>
                <div class="incident-item__body">
                    <strong class="incident-item__event">{row.event}</strong>
                    <p class="incident-item__message">{row.message}</p>
                </div>
                <time class="incident-item__time">{row.timestamp}</time>
                {row.job.map(|job| {
                    view! {
                        <SkeletonLink href=job.href surface=surface class="incident-item__job">
                            {job.text}
                        </SkeletonLink>
                    }
                })}
            </li>
        }
        .into_any(),
    }
}
