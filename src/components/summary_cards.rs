//! Summary counters and accuracy metric cards.
//!
//! SYSTEM CONTEXT
//! ==============
//! Fed by two writers: the summary poller started by the dashboard page and
//! the jobs table, whose snapshots also carry `summary`/`accuracy` blocks.
//! Both merge into the same [`SummaryState`] signal.

use leptos::prelude::*;

use super::status_label::StatusText;
use super::surface::{Skeleton, SurfaceContainer};
use crate::state::panels::SummaryState;
use crate::state::surface::SurfaceKey;

/// Job counters shown as cards, as `(field, caption)`.
pub const SUMMARY_CARDS: [(&str, &str); 4] = [
    ("total", "Total jobs"),
    ("awaiting_review", "Awaiting review"),
    ("approved", "Approved"),
    ("failed", "Failed"),
];

/// Accuracy metrics shown under the counters.
pub const ACCURACY_CARDS: [(&str, &str); 5] = [
    ("evaluated", "Evaluated"),
    ("passing", "Passing"),
    ("needs_review", "Needs review"),
    ("average_score", "Average score"),
    ("average_wer", "Word error rate"),
];

#[component]
pub fn SummaryCards(summary: RwSignal<SummaryState>, #[prop(into)] surface: SurfaceKey) -> impl IntoView {
    let label = Signal::derive(move || summary.with(|s| s.label.clone()));

    view! {
        <section class="summary-panel" aria-label="Pipeline summary">
            <header class="summary-panel__header">
                <h2>"Overview"</h2>
                <StatusText label=label/>
            </header>
            <Skeleton surface=surface.clone() lines=2/>
            <SurfaceContainer surface=surface class="summary-cards">
                {SUMMARY_CARDS
                    .iter()
                    .map(|&(field, caption)| {
                        view! {
                            <div class="summary-card" data-summary-field=field>
                                <span class="summary-card__value">{move || summary.with(|s| s.field(field))}</span>
                                <span class="summary-card__caption">{caption}</span>
                            </div>
                        }
                    })
                    .collect_view()}
                {ACCURACY_CARDS
                    .iter()
                    .map(|&(field, caption)| {
                        view! {
                            <div class="summary-card summary-card--accuracy" data-accuracy-field=field>
                                <span class="summary-card__value">
                                    {move || summary.with(|s| s.accuracy_field(field))}
                                </span>
                                <span class="summary-card__caption">{caption}</span>
                            </div>
                        }
                    })
                    .collect_view()}
            </SurfaceContainer>
        </section>
    }
}
