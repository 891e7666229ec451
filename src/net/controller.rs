//! Filter & pagination controller driver for list panels.
//!
//! SYSTEM CONTEXT
//! ==============
//! The jobs table and the log timeline are fetched on demand: on mount, on
//! filter submit or reset, on page change, and on load more. A
//! [`ListController`] turns each [`Trigger`] into a [`FetchPlan`] via the
//! panel's [`PanelQuery`], runs it through a [`Poller`], and applies the
//! resulting snapshot to the panel's rows, pagination, and status label.
//!
//! ERROR HANDLING
//! ==============
//! A failed fetch marks the panel errored, flags its surface, and raises an
//! error toast when the panel is configured with one. Rows already rendered
//! stay on screen.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use serde::de::DeserializeOwned;

use super::poller::{BusyPolicy, FetchOutcome, PollSpec, Poller};
use super::types::Snapshot;
use crate::state::panels::{PanelBinding, PanelState};
use crate::state::query::{FetchPlan, PanelQuery};
use crate::state::store::Store;
use crate::state::surface::SurfaceRegistry;
use crate::state::toast::{ToastRequest, ToastState, notify};
use crate::util::platform::Platform;

/// What the user (or page) asked the panel to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    Mount,
    /// Filter form submitted with these fields.
    Submit(Vec<(String, String)>),
    Reset,
    GoTo(u32),
    LoadMore,
    /// One-shot reload of the first page, e.g. after a mutation.
    Refresh,
}

impl Trigger {
    /// Plan for this trigger, or `None` when it is a no-op.
    pub fn plan(&self, query: &mut PanelQuery) -> Option<FetchPlan> {
        match self {
            Self::Mount => Some(query.mount()),
            Self::Submit(fields) => Some(query.submit(fields)),
            Self::Reset => Some(query.reset()),
            Self::GoTo(page) => query.go_to(*page),
            Self::LoadMore => query.load_more(),
            Self::Refresh => Some(query.refresh()),
        }
    }
}

/// Fetch driver for one list panel.
#[derive(Clone, Debug)]
pub struct ListController<P, R, V> {
    poller: Poller<P>,
    binding: PanelBinding,
    records_key: &'static str,
    row: fn(&R) -> V,
}

impl<P, R, V> ListController<P, R, V>
where
    P: Platform,
    R: DeserializeOwned + Default,
{
    /// `records_key` names the payload array (`jobs`, `logs`); `row` builds
    /// one view-model per record.
    pub fn new(platform: P, binding: PanelBinding, records_key: &'static str, row: fn(&R) -> V) -> Self {
        let spec = PollSpec::from_binding(&binding, BusyPolicy::EveryTick);
        Self { poller: Poller::new(platform, spec), binding, records_key, row }
    }

    pub fn is_enabled(&self) -> bool {
        self.poller.is_enabled()
    }

    pub fn binding(&self) -> &PanelBinding {
        &self.binding
    }

    /// Run `trigger` against the panel. Returns the applied snapshot, or
    /// `None` when nothing was applied (no-op trigger, disabled panel,
    /// failure, or stale response).
    pub async fn dispatch<Q, S, T>(&self, trigger: Trigger, panel: &Q, surfaces: &S, toasts: &T) -> Option<Snapshot<R>>
    where
        Q: Store<PanelState<V>>,
        S: Store<SurfaceRegistry>,
        T: Store<ToastState> + Clone + 'static,
    {
        if !self.is_enabled() {
            return None;
        }
        let labels = &self.binding.labels;
        let mut planned = None;
        panel.modify(|state| {
            planned = trigger.plan(&mut state.query);
            if planned.is_some() {
                state.label.loading(labels.loading);
            }
        });
        let plan = planned?;
        let query = panel.peek(|state| state.query.query_pairs(plan));

        let mut applied = None;
        let outcome = self
            .poller
            .fetch_once(
                &query,
                surfaces,
                |payload| {
                    let snapshot = Snapshot::<R>::from_payload(&payload, Some(self.records_key));
                    panel.modify(|state| {
                        state
                            .rows
                            .apply(&snapshot.records, plan.mode, &self.binding.empty_label, self.row);
                        state.query.complete(snapshot.page, snapshot.has_more);
                        state.label.updated(snapshot.generated_at.as_deref(), labels.live);
                        state.loaded = true;
                    });
                    applied = Some(snapshot);
                },
                |_| {
                    panel.modify(|state| {
                        state.query.fail();
                        state.label.failed(labels.failure);
                    });
                    if let Some(message) = labels.failure_toast {
                        notify(self.poller.platform(), toasts, ToastRequest::error(message));
                    }
                },
            )
            .await;
        if outcome == FetchOutcome::Stale {
            leptos::logging::log!("{:?} panel: newer results already shown", self.binding.id);
        }
        applied
    }
}
