//! Snapshot poller: periodic and on-demand JSON fetches for one panel.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each live panel owns one [`Poller`]. It fetches immediately on start, then
//! re-fetches every interval while the page is visible, and toggles the
//! panel's surface flags around every request. Rendering is left to the
//! caller's `on_success` callback.
//!
//! DESIGN
//! ======
//! - Requests carry a sequence number from a [`Sequencer`]; a response older
//!   than one already applied is dropped, so a slow request can never
//!   overwrite newer content.
//! - An empty endpoint disables the poller entirely: no task is spawned and
//!   no request is ever sent.
//! - Stopping is cooperative. [`PollHandle::stop`] clears a shared flag that
//!   the loop checks after each sleep; an in-flight request is allowed to
//!   finish.
//!
//! ERROR HANDLING
//! ==============
//! Transport errors, non-2xx statuses, and bodies that are not JSON are all
//! failures: the surface gets its error flag, rendered content is left
//! alone, and the next tick tries again.

#[cfg(test)]
#[path = "poller_test.rs"]
mod poller_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use serde_json::Value;

use super::http::{FetchError, HttpRequest, HttpResponse};
use crate::state::panels::PanelBinding;
use crate::state::store::Store;
use crate::state::surface::{SurfaceKey, SurfaceRegistry, set_busy, set_error, settle};
use crate::util::platform::{MAX_TIMER_DELAY, Platform, spawn};
use crate::util::query_string::with_query;

/// When the surface is marked busy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BusyPolicy {
    /// Only until the first successful load; later refreshes are silent.
    #[default]
    FirstLoadOnly,
    /// Around every request.
    EveryTick,
}

/// What to poll and how often.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollSpec {
    pub endpoint: String,
    pub interval: Duration,
    pub surface: SurfaceKey,
    pub busy: BusyPolicy,
}

impl PollSpec {
    pub fn new(endpoint: impl Into<String>, interval: Duration) -> Self {
        Self {
            endpoint: endpoint.into().trim().to_owned(),
            interval,
            surface: SurfaceKey::default(),
            busy: BusyPolicy::default(),
        }
    }

    /// Poll settings for a registered panel.
    pub fn from_binding(binding: &PanelBinding, busy: BusyPolicy) -> Self {
        Self::new(binding.endpoint.clone(), binding.interval)
            .with_surface(binding.surface.clone())
            .with_busy(busy)
    }

    /// Raise the interval to at least `floor`, within the timer limit.
    #[must_use]
    pub fn with_floor(mut self, floor: Duration) -> Self {
        self.interval = self.interval.max(floor).min(MAX_TIMER_DELAY);
        self
    }

    #[must_use]
    pub fn with_surface(mut self, surface: SurfaceKey) -> Self {
        self.surface = surface;
        self
    }

    #[must_use]
    pub fn with_busy(mut self, busy: BusyPolicy) -> Self {
        self.busy = busy;
        self
    }

    /// An empty endpoint means the panel is not present on this page.
    pub fn is_enabled(&self) -> bool {
        !self.endpoint.is_empty()
    }
}

/// Monotonic request numbering shared by clones of one poller.
#[derive(Clone, Debug, Default)]
pub struct Sequencer {
    issued: Arc<AtomicU64>,
    applied: Arc<AtomicU64>,
}

impl Sequencer {
    /// Number the next request.
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Whether a response for `seq` may be applied. Accepting `seq` retires
    /// every older number.
    pub fn accept(&self, seq: u64) -> bool {
        self.applied.fetch_max(seq, Ordering::Relaxed) < seq
    }

    /// Highest sequence number applied so far.
    pub fn applied(&self) -> u64 {
        self.applied.load(Ordering::Relaxed)
    }
}

/// Stop switch of a running poller.
#[derive(Clone, Debug)]
pub struct PollHandle {
    alive: Arc<AtomicBool>,
}

impl Default for PollHandle {
    fn default() -> Self {
        Self { alive: Arc::new(AtomicBool::new(true)) }
    }
}

impl PollHandle {
    /// Cancel future ticks. Idempotent.
    pub fn stop(&self) {
        self.alive.store(false, Ordering::Relaxed);
    }

    pub fn is_active(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }
}

/// Result of one fetch attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Payload handed to `on_success`.
    Applied,
    /// `on_failure` ran and the surface is flagged.
    Failed(FetchError),
    /// A newer response was already applied; this one was dropped.
    Stale,
    /// Nothing was requested (disabled poller or hidden page).
    Skipped,
}

/// Fetch loop for one endpoint.
#[derive(Clone, Debug)]
pub struct Poller<P> {
    platform: P,
    spec: PollSpec,
    sequencer: Sequencer,
    loaded: Arc<AtomicBool>,
    handle: PollHandle,
}

impl<P: Platform> Poller<P> {
    pub fn new(platform: P, spec: PollSpec) -> Self {
        Self {
            platform,
            spec,
            sequencer: Sequencer::default(),
            loaded: Arc::new(AtomicBool::new(false)),
            handle: PollHandle::default(),
        }
    }

    pub fn spec(&self) -> &PollSpec {
        &self.spec
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn handle(&self) -> PollHandle {
        self.handle.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.spec.is_enabled()
    }

    /// Whether any fetch has succeeded yet.
    pub fn has_loaded(&self) -> bool {
        self.loaded.load(Ordering::Relaxed)
    }

    /// One fetch with extra query parameters, regardless of visibility.
    pub async fn fetch_once<S>(
        &self,
        query: &[(String, String)],
        surfaces: &S,
        on_success: impl FnOnce(Value),
        on_failure: impl FnOnce(&FetchError),
    ) -> FetchOutcome
    where
        S: Store<SurfaceRegistry>,
    {
        if !self.is_enabled() {
            return FetchOutcome::Skipped;
        }
        let seq = self.sequencer.issue();
        let surface = &self.spec.surface;
        let mark_busy = match self.spec.busy {
            BusyPolicy::EveryTick => true,
            BusyPolicy::FirstLoadOnly => !self.has_loaded(),
        };
        if mark_busy {
            set_busy(surfaces, surface, true);
        }

        let url = with_query(&self.spec.endpoint, query.iter().map(|(k, v)| (k, v)));
        let result = self
            .platform
            .send(HttpRequest::get_json(url))
            .await
            .and_then(HttpResponse::require_success)
            .and_then(|resp| resp.json());

        if !self.sequencer.accept(seq) {
            leptos::logging::log!("poll {}: dropping stale response #{seq}", self.spec.endpoint);
            return FetchOutcome::Stale;
        }
        match result {
            Ok(payload) => {
                on_success(payload);
                self.loaded.store(true, Ordering::Relaxed);
                settle(surfaces, surface);
                FetchOutcome::Applied
            }
            Err(e) => {
                leptos::logging::warn!("poll {} failed: {e}", self.spec.endpoint);
                on_failure(&e);
                set_error(surfaces, surface, true);
                set_busy(surfaces, surface, false);
                FetchOutcome::Failed(e)
            }
        }
    }

    /// One scheduled tick: skipped while the page is hidden.
    pub async fn tick<S>(
        &self,
        surfaces: &S,
        on_success: &mut impl FnMut(Value),
        on_failure: &mut impl FnMut(&FetchError),
    ) -> FetchOutcome
    where
        S: Store<SurfaceRegistry>,
    {
        if !self.platform.is_page_visible() {
            return FetchOutcome::Skipped;
        }
        self.fetch_once(&[], surfaces, |v| on_success(v), |e| on_failure(e))
            .await
    }

    /// Fetch now, then every interval until stopped.
    pub async fn run<S>(&self, surfaces: &S, mut on_success: impl FnMut(Value), mut on_failure: impl FnMut(&FetchError))
    where
        S: Store<SurfaceRegistry>,
    {
        if !self.is_enabled() || !self.handle.is_active() {
            return;
        }
        self.fetch_once(&[], surfaces, |v| on_success(v), |e| on_failure(e))
            .await;
        loop {
            self.platform.sleep(self.spec.interval).await;
            if !self.handle.is_active() {
                break;
            }
            self.tick(surfaces, &mut on_success, &mut on_failure).await;
        }
    }
}

impl<P: Platform + 'static> Poller<P> {
    /// Spawn [`Poller::run`] on the event loop and return its stop handle.
    ///
    /// A disabled poller returns a handle without spawning anything.
    pub fn start<S>(
        self,
        surfaces: S,
        on_success: impl FnMut(Value) + 'static,
        on_failure: impl FnMut(&FetchError) + 'static,
    ) -> PollHandle
    where
        S: Store<SurfaceRegistry> + 'static,
    {
        let handle = self.handle();
        if !self.is_enabled() {
            return handle;
        }
        spawn(async move {
            self.run(&surfaces, on_success, on_failure).await;
        });
        handle
    }
}
