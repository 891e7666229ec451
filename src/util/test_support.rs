//! Scripted [`Platform`] used by engine tests.
//!
//! Responses are queued up front, requests are recorded, and scheduled tasks
//! only run when a test drains them, so timing is fully logical.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::net::http::{FetchError, HttpRequest, HttpResponse};
use crate::util::platform::Platform;

type SleepHook = Box<dyn FnMut(usize)>;
type ScheduledTask = (Duration, Box<dyn FnOnce()>);

#[derive(Default)]
struct FakeInner {
    responses: RefCell<VecDeque<Result<HttpResponse, FetchError>>>,
    requests: RefCell<Vec<HttpRequest>>,
    hidden: Cell<bool>,
    decline_confirm: Cell<bool>,
    confirmations: RefCell<Vec<String>>,
    opened: RefCell<Vec<String>>,
    scheduled: RefCell<Vec<ScheduledTask>>,
    sleeps: RefCell<Vec<Duration>>,
    reloads: Cell<usize>,
    on_sleep: RefCell<Option<SleepHook>>,
}

/// Cloneable handle; clones share the same script and recordings.
#[derive(Clone, Default)]
pub(crate) struct FakePlatform {
    inner: Rc<FakeInner>,
}

impl FakePlatform {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, status: u16, body: &str) -> &Self {
        self.inner
            .responses
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub(crate) fn respond_json(&self, status: u16, value: &serde_json::Value) -> &Self {
        self.respond(status, &value.to_string())
    }

    pub(crate) fn fail(&self, error: FetchError) -> &Self {
        self.inner.responses.borrow_mut().push_back(Err(error));
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.inner.requests.borrow().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.inner.requests.borrow().len()
    }

    pub(crate) fn last_request(&self) -> Option<HttpRequest> {
        self.inner.requests.borrow().last().cloned()
    }

    pub(crate) fn set_visible(&self, visible: bool) {
        self.inner.hidden.set(!visible);
    }

    pub(crate) fn answer_confirm(&self, accept: bool) {
        self.inner.decline_confirm.set(!accept);
    }

    pub(crate) fn confirmations(&self) -> Vec<String> {
        self.inner.confirmations.borrow().clone()
    }

    pub(crate) fn opened(&self) -> Vec<String> {
        self.inner.opened.borrow().clone()
    }

    pub(crate) fn reloads(&self) -> usize {
        self.inner.reloads.get()
    }

    pub(crate) fn sleeps(&self) -> Vec<Duration> {
        self.inner.sleeps.borrow().clone()
    }

    /// Install a hook called after every sleep with the running sleep count.
    pub(crate) fn on_sleep(&self, hook: impl FnMut(usize) + 'static) {
        *self.inner.on_sleep.borrow_mut() = Some(Box::new(hook));
    }

    pub(crate) fn scheduled_delays(&self) -> Vec<Duration> {
        self.inner.scheduled.borrow().iter().map(|(delay, _)| *delay).collect()
    }

    /// Run every pending scheduled task in order; returns how many ran.
    pub(crate) fn run_scheduled(&self) -> usize {
        let pending: Vec<ScheduledTask> = self.inner.scheduled.borrow_mut().drain(..).collect();
        let count = pending.len();
        for (_, task) in pending {
            task();
        }
        count
    }
}

impl Platform for FakePlatform {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        self.inner.requests.borrow_mut().push(request);
        self.inner
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("no scripted response".to_owned())))
    }

    async fn sleep(&self, duration: Duration) {
        let count = {
            let mut sleeps = self.inner.sleeps.borrow_mut();
            sleeps.push(duration);
            sleeps.len()
        };
        let hook = self.inner.on_sleep.borrow_mut().take();
        if let Some(mut hook) = hook {
            hook(count);
            let mut slot = self.inner.on_sleep.borrow_mut();
            if slot.is_none() {
                *slot = Some(hook);
            }
        }
    }

    fn is_page_visible(&self) -> bool {
        !self.inner.hidden.get()
    }

    fn confirm(&self, message: &str) -> bool {
        self.inner.confirmations.borrow_mut().push(message.to_owned());
        !self.inner.decline_confirm.get()
    }

    fn open_tab(&self, url: &str) {
        self.inner.opened.borrow_mut().push(url.to_owned());
    }

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        self.inner.scheduled.borrow_mut().push((delay, task));
    }

    fn reload(&self) {
        self.inner.reloads.set(self.inner.reloads.get() + 1);
    }

    fn clock_label(&self) -> String {
        "12:34:56".to_owned()
    }
}
