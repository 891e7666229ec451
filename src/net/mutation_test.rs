use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::state::auth::{CSRF_FIELD, CSRF_HEADER};
use crate::state::store::cell;
use crate::state::toast::ToastVariant;
use crate::util::test_support::FakePlatform;

struct Harness {
    platform: FakePlatform,
    executor: MutationExecutor<FakePlatform>,
    surfaces: Rc<RefCell<SurfaceRegistry>>,
    control: Rc<RefCell<ControlState>>,
    toasts: Rc<RefCell<ToastState>>,
}

impl Harness {
    fn new() -> Self {
        let platform = FakePlatform::new();
        let mut registry = SurfaceRegistry::default();
        registry.register(&SurfaceKey::from("settings-form"));
        Self {
            executor: MutationExecutor::new(platform.clone(), AuthContext::with_token("tok-1")),
            platform,
            surfaces: cell(registry),
            control: cell(ControlState::new("Save", Some("Saving..."))),
            toasts: cell(ToastState::default()),
        }
    }

    fn run(&self, request: &MutationRequest, already_handled: bool) -> MutationOutcome {
        block_on(self.executor.execute(request, already_handled, &self.surfaces, &self.control, &self.toasts))
    }

    fn last_toast(&self) -> Option<(String, ToastVariant, Option<String>)> {
        self.toasts
            .borrow()
            .toasts
            .last()
            .map(|t| (t.message.clone(), t.variant, t.title.clone()))
    }
}

fn form_request() -> MutationRequest {
    MutationRequest::post("/settings/asr")
        .with_form(vec![("model".to_owned(), "large".to_owned())])
        .on_surface(SurfaceKey::from("settings-form"))
}

#[test]
fn control_state_swaps_labels() {
    let mut control = ControlState::new("Save", None);
    control.begin();
    assert!(control.busy);
    assert_eq!(control.label, "Processing...");
    assert_eq!(control.class(), "btn btn-primary loading");
    control.restore();
    assert!(!control.busy);
    assert_eq!(control.label, "Save");
}

#[test]
fn already_handled_trigger_is_ignored() {
    let h = Harness::new();
    assert_eq!(h.run(&form_request(), true), MutationOutcome::Skipped);
    assert_eq!(h.platform.request_count(), 0);
    assert!(h.toasts.borrow().is_empty());
}

#[test]
fn declined_confirmation_sends_nothing() {
    let h = Harness::new();
    h.platform.answer_confirm(false);
    let request = MutationRequest::delete("/settings/templates/9").with_confirm("Remove this template?");
    assert_eq!(h.run(&request, false), MutationOutcome::Declined);
    assert_eq!(h.platform.request_count(), 0);
    assert_eq!(h.platform.confirmations(), vec!["Remove this template?"]);
    assert!(!h.control.borrow().busy);
}

#[test]
fn empty_confirmation_prompt_is_not_shown() {
    let h = Harness::new();
    h.platform.respond(200, "");
    let request = form_request().with_confirm("");
    assert!(h.run(&request, false).is_success());
    assert!(h.platform.confirmations().is_empty());
}

#[test]
fn success_attaches_csrf_and_uses_payload_message() {
    let h = Harness::new();
    h.platform
        .respond_json(200, &json!({"message": "Settings saved", "updated_at_human": "10:01"}));
    let outcome = h.run(&form_request(), false);
    assert!(outcome.is_success());

    let request = h.platform.last_request().unwrap_or_else(|| HttpRequest::get_json(""));
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.header(CSRF_HEADER), Some("tok-1"));
    assert_eq!(request.header("X-Requested-With"), Some("fetch"));
    assert_eq!(request.form_field(CSRF_FIELD), Some("tok-1"));
    assert_eq!(request.form_field("model"), Some("large"));

    assert_eq!(
        h.last_toast(),
        Some(("Settings saved".to_owned(), ToastVariant::Success, Some("Success".to_owned())))
    );
    let control = h.control.borrow();
    assert!(!control.busy);
    assert_eq!(control.label, "Save");
    assert_eq!(control.updated.as_deref(), Some("Updated at 10:01"));
    assert!(!h.surfaces.borrow().flags(&SurfaceKey::from("settings-form")).busy);
}

#[test]
fn custom_success_message_wins() {
    let h = Harness::new();
    h.platform.respond_json(200, &json!({"message": "from server"}));
    let request = form_request().with_messages(Some("Saved!".to_owned()), None);
    h.run(&request, false);
    assert_eq!(h.last_toast().map(|t| t.0), Some("Saved!".to_owned()));
}

#[test]
fn empty_body_is_still_success_with_default_message() {
    let h = Harness::new();
    h.platform.respond(204, "");
    let outcome = h.run(&form_request(), false);
    assert_eq!(outcome, MutationOutcome::Succeeded(MutationReply::default()));
    assert_eq!(h.last_toast().map(|t| t.0), Some(DEFAULT_SUCCESS_MESSAGE.to_owned()));
    assert_eq!(h.control.borrow().updated, None);
}

#[test]
fn existing_csrf_field_is_not_overwritten() {
    let h = Harness::new();
    h.platform.respond(200, "{}");
    let request = MutationRequest::post("/settings/templates")
        .with_form(vec![(CSRF_FIELD.to_owned(), "form-token".to_owned())]);
    h.run(&request, false);
    let sent = h.platform.last_request().unwrap_or_else(|| HttpRequest::get_json(""));
    assert_eq!(sent.form_field(CSRF_FIELD), Some("form-token"));
}

#[test]
fn failure_restores_control_and_shows_error() {
    let h = Harness::new();
    h.platform.respond(403, "forbidden");
    let request = form_request()
        .with_messages(None, Some("Could not save.".to_owned()))
        .with_titles("Saved", "Save failed");
    let outcome = h.run(&request, false);
    assert_eq!(outcome, MutationOutcome::Failed(FetchError::Status(403)));
    assert_eq!(
        h.last_toast(),
        Some(("Could not save.".to_owned(), ToastVariant::Error, Some("Save failed".to_owned())))
    );
    let control = h.control.borrow();
    assert!(!control.busy);
    assert_eq!(control.label, "Save");
    assert_eq!(control.updated, None);
}

#[test]
fn bodyless_post_sends_header_only() {
    let h = Harness::new();
    h.platform.respond(202, "");
    let request = MutationRequest::post("/jobs/5/process");
    h.run(&request, false);
    let sent = h.platform.last_request().unwrap_or_else(|| HttpRequest::get_json(""));
    assert_eq!(sent.body, RequestBody::Empty);
    assert_eq!(sent.header(CSRF_HEADER), Some("tok-1"));
}

#[test]
fn toasts_expire_through_scheduler() {
    let h = Harness::new();
    h.platform.respond(200, "{}");
    h.run(&form_request(), false);
    assert_eq!(h.toasts.borrow().len(), 1);
    h.platform.run_scheduled();
    assert!(h.toasts.borrow().is_empty());
}
