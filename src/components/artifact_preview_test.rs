use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;

use super::*;
use crate::state::store::cell;
use crate::state::toast::ToastVariant;
use crate::util::test_support::FakePlatform;

struct Harness {
    platform: FakePlatform,
    modal: Rc<RefCell<ModalState>>,
    toasts: Rc<RefCell<ToastState>>,
}

impl Harness {
    fn new() -> Self {
        Self {
            platform: FakePlatform::new(),
            modal: cell(ModalState::default()),
            toasts: cell(ToastState::default()),
        }
    }

    fn preview(&self, extension: &str) {
        let artifact = ArtifactConfig {
            label: "Transcript".to_owned(),
            url: "/jobs/1/artifacts/out".to_owned(),
            download_url: "/jobs/1/artifacts/out?download=1".to_owned(),
            extension: extension.to_owned(),
        };
        block_on(preview_artifact(&self.platform, &artifact, &self.modal, &self.toasts));
    }

    fn last_toast(&self) -> Option<(String, ToastVariant)> {
        self.toasts.borrow().toasts.last().map(|t| (t.message.clone(), t.variant))
    }
}

#[test]
fn text_artifact_is_shown() {
    let h = Harness::new();
    h.platform.respond(200, "  WEBVTT\n\n00:01 hello \n");
    h.preview("vtt");
    let modal = h.modal.borrow();
    assert!(modal.open);
    assert_eq!(modal.title, "Transcript");
    assert_eq!(modal.body, "WEBVTT\n\n00:01 hello");
    assert!(h.toasts.borrow().is_empty());
}

#[test]
fn empty_artifact_shows_placeholder() {
    let h = Harness::new();
    h.platform.respond(200, "\n");
    h.preview("txt");
    assert_eq!(h.modal.borrow().body, EMPTY_TEXT);
}

#[test]
fn binary_format_warns_without_request() {
    let h = Harness::new();
    h.preview("docx");
    assert_eq!(h.platform.request_count(), 0);
    assert!(!h.modal.borrow().open);
    assert_eq!(h.last_toast(), Some((UNSUPPORTED_TEXT.to_owned(), ToastVariant::Warning)));
}

#[test]
fn failed_download_closes_modal() {
    let h = Harness::new();
    h.platform.respond(404, "");
    h.preview("srt");
    assert!(!h.modal.borrow().open);
    assert_eq!(h.last_toast(), Some((FAILURE_TEXT.to_owned(), ToastVariant::Error)));
}

#[test]
fn modal_loading_state() {
    let mut modal = ModalState::default();
    modal.open_loading("Report");
    assert_eq!(modal.body, LOADING_TEXT);
    modal.close();
    assert!(!modal.open);
}
