//! Artifact list with a text preview modal.
//!
//! ERROR HANDLING
//! ==============
//! Formats that cannot be shown as text raise a warning toast without a
//! request. A failed download closes the modal and raises an error toast.

#[cfg(test)]
#[path = "artifact_preview_test.rs"]
mod artifact_preview_test;

use leptos::prelude::*;

use crate::config::{ArtifactConfig, DashboardConfig};
use crate::net::api::{fetch_artifact_text, is_previewable};
use crate::state::store::Store;
use crate::state::toast::{ToastRequest, ToastState, notify};
use crate::util::bindings::{Action, Control, EventKind, resolve};
use crate::util::platform::{BrowserPlatform, Platform, spawn};

pub const UNSUPPORTED_TEXT: &str = "Preview not available for this format.";
pub const LOADING_TEXT: &str = "Loading artifact...";
pub const EMPTY_TEXT: &str = "No content to display.";
pub const FAILURE_TEXT: &str = "Could not load the artifact.";

/// Contents of the preview dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalState {
    pub open: bool,
    pub title: String,
    pub body: String,
}

impl ModalState {
    pub fn open_loading(&mut self, title: &str) {
        self.open = true;
        self.title = title.to_owned();
        self.body = LOADING_TEXT.to_owned();
    }

    pub fn show(&mut self, text: &str) {
        let text = text.trim();
        self.body = if text.is_empty() { EMPTY_TEXT.to_owned() } else { text.to_owned() };
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

/// Open `artifact` in the modal.
pub async fn preview_artifact<P, M, T>(platform: &P, artifact: &ArtifactConfig, modal: &M, toasts: &T)
where
    P: Platform,
    M: Store<ModalState>,
    T: Store<ToastState> + Clone + 'static,
{
    let url = artifact.url.trim();
    if url.is_empty() {
        return;
    }
    if !is_previewable(&artifact.extension) {
        notify(platform, toasts, ToastRequest::warning(UNSUPPORTED_TEXT));
        return;
    }
    let title = if artifact.label.is_empty() { "Preview" } else { artifact.label.as_str() };
    modal.modify(|m| m.open_loading(title));
    match fetch_artifact_text(platform, url).await {
        Ok(text) => modal.modify(|m| m.show(&text)),
        Err(e) => {
            leptos::logging::warn!("artifact {url} failed: {e}");
            modal.modify(ModalState::close);
            notify(platform, toasts, ToastRequest::error(FAILURE_TEXT));
        }
    }
}

#[component]
pub fn ArtifactPreview() -> impl IntoView {
    let config = expect_context::<DashboardConfig>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let artifacts = config.job.artifacts.clone();
    let modal = RwSignal::new(ModalState::default());

    let close = move || {
        if modal.with_untracked(|m| m.open) {
            modal.update(ModalState::close);
        }
    };
    let keys = window_event_listener(leptos::ev::keydown, move |ev| {
        let Some(event) = EventKind::from_key(&ev.key()) else {
            return;
        };
        if resolve(Control::ModalClose, event) == Some(Action::CloseModal) {
            close();
        }
    });
    on_cleanup(move || keys.remove());

    let on_close = move |_| {
        if resolve(Control::ModalClose, EventKind::Click) == Some(Action::CloseModal) {
            close();
        }
    };

    view! {
        <section class="artifacts" aria-label="Artifacts">
            <ul class="artifact-list">
                {artifacts
                    .into_iter()
                    .map(|artifact| {
                        let label = artifact.label.clone();
                        let download = artifact.download_url.clone();
                        let on_preview = move |_| {
                            if resolve(Control::ArtifactLink, EventKind::Click) != Some(Action::OpenArtifact) {
                                return;
                            }
                            let artifact = artifact.clone();
                            spawn(async move {
                                preview_artifact(&BrowserPlatform, &artifact, &modal, &toasts).await;
                            });
                        };
                        view! {
                            <li class="artifact-list__item">
                                <span>{label}</span>
                                <button type="button" class="btn" on:click=on_preview>"Preview"</button>
                                <a class="btn" href=download download="">"Download"</a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <div
                class=move || if modal.with(|m| m.open) { "modal open" } else { "modal" }
                aria-hidden=move || (!modal.with(|m| m.open)).to_string()
            >
                <div class="modal-dialog" role="dialog" aria-modal="true" tabindex="-1">
                    <header class="modal-dialog__header">
                        <h3>{move || modal.with(|m| m.title.clone())}</h3>
                        <button type="button" class="btn modal-dialog__close" aria-label="Close" on:click=on_close>
                            "x"
                        </button>
                    </header>
                    <pre class="modal-dialog__body">{move || modal.with(|m| m.body.clone())}</pre>
                </div>
            </div>
        </section>
    }
}
