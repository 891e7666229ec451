//! Mutation action executor: one authenticated write per user action.
//!
//! SYSTEM CONTEXT
//! ==============
//! Settings forms, template edits and deletes, and the job "process" button
//! all submit through [`MutationExecutor::execute`]. It owns the shared
//! choreography: confirmation, busy surface, disabled control with a working
//! label, CSRF token, and the success/error toast.
//!
//! ERROR HANDLING
//! ==============
//! A declined confirmation or an already-handled trigger returns without a
//! request. Any transport or status failure restores the control and shows an
//! error toast; the caller's domain state is never touched on failure. A
//! successful reply whose body is empty or not JSON still counts as success.

#[cfg(test)]
#[path = "mutation_test.rs"]
mod mutation_test;

use super::http::{FetchError, HttpRequest, HttpResponse, Method, RequestBody};
use super::types::MutationReply;
use crate::state::auth::AuthContext;
use crate::state::store::Store;
use crate::state::surface::{SurfaceKey, SurfaceRegistry, set_busy};
use crate::state::toast::{ToastRequest, ToastState, notify};
use crate::util::platform::Platform;

/// Label shown on a control while its request is in flight.
pub const DEFAULT_WORKING_LABEL: &str = "Processing...";
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Operation completed.";
pub const DEFAULT_ERROR_MESSAGE: &str = "Could not complete the action.";

/// Submit button (or action button) of one mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ControlState {
    pub busy: bool,
    pub label: String,
    /// "Updated at ..." text set by the last successful submission.
    pub updated: Option<String>,
    idle_label: String,
    working_label: String,
}

impl ControlState {
    pub fn new(idle_label: impl Into<String>, working_label: Option<&str>) -> Self {
        let idle_label = idle_label.into();
        Self {
            busy: false,
            label: idle_label.clone(),
            updated: None,
            idle_label,
            working_label: working_label
                .filter(|label| !label.is_empty())
                .unwrap_or(DEFAULT_WORKING_LABEL)
                .to_owned(),
        }
    }

    /// Disable the control and swap in the working label.
    pub fn begin(&mut self) {
        self.busy = true;
        self.label.clone_from(&self.working_label);
    }

    /// Re-enable the control with its original label.
    pub fn restore(&mut self) {
        self.busy = false;
        self.label.clone_from(&self.idle_label);
    }

    pub fn class(&self) -> &'static str {
        if self.busy { "btn btn-primary loading" } else { "btn btn-primary" }
    }
}

/// Description of one write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationRequest {
    pub method: Method,
    pub url: String,
    /// Form body; `None` sends no body.
    pub form: Option<Vec<(String, String)>>,
    /// Confirmation prompt; `None` or empty submits without asking.
    pub confirm: Option<String>,
    pub surface: SurfaceKey,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
    pub success_title: Option<String>,
    pub error_title: Option<String>,
}

impl MutationRequest {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            form: None,
            confirm: None,
            surface: SurfaceKey::default(),
            success_message: None,
            error_message: None,
            success_title: None,
            error_title: None,
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    #[must_use]
    pub fn with_form(mut self, fields: Vec<(String, String)>) -> Self {
        self.form = Some(fields);
        self
    }

    #[must_use]
    pub fn with_confirm(mut self, prompt: impl Into<String>) -> Self {
        self.confirm = Some(prompt.into());
        self
    }

    #[must_use]
    pub fn on_surface(mut self, surface: SurfaceKey) -> Self {
        self.surface = surface;
        self
    }

    /// Custom toast texts; `None` keeps the defaults.
    #[must_use]
    pub fn with_messages(mut self, success: Option<String>, error: Option<String>) -> Self {
        self.success_message = success.filter(|m| !m.is_empty());
        self.error_message = error.filter(|m| !m.is_empty());
        self
    }

    #[must_use]
    pub fn with_titles(mut self, success: &str, error: &str) -> Self {
        self.success_title = Some(success.to_owned());
        self.error_title = Some(error.to_owned());
        self
    }

    fn confirmation(&self) -> Option<&str> {
        self.confirm.as_deref().filter(|prompt| !prompt.is_empty())
    }

    fn to_http(&self, auth: &AuthContext) -> HttpRequest {
        let mut headers = vec![
            ("Accept".to_owned(), "application/json".to_owned()),
            ("X-Requested-With".to_owned(), "fetch".to_owned()),
        ];
        auth.apply_header(&mut headers);
        let body = match &self.form {
            Some(fields) => {
                let mut fields = fields.clone();
                auth.apply_form(&mut fields);
                RequestBody::Form(fields)
            }
            None => RequestBody::Empty,
        };
        HttpRequest { method: self.method, url: self.url.clone(), headers, body }
    }
}

/// Result of one mutation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The trigger was already handled elsewhere.
    Skipped,
    /// The user declined the confirmation prompt.
    Declined,
    Succeeded(MutationReply),
    Failed(FetchError),
}

impl MutationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

/// Runs writes with the page's CSRF token.
#[derive(Clone, Debug)]
pub struct MutationExecutor<P> {
    platform: P,
    auth: AuthContext,
}

impl<P: Platform> MutationExecutor<P> {
    pub fn new(platform: P, auth: AuthContext) -> Self {
        Self { platform, auth }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Run `request` for the control backed by `control`.
    ///
    /// `already_handled` reflects a trigger whose default action was already
    /// prevented upstream; such triggers are ignored.
    pub async fn execute<S, C, T>(
        &self,
        request: &MutationRequest,
        already_handled: bool,
        surfaces: &S,
        control: &C,
        toasts: &T,
    ) -> MutationOutcome
    where
        S: Store<SurfaceRegistry>,
        C: Store<ControlState>,
        T: Store<ToastState> + Clone + 'static,
    {
        if already_handled {
            return MutationOutcome::Skipped;
        }
        if let Some(prompt) = request.confirmation() {
            if !self.platform.confirm(prompt) {
                return MutationOutcome::Declined;
            }
        }

        set_busy(surfaces, &request.surface, true);
        control.modify(ControlState::begin);

        let result = self
            .platform
            .send(request.to_http(&self.auth))
            .await
            .and_then(HttpResponse::require_success);

        set_busy(surfaces, &request.surface, false);
        control.modify(ControlState::restore);

        match result {
            Ok(response) => {
                let reply = MutationReply::from_payload(&response.json_or_empty());
                let message = request
                    .success_message
                    .clone()
                    .or_else(|| reply.message.clone().filter(|m| !m.is_empty()))
                    .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_owned());
                let mut toast = ToastRequest::success(message);
                toast.title.clone_from(&request.success_title);
                notify(&self.platform, toasts, toast);
                if let Some(at) = reply.updated_at_human.as_deref().filter(|at| !at.is_empty()) {
                    control.modify(|state| state.updated = Some(format!("Updated at {at}")));
                }
                MutationOutcome::Succeeded(reply)
            }
            Err(e) => {
                leptos::logging::warn!("{} {} failed: {e}", request.method.as_str(), request.url);
                let message = request
                    .error_message
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_owned());
                let mut toast = ToastRequest::error(message);
                toast.title.clone_from(&request.error_title);
                notify(&self.platform, toasts, toast);
                MutationOutcome::Failed(e)
            }
        }
    }
}
