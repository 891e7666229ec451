//! Page configuration injected by the server template.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server renders each dashboard page with an inline
//! `<script type="application/json" id="dashboard-config">` block. It names
//! the page to mount and carries endpoints, refresh intervals, surface keys,
//! and the data needed for forms and templates. The client reads it once at
//! startup.
//!
//! ERROR HANDLING
//! ==============
//! Every field is defaulted. A missing or malformed block logs a warning and
//! falls back to [`DashboardConfig::default`], which mounts a dashboard whose
//! live panels are disabled.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::Deserialize;

use crate::state::toast::{ToastRequest, ToastVariant};
use crate::util::platform::MAX_TIMER_DELAY;

/// DOM id of the inline configuration block.
pub const CONFIG_ELEMENT_ID: &str = "dashboard-config";

/// Failure to read the inline configuration block.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config element #{0} not found")]
    Missing(&'static str),
    #[error("config is not valid JSON: {0}")]
    Parse(String),
}

/// Which page the server rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    #[default]
    Dashboard,
    JobDetail,
    Settings,
}

/// A self-refreshing panel (summary cards, incident feed).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LivePanelConfig {
    /// Empty disables the panel's poller.
    pub endpoint: String,
    /// Seconds between refreshes.
    pub refresh_interval: Option<f64>,
    pub surface: Option<String>,
    pub empty_label: Option<String>,
}

/// One filter input of the jobs form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterField {
    pub name: String,
    pub label: String,
    /// Choices for a select; empty renders a text input.
    pub options: Vec<FilterOption>,
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// Jobs table with reactive filters.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JobsConfig {
    pub endpoint: String,
    pub limit: u32,
    pub page: u32,
    pub surface: String,
    pub filters: Vec<FilterField>,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            endpoint: crate::net::api::JOBS_ENDPOINT.to_owned(),
            limit: 20,
            page: 1,
            surface: "jobs-feed".to_owned(),
            filters: Vec::new(),
        }
    }
}

/// A downloadable job artifact.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub label: String,
    pub url: String,
    pub download_url: String,
    pub extension: String,
}

/// A delivery template offered on the job page or managed in settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TemplateEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub locale: String,
}

/// Per-job endpoints of the job detail page.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JobDetailConfig {
    pub id: String,
    pub logs_endpoint: String,
    pub logs_export: String,
    pub export_formats: Vec<String>,
    pub process_endpoint: String,
    pub process_surface: String,
    pub process_success_label: Option<String>,
    pub process_error_label: Option<String>,
    pub artifacts: Vec<ArtifactConfig>,
    pub templates: Vec<TemplateEntry>,
    pub selected_template: String,
}

impl Default for JobDetailConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            logs_endpoint: String::new(),
            logs_export: String::new(),
            export_formats: vec!["json".to_owned(), "csv".to_owned()],
            process_endpoint: String::new(),
            process_surface: "job-process".to_owned(),
            process_success_label: None,
            process_error_label: None,
            artifacts: Vec::new(),
            templates: Vec::new(),
            selected_template: String::new(),
        }
    }
}

/// One input of an asynchronously submitted settings form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormFieldConfig {
    pub name: String,
    pub label: String,
    /// HTML input type; `textarea` renders a text area.
    pub kind: String,
    pub value: String,
}

/// A settings form submitted without a page reload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SettingsFormConfig {
    pub id: String,
    pub title: String,
    pub action: String,
    pub method: String,
    pub fields: Vec<FormFieldConfig>,
    pub surface: String,
    pub submit_label: String,
    pub loading_label: Option<String>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
    /// Confirmation prompt; empty submits without asking.
    pub confirm: String,
    /// Key of the "last updated" label refreshed on success.
    pub updated_target: String,
    pub updated_label: String,
}

/// A server flash message shown as a toast on load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FlashMessage {
    pub message: String,
    pub variant: String,
}

impl FlashMessage {
    /// Toast for this flash; blank messages show nothing.
    pub fn to_toast(&self) -> Option<ToastRequest> {
        let message = self.message.trim();
        if message.is_empty() {
            return None;
        }
        Some(ToastRequest::new(message, ToastVariant::from_name(&self.variant)))
    }
}

/// Everything the client needs to mount one page.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub page: PageKind,
    pub summary: LivePanelConfig,
    pub incidents: LivePanelConfig,
    pub jobs: JobsConfig,
    pub job: JobDetailConfig,
    pub templates: Vec<TemplateEntry>,
    pub settings_forms: Vec<SettingsFormConfig>,
    pub flashes: Vec<FlashMessage>,
}

impl DashboardConfig {
    /// Parse a configuration block.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when `raw` is not a JSON object of the
    /// expected shape.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read the block from the current document, falling back to defaults.
    pub fn load() -> Self {
        match read_page_config().and_then(|raw| Self::from_json(&raw)) {
            Ok(config) => config,
            Err(e) => {
                leptos::logging::warn!("dashboard config unavailable: {e}");
                Self::default()
            }
        }
    }
}

/// Resolve a refresh interval in seconds.
///
/// Missing, non-finite, or non-positive values use `default_secs`; the result
/// is never shorter than `floor` nor longer than [`MAX_TIMER_DELAY`].
pub fn refresh_interval(seconds: Option<f64>, default_secs: f64, floor: Duration) -> Duration {
    let secs = seconds
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(default_secs);
    Duration::try_from_secs_f64(secs)
        .unwrap_or(MAX_TIMER_DELAY)
        .max(floor)
        .min(MAX_TIMER_DELAY)
}

fn read_page_config() -> Result<String, ConfigError> {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content())
            .ok_or(ConfigError::Missing(CONFIG_ELEMENT_ID))
    }
    #[cfg(not(feature = "csr"))]
    {
        Err(ConfigError::Missing(CONFIG_ELEMENT_ID))
    }
}
