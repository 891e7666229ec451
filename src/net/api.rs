//! Endpoint URLs and one-shot reads outside the polling loop.
//!
//! SYSTEM CONTEXT
//! ==============
//! Template management, template previews, artifact previews, and log
//! exports talk to fixed server routes. URL construction lives here so it is
//! testable without a browser; the reads go through a [`Platform`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::http::{FetchError, HttpRequest, HttpResponse, Method, RequestBody};
use super::types::{RenderedPreview, TemplateRaw, read_lenient};
use crate::state::auth::AuthContext;
use crate::state::query::FilterState;
use crate::util::platform::Platform;
use crate::util::query_string::{encode_component, with_query};

/// Jobs feed behind the dashboard table.
pub const JOBS_ENDPOINT: &str = "/api/dashboard/jobs";
/// Template creation form action.
pub const TEMPLATE_CREATE_URL: &str = "/settings/templates";
/// Preview of an unsaved template body.
pub const TEMPLATE_RENDER_URL: &str = "/settings/templates/preview";
/// Preview of a stored template against the current job.
pub const TEMPLATE_PREVIEW_URL: &str = "/api/templates/preview";

/// Artifact formats that can be shown as text.
pub const PREVIEWABLE_EXTENSIONS: [&str; 5] = ["txt", "srt", "json", "vtt", "csv"];

pub fn template_raw_url(id: &str) -> String {
    format!("{TEMPLATE_CREATE_URL}/{}/raw", encode_component(id))
}

pub fn template_update_url(id: &str) -> String {
    format!("{TEMPLATE_CREATE_URL}/{}/update", encode_component(id))
}

pub fn template_delete_url(id: &str) -> String {
    format!("{TEMPLATE_CREATE_URL}/{}", encode_component(id))
}

/// Stored-template preview URL; an empty id previews the default template.
pub fn template_preview_url(template_id: &str) -> String {
    let pairs: Vec<(&str, &str)> = if template_id.is_empty() {
        Vec::new()
    } else {
        vec![("template_id", template_id)]
    };
    with_query(TEMPLATE_PREVIEW_URL, pairs)
}

/// Log export URL carrying the format and the current filters, or `None`
/// when the page has no export endpoint.
pub fn export_url(base: &str, format: &str, filters: &FilterState) -> Option<String> {
    let base = base.trim();
    if base.is_empty() {
        return None;
    }
    let format = if format.trim().is_empty() { "json" } else { format };
    let pairs = std::iter::once(("format", format))
        .chain(filters.pairs().iter().map(|(k, v)| (k.as_str(), v.as_str())));
    Some(with_query(base, pairs))
}

/// Whether an artifact with `extension` can be previewed as text.
pub fn is_previewable(extension: &str) -> bool {
    let extension = extension.trim().trim_start_matches('.').to_ascii_lowercase();
    PREVIEWABLE_EXTENSIONS.contains(&extension.as_str())
}

fn fetch_headers(auth: &AuthContext) -> Vec<(String, String)> {
    let mut headers = vec![
        ("Accept".to_owned(), "application/json".to_owned()),
        ("X-Requested-With".to_owned(), "fetch".to_owned()),
    ];
    auth.apply_header(&mut headers);
    headers
}

/// Stored template fields for the edit dialog.
///
/// # Errors
///
/// Any transport, status, or JSON failure.
pub async fn fetch_template_raw<P: Platform>(platform: &P, auth: &AuthContext, id: &str) -> Result<TemplateRaw, FetchError> {
    let request = HttpRequest {
        method: Method::Get,
        url: template_raw_url(id),
        headers: fetch_headers(auth),
        body: RequestBody::Empty,
    };
    let payload = platform.send(request).await?.require_success()?.json()?;
    Ok(read_lenient::<TemplateRaw>(&payload))
}

/// Render an unsaved template body.
///
/// # Errors
///
/// Any transport, status, or JSON failure.
pub async fn render_template_body<P: Platform>(platform: &P, auth: &AuthContext, body: &str) -> Result<String, FetchError> {
    let mut fields = vec![("body".to_owned(), body.to_owned())];
    auth.apply_form(&mut fields);
    let request = HttpRequest {
        method: Method::Post,
        url: TEMPLATE_RENDER_URL.to_owned(),
        headers: fetch_headers(auth),
        body: RequestBody::Form(fields),
    };
    let payload = platform.send(request).await?.require_success()?.json()?;
    Ok(read_lenient::<RenderedPreview>(&payload).rendered.unwrap_or_default())
}

/// Render a stored template for the job page.
///
/// # Errors
///
/// Any transport, status, or JSON failure.
pub async fn fetch_template_preview<P: Platform>(platform: &P, template_id: &str) -> Result<String, FetchError> {
    let payload = platform
        .send(HttpRequest::get_json(template_preview_url(template_id)))
        .await?
        .require_success()?
        .json()?;
    Ok(read_lenient::<RenderedPreview>(&payload).rendered.unwrap_or_default())
}

/// Plain-text artifact body.
///
/// # Errors
///
/// Any transport or status failure.
pub async fn fetch_artifact_text<P: Platform>(platform: &P, url: &str) -> Result<String, FetchError> {
    platform
        .send(HttpRequest::get_text(url))
        .await
        .and_then(HttpResponse::require_success)
        .map(|resp| resp.body)
}
