use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::state::auth::{CSRF_FIELD, CSRF_HEADER};
use crate::util::test_support::FakePlatform;

#[test]
fn template_urls() {
    assert_eq!(template_raw_url("12"), "/settings/templates/12/raw");
    assert_eq!(template_update_url("12"), "/settings/templates/12/update");
    assert_eq!(template_delete_url("a b"), "/settings/templates/a+b");
    assert_eq!(template_preview_url(""), "/api/templates/preview");
    assert_eq!(template_preview_url("srt-basic"), "/api/templates/preview?template_id=srt-basic");
}

#[test]
fn export_url_carries_format_and_filters() {
    let mut filters = FilterState::with_keys(["level", "event"]);
    filters.set("level", "warn");
    filters.set("event", "evt");
    let url = export_url("/api/jobs/3/logs/export", "csv", &filters);
    assert_eq!(url.as_deref(), Some("/api/jobs/3/logs/export?format=csv&level=warn&event=evt"));
}

#[test]
fn export_url_defaults_to_json() {
    let filters = FilterState::with_keys(["level", "event"]);
    let url = export_url("/export", " ", &filters);
    assert_eq!(url.as_deref(), Some("/export?format=json&level=&event="));
}

#[test]
fn export_url_requires_endpoint() {
    assert_eq!(export_url("  ", "json", &FilterState::default()), None);
}

#[test]
fn previewable_extensions() {
    assert!(is_previewable("txt"));
    assert!(is_previewable(".SRT"));
    assert!(is_previewable("csv"));
    assert!(!is_previewable("docx"));
    assert!(!is_previewable(""));
}

#[test]
fn template_raw_read_sends_csrf_header() {
    let platform = FakePlatform::new();
    platform.respond_json(200, &json!({"name": "SRT", "body": "{{ text }}"}));
    let auth = AuthContext::with_token("abc");
    let raw = block_on(fetch_template_raw(&platform, &auth, "4"));
    let raw = raw.unwrap_or_default();
    assert_eq!(raw.name.as_deref(), Some("SRT"));
    assert_eq!(raw.body.as_deref(), Some("{{ text }}"));
    let sent = platform.last_request().unwrap_or_else(|| HttpRequest::get_json(""));
    assert_eq!(sent.url, "/settings/templates/4/raw");
    assert_eq!(sent.header(CSRF_HEADER), Some("abc"));
}

#[test]
fn template_raw_failure_is_reported() {
    let platform = FakePlatform::new();
    platform.respond(404, "missing");
    let result = block_on(fetch_template_raw(&platform, &AuthContext::with_token(""), "4"));
    assert_eq!(result, Err(FetchError::Status(404)));
}

#[test]
fn render_body_posts_form() {
    let platform = FakePlatform::new();
    platform.respond_json(200, &json!({"rendered": "Hello"}));
    let auth = AuthContext::with_token("abc");
    let rendered = block_on(render_template_body(&platform, &auth, "Hi {{ name }}"));
    assert_eq!(rendered.as_deref(), Ok("Hello"));
    let sent = platform.last_request().unwrap_or_else(|| HttpRequest::get_json(""));
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.url, TEMPLATE_RENDER_URL);
    assert_eq!(sent.form_field("body"), Some("Hi {{ name }}"));
    assert_eq!(sent.form_field(CSRF_FIELD), Some("abc"));
}

#[test]
fn stored_preview_without_rendered_field_is_empty() {
    let platform = FakePlatform::new();
    platform.respond_json(200, &json!({}));
    let rendered = block_on(fetch_template_preview(&platform, "x"));
    assert_eq!(rendered, Ok(String::new()));
}

#[test]
fn artifact_text_is_returned_raw() {
    let platform = FakePlatform::new();
    platform.respond(200, "1\n00:00:01 --> 00:00:02\nHello\n");
    let text = block_on(fetch_artifact_text(&platform, "/jobs/1/artifacts/out.srt"));
    assert_eq!(text.as_deref(), Ok("1\n00:00:01 --> 00:00:02\nHello\n"));
    assert_eq!(
        platform.last_request().and_then(|r| r.header("accept").map(str::to_owned)),
        Some("text/plain".to_owned())
    );
}

#[test]
fn artifact_failure_is_reported() {
    let platform = FakePlatform::new();
    platform.respond(500, "");
    assert_eq!(
        block_on(fetch_artifact_text(&platform, "/a.txt")),
        Err(FetchError::Status(500))
    );
}
