use super::*;
use crate::net::http::Method;

fn form() -> SettingsFormConfig {
    SettingsFormConfig {
        id: "delivery".to_owned(),
        action: "/settings/delivery".to_owned(),
        method: "post".to_owned(),
        surface: "delivery-settings".to_owned(),
        submit_label: "Save delivery".to_owned(),
        loading_label: Some("Saving...".to_owned()),
        success_message: Some("Delivery saved.".to_owned()),
        updated_label: "Updated at 10/10/2026 09:00".to_owned(),
        ..SettingsFormConfig::default()
    }
}

#[test]
fn post_form_carries_values() {
    let values = vec![("webhook".to_owned(), "https://hooks.test".to_owned())];
    let request = settings_request(&form(), values.clone());
    let request = request.unwrap_or_else(|| MutationRequest::delete(""));
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, "/settings/delivery");
    assert_eq!(request.form, Some(values));
    assert_eq!(request.surface.as_str(), "delivery-settings");
    assert_eq!(request.success_message.as_deref(), Some("Delivery saved."));
    assert_eq!(request.error_message, None);
    assert_eq!(request.confirm, None);
}

#[test]
fn delete_form_sends_no_body_and_asks_first() {
    let mut config = form();
    config.method = "DELETE".to_owned();
    config.confirm = " Clear the delivery settings? ".to_owned();
    let request = settings_request(&config, vec![("a".to_owned(), "b".to_owned())]);
    let request = request.unwrap_or_else(|| MutationRequest::post(""));
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.form, None);
    assert_eq!(request.confirm.as_deref(), Some("Clear the delivery settings?"));
}

#[test]
fn form_without_action_is_inert() {
    let mut config = form();
    config.action = "  ".to_owned();
    assert_eq!(settings_request(&config, Vec::new()), None);
}

#[test]
fn control_starts_with_rendered_label() {
    let control = initial_control(&form());
    assert_eq!(control.label, "Save delivery");
    assert_eq!(control.updated.as_deref(), Some("Updated at 10/10/2026 09:00"));

    let mut working = control.clone();
    working.begin();
    assert_eq!(working.label, "Saving...");
}

#[test]
fn blank_labels_fall_back() {
    let control = initial_control(&SettingsFormConfig::default());
    assert_eq!(control.label, "Save");
    assert_eq!(control.updated, None);
}
