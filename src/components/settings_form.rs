//! Settings forms submitted in place.
//!
//! Each configured form posts its fields through the mutation executor and
//! keeps its "last updated" label current from the server reply.

#[cfg(test)]
#[path = "settings_form_test.rs"]
mod settings_form_test;

use leptos::prelude::*;

use super::surface::SurfaceContainer;
use crate::config::{DashboardConfig, FormFieldConfig, SettingsFormConfig};
use crate::net::mutation::{ControlState, MutationExecutor, MutationRequest};
use crate::state::auth::AuthContext;
use crate::state::surface::{SurfaceKey, SurfaceRegistry};
use crate::state::toast::ToastState;
use crate::util::bindings::{Action, Control, EventKind, resolve};
use crate::util::platform::{BrowserPlatform, spawn};

/// Write for `form` carrying `values`; `None` when the form has no action.
pub fn settings_request(form: &SettingsFormConfig, values: Vec<(String, String)>) -> Option<MutationRequest> {
    let action = form.action.trim();
    if action.is_empty() {
        return None;
    }
    let request = if form.method.trim().eq_ignore_ascii_case("delete") {
        MutationRequest::delete(action)
    } else {
        MutationRequest::post(action).with_form(values)
    };
    let request = request
        .on_surface(SurfaceKey::from(form.surface.as_str()))
        .with_messages(form.success_message.clone(), form.error_message.clone());
    Some(if form.confirm.trim().is_empty() { request } else { request.with_confirm(form.confirm.trim()) })
}

/// Button state of `form`, seeded with the server-rendered updated label.
pub fn initial_control(form: &SettingsFormConfig) -> ControlState {
    let label = if form.submit_label.is_empty() { "Save" } else { form.submit_label.as_str() };
    let mut control = ControlState::new(label, form.loading_label.as_deref());
    control.updated = Some(form.updated_label.clone()).filter(|l| !l.is_empty());
    control
}

fn initial_values(fields: &[FormFieldConfig]) -> Vec<(String, String)> {
    fields.iter().map(|f| (f.name.clone(), f.value.clone())).collect()
}

#[component]
pub fn SettingsForms() -> impl IntoView {
    let config = expect_context::<DashboardConfig>();
    config
        .settings_forms
        .into_iter()
        .map(|form| view! { <SettingsForm form=form/> })
        .collect_view()
}

#[component]
pub fn SettingsForm(form: SettingsFormConfig) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let surfaces = expect_context::<RwSignal<SurfaceRegistry>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let executor = MutationExecutor::new(BrowserPlatform, auth);
    let control = RwSignal::new(initial_control(&form));
    let values = RwSignal::new(initial_values(&form.fields));

    let submit_form = form.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        let handled = ev.default_prevented();
        ev.prevent_default();
        if resolve(Control::SettingsForm, EventKind::Submit) != Some(Action::SubmitForm) {
            return;
        }
        let Some(request) = settings_request(&submit_form, values.get_untracked()) else {
            leptos::logging::warn!("settings form {} has no action", submit_form.id);
            return;
        };
        let executor = executor.clone();
        spawn(async move {
            executor.execute(&request, handled, &surfaces, &control, &toasts).await;
        });
    };

    let inputs = form
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| field_input(field, index, values))
        .collect_view();
    let updated = (!form.updated_target.is_empty()).then(|| {
        view! {
            <span id=form.updated_target.clone() class="settings-form__updated">
                {move || control.with(|c| c.updated.clone().unwrap_or_default())}
            </span>
        }
    });

    view! {
        <SurfaceContainer surface=form.surface.clone() class="settings-form">
            <form id=form.id.clone() on:submit=on_submit>
                <h3>{form.title.clone()}</h3>
                {inputs}
                <div class="settings-form__actions">
                    <button type="submit" class=move || control.with(ControlState::class) disabled=move || control.with(|c| c.busy)>
                        {move || control.with(|c| c.label.clone())}
                    </button>
                    {updated}
                </div>
            </form>
        </SurfaceContainer>
    }
}

fn field_input(field: &FormFieldConfig, index: usize, values: RwSignal<Vec<(String, String)>>) -> AnyView {
    let value = move || values.with(|v| v.get(index).map(|(_, value)| value.clone()).unwrap_or_default());
    let store = move |value: String| {
        values.update(|v| {
            if let Some(slot) = v.get_mut(index) {
                slot.1 = value;
            }
        });
    };
    let name = field.name.clone();
    let label = field.label.clone();
    if field.kind == "textarea" {
        view! {
            <label class="settings-form__field">
                <span>{label}</span>
                <textarea name=name prop:value=value on:input=move |ev| store(event_target_value(&ev))></textarea>
            </label>
        }
        .into_any()
    } else {
        let kind = if field.kind.is_empty() { "text".to_owned() } else { field.kind.clone() };
        view! {
            <label class="settings-form__field">
                <span>{label}</span>
                <input type=kind name=name prop:value=value on:input=move |ev| store(event_target_value(&ev))/>
            </label>
        }
        .into_any()
    }
}
