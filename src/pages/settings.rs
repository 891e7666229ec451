//! Settings: in-place settings forms and delivery template management.

use leptos::prelude::*;

use crate::components::settings_form::SettingsForms;
use crate::components::template_manager::TemplateManager;

#[component]
pub fn SettingsPage() -> impl IntoView {
    view! {
        <div class="settings-page">
            <SettingsForms/>
            <TemplateManager/>
        </div>
    }
}
