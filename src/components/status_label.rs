//! "Last updated" label with a `data-state` attribute.

use leptos::prelude::*;

use crate::state::panels::StatusLabel;

#[component]
pub fn StatusText(label: Signal<StatusLabel>, #[prop(optional, into)] class: String) -> impl IntoView {
    let class = if class.is_empty() { "status-label".to_owned() } else { format!("status-label {class}") };

    view! {
        <span class=class data-state=move || label.get().data_state() aria-live="polite">
            {move || label.get().text}
        </span>
    }
}
