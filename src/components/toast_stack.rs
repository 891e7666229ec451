//! Fixed stack rendering the toast notification channel.

use leptos::prelude::*;

use crate::state::toast::{ToastState, ToastVariant};

/// Renders every mounted toast; expiry is driven by `state::toast::notify`.
#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack" aria-live="polite">
            {move || {
                toasts
                    .get()
                    .toasts
                    .into_iter()
                    .map(|toast| {
                        let role = if toast.variant == ToastVariant::Error { "alert" } else { "status" };
                        let class = toast.class();
                        view! {
                            <div class=class role=role data-toast-id=toast.id.to_string()>
                                <span class="toast__icon" aria-hidden="true">{toast.icon}</span>
                                <div class="toast__body">
                                    {toast.title.map(|title| view! { <strong class="toast__title">{title}</strong> })}
                                    <p class="toast__message">{toast.message}</p>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
