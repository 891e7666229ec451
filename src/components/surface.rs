//! Skeleton and content wrappers bound to a surface key.

use leptos::prelude::*;

use crate::state::surface::{SurfaceFlags, SurfaceKey, SurfaceRegistry, set_busy};
use crate::util::bindings::{Action, Control, EventKind, resolve};

fn flags_memo(surface: SurfaceKey) -> Memo<SurfaceFlags> {
    let surfaces = expect_context::<RwSignal<SurfaceRegistry>>();
    if !surfaces.with_untracked(|registry| registry.contains(&surface)) {
        surfaces.update(|registry| registry.register(&surface));
    }
    Memo::new(move |_| surfaces.with(|registry| registry.flags(&surface)))
}

/// Content region whose classes and `aria-busy` follow the surface flags.
#[component]
pub fn SurfaceContainer(
    #[prop(into)] surface: SurfaceKey,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let key = surface.to_string();
    let flags = flags_memo(surface);
    let container_class = move || {
        let state = flags.get().container_class();
        if class.is_empty() { state.to_owned() } else { format!("{class} {state}") }
    };

    view! {
        <div
            class=container_class
            data-surface=key
            aria-busy=move || flags.get().busy.to_string()
        >
            {children()}
        </div>
    }
}

/// Placeholder lines shown only while the surface is busy.
#[component]
pub fn Skeleton(#[prop(into)] surface: SurfaceKey, #[prop(default = 3)] lines: usize) -> impl IntoView {
    let flags = flags_memo(surface);

    view! {
        <div
            class=move || flags.get().skeleton_class()
            hidden=move || flags.get().skeleton_hidden()
            aria-hidden=move || flags.get().skeleton_hidden().to_string()
        >
            {(0..lines).map(|_| view! { <span class="skeleton__line"></span> }).collect_view()}
        </div>
    }
}

/// Navigation link that shows `surface`'s skeleton while the next page loads.
#[component]
pub fn SkeletonLink(
    #[prop(into)] href: String,
    #[prop(into)] surface: SurfaceKey,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let surfaces = expect_context::<RwSignal<SurfaceRegistry>>();
    let on_click = move |_| {
        if resolve(Control::SkeletonLink, EventKind::Click) == Some(Action::MarkBusy) {
            set_busy(&surfaces, &surface, true);
        }
    };

    view! {
        <a class=class href=href on:click=on_click>
            {children()}
        </a>
    }
}
