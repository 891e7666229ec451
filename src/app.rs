//! Root application component with context providers and page selection.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;

use crate::components::template_manager::TEMPLATE_SURFACE;
use crate::components::toast_stack::ToastStack;
use crate::config::{DashboardConfig, PageKind};
use crate::pages::{dashboard::DashboardPage, job_detail::JobDetailPage, settings::SettingsPage};
use crate::state::auth::AuthContext;
use crate::state::panels::PanelRegistry;
use crate::state::surface::{SurfaceKey, SurfaceRegistry};
use crate::state::toast::{ToastState, notify};
use crate::util::platform::BrowserPlatform;

/// Every surface the page can address, registered before any fetch starts.
pub fn page_surfaces(config: &DashboardConfig, panels: &PanelRegistry) -> SurfaceRegistry {
    let mut registry = SurfaceRegistry::default();
    for key in panels.surfaces() {
        registry.register(key);
    }
    match config.page {
        PageKind::Dashboard => {}
        PageKind::JobDetail => registry.register(&SurfaceKey::from(config.job.process_surface.as_str())),
        PageKind::Settings => {
            registry.register(&SurfaceKey::from(TEMPLATE_SURFACE));
            for form in &config.settings_forms {
                registry.register(&SurfaceKey::from(form.surface.as_str()));
            }
        }
    }
    registry
}

/// Root application component.
///
/// Reads the page configuration once, provides all shared state contexts,
/// and mounts the page the server rendered.
#[component]
pub fn App() -> impl IntoView {
    let config = DashboardConfig::load();
    let panels = PanelRegistry::from_config(&config);

    let surfaces = RwSignal::new(page_surfaces(&config, &panels));
    let toasts = RwSignal::new(ToastState::default());

    provide_context(surfaces);
    provide_context(toasts);
    provide_context(AuthContext::from_page());
    provide_context(panels);
    provide_context(config.clone());

    for request in config.flashes.iter().filter_map(|flash| flash.to_toast()) {
        notify(&BrowserPlatform, &toasts, request);
    }

    let page = match config.page {
        PageKind::Dashboard => view! { <DashboardPage/> }.into_any(),
        PageKind::JobDetail => view! { <JobDetailPage/> }.into_any(),
        PageKind::Settings => view! { <SettingsPage/> }.into_any(),
    };

    view! {
        <ToastStack/>
        {page}
    }
}
