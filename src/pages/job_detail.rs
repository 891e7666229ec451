//! Job detail: processing action, event timeline, template and artifact
//! previews.

use leptos::prelude::*;

use crate::components::artifact_preview::ArtifactPreview;
use crate::components::log_timeline::LogTimeline;
use crate::components::process_action::ProcessAction;
use crate::components::template_preview::TemplatePreview;

#[component]
pub fn JobDetailPage() -> impl IntoView {
    // Bumped after a successful processing request to reload the timeline.
    let refresh_logs = RwSignal::new(0_u32);

    view! {
        <div class="job-detail-page">
            <ProcessAction refresh_logs=refresh_logs/>
            <LogTimeline refresh=refresh_logs/>
            <TemplatePreview/>
            <ArtifactPreview/>
        </div>
    }
}
