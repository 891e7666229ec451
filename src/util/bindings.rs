//! Declarative table of which control reacts to which event.
//!
//! DESIGN
//! ======
//! Components never decide on their own what a click or submit means. Each
//! handler names its [`Control`] and the [`EventKind`] it observed, and
//! [`resolve`] looks the pair up in [`BINDINGS`]. Pairs missing from the
//! table resolve to `None` and the handler does nothing, so wiring can be
//! audited from this one table and tested without a DOM.

#[cfg(test)]
#[path = "bindings_test.rs"]
mod bindings_test;

use crate::net::controller::Trigger;

/// Kinds of interactive controls on the dashboard pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    FilterForm,
    FilterReset,
    PageLink,
    LoadMore,
    ExportButton,
    ProcessButton,
    TemplateSelect,
    TemplateEdit,
    TemplateDelete,
    TemplatePreview,
    TemplateForm,
    ArtifactLink,
    ModalClose,
    SettingsForm,
    /// Plain navigation link that shows a skeleton while the page unloads.
    SkeletonLink,
}

/// DOM events the dashboard listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Submit,
    Click,
    Change,
    /// `keydown` with `Escape`.
    Escape,
}

impl EventKind {
    /// Classify a `keydown` key name; only Escape is bound.
    pub fn from_key(key: &str) -> Option<Self> {
        (key == "Escape").then_some(Self::Escape)
    }
}

/// What a bound event asks the page to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    ApplyFilters,
    ResetFilters,
    ChangePage,
    LoadMore,
    Export,
    Process,
    PreviewStored,
    EditTemplate,
    DeleteTemplate,
    PreviewDraft,
    SaveTemplate,
    OpenArtifact,
    CloseModal,
    SubmitForm,
    MarkBusy,
}

impl Action {
    /// Controller trigger for list-panel actions. `fields` is the submitted
    /// filter form and `page` the target of a page link; each is read only by
    /// the action that needs it.
    pub fn list_trigger(self, fields: Vec<(String, String)>, page: u32) -> Option<Trigger> {
        match self {
            Self::ApplyFilters => Some(Trigger::Submit(fields)),
            Self::ResetFilters => Some(Trigger::Reset),
            Self::ChangePage => Some(Trigger::GoTo(page)),
            Self::LoadMore => Some(Trigger::LoadMore),
            _ => None,
        }
    }

    /// Whether the browser's default action must be suppressed.
    pub fn prevents_default(self) -> bool {
        !matches!(self, Self::MarkBusy)
    }
}

/// One row of the binding table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub control: Control,
    pub event: EventKind,
    pub action: Action,
}

const fn bind(control: Control, event: EventKind, action: Action) -> Binding {
    Binding { control, event, action }
}

/// Every event the dashboard reacts to.
pub const BINDINGS: &[Binding] = &[
    bind(Control::FilterForm, EventKind::Submit, Action::ApplyFilters),
    bind(Control::FilterReset, EventKind::Click, Action::ResetFilters),
    bind(Control::PageLink, EventKind::Click, Action::ChangePage),
    bind(Control::LoadMore, EventKind::Click, Action::LoadMore),
    bind(Control::ExportButton, EventKind::Click, Action::Export),
    bind(Control::ProcessButton, EventKind::Click, Action::Process),
    bind(Control::TemplateSelect, EventKind::Change, Action::PreviewStored),
    bind(Control::TemplateEdit, EventKind::Click, Action::EditTemplate),
    bind(Control::TemplateDelete, EventKind::Click, Action::DeleteTemplate),
    bind(Control::TemplatePreview, EventKind::Click, Action::PreviewDraft),
    bind(Control::TemplateForm, EventKind::Submit, Action::SaveTemplate),
    bind(Control::ArtifactLink, EventKind::Click, Action::OpenArtifact),
    bind(Control::ModalClose, EventKind::Click, Action::CloseModal),
    bind(Control::ModalClose, EventKind::Escape, Action::CloseModal),
    bind(Control::SettingsForm, EventKind::Submit, Action::SubmitForm),
    bind(Control::SkeletonLink, EventKind::Click, Action::MarkBusy),
];

/// Action bound to `event` on `control`, if any.
pub fn resolve(control: Control, event: EventKind) -> Option<Action> {
    BINDINGS
        .iter()
        .find(|binding| binding.control == control && binding.event == event)
        .map(|binding| binding.action)
}
