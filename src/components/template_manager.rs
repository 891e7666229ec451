//! Delivery template management on the settings page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Lists the stored templates with edit and delete actions, and offers a
//! create form. Editing loads the raw template into a dialog; saving posts
//! the dialog fields and patches the listed entry in place. Both the create
//! form and the dialog can render a preview of their unsaved body.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is reported with a toast and leaves the list untouched. A
//! declined delete confirmation sends nothing.

#[cfg(test)]
#[path = "template_manager_test.rs"]
mod template_manager_test;

use leptos::prelude::*;

use super::surface::SurfaceContainer;
use crate::config::{DashboardConfig, TemplateEntry};
use crate::net::api::{
    TEMPLATE_CREATE_URL, fetch_template_raw, render_template_body, template_delete_url, template_update_url,
};
use crate::net::mutation::{ControlState, MutationExecutor, MutationOutcome, MutationRequest};
use crate::net::types::TemplateRaw;
use crate::state::auth::AuthContext;
use crate::state::store::Store;
use crate::state::surface::{SurfaceKey, SurfaceRegistry};
use crate::state::toast::{ToastRequest, ToastState, notify};
use crate::util::bindings::{Action, Control, EventKind, resolve};
use crate::util::platform::{BrowserPlatform, Platform, spawn};

pub const TEMPLATE_SURFACE: &str = "template-list";
pub const LOAD_FAILURE_TEXT: &str = "Could not load the template.";
pub const UPDATE_SUCCESS_TEXT: &str = "Template updated successfully.";
pub const UPDATE_FAILURE_TEXT: &str = "Could not update the template.";
pub const CREATE_SUCCESS_TEXT: &str = "Template created.";
pub const CREATE_FAILURE_TEXT: &str = "Could not create the template.";
pub const DELETE_CONFIRM_TEXT: &str = "Remove this template?";
pub const DELETE_SUCCESS_TEXT: &str = "Template removed.";
pub const DELETE_FAILURE_TEXT: &str = "Could not remove the template.";
pub const EMPTY_BODY_TEXT: &str = "Enter the template body before previewing.";
pub const PREVIEW_FAILURE_TEXT: &str = "Failed to generate preview.";
pub const PREVIEW_UNAVAILABLE_TEXT: &str = "Preview unavailable.";

/// Which form a draft belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftMode {
    Create,
    Edit,
}

/// Editable text fields of a draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Description,
    Locale,
    Body,
}

impl DraftField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Description, Self::Locale, Self::Body];

    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Locale => "locale",
            Self::Body => "body",
        }
    }

    fn caption(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::Locale => "Locale",
            Self::Body => "Body",
        }
    }
}

/// Unsaved template fields plus the last rendered preview.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateDraft {
    pub id: String,
    pub name: String,
    pub description: String,
    pub locale: String,
    pub body: String,
    pub preview: String,
}

fn listed_or_loaded(listed: &str, loaded: Option<&String>) -> String {
    if listed.is_empty() { loaded.cloned().unwrap_or_default() } else { listed.to_owned() }
}

impl TemplateDraft {
    /// Edit draft: listed values win over the loaded ones; the body always
    /// comes from the server.
    pub fn for_edit(entry: &TemplateEntry, raw: &TemplateRaw) -> Self {
        Self {
            id: entry.id.clone(),
            name: listed_or_loaded(&entry.name, raw.name.as_ref()),
            description: listed_or_loaded(&entry.description, raw.description.as_ref()),
            locale: listed_or_loaded(&entry.locale, raw.locale.as_ref()),
            body: raw.body.clone().unwrap_or_default(),
            preview: String::new(),
        }
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Description => &self.description,
            DraftField::Locale => &self.locale,
            DraftField::Body => &self.body,
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Name => self.name = value,
            DraftField::Description => self.description = value,
            DraftField::Locale => self.locale = value,
            DraftField::Body => self.body = value,
        }
    }

    /// Submitted form fields, in form order.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::with_capacity(DraftField::ALL.len() + 1);
        if !self.id.is_empty() {
            fields.push(("template_id".to_owned(), self.id.clone()));
        }
        fields.extend(
            DraftField::ALL
                .iter()
                .map(|&field| (field.name().to_owned(), self.field(field).to_owned())),
        );
        fields
    }

    fn to_entry(&self) -> TemplateEntry {
        TemplateEntry {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            locale: self.locale.clone(),
        }
    }
}

/// Listed templates plus the open drafts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateManagerState {
    pub templates: Vec<TemplateEntry>,
    /// Draft of the edit dialog; `None` while the dialog is closed.
    pub editing: Option<TemplateDraft>,
    pub create: TemplateDraft,
}

impl TemplateManagerState {
    pub fn new(templates: Vec<TemplateEntry>) -> Self {
        Self { templates, editing: None, create: TemplateDraft::default() }
    }

    pub fn draft(&self, mode: DraftMode) -> Option<&TemplateDraft> {
        match mode {
            DraftMode::Create => Some(&self.create),
            DraftMode::Edit => self.editing.as_ref(),
        }
    }

    pub fn draft_mut(&mut self, mode: DraftMode) -> Option<&mut TemplateDraft> {
        match mode {
            DraftMode::Create => Some(&mut self.create),
            DraftMode::Edit => self.editing.as_mut(),
        }
    }

    /// Patch the listed entry from a saved edit and close the dialog.
    pub fn apply_update(&mut self, draft: &TemplateDraft) {
        if let Some(entry) = self.templates.iter_mut().find(|t| t.id == draft.id) {
            *entry = draft.to_entry();
        }
        self.editing = None;
    }

    pub fn remove(&mut self, id: &str) {
        self.templates.retain(|t| t.id != id);
    }
}

/// Load `entry` and open the edit dialog. Returns whether it opened.
pub async fn open_editor<P, M, T>(platform: &P, auth: &AuthContext, entry: &TemplateEntry, manager: &M, toasts: &T) -> bool
where
    P: Platform,
    M: Store<TemplateManagerState>,
    T: Store<ToastState> + Clone + 'static,
{
    if entry.id.is_empty() {
        return false;
    }
    match fetch_template_raw(platform, auth, &entry.id).await {
        Ok(raw) => {
            let draft = TemplateDraft::for_edit(entry, &raw);
            manager.modify(|m| m.editing = Some(draft));
            true
        }
        Err(e) => {
            leptos::logging::warn!("template {} load failed: {e}", entry.id);
            notify(platform, toasts, ToastRequest::error(LOAD_FAILURE_TEXT));
            false
        }
    }
}

/// Save the draft of `mode`. A saved edit patches the list; a created
/// template only gets its id from the server, so the page reloads.
pub async fn save_draft<P, S, C, M, T>(
    executor: &MutationExecutor<P>,
    mode: DraftMode,
    already_handled: bool,
    surfaces: &S,
    control: &C,
    manager: &M,
    toasts: &T,
) -> MutationOutcome
where
    P: Platform,
    S: Store<SurfaceRegistry>,
    C: Store<ControlState>,
    M: Store<TemplateManagerState>,
    T: Store<ToastState> + Clone + 'static,
{
    let Some(draft) = manager.peek(|m| m.draft(mode).cloned()) else {
        return MutationOutcome::Skipped;
    };
    let request = match mode {
        DraftMode::Edit => MutationRequest::post(template_update_url(&draft.id))
            .with_messages(Some(UPDATE_SUCCESS_TEXT.to_owned()), Some(UPDATE_FAILURE_TEXT.to_owned())),
        DraftMode::Create => MutationRequest::post(TEMPLATE_CREATE_URL)
            .with_messages(Some(CREATE_SUCCESS_TEXT.to_owned()), Some(CREATE_FAILURE_TEXT.to_owned())),
    }
    .with_form(draft.form_fields())
    .on_surface(SurfaceKey::from(TEMPLATE_SURFACE));

    let outcome = executor
        .execute(&request, already_handled, surfaces, control, toasts)
        .await;
    if outcome.is_success() {
        match mode {
            DraftMode::Edit => manager.modify(|m| m.apply_update(&draft)),
            DraftMode::Create => executor.platform().reload(),
        }
    }
    outcome
}

/// Delete template `id` after confirmation and drop it from the list.
pub async fn delete_template<P, S, C, M, T>(
    executor: &MutationExecutor<P>,
    id: &str,
    surfaces: &S,
    control: &C,
    manager: &M,
    toasts: &T,
) -> MutationOutcome
where
    P: Platform,
    S: Store<SurfaceRegistry>,
    C: Store<ControlState>,
    M: Store<TemplateManagerState>,
    T: Store<ToastState> + Clone + 'static,
{
    if id.is_empty() {
        return MutationOutcome::Skipped;
    }
    let request = MutationRequest::delete(template_delete_url(id))
        .with_confirm(DELETE_CONFIRM_TEXT)
        .on_surface(SurfaceKey::from(TEMPLATE_SURFACE))
        .with_messages(Some(DELETE_SUCCESS_TEXT.to_owned()), Some(DELETE_FAILURE_TEXT.to_owned()));
    let outcome = executor.execute(&request, false, surfaces, control, toasts).await;
    if outcome.is_success() {
        manager.modify(|m| m.remove(id));
    }
    outcome
}

/// Render the unsaved body of the `mode` draft into its preview.
pub async fn preview_draft<P, M, T>(platform: &P, auth: &AuthContext, mode: DraftMode, manager: &M, toasts: &T)
where
    P: Platform,
    M: Store<TemplateManagerState>,
    T: Store<ToastState> + Clone + 'static,
{
    let body = manager.peek(|m| m.draft(mode).map(|d| d.body.clone())).unwrap_or_default();
    if body.trim().is_empty() {
        notify(platform, toasts, ToastRequest::warning(EMPTY_BODY_TEXT));
        return;
    }
    match render_template_body(platform, auth, &body).await {
        Ok(rendered) => {
            let preview = if rendered.is_empty() { PREVIEW_UNAVAILABLE_TEXT.to_owned() } else { rendered };
            manager.modify(|m| {
                if let Some(draft) = m.draft_mut(mode) {
                    draft.preview = preview;
                }
            });
        }
        Err(e) => {
            leptos::logging::warn!("template preview failed: {e}");
            notify(platform, toasts, ToastRequest::error(PREVIEW_FAILURE_TEXT));
        }
    }
}

#[derive(Clone, Copy)]
struct ManagerCtx {
    manager: RwSignal<TemplateManagerState>,
    surfaces: RwSignal<SurfaceRegistry>,
    toasts: RwSignal<ToastState>,
    save_control: RwSignal<ControlState>,
    create_control: RwSignal<ControlState>,
    delete_control: RwSignal<ControlState>,
}

#[component]
pub fn TemplateManager() -> impl IntoView {
    let config = expect_context::<DashboardConfig>();
    let auth = expect_context::<AuthContext>();
    let ctx = ManagerCtx {
        manager: RwSignal::new(TemplateManagerState::new(config.templates.clone())),
        surfaces: expect_context::<RwSignal<SurfaceRegistry>>(),
        toasts: expect_context::<RwSignal<ToastState>>(),
        save_control: RwSignal::new(ControlState::new("Save changes", Some("Saving..."))),
        create_control: RwSignal::new(ControlState::new("Create template", Some("Creating..."))),
        delete_control: RwSignal::new(ControlState::new("Remove", Some("Removing..."))),
    };
    let executor = MutationExecutor::new(BrowserPlatform, auth.clone());

    let rows_executor = executor.clone();
    let rows_auth = auth.clone();
    let rows = move || {
        let executor = rows_executor.clone();
        let auth = rows_auth.clone();
        ctx.manager
            .with(|m| m.templates.clone())
            .into_iter()
            .map(move |entry| template_row(entry, ctx, executor.clone(), auth.clone()))
            .collect_view()
    };

    let editor_executor = executor.clone();
    let editor_auth = auth.clone();
    let editor = move || {
        ctx.manager.with(|m| m.editing.is_some()).then(|| {
            draft_form(DraftMode::Edit, ctx, editor_executor.clone(), editor_auth.clone(), ctx.save_control)
        })
    };
    let close_editor = move |_| {
        if resolve(Control::ModalClose, EventKind::Click) == Some(Action::CloseModal) {
            ctx.manager.update(|m| m.editing = None);
        }
    };

    view! {
        <section class="template-manager" aria-label="Delivery templates">
            <SurfaceContainer surface=TEMPLATE_SURFACE class="template-manager__list">
                <table class="template-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Description"</th>
                            <th>"Locale"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
            </SurfaceContainer>
            <div class="template-manager__create">
                <h3>"New template"</h3>
                {draft_form(DraftMode::Create, ctx, executor, auth, ctx.create_control)}
            </div>
            <Show when=move || ctx.manager.with(|m| m.editing.is_some())>
                <div class="modal open" role="dialog" aria-modal="true">
                    <div class="modal-dialog">
                        <header class="modal-dialog__header">
                            <h3>"Edit template"</h3>
                            <button type="button" class="btn" aria-label="Close" on:click=close_editor>"x"</button>
                        </header>
                        {editor.clone()}
                    </div>
                </div>
            </Show>
        </section>
    }
}

fn template_row(
    entry: TemplateEntry,
    ctx: ManagerCtx,
    executor: MutationExecutor<BrowserPlatform>,
    auth: AuthContext,
) -> impl IntoView {
    let edit_entry = entry.clone();
    let on_edit = move |_| {
        if resolve(Control::TemplateEdit, EventKind::Click) != Some(Action::EditTemplate) {
            return;
        }
        let entry = edit_entry.clone();
        let auth = auth.clone();
        spawn(async move {
            open_editor(&BrowserPlatform, &auth, &entry, &ctx.manager, &ctx.toasts).await;
        });
    };
    let id = entry.id.clone();
    let on_delete = move |_| {
        if resolve(Control::TemplateDelete, EventKind::Click) != Some(Action::DeleteTemplate) {
            return;
        }
        let executor = executor.clone();
        let id = id.clone();
        spawn(async move {
            delete_template(&executor, &id, &ctx.surfaces, &ctx.delete_control, &ctx.manager, &ctx.toasts).await;
        });
    };

    view! {
        <tr data-template-row=entry.id.clone()>
            <td>{entry.name}</td>
            <td>{entry.description}</td>
            <td>{entry.locale}</td>
            <td class="template-table__actions">
                <button type="button" class="btn" on:click=on_edit>"Edit"</button>
                <button
                    type="button"
                    class="btn btn--danger"
                    disabled=move || ctx.delete_control.with(|c| c.busy)
                    on:click=on_delete
                >
                    "Remove"
                </button>
            </td>
        </tr>
    }
}

fn draft_form(
    mode: DraftMode,
    ctx: ManagerCtx,
    executor: MutationExecutor<BrowserPlatform>,
    auth: AuthContext,
    control: RwSignal<ControlState>,
) -> impl IntoView {
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        let handled = ev.default_prevented();
        ev.prevent_default();
        if resolve(Control::TemplateForm, EventKind::Submit) != Some(Action::SaveTemplate) {
            return;
        }
        let executor = executor.clone();
        spawn(async move {
            save_draft(&executor, mode, handled, &ctx.surfaces, &control, &ctx.manager, &ctx.toasts).await;
        });
    };
    let on_preview = move |_| {
        if resolve(Control::TemplatePreview, EventKind::Click) != Some(Action::PreviewDraft) {
            return;
        }
        let auth = auth.clone();
        spawn(async move {
            preview_draft(&BrowserPlatform, &auth, mode, &ctx.manager, &ctx.toasts).await;
        });
    };
    let preview = move || {
        ctx.manager
            .with(|m| m.draft(mode).map(|d| d.preview.clone()))
            .unwrap_or_default()
    };

    view! {
        <form class="template-form" on:submit=on_submit>
            {DraftField::ALL.iter().map(|&field| draft_input(mode, field, ctx.manager)).collect_view()}
            <div class="template-form__actions">
                <button type="button" class="btn" on:click=on_preview>"Preview"</button>
                <button type="submit" class=move || control.with(ControlState::class) disabled=move || control.with(|c| c.busy)>
                    {move || control.with(|c| c.label.clone())}
                </button>
            </div>
            <pre class="template-form__preview">{preview}</pre>
        </form>
    }
}

fn draft_input(mode: DraftMode, field: DraftField, manager: RwSignal<TemplateManagerState>) -> AnyView {
    let value = move || {
        manager
            .with(|m| m.draft(mode).map(|d| d.field(field).to_owned()))
            .unwrap_or_default()
    };
    let store = move |value: String| {
        manager.update(|m| {
            if let Some(draft) = m.draft_mut(mode) {
                draft.set_field(field, value);
            }
        });
    };
    if field == DraftField::Body {
        view! {
            <label class="template-form__field">
                <span>{field.caption()}</span>
                <textarea name=field.name() rows="8" prop:value=value on:input=move |ev| store(event_target_value(&ev))></textarea>
            </label>
        }
        .into_any()
    } else {
        view! {
            <label class="template-form__field">
                <span>{field.caption()}</span>
                <input type="text" name=field.name() prop:value=value on:input=move |ev| store(event_target_value(&ev))/>
            </label>
        }
        .into_any()
    }
}
