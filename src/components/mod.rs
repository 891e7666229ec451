//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard panels and dialogs while reading/writing
//! shared state from Leptos context providers. Network work is delegated to
//! the `net` drivers; components only wire events to them.

pub mod artifact_preview;
pub mod incident_feed;
pub mod jobs_table;
pub mod log_timeline;
pub mod process_action;
pub mod settings_form;
pub mod status_label;
pub mod summary_cards;
pub mod surface;
pub mod template_manager;
pub mod template_preview;
pub mod toast_stack;
