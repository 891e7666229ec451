//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (surfaces, toasts, query, panels) so components
//! depend on small focused models provided through Leptos context.

pub mod auth;
pub mod panels;
pub mod query;
pub mod store;
pub mod surface;
pub mod toast;
