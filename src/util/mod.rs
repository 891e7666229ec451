//! Utility helpers shared across dashboard modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic to improve reuse and testability.

pub mod bindings;
pub mod format;
pub mod platform;
pub mod query_string;
pub mod render;

#[cfg(test)]
pub(crate) mod test_support;
