//! Surface state: which UI regions are busy or errored.
//!
//! DESIGN
//! ======
//! A surface is a named visual scope. Every widget bound to the same key
//! (loading skeleton, content container, status chip) reads one
//! [`SurfaceFlags`] entry, so a single write flips all of them together.
//! Fetch code only says "surface X is busy"; it never knows which widgets
//! exist.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::collections::HashMap;
use std::fmt;

use super::store::Store;

/// Identifier of a surface (e.g. `summary-cards`, `logs-timeline`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SurfaceKey(String);

impl SurfaceKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty keys address nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SurfaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SurfaceKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SurfaceKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Independent busy/error flags of one surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceFlags {
    pub busy: bool,
    pub error: bool,
}

impl SurfaceFlags {
    /// Skeleton placeholders are shown only while busy.
    pub fn skeleton_hidden(self) -> bool {
        !self.busy
    }

    /// CSS classes for a content container bound to this surface.
    pub fn container_class(self) -> &'static str {
        match (self.busy, self.error) {
            (true, true) => "surface is-loading has-error",
            (true, false) => "surface is-loading",
            (false, true) => "surface has-error",
            (false, false) => "surface",
        }
    }

    /// CSS classes for a skeleton bound to this surface.
    pub fn skeleton_class(self) -> &'static str {
        if self.busy { "skeleton is-visible" } else { "skeleton" }
    }
}

/// All registered surfaces of the current page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SurfaceRegistry {
    surfaces: HashMap<SurfaceKey, SurfaceFlags>,
}

impl SurfaceRegistry {
    /// Register a surface so widgets and fetches can address it.
    /// Empty keys are ignored; re-registering keeps the current flags.
    pub fn register(&mut self, key: &SurfaceKey) {
        if key.is_empty() {
            return;
        }
        self.surfaces.entry(key.clone()).or_default();
    }

    pub fn contains(&self, key: &SurfaceKey) -> bool {
        self.surfaces.contains_key(key)
    }

    /// Current flags; unknown keys read as idle.
    pub fn flags(&self, key: &SurfaceKey) -> SurfaceFlags {
        self.surfaces.get(key).copied().unwrap_or_default()
    }

    /// Set the busy flag. Returns whether anything changed.
    pub fn set_busy(&mut self, key: &SurfaceKey, busy: bool) -> bool {
        match self.surfaces.get_mut(key) {
            Some(flags) if flags.busy != busy => {
                flags.busy = busy;
                true
            }
            _ => false,
        }
    }

    /// Set the error flag. Returns whether anything changed.
    pub fn set_error(&mut self, key: &SurfaceKey, error: bool) -> bool {
        match self.surfaces.get_mut(key) {
            Some(flags) if flags.error != error => {
                flags.error = error;
                true
            }
            _ => false,
        }
    }
}

/// Toggle `busy` for every widget bound to `key`.
///
/// Writes only when the value changes, so repeated calls leave subscribers
/// untouched. Unknown or empty keys are ignored.
pub fn set_busy(store: &impl Store<SurfaceRegistry>, key: &SurfaceKey, busy: bool) {
    if !needs_write(store, key, |flags| flags.busy != busy) {
        return;
    }
    store.modify(|registry| {
        registry.set_busy(key, busy);
    });
}

/// Toggle `error` for every widget bound to `key`; same rules as [`set_busy`].
pub fn set_error(store: &impl Store<SurfaceRegistry>, key: &SurfaceKey, error: bool) {
    if !needs_write(store, key, |flags| flags.error != error) {
        return;
    }
    store.modify(|registry| {
        registry.set_error(key, error);
    });
}

/// Clear both flags after a successful fetch.
pub fn settle(store: &impl Store<SurfaceRegistry>, key: &SurfaceKey) {
    if !needs_write(store, key, |flags| flags.busy || flags.error) {
        return;
    }
    store.modify(|registry| {
        registry.set_busy(key, false);
        registry.set_error(key, false);
    });
}

fn needs_write(store: &impl Store<SurfaceRegistry>, key: &SurfaceKey, differs: impl Fn(SurfaceFlags) -> bool) -> bool {
    store.peek(|registry| registry.contains(key) && differs(registry.flags(key)))
}
