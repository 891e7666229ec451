//! CSRF token accessor for mutating requests.
//!
//! DESIGN
//! ======
//! The token is issued by the server template. [`AuthContext`] reads it at
//! most once, caches it, and is handed to executors through Leptos context
//! instead of living in a mutable module global.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, OnceLock};

/// Header carrying the token on every mutating request.
pub const CSRF_HEADER: &str = "X-CSRF-Token";
/// Form field carrying the token on form submissions.
pub const CSRF_FIELD: &str = "csrf_token";

/// Read-only, lazily cached CSRF token.
#[derive(Clone, Debug)]
pub struct AuthContext {
    token: Arc<OnceLock<String>>,
    source: fn() -> Option<String>,
}

impl AuthContext {
    /// Token read lazily from `<meta name="csrf-token">`.
    pub fn from_page() -> Self {
        Self::lazy(read_meta_token)
    }

    /// Token produced by `source` on first use.
    pub fn lazy(source: fn() -> Option<String>) -> Self {
        Self { token: Arc::new(OnceLock::new()), source }
    }

    /// Token known up front.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Arc::new(OnceLock::from(token.into())), source: || None }
    }

    /// The cached token; empty when the page carries none.
    pub fn token(&self) -> &str {
        self.token.get_or_init(|| (self.source)().unwrap_or_default())
    }

    /// Add the token header when a token exists.
    pub fn apply_header(&self, headers: &mut Vec<(String, String)>) {
        let token = self.token();
        if token.is_empty() {
            return;
        }
        headers.retain(|(name, _)| !name.eq_ignore_ascii_case(CSRF_HEADER));
        headers.push((CSRF_HEADER.to_owned(), token.to_owned()));
    }

    /// Add the token form field unless the form already carries one.
    pub fn apply_form(&self, fields: &mut Vec<(String, String)>) {
        let token = self.token();
        if token.is_empty() || fields.iter().any(|(name, _)| name == CSRF_FIELD) {
            return;
        }
        fields.push((CSRF_FIELD.to_owned(), token.to_owned()));
    }
}

fn read_meta_token() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        let document = web_sys::window()?.document()?;
        let meta = document
            .query_selector("meta[name=\"csrf-token\"]")
            .unwrap_or(None)?;
        meta.get_attribute("content")
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}
