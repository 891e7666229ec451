//! Transport-neutral HTTP request/response types.
//!
//! DESIGN
//! ======
//! Pollers, controllers, and mutation actions describe requests with these
//! plain structs and hand them to a [`crate::util::platform::Platform`]. The
//! browser platform turns them into `gloo-net` calls; tests script them.
//!
//! ERROR HANDLING
//! ==============
//! Every failure a panel can observe is a [`FetchError`]. Panels absorb it at
//! their own boundary so one broken endpoint never freezes the rest of the
//! dashboard.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use serde_json::Value;

/// HTTP verbs used by the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    /// Upper-case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// Request payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded` fields, in submission order.
    Form(Vec<(String, String)>),
}

/// A single outgoing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    /// `GET` request asking for JSON.
    pub fn get_json(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: vec![("Accept".to_owned(), "application/json".to_owned())],
            body: RequestBody::Empty,
        }
    }

    /// `GET` request asking for plain text.
    pub fn get_text(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: vec![("Accept".to_owned(), "text/plain".to_owned())],
            body: RequestBody::Empty,
        }
    }

    /// Add or replace a header.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Look up a header value case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Look up a form field when the body is a form.
    pub fn form_field(&self, name: &str) -> Option<&str> {
        match &self.body {
            RequestBody::Form(fields) => fields
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            RequestBody::Empty => None,
        }
    }
}

/// Response status plus raw body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Reject non-2xx statuses.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Status`] when the status is outside 2xx.
    pub fn require_success(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status(self.status))
        }
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Payload`] when the body is not valid JSON.
    pub fn json(&self) -> Result<Value, FetchError> {
        serde_json::from_str(&self.body).map_err(|e| FetchError::Payload(e.to_string()))
    }

    /// Parse the body as JSON, treating an empty or invalid body as `{}`.
    ///
    /// Mutation replies are optional decorations on success, so a missing
    /// body must not turn a completed write into a failure.
    pub fn json_or_empty(&self) -> Value {
        match serde_json::from_str::<Value>(&self.body) {
            Ok(value) => value,
            Err(_) => Value::Object(serde_json::Map::new()),
        }
    }
}

/// Failure observed while talking to the backend.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status: {0}")]
    Status(u16),
    #[error("invalid payload: {0}")]
    Payload(String),
    #[error("not available outside the browser")]
    Unavailable,
}
