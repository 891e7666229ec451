//! Toast notification channel.
//!
//! DESIGN
//! ======
//! Toasts are fire-and-forget: any component pushes a [`ToastRequest`] and
//! never references the toast again. Each toast then walks a small state
//! machine, `Visible -> FadingOut -> Removed`, driven by two transitions
//! scheduled through the [`Platform`] so tests can advance logical time.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use std::time::Duration;

use super::store::Store;
use crate::util::platform::Platform;

/// How long a toast stays fully visible.
pub const DISPLAY_DURATION: Duration = Duration::from_millis(4000);
/// Fade-out animation length before removal.
pub const FADE_DURATION: Duration = Duration::from_millis(300);

/// Visual flavor of a toast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastVariant {
    /// Parse a variant name; unknown names fall back to `Info`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "error" | "danger" => Self::Error,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    fn preset_icon(self) -> &'static str {
        match self {
            Self::Success => "[OK]",
            Self::Error | Self::Warning => "[!]",
            Self::Info => "[i]",
        }
    }

    fn preset_title(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Error => "Error",
            Self::Warning => "Attention",
            Self::Info => "Information",
        }
    }
}

/// What a caller asks the channel to show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastRequest {
    pub message: String,
    pub variant: ToastVariant,
    /// `None` uses the variant preset; `Some("")` shows no title.
    pub title: Option<String>,
    pub icon: Option<String>,
}

impl ToastRequest {
    pub fn new(message: impl Into<String>, variant: ToastVariant) -> Self {
        Self { message: message.into(), variant, title: None, icon: None }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Error)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Warning)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Lifecycle phase of a toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    FadingOut,
    Removed,
}

/// A toast on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub variant: ToastVariant,
    pub title: Option<String>,
    pub icon: String,
    pub phase: ToastPhase,
}

impl Toast {
    /// CSS classes; `visible` drives the enter/leave transition.
    pub fn class(&self) -> String {
        let base = format!("toast toast--{}", self.variant.as_str());
        if self.phase == ToastPhase::Visible {
            format!("{base} visible")
        } else {
            base
        }
    }
}

/// Every toast currently mounted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Add a toast in the `Visible` phase and return its id.
    pub fn push(&mut self, request: ToastRequest) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        let title = match request.title {
            Some(title) if title.is_empty() => None,
            Some(title) => Some(title),
            None => Some(request.variant.preset_title().to_owned()),
        };
        let icon = request
            .icon
            .unwrap_or_else(|| request.variant.preset_icon().to_owned());
        self.toasts.push(Toast {
            id,
            message: request.message,
            variant: request.variant,
            title,
            icon,
            phase: ToastPhase::Visible,
        });
        id
    }

    pub fn get(&self, id: u64) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    /// Phase of `id`; toasts no longer mounted report `Removed`.
    pub fn phase(&self, id: u64) -> ToastPhase {
        self.get(id).map_or(ToastPhase::Removed, |t| t.phase)
    }

    /// `Visible -> FadingOut`. Returns whether the transition applied.
    pub fn begin_fade(&mut self, id: u64) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) if toast.phase == ToastPhase::Visible => {
                toast.phase = ToastPhase::FadingOut;
                true
            }
            _ => false,
        }
    }

    /// `FadingOut -> Removed`; removed toasts leave the list.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts
            .retain(|t| !(t.id == id && t.phase == ToastPhase::FadingOut));
        self.toasts.len() != before
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

/// Show a toast and schedule its fade and removal.
pub fn notify<P, S>(platform: &P, store: &S, request: ToastRequest) -> u64
where
    P: Platform,
    S: Store<ToastState> + Clone + 'static,
{
    let mut id = 0;
    store.modify(|state| id = state.push(request));

    let fade_store = store.clone();
    platform.schedule(
        DISPLAY_DURATION,
        Box::new(move || {
            fade_store.modify(|state| {
                state.begin_fade(id);
            });
        }),
    );
    let remove_store = store.clone();
    platform.schedule(
        DISPLAY_DURATION + FADE_DURATION,
        Box::new(move || {
            remove_store.modify(|state| {
                state.remove(id);
            });
        }),
    );
    id
}
