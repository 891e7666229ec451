//! Browser environment seam: network, timers, visibility, dialogs.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pollers, controllers, and mutation actions never touch `web-sys` directly.
//! They are generic over [`Platform`], which the browser build implements with
//! `gloo-net`/`gloo-timers` and tests implement with a scripted fake.
//!
//! Client-side (csr): real calls. Without the `csr` feature the browser
//! platform degrades to inert stubs, the same way `net::api` stubs behave on
//! a server build.

#![allow(clippy::unused_async)]

use std::future::Future;
use std::time::Duration;

use crate::net::http::{FetchError, HttpRequest, HttpResponse};

/// Longest delay a browser timer honours (`setTimeout` takes a signed
/// 32-bit millisecond count; anything larger fires immediately).
pub const MAX_TIMER_DELAY: Duration = Duration::from_millis(2_147_483_647);

/// Everything the reactive layer needs from its host environment.
#[allow(async_fn_in_trait)]
pub trait Platform {
    /// Issue one HTTP request and return its status and body text.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError>;

    /// Suspend the current task for `duration`.
    async fn sleep(&self, duration: Duration);

    /// Whether the document is currently visible to the user.
    fn is_page_visible(&self) -> bool;

    /// Ask the user to confirm a destructive action.
    fn confirm(&self, message: &str) -> bool;

    /// Open `url` as a new navigation target.
    fn open_tab(&self, url: &str);

    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);

    /// Reload the current page.
    fn reload(&self);

    /// Local wall-clock time as `HH:MM:SS`.
    fn clock_label(&self) -> String {
        chrono::Local::now().format("%H:%M:%S").to_string()
    }
}

/// The real browser environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrowserPlatform;

impl Platform for BrowserPlatform {
    #[cfg_attr(not(feature = "csr"), allow(unused_variables))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        #[cfg(feature = "csr")]
        {
            use crate::net::http::{Method, RequestBody};
            use gloo_net::http::RequestBuilder;

            let method = match request.method {
                Method::Get => gloo_net::http::Method::GET,
                Method::Post => gloo_net::http::Method::POST,
                Method::Delete => gloo_net::http::Method::DELETE,
            };
            let mut builder = RequestBuilder::new(&request.url)
                .method(method)
                .credentials(web_sys::RequestCredentials::SameOrigin);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let prepared = match request.body {
                RequestBody::Empty => builder.build(),
                RequestBody::Form(fields) => builder
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(crate::util::query_string::encode_pairs(fields)),
            }
            .map_err(|e| FetchError::Transport(e.to_string()))?;
            let resp = prepared
                .send()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| FetchError::Transport(e.to_string()))?;
            Ok(HttpResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(FetchError::Unavailable)
        }
    }

    #[cfg_attr(not(feature = "csr"), allow(unused_variables))]
    async fn sleep(&self, duration: Duration) {
        #[cfg(feature = "csr")]
        {
            gloo_timers::future::sleep(duration.min(MAX_TIMER_DELAY)).await;
        }
    }

    fn is_page_visible(&self) -> bool {
        #[cfg(feature = "csr")]
        {
            web_sys::window()
                .and_then(|w| w.document())
                .is_none_or(|doc| !doc.hidden())
        }
        #[cfg(not(feature = "csr"))]
        {
            false
        }
    }

    #[cfg_attr(not(feature = "csr"), allow(unused_variables))]
    fn confirm(&self, message: &str) -> bool {
        #[cfg(feature = "csr")]
        {
            web_sys::window().is_some_and(|w| w.confirm_with_message(message).unwrap_or(false))
        }
        #[cfg(not(feature = "csr"))]
        {
            false
        }
    }

    #[cfg_attr(not(feature = "csr"), allow(unused_variables))]
    fn open_tab(&self, url: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Err(e) = window.open_with_url_and_target(url, "_blank") {
                leptos::logging::warn!("open {url} failed: {e:?}");
            }
        }
    }

    #[cfg_attr(not(feature = "csr"), allow(unused_variables))]
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        #[cfg(feature = "csr")]
        {
            let millis = u32::try_from(delay.min(MAX_TIMER_DELAY).as_millis()).unwrap_or(u32::MAX);
            gloo_timers::callback::Timeout::new(millis, task).forget();
        }
    }

    fn reload(&self) {
        #[cfg(feature = "csr")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Err(e) = window.location().reload() {
                leptos::logging::warn!("reload failed: {e:?}");
            }
        }
    }
}

/// Run `task` on the browser event loop. Without a browser there is no event
/// loop, so the task is dropped unpolled.
pub fn spawn(task: impl Future<Output = ()> + 'static) {
    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(task);
    }
    #[cfg(not(feature = "csr"))]
    {
        drop(task);
    }
}
