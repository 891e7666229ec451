//! Networking modules for the dashboard's JSON endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` defines transport-neutral requests, `types` the payload schema,
//! `poller` the recurring snapshot fetch, `controller` on-demand list fetches,
//! and `mutation` authenticated writes.

pub mod api;
pub mod controller;
pub mod http;
pub mod mutation;
pub mod poller;
pub mod types;
