//! Page components, one per server-rendered dashboard page.

pub mod dashboard;
pub mod job_detail;
pub mod settings;
