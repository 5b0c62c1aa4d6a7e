//! Application lifecycle and authorization core for the job board API.
//!
//! Candidates apply to employer-owned jobs, employers triage the resulting
//! applications and every lifecycle event lands in the recipient's
//! notification outbox.

pub mod api;
pub mod applications;
pub mod config;
pub mod error;
pub mod identity;
pub mod jobs;
pub mod notifications;
pub mod resumes;
mod response;
pub mod store;
pub mod telemetry;
