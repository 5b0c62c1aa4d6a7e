//! Application lifecycle: submission, triage, withdrawal and listings.
//!
//! Authorization decisions go through [`crate::identity::authorization`];
//! storage goes through [`ApplicationRepository`] and every lifecycle event
//! is mirrored into the notification outbox on a best-effort basis.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Application, ApplicationId, ApplicationStatus, ApplicationView};
pub use repository::{ApplicationRepository, RepositoryError};
pub use router::application_router;
pub use service::{ApplicationLifecycle, ApplicationServiceError};
