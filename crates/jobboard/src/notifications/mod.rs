//! Per-recipient notification outbox fed by application lifecycle events.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Notification, NotificationId};
pub use repository::{NotificationRepository, NotificationSink, OutboxError};
pub use router::notification_router;
pub use service::NotificationOutbox;
