use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use super::domain::{Notification, NotificationId};
use super::repository::{NotificationRepository, NotificationSink, OutboxError};
use crate::identity::{UserDirectory, UserId};

/// Notification outbox: creation for the lifecycle, read-side operations for
/// recipients.
pub struct NotificationOutbox<S> {
    repository: Arc<S>,
    users: Arc<dyn UserDirectory>,
}

static NOTIFICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_notification_id() -> NotificationId {
    let id = NOTIFICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    NotificationId(format!("ntf-{id:06}"))
}

impl<S> NotificationOutbox<S>
where
    S: NotificationRepository + 'static,
{
    pub fn new(repository: Arc<S>, users: Arc<dyn UserDirectory>) -> Self {
        Self { repository, users }
    }

    /// Create an unread notification for `recipient`.
    pub fn deliver(
        &self,
        recipient: &UserId,
        message: impl Into<String>,
    ) -> Result<Notification, OutboxError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(OutboxError::Validation("message is required"));
        }
        if !self.users.exists(recipient)? {
            return Err(OutboxError::NotFound("Recipient"));
        }

        let notification = Notification {
            id: next_notification_id(),
            user_id: recipient.clone(),
            message,
            is_read: false,
            created_at: Utc::now(),
        };
        let stored = self.repository.append(notification)?;
        debug!(recipient = %recipient, notification = %stored.id, "notification delivered");
        Ok(stored)
    }

    pub fn list_for_user(&self, user: &UserId) -> Result<Vec<Notification>, OutboxError> {
        Ok(self.repository.for_user(user)?)
    }

    pub fn unread_count(&self, user: &UserId) -> Result<usize, OutboxError> {
        Ok(self.repository.unread_count(user)?)
    }

    pub fn mark_read(
        &self,
        user: &UserId,
        id: &NotificationId,
    ) -> Result<Notification, OutboxError> {
        self.repository
            .mark_read(user, id)?
            .ok_or(OutboxError::NotFound("Notification"))
    }

    /// Returns how many notifications flipped from unread to read.
    pub fn mark_all_read(&self, user: &UserId) -> Result<usize, OutboxError> {
        Ok(self.repository.mark_all_read(user)?)
    }

    pub fn delete_one(&self, user: &UserId, id: &NotificationId) -> Result<(), OutboxError> {
        if self.repository.delete(user, id)? {
            Ok(())
        } else {
            Err(OutboxError::NotFound("Notification"))
        }
    }

    pub fn delete_all(&self, user: &UserId) -> Result<usize, OutboxError> {
        Ok(self.repository.delete_all(user)?)
    }
}

impl<S> NotificationSink for NotificationOutbox<S>
where
    S: NotificationRepository + 'static,
{
    fn deliver(&self, recipient: &UserId, message: String) -> Result<Notification, OutboxError> {
        NotificationOutbox::deliver(self, recipient, message)
    }
}
