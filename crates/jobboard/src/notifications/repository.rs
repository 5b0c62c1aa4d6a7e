use super::domain::{Notification, NotificationId};
use crate::applications::RepositoryError;
use crate::identity::UserId;
use crate::jobs::RegistryError;

/// Append-mostly storage for notifications, always scoped to one recipient.
pub trait NotificationRepository: Send + Sync {
    fn append(&self, notification: Notification) -> Result<Notification, RepositoryError>;
    /// Newest first.
    fn for_user(&self, user: &UserId) -> Result<Vec<Notification>, RepositoryError>;
    fn unread_count(&self, user: &UserId) -> Result<usize, RepositoryError>;
    /// `None` when the notification is missing or belongs to someone else.
    fn mark_read(
        &self,
        user: &UserId,
        id: &NotificationId,
    ) -> Result<Option<Notification>, RepositoryError>;
    fn mark_all_read(&self, user: &UserId) -> Result<usize, RepositoryError>;
    fn delete(&self, user: &UserId, id: &NotificationId) -> Result<bool, RepositoryError>;
    fn delete_all(&self, user: &UserId) -> Result<usize, RepositoryError>;
}

/// Outbound hook the application lifecycle writes to. Callers treat failures
/// as non-fatal.
pub trait NotificationSink: Send + Sync {
    fn deliver(&self, recipient: &UserId, message: String) -> Result<Notification, OutboxError>;
}

#[derive(Debug, thiserror::Error)]
pub enum OutboxError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Storage(#[from] RepositoryError),
    #[error(transparent)]
    Directory(#[from] RegistryError),
}
