use std::sync::{Arc, Mutex, MutexGuard};

use crate::applications::RepositoryError;
use crate::identity::UserId;
use crate::notifications::{Notification, NotificationId, NotificationRepository};

#[derive(Default, Clone)]
pub struct InMemoryNotificationRepository {
    rows: Arc<Mutex<Vec<Notification>>>,
}

impl InMemoryNotificationRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<Notification>>, RepositoryError> {
        self.rows
            .lock()
            .map_err(|_| RepositoryError::Unavailable("notification store poisoned".to_string()))
    }

    /// Every stored notification regardless of recipient, oldest first.
    pub fn all(&self) -> Vec<Notification> {
        self.lock().map(|rows| rows.clone()).unwrap_or_default()
    }
}

impl NotificationRepository for InMemoryNotificationRepository {
    fn append(&self, notification: Notification) -> Result<Notification, RepositoryError> {
        self.lock()?.push(notification.clone());
        Ok(notification)
    }

    fn for_user(&self, user: &UserId) -> Result<Vec<Notification>, RepositoryError> {
        let rows = self.lock()?;
        let mut mine: Vec<Notification> = rows
            .iter()
            .filter(|notification| &notification.user_id == user)
            .cloned()
            .collect();
        // Ids come from a monotonic sequence, so they break timestamp ties.
        mine.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(mine)
    }

    fn unread_count(&self, user: &UserId) -> Result<usize, RepositoryError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|notification| &notification.user_id == user && !notification.is_read)
            .count())
    }

    fn mark_read(
        &self,
        user: &UserId,
        id: &NotificationId,
    ) -> Result<Option<Notification>, RepositoryError> {
        let mut rows = self.lock()?;
        Ok(rows
            .iter_mut()
            .find(|notification| &notification.id == id && &notification.user_id == user)
            .map(|notification| {
                notification.is_read = true;
                notification.clone()
            }))
    }

    fn mark_all_read(&self, user: &UserId) -> Result<usize, RepositoryError> {
        let mut rows = self.lock()?;
        let mut updated = 0;
        for notification in rows
            .iter_mut()
            .filter(|notification| &notification.user_id == user && !notification.is_read)
        {
            notification.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }

    fn delete(&self, user: &UserId, id: &NotificationId) -> Result<bool, RepositoryError> {
        let mut rows = self.lock()?;
        let before = rows.len();
        rows.retain(|notification| !(&notification.id == id && &notification.user_id == user));
        Ok(rows.len() != before)
    }

    fn delete_all(&self, user: &UserId) -> Result<usize, RepositoryError> {
        let mut rows = self.lock()?;
        let before = rows.len();
        rows.retain(|notification| &notification.user_id != user);
        Ok(before - rows.len())
    }
}
