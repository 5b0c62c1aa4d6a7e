use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::applications::RepositoryError;
use crate::config::AuthConfig;
use crate::identity::token::TokenKeys;
use crate::identity::{Actor, Role, User, UserDirectory, UserId, UserProfile};
use crate::jobs::RegistryError;
use crate::notifications::{
    Notification, NotificationId, NotificationOutbox, NotificationRepository,
};
use crate::store::{InMemoryNotificationRepository, InMemoryUserDirectory};

pub(super) const ALICE: &str = "cand-1";
pub(super) const BOB: &str = "emp-1";

pub(super) fn alice() -> Actor {
    Actor::new(ALICE, Role::Candidate)
}

pub(super) fn bob() -> Actor {
    Actor::new(BOB, Role::Employer)
}

pub(super) fn user_id(id: &str) -> UserId {
    UserId(id.to_string())
}

pub(super) fn build_outbox() -> (
    Arc<NotificationOutbox<InMemoryNotificationRepository>>,
    Arc<InMemoryNotificationRepository>,
) {
    let users = Arc::new(InMemoryUserDirectory::default());
    for (id, role) in [(ALICE, Role::Candidate), (BOB, Role::Employer)] {
        let user = User::new(user_id(id), id, &format!("{id}@example.com"), role, None)
            .expect("valid fixture user");
        users.register(user).expect("fixture user registers");
    }

    let repository = Arc::new(InMemoryNotificationRepository::default());
    let outbox = Arc::new(NotificationOutbox::new(repository.clone(), users));
    (outbox, repository)
}

/// Deliver `messages` to `recipient` in order, returning the stored rows.
pub(super) fn seed(
    outbox: &NotificationOutbox<InMemoryNotificationRepository>,
    recipient: &str,
    messages: &[&str],
) -> Vec<Notification> {
    messages
        .iter()
        .map(|message| {
            outbox
                .deliver(&user_id(recipient), *message)
                .expect("delivery succeeds")
        })
        .collect()
}

pub(super) fn token_keys() -> Arc<TokenKeys> {
    Arc::new(TokenKeys::new(&AuthConfig {
        jwt_secret: "notification-test-secret".to_string(),
        issuer: "jobboard".to_string(),
        token_ttl_hours: 1,
    }))
}

pub(super) fn bearer(keys: &TokenKeys, actor: &Actor) -> String {
    format!("Bearer {}", keys.issue(actor, None).expect("token issues"))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) struct UnavailableRepository;

fn offline<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("notification store offline".to_string()))
}

impl NotificationRepository for UnavailableRepository {
    fn append(&self, _notification: Notification) -> Result<Notification, RepositoryError> {
        offline()
    }

    fn for_user(&self, _user: &UserId) -> Result<Vec<Notification>, RepositoryError> {
        offline()
    }

    fn unread_count(&self, _user: &UserId) -> Result<usize, RepositoryError> {
        offline()
    }

    fn mark_read(
        &self,
        _user: &UserId,
        _id: &NotificationId,
    ) -> Result<Option<Notification>, RepositoryError> {
        offline()
    }

    fn mark_all_read(&self, _user: &UserId) -> Result<usize, RepositoryError> {
        offline()
    }

    fn delete(&self, _user: &UserId, _id: &NotificationId) -> Result<bool, RepositoryError> {
        offline()
    }

    fn delete_all(&self, _user: &UserId) -> Result<usize, RepositoryError> {
        offline()
    }
}

/// Directory whose backing store cannot be read.
pub(super) struct OfflineDirectory;

impl UserDirectory for OfflineDirectory {
    fn exists(&self, _id: &UserId) -> Result<bool, RegistryError> {
        Err(RegistryError::Unavailable("user directory offline".to_string()))
    }

    fn profile(&self, _id: &UserId) -> Result<Option<UserProfile>, RegistryError> {
        Err(RegistryError::Unavailable("user directory offline".to_string()))
    }
}
