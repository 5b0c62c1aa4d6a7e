use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Extension, Json, Router,
};
use serde_json::json;

use super::domain::NotificationId;
use super::repository::{NotificationRepository, OutboxError};
use super::service::NotificationOutbox;
use crate::identity::Actor;
use crate::response;

/// Router exposing the authenticated user's notification inbox. Expects the
/// bearer middleware to have inserted an [`Actor`].
pub fn notification_router<S>(outbox: Arc<NotificationOutbox<S>>) -> Router
where
    S: NotificationRepository + 'static,
{
    Router::new()
        .route("/api/notifications/my", get(list_handler::<S>))
        .route(
            "/api/notifications/unread-count",
            get(unread_count_handler::<S>),
        )
        .route(
            "/api/notifications/mark-all-read",
            put(mark_all_read_handler::<S>),
        )
        .route(
            "/api/notifications/clear/all",
            delete(delete_all_handler::<S>),
        )
        .route(
            "/api/notifications/:id/read",
            put(mark_read_handler::<S>),
        )
        .route("/api/notifications/:id", delete(delete_handler::<S>))
        .with_state(outbox)
}

impl IntoResponse for OutboxError {
    fn into_response(self) -> Response {
        match self {
            OutboxError::Validation(message) => response::message(StatusCode::BAD_REQUEST, message),
            OutboxError::NotFound(what) => {
                response::message(StatusCode::NOT_FOUND, format!("{what} not found"))
            }
            OutboxError::Storage(err) => response::server_error(&err),
            OutboxError::Directory(err) => response::server_error(&err),
        }
    }
}

pub(crate) async fn list_handler<S>(
    State(outbox): State<Arc<NotificationOutbox<S>>>,
    Extension(actor): Extension<Actor>,
) -> Result<Response, OutboxError>
where
    S: NotificationRepository + 'static,
{
    let notifications = outbox.list_for_user(&actor.id)?;
    Ok(Json(notifications).into_response())
}

pub(crate) async fn unread_count_handler<S>(
    State(outbox): State<Arc<NotificationOutbox<S>>>,
    Extension(actor): Extension<Actor>,
) -> Result<Response, OutboxError>
where
    S: NotificationRepository + 'static,
{
    let count = outbox.unread_count(&actor.id)?;
    Ok(Json(json!({ "unreadCount": count })).into_response())
}

pub(crate) async fn mark_read_handler<S>(
    State(outbox): State<Arc<NotificationOutbox<S>>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Response, OutboxError>
where
    S: NotificationRepository + 'static,
{
    let notification = outbox.mark_read(&actor.id, &NotificationId(id))?;
    Ok(Json(json!({
        "message": "Notification marked as read",
        "notification": notification,
    }))
    .into_response())
}

pub(crate) async fn mark_all_read_handler<S>(
    State(outbox): State<Arc<NotificationOutbox<S>>>,
    Extension(actor): Extension<Actor>,
) -> Result<Response, OutboxError>
where
    S: NotificationRepository + 'static,
{
    let updated = outbox.mark_all_read(&actor.id)?;
    Ok(Json(json!({
        "message": "All notifications marked as read",
        "updated": updated,
    }))
    .into_response())
}

pub(crate) async fn delete_handler<S>(
    State(outbox): State<Arc<NotificationOutbox<S>>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Response, OutboxError>
where
    S: NotificationRepository + 'static,
{
    outbox.delete_one(&actor.id, &NotificationId(id))?;
    Ok(Json(json!({ "message": "Notification deleted successfully" })).into_response())
}

pub(crate) async fn delete_all_handler<S>(
    State(outbox): State<Arc<NotificationOutbox<S>>>,
    Extension(actor): Extension<Actor>,
) -> Result<Response, OutboxError>
where
    S: NotificationRepository + 'static,
{
    let deleted = outbox.delete_all(&actor.id)?;
    Ok(Json(json!({
        "message": "All notifications deleted successfully",
        "deleted": deleted,
    }))
    .into_response())
}
