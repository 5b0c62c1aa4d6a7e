use std::sync::Arc;

use axum::{middleware, Router};

use crate::applications::{application_router, ApplicationLifecycle, ApplicationRepository};
use crate::identity::middleware::require_actor;
use crate::identity::token::TokenKeys;
use crate::notifications::{notification_router, NotificationOutbox, NotificationRepository};

/// Every authenticated `/api` route behind the bearer-token middleware.
/// Unmatched paths fall through as 404 without an auth check.
pub fn api_router<R, S>(
    applications: Arc<ApplicationLifecycle<R>>,
    notifications: Arc<NotificationOutbox<S>>,
    keys: Arc<TokenKeys>,
) -> Router
where
    R: ApplicationRepository + 'static,
    S: NotificationRepository + 'static,
{
    application_router(applications)
        .merge(notification_router(notifications))
        .route_layer(middleware::from_fn_with_state(keys, require_actor))
}
