use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

use super::token::{TokenError, TokenKeys};
use crate::response;

/// Resolve the bearer token into an [`Actor`](super::Actor) request extension,
/// answering 401 when it is missing or does not verify.
pub async fn require_actor(
    State(keys): State<Arc<TokenKeys>>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = match extract_bearer(req.headers()) {
        Some(token) => token,
        None => return response::message(StatusCode::UNAUTHORIZED, "No token, authorization denied"),
    };

    match keys.verify(token) {
        Ok(actor) => {
            req.extensions_mut().insert(actor);
            next.run(req).await
        }
        Err(TokenError::Expired) => response::message(StatusCode::UNAUTHORIZED, "Token expired"),
        Err(err) => {
            tracing::debug!(error = %err, "rejected bearer token");
            response::message(StatusCode::UNAUTHORIZED, "Token is not valid")
        }
    }
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let token = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .trim();

    (!token.is_empty()).then_some(token)
}
