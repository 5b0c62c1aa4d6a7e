use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Uniform `{message}` error body shared by every router.
pub(crate) fn message(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "message": message.into() }))).into_response()
}

/// 500 with a fixed body; the detail is only logged.
pub(crate) fn server_error(detail: &dyn std::fmt::Display) -> Response {
    tracing::error!(error = %detail, "request failed");
    message(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
}
