use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationId, ApplicationStatus};
use super::repository::ApplicationRepository;
use super::service::{ApplicationLifecycle, ApplicationServiceError};
use crate::identity::{Actor, UserId};
use crate::jobs::JobId;
use crate::resumes::ResumeId;
use crate::response;

/// Router builder exposing the application lifecycle over HTTP. Expects the
/// bearer middleware to have inserted an [`Actor`].
pub fn application_router<R>(service: Arc<ApplicationLifecycle<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route("/api/applications/my", get(my_applications_handler::<R>))
        .route(
            "/api/applications/employer",
            get(employer_applications_handler::<R>),
        )
        .route(
            "/api/applications/employer/:employer_id",
            get(employer_applications_for_handler::<R>),
        )
        .route(
            "/api/applications/job/:job_id",
            get(job_applications_handler::<R>),
        )
        .route("/api/applications/:id/apply", post(apply_handler::<R>))
        .route("/api/applications/:id/status", put(update_status_handler::<R>))
        .route("/api/applications/:id", delete(withdraw_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApplyRequest {
    #[serde(default)]
    pub(crate) resume_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusRequest {
    #[serde(default)]
    pub(crate) status: Option<String>,
}

impl IntoResponse for ApplicationServiceError {
    fn into_response(self) -> Response {
        match self {
            ApplicationServiceError::Validation(message) => {
                response::message(StatusCode::BAD_REQUEST, message)
            }
            ApplicationServiceError::InvalidReference => {
                response::message(StatusCode::BAD_REQUEST, self.to_string())
            }
            ApplicationServiceError::Forbidden(message) => {
                response::message(StatusCode::FORBIDDEN, message)
            }
            ApplicationServiceError::NotFound(_) => {
                response::message(StatusCode::NOT_FOUND, self.to_string())
            }
            ApplicationServiceError::Conflict => {
                response::message(StatusCode::CONFLICT, self.to_string())
            }
            ApplicationServiceError::Repository(err) => response::server_error(&err),
            ApplicationServiceError::Registry(err) => response::server_error(&err),
        }
    }
}

fn malformed_body(rejection: JsonRejection) -> ApplicationServiceError {
    ApplicationServiceError::Validation(rejection.body_text())
}

pub(crate) async fn apply_handler<R>(
    State(service): State<Arc<ApplicationLifecycle<R>>>,
    Extension(actor): Extension<Actor>,
    Path(job_id): Path<String>,
    payload: Result<Json<ApplyRequest>, JsonRejection>,
) -> Result<Response, ApplicationServiceError>
where
    R: ApplicationRepository + 'static,
{
    let Json(request) = payload.map_err(malformed_body)?;
    let resume_id = request
        .resume_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApplicationServiceError::Validation("resumeId is required".to_string()))?;

    let application = service.submit(&actor, &JobId(job_id), &ResumeId(resume_id))?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "application": application })),
    )
        .into_response())
}

pub(crate) async fn update_status_handler<R>(
    State(service): State<Arc<ApplicationLifecycle<R>>>,
    Extension(actor): Extension<Actor>,
    Path(application_id): Path<String>,
    payload: Result<Json<StatusRequest>, JsonRejection>,
) -> Result<Response, ApplicationServiceError>
where
    R: ApplicationRepository + 'static,
{
    let Json(request) = payload.map_err(malformed_body)?;
    let status = request
        .status
        .as_deref()
        .and_then(ApplicationStatus::parse)
        .ok_or_else(|| ApplicationServiceError::Validation("Invalid status value".to_string()))?;

    let application =
        service.update_status(&actor, &ApplicationId(application_id), status)?;
    Ok(Json(json!({
        "message": "Application status updated",
        "application": application,
    }))
    .into_response())
}

pub(crate) async fn withdraw_handler<R>(
    State(service): State<Arc<ApplicationLifecycle<R>>>,
    Extension(actor): Extension<Actor>,
    Path(application_id): Path<String>,
) -> Result<Response, ApplicationServiceError>
where
    R: ApplicationRepository + 'static,
{
    service.withdraw(&actor, &ApplicationId(application_id))?;
    Ok(Json(json!({ "message": "Application withdrawn successfully" })).into_response())
}

pub(crate) async fn my_applications_handler<R>(
    State(service): State<Arc<ApplicationLifecycle<R>>>,
    Extension(actor): Extension<Actor>,
) -> Result<Response, ApplicationServiceError>
where
    R: ApplicationRepository + 'static,
{
    let applications = service.list_for_candidate(&actor)?;
    Ok(Json(applications).into_response())
}

pub(crate) async fn employer_applications_handler<R>(
    State(service): State<Arc<ApplicationLifecycle<R>>>,
    Extension(actor): Extension<Actor>,
) -> Result<Response, ApplicationServiceError>
where
    R: ApplicationRepository + 'static,
{
    let applications = service.list_for_employer(&actor, &actor.id)?;
    Ok(Json(applications).into_response())
}

pub(crate) async fn employer_applications_for_handler<R>(
    State(service): State<Arc<ApplicationLifecycle<R>>>,
    Extension(actor): Extension<Actor>,
    Path(employer_id): Path<String>,
) -> Result<Response, ApplicationServiceError>
where
    R: ApplicationRepository + 'static,
{
    let applications = service.list_for_employer(&actor, &UserId(employer_id))?;
    Ok(Json(applications).into_response())
}

pub(crate) async fn job_applications_handler<R>(
    State(service): State<Arc<ApplicationLifecycle<R>>>,
    Extension(actor): Extension<Actor>,
    Path(job_id): Path<String>,
) -> Result<Response, ApplicationServiceError>
where
    R: ApplicationRepository + 'static,
{
    let applications = service.list_for_job(&actor, &JobId(job_id))?;
    Ok(Json(applications).into_response())
}
