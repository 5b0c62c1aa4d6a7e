use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{Application, ApplicationId, ApplicationStatus, ApplicationView};
use super::repository::{ApplicationRepository, RepositoryError};
use crate::identity::{authorization, Actor, UserDirectory, UserId};
use crate::jobs::{JobId, JobOwnership, JobRegistry, RegistryError};
use crate::notifications::NotificationSink;
use crate::resumes::{ResumeId, ResumeStore};

/// Service composing the application repository with its read-only
/// collaborators and the notification outbox.
pub struct ApplicationLifecycle<R> {
    repository: Arc<R>,
    jobs: Arc<dyn JobRegistry>,
    resumes: Arc<dyn ResumeStore>,
    users: Arc<dyn UserDirectory>,
    notifications: Arc<dyn NotificationSink>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<R> ApplicationLifecycle<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(
        repository: Arc<R>,
        jobs: Arc<dyn JobRegistry>,
        resumes: Arc<dyn ResumeStore>,
        users: Arc<dyn UserDirectory>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            repository,
            jobs,
            resumes,
            users,
            notifications,
        }
    }

    /// Apply to `job_id` with one of the candidate's own resumes.
    ///
    /// The duplicate lookup is only a fast path; the repository's uniqueness
    /// constraint decides races, and both paths surface as `Conflict`.
    pub fn submit(
        &self,
        actor: &Actor,
        job_id: &JobId,
        resume_id: &ResumeId,
    ) -> Result<Application, ApplicationServiceError> {
        if !authorization::can_apply(actor) {
            return Err(ApplicationServiceError::Forbidden(
                "Only candidates can apply to jobs",
            ));
        }
        if !self.jobs.exists(job_id)? {
            return Err(ApplicationServiceError::NotFound("Job"));
        }
        if !self.jobs.is_open(job_id)? {
            return Err(ApplicationServiceError::Validation(
                "Job is not accepting applications".to_string(),
            ));
        }
        let job = self.jobs.owner_and_title(job_id)?;

        let owner = self.resumes.resolve_owner(resume_id)?;
        if owner != actor.id {
            return Err(ApplicationServiceError::InvalidReference);
        }

        if self
            .repository
            .find_by_candidate_and_job(&actor.id, job_id)?
            .is_some()
        {
            return Err(ApplicationServiceError::Conflict);
        }

        let application = Application {
            id: next_application_id(),
            job_id: job_id.clone(),
            candidate_id: actor.id.clone(),
            resume_id: resume_id.clone(),
            status: ApplicationStatus::Applied,
            applied_at: Utc::now(),
        };
        let stored = self.repository.insert(application)?;
        info!(application = %stored.id, job = %job_id, candidate = %actor.id, "application submitted");

        self.notify(
            &stored.candidate_id,
            format!("You applied to the job \"{}\" successfully.", job.title),
        );
        if let Some(employer) = &job.employer_id {
            self.notify(
                employer,
                format!("A new candidate applied to your job \"{}\".", job.title),
            );
        }

        Ok(stored)
    }

    /// Move an application to `status`. Re-applying the current status is
    /// allowed and still notifies the candidate.
    pub fn update_status(
        &self,
        actor: &Actor,
        application_id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, ApplicationServiceError> {
        let application = self.fetch(application_id)?;
        let job = self.ownership_or_placeholder(&application.job_id)?;

        if !authorization::can_update_status(actor, job.employer_id.as_ref()) {
            return Err(ApplicationServiceError::Forbidden(
                "Not authorized to update this application",
            ));
        }

        let updated = self.repository.set_status(application_id, status)?;
        info!(
            application = %updated.id,
            from = %application.status,
            to = %status,
            actor = %actor.id,
            "application status updated"
        );

        self.notify(
            &updated.candidate_id,
            format!(
                "Your application for \"{}\" has been {}.",
                job.title,
                status.label()
            ),
        );

        Ok(updated)
    }

    /// Permanently remove an application. No notification is emitted.
    pub fn withdraw(
        &self,
        actor: &Actor,
        application_id: &ApplicationId,
    ) -> Result<(), ApplicationServiceError> {
        let application = self.fetch(application_id)?;
        if !authorization::can_withdraw(actor, &application) {
            return Err(ApplicationServiceError::Forbidden(
                "Not authorized to delete this application",
            ));
        }

        self.repository.remove(application_id)?;
        info!(application = %application_id, actor = %actor.id, "application withdrawn");
        Ok(())
    }

    pub fn list_for_candidate(
        &self,
        actor: &Actor,
    ) -> Result<Vec<ApplicationView>, ApplicationServiceError> {
        if !authorization::can_list_own_applications(actor) {
            return Err(ApplicationServiceError::Forbidden(
                "Only candidates have their own applications",
            ));
        }

        self.repository
            .for_candidate(&actor.id)?
            .into_iter()
            .map(|application| self.view(application, false))
            .collect()
    }

    /// Applications across every job owned by `employer_id`.
    pub fn list_for_employer(
        &self,
        actor: &Actor,
        employer_id: &UserId,
    ) -> Result<Vec<ApplicationView>, ApplicationServiceError> {
        if !authorization::can_list_employer_applications(actor, employer_id) {
            return Err(ApplicationServiceError::Forbidden(
                "Not authorized to view these applications",
            ));
        }

        let jobs = self.jobs.owned_by(employer_id)?;
        if jobs.is_empty() {
            return Ok(Vec::new());
        }

        self.repository
            .for_jobs(&jobs)?
            .into_iter()
            .map(|application| self.view(application, true))
            .collect()
    }

    pub fn list_for_job(
        &self,
        actor: &Actor,
        job_id: &JobId,
    ) -> Result<Vec<ApplicationView>, ApplicationServiceError> {
        let job = self.jobs.owner_and_title(job_id)?;
        if !authorization::can_view_job_applications(actor, job.employer_id.as_ref()) {
            return Err(ApplicationServiceError::Forbidden(
                "Not authorized to view this job's applications",
            ));
        }

        self.repository
            .for_jobs(std::slice::from_ref(job_id))?
            .into_iter()
            .map(|application| self.view(application, true))
            .collect()
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Application, ApplicationServiceError> {
        self.repository
            .fetch(id)?
            .ok_or(ApplicationServiceError::NotFound("Application"))
    }

    /// Jobs can be deleted while applications remain; only an admin may then
    /// act on them.
    fn ownership_or_placeholder(
        &self,
        job_id: &JobId,
    ) -> Result<JobOwnership, ApplicationServiceError> {
        match self.jobs.owner_and_title(job_id) {
            Ok(ownership) => Ok(ownership),
            Err(RegistryError::NotFound(_)) => Ok(JobOwnership {
                employer_id: None,
                title: format!("job {job_id}"),
            }),
            Err(err) => Err(err.into()),
        }
    }

    fn view(
        &self,
        application: Application,
        with_candidate: bool,
    ) -> Result<ApplicationView, ApplicationServiceError> {
        let job = self.jobs.summary(&application.job_id)?;
        let resume = self.resumes.reference(&application.resume_id)?;
        let candidate = if with_candidate {
            self.users.profile(&application.candidate_id)?
        } else {
            None
        };

        Ok(ApplicationView {
            application,
            job,
            resume,
            candidate,
        })
    }

    fn notify(&self, recipient: &UserId, message: String) {
        if let Err(err) = self.notifications.deliver(recipient, message) {
            warn!(recipient = %recipient, error = %err, "notification delivery failed");
        }
    }
}

/// Error raised by the application lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Invalid resume")]
    InvalidReference,
    #[error("You already applied to this job")]
    Conflict,
    #[error(transparent)]
    Repository(RepositoryError),
    #[error(transparent)]
    Registry(RegistryError),
}

impl From<RepositoryError> for ApplicationServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict => ApplicationServiceError::Conflict,
            RepositoryError::NotFound => ApplicationServiceError::NotFound("Application"),
            other => ApplicationServiceError::Repository(other),
        }
    }
}

impl From<RegistryError> for ApplicationServiceError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(what) => ApplicationServiceError::NotFound(what),
            other => ApplicationServiceError::Registry(other),
        }
    }
}
