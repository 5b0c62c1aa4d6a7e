use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{Duration, Utc};
use serde_json::Value;

use crate::applications::{
    Application, ApplicationId, ApplicationLifecycle, ApplicationRepository, ApplicationStatus,
    RepositoryError,
};
use crate::config::AuthConfig;
use crate::identity::token::TokenKeys;
use crate::identity::{Actor, Role, User, UserId};
use crate::jobs::{
    ExperienceLevel, Job, JobId, JobOwnership, JobRegistry, JobStatus, JobSummary, JobType,
    RegistryError, SalaryRange,
};
use crate::notifications::{Notification, NotificationOutbox, NotificationSink, OutboxError};
use crate::resumes::{Resume, ResumeId};
use crate::store::{
    InMemoryApplicationRepository, InMemoryJobRegistry, InMemoryNotificationRepository,
    InMemoryResumeStore, InMemoryUserDirectory,
};

pub(super) const EMPLOYER: &str = "emp-1";
pub(super) const OTHER_EMPLOYER: &str = "emp-2";
pub(super) const CANDIDATE: &str = "cand-1";
pub(super) const OTHER_CANDIDATE: &str = "cand-2";
pub(super) const ADMIN: &str = "admin-1";
pub(super) const OPEN_JOB: &str = "job-open";
pub(super) const CLOSED_JOB: &str = "job-closed";
pub(super) const EXPIRED_JOB: &str = "job-expired";
pub(super) const CANDIDATE_RESUME: &str = "res-cand-1";
pub(super) const OTHER_RESUME: &str = "res-cand-2";

pub(super) fn employer() -> Actor {
    Actor::new(EMPLOYER, Role::Employer)
}

pub(super) fn other_employer() -> Actor {
    Actor::new(OTHER_EMPLOYER, Role::Employer)
}

pub(super) fn candidate() -> Actor {
    Actor::new(CANDIDATE, Role::Candidate)
}

pub(super) fn other_candidate() -> Actor {
    Actor::new(OTHER_CANDIDATE, Role::Candidate)
}

pub(super) fn admin() -> Actor {
    Actor::new(ADMIN, Role::Admin)
}

pub(super) fn job_id(id: &str) -> JobId {
    JobId(id.to_string())
}

pub(super) fn resume_id(id: &str) -> ResumeId {
    ResumeId(id.to_string())
}

pub(super) fn user_id(id: &str) -> UserId {
    UserId(id.to_string())
}

pub(super) fn job(id: &str, employer: &str, title: &str) -> Job {
    Job {
        id: job_id(id),
        employer_id: user_id(employer),
        title: title.to_string(),
        description: "Own the hiring pipeline services".to_string(),
        company: Some("Acme".to_string()),
        location: Some("Berlin".to_string()),
        salary: SalaryRange {
            min: Some(70_000),
            max: Some(95_000),
        },
        job_type: JobType::FullTime,
        experience_level: ExperienceLevel::Senior,
        skills: crate::jobs::normalize_skills(["Rust", "PostgreSQL"]),
        is_remote: true,
        status: JobStatus::Open,
        views_count: 0,
        created_at: Utc::now(),
        expires_at: None,
    }
}

fn user(id: &str, role: Role) -> User {
    User::new(
        user_id(id),
        format!("User {id}"),
        &format!("{id}@example.com"),
        role,
        None,
    )
    .expect("valid fixture user")
}

fn resume(id: &str, candidate: &str) -> Resume {
    Resume {
        id: resume_id(id),
        candidate_id: user_id(candidate),
        original_name: format!("{candidate}.pdf"),
        file_path: format!("uploads/resumes/{candidate}.pdf"),
        uploaded_at: Utc::now(),
    }
}

pub(super) fn directory() -> Arc<InMemoryUserDirectory> {
    let users = Arc::new(InMemoryUserDirectory::default());
    for (id, role) in [
        (EMPLOYER, Role::Employer),
        (OTHER_EMPLOYER, Role::Employer),
        (CANDIDATE, Role::Candidate),
        (OTHER_CANDIDATE, Role::Candidate),
        (ADMIN, Role::Admin),
    ] {
        users.register(user(id, role)).expect("fixture user registers");
    }
    users
}

pub(super) fn registry() -> Arc<InMemoryJobRegistry> {
    let jobs = Arc::new(InMemoryJobRegistry::default());
    jobs.insert(job(OPEN_JOB, EMPLOYER, "Platform Engineer"))
        .expect("valid job");

    let mut closed = job(CLOSED_JOB, EMPLOYER, "Closed Role");
    closed.status = JobStatus::Closed;
    jobs.insert(closed).expect("valid job");

    let mut expired = job(EXPIRED_JOB, OTHER_EMPLOYER, "Expired Role");
    expired.expires_at = Some(Utc::now() - Duration::days(1));
    jobs.insert(expired).expect("valid job");
    jobs
}

pub(super) fn resume_store() -> Arc<InMemoryResumeStore> {
    let resumes = Arc::new(InMemoryResumeStore::default());
    resumes
        .insert(resume(CANDIDATE_RESUME, CANDIDATE))
        .expect("resume stored");
    resumes
        .insert(resume(OTHER_RESUME, OTHER_CANDIDATE))
        .expect("resume stored");
    resumes
}

pub(super) struct Harness {
    pub(super) service: Arc<ApplicationLifecycle<InMemoryApplicationRepository>>,
    pub(super) repository: Arc<InMemoryApplicationRepository>,
    pub(super) outbox: Arc<NotificationOutbox<InMemoryNotificationRepository>>,
    pub(super) notifications: Arc<InMemoryNotificationRepository>,
}

pub(super) fn build_harness() -> Harness {
    let users = directory();
    let jobs = registry();
    let repository = Arc::new(InMemoryApplicationRepository::default());
    let notifications = Arc::new(InMemoryNotificationRepository::default());
    let outbox = Arc::new(NotificationOutbox::new(notifications.clone(), users.clone()));
    let service = Arc::new(ApplicationLifecycle::new(
        repository.clone(),
        jobs,
        resume_store(),
        users,
        outbox.clone(),
    ));

    Harness {
        service,
        repository,
        outbox,
        notifications,
    }
}

/// Lifecycle over arbitrary repository/job/sink doubles.
pub(super) fn lifecycle_with<R>(
    repository: Arc<R>,
    jobs: Arc<dyn JobRegistry>,
    sink: Arc<dyn NotificationSink>,
) -> ApplicationLifecycle<R>
where
    R: ApplicationRepository + 'static,
{
    ApplicationLifecycle::new(repository, jobs, resume_store(), directory(), sink)
}

pub(super) fn messages_for(
    notifications: &InMemoryNotificationRepository,
    user: &str,
) -> Vec<String> {
    notifications
        .all()
        .into_iter()
        .filter(|notification| notification.user_id.0 == user)
        .map(|notification| notification.message)
        .collect()
}

pub(super) fn apply(harness: &Harness) -> Application {
    harness
        .service
        .submit(&candidate(), &job_id(OPEN_JOB), &resume_id(CANDIDATE_RESUME))
        .expect("candidate can apply")
}

pub(super) fn token_keys() -> Arc<TokenKeys> {
    Arc::new(TokenKeys::new(&AuthConfig {
        jwt_secret: "routing-test-secret-long-enough".to_string(),
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

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _application: Application) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_candidate_and_job(
        &self,
        _candidate: &UserId,
        _job: &JobId,
    ) -> Result<Option<Application>, RepositoryError> {
        Ok(None)
    }

    fn set_status(
        &self,
        _id: &ApplicationId,
        _status: ApplicationStatus,
    ) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: &ApplicationId) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_candidate(&self, _candidate: &UserId) -> Result<Vec<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_jobs(&self, _jobs: &[JobId]) -> Result<Vec<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Simulates a unique-constraint hit at write time after a clean pre-check,
/// i.e. the losing side of a race.
pub(super) struct RacingRepository;

impl ApplicationRepository for RacingRepository {
    fn insert(&self, _application: Application) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Ok(None)
    }

    fn find_by_candidate_and_job(
        &self,
        _candidate: &UserId,
        _job: &JobId,
    ) -> Result<Option<Application>, RepositoryError> {
        Ok(None)
    }

    fn set_status(
        &self,
        _id: &ApplicationId,
        _status: ApplicationStatus,
    ) -> Result<Application, RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    fn remove(&self, _id: &ApplicationId) -> Result<Application, RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    fn for_candidate(&self, _candidate: &UserId) -> Result<Vec<Application>, RepositoryError> {
        Ok(Vec::new())
    }

    fn for_jobs(&self, _jobs: &[JobId]) -> Result<Vec<Application>, RepositoryError> {
        Ok(Vec::new())
    }
}

/// Sink that records attempts and then fails every delivery.
#[derive(Default)]
pub(super) struct FailingSink {
    pub(super) attempts: Mutex<Vec<(UserId, String)>>,
}

impl NotificationSink for FailingSink {
    fn deliver(&self, recipient: &UserId, message: String) -> Result<Notification, OutboxError> {
        self.attempts
            .lock()
            .expect("sink mutex poisoned")
            .push((recipient.clone(), message));
        Err(OutboxError::Storage(RepositoryError::Unavailable(
            "outbox offline".to_string(),
        )))
    }
}

/// Registry whose single job has no resolvable employer.
pub(super) struct OrphanJobRegistry;

impl JobRegistry for OrphanJobRegistry {
    fn exists(&self, id: &JobId) -> Result<bool, RegistryError> {
        Ok(id.0 == OPEN_JOB)
    }

    fn owner_and_title(&self, id: &JobId) -> Result<JobOwnership, RegistryError> {
        if id.0 == OPEN_JOB {
            Ok(JobOwnership {
                employer_id: None,
                title: "Imported Listing".to_string(),
            })
        } else {
            Err(RegistryError::NotFound("Job"))
        }
    }

    fn is_open(&self, id: &JobId) -> Result<bool, RegistryError> {
        self.exists(id)
    }

    fn summary(&self, id: &JobId) -> Result<Option<JobSummary>, RegistryError> {
        Ok(self.exists(id)?.then(|| JobSummary {
            id: id.clone(),
            title: "Imported Listing".to_string(),
            company: None,
            location: None,
        }))
    }

    fn owned_by(&self, _employer: &UserId) -> Result<Vec<JobId>, RegistryError> {
        Ok(Vec::new())
    }
}
