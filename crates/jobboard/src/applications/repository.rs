use super::domain::{Application, ApplicationId, ApplicationStatus};
use crate::identity::UserId;
use crate::jobs::JobId;

/// Storage abstraction so the lifecycle service can be exercised in isolation.
///
/// Implementations must make `insert` atomic with respect to the
/// (candidate, job) pair: a second live application for the same pair fails
/// with [`RepositoryError::Conflict`] no matter how the calls interleave.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn find_by_candidate_and_job(
        &self,
        candidate: &UserId,
        job: &JobId,
    ) -> Result<Option<Application>, RepositoryError>;
    fn set_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, RepositoryError>;
    /// Delete the row and release its (candidate, job) slot.
    fn remove(&self, id: &ApplicationId) -> Result<Application, RepositoryError>;
    fn for_candidate(&self, candidate: &UserId) -> Result<Vec<Application>, RepositoryError>;
    fn for_jobs(&self, jobs: &[JobId]) -> Result<Vec<Application>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
