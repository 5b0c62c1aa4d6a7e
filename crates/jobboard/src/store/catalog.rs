use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;

use crate::identity::{IdentityError, User, UserDirectory, UserId, UserProfile};
use crate::jobs::{Job, JobId, JobOwnership, JobRegistry, JobSummary, JobValidationError, RegistryError};
use crate::resumes::{Resume, ResumeId, ResumeReference, ResumeStore};

fn poisoned(what: &str) -> RegistryError {
    RegistryError::Unavailable(format!("{what} poisoned"))
}

/// Why a job could not be written to the registry.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Invalid(#[from] JobValidationError),
    #[error(transparent)]
    Unavailable(#[from] RegistryError),
}

#[derive(Default, Clone)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserDirectory {
    /// Register a user; ids and normalized emails are unique.
    pub fn register(&self, mut user: User) -> Result<User, IdentityError> {
        user.normalize()?;
        let mut users = self
            .users
            .write()
            .map_err(|_| IdentityError::Validation("user directory poisoned".to_string()))?;
        if users.contains_key(&user.id) {
            return Err(IdentityError::DuplicateId);
        }
        if users.values().any(|existing| existing.email == user.email) {
            return Err(IdentityError::DuplicateEmail);
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    pub fn get(&self, id: &UserId) -> Result<Option<User>, RegistryError> {
        let users = self.users.read().map_err(|_| poisoned("user directory"))?;
        Ok(users.get(id).cloned())
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn exists(&self, id: &UserId) -> Result<bool, RegistryError> {
        let users = self.users.read().map_err(|_| poisoned("user directory"))?;
        Ok(users.contains_key(id))
    }

    fn profile(&self, id: &UserId) -> Result<Option<UserProfile>, RegistryError> {
        Ok(self.get(id)?.map(|user| user.profile()))
    }
}

#[derive(Default, Clone)]
pub struct InMemoryJobRegistry {
    jobs: Arc<RwLock<HashMap<JobId, Job>>>,
}

impl InMemoryJobRegistry {
    pub fn insert(&self, job: Job) -> Result<Job, CatalogError> {
        job.validate()?;
        let mut jobs = self.jobs.write().map_err(|_| poisoned("job registry"))?;
        jobs.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn with_job<T>(&self, id: &JobId, f: impl FnOnce(&Job) -> T) -> Result<T, RegistryError> {
        let jobs = self.jobs.read().map_err(|_| poisoned("job registry"))?;
        jobs.get(id).map(f).ok_or(RegistryError::NotFound("Job"))
    }
}

impl JobRegistry for InMemoryJobRegistry {
    fn exists(&self, id: &JobId) -> Result<bool, RegistryError> {
        let jobs = self.jobs.read().map_err(|_| poisoned("job registry"))?;
        Ok(jobs.contains_key(id))
    }

    fn owner_and_title(&self, id: &JobId) -> Result<JobOwnership, RegistryError> {
        self.with_job(id, |job| JobOwnership {
            employer_id: Some(job.employer_id.clone()),
            title: job.title.clone(),
        })
    }

    fn is_open(&self, id: &JobId) -> Result<bool, RegistryError> {
        self.with_job(id, |job| job.accepts_applications(Utc::now()))
    }

    fn summary(&self, id: &JobId) -> Result<Option<JobSummary>, RegistryError> {
        let jobs = self.jobs.read().map_err(|_| poisoned("job registry"))?;
        Ok(jobs.get(id).map(Job::summary))
    }

    fn owned_by(&self, employer: &UserId) -> Result<Vec<JobId>, RegistryError> {
        let jobs = self.jobs.read().map_err(|_| poisoned("job registry"))?;
        let mut owned: Vec<JobId> = jobs
            .values()
            .filter(|job| &job.employer_id == employer)
            .map(|job| job.id.clone())
            .collect();
        owned.sort();
        Ok(owned)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryResumeStore {
    resumes: Arc<RwLock<HashMap<ResumeId, Resume>>>,
}

impl InMemoryResumeStore {
    pub fn insert(&self, resume: Resume) -> Result<Resume, RegistryError> {
        let mut resumes = self.resumes.write().map_err(|_| poisoned("resume store"))?;
        resumes.insert(resume.id.clone(), resume.clone());
        Ok(resume)
    }
}

impl ResumeStore for InMemoryResumeStore {
    fn resolve_owner(&self, id: &ResumeId) -> Result<UserId, RegistryError> {
        let resumes = self.resumes.read().map_err(|_| poisoned("resume store"))?;
        resumes
            .get(id)
            .map(|resume| resume.candidate_id.clone())
            .ok_or(RegistryError::NotFound("Resume"))
    }

    fn reference(&self, id: &ResumeId) -> Result<Option<ResumeReference>, RegistryError> {
        let resumes = self.resumes.read().map_err(|_| poisoned("resume store"))?;
        Ok(resumes.get(id).map(Resume::reference))
    }
}
