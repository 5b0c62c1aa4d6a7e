use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use super::catalog::{
    CatalogError, InMemoryJobRegistry, InMemoryResumeStore, InMemoryUserDirectory,
};
use crate::identity::{IdentityError, Role, User};
use crate::jobs::{Job, JobId, RegistryError};
use crate::resumes::{Resume, ResumeId};

/// Users, jobs and resumes loaded at startup. Registration, job CRUD and
/// uploads are owned by other services; this is how their data reaches the
/// in-memory collaborators.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub resumes: Vec<Resume>,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("unable to read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("seed file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("user {id}: {source}")]
    User {
        id: String,
        #[source]
        source: IdentityError,
    },
    #[error("job {id}: {source}")]
    Job {
        id: JobId,
        #[source]
        source: CatalogError,
    },
    #[error("resume {id}: {source}")]
    Resume {
        id: ResumeId,
        #[source]
        source: RegistryError,
    },
    #[error(transparent)]
    Directory(#[from] RegistryError),
    #[error("job {0} references an employer that is not registered")]
    UnknownEmployer(JobId),
    #[error("resume {0} references a candidate that is not registered")]
    UnknownCandidate(ResumeId),
}

impl SeedData {
    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Load into the stores, checking that jobs belong to employers and
    /// resumes to candidates.
    pub fn load_into(
        self,
        users: &InMemoryUserDirectory,
        jobs: &InMemoryJobRegistry,
        resumes: &InMemoryResumeStore,
    ) -> Result<(), SeedError> {
        let (user_count, job_count, resume_count) =
            (self.users.len(), self.jobs.len(), self.resumes.len());

        for user in self.users {
            let id = user.id.0.clone();
            users
                .register(user)
                .map_err(|source| SeedError::User { id, source })?;
        }

        for job in self.jobs {
            let owner_is_employer = users
                .get(&job.employer_id)?
                .is_some_and(|user| user.role == Role::Employer);
            if !owner_is_employer {
                return Err(SeedError::UnknownEmployer(job.id));
            }
            let id = job.id.clone();
            jobs.insert(job)
                .map_err(|source| SeedError::Job { id, source })?;
        }

        for resume in self.resumes {
            let owner_is_candidate = users
                .get(&resume.candidate_id)?
                .is_some_and(|user| user.role == Role::Candidate);
            if !owner_is_candidate {
                return Err(SeedError::UnknownCandidate(resume.id));
            }
            let id = resume.id.clone();
            resumes
                .insert(resume)
                .map_err(|source| SeedError::Resume { id, source })?;
        }

        info!(
            users = user_count,
            jobs = job_count,
            resumes = resume_count,
            "seed data loaded"
        );
        Ok(())
    }
}
