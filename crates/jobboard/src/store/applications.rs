use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::applications::{
    Application, ApplicationId, ApplicationRepository, ApplicationStatus, RepositoryError,
};
use crate::identity::UserId;
use crate::jobs::JobId;

#[derive(Default)]
struct Tables {
    rows: HashMap<ApplicationId, Application>,
    /// Unique index over (candidate, job); written under the same lock as `rows`.
    by_candidate_and_job: HashMap<(UserId, JobId), ApplicationId>,
}

#[derive(Default, Clone)]
pub struct InMemoryApplicationRepository {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryApplicationRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Unavailable("application store poisoned".to_string()))
    }

    pub fn len(&self) -> usize {
        self.lock().map(|tables| tables.rows.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn sorted(mut applications: Vec<Application>) -> Vec<Application> {
    applications.sort_by(|a, b| {
        b.applied_at
            .cmp(&a.applied_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    applications
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut tables = self.lock()?;
        let key = (application.candidate_id.clone(), application.job_id.clone());
        if tables.by_candidate_and_job.contains_key(&key) || tables.rows.contains_key(&application.id)
        {
            return Err(RepositoryError::Conflict);
        }

        tables.by_candidate_and_job.insert(key, application.id.clone());
        tables
            .rows
            .insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Ok(self.lock()?.rows.get(id).cloned())
    }

    fn find_by_candidate_and_job(
        &self,
        candidate: &UserId,
        job: &JobId,
    ) -> Result<Option<Application>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .by_candidate_and_job
            .get(&(candidate.clone(), job.clone()))
            .and_then(|id| tables.rows.get(id))
            .cloned())
    }

    fn set_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, RepositoryError> {
        let mut tables = self.lock()?;
        let application = tables.rows.get_mut(id).ok_or(RepositoryError::NotFound)?;
        application.status = status;
        Ok(application.clone())
    }

    fn remove(&self, id: &ApplicationId) -> Result<Application, RepositoryError> {
        let mut tables = self.lock()?;
        let application = tables.rows.remove(id).ok_or(RepositoryError::NotFound)?;
        tables
            .by_candidate_and_job
            .remove(&(application.candidate_id.clone(), application.job_id.clone()));
        Ok(application)
    }

    fn for_candidate(&self, candidate: &UserId) -> Result<Vec<Application>, RepositoryError> {
        let tables = self.lock()?;
        Ok(sorted(
            tables
                .rows
                .values()
                .filter(|application| &application.candidate_id == candidate)
                .cloned()
                .collect(),
        ))
    }

    fn for_jobs(&self, jobs: &[JobId]) -> Result<Vec<Application>, RepositoryError> {
        let tables = self.lock()?;
        Ok(sorted(
            tables
                .rows
                .values()
                .filter(|application| jobs.contains(&application.job_id))
                .cloned()
                .collect(),
        ))
    }
}
