use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use jobboard::applications::ApplicationLifecycle;
use jobboard::notifications::NotificationOutbox;
use jobboard::store::{
    InMemoryApplicationRepository, InMemoryJobRegistry, InMemoryNotificationRepository,
    InMemoryResumeStore, InMemoryUserDirectory, SeedData, SeedError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type Lifecycle = ApplicationLifecycle<InMemoryApplicationRepository>;
pub(crate) type Outbox = NotificationOutbox<InMemoryNotificationRepository>;

/// In-process collaborators shared by the server and the demo.
#[derive(Default, Clone)]
pub(crate) struct Stores {
    pub(crate) users: Arc<InMemoryUserDirectory>,
    pub(crate) jobs: Arc<InMemoryJobRegistry>,
    pub(crate) resumes: Arc<InMemoryResumeStore>,
    pub(crate) applications: Arc<InMemoryApplicationRepository>,
    pub(crate) notifications: Arc<InMemoryNotificationRepository>,
}

impl Stores {
    pub(crate) fn seeded(seed: SeedData) -> Result<Self, SeedError> {
        let stores = Self::default();
        seed.load_into(&stores.users, &stores.jobs, &stores.resumes)?;
        Ok(stores)
    }

    /// Empty stores unless a seed file is configured.
    pub(crate) fn from_seed_path(path: Option<&Path>) -> Result<Self, SeedError> {
        match path {
            Some(path) => Self::seeded(SeedData::from_path(path)?),
            None => Ok(Self::default()),
        }
    }

    pub(crate) fn services(&self) -> (Arc<Lifecycle>, Arc<Outbox>) {
        let outbox = Arc::new(NotificationOutbox::new(
            self.notifications.clone(),
            self.users.clone(),
        ));
        let lifecycle = Arc::new(ApplicationLifecycle::new(
            self.applications.clone(),
            self.jobs.clone(),
            self.resumes.clone(),
            self.users.clone(),
            outbox.clone(),
        ));
        (lifecycle, outbox)
    }
}
