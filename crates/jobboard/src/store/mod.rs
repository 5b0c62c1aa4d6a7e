//! Mutex-guarded in-memory storage backing every repository and collaborator
//! trait. Used by the server, the demo and the tests.

mod applications;
mod catalog;
mod notifications;
mod seed;

pub use applications::InMemoryApplicationRepository;
pub use catalog::{
    CatalogError, InMemoryJobRegistry, InMemoryResumeStore, InMemoryUserDirectory,
};
pub use notifications::InMemoryNotificationRepository;
pub use seed::{SeedData, SeedError};
