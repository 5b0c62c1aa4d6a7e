//! Uploaded resumes. Storage of the file itself is handled by the upload
//! service; the lifecycle only resolves ownership and the stored path.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::UserId;
use crate::jobs::RegistryError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResumeId(pub String);

impl fmt::Display for ResumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: ResumeId,
    pub candidate_id: UserId,
    pub original_name: String,
    pub file_path: String,
    #[serde(default = "Utc::now")]
    pub uploaded_at: DateTime<Utc>,
}

impl Resume {
    pub fn reference(&self) -> ResumeReference {
        ResumeReference {
            id: self.id.clone(),
            file_path: self.file_path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeReference {
    pub id: ResumeId,
    pub file_path: String,
}

pub trait ResumeStore: Send + Sync {
    /// Candidate owning the resume, or `RegistryError::NotFound`.
    fn resolve_owner(&self, id: &ResumeId) -> Result<UserId, RegistryError>;
    fn reference(&self, id: &ResumeId) -> Result<Option<ResumeReference>, RegistryError>;
}
