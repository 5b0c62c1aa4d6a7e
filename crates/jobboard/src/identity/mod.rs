//! Users, roles and the authenticated actor carried through every request.

pub mod authorization;
pub mod middleware;
pub mod token;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::jobs::RegistryError;

/// Identifier wrapper for registered users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Candidate,
    Employer,
    Admin,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Candidate => "candidate",
            Role::Employer => "employer",
            Role::Admin => "admin",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "candidate" => Some(Role::Candidate),
            "employer" => Some(Role::Employer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The authenticated identity performing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId(id.into()),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Registered account. The credential hash never leaves the auth layer, so
/// it is not modelled here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a user with a normalized email, rejecting blank names and
    /// addresses without a local part and domain.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: &str,
        role: Role,
        company_name: Option<String>,
    ) -> Result<Self, IdentityError> {
        let mut user = Self {
            id,
            name: name.into(),
            email: email.to_string(),
            role,
            company_name,
            created_at: Utc::now(),
        };
        user.normalize()?;
        Ok(user)
    }

    /// Trim and lowercase the email and validate required fields in place.
    pub fn normalize(&mut self) -> Result<(), IdentityError> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(IdentityError::Validation("name is required".to_string()));
        }
        self.email = normalize_email(&self.email)?;
        self.company_name = self
            .company_name
            .take()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        Ok(())
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

pub fn normalize_email(raw: &str) -> Result<String, IdentityError> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(IdentityError::Validation(format!(
            "'{}' is not a valid email address",
            raw.trim()
        ))),
    }
}

/// Public subset of a user attached to employer-facing listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Read access to registered users. A backing store that cannot answer
/// reports `RegistryError::Unavailable` rather than "no such user".
pub trait UserDirectory: Send + Sync {
    fn exists(&self, id: &UserId) -> Result<bool, RegistryError>;
    fn profile(&self, id: &UserId) -> Result<Option<UserProfile>, RegistryError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("{0}")]
    Validation(String),
    #[error("email already registered")]
    DuplicateEmail,
    #[error("user id already registered")]
    DuplicateId,
}
