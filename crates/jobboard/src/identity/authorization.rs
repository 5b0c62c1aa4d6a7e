//! Pure role and ownership predicates.
//!
//! Every route that gates on role or ownership goes through one of these
//! functions; none of them touch storage, so callers resolve ownership first
//! and pass it in.

use super::{Actor, Role, UserId};
use crate::applications::Application;

/// Only candidates submit applications.
pub fn can_apply(actor: &Actor) -> bool {
    actor.role == Role::Candidate
}

/// Admins, or the employer who owns the application's job.
pub fn can_update_status(actor: &Actor, job_employer: Option<&UserId>) -> bool {
    actor.is_admin() || is_owning_employer(actor, job_employer)
}

/// Admins, or the candidate who submitted the application.
pub fn can_withdraw(actor: &Actor, application: &Application) -> bool {
    actor.is_admin() || actor.id == application.candidate_id
}

/// Admins, or the employer who owns the job.
pub fn can_view_job_applications(actor: &Actor, job_employer: Option<&UserId>) -> bool {
    actor.is_admin() || is_owning_employer(actor, job_employer)
}

pub fn can_list_own_applications(actor: &Actor) -> bool {
    actor.role == Role::Candidate
}

/// Admins for any employer; employers only for themselves.
pub fn can_list_employer_applications(actor: &Actor, employer: &UserId) -> bool {
    actor.is_admin() || is_owning_employer(actor, Some(employer))
}

fn is_owning_employer(actor: &Actor, job_employer: Option<&UserId>) -> bool {
    actor.role == Role::Employer && job_employer == Some(&actor.id)
}
