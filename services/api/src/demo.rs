use crate::infra::Stores;
use jobboard::applications::{ApplicationServiceError, ApplicationStatus};
use jobboard::error::AppError;
use jobboard::identity::{Actor, Role, UserId};
use jobboard::jobs::JobId;
use jobboard::notifications::NotificationOutbox;
use jobboard::resumes::ResumeId;
use jobboard::store::{InMemoryNotificationRepository, SeedData};

const DEMO_SEED: &str = r#"{
    "users": [
        { "id": "emp-northwind", "name": "Northwind Hiring", "email": "jobs@northwind.example", "role": "employer", "companyName": "Northwind" },
        { "id": "cand-grace", "name": "Grace Hopper", "email": "grace@example.com", "role": "candidate" },
        { "id": "cand-alan", "name": "Alan Turing", "email": "alan@example.com", "role": "candidate" }
    ],
    "jobs": [
        {
            "id": "job-compiler",
            "employerId": "emp-northwind",
            "title": "Compiler Engineer",
            "description": "Maintain the query compiler",
            "company": "Northwind",
            "location": "Lisbon",
            "salary": { "min": 80000, "max": 110000 },
            "jobType": "full-time",
            "experienceLevel": "senior",
            "skills": ["Rust", "LLVM"]
        }
    ],
    "resumes": [
        { "id": "res-grace", "candidateId": "cand-grace", "originalName": "grace.pdf", "filePath": "uploads/resumes/grace.pdf" },
        { "id": "res-alan", "candidateId": "cand-alan", "originalName": "alan.pdf", "filePath": "uploads/resumes/alan.pdf" }
    ]
}"#;

pub(crate) fn run_demo() -> Result<(), AppError> {
    let stores = Stores::seeded(SeedData::from_json(DEMO_SEED)?)?;
    let (lifecycle, outbox) = stores.services();

    let employer = Actor::new("emp-northwind", Role::Employer);
    let grace = Actor::new("cand-grace", Role::Candidate);
    let alan = Actor::new("cand-alan", Role::Candidate);
    let job = JobId("job-compiler".to_string());

    println!("Job board lifecycle demo");

    let mut submitted = Vec::new();
    for (candidate, resume) in [(&grace, "res-grace"), (&alan, "res-alan")] {
        match lifecycle.submit(candidate, &job, &ResumeId(resume.to_string())) {
            Ok(application) => {
                println!(
                    "- {} applied to {} -> {} ({})",
                    candidate.id, job, application.id, application.status
                );
                submitted.push(application);
            }
            Err(err) => println!("- {} could not apply: {}", candidate.id, err),
        }
    }

    match lifecycle.submit(&grace, &job, &ResumeId("res-grace".to_string())) {
        Err(ApplicationServiceError::Conflict) => {
            println!("- second application from {} rejected as duplicate", grace.id)
        }
        Ok(application) => println!("- unexpected duplicate accepted: {}", application.id),
        Err(err) => println!("- duplicate check failed: {}", err),
    }

    let decisions = [ApplicationStatus::Accepted, ApplicationStatus::Rejected];
    for (application, status) in submitted.iter().zip(decisions) {
        match lifecycle.update_status(&employer, &application.id, status) {
            Ok(updated) => println!("- {} moved to {}", updated.id, updated.status),
            Err(err) => println!("- status update for {} failed: {}", application.id, err),
        }
    }

    match lifecycle.list_for_employer(&employer, &employer.id) {
        Ok(views) => {
            println!("\nApplications received by {}", employer.id);
            for view in views {
                let candidate = view
                    .candidate
                    .map(|profile| profile.name)
                    .unwrap_or_else(|| view.application.candidate_id.to_string());
                println!(
                    "- {} | {} | {}",
                    view.application.id, candidate, view.application.status
                );
            }
        }
        Err(err) => println!("\nEmployer listing unavailable: {}", err),
    }

    for user in [&employer.id, &grace.id, &alan.id] {
        print_inbox(&outbox, user);
    }

    Ok(())
}

fn print_inbox(outbox: &NotificationOutbox<InMemoryNotificationRepository>, user: &UserId) {
    let unread = outbox.unread_count(user).unwrap_or_default();
    println!("\nInbox for {} ({} unread)", user, unread);
    match outbox.list_for_user(user) {
        Ok(notifications) if notifications.is_empty() => println!("  (empty)"),
        Ok(notifications) => {
            for notification in notifications {
                println!("  - {}", notification.message);
            }
        }
        Err(err) => println!("  unavailable: {}", err),
    }
}
