//! Demo dataset so `serve` and `board` work without a real backend. Mirrors
//! the sample listings and applications the product ships for local use.

use chrono::{DateTime, Duration, Utc};

use super::domain::{ApplicationId, ApplicationStatus, JobApplication, JobId, ListingSnapshot};

pub const EMPLOYER_TECHCORP: &str = "emp-1";
pub const EMPLOYER_CREATIVE: &str = "emp-2";

pub fn demo_listings() -> Vec<ListingSnapshot> {
    vec![
        listing("job-1", EMPLOYER_TECHCORP, "Senior Frontend Developer", "TechCorp Inc.", true),
        listing("job-2", EMPLOYER_TECHCORP, "Backend Engineer", "TechCorp Inc.", true),
        listing("job-3", EMPLOYER_CREATIVE, "UX/UI Designer", "Creative Solutions", true),
        listing("job-4", EMPLOYER_CREATIVE, "Product Manager", "Creative Solutions", false),
    ]
}

pub fn demo_applications() -> Vec<JobApplication> {
    let listings = demo_listings();
    vec![
        application(
            &listings[0],
            "app-1",
            "user-1",
            "John Doe",
            ApplicationStatus::Pending,
            Some("I'm excited to apply for this position. My React experience spans five years."),
            30,
            30,
        ),
        application(
            &listings[1],
            "app-2",
            "user-2",
            "Jane Smith",
            ApplicationStatus::Reviewing,
            Some("I have extensive experience with backend development in Rust and Go."),
            21,
            14,
        ),
        application(
            &listings[2],
            "app-3",
            "user-1",
            "John Doe",
            ApplicationStatus::Accepted,
            Some("I believe my design skills make me a great fit."),
            60,
            45,
        ),
        application(
            &listings[2],
            "app-4",
            "user-3",
            "Alex Rivera",
            ApplicationStatus::Rejected,
            None,
            40,
            35,
        ),
        application(
            &listings[3],
            "app-5",
            "user-2",
            "Jane Smith",
            ApplicationStatus::Pending,
            Some("I'm passionate about product management."),
            7,
            7,
        ),
    ]
}

fn listing(
    id: &str,
    employer_id: &str,
    title: &str,
    company_name: &str,
    is_active: bool,
) -> ListingSnapshot {
    ListingSnapshot {
        id: JobId(id.to_string()),
        employer_id: employer_id.to_string(),
        title: title.to_string(),
        company_name: company_name.to_string(),
        is_active,
    }
}

#[allow(clippy::too_many_arguments)]
fn application(
    listing: &ListingSnapshot,
    id: &str,
    seeker_id: &str,
    applicant_name: &str,
    status: ApplicationStatus,
    cover_letter: Option<&str>,
    applied_days_ago: i64,
    updated_days_ago: i64,
) -> JobApplication {
    let applied_at = days_ago(applied_days_ago);
    JobApplication {
        id: ApplicationId(id.to_string()),
        job_id: listing.id.clone(),
        job_seeker_id: seeker_id.to_string(),
        status,
        cover_letter: cover_letter.map(str::to_string),
        resume_url: Some(format!("https://example.com/resumes/{seeker_id}.pdf")),
        created_at: applied_at,
        updated_at: days_ago(updated_days_ago),
        applied_at,
        job_title: listing.title.clone(),
        company_name: listing.company_name.clone(),
        applicant_name: applicant_name.to_string(),
        applicant_avatar: Some(format!("https://placehold.co/40?u={seeker_id}")),
    }
}

fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}
