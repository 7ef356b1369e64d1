use serde::Serialize;

use super::domain::{JobApplication, ListingSnapshot};
use super::projections::{status_counts, StatusCounts};

/// Admin dashboard numbers, derived live from the listing and application
/// tables rather than maintained as counters.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformReport {
    pub job_postings: usize,
    pub active_jobs: usize,
    pub total_applications: usize,
    pub applications_by_status: StatusCounts,
}

impl PlatformReport {
    pub fn build(listings: &[ListingSnapshot], applications: &[JobApplication]) -> Self {
        Self {
            job_postings: listings.len(),
            active_jobs: listings.iter().filter(|listing| listing.is_active).count(),
            total_applications: applications.len(),
            applications_by_status: status_counts(applications),
        }
    }
}
