//! Pure derivations over the current application set. No projection keeps
//! state of its own; every grouping is recomputed from the authoritative
//! `status` field, so the two-tab queue and the kanban board cannot drift.

use std::collections::HashSet;

use serde::Serialize;

use super::domain::{ApplicationStatus, JobApplication, JobId, ListingSnapshot};

/// All applications submitted by one job seeker.
pub fn by_job_seeker(applications: &[JobApplication], seeker_id: &str) -> Vec<JobApplication> {
    applications
        .iter()
        .filter(|app| app.job_seeker_id == seeker_id)
        .cloned()
        .collect()
}

/// All applications against listings in `owned_jobs`. This is the base set
/// for every employer-facing view; an employer never sees applications tied
/// to another employer's listings.
pub fn by_employer(
    applications: &[JobApplication],
    owned_jobs: &[ListingSnapshot],
) -> Vec<JobApplication> {
    let job_ids: HashSet<&JobId> = owned_jobs.iter().map(|listing| &listing.id).collect();
    applications
        .iter()
        .filter(|app| job_ids.contains(&app.job_id))
        .cloned()
        .collect()
}

/// Two-tab split used by the simplified review queue. `reviewing` counts as
/// reviewed here; the kanban board is the finer-grained grouping.
#[derive(Debug, Clone, Serialize)]
pub struct PendingReviewedSplit {
    pub pending: Vec<JobApplication>,
    pub reviewed: Vec<JobApplication>,
}

pub fn pending_vs_reviewed(applications: &[JobApplication]) -> PendingReviewedSplit {
    let (pending, reviewed) = applications
        .iter()
        .cloned()
        .partition(|app| app.status == ApplicationStatus::Pending);
    PendingReviewedSplit { pending, reviewed }
}

/// Four-way partition keyed by exact status, one bucket per column. Empty
/// buckets are materialized so the board always renders all four columns.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusBuckets {
    pub pending: Vec<JobApplication>,
    pub reviewing: Vec<JobApplication>,
    pub accepted: Vec<JobApplication>,
    pub rejected: Vec<JobApplication>,
}

impl StatusBuckets {
    pub fn bucket(&self, status: ApplicationStatus) -> &[JobApplication] {
        match status {
            ApplicationStatus::Pending => &self.pending,
            ApplicationStatus::Reviewing => &self.reviewing,
            ApplicationStatus::Accepted => &self.accepted,
            ApplicationStatus::Rejected => &self.rejected,
        }
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts {
            pending: self.pending.len(),
            reviewing: self.reviewing.len(),
            accepted: self.accepted.len(),
            rejected: self.rejected.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.pending.len() + self.reviewing.len() + self.accepted.len() + self.rejected.len()
    }
}

/// Per-status totals for tab badges and the admin report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub reviewing: usize,
    pub accepted: usize,
    pub rejected: usize,
}

pub fn by_status_buckets(applications: &[JobApplication]) -> StatusBuckets {
    let mut buckets = StatusBuckets::default();
    for app in applications {
        match app.status {
            ApplicationStatus::Pending => buckets.pending.push(app.clone()),
            ApplicationStatus::Reviewing => buckets.reviewing.push(app.clone()),
            ApplicationStatus::Accepted => buckets.accepted.push(app.clone()),
            ApplicationStatus::Rejected => buckets.rejected.push(app.clone()),
        }
    }
    buckets
}

pub fn status_counts(applications: &[JobApplication]) -> StatusCounts {
    by_status_buckets(applications).counts()
}

/// Restricts to one status, or passes everything ("all" in the UI).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    /// Parses the wire form: empty or "all" passes everything, otherwise the
    /// value must be one of the four status labels.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        ApplicationStatus::parse(trimmed).map(Self::Only)
    }

    fn matches(self, status: ApplicationStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => status == wanted,
        }
    }
}

/// Restricts to one listing, or passes everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum JobFilter {
    #[default]
    All,
    Only(JobId),
}

impl JobFilter {
    fn matches(&self, job_id: &JobId) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => job_id == wanted,
        }
    }
}

/// Search/filter state of the candidate management table. All three
/// predicates are ANDed.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilters {
    pub search_term: String,
    pub status_filter: StatusFilter,
    pub job_filter: JobFilter,
}

/// Case-insensitive search against applicant name or cover letter, combined
/// with exact status and listing restrictions. An empty search term matches
/// every application.
pub fn filtered(applications: &[JobApplication], filters: &CandidateFilters) -> Vec<JobApplication> {
    let needle = filters.search_term.to_lowercase();
    applications
        .iter()
        .filter(|app| {
            let matches_search = app.applicant_name.to_lowercase().contains(&needle)
                || app
                    .cover_letter
                    .as_ref()
                    .is_some_and(|letter| letter.to_lowercase().contains(&needle));
            matches_search
                && filters.status_filter.matches(app.status)
                && filters.job_filter.matches(&app.job_id)
        })
        .cloned()
        .collect()
}
