//! Application lifecycle and candidate pipeline.
//!
//! The status transition engine is the single authority for moving an
//! application between `pending`, `reviewing`, `accepted`, and `rejected`;
//! every employer- and seeker-facing grouping is a pure projection over the
//! same authoritative status field.

pub mod domain;
pub mod import;
pub mod memory;
pub mod notify;
pub mod projections;
pub mod report;
pub mod router;
pub mod seed;
pub mod service;
pub mod store;
pub mod transitions;

#[cfg(test)]
mod tests;

pub use domain::{
    Actor, ActorRole, ApplicationId, ApplicationStatus, ApplicationSubmission, JobApplication,
    JobId, ListingSnapshot,
};
pub use import::{hydrate, ImportError};
pub use memory::{InMemoryApplications, InMemoryListings};
pub use notify::{
    LogNotifier, NotifyError, TransitionEvent, TransitionNotifier, TransitionOutcome,
};
pub use projections::{
    by_employer, by_job_seeker, by_status_buckets, filtered, pending_vs_reviewed, status_counts,
    CandidateFilters, JobFilter, PendingReviewedSplit, StatusBuckets, StatusCounts, StatusFilter,
};
pub use report::PlatformReport;
pub use router::pipeline_router;
pub use service::{ApplicationPipeline, ApplyError};
pub use store::{ApplicationStore, ListingDirectory, StoreError};
pub use transitions::{allowed_targets, is_allowed, permits, ReviewSurface, TransitionError};
