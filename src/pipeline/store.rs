use chrono::{DateTime, Utc};

use super::domain::{ApplicationId, ApplicationStatus, JobApplication, JobId, ListingSnapshot};

/// Storage abstraction over the durable application table so the engine and
/// service can be exercised against in-memory or remote backends.
pub trait ApplicationStore: Send + Sync {
    fn insert(&self, application: JobApplication) -> Result<JobApplication, StoreError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<JobApplication>, StoreError>;
    fn all(&self) -> Result<Vec<JobApplication>, StoreError>;
    /// Persist a status change. The status value itself must already have been
    /// validated by the transition engine.
    fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<JobApplication, StoreError>;
}

/// Read-only lookup into the listing table. The pipeline never writes
/// listings; it only resolves ownership and display fields.
pub trait ListingDirectory: Send + Sync {
    fn get(&self, job_id: &JobId) -> Result<Option<ListingSnapshot>, StoreError>;
    fn owned_by(&self, employer_id: &str) -> Result<Vec<ListingSnapshot>, StoreError>;
    fn all(&self) -> Result<Vec<ListingSnapshot>, StoreError>;
}

/// Error enumeration for persistence failures. `Unavailable` is recoverable;
/// a failed transition leaves no partial state, so callers may retry.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
