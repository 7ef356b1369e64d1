//! In-memory store implementations. The original product ships its mock data
//! layer as the real backend, so these are production code here rather than
//! test fixtures; a Supabase/Postgres-backed store would implement the same
//! traits.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::domain::{ApplicationId, ApplicationStatus, JobApplication, JobId, ListingSnapshot};
use super::store::{ApplicationStore, ListingDirectory, StoreError};

/// Mutex-guarded application table preserving insertion order.
#[derive(Debug, Default)]
pub struct InMemoryApplications {
    records: Mutex<Vec<JobApplication>>,
}

impl InMemoryApplications {
    pub fn new(records: Vec<JobApplication>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<JobApplication>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("application table lock poisoned".to_string()))
    }
}

impl ApplicationStore for InMemoryApplications {
    fn insert(&self, application: JobApplication) -> Result<JobApplication, StoreError> {
        let mut records = self.lock()?;
        if records.iter().any(|app| app.id == application.id) {
            return Err(StoreError::Conflict);
        }
        records.push(application.clone());
        Ok(application)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<JobApplication>, StoreError> {
        let records = self.lock()?;
        Ok(records.iter().find(|app| &app.id == id).cloned())
    }

    fn all(&self) -> Result<Vec<JobApplication>, StoreError> {
        Ok(self.lock()?.clone())
    }

    fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<JobApplication, StoreError> {
        let mut records = self.lock()?;
        let record = records
            .iter_mut()
            .find(|app| &app.id == id)
            .ok_or(StoreError::NotFound)?;
        record.status = status;
        record.updated_at = updated_at;
        Ok(record.clone())
    }
}

/// Immutable listing table; the pipeline never writes listings.
#[derive(Debug, Default)]
pub struct InMemoryListings {
    listings: Vec<ListingSnapshot>,
}

impl InMemoryListings {
    pub fn new(listings: Vec<ListingSnapshot>) -> Self {
        Self { listings }
    }
}

impl ListingDirectory for InMemoryListings {
    fn get(&self, job_id: &JobId) -> Result<Option<ListingSnapshot>, StoreError> {
        Ok(self
            .listings
            .iter()
            .find(|listing| &listing.id == job_id)
            .cloned())
    }

    fn owned_by(&self, employer_id: &str) -> Result<Vec<ListingSnapshot>, StoreError> {
        Ok(self
            .listings
            .iter()
            .filter(|listing| listing.employer_id == employer_id)
            .cloned()
            .collect())
    }

    fn all(&self) -> Result<Vec<ListingSnapshot>, StoreError> {
        Ok(self.listings.clone())
    }
}
