//! CSV hydration: load an application export from the previous tracking
//! system into a store. Display fields are snapshotted from the listing
//! directory the same way `apply` snapshots them.

use std::io::Read;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::domain::{ApplicationId, ApplicationStatus, JobApplication, JobId};
use super::store::{ApplicationStore, ListingDirectory, StoreError};

#[derive(Debug, Deserialize)]
struct ApplicationRow {
    #[serde(rename = "Application ID")]
    id: String,
    #[serde(rename = "Job ID")]
    job_id: String,
    #[serde(rename = "Applicant ID")]
    applicant_id: String,
    #[serde(rename = "Applicant Name")]
    applicant_name: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Applied At")]
    applied_at: String,
    #[serde(rename = "Updated At", default, deserialize_with = "empty_string_as_none")]
    updated_at: Option<String>,
    #[serde(rename = "Cover Letter", default, deserialize_with = "empty_string_as_none")]
    cover_letter: Option<String>,
    #[serde(rename = "Resume URL", default, deserialize_with = "empty_string_as_none")]
    resume_url: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("row for application '{application}': unknown status '{value}'")]
    UnknownStatus { application: String, value: String },
    #[error("row for application '{application}': invalid timestamp '{value}'")]
    InvalidTimestamp { application: String, value: String },
    #[error("row for application '{application}': no listing with id '{job_id}'")]
    UnknownJob { application: String, job_id: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parse export rows and resolve each against the listing directory,
/// inserting the resulting applications into the store. Returns how many
/// records were loaded. Stops at the first bad row; nothing about a partial
/// load is rolled back, so hydrate into a fresh store.
pub fn hydrate<R, S, L>(reader: R, store: &S, listings: &L) -> Result<usize, ImportError>
where
    R: Read,
    S: ApplicationStore,
    L: ListingDirectory,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut loaded = 0;
    for row in csv_reader.deserialize::<ApplicationRow>() {
        let row = row?;

        let status = ApplicationStatus::parse(&row.status).ok_or_else(|| {
            ImportError::UnknownStatus {
                application: row.id.clone(),
                value: row.status.clone(),
            }
        })?;
        let applied_at = parse_timestamp(&row.id, &row.applied_at)?;
        let updated_at = match &row.updated_at {
            Some(value) => parse_timestamp(&row.id, value)?,
            None => applied_at,
        };

        let job_id = JobId(row.job_id.clone());
        let listing = listings
            .get(&job_id)?
            .ok_or_else(|| ImportError::UnknownJob {
                application: row.id.clone(),
                job_id: row.job_id.clone(),
            })?;

        store.insert(JobApplication {
            id: ApplicationId(row.id),
            job_id,
            job_seeker_id: row.applicant_id,
            status,
            cover_letter: row.cover_letter,
            resume_url: row.resume_url,
            created_at: applied_at,
            updated_at,
            applied_at,
            job_title: listing.title,
            company_name: listing.company_name,
            applicant_name: row.applicant_name,
            applicant_avatar: None,
        })?;
        loaded += 1;
    }

    Ok(loaded)
}

fn parse_timestamp(application: &str, value: &str) -> Result<DateTime<Utc>, ImportError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| ImportError::InvalidTimestamp {
            application: application.to_string(),
            value: value.to_string(),
        })
}
