use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::pipeline::domain::{
    ApplicationId, ApplicationStatus, JobApplication, JobId, ListingSnapshot,
};
use crate::pipeline::memory::{InMemoryApplications, InMemoryListings};
use crate::pipeline::notify::{NotifyError, TransitionEvent, TransitionNotifier};
use crate::pipeline::service::ApplicationPipeline;
use crate::pipeline::store::{ApplicationStore, ListingDirectory, StoreError};

pub(super) const EMPLOYER_A: &str = "employer-a";
pub(super) const EMPLOYER_B: &str = "employer-b";

pub(super) fn listings() -> Vec<ListingSnapshot> {
    vec![
        ListingSnapshot {
            id: JobId("job-a1".to_string()),
            employer_id: EMPLOYER_A.to_string(),
            title: "Senior Frontend Developer".to_string(),
            company_name: "TechCorp Inc.".to_string(),
            is_active: true,
        },
        ListingSnapshot {
            id: JobId("job-a2".to_string()),
            employer_id: EMPLOYER_A.to_string(),
            title: "Backend Engineer".to_string(),
            company_name: "TechCorp Inc.".to_string(),
            is_active: false,
        },
        ListingSnapshot {
            id: JobId("job-b1".to_string()),
            employer_id: EMPLOYER_B.to_string(),
            title: "UX Designer".to_string(),
            company_name: "Creative Solutions".to_string(),
            is_active: true,
        },
    ]
}

pub(super) fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn application(
    id: &str,
    job_id: &str,
    seeker_id: &str,
    applicant_name: &str,
    status: ApplicationStatus,
    cover_letter: Option<&str>,
) -> JobApplication {
    let listing = listings()
        .into_iter()
        .find(|listing| listing.id.0 == job_id)
        .expect("fixture job exists");
    let applied_at = fixed_time();
    JobApplication {
        id: ApplicationId(id.to_string()),
        job_id: listing.id,
        job_seeker_id: seeker_id.to_string(),
        status,
        cover_letter: cover_letter.map(str::to_string),
        resume_url: None,
        created_at: applied_at,
        updated_at: applied_at,
        applied_at,
        job_title: listing.title,
        company_name: listing.company_name,
        applicant_name: applicant_name.to_string(),
        applicant_avatar: None,
    }
}

pub(super) fn fixture_applications() -> Vec<JobApplication> {
    vec![
        application(
            "app-1",
            "job-a1",
            "seeker-1",
            "John Doe",
            ApplicationStatus::Pending,
            Some("I have five years of React experience."),
        ),
        application(
            "app-2",
            "job-a1",
            "seeker-2",
            "Jane Smith",
            ApplicationStatus::Reviewing,
            Some("Extensive backend background."),
        ),
        application(
            "app-3",
            "job-a2",
            "seeker-1",
            "John Doe",
            ApplicationStatus::Accepted,
            None,
        ),
        application(
            "app-4",
            "job-b1",
            "seeker-3",
            "Alex Rivera",
            ApplicationStatus::Pending,
            Some("Design systems are my specialty."),
        ),
    ]
}

pub(super) type TestPipeline =
    ApplicationPipeline<InMemoryApplications, InMemoryListings, MemoryNotifier>;

pub(super) fn build_pipeline() -> (
    TestPipeline,
    Arc<InMemoryApplications>,
    Arc<MemoryNotifier>,
) {
    let store = Arc::new(InMemoryApplications::new(fixture_applications()));
    let directory = Arc::new(InMemoryListings::new(listings()));
    let notifier = Arc::new(MemoryNotifier::default());
    let pipeline = ApplicationPipeline::new(store.clone(), directory, notifier.clone());
    (pipeline, store, notifier)
}

/// Notifier recording every acknowledgement so tests can assert the
/// fire-and-forget contract.
#[derive(Default)]
pub(super) struct MemoryNotifier {
    events: Mutex<Vec<TransitionEvent>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<TransitionEvent> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl TransitionNotifier for MemoryNotifier {
    fn notify(&self, event: &TransitionEvent) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(event.clone());
        Ok(())
    }
}

/// Notifier whose transport always fails; transitions must still succeed.
pub(super) struct FailingNotifier;

impl TransitionNotifier for FailingNotifier {
    fn notify(&self, _event: &TransitionEvent) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("toast surface offline".to_string()))
    }
}

/// Store whose every call fails, for propagation tests.
pub(super) struct UnavailableStore;

impl ApplicationStore for UnavailableStore {
    fn insert(&self, _application: JobApplication) -> Result<JobApplication, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<JobApplication>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<JobApplication>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn update_status(
        &self,
        _id: &ApplicationId,
        _status: ApplicationStatus,
        _updated_at: DateTime<Utc>,
    ) -> Result<JobApplication, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

/// Directory with no listings at all.
pub(super) struct EmptyListings;

impl ListingDirectory for EmptyListings {
    fn get(&self, _job_id: &JobId) -> Result<Option<ListingSnapshot>, StoreError> {
        Ok(None)
    }

    fn owned_by(&self, _employer_id: &str) -> Result<Vec<ListingSnapshot>, StoreError> {
        Ok(Vec::new())
    }

    fn all(&self) -> Result<Vec<ListingSnapshot>, StoreError> {
        Ok(Vec::new())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
