use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use super::domain::{
    Actor, ActorRole, ApplicationId, ApplicationStatus, ApplicationSubmission, JobApplication,
};
use super::notify::{TransitionEvent, TransitionNotifier, TransitionOutcome};
use super::projections;
use super::report::PlatformReport;
use super::store::{ApplicationStore, ListingDirectory, StoreError};
use super::transitions::{self, TransitionError};

/// Facade composing the application store, the read-only listing directory,
/// and the notification surface. This is the single authority for creating
/// applications and changing their status.
pub struct ApplicationPipeline<S, L, N> {
    store: Arc<S>,
    listings: Arc<L>,
    notifier: Arc<N>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<S, L, N> ApplicationPipeline<S, L, N>
where
    S: ApplicationStore + 'static,
    L: ListingDirectory + 'static,
    N: TransitionNotifier + 'static,
{
    pub fn new(store: Arc<S>, listings: Arc<L>, notifier: Arc<N>) -> Self {
        Self {
            store,
            listings,
            notifier,
        }
    }

    /// Create an application for the acting job seeker. The status is forced
    /// to pending regardless of anything the caller supplies, and the listing
    /// title/company are snapshotted at creation time. Repeat applications
    /// against the same listing are allowed; the product defines no dedup.
    pub fn apply(
        &self,
        actor: &Actor,
        submission: ApplicationSubmission,
    ) -> Result<JobApplication, ApplyError> {
        if actor.role != ActorRole::JobSeeker {
            return Err(ApplyError::Forbidden);
        }

        let listing = self
            .listings
            .get(&submission.job_id)?
            .ok_or_else(|| ApplyError::JobNotFound(submission.job_id.0.clone()))?;

        let now = Utc::now();
        let application = JobApplication {
            id: next_application_id(),
            job_id: submission.job_id,
            job_seeker_id: actor.id.clone(),
            status: ApplicationStatus::Pending,
            cover_letter: submission.cover_letter,
            resume_url: submission.resume_url,
            created_at: now,
            updated_at: now,
            applied_at: now,
            job_title: listing.title,
            company_name: listing.company_name,
            applicant_name: submission.applicant_name,
            applicant_avatar: submission.applicant_avatar,
        };

        Ok(self.store.insert(application)?)
    }

    /// Validate and apply a status change.
    ///
    /// Checks run in order: the application must exist, the actor must be the
    /// employer owning the parent listing, and the target must be reachable
    /// from the current status. Requesting the current status again is a
    /// no-op success that skips the store write, so `updated_at` is not
    /// refreshed on idempotent repeats.
    pub fn transition(
        &self,
        actor: &Actor,
        id: &ApplicationId,
        target: ApplicationStatus,
    ) -> Result<JobApplication, TransitionError> {
        let application = self.store.fetch(id)?.ok_or(TransitionError::NotFound)?;
        let listing = self
            .listings
            .get(&application.job_id)?
            .ok_or(TransitionError::NotFound)?;

        if !transitions::permits(actor.role, listing.employer_id == actor.id) {
            return Err(TransitionError::Forbidden);
        }

        if application.status == target {
            self.emit(TransitionEvent {
                application_id: application.id.clone(),
                from: application.status,
                to: target,
                outcome: TransitionOutcome::Unchanged,
            });
            return Ok(application);
        }

        if !transitions::is_allowed(application.status, target) {
            return Err(TransitionError::IllegalTransition {
                from: application.status,
                to: target,
            });
        }

        let updated = self.store.update_status(id, target, Utc::now())?;
        self.emit(TransitionEvent {
            application_id: updated.id.clone(),
            from: application.status,
            to: target,
            outcome: TransitionOutcome::Updated,
        });
        Ok(updated)
    }

    pub fn get(&self, id: &ApplicationId) -> Result<JobApplication, StoreError> {
        self.store.fetch(id)?.ok_or(StoreError::NotFound)
    }

    /// The acting seeker's own applications, across all statuses.
    pub fn applications_for_seeker(&self, actor: &Actor) -> Result<Vec<JobApplication>, StoreError> {
        let applications = self.store.all()?;
        Ok(projections::by_job_seeker(&applications, &actor.id))
    }

    /// Applications against listings the acting employer owns; the base set
    /// for the queue, board, and candidate table.
    pub fn applications_for_employer(
        &self,
        actor: &Actor,
    ) -> Result<Vec<JobApplication>, StoreError> {
        let owned = self.listings.owned_by(&actor.id)?;
        let applications = self.store.all()?;
        Ok(projections::by_employer(&applications, &owned))
    }

    pub fn platform_report(&self) -> Result<PlatformReport, StoreError> {
        let listings = self.listings.all()?;
        let applications = self.store.all()?;
        Ok(PlatformReport::build(&listings, &applications))
    }

    fn emit(&self, event: TransitionEvent) {
        if let Err(err) = self.notifier.notify(&event) {
            warn!(
                application_id = %event.application_id,
                error = %err,
                "transition acknowledgement dropped"
            );
        }
    }
}

/// Error raised when creating an application.
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error("only job seekers can submit applications")]
    Forbidden,
    #[error("no job listing with id '{0}'")]
    JobNotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
