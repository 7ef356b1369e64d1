use serde::Serialize;
use tracing::info;

use super::domain::{ApplicationId, ApplicationStatus};

/// Whether a successful transition actually changed the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionOutcome {
    Updated,
    /// Target equalled the current status; the store was not touched.
    Unchanged,
}

/// Payload delivered to the notification surface after a successful
/// transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionEvent {
    pub application_id: ApplicationId,
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
    pub outcome: TransitionOutcome,
}

impl TransitionEvent {
    /// Toast copy shown to the employer.
    pub fn summary(&self) -> String {
        format!("The candidate has been marked as {}.", self.to.phrase())
    }
}

/// Trait describing the outbound acknowledgement hook (toast surface, e-mail
/// digest, ...). Delivery is fire-and-forget: a failing notifier never masks
/// or overrides the transition's real outcome.
pub trait TransitionNotifier: Send + Sync {
    fn notify(&self, event: &TransitionEvent) -> Result<(), NotifyError>;
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Default notifier: logs the acknowledgement. Stands in for the hosting
/// application's toast surface.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl TransitionNotifier for LogNotifier {
    fn notify(&self, event: &TransitionEvent) -> Result<(), NotifyError> {
        info!(
            application_id = %event.application_id,
            from = %event.from,
            to = %event.to,
            "{}",
            event.summary()
        );
        Ok(())
    }
}
