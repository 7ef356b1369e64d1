use super::domain::{ActorRole, ApplicationStatus};
use super::store::StoreError;

/// Allowed targets from each source status. Accepted and rejected are
/// terminal; nothing moves back to pending.
pub const fn allowed_targets(from: ApplicationStatus) -> &'static [ApplicationStatus] {
    match from {
        ApplicationStatus::Pending => &[
            ApplicationStatus::Reviewing,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
        ],
        ApplicationStatus::Reviewing => {
            &[ApplicationStatus::Accepted, ApplicationStatus::Rejected]
        }
        ApplicationStatus::Accepted | ApplicationStatus::Rejected => &[],
    }
}

pub fn is_allowed(from: ApplicationStatus, to: ApplicationStatus) -> bool {
    allowed_targets(from).contains(&to)
}

/// Role/ownership gate for status changes: only the employer owning the
/// parent listing may transition. Job seekers and admins are read-only.
pub const fn permits(role: ActorRole, owns_listing: bool) -> bool {
    matches!(role, ActorRole::Employer) && owns_listing
}

/// The two employer-facing surfaces rendered over the same engine. A surface
/// only restricts which actions are offered per card; validation always runs
/// through [`is_allowed`] and [`permits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewSurface {
    /// Simplified two-tab queue: accept or reject straight from pending.
    Queue,
    /// Kanban board offering the full transition table.
    Kanban,
}

impl ReviewSurface {
    pub const fn actions(self, status: ApplicationStatus) -> &'static [ApplicationStatus] {
        match self {
            ReviewSurface::Queue => match status {
                ApplicationStatus::Pending => {
                    &[ApplicationStatus::Accepted, ApplicationStatus::Rejected]
                }
                _ => &[],
            },
            ReviewSurface::Kanban => allowed_targets(status),
        }
    }
}

/// Error raised by a transition attempt. Each variant carries a distinct
/// user-facing message; validation failures are never downgraded to no-ops.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("application not found")]
    NotFound,
    #[error("only the employer who owns the listing can update this application")]
    Forbidden,
    #[error("cannot move {from} to {to}")]
    IllegalTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}
