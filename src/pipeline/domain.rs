use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for job applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for job listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a job application. The transition engine is the only
/// writer; everything else treats the value as read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Reviewing,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Phrasing used in user-facing acknowledgements ("Candidate marked as ...").
    pub const fn phrase(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending review",
            ApplicationStatus::Reviewing => "under review",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Column heading used by the kanban board.
    pub const fn column_title(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Reviewing => "Under Review",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "reviewing" => Some(Self::Reviewing),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Platform roles. Only employers may drive status transitions; job seekers
/// and admins are read-only on application status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    JobSeeker,
    Employer,
    Admin,
}

/// The identity every pipeline operation is performed as. Passed explicitly
/// rather than read from ambient session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub role: ActorRole,
}

impl Actor {
    pub fn job_seeker(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: ActorRole::JobSeeker,
        }
    }

    pub fn employer(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: ActorRole::Employer,
        }
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: ActorRole::Admin,
        }
    }
}

/// The listing fields the pipeline needs: ownership for permission checks and
/// display fields snapshotted onto new applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSnapshot {
    pub id: JobId,
    pub employer_id: String,
    pub title: String,
    pub company_name: String,
    pub is_active: bool,
}

/// A job seeker's submission against one listing.
///
/// `job_title` and `company_name` are copied from the listing at creation time
/// and never re-joined; later listing edits do not rewrite past applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub job_seeker_id: String,
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub applied_at: DateTime<Utc>,
    pub job_title: String,
    pub company_name: String,
    pub applicant_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_avatar: Option<String>,
}

/// What a job seeker provides when applying. The seeker identity comes from
/// the acting [`Actor`], and the status is always forced to pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub job_id: JobId,
    pub applicant_name: String,
    #[serde(default)]
    pub applicant_avatar: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
}
