use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{
    Actor, ApplicationId, ApplicationStatus, ApplicationSubmission, JobApplication, JobId,
};
use super::notify::TransitionNotifier;
use super::projections::{
    self, CandidateFilters, JobFilter, StatusCounts, StatusFilter,
};
use super::service::{ApplicationPipeline, ApplyError};
use super::store::{ApplicationStore, ListingDirectory, StoreError};
use super::transitions::{ReviewSurface, TransitionError};

/// Router builder exposing the pipeline over HTTP. Authentication lives in
/// the hosting application; requests that mutate state carry an explicit
/// actor payload.
pub fn pipeline_router<S, L, N>(service: Arc<ApplicationPipeline<S, L, N>>) -> Router
where
    S: ApplicationStore + 'static,
    L: ListingDirectory + 'static,
    N: TransitionNotifier + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(apply_handler::<S, L, N>))
        .route(
            "/api/v1/applications/:application_id",
            get(get_handler::<S, L, N>),
        )
        .route(
            "/api/v1/applications/:application_id/status",
            post(transition_handler::<S, L, N>),
        )
        .route(
            "/api/v1/seekers/:seeker_id/applications",
            get(seeker_applications_handler::<S, L, N>),
        )
        .route(
            "/api/v1/employers/:employer_id/queue",
            get(queue_handler::<S, L, N>),
        )
        .route(
            "/api/v1/employers/:employer_id/board",
            get(board_handler::<S, L, N>),
        )
        .route(
            "/api/v1/employers/:employer_id/candidates",
            get(candidates_handler::<S, L, N>),
        )
        .route("/api/v1/reports/platform", get(report_handler::<S, L, N>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplyRequest {
    pub(crate) actor: Actor,
    #[serde(flatten)]
    pub(crate) submission: ApplicationSubmission,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransitionRequest {
    pub(crate) actor: Actor,
    pub(crate) status: ApplicationStatus,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CandidateQuery {
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    job: Option<String>,
}

#[derive(Debug, Serialize)]
struct SeekerApplicationsResponse {
    applications: Vec<JobApplication>,
    counts: StatusCounts,
}

#[derive(Debug, Serialize)]
struct QueueResponse {
    pending: Vec<JobApplication>,
    reviewed: Vec<JobApplication>,
    pending_actions: &'static [ApplicationStatus],
}

#[derive(Debug, Serialize)]
struct BoardColumn {
    status: ApplicationStatus,
    title: &'static str,
    actions: &'static [ApplicationStatus],
    applications: Vec<JobApplication>,
}

#[derive(Debug, Serialize)]
struct BoardResponse {
    counts: StatusCounts,
    columns: Vec<BoardColumn>,
}

pub(crate) async fn apply_handler<S, L, N>(
    State(service): State<Arc<ApplicationPipeline<S, L, N>>>,
    axum::Json(request): axum::Json<ApplyRequest>,
) -> Response
where
    S: ApplicationStore + 'static,
    L: ListingDirectory + 'static,
    N: TransitionNotifier + 'static,
{
    match service.apply(&request.actor, request.submission) {
        Ok(application) => (StatusCode::CREATED, axum::Json(application)).into_response(),
        Err(ApplyError::Forbidden) => error_response(
            StatusCode::FORBIDDEN,
            &ApplyError::Forbidden.to_string(),
        ),
        Err(err @ ApplyError::JobNotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, &err.to_string())
        }
        Err(ApplyError::Store(err)) => store_error_response(err),
    }
}

pub(crate) async fn get_handler<S, L, N>(
    State(service): State<Arc<ApplicationPipeline<S, L, N>>>,
    Path(application_id): Path<String>,
) -> Response
where
    S: ApplicationStore + 'static,
    L: ListingDirectory + 'static,
    N: TransitionNotifier + 'static,
{
    match service.get(&ApplicationId(application_id)) {
        Ok(application) => (StatusCode::OK, axum::Json(application)).into_response(),
        Err(err) => store_error_response(err),
    }
}

pub(crate) async fn transition_handler<S, L, N>(
    State(service): State<Arc<ApplicationPipeline<S, L, N>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<TransitionRequest>,
) -> Response
where
    S: ApplicationStore + 'static,
    L: ListingDirectory + 'static,
    N: TransitionNotifier + 'static,
{
    let id = ApplicationId(application_id);
    match service.transition(&request.actor, &id, request.status) {
        Ok(application) => (StatusCode::OK, axum::Json(application)).into_response(),
        Err(err @ TransitionError::NotFound) => {
            error_response(StatusCode::NOT_FOUND, &err.to_string())
        }
        Err(err @ TransitionError::Forbidden) => {
            error_response(StatusCode::FORBIDDEN, &err.to_string())
        }
        Err(err @ TransitionError::IllegalTransition { .. }) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string())
        }
        Err(TransitionError::Store(err)) => store_error_response(err),
    }
}

pub(crate) async fn seeker_applications_handler<S, L, N>(
    State(service): State<Arc<ApplicationPipeline<S, L, N>>>,
    Path(seeker_id): Path<String>,
) -> Response
where
    S: ApplicationStore + 'static,
    L: ListingDirectory + 'static,
    N: TransitionNotifier + 'static,
{
    match service.applications_for_seeker(&Actor::job_seeker(seeker_id)) {
        Ok(applications) => {
            let counts = projections::status_counts(&applications);
            (
                StatusCode::OK,
                axum::Json(SeekerApplicationsResponse {
                    applications,
                    counts,
                }),
            )
                .into_response()
        }
        Err(err) => store_error_response(err),
    }
}

pub(crate) async fn queue_handler<S, L, N>(
    State(service): State<Arc<ApplicationPipeline<S, L, N>>>,
    Path(employer_id): Path<String>,
) -> Response
where
    S: ApplicationStore + 'static,
    L: ListingDirectory + 'static,
    N: TransitionNotifier + 'static,
{
    match service.applications_for_employer(&Actor::employer(employer_id)) {
        Ok(applications) => {
            let split = projections::pending_vs_reviewed(&applications);
            // The simplified surface only offers accept/reject on pending cards.
            let actions = ReviewSurface::Queue.actions(ApplicationStatus::Pending);
            (
                StatusCode::OK,
                axum::Json(QueueResponse {
                    pending: split.pending,
                    reviewed: split.reviewed,
                    pending_actions: actions,
                }),
            )
                .into_response()
        }
        Err(err) => store_error_response(err),
    }
}

pub(crate) async fn board_handler<S, L, N>(
    State(service): State<Arc<ApplicationPipeline<S, L, N>>>,
    Path(employer_id): Path<String>,
) -> Response
where
    S: ApplicationStore + 'static,
    L: ListingDirectory + 'static,
    N: TransitionNotifier + 'static,
{
    match service.applications_for_employer(&Actor::employer(employer_id)) {
        Ok(applications) => {
            let buckets = projections::by_status_buckets(&applications);
            let counts = buckets.counts();
            let columns = ApplicationStatus::ALL
                .into_iter()
                .map(|status| BoardColumn {
                    status,
                    title: status.column_title(),
                    actions: ReviewSurface::Kanban.actions(status),
                    applications: buckets.bucket(status).to_vec(),
                })
                .collect();
            (StatusCode::OK, axum::Json(BoardResponse { counts, columns })).into_response()
        }
        Err(err) => store_error_response(err),
    }
}

pub(crate) async fn candidates_handler<S, L, N>(
    State(service): State<Arc<ApplicationPipeline<S, L, N>>>,
    Path(employer_id): Path<String>,
    Query(query): Query<CandidateQuery>,
) -> Response
where
    S: ApplicationStore + 'static,
    L: ListingDirectory + 'static,
    N: TransitionNotifier + 'static,
{
    let status_filter = match query.status.as_deref() {
        None => StatusFilter::All,
        Some(raw) => match StatusFilter::parse(raw) {
            Some(filter) => filter,
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    &format!("unknown status filter '{raw}'"),
                );
            }
        },
    };
    let job_filter = match query.job {
        None => JobFilter::All,
        Some(raw) if raw.is_empty() || raw.eq_ignore_ascii_case("all") => JobFilter::All,
        Some(raw) => JobFilter::Only(JobId(raw)),
    };
    let filters = CandidateFilters {
        search_term: query.search.unwrap_or_default(),
        status_filter,
        job_filter,
    };

    match service.applications_for_employer(&Actor::employer(employer_id)) {
        Ok(applications) => {
            let matches = projections::filtered(&applications, &filters);
            (StatusCode::OK, axum::Json(matches)).into_response()
        }
        Err(err) => store_error_response(err),
    }
}

pub(crate) async fn report_handler<S, L, N>(
    State(service): State<Arc<ApplicationPipeline<S, L, N>>>,
) -> Response
where
    S: ApplicationStore + 'static,
    L: ListingDirectory + 'static,
    N: TransitionNotifier + 'static,
{
    match service.platform_report() {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => store_error_response(err),
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}

fn store_error_response(err: StoreError) -> Response {
    let status = match err {
        StoreError::Conflict => StatusCode::CONFLICT,
        StoreError::NotFound => StatusCode::NOT_FOUND,
        StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    error_response(status, &err.to_string())
}
