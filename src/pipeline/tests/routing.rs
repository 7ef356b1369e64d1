use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use super::common::*;
use crate::pipeline::domain::{Actor, ApplicationStatus, ApplicationSubmission, JobId};
use crate::pipeline::router::{
    apply_handler, pipeline_router, transition_handler, ApplyRequest, TransitionRequest,
};

fn shared_pipeline() -> Arc<TestPipeline> {
    let (pipeline, _store, _notifier) = build_pipeline();
    Arc::new(pipeline)
}

#[tokio::test]
async fn transition_handler_maps_illegal_to_unprocessable() {
    let service = shared_pipeline();

    let response = transition_handler(
        State(service),
        Path("app-3".to_string()),
        axum::Json(TransitionRequest {
            actor: Actor::employer(EMPLOYER_A),
            status: ApplicationStatus::Pending,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("accepted"));
    assert!(message.contains("pending"));
}

#[tokio::test]
async fn transition_handler_maps_forbidden_and_not_found() {
    let service = shared_pipeline();

    let response = transition_handler(
        State(service.clone()),
        Path("app-1".to_string()),
        axum::Json(TransitionRequest {
            actor: Actor::employer(EMPLOYER_B),
            status: ApplicationStatus::Reviewing,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = transition_handler(
        State(service),
        Path("missing".to_string()),
        axum::Json(TransitionRequest {
            actor: Actor::employer(EMPLOYER_A),
            status: ApplicationStatus::Reviewing,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn apply_handler_creates_with_created_status() {
    let service = shared_pipeline();

    let response = apply_handler(
        State(service),
        axum::Json(ApplyRequest {
            actor: Actor::job_seeker("seeker-9"),
            submission: ApplicationSubmission {
                job_id: JobId("job-a1".to_string()),
                applicant_name: "Sam Carter".to_string(),
                applicant_avatar: None,
                cover_letter: None,
                resume_url: None,
            },
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["job_title"], "Senior Frontend Developer");
}

#[tokio::test]
async fn board_endpoint_renders_all_four_columns() {
    let app = pipeline_router(shared_pipeline());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/employers/{EMPLOYER_A}/board"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let columns = body["columns"].as_array().expect("columns array");
    assert_eq!(columns.len(), 4);
    assert_eq!(columns[1]["title"], "Under Review");
    assert_eq!(body["counts"]["pending"], 1);
    assert_eq!(body["counts"]["rejected"], 0);
    // Empty columns are present with an explicit empty list.
    assert!(columns[3]["applications"]
        .as_array()
        .expect("rejected column")
        .is_empty());
}

#[tokio::test]
async fn queue_endpoint_splits_pending_from_reviewed() {
    let app = pipeline_router(shared_pipeline());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/employers/{EMPLOYER_A}/queue"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["pending"].as_array().expect("pending").len(), 1);
    assert_eq!(body["reviewed"].as_array().expect("reviewed").len(), 2);
}

#[tokio::test]
async fn candidates_endpoint_rejects_unknown_status_filter() {
    let app = pipeline_router(shared_pipeline());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/api/v1/employers/{EMPLOYER_A}/candidates?status=archived"
                ))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn candidates_endpoint_applies_search_and_filters() {
    let app = pipeline_router(shared_pipeline());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/api/v1/employers/{EMPLOYER_A}/candidates?search=react&status=all&job=all"
                ))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let matches = body.as_array().expect("match array");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["id"], "app-1");
}

#[tokio::test]
async fn query_handler_tolerates_missing_query_entirely() {
    let service = shared_pipeline();
    let response = crate::pipeline::router::candidates_handler(
        State(service),
        Path(EMPLOYER_A.to_string()),
        Query(Default::default()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
