use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ActivityKind, EngagementActivity, LeadId, LeadStatus, LeadSubmission, LeadTier};
use super::qualification::rebuttals;
use super::repository::{LeadAlertPublisher, LeadQuery, LeadRepository, RepositoryError};
use super::service::{LeadQualificationService, LeadServiceError};

/// Router builder exposing HTTP endpoints for lead intake, engagement, and
/// rebuttal lookups.
pub fn lead_router<R, A>(service: Arc<LeadQualificationService<R, A>>) -> Router
where
    R: LeadRepository + 'static,
    A: LeadAlertPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/leads",
            post(submit_handler::<R, A>).get(list_handler::<R, A>),
        )
        .route("/api/v1/leads/import", post(import_handler::<R, A>))
        .route("/api/v1/leads/rebuttals", post(rebuttals_handler))
        .route("/api/v1/leads/:lead_id", get(get_handler::<R, A>))
        .route(
            "/api/v1/leads/:lead_id/activities",
            post(activity_handler::<R, A>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    tier: Option<LeadTier>,
    state: Option<String>,
    status: Option<LeadStatus>,
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActivityRequest {
    kind: ActivityKind,
    #[serde(default)]
    occurred_on: Option<NaiveDate>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImportRequest {
    csv: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RebuttalsRequest {
    flags: Vec<String>,
}

pub(crate) async fn submit_handler<R, A>(
    State(service): State<Arc<LeadQualificationService<R, A>>>,
    axum::Json(submission): axum::Json<LeadSubmission>,
) -> Response
where
    R: LeadRepository + 'static,
    A: LeadAlertPublisher + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(LeadServiceError::Intake(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(LeadServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({ "error": "lead already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn list_handler<R, A>(
    State(service): State<Arc<LeadQualificationService<R, A>>>,
    Query(params): Query<ListParams>,
) -> Response
where
    R: LeadRepository + 'static,
    A: LeadAlertPublisher + 'static,
{
    let query = LeadQuery {
        tier: params.tier,
        state: params.state,
        status: params.status,
        limit: params.limit,
    };

    match service.list(&query) {
        Ok(records) => {
            let leads: Vec<_> = records.iter().map(|record| record.view()).collect();
            let payload = json!({ "count": leads.len(), "leads": leads });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn get_handler<R, A>(
    State(service): State<Arc<LeadQualificationService<R, A>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    A: LeadAlertPublisher + 'static,
{
    let id = LeadId(lead_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(LeadServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "lead not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn activity_handler<R, A>(
    State(service): State<Arc<LeadQualificationService<R, A>>>,
    Path(lead_id): Path<String>,
    axum::Json(request): axum::Json<ActivityRequest>,
) -> Response
where
    R: LeadRepository + 'static,
    A: LeadAlertPublisher + 'static,
{
    let id = LeadId(lead_id);
    let activity = EngagementActivity {
        kind: request.kind,
        occurred_on: request
            .occurred_on
            .unwrap_or_else(|| Local::now().date_naive()),
        notes: request.notes.unwrap_or_default(),
    };

    match service.record_activity(&id, activity) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(LeadServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "lead not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn import_handler<R, A>(
    State(service): State<Arc<LeadQualificationService<R, A>>>,
    axum::Json(request): axum::Json<ImportRequest>,
) -> Response
where
    R: LeadRepository + 'static,
    A: LeadAlertPublisher + 'static,
{
    match service.import_csv(&request.csv) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(LeadServiceError::Import(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

/// Unknown flag labels are dropped rather than rejected.
pub(crate) async fn rebuttals_handler(
    axum::Json(request): axum::Json<RebuttalsRequest>,
) -> Response {
    let scripts = rebuttals::rebuttals_for_labels(request.flags.iter().map(String::as_str));
    (StatusCode::OK, axum::Json(scripts)).into_response()
}
