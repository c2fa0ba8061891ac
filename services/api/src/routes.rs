use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use crate::infra::AppState;
use solar_ops::workflows::leads::{
    lead_router, FinancingReadiness, LeadAlertPublisher, LeadId, LeadQualificationService,
    LeadRepository, LeadServiceError, RepositoryError,
};
use solar_ops::workflows::proposals::{
    proposal_router, FinancingMode, ProposalService, ProposalServiceError, QuoteRequest,
    ReferenceDataProvider,
};

/// Shared handle for the composite lead-to-proposal endpoint.
pub(crate) struct ServiceState<R, A, P> {
    pub(crate) leads: Arc<LeadQualificationService<R, A>>,
    pub(crate) proposals: Arc<ProposalService<P>>,
}

impl<R, A, P> Clone for ServiceState<R, A, P> {
    fn clone(&self) -> Self {
        Self {
            leads: self.leads.clone(),
            proposals: self.proposals.clone(),
        }
    }
}

pub(crate) fn with_service_routes<R, A, P>(
    leads: Arc<LeadQualificationService<R, A>>,
    proposals: Arc<ProposalService<P>>,
) -> axum::Router
where
    R: LeadRepository + 'static,
    A: LeadAlertPublisher + 'static,
    P: ReferenceDataProvider + 'static,
{
    let state = ServiceState {
        leads: leads.clone(),
        proposals: proposals.clone(),
    };

    lead_router(leads)
        .merge(proposal_router(proposals))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .merge(
            axum::Router::new()
                .route(
                    "/api/v1/leads/:lead_id/proposal",
                    axum::routing::post(lead_proposal_endpoint::<R, A, P>),
                )
                .with_state(state),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct LeadProposalRequest {
    pub(crate) authority_id: String,
    #[serde(default = "default_offset_target")]
    pub(crate) offset_target_percent: f64,
    #[serde(default)]
    pub(crate) financing: Option<FinancingMode>,
    #[serde(default)]
    pub(crate) financing_program_id: Option<String>,
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

fn default_offset_target() -> f64 {
    100.0
}

static PROPOSAL_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_proposal_number() -> String {
    let id = PROPOSAL_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("PROP-{id:06}")
}

/// Build a quote from the stored lead, then flag the lead as proposed. The
/// lead's own bill, credit tier, and utility drive the calculation.
pub(crate) async fn lead_proposal_endpoint<R, A, P>(
    State(state): State<ServiceState<R, A, P>>,
    Path(lead_id): Path<String>,
    Json(request): Json<LeadProposalRequest>,
) -> Response
where
    R: LeadRepository + 'static,
    A: LeadAlertPublisher + 'static,
    P: ReferenceDataProvider + 'static,
{
    let id = LeadId(lead_id);
    let record = match state.leads.get(&id) {
        Ok(record) => record,
        Err(LeadServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "lead not found" });
            return (StatusCode::NOT_FOUND, Json(payload)).into_response();
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response();
        }
    };

    let financing = request.financing.unwrap_or(match record.profile.attributes.financing {
        FinancingReadiness::Loan => FinancingMode::Loan,
        FinancingReadiness::Lease => FinancingMode::Lease,
        FinancingReadiness::Cash | FinancingReadiness::Unknown => FinancingMode::Cash,
    });

    let quote_request = QuoteRequest {
        utility_id: record.profile.utility_id.clone(),
        authority_id: request.authority_id,
        monthly_electric_bill: record.profile.attributes.monthly_electric_bill,
        offset_target_percent: request.offset_target_percent,
        credit_tier: record.profile.attributes.credit_tier,
        financing,
        financing_program_id: request.financing_program_id,
    };
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());

    let proposal = match state.proposals.quote(&quote_request, today) {
        Ok(result) => result,
        Err(ProposalServiceError::Calculation(error)) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response();
        }
    };

    let proposal_number = next_proposal_number();
    if let Err(error) = state.leads.mark_proposed(&id, today, &proposal_number) {
        let payload = json!({ "error": error.to_string() });
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response();
    }

    let payload = json!({
        "proposal_number": proposal_number,
        "lead_id": id.0,
        "proposal": proposal,
    });
    (StatusCode::CREATED, Json(payload)).into_response()
}
