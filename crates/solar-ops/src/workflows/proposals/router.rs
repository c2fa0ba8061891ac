use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CreditTier, FinancingMode};
use super::reference::ReferenceDataProvider;
use super::service::{ProposalService, ProposalServiceError, QuoteRequest};

/// Router builder exposing the standalone quote endpoint.
pub fn proposal_router<P>(service: Arc<ProposalService<P>>) -> Router
where
    P: ReferenceDataProvider + 'static,
{
    Router::new()
        .route("/api/v1/proposals/quote", post(quote_handler::<P>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuoteRequestBody {
    utility_id: String,
    authority_id: String,
    monthly_electric_bill: f64,
    #[serde(default = "default_offset_target")]
    offset_target_percent: f64,
    #[serde(default)]
    credit_tier: Option<CreditTier>,
    #[serde(default)]
    financing: FinancingMode,
    #[serde(default)]
    financing_program_id: Option<String>,
    /// Evaluation date for incentive expiry; defaults to today.
    #[serde(default)]
    today: Option<NaiveDate>,
}

fn default_offset_target() -> f64 {
    100.0
}

pub(crate) async fn quote_handler<P>(
    State(service): State<Arc<ProposalService<P>>>,
    axum::Json(body): axum::Json<QuoteRequestBody>,
) -> Response
where
    P: ReferenceDataProvider + 'static,
{
    let today = body.today.unwrap_or_else(|| Local::now().date_naive());
    let request = QuoteRequest {
        utility_id: body.utility_id,
        authority_id: body.authority_id,
        monthly_electric_bill: body.monthly_electric_bill,
        offset_target_percent: body.offset_target_percent,
        credit_tier: body.credit_tier,
        financing: body.financing,
        financing_program_id: body.financing_program_id,
    };

    match service.quote(&request, today) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(ProposalServiceError::Calculation(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
