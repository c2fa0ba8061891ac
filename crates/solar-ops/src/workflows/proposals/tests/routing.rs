use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::proposals::router::proposal_router;
use crate::workflows::proposals::service::ProposalService;

fn build_router(provider: StaticProvider) -> axum::Router {
    proposal_router(Arc::new(ProposalService::new(Arc::new(provider))))
}

fn quote_payload(utility_id: &str) -> Value {
    json!({
        "utility_id": utility_id,
        "authority_id": "ahj-alameda",
        "monthly_electric_bill": 150.0,
        "today": "2026-06-01",
    })
}

async fn dispatch(router: axum::Router, payload: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/proposals/quote")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("serialize")))
        .expect("request");

    let response = router.oneshot(request).await.expect("router dispatch");
    let status = response.status();
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&body).expect("json payload"))
}

#[tokio::test]
async fn quote_endpoint_returns_the_full_proposal() {
    let router = build_router(StaticProvider::default());

    let (status, body) = dispatch(router, &quote_payload("util-ca-pge")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("system_size_kw").and_then(Value::as_f64), Some(6.03));
    assert_eq!(
        body.pointer("/costs/net_system_cost").and_then(Value::as_i64),
        Some(11610)
    );
    assert_eq!(
        body.pointer("/cash_flow/year1_savings").and_then(Value::as_i64),
        Some(1800)
    );
    // The offset target defaulted to 100%.
    assert_eq!(body.get("offset_percent").and_then(Value::as_i64), Some(100));
}

#[tokio::test]
async fn missing_reference_data_is_unprocessable() {
    let router = build_router(StaticProvider::default());

    let (status, body) = dispatch(router, &quote_payload("util-nowhere")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("missing required reference data"));
}

#[tokio::test]
async fn loan_quotes_ride_through_the_endpoint() {
    let router = build_router(StaticProvider::default());

    let payload = json!({
        "utility_id": "util-ca-pge",
        "authority_id": "ahj-alameda",
        "monthly_electric_bill": 150.0,
        "financing": "loan",
        "financing_program_id": "fin-sunloans-std",
        "credit_tier": "excellent",
        "today": "2026-06-01",
    });
    let (status, body) = dispatch(router, &payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.pointer("/financing/loan/loan_amount")
            .and_then(Value::as_i64),
        Some(11610)
    );
}
