//! Handler-level tests for the optimize endpoint.
//!
//! Calls the axum handler directly with scripted advisors; transport
//! concerns (CORS, tracing layers) are exercised by the router in
//! production and stay out of scope here.

mod fixtures;

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;

use itinerary_planner::advisor::{AdvisorOutcome, AdvisorRequest, RouteAdvisor};
use itinerary_planner::api::{AppState, optimize_route};
use itinerary_planner::optimizer::OptimizeRequest;

use fixtures::medellin_stops::sightseeing_day;

struct ScriptedAdvisor(AdvisorOutcome);

impl RouteAdvisor for ScriptedAdvisor {
    async fn propose(&self, _request: &AdvisorRequest<'_>) -> AdvisorOutcome {
        self.0.clone()
    }
}

fn state(outcome: AdvisorOutcome) -> State<AppState<ScriptedAdvisor>> {
    State(AppState {
        advisor: Arc::new(ScriptedAdvisor(outcome)),
    })
}

fn payload() -> Json<OptimizeRequest> {
    Json(OptimizeRequest {
        items: sightseeing_day(),
        day_date: "2024-06-01".to_string(),
        preferences: None,
    })
}

#[tokio::test]
async fn successful_optimization_returns_the_result_body() {
    let response = optimize_route(
        state(AdvisorOutcome::Proposed {
            order: vec![1, 2, 3, 4, 5, 6],
            reasoning: "as given".to_string(),
        }),
        payload(),
    )
    .await;

    let Json(result) = response.expect("should succeed");
    assert_eq!(result.optimized_order.len(), 6);
    assert!(result.savings.distance_km >= 0.0);
}

#[tokio::test]
async fn rate_limit_maps_to_429_with_contract_body() {
    let response = optimize_route(state(AdvisorOutcome::RateLimited), payload()).await;
    let (status, Json(body)) = response.expect_err("should fail");
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "rate limit");
}

#[tokio::test]
async fn quota_exhaustion_maps_to_402_with_contract_body() {
    let response = optimize_route(state(AdvisorOutcome::QuotaExhausted), payload()).await;
    let (status, Json(body)) = response.expect_err("should fail");
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["error"], "quota exhausted");
}
