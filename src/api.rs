//! HTTP surface for the optimizer.
//!
//! One public computation endpoint plus a health check. CORS is wide
//! open: the contract carries no secrets and the endpoint is meant to
//! be called straight from a browser.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use chrono::Utc;
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;

use crate::advisor::RouteAdvisor;
use crate::optimizer::{OptimizationResult, OptimizeError, OptimizeRequest, optimize};

pub struct AppState<A> {
    pub advisor: Arc<A>,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            advisor: Arc::clone(&self.advisor),
        }
    }
}

pub fn create_router<A>(advisor: A) -> Router
where
    A: RouteAdvisor + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/optimize", post(optimize_route::<A>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState {
            advisor: Arc::new(advisor),
        })
}

pub async fn optimize_route<A>(
    State(state): State<AppState<A>>,
    Json(payload): Json<OptimizeRequest>,
) -> Result<Json<OptimizationResult>, (StatusCode, Json<Value>)>
where
    A: RouteAdvisor,
{
    match optimize(state.advisor.as_ref(), payload).await {
        Ok(result) => Ok(Json(result)),
        Err(err) => {
            error!(%err, "optimization request failed");
            Err(error_response(err))
        }
    }
}

fn error_response(err: OptimizeError) -> (StatusCode, Json<Value>) {
    let status = match err {
        OptimizeError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        OptimizeError::QuotaExhausted => StatusCode::PAYMENT_REQUIRED,
    };
    (status, Json(json!({ "error": err.to_string() })))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_maps_to_429() {
        let (status, Json(body)) = error_response(OptimizeError::RateLimited);
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "rate limit");
    }

    #[test]
    fn test_quota_maps_to_402() {
        let (status, Json(body)) = error_response(OptimizeError::QuotaExhausted);
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body["error"], "quota exhausted");
    }
}
