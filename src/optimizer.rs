//! Route optimization service.
//!
//! Single entry point that normalizes a day's stops, picks between the
//! LLM advisor and the nearest-neighbor heuristic, and reports the
//! ordered IDs plus distance/time savings.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::advisor::{AdvisorOutcome, AdvisorRequest, RouteAdvisor};
use crate::haversine::{TravelModel, haversine_km};
use crate::nearest_neighbor::nearest_neighbor_order;
use crate::stop::{LatLng, Stop};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub items: Vec<Stop>,
    pub day_date: String,
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub start_location: Option<LatLng>,
    #[serde(default)]
    pub prioritize_by_type: Option<Vec<String>>,
}

/// Reduction against the original order, floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Savings {
    pub distance_km: f64,
    pub time_minutes: u32,
}

impl Savings {
    pub const ZERO: Savings = Savings {
        distance_km: 0.0,
        time_minutes: 0,
    };
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    /// Coordinate-bearing stops first in visiting order, then the
    /// unlocated stops in their original relative order. Always a
    /// permutation of the input IDs.
    pub optimized_order: Vec<String>,
    pub explanation: String,
    pub savings: Savings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_distance: Option<f64>,
}

/// Errors the caller must see instead of a silently degraded result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizeError {
    /// Upstream rate limit; the caller may retry.
    RateLimited,
    /// Upstream quota exhausted; terminal for this request.
    QuotaExhausted,
}

impl fmt::Display for OptimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizeError::RateLimited => write!(f, "rate limit"),
            OptimizeError::QuotaExhausted => write!(f, "quota exhausted"),
        }
    }
}

impl std::error::Error for OptimizeError {}

const EXPLAIN_TOO_FEW: &str = "Not enough stops to optimize.";
const EXPLAIN_NO_COORDS: &str =
    "Stops are missing location data; kept the original order. Add coordinates to optimize.";
const EXPLAIN_HEURISTIC: &str =
    "Ordered with a nearest-neighbor heuristic: each stop is followed by the closest remaining one.";
const EXPLAIN_ADVISOR_DEFAULT: &str =
    "Ordered by the AI concierge considering geography and timing.";

/// Optimizes the visiting order for one itinerary day.
///
/// Advisor rate-limit and quota failures propagate as errors; every
/// other advisor outcome degrades silently to the deterministic
/// heuristic, with the explanation saying so.
pub async fn optimize<A: RouteAdvisor>(
    advisor: &A,
    request: OptimizeRequest,
) -> Result<OptimizationResult, OptimizeError> {
    let model = TravelModel::default();

    if request.items.len() < 2 {
        return Ok(unoptimized(request.items, EXPLAIN_TOO_FEW));
    }

    let locatable = request
        .items
        .iter()
        .filter(|stop| stop.location().is_some())
        .count();
    if locatable < 2 {
        debug!(total = request.items.len(), locatable, "too few locatable stops");
        return Ok(unoptimized(request.items, EXPLAIN_NO_COORDS));
    }

    let preferences = request.preferences.unwrap_or_default();
    let start = preferences.start_location.filter(LatLng::is_finite);

    let (with_coords, without_coords): (Vec<Stop>, Vec<Stop>) = request
        .items
        .into_iter()
        .partition(|stop| stop.location().is_some());

    let original_km = route_distance_km(&with_coords);

    let advisor_request = AdvisorRequest {
        stops: &with_coords,
        day_date: &request.day_date,
        start_location: start,
        prioritize_by_type: preferences.prioritize_by_type.as_deref().unwrap_or(&[]),
    };
    let outcome = advisor.propose(&advisor_request).await;

    let (ordered, explanation) = match outcome {
        AdvisorOutcome::Proposed { order, reasoning } => {
            match resolve_proposed_order(&with_coords, &order) {
                Some(ordered) => {
                    let explanation = if reasoning.trim().is_empty() {
                        EXPLAIN_ADVISOR_DEFAULT.to_string()
                    } else {
                        reasoning
                    };
                    (ordered, explanation)
                }
                None => {
                    debug!("advisor order did not cover every stop; using heuristic");
                    (
                        nearest_neighbor_order(with_coords, start),
                        EXPLAIN_HEURISTIC.to_string(),
                    )
                }
            }
        }
        AdvisorOutcome::Fallback(reason) => {
            debug!(?reason, "advisor unavailable; using heuristic");
            (
                nearest_neighbor_order(with_coords, start),
                EXPLAIN_HEURISTIC.to_string(),
            )
        }
        AdvisorOutcome::RateLimited => return Err(OptimizeError::RateLimited),
        AdvisorOutcome::QuotaExhausted => return Err(OptimizeError::QuotaExhausted),
    };

    let new_km = route_distance_km(&ordered);
    let saved_km = (original_km - new_km).max(0.0);
    let savings = Savings {
        distance_km: saved_km,
        time_minutes: model.minutes_for_km(saved_km),
    };

    let mut optimized_order: Vec<String> = ordered.iter().map(|stop| stop.id.clone()).collect();
    optimized_order.extend(without_coords.iter().map(|stop| stop.id.clone()));

    info!(
        stops = optimized_order.len(),
        original_km, new_km, "optimized itinerary day"
    );

    Ok(OptimizationResult {
        optimized_order,
        explanation,
        savings,
        original_distance: Some(original_km),
        new_distance: Some(new_km),
    })
}

/// Identity result for inputs the optimizer cannot improve.
fn unoptimized(items: Vec<Stop>, explanation: &str) -> OptimizationResult {
    OptimizationResult {
        optimized_order: items.into_iter().map(|stop| stop.id).collect(),
        explanation: explanation.to_string(),
        savings: Savings::ZERO,
        original_distance: None,
        new_distance: None,
    }
}

/// Sum of consecutive-pair distances along a stop chain.
fn route_distance_km(stops: &[Stop]) -> f64 {
    let mut total = 0.0;
    let mut previous: Option<LatLng> = None;
    for stop in stops {
        if let Some(here) = stop.location() {
            if let Some(prev) = previous {
                total += haversine_km(prev, here);
            }
            previous = Some(here);
        }
    }
    total
}

/// Maps 1-indexed advisor positions back onto stops.
///
/// Unresolvable or duplicate positions are dropped; if the result is
/// not a full permutation the whole proposal is rejected so a partial
/// list never leaks out.
fn resolve_proposed_order(stops: &[Stop], order: &[i64]) -> Option<Vec<Stop>> {
    let mut taken = vec![false; stops.len()];
    let mut resolved = Vec::with_capacity(stops.len());

    for &position in order {
        let Some(index) = usize::try_from(position)
            .ok()
            .and_then(|p| p.checked_sub(1))
        else {
            continue;
        };
        if index >= stops.len() || taken[index] {
            continue;
        }
        taken[index] = true;
        resolved.push(stops[index].clone());
    }

    if resolved.len() == stops.len() {
        Some(resolved)
    } else {
        None
    }
}
