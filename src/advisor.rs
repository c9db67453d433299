//! Route advisor port.
//!
//! The optimization service branches on a closed set of outcomes
//! instead of nested error handling. Adapters translate their own
//! transport failures into these variants; only rate limiting and
//! quota exhaustion ever surface to the caller as errors.

use std::future::Future;

use crate::stop::{LatLng, Stop};

/// What the service hands an advisor when asking for an order.
#[derive(Debug, Clone)]
pub struct AdvisorRequest<'a> {
    /// Coordinate-bearing stops only, in their original order.
    pub stops: &'a [Stop],
    /// The day being planned, as supplied by the caller.
    pub day_date: &'a str,
    pub start_location: Option<LatLng>,
    /// Advisory type preferences, threaded into the prompt verbatim.
    pub prioritize_by_type: &'a [String],
}

/// Closed set of advisor outcomes.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvisorOutcome {
    /// The advisor proposed an order. Values are 1-indexed positions
    /// into the request's stop list, exactly as returned; the service
    /// resolves them defensively.
    Proposed { order: Vec<i64>, reasoning: String },
    /// The advisor could not help; the caller falls back silently to
    /// the deterministic heuristic.
    Fallback(FallbackReason),
    /// Upstream rate limit. Propagated to the caller as retryable.
    RateLimited,
    /// Upstream quota exhausted. Propagated as terminal for the request.
    QuotaExhausted,
}

/// Why an advisor bowed out without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    MissingCredentials,
    MalformedResponse,
    Upstream,
}

/// Proposes a visiting order for one itinerary day.
///
/// Implementations must not panic on upstream garbage; everything an
/// upstream can do wrong maps to an [`AdvisorOutcome`] variant.
pub trait RouteAdvisor: Send + Sync {
    fn propose(
        &self,
        request: &AdvisorRequest<'_>,
    ) -> impl Future<Output = AdvisorOutcome> + Send;
}
