//! itinerary-planner core
//!
//! Route optimization for trip itinerary days: haversine distances, a
//! deterministic nearest-neighbor heuristic, an LLM route advisor with
//! typed fallback, and a 2D map layout for the frontend.

pub mod advisor;
pub mod api;
pub mod haversine;
pub mod layout;
pub mod llm;
pub mod nearest_neighbor;
pub mod optimizer;
pub mod stop;
