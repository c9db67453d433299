//! Greedy nearest-neighbor route construction.
//!
//! Deterministic fallback when no advisor proposal is available.
//! O(n²) distance evaluations, which is fine for itinerary-sized
//! inputs (a day rarely has more than 20 stops).

use crate::haversine::haversine_km;
use crate::stop::{LatLng, Stop};

/// Orders stops by repeatedly appending the closest unvisited stop.
///
/// With an explicit `start`, the scan begins from there without
/// consuming a stop. Without one, the first input stop opens the route
/// and seeds the scan. Ties break toward the earlier input position.
///
/// The output is always a permutation of the input; inputs of length
/// 0 or 1 come back unchanged.
pub fn nearest_neighbor_order(mut remaining: Vec<Stop>, start: Option<LatLng>) -> Vec<Stop> {
    if remaining.len() < 2 {
        return remaining;
    }

    let mut ordered = Vec::with_capacity(remaining.len());
    let mut position = start;

    if position.is_none() {
        let first = remaining.remove(0);
        position = first.location();
        ordered.push(first);
    }

    while !remaining.is_empty() {
        let next = match position {
            Some(here) => {
                let mut best_index = 0;
                let mut best_km = f64::INFINITY;
                for (index, stop) in remaining.iter().enumerate() {
                    if let Some(location) = stop.location() {
                        let km = haversine_km(here, location);
                        // strict `<` keeps the earliest input position on ties
                        if km < best_km {
                            best_km = km;
                            best_index = index;
                        }
                    }
                }
                remaining.remove(best_index)
            }
            // No usable position yet: preserve input order.
            None => remaining.remove(0),
        };

        if let Some(location) = next.location() {
            position = Some(location);
        }
        ordered.push(next);
    }

    ordered
}
