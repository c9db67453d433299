//! Great-circle distance and travel-time estimation.
//!
//! Uses straight-line distance at an assumed average urban speed.
//! Less accurate than a road router (ignores streets) but has no
//! external dependency and is always available.

use crate::stop::LatLng;

/// Average urban driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 25.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometers.
///
/// Symmetric and zero for identical points. Callers filter non-finite
/// coordinates before reaching this function.
pub fn haversine_km(from: LatLng, to: LatLng) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Converts distances into estimated travel minutes.
///
/// The optimizer and the map layout share one instance so the numbers
/// shown to the user stay consistent.
#[derive(Debug, Clone)]
pub struct TravelModel {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for TravelModel {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl TravelModel {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Travel time for a distance in km, rounded to the nearest minute.
    pub fn minutes_for_km(&self, km: f64) -> u32 {
        let hours = km / self.speed_kmh;
        (hours * 60.0).round() as u32
    }

    /// Travel time between two points, rounded to the nearest minute.
    pub fn minutes_between(&self, from: LatLng, to: LatLng) -> u32 {
        self.minutes_for_km(haversine_km(from, to))
    }
}
