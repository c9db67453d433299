//! 2D layout projection for itinerary day maps.
//!
//! Projects coordinate-bearing stops into percentage positions inside
//! a container, plus route segments labeled with the same travel
//! minutes the optimizer reports. No rendering happens here; the
//! consumer draws whatever markers and lines it likes.

use serde::Serialize;

use crate::haversine::{TravelModel, haversine_km};
use crate::stop::{ItemType, LatLng, Stop};

/// Markers stay inside [10%, 90%] of each axis so they never touch
/// the container edge.
const AXIS_MIN_PCT: f64 = 10.0;
const AXIS_MAX_PCT: f64 = 90.0;

/// Padding added around the bounding box, per axis.
const PADDING_RATIO: f64 = 0.15;

/// Substitute padding in degrees when an axis has zero extent, so a
/// single stop or a collinear day still projects.
const MIN_PADDING_DEG: f64 = 0.005;

/// Layout for one day's map.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum MapLayout {
    /// No stops at all.
    Empty,
    /// Stops exist but none carries coordinates.
    NoCoordinates,
    Plotted(PlottedMap),
}

impl MapLayout {
    /// User-facing message for the states with nothing to draw.
    pub fn placeholder_message(&self) -> Option<&'static str> {
        match self {
            MapLayout::Empty => Some("No stops planned for this day yet."),
            MapLayout::NoCoordinates => {
                Some("Add location data to your stops to see them on the map.")
            }
            MapLayout::Plotted(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlottedMap {
    pub markers: Vec<Marker>,
    pub segments: Vec<Segment>,
    pub stats: TripStats,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub stop_id: String,
    pub title: String,
    pub item_type: ItemType,
    /// 1-based position label in visiting order.
    pub order: usize,
    pub left_pct: f64,
    pub top_pct: f64,
    pub selected: bool,
}

/// One travel leg between consecutive plotted stops.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub from: Position,
    pub to: Position,
    pub distance_km: f64,
    pub minutes: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub left_pct: f64,
    pub top_pct: f64,
}

/// Aggregates derived from the segments, never estimated separately.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripStats {
    pub stop_count: usize,
    pub total_distance_km: f64,
    pub total_minutes: u32,
}

/// Builds the layout for an ordered list of stops.
///
/// `selected` highlights one marker by stop ID. The travel model must
/// be the same one the optimizer used, so segment labels match the
/// reported savings.
pub fn build_layout(stops: &[Stop], selected: Option<&str>, model: &TravelModel) -> MapLayout {
    if stops.is_empty() {
        return MapLayout::Empty;
    }

    let located: Vec<(&Stop, LatLng)> = stops
        .iter()
        .filter_map(|stop| stop.location().map(|loc| (stop, loc)))
        .collect();
    if located.is_empty() {
        return MapLayout::NoCoordinates;
    }

    let bounds = Bounds::around(located.iter().map(|(_, loc)| *loc));

    let markers: Vec<Marker> = located
        .iter()
        .enumerate()
        .map(|(index, (stop, loc))| {
            let position = bounds.project(*loc);
            Marker {
                stop_id: stop.id.clone(),
                title: stop.title.clone(),
                item_type: stop.item_type,
                order: index + 1,
                left_pct: position.left_pct,
                top_pct: position.top_pct,
                selected: selected == Some(stop.id.as_str()),
            }
        })
        .collect();

    let segments: Vec<Segment> = located
        .windows(2)
        .map(|pair| {
            let (_, from) = pair[0];
            let (_, to) = pair[1];
            let distance_km = haversine_km(from, to);
            Segment {
                from: bounds.project(from),
                to: bounds.project(to),
                distance_km,
                minutes: model.minutes_for_km(distance_km),
            }
        })
        .collect();

    let stats = TripStats {
        stop_count: located.len(),
        total_distance_km: segments.iter().map(|s| s.distance_km).sum(),
        total_minutes: segments.iter().map(|s| s.minutes).sum(),
    };

    MapLayout::Plotted(PlottedMap {
        markers,
        segments,
        stats,
    })
}

/// Padded bounding box that maps coordinates to axis percentages.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_lat: f64,
    max_lat: f64,
    min_lng: f64,
    max_lng: f64,
}

impl Bounds {
    fn around(points: impl Iterator<Item = LatLng>) -> Self {
        let mut min_lat = f64::INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        let mut min_lng = f64::INFINITY;
        let mut max_lng = f64::NEG_INFINITY;

        for point in points {
            min_lat = min_lat.min(point.lat);
            max_lat = max_lat.max(point.lat);
            min_lng = min_lng.min(point.lng);
            max_lng = max_lng.max(point.lng);
        }

        let lat_pad = padding(max_lat - min_lat);
        let lng_pad = padding(max_lng - min_lng);

        Self {
            min_lat: min_lat - lat_pad,
            max_lat: max_lat + lat_pad,
            min_lng: min_lng - lng_pad,
            max_lng: max_lng + lng_pad,
        }
    }

    /// Linear map into [10%, 90%], clamped. Latitude is inverted so
    /// north ends up at the top of the container.
    fn project(&self, point: LatLng) -> Position {
        let x = (point.lng - self.min_lng) / (self.max_lng - self.min_lng);
        let y = (point.lat - self.min_lat) / (self.max_lat - self.min_lat);

        let span = AXIS_MAX_PCT - AXIS_MIN_PCT;
        Position {
            left_pct: (AXIS_MIN_PCT + x * span).clamp(AXIS_MIN_PCT, AXIS_MAX_PCT),
            top_pct: (AXIS_MIN_PCT + (1.0 - y) * span).clamp(AXIS_MIN_PCT, AXIS_MAX_PCT),
        }
    }
}

fn padding(extent: f64) -> f64 {
    if extent > 0.0 {
        extent * PADDING_RATIO
    } else {
        MIN_PADDING_DEG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_substitutes_minimum_on_zero_extent() {
        assert_eq!(padding(0.0), MIN_PADDING_DEG);
        assert!((padding(1.0) - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_projection_stays_inside_axis_band() {
        let bounds = Bounds::around(
            [LatLng::new(6.20, -75.60), LatLng::new(6.28, -75.50)]
                .into_iter(),
        );
        for point in [
            LatLng::new(6.20, -75.60),
            LatLng::new(6.28, -75.50),
            LatLng::new(6.24, -75.55),
        ] {
            let pos = bounds.project(point);
            assert!(pos.left_pct >= AXIS_MIN_PCT && pos.left_pct <= AXIS_MAX_PCT);
            assert!(pos.top_pct >= AXIS_MIN_PCT && pos.top_pct <= AXIS_MAX_PCT);
        }
    }

    #[test]
    fn test_latitude_axis_is_inverted() {
        let bounds = Bounds::around(
            [LatLng::new(6.20, -75.58), LatLng::new(6.28, -75.58)]
                .into_iter(),
        );
        let north = bounds.project(LatLng::new(6.28, -75.58));
        let south = bounds.project(LatLng::new(6.20, -75.58));
        assert!(north.top_pct < south.top_pct, "north should sit higher");
    }

    #[test]
    fn test_single_point_projects_to_center() {
        let bounds = Bounds::around([LatLng::new(6.24, -75.57)].into_iter());
        let pos = bounds.project(LatLng::new(6.24, -75.57));
        assert!((pos.left_pct - 50.0).abs() < 1e-9);
        assert!((pos.top_pct - 50.0).abs() < 1e-9);
    }
}
