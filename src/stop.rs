//! Itinerary stop domain types.
//!
//! A stop is normalized once at the service boundary; everything past
//! that boundary works with these types instead of raw request rows.
//! Missing coordinates are an explicit `Option`, so every consumer has
//! to handle the unlocated branch.

use serde::{Deserialize, Serialize};

/// A geographic point as (latitude, longitude) in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers. (0, 0) is a valid point.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Category of an itinerary stop. Affects the rendered icon only,
/// never the ordering logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Lodging,
    Dining,
    Event,
    Activity,
    Transport,
    Note,
}

impl Default for ItemType {
    fn default() -> Self {
        ItemType::Activity
    }
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Lodging => "lodging",
            ItemType::Dining => "dining",
            ItemType::Event => "event",
            ItemType::Activity => "activity",
            ItemType::Transport => "transport",
            ItemType::Note => "note",
        }
    }
}

/// A single itinerary activity/location for one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    /// Stable identifier, preserved across reordering.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub item_type: ItemType,
    #[serde(default)]
    pub coordinates: Option<LatLng>,
    /// Informational only; the optimizer does not enforce it.
    #[serde(default)]
    pub scheduled_time: Option<String>,
}

impl Stop {
    /// Coordinates usable for distance math: present and finite.
    pub fn location(&self) -> Option<LatLng> {
        self.coordinates.filter(LatLng::is_finite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop_with(coordinates: Option<LatLng>) -> Stop {
        Stop {
            id: "s1".to_string(),
            title: "Coffee".to_string(),
            item_type: ItemType::Dining,
            coordinates,
            scheduled_time: None,
        }
    }

    #[test]
    fn test_location_requires_finite_coordinates() {
        assert!(stop_with(None).location().is_none());
        assert!(stop_with(Some(LatLng::new(f64::NAN, -75.5))).location().is_none());
        assert!(stop_with(Some(LatLng::new(6.2, -75.5))).location().is_some());
    }

    #[test]
    fn test_origin_is_a_valid_location() {
        assert_eq!(
            stop_with(Some(LatLng::new(0.0, 0.0))).location(),
            Some(LatLng::new(0.0, 0.0))
        );
    }

    #[test]
    fn test_deserializes_camel_case_wire_shape() {
        let raw = r#"{
            "id": "a",
            "title": "Museum",
            "itemType": "event",
            "coordinates": { "lat": 6.25, "lng": -75.57 },
            "scheduledTime": "2024-06-01T10:00:00Z"
        }"#;
        let stop: Stop = serde_json::from_str(raw).unwrap();
        assert_eq!(stop.item_type, ItemType::Event);
        assert_eq!(stop.location(), Some(LatLng::new(6.25, -75.57)));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let stop: Stop = serde_json::from_str(r#"{ "id": "a", "title": "Lunch" }"#).unwrap();
        assert_eq!(stop.item_type, ItemType::Activity);
        assert!(stop.coordinates.is_none());
        assert!(stop.scheduled_time.is_none());
    }
}
