//! Real Medellín locations for itinerary test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. Distances between these
//! points are a few kilometers, which keeps haversine results in a
//! realistic urban range.

#![allow(dead_code)]

use itinerary_planner::stop::{ItemType, LatLng, Stop};

pub fn stop(id: &str, title: &str, item_type: ItemType, lat: f64, lng: f64) -> Stop {
    Stop {
        id: id.to_string(),
        title: title.to_string(),
        item_type,
        coordinates: Some(LatLng::new(lat, lng)),
        scheduled_time: None,
    }
}

/// A stop without coordinates (a note, a reservation without an
/// address, etc.).
pub fn unlocated(id: &str, title: &str, item_type: ItemType) -> Stop {
    Stop {
        id: id.to_string(),
        title: title.to_string(),
        item_type,
        coordinates: None,
        scheduled_time: None,
    }
}

pub fn hotel_poblado() -> Stop {
    stop("hotel", "Hotel in El Poblado", ItemType::Lodging, 6.2088, -75.5679)
}

pub fn museo_antioquia() -> Stop {
    stop("museo", "Museo de Antioquia", ItemType::Event, 6.2526, -75.5686)
}

pub fn jardin_botanico() -> Stop {
    stop("jardin", "Jardín Botánico", ItemType::Activity, 6.2703, -75.5658)
}

pub fn pueblito_paisa() -> Stop {
    stop("pueblito", "Pueblito Paisa", ItemType::Activity, 6.2359, -75.5804)
}

pub fn comuna_13() -> Stop {
    stop("comuna13", "Comuna 13 Graffiti Tour", ItemType::Activity, 6.2529, -75.6190)
}

pub fn lunch_laureles() -> Stop {
    stop("lunch", "Lunch in Laureles", ItemType::Dining, 6.2449, -75.5920)
}

/// A plausible sightseeing day: hotel in the south, sights clustered
/// around the center and northwest.
pub fn sightseeing_day() -> Vec<Stop> {
    vec![
        hotel_poblado(),
        jardin_botanico(),
        comuna_13(),
        museo_antioquia(),
        lunch_laureles(),
        pueblito_paisa(),
    ]
}
