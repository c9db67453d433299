pub mod medellin_stops;
