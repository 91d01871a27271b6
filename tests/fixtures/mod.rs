//! Test fixtures for trip-planner.
//!
//! Provides realistic test data including:
//! - West Hyderabad delivery locations around the production depot
//! - A `Delivery` implementation with a small builder
//!
//! Each test binary uses a different subset of these helpers.

#![allow(dead_code)]

pub mod hyderabad_locations;

pub use hyderabad_locations::*;

use trip_planner::{Coordinate, Delivery};

/// Caller-side delivery used across integration tests.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: String,
    pub location: Coordinate,
}

impl Order {
    pub fn new(id: &str, lat: f64, lng: f64) -> Self {
        Self {
            id: id.to_string(),
            location: Coordinate::new(lat, lng),
        }
    }

    pub fn at(id: &str, location: &Location) -> Self {
        Self::new(id, location.lat, location.lng)
    }
}

impl Delivery for Order {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }

    fn location(&self) -> Coordinate {
        self.location
    }
}
