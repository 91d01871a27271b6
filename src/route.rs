//! Depot-framed route representation.
//!
//! A route is stored as decoded coordinates. Rendering to a map link happens
//! at the boundary (when handing trips to drivers), not within the planner.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::haversine::DistanceCache;
use crate::tsp::route_distance;

/// An ordered visiting sequence that starts and ends at the depot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    points: Vec<Coordinate>,
}

impl Route {
    /// Creates a route from a full `[depot, ...stops, depot]` sequence.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Frames `stops` with the depot at both ends.
    pub fn from_stops(depot: Coordinate, stops: impl IntoIterator<Item = Coordinate>) -> Self {
        let mut points = vec![depot];
        points.extend(stops);
        points.push(depot);
        Self { points }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Interior points, without the depot anchors.
    pub fn stops(&self) -> &[Coordinate] {
        if self.points.len() < 2 {
            return &[];
        }
        &self.points[1..self.points.len() - 1]
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total length in kilometers.
    pub fn distance(&self, cache: &DistanceCache) -> f64 {
        route_distance(&self.points, cache)
    }

    /// Points rendered as `lat,lng/lat,lng/...` for directions links.
    pub fn map_path(&self) -> String {
        self.points
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Full directions link under `base_url`.
    pub fn map_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.map_path())
    }
}
