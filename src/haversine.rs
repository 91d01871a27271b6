//! Haversine distance oracle.
//!
//! Uses great-circle distance as the routing cost. Less accurate than a road
//! network (ignores roads) but needs no external service.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::coordinate::Coordinate;

/// Average riding speed assumption for time estimation.
pub const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate haversine distance between two points in kilometers.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

type PairKey = ((u64, u64), (u64, u64));

/// Memoized haversine distances for one planning run.
///
/// Keyed by the unordered coordinate pair, so `distance(a, b)` and
/// `distance(b, a)` share one entry. The memo only saves work: clearing it
/// never changes a returned value.
#[derive(Debug, Default)]
pub struct DistanceCache {
    memo: RwLock<HashMap<PairKey, f64>>,
}

impl DistanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached great-circle distance in kilometers.
    pub fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        let (first, second) = if a.key() <= b.key() { (a, b) } else { (b, a) };
        let key = (first.key(), second.key());

        if let Ok(memo) = self.memo.read() {
            if let Some(&d) = memo.get(&key) {
                return d;
            }
        }

        // Always computed in canonical order so a recomputation after
        // `clear` is bit-identical regardless of argument order.
        let d = haversine_km(first, second);
        if let Ok(mut memo) = self.memo.write() {
            memo.insert(key, d);
        }
        d
    }

    pub fn clear(&self) {
        if let Ok(mut memo) = self.memo.write() {
            memo.clear();
        }
    }

    /// Number of memoized pairs.
    pub fn len(&self) -> usize {
        self.memo.read().map(|memo| memo.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Converts straight-line distance into travel time at an assumed speed.
#[derive(Debug, Clone)]
pub struct TravelSpeed {
    /// Assumed average speed in km/h.
    pub speed_kmh: f64,
}

impl Default for TravelSpeed {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl TravelSpeed {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Convert distance in km to travel time in seconds.
    pub fn km_to_seconds(&self, km: f64) -> i32 {
        let hours = km / self.speed_kmh;
        (hours * 3600.0).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point() {
        let p = Coordinate::new(17.4575596, 78.3052356);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Las Vegas to Los Angeles, actual distance ~370 km
        let dist = haversine_km(Coordinate::new(36.17, -115.14), Coordinate::new(34.05, -118.24));
        assert!(dist > 350.0 && dist < 400.0, "LV to LA should be ~370km, got {}", dist);
    }

    #[test]
    fn test_one_degree_of_longitude_on_equator() {
        let dist = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!((dist - 111.195).abs() < 0.01, "got {}", dist);
    }

    #[test]
    fn test_cache_is_symmetric() {
        let cache = DistanceCache::new();
        let a = Coordinate::new(17.44, 78.35);
        let b = Coordinate::new(17.49, 78.41);

        let ab = cache.distance(a, b);
        let ba = cache.distance(b, a);
        assert_eq!(ab.to_bits(), ba.to_bits());
        assert_eq!(cache.len(), 1, "Both orderings should share one entry");
    }

    #[test]
    fn test_clear_does_not_change_results() {
        let cache = DistanceCache::new();
        let a = Coordinate::new(17.44, 78.35);
        let b = Coordinate::new(17.49, 78.41);

        let before = cache.distance(b, a);
        cache.clear();
        assert!(cache.is_empty());
        let after = cache.distance(a, b);
        assert_eq!(before.to_bits(), after.to_bits());
    }

    #[test]
    fn test_collinear_segments_sum() {
        let cache = DistanceCache::new();
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 1.0);
        let c = Coordinate::new(0.0, 2.0);
        let sum = cache.distance(a, b) + cache.distance(b, c);
        assert!((sum - cache.distance(a, c)).abs() < 1e-9);
    }

    #[test]
    fn test_reasonable_travel_time() {
        let speed = TravelSpeed::new(40.0);
        // 10 km at 40 km/h = 0.25 hours = 900 seconds
        assert_eq!(speed.km_to_seconds(10.0), 900);
    }
}
