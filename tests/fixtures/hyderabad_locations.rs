//! West Hyderabad neighborhoods for realistic test fixtures.
//!
//! Coordinates are neighborhood centroids, accurate to a few hundred meters.

use trip_planner::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// Kitchen all trips start from and return to.
pub const DEPOT: Location = Location::new("Kitchen", 17.4575596, 78.3052356);

// ============================================================================
// Delivery neighborhoods
// ============================================================================

pub const NORTH: &[Location] = &[
    Location::new("Lingampally", 17.4930, 78.3170),
    Location::new("Chandanagar", 17.4950, 78.3300),
    Location::new("Miyapur", 17.4969, 78.3578),
    Location::new("Nallagandla", 17.4700, 78.3100),
    Location::new("Kondapur", 17.4700, 78.3570),
    Location::new("Kukatpally", 17.4849, 78.4138),
];

pub const SOUTH: &[Location] = &[
    Location::new("Gachibowli", 17.4401, 78.3489),
    Location::new("Nanakramguda", 17.4156, 78.3418),
    Location::new("Manikonda", 17.4020, 78.3860),
    Location::new("Narsingi", 17.3870, 78.3550),
    Location::new("Kokapet", 17.3960, 78.3340),
    Location::new("Financial District", 17.4136, 78.3390),
];

pub const EAST: &[Location] = &[
    Location::new("HITEC City", 17.4435, 78.3772),
    Location::new("Madhapur", 17.4483, 78.3915),
    Location::new("Jubilee Hills", 17.4326, 78.4071),
    Location::new("Banjara Hills", 17.4156, 78.4347),
    Location::new("Film Nagar", 17.4140, 78.4090),
    Location::new("Shaikpet", 17.4020, 78.4030),
];

pub const WEST: &[Location] = &[
    Location::new("Tellapur", 17.4630, 78.2830),
    Location::new("Osman Nagar", 17.4480, 78.2700),
    Location::new("Gopanpally", 17.4460, 78.3150),
    Location::new("Kollur", 17.4390, 78.2560),
];

/// Every delivery neighborhood.
pub fn all_locations() -> Vec<Location> {
    NORTH
        .iter()
        .chain(SOUTH)
        .chain(EAST)
        .chain(WEST)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_in_hyderabad_area() {
        for loc in all_locations() {
            assert!(loc.lat > 17.3 && loc.lat < 17.6, "{} lat out of range: {}", loc.name, loc.lat);
            assert!(loc.lng > 78.2 && loc.lng < 78.5, "{} lng out of range: {}", loc.name, loc.lng);
        }
    }
}
