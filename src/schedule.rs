//! Estimated arrival schedule for a planned trip.
//!
//! Leg times come from straight-line distance at an assumed speed, so they
//! are a rough stand-in for a directions service. Times are seconds from
//! midnight.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::haversine::{DistanceCache, TravelSpeed, DEFAULT_SPEED_KMH};
use crate::route::Route;

const SECONDS_PER_DAY: i32 = 24 * 3600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleOptions {
    pub speed_kmh: f64,
    /// Departure from the depot.
    pub start_time: i32,
    /// Dwell at each stop before the next leg.
    pub buffer_minutes: i32,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
            start_time: 9 * 3600,
            buffer_minutes: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledLeg {
    /// 1-based leg number.
    pub stop: usize,
    pub from: Coordinate,
    pub to: Coordinate,
    pub distance_km: f64,
    pub travel_seconds: i32,
    pub eta_start: i32,
    pub eta_end: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSchedule {
    pub legs: Vec<ScheduledLeg>,
    pub trip_start: i32,
    pub trip_end: i32,
    pub total_distance_km: f64,
    /// Travel plus dwell time.
    pub total_seconds: i32,
}

/// Walks `route` leg by leg, adding the dwell buffer after every leg but the
/// last. Clock arithmetic saturates at `i32::MAX`.
pub fn schedule_trip(route: &Route, cache: &DistanceCache, options: &ScheduleOptions) -> TripSchedule {
    let speed = TravelSpeed::new(options.speed_kmh);
    let buffer_seconds = options.buffer_minutes.saturating_mul(60);
    let points = route.points();
    let leg_count = points.len().saturating_sub(1);

    let mut legs = Vec::with_capacity(leg_count);
    let mut time = options.start_time;
    let mut total_distance_km = 0.0;

    for (idx, pair) in points.windows(2).enumerate() {
        let distance_km = cache.distance(pair[0], pair[1]);
        let travel_seconds = speed.km_to_seconds(distance_km);
        let eta_start = time;
        time = time.saturating_add(travel_seconds);
        total_distance_km += distance_km;

        legs.push(ScheduledLeg {
            stop: idx + 1,
            from: pair[0],
            to: pair[1],
            distance_km,
            travel_seconds,
            eta_start,
            eta_end: time,
        });

        if idx + 1 < leg_count {
            time = time.saturating_add(buffer_seconds);
        }
    }

    TripSchedule {
        legs,
        trip_start: options.start_time,
        trip_end: time,
        total_distance_km,
        total_seconds: time.saturating_sub(options.start_time),
    }
}

/// Formats seconds from midnight as a 12-hour clock time, e.g. `1:05 PM`.
pub fn format_clock(seconds: i32) -> String {
    let seconds = seconds.rem_euclid(SECONDS_PER_DAY);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let suffix = if hours >= 12 { "PM" } else { "AM" };
    let display_hour = if hours % 12 == 0 { 12 } else { hours % 12 };
    format!("{}:{:02} {}", display_hour, minutes, suffix)
}

/// Formats a duration as `N hrs M mins`.
pub fn format_duration(seconds: i32) -> String {
    let total_minutes = seconds / 60;
    format!("{} hrs {} mins", total_minutes / 60, total_minutes % 60)
}
