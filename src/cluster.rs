//! Initial partitioning of deliveries into capacity-bounded clusters.

use std::num::NonZeroUsize;

use crate::coordinate::Coordinate;
use crate::haversine::DistanceCache;
use crate::traits::{Cluster, Delivery};

/// Bands deliveries by distance from the depot.
///
/// Deliveries are stably sorted by ascending depot distance and sliced into
/// consecutive chunks of `max_waypoints`; only the last chunk may be smaller.
pub fn cluster_by_distance_from_depot<'a, D: Delivery>(
    deliveries: &'a [D],
    depot: Coordinate,
    max_waypoints: NonZeroUsize,
    cache: &DistanceCache,
) -> Vec<Cluster<'a, D>> {
    let mut keyed: Vec<(f64, &'a D)> = deliveries
        .iter()
        .map(|delivery| (cache.distance(depot, delivery.location()), delivery))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

    keyed
        .chunks(max_waypoints.get())
        .map(|chunk| chunk.iter().map(|&(_, delivery)| delivery).collect())
        .collect()
}
