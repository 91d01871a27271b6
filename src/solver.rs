//! Trip planner: partition, improve, then finalize one route per cluster.

use std::num::NonZeroUsize;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cluster::cluster_by_distance_from_depot;
use crate::coordinate::Coordinate;
use crate::error::PlanError;
use crate::haversine::DistanceCache;
use crate::improver::improve_clusters;
use crate::route::Route;
use crate::traits::{Cluster, Delivery};
use crate::tsp::{optimized_order, MAX_TWO_OPT_PASSES};

/// Stops per trip used in production.
const DEFAULT_MAX_WAYPOINTS: NonZeroUsize = NonZeroUsize::new(18).unwrap();

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanOptions {
    /// Maximum deliveries per trip.
    pub max_waypoints: NonZeroUsize,
    /// Maximum relocate/swap alternations.
    pub max_outer_iterations: usize,
    /// Maximum accepted moves per relocate or swap pass.
    pub max_move_iterations: usize,
    /// Maximum 2-opt passes per route optimization.
    pub max_two_opt_passes: usize,
    /// Optimize independent clusters' routes on the rayon pool.
    pub parallel: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            max_waypoints: DEFAULT_MAX_WAYPOINTS,
            max_outer_iterations: 50,
            max_move_iterations: 1000,
            max_two_opt_passes: MAX_TWO_OPT_PASSES,
            parallel: true,
        }
    }
}

impl PlanOptions {
    /// Loads options from a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        serde_json::from_str(json).map_err(|e| PlanError::Config(e.to_string()))
    }
}

/// One vehicle's finalized work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip<Id> {
    /// Cluster membership, in cluster order.
    pub delivery_ids: Vec<Id>,
    /// Same deliveries in visiting order.
    pub stop_ids: Vec<Id>,
    pub route: Route,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanResult<Id> {
    pub trips: Vec<Trip<Id>>,
    pub total_distance_km: f64,
}

/// Plans trips for `deliveries` out of `depot` with a fresh distance cache.
///
/// Every coordinate is validated up front; the first invalid one aborts the
/// run. The result holds one trip per final cluster, so a cluster emptied
/// during improvement still appears as a zero-distance depot round trip.
pub fn plan<D>(depot: Coordinate, deliveries: &[D], options: &PlanOptions) -> Result<PlanResult<D::Id>, PlanError>
where
    D: Delivery + Sync,
    D::Id: Send,
{
    let cache = DistanceCache::new();
    plan_with_cache(depot, deliveries, options, &cache)
}

/// Same as [`plan`], memoizing distances in a caller-owned cache.
pub fn plan_with_cache<D>(
    depot: Coordinate,
    deliveries: &[D],
    options: &PlanOptions,
    cache: &DistanceCache,
) -> Result<PlanResult<D::Id>, PlanError>
where
    D: Delivery + Sync,
    D::Id: Send,
{
    depot.validate().map_err(PlanError::InvalidDepot)?;
    for (position, delivery) in deliveries.iter().enumerate() {
        delivery
            .location()
            .validate()
            .map_err(|source| PlanError::InvalidDelivery { position, source })?;
    }

    let clusters = cluster_by_distance_from_depot(deliveries, depot, options.max_waypoints, cache);
    debug!(deliveries = deliveries.len(), clusters = clusters.len(), "initial partition");

    let improvement = improve_clusters(clusters, depot, options, cache);
    debug!(
        relocations = improvement.relocations,
        swaps = improvement.swaps,
        outer_iterations = improvement.outer_iterations,
        "clusters improved"
    );

    let trips = build_trips(&improvement.clusters, depot, options, cache);

    let total_distance_km = trips.iter().map(|trip| trip.distance_km).sum();
    info!("Planned {} trips, total distance {:.2} km", trips.len(), total_distance_km);

    Ok(PlanResult {
        trips,
        total_distance_km,
    })
}

/// One trip per cluster, in cluster order. A cluster emptied by relocation
/// yields the trivial `[depot, depot]` route at distance 0.
fn build_trips<D>(
    clusters: &[Cluster<'_, D>],
    depot: Coordinate,
    options: &PlanOptions,
    cache: &DistanceCache,
) -> Vec<Trip<D::Id>>
where
    D: Delivery + Sync,
    D::Id: Send,
{
    if options.parallel {
        clusters
            .par_iter()
            .map(|cluster| build_trip(cluster, depot, options, cache))
            .collect()
    } else {
        clusters
            .iter()
            .map(|cluster| build_trip(cluster, depot, options, cache))
            .collect()
    }
}

fn build_trip<D: Delivery>(
    cluster: &[&D],
    depot: Coordinate,
    options: &PlanOptions,
    cache: &DistanceCache,
) -> Trip<D::Id> {
    let stops: Vec<Coordinate> = cluster.iter().map(|delivery| delivery.location()).collect();
    let order = optimized_order(depot, &stops, cache, options.max_two_opt_passes);

    let route = Route::from_stops(depot, order.iter().map(|&i| stops[i]));
    let distance_km = route.distance(cache);

    Trip {
        delivery_ids: cluster.iter().map(|delivery| delivery.id().clone()).collect(),
        stop_ids: order.iter().map(|&i| cluster[i].id().clone()).collect(),
        route,
        distance_km,
    }
}
