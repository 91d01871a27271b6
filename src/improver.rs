//! Cross-cluster local search: relocate and swap.
//!
//! Every candidate move is evaluated on working copies of the two affected
//! clusters' coordinates, re-optimizing both routes from scratch. The first
//! improving move found is committed and the scan restarts from the first
//! cluster.

use rayon::prelude::*;
use tracing::debug;

use crate::coordinate::Coordinate;
use crate::haversine::DistanceCache;
use crate::solver::PlanOptions;
use crate::traits::{Cluster, Delivery};
use crate::tsp::{optimized_order, tour_distance};

/// Minimum reduction of the fleet total for a move to be accepted.
const MOVE_EPSILON: f64 = 1e-6;

/// Outcome of [`improve_clusters`].
#[derive(Debug, Clone)]
pub struct Improvement<'a, D> {
    pub clusters: Vec<Cluster<'a, D>>,
    /// True if at least one move was accepted.
    pub improved: bool,
    pub relocations: usize,
    pub swaps: usize,
    pub outer_iterations: usize,
}

/// Optimized closed-tour distance for a set of stops.
fn stops_distance(depot: Coordinate, stops: &[Coordinate], cache: &DistanceCache, options: &PlanOptions) -> f64 {
    let order = optimized_order(depot, stops, cache, options.max_two_opt_passes);
    tour_distance(depot, stops, &order, cache)
}

fn locations<D: Delivery>(cluster: &[&D]) -> Vec<Coordinate> {
    cluster.iter().map(|delivery| delivery.location()).collect()
}

/// Optimized route distance of every cluster, in cluster order.
pub fn cluster_distances<D>(
    clusters: &[Cluster<'_, D>],
    depot: Coordinate,
    options: &PlanOptions,
    cache: &DistanceCache,
) -> Vec<f64>
where
    D: Delivery + Sync,
{
    if options.parallel {
        clusters
            .par_iter()
            .map(|cluster| stops_distance(depot, &locations(cluster), cache, options))
            .collect()
    } else {
        clusters
            .iter()
            .map(|cluster| stops_distance(depot, &locations(cluster), cache, options))
            .collect()
    }
}

/// Sum of optimized route distances over all clusters.
pub fn total_distance<D>(
    clusters: &[Cluster<'_, D>],
    depot: Coordinate,
    options: &PlanOptions,
    cache: &DistanceCache,
) -> f64
where
    D: Delivery + Sync,
{
    cluster_distances(clusters, depot, options, cache).iter().sum()
}

struct Relocation {
    from: usize,
    index: usize,
    to: usize,
    from_dist: f64,
    to_dist: f64,
}

fn find_relocation<D: Delivery>(
    clusters: &[Cluster<'_, D>],
    dists: &[f64],
    total: f64,
    depot: Coordinate,
    options: &PlanOptions,
    cache: &DistanceCache,
) -> Option<Relocation> {
    let capacity = options.max_waypoints.get();

    for (from, source) in clusters.iter().enumerate() {
        for index in 0..source.len() {
            let item = source[index].location();

            for (to, target) in clusters.iter().enumerate() {
                if to == from || target.len() + 1 > capacity {
                    continue;
                }

                let mut new_from = locations(source);
                new_from.remove(index);
                let mut new_to = locations(target);
                new_to.push(item);

                let from_dist = stops_distance(depot, &new_from, cache, options);
                let to_dist = stops_distance(depot, &new_to, cache, options);
                let new_total = total - dists[from] - dists[to] + from_dist + to_dist;

                if new_total + MOVE_EPSILON < total {
                    return Some(Relocation {
                        from,
                        index,
                        to,
                        from_dist,
                        to_dist,
                    });
                }
            }
        }
    }

    None
}

/// Moves single deliveries into other clusters with spare capacity while
/// that shortens the fleet total.
///
/// Returns the number of accepted moves.
pub fn try_relocate<D>(
    clusters: &mut [Cluster<'_, D>],
    depot: Coordinate,
    options: &PlanOptions,
    cache: &DistanceCache,
) -> usize
where
    D: Delivery + Sync,
{
    let mut dists = cluster_distances(clusters, depot, options, cache);
    let mut total: f64 = dists.iter().sum();
    let mut moves = 0;

    for _ in 0..options.max_move_iterations {
        let Some(m) = find_relocation(clusters, &dists, total, depot, options, cache) else {
            break;
        };

        let delivery = clusters[m.from].remove(m.index);
        clusters[m.to].push(delivery);

        total = total - dists[m.from] - dists[m.to] + m.from_dist + m.to_dist;
        dists[m.from] = m.from_dist;
        dists[m.to] = m.to_dist;
        moves += 1;

        debug!(from = m.from, to = m.to, total_km = total, "relocated delivery");
    }

    moves
}

struct Exchange {
    a: usize,
    i: usize,
    b: usize,
    j: usize,
    a_dist: f64,
    b_dist: f64,
}

fn find_swap<D: Delivery>(
    clusters: &[Cluster<'_, D>],
    dists: &[f64],
    total: f64,
    depot: Coordinate,
    options: &PlanOptions,
    cache: &DistanceCache,
) -> Option<Exchange> {
    for a in 0..clusters.len() {
        for b in a + 1..clusters.len() {
            let (cluster_a, cluster_b) = (&clusters[a], &clusters[b]);

            for i in 0..cluster_a.len() {
                for j in 0..cluster_b.len() {
                    let mut new_a = locations(cluster_a);
                    new_a[i] = cluster_b[j].location();
                    let mut new_b = locations(cluster_b);
                    new_b[j] = cluster_a[i].location();

                    let a_dist = stops_distance(depot, &new_a, cache, options);
                    let b_dist = stops_distance(depot, &new_b, cache, options);
                    let new_total = total - dists[a] - dists[b] + a_dist + b_dist;

                    if new_total + MOVE_EPSILON < total {
                        return Some(Exchange {
                            a,
                            i,
                            b,
                            j,
                            a_dist,
                            b_dist,
                        });
                    }
                }
            }
        }
    }

    None
}

/// Exchanges one delivery between two clusters while that shortens the
/// fleet total. Cluster sizes never change.
///
/// Returns the number of accepted moves.
pub fn try_swap<D>(
    clusters: &mut [Cluster<'_, D>],
    depot: Coordinate,
    options: &PlanOptions,
    cache: &DistanceCache,
) -> usize
where
    D: Delivery + Sync,
{
    let mut dists = cluster_distances(clusters, depot, options, cache);
    let mut total: f64 = dists.iter().sum();
    let mut moves = 0;

    for _ in 0..options.max_move_iterations {
        let Some(x) = find_swap(clusters, &dists, total, depot, options, cache) else {
            break;
        };

        let moved = clusters[x.a][x.i];
        clusters[x.a][x.i] = clusters[x.b][x.j];
        clusters[x.b][x.j] = moved;

        total = total - dists[x.a] - dists[x.b] + x.a_dist + x.b_dist;
        dists[x.a] = x.a_dist;
        dists[x.b] = x.b_dist;
        moves += 1;

        debug!(a = x.a, b = x.b, total_km = total, "swapped deliveries");
    }

    moves
}

/// Alternates relocate and swap passes until neither accepts a move or
/// `max_outer_iterations` is reached.
pub fn improve_clusters<'a, D>(
    mut clusters: Vec<Cluster<'a, D>>,
    depot: Coordinate,
    options: &PlanOptions,
    cache: &DistanceCache,
) -> Improvement<'a, D>
where
    D: Delivery + Sync,
{
    let mut relocations = 0;
    let mut swaps = 0;
    let mut outer_iterations = 0;
    let mut changed = true;

    while changed && outer_iterations < options.max_outer_iterations {
        outer_iterations += 1;

        let relocated = try_relocate(&mut clusters, depot, options, cache);
        let swapped = try_swap(&mut clusters, depot, options, cache);
        relocations += relocated;
        swaps += swapped;
        changed = relocated > 0 || swapped > 0;

        debug!(outer_iterations, relocated, swapped, "improvement round");
    }

    Improvement {
        clusters,
        improved: relocations + swaps > 0,
        relocations,
        swaps,
        outer_iterations,
    }
}
