//! Single-route optimizer: nearest-neighbor construction plus 2-opt.
//!
//! Works on indices into a stop slice so callers can map the visiting order
//! back to their own deliveries. The depot anchors are never reordered.

use tracing::trace;

use crate::coordinate::Coordinate;
use crate::haversine::DistanceCache;

/// Upper bound on full 2-opt passes per route.
pub const MAX_TWO_OPT_PASSES: usize = 1000;

/// Minimum gain for a 2-opt reversal to count as an improvement.
const TWO_OPT_EPSILON: f64 = 1e-9;

/// Greedy tour construction from `start`.
///
/// Ties go to the lowest stop index.
pub fn nearest_neighbor_order(start: Coordinate, stops: &[Coordinate], cache: &DistanceCache) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..stops.len()).collect();
    let mut order = Vec::with_capacity(stops.len());
    let mut current = start;

    while !remaining.is_empty() {
        let mut best_pos = 0;
        let mut best_dist = cache.distance(current, stops[remaining[0]]);
        for (pos, &idx) in remaining.iter().enumerate().skip(1) {
            let d = cache.distance(current, stops[idx]);
            if d < best_dist {
                best_dist = d;
                best_pos = pos;
            }
        }
        let next = remaining.remove(best_pos);
        current = stops[next];
        order.push(next);
    }

    order
}

/// 2-opt refinement of `order` in place, anchored at `start` and `end`.
///
/// Returns the number of passes run.
pub fn two_opt(
    start: Coordinate,
    end: Coordinate,
    stops: &[Coordinate],
    order: &mut [usize],
    cache: &DistanceCache,
    max_passes: usize,
) -> usize {
    let n = order.len();
    let mut passes = 0;
    let mut improved = true;

    while improved && passes < max_passes {
        passes += 1;
        improved = false;

        for i in 0..n.saturating_sub(1) {
            for j in i + 1..n {
                let a = if i == 0 { start } else { stops[order[i - 1]] };
                let b = stops[order[i]];
                let c = stops[order[j]];
                let d = if j == n - 1 { end } else { stops[order[j + 1]] };

                let old_dist = cache.distance(a, b) + cache.distance(c, d);
                let new_dist = cache.distance(a, c) + cache.distance(b, d);
                if new_dist + TWO_OPT_EPSILON < old_dist {
                    order[i..=j].reverse();
                    improved = true;
                }
            }
        }
    }

    trace!(stops = n, passes, "2-opt finished");
    passes
}

/// Visiting order for `stops` on a closed tour from and back to `depot`.
pub fn optimized_order(
    depot: Coordinate,
    stops: &[Coordinate],
    cache: &DistanceCache,
    max_passes: usize,
) -> Vec<usize> {
    anchored_order(depot, depot, stops, cache, max_passes)
}

fn anchored_order(
    start: Coordinate,
    end: Coordinate,
    stops: &[Coordinate],
    cache: &DistanceCache,
    max_passes: usize,
) -> Vec<usize> {
    if stops.len() <= 1 {
        return (0..stops.len()).collect();
    }

    let mut order = nearest_neighbor_order(start, stops, cache);
    two_opt(start, end, stops, &mut order, cache, max_passes);
    order
}

/// Reorders the interior of `[depot, ...stops, depot]`.
///
/// The first and last elements are kept as anchors. Routes with fewer than
/// two stops come back unchanged.
pub fn optimized_route(route: &[Coordinate], cache: &DistanceCache) -> Vec<Coordinate> {
    if route.len() <= 3 {
        return route.to_vec();
    }

    let start = route[0];
    let end = route[route.len() - 1];
    let stops = &route[1..route.len() - 1];
    let order = anchored_order(start, end, stops, cache, MAX_TWO_OPT_PASSES);

    let mut out = Vec::with_capacity(route.len());
    out.push(start);
    out.extend(order.iter().map(|&i| stops[i]));
    out.push(end);
    out
}

/// Sum of leg distances along `route`, in kilometers.
pub fn route_distance(route: &[Coordinate], cache: &DistanceCache) -> f64 {
    if route.len() < 2 {
        return 0.0;
    }
    route.windows(2).map(|leg| cache.distance(leg[0], leg[1])).sum()
}

/// Distance of the closed tour `depot -> stops[order] -> depot`.
pub fn tour_distance(depot: Coordinate, stops: &[Coordinate], order: &[usize], cache: &DistanceCache) -> f64 {
    let mut total = 0.0;
    let mut current = depot;
    for &i in order {
        total += cache.distance(current, stops[i]);
        current = stops[i];
    }
    total + cache.distance(current, depot)
}
