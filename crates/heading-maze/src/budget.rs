//! Obstacle budgets: how many falling obstacles a route survives.
//!
//! Obstacles land one at a time in a fixed order on an initially open grid.
//! Blocking cells never shortens a route, so reachability flips from
//! reachable to unreachable at most once along the sequence and the flip
//! point can be found by bisection, re-solving from scratch at each probe.

use std::collections::HashSet;

use heading_core::{CellKind, Grid, Point};
use heading_paths::{Cost, PlainGrid, shortest_distance};

/// A `width` × `height` grid with every point of `obstacles` blocked.
/// Points outside the grid are ignored.
pub fn obstacle_grid(width: i32, height: i32, obstacles: &[Point]) -> Grid {
    let blocked: HashSet<Point> = obstacles.iter().copied().collect();
    Grid::from_fn(width, height, |p| {
        if blocked.contains(&p) {
            CellKind::Blocked
        } else {
            CellKind::Free
        }
    })
}

/// Shortest step distance after the first `n` obstacles have landed.
pub fn distance_after(
    width: i32,
    height: i32,
    obstacles: &[Point],
    n: usize,
    source: Point,
    target: Point,
) -> Option<Cost> {
    let grid = obstacle_grid(width, height, &obstacles[..n.min(obstacles.len())]);
    shortest_distance(&PlainGrid::new(&grid), source, target)
}

/// Index and position of the first obstacle whose landing cuts `source`
/// off from `target`.
///
/// Returns `None` when the route survives every obstacle, or when it is
/// already impossible before any obstacle lands.
pub fn first_blocking(
    width: i32,
    height: i32,
    obstacles: &[Point],
    source: Point,
    target: Point,
) -> Option<(usize, Point)> {
    let reachable = |n: usize| {
        let d = distance_after(width, height, obstacles, n, source, target);
        log::debug!("budget: {}/{} obstacles -> {:?}", n, obstacles.len(), d);
        d.is_some()
    };

    if !reachable(0) || reachable(obstacles.len()) {
        return None;
    }

    // Invariant: reachable(lo) && !reachable(hi).
    let (mut lo, mut hi) = (0, obstacles.len());
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if reachable(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Some((hi - 1, obstacles[hi - 1]))
}
