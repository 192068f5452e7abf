//! Text fixtures shared by the unit tests.

use heading_core::{CellKind, Grid, Point};
use rand::Rng;
use rand::rngs::StdRng;

use crate::traits::{Cost, StateSpace, UNREACHABLE};

/// Build a grid from text: `#` is blocked, anything else is free.
pub(crate) fn grid(text: &str) -> Grid {
    let rows = text
        .trim()
        .lines()
        .map(|line| {
            line.chars()
                .map(|ch| if ch == '#' { CellKind::Blocked } else { CellKind::Free })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    Grid::from_rows(rows).unwrap()
}

/// Position of the first occurrence of `marker` in `text`.
pub(crate) fn find(text: &str, marker: char) -> Point {
    for (y, line) in text.trim().lines().enumerate() {
        if let Some(x) = line.chars().position(|ch| ch == marker) {
            return Point::new(x as i32, y as i32);
        }
    }
    panic!("marker {marker:?} not in fixture");
}

/// A `w` × `h` grid where each cell is blocked with probability `density`.
pub(crate) fn random_grid(rng: &mut StdRng, w: i32, h: i32, density: f64) -> Grid {
    Grid::from_fn(w, h, |_| {
        if rng.random_bool(density) {
            CellKind::Blocked
        } else {
            CellKind::Free
        }
    })
}

/// A uniformly chosen free cell, or `None` if the grid is fully blocked.
pub(crate) fn random_free(rng: &mut StdRng, g: &Grid) -> Option<Point> {
    let free: Vec<Point> = g.iter().filter(|(_, c)| c.is_free()).map(|(p, _)| p).collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}

/// Distances by repeated relaxation of every transition until nothing
/// changes. Slow, but independent of any frontier ordering.
pub(crate) fn relaxed_distances<S: StateSpace>(space: &S, source: S::State) -> Vec<Cost> {
    let n = space.state_count();
    let mut dist = vec![UNREACHABLE; n];
    let Some(si) = space.index(source) else {
        return dist;
    };
    dist[si] = 0;

    let mut buf = Vec::new();
    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..n {
            if dist[i] == UNREACHABLE {
                continue;
            }
            buf.clear();
            space.successors(space.state(i), &mut buf);
            for &(ns, cost) in &buf {
                let Some(j) = space.index(ns) else {
                    continue;
                };
                if dist[i] + cost < dist[j] {
                    dist[j] = dist[i] + cost;
                    changed = true;
                }
            }
        }
    }
    dist
}
