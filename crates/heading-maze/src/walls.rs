//! Brute-force savings from removing a single wall.
//!
//! Each candidate wall is cleared in turn and the route is re-solved from
//! scratch. This is the slow counterpart of
//! [`count_shortcuts`](heading_paths::count_shortcuts) with a detour of 2.

use heading_core::{CellKind, Grid, Point};
use heading_paths::{PlainGrid, ShortcutCounts, shortest_distance};

/// Blocked cells whose left and right, or up and down, neighbours are both
/// free, in row-major order.
pub fn removable_walls(grid: &Grid) -> Vec<Point> {
    grid.iter()
        .filter(|&(_, kind)| kind == CellKind::Blocked)
        .map(|(p, _)| p)
        .filter(|&p| {
            let free = |dx, dy| grid.is_passable(p.shift(dx, dy));
            (free(-1, 0) && free(1, 0)) || (free(0, -1) && free(0, 1))
        })
        .collect()
}

/// Tally, for each [removable wall](removable_walls), how much clearing it
/// shortens the route from `source` to `target`. Gains below `min_gain` are
/// dropped. Returns `None` if the route does not exist to begin with.
pub fn wall_removal_gains(
    grid: &Grid,
    source: Point,
    target: Point,
    min_gain: i64,
) -> Option<ShortcutCounts> {
    let baseline = shortest_distance(&PlainGrid::new(grid), source, target)?;
    let walls = removable_walls(grid);
    let mut counts = ShortcutCounts::default();

    for &wall in &walls {
        let opened = grid.with_free(wall);
        let Some(d) = shortest_distance(&PlainGrid::new(&opened), source, target) else {
            continue;
        };
        let gain = baseline as i64 - d as i64;
        if gain >= min_gain {
            counts.record(gain);
        }
    }

    log::debug!(
        "walls: {} of {} removals save at least {}",
        counts.total,
        walls.len(),
        min_gain
    );
    Some(counts)
}
