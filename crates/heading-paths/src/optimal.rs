//! Path reconstruction from a solve's predecessor multimap.

use std::collections::HashSet;
use std::fmt;

use heading_core::Point;

use crate::dijkstra::{PredecessorMap, SolveResult};
use crate::traits::StateSpace;

/// Errors from path queries against a [`SolveResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// The solve ran with `track_predecessors` off.
    PredecessorsNotTracked,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PredecessorsNotTracked => {
                write!(f, "path query needs a solve with predecessor tracking")
            }
        }
    }
}

impl std::error::Error for PathError {}

fn tracked<'r, 's, S: StateSpace>(
    result: &'r SolveResult<'s, S>,
) -> Result<&'r PredecessorMap<'s, S>, PathError> {
    result
        .predecessors
        .as_ref()
        .ok_or(PathError::PredecessorsNotTracked)
}

/// Ids of the states at `target` whose cost equals the cheapest one.
fn best_targets<S: StateSpace>(result: &SolveResult<'_, S>, target: Point) -> Vec<usize> {
    let table = &result.distances;
    let Some(best) = table.min_at(target) else {
        return Vec::new();
    };
    let mut buf = Vec::new();
    table.space.variants(target, &mut buf);
    buf.into_iter()
        .filter_map(|s| table.space.index(s))
        .filter(|&i| table.at_index(i) == Some(best))
        .collect()
}

/// Every cell lying on at least one minimum-cost path from `source` to
/// `target`.
///
/// Walks the predecessor multimap backward from each cheapest variant of
/// `target`, visiting each state once. Facing is discarded. An unreachable
/// target yields an empty set.
pub fn optimal_cells<S: StateSpace>(
    result: &SolveResult<'_, S>,
    target: Point,
    source: S::State,
) -> Result<HashSet<Point>, PathError> {
    let preds = tracked(result)?;
    let space = result.distances.space;
    let mut cells = HashSet::new();

    let mut stack = best_targets(result, target);
    if stack.is_empty() {
        return Ok(cells);
    }
    let mut seen = vec![false; space.state_count()];
    for &i in &stack {
        seen[i] = true;
    }

    while let Some(i) = stack.pop() {
        cells.insert(space.position(space.state(i)));
        for &p in preds.ids(i) {
            if !seen[p] {
                seen[p] = true;
                stack.push(p);
            }
        }
    }
    cells.insert(space.position(source));

    log::debug!(
        "optimal cells: {} cells on minimum paths to {}",
        cells.len(),
        target
    );
    Ok(cells)
}

/// One minimum-cost route from the solve's source to `target`, as positions
/// in walking order. In-place rotations collapse into a single position.
///
/// Follows the first recorded predecessor at every state. Returns `None`
/// when `target` is unreachable.
pub fn baseline_path<S: StateSpace>(
    result: &SolveResult<'_, S>,
    target: Point,
) -> Result<Option<Vec<Point>>, PathError> {
    let preds = tracked(result)?;
    let space = result.distances.space;
    let Some(&end) = best_targets(result, target).first() else {
        return Ok(None);
    };

    let mut path = Vec::new();
    let mut seen = vec![false; space.state_count()];
    let mut cur = Some(end);
    while let Some(i) = cur {
        if seen[i] {
            break;
        }
        seen[i] = true;
        let p = space.position(space.state(i));
        if path.last() != Some(&p) {
            path.push(p);
        }
        cur = preds.ids(i).first().copied();
    }
    path.reverse();
    Ok(Some(path))
}

impl<S: StateSpace> SolveResult<'_, S> {
    /// [`optimal_cells`] towards the solve's own source and target.
    pub fn optimal_cells(&self) -> Result<HashSet<Point>, PathError> {
        optimal_cells(self, self.target, self.source)
    }

    /// [`baseline_path`] towards the solve's own target.
    pub fn baseline_path(&self) -> Result<Option<Vec<Point>>, PathError> {
        baseline_path(self, self.target)
    }
}
