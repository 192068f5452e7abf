use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use heading_core::Point;

use crate::traits::{Cost, StateSpace, UNREACHABLE};

// ---------------------------------------------------------------------------
// Frontier entries
// ---------------------------------------------------------------------------

/// Reference into the state arrays, ordered by `cost` for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
struct NodeRef {
    idx: usize,
    cost: Cost,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest cost first.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Distance table
// ---------------------------------------------------------------------------

/// Best known cost of every state reached by one solve.
pub struct DistanceTable<'s, S: StateSpace> {
    pub(crate) space: &'s S,
    pub(crate) dist: Vec<Cost>,
}

impl<'s, S: StateSpace> DistanceTable<'s, S> {
    pub(crate) fn unreached(space: &'s S) -> Self {
        Self {
            space,
            dist: vec![UNREACHABLE; space.state_count()],
        }
    }

    /// The state space this table was computed on.
    pub fn space(&self) -> &'s S {
        self.space
    }

    /// Cost of `s`, or `None` if `s` was not reached.
    pub fn get(&self, s: S::State) -> Option<Cost> {
        let i = self.space.index(s)?;
        self.at_index(i)
    }

    #[inline]
    pub(crate) fn at_index(&self, i: usize) -> Option<Cost> {
        match self.dist[i] {
            UNREACHABLE => None,
            d => Some(d),
        }
    }

    /// Cheapest cost over every state located at `p`.
    pub fn min_at(&self, p: Point) -> Option<Cost> {
        let mut buf = Vec::new();
        self.space.variants(p, &mut buf);
        buf.into_iter().filter_map(|s| self.get(s)).min()
    }

    /// Every reached state and its cost, in state-id order.
    pub fn reached(&self) -> impl Iterator<Item = (S::State, Cost)> + '_ {
        self.dist
            .iter()
            .enumerate()
            .filter(|(_, d)| **d != UNREACHABLE)
            .map(|(i, d)| (self.space.state(i), *d))
    }

    /// Number of reached states.
    pub fn len(&self) -> usize {
        self.dist.iter().filter(|d| **d != UNREACHABLE).count()
    }

    /// Whether no state was reached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: StateSpace> PartialEq for DistanceTable<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        self.dist == other.dist
    }
}

impl<S: StateSpace> fmt::Debug for DistanceTable<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.reached()).finish()
    }
}

// ---------------------------------------------------------------------------
// Predecessor multimap
// ---------------------------------------------------------------------------

/// For each state, the states that reach it at its best cost.
///
/// Stored as adjacency lists of state ids. Every recorded predecessor was
/// settled strictly before its successor, so following predecessors always
/// terminates at the source.
pub struct PredecessorMap<'s, S: StateSpace> {
    pub(crate) space: &'s S,
    pub(crate) preds: Vec<Vec<usize>>,
}

impl<S: StateSpace> PredecessorMap<'_, S> {
    /// Predecessors of `s` achieving its best cost, in discovery order.
    pub fn of(&self, s: S::State) -> impl Iterator<Item = S::State> + '_ {
        let ids: &[usize] = match self.space.index(s) {
            Some(i) => self.preds[i].as_slice(),
            None => &[],
        };
        ids.iter().map(|&i| self.space.state(i))
    }

    #[inline]
    pub(crate) fn ids(&self, i: usize) -> &[usize] {
        &self.preds[i]
    }
}

impl<S: StateSpace> fmt::Debug for PredecessorMap<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.preds
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| !p.is_empty())
                    .map(|(i, p)| {
                        let from: Vec<_> = p.iter().map(|&j| self.space.state(j)).collect();
                        (self.space.state(i), from)
                    }),
            )
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Solve
// ---------------------------------------------------------------------------

/// Output of [`solve`].
pub struct SolveResult<'s, S: StateSpace> {
    /// Cheapest cost over every state at the target position.
    pub distance_to_target: Option<Cost>,
    pub distances: DistanceTable<'s, S>,
    /// Present only when the solve tracked predecessors.
    pub predecessors: Option<PredecessorMap<'s, S>>,
    pub source: S::State,
    pub target: Point,
}

impl<S: StateSpace> fmt::Debug for SolveResult<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolveResult")
            .field("distance_to_target", &self.distance_to_target)
            .field("source", &self.source)
            .field("target", &self.target)
            .field("reached", &self.distances.len())
            .field("tracked", &self.predecessors.is_some())
            .finish()
    }
}

/// Run Dijkstra from `source` and report the cost of reaching `target` at
/// any facing.
///
/// When `track_predecessors` is set, every predecessor achieving a state's
/// best cost is recorded, which [`optimal_cells`](crate::optimal_cells) and
/// [`baseline_path`](crate::baseline_path) need.
pub fn solve<'s, S: StateSpace>(
    space: &'s S,
    source: S::State,
    target: Point,
    track_predecessors: bool,
) -> SolveResult<'s, S> {
    let mut preds = track_predecessors.then(|| vec![Vec::new(); space.state_count()]);
    let distances = search(space, source, preds.as_deref_mut());
    let predecessors = preds.map(|preds| PredecessorMap { space, preds });
    let distance_to_target = distances.min_at(target);
    log::debug!(
        "dijkstra: {:?} -> {} costs {:?} ({} states reached)",
        source,
        target,
        distance_to_target,
        distances.len()
    );
    SolveResult {
        distance_to_target,
        distances,
        predecessors,
        source,
        target,
    }
}

/// Cheapest cost from `source` to any state at `target`, or `None` if no
/// such state is reachable.
pub fn shortest_distance<S: StateSpace>(space: &S, source: S::State, target: Point) -> Option<Cost> {
    solve(space, source, target, false).distance_to_target
}

/// Full distance table and predecessor multimap from `source`.
pub fn shortest_distance_and_predecessors<'s, S: StateSpace>(
    space: &'s S,
    source: S::State,
) -> (DistanceTable<'s, S>, PredecessorMap<'s, S>) {
    let mut preds = vec![Vec::new(); space.state_count()];
    let distances = search(space, source, Some(preds.as_mut_slice()));
    (distances, PredecessorMap { space, preds })
}

/// Fills `preds`, when given, with one predecessor list per state id.
fn search<'s, S: StateSpace>(
    space: &'s S,
    source: S::State,
    mut preds: Option<&mut [Vec<usize>]>,
) -> DistanceTable<'s, S> {
    let n = space.state_count();
    let mut table = DistanceTable::unreached(space);

    let Some(si) = space.index(source) else {
        log::debug!("dijkstra: source {:?} is not a valid state", source);
        return table;
    };

    let dist = &mut table.dist;
    let mut settled = vec![false; n];
    let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
    dist[si] = 0;
    open.push(NodeRef { idx: si, cost: 0 });

    let mut sbuf = Vec::with_capacity(4);
    let mut n_settled = 0usize;

    while let Some(current) = open.pop() {
        let ci = current.idx;
        // Skip stale entries.
        if settled[ci] || current.cost > dist[ci] {
            continue;
        }
        settled[ci] = true;
        n_settled += 1;

        sbuf.clear();
        space.successors(space.state(ci), &mut sbuf);

        for &(ns, step) in sbuf.iter() {
            let Some(ni) = space.index(ns) else {
                continue;
            };
            if settled[ni] {
                continue;
            }
            let candidate = current.cost.saturating_add(step);
            if candidate == UNREACHABLE {
                continue;
            }
            match candidate.cmp(&dist[ni]) {
                Ordering::Less => {
                    dist[ni] = candidate;
                    if let Some(preds) = preds.as_deref_mut() {
                        preds[ni].clear();
                        preds[ni].push(ci);
                    }
                    open.push(NodeRef {
                        idx: ni,
                        cost: candidate,
                    });
                }
                Ordering::Equal => {
                    if let Some(preds) = preds.as_deref_mut() {
                        log::trace!("dijkstra: tie at {:?} via {:?}", ns, space.state(ci));
                        preds[ni].push(ci);
                    }
                }
                Ordering::Greater => {}
            }
        }
    }

    log::trace!("dijkstra: settled {} of {} states", n_settled, n);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{find, grid};
    use crate::space::{DirectionalMaze, Heading, MazeCosts, PlainGrid};
    use heading_core::{Direction, Grid};

    #[test]
    fn open_grid_corner_to_corner() {
        let g = Grid::new(5, 5);
        let space = PlainGrid::new(&g);
        assert_eq!(
            shortest_distance(&space, Point::new(0, 0), Point::new(4, 4)),
            Some(8)
        );
    }

    #[test]
    fn off_path_obstacle_keeps_manhattan_distance() {
        let g = Grid::new(5, 5).with_blocked(Point::new(2, 2));
        let space = PlainGrid::new(&g);
        assert_eq!(
            shortest_distance(&space, Point::new(0, 0), Point::new(4, 4)),
            Some(8)
        );
    }

    #[test]
    fn walled_off_target_is_unreachable() {
        let text = "\
S.#..
..#.E
..#..";
        let g = grid(text);
        let space = PlainGrid::new(&g);
        let r = solve(&space, find(text, 'S'), find(text, 'E'), true);
        assert_eq!(r.distance_to_target, None);
        assert_eq!(r.distances.len(), 6);
    }

    #[test]
    fn blocked_source_reaches_nothing() {
        let g = Grid::new(3, 3).with_blocked(Point::new(0, 0));
        let space = PlainGrid::new(&g);
        let r = solve(&space, Point::new(0, 0), Point::new(2, 2), false);
        assert_eq!(r.distance_to_target, None);
        assert!(r.distances.is_empty());
    }

    #[test]
    fn source_equals_target() {
        let g = Grid::new(3, 3);
        let space = PlainGrid::new(&g);
        assert_eq!(
            shortest_distance(&space, Point::new(1, 1), Point::new(1, 1)),
            Some(0)
        );
    }

    #[test]
    fn one_quarter_turn() {
        let text = "\
######
#S...#
####.#
####E#
######";
        let g = grid(text);
        let space = DirectionalMaze::new(&g);
        let start = Heading::new(find(text, 'S'), Direction::Right);
        // 5 straight cells plus one 90° turn.
        assert_eq!(shortest_distance(&space, start, find(text, 'E')), Some(1005));
    }

    #[test]
    fn reversal_costs_two_turns_not_three() {
        let text = "\
#######
#E..S.#
#######";
        let g = grid(text);
        let space = DirectionalMaze::new(&g);
        let start = Heading::new(find(text, 'S'), Direction::Right);
        assert_eq!(shortest_distance(&space, start, find(text, 'E')), Some(2003));
    }

    #[test]
    fn target_facing_is_free() {
        let text = "\
#####
#S.E#
#####";
        let g = grid(text);
        let space = DirectionalMaze::new(&g);
        let start = Heading::new(find(text, 'S'), Direction::Right);
        let r = solve(&space, start, find(text, 'E'), false);
        assert_eq!(r.distance_to_target, Some(2));
        let e = find(text, 'E');
        assert_eq!(r.distances.get(Heading::new(e, Direction::Right)), Some(2));
        assert_eq!(r.distances.get(Heading::new(e, Direction::Up)), Some(1002));
        assert_eq!(r.distances.min_at(e), Some(2));
    }

    #[test]
    fn custom_turn_cost() {
        let text = "\
######
#S...#
####.#
####E#
######";
        let g = grid(text);
        let costs = MazeCosts { step: 2, turn: 10 };
        let space = DirectionalMaze::with_costs(&g, costs).unwrap();
        let start = Heading::new(find(text, 'S'), Direction::Right);
        assert_eq!(shortest_distance(&space, start, find(text, 'E')), Some(20));
    }

    #[test]
    fn ties_record_every_predecessor() {
        let g = Grid::new(2, 2);
        let space = PlainGrid::new(&g);
        let (dist, preds) = shortest_distance_and_predecessors(&space, Point::new(0, 0));
        assert_eq!(dist.get(Point::new(1, 1)), Some(2));
        let mut from: Vec<_> = preds.of(Point::new(1, 1)).collect();
        from.sort();
        assert_eq!(from, vec![Point::new(1, 0), Point::new(0, 1)]);
        assert_eq!(preds.of(Point::new(0, 0)).count(), 0);
        assert_eq!(preds.of(Point::new(1, 0)).collect::<Vec<_>>(), vec![Point::new(0, 0)]);
    }

    #[test]
    fn untracked_solve_has_no_predecessors() {
        let g = Grid::new(2, 2);
        let space = PlainGrid::new(&g);
        let r = solve(&space, Point::new(0, 0), Point::new(1, 1), false);
        assert!(r.predecessors.is_none());
    }

    #[test]
    fn predecessor_table_matches_tracked_solve() {
        let g = grid(
            "\
....
.##.
....",
        );
        let space = PlainGrid::new(&g);
        let src = Point::new(0, 0);
        let (dist, preds) = shortest_distance_and_predecessors(&space, src);
        let r = solve(&space, src, Point::new(3, 2), true);
        assert_eq!(dist, r.distances);
        let tracked = r.predecessors.unwrap();
        for (p, _) in dist.reached() {
            assert_eq!(preds.of(p).collect::<Vec<_>>(), tracked.of(p).collect::<Vec<_>>());
        }
        assert_eq!(preds.of(Point::new(3, 2)).count(), 2);
        assert_eq!(preds.of(src).count(), 0);
    }

    #[test]
    fn predecessor_table_from_blocked_source_is_empty() {
        let g = grid("#..");
        let space = PlainGrid::new(&g);
        let (dist, preds) = shortest_distance_and_predecessors(&space, Point::new(0, 0));
        assert!(dist.is_empty());
        assert_eq!(preds.of(Point::new(1, 0)).count(), 0);
    }

    #[test]
    fn repeated_solves_are_identical() {
        let text = "\
S..#....
.#.#.##.
.#...#..
.####.#.
......#E";
        let g = grid(text);
        let space = DirectionalMaze::new(&g);
        let start = Heading::new(find(text, 'S'), Direction::Right);
        let a = solve(&space, start, find(text, 'E'), true);
        let b = solve(&space, start, find(text, 'E'), true);
        assert_eq!(a.distances, b.distances);
        assert_eq!(a.distance_to_target, b.distance_to_target);
        assert!(a.distance_to_target.is_some());
    }
}
