use std::fmt::Debug;

use heading_core::Point;

/// Edge and path cost. Costs are never negative.
pub type Cost = u64;

/// Sentinel value meaning "unreachable" in distance tables.
pub const UNREACHABLE: Cost = Cost::MAX;

/// A search graph whose vertices are generated lazily from a grid.
///
/// Every valid state has a dense integer id in `0..state_count()`, so the
/// solver can keep per-state data in flat vectors. Blocked or out-of-range
/// states have no id.
pub trait StateSpace {
    /// A vertex of the search graph.
    type State: Copy + Eq + Debug;

    /// Upper bound (exclusive) on state ids.
    fn state_count(&self) -> usize;

    /// Dense id of `s`, or `None` if `s` is not a valid state.
    fn index(&self, s: Self::State) -> Option<usize>;

    /// Inverse of [`index`](Self::index).
    fn state(&self, idx: usize) -> Self::State;

    /// Grid position of `s`.
    fn position(&self, s: Self::State) -> Point;

    /// Append `(successor, cost)` pairs of `s` into `buf`. The caller clears
    /// `buf` before calling.
    fn successors(&self, s: Self::State, buf: &mut Vec<(Self::State, Cost)>);

    /// Append every valid state located at `p` into `buf`. The caller clears
    /// `buf` before calling.
    fn variants(&self, p: Point, buf: &mut Vec<Self::State>);
}
