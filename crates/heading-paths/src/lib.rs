//! Shortest-path search over grid state spaces.
//!
//! This crate provides a single-source Dijkstra solver that is generic over
//! a [`StateSpace`], plus the analyses built on top of its output:
//!
//! - **Dijkstra** distances and predecessor sets ([`solve`], [`shortest_distance`])
//! - **BFS** hop-count reference distances ([`bfs_distances`])
//! - **Optimal cells**: every cell on any minimum-cost path ([`optimal_cells`])
//! - **Baseline path**: one minimum-cost route ([`baseline_path`])
//! - **Shortcuts**: bounded-detour savings along a baseline path ([`count_shortcuts`])
//!
//! # State spaces
//!
//! | Space | State | Transitions |
//! |---|---|---|
//! | [`PlainGrid`] | [`Point`](heading_core::Point) | 4-way step, cost 1 |
//! | [`DirectionalMaze`] | [`Heading`] | step forward, or rotate in place for `turn` per 90° |

mod bfs;
mod dijkstra;
mod distance;
mod optimal;
mod shortcut;
mod space;
mod traits;

#[cfg(test)]
mod fixtures;

pub use bfs::bfs_distances;
pub use dijkstra::{
    DistanceTable, PredecessorMap, SolveResult, shortest_distance,
    shortest_distance_and_predecessors, solve,
};
pub use distance::manhattan;
pub use optimal::{PathError, baseline_path, optimal_cells};
pub use shortcut::{ShortcutCounts, ShortcutRules, count_shortcuts};
pub use space::{CostError, DirectionalMaze, Heading, MazeCosts, PlainGrid};
pub use traits::{Cost, StateSpace, UNREACHABLE};
