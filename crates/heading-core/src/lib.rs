//! **heading-core**: grid and geometry types for direction-aware pathfinding.
//!
//! This crate provides the foundational types shared by the *heading*
//! crates: integer points and grid bounds, the four cardinal facings, and an
//! immutable grid of free/blocked cells with total (non-panicking) lookups.

pub mod geom;
pub mod grid;

pub use geom::{Bounds, Direction, Point};
pub use grid::{CellKind, Grid, GridError};
