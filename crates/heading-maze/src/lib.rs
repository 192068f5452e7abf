//! Maze utilities built on the heading solver: text decoding, obstacle
//! budget search and wall-removal analysis.

pub mod budget;
pub mod maze;
pub mod walls;

pub use budget::{distance_after, first_blocking, obstacle_grid};
pub use maze::{Maze, MazeError, parse_points};
pub use walls::{removable_walls, wall_removal_gains};
