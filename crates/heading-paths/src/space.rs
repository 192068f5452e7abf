//! The two state spaces: plain 4-way grid walking and the facing-aware maze.

use std::fmt;

use heading_core::{Direction, Grid, Point};

use crate::traits::{Cost, StateSpace};

// ---------------------------------------------------------------------------
// PlainGrid
// ---------------------------------------------------------------------------

/// Walk between orthogonally adjacent free cells, one unit per step.
#[derive(Debug, Clone, Copy)]
pub struct PlainGrid<'a> {
    grid: &'a Grid,
}

impl<'a> PlainGrid<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }
}

impl StateSpace for PlainGrid<'_> {
    type State = Point;

    fn state_count(&self) -> usize {
        self.grid.len()
    }

    fn index(&self, p: Point) -> Option<usize> {
        if !self.grid.is_passable(p) {
            return None;
        }
        self.grid.index(p)
    }

    fn state(&self, idx: usize) -> Point {
        self.grid.point(idx)
    }

    fn position(&self, p: Point) -> Point {
        p
    }

    fn successors(&self, p: Point, buf: &mut Vec<(Point, Cost)>) {
        for n in p.neighbors_4() {
            if self.grid.is_passable(n) {
                buf.push((n, 1));
            }
        }
    }

    fn variants(&self, p: Point, buf: &mut Vec<Point>) {
        if self.grid.is_passable(p) {
            buf.push(p);
        }
    }
}

// ---------------------------------------------------------------------------
// DirectionalMaze
// ---------------------------------------------------------------------------

/// A position together with the facing of the walker standing on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heading {
    pub pos: Point,
    pub dir: Direction,
}

impl Heading {
    pub const fn new(pos: Point, dir: Direction) -> Self {
        Self { pos, dir }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} facing {}", self.pos, self.dir)
    }
}

/// Transition costs of a [`DirectionalMaze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeCosts {
    /// Cost of one step forward. Must be > 0.
    pub step: Cost,
    /// Cost of each 90° of in-place rotation.
    pub turn: Cost,
}

impl Default for MazeCosts {
    fn default() -> Self {
        Self {
            step: 1,
            turn: 1000,
        }
    }
}

impl MazeCosts {
    /// Check the costs can drive a Dijkstra search.
    pub fn validate(self) -> Result<Self, CostError> {
        if self.step == 0 {
            return Err(CostError::ZeroStep);
        }
        Ok(self)
    }

    /// Cost of rotating in place from `from` to `to`. Saturates at
    /// [`UNREACHABLE`](crate::UNREACHABLE), which the solver never relaxes
    /// through.
    #[inline]
    pub fn rotation(self, from: Direction, to: Direction) -> Cost {
        self.turn.saturating_mul(Cost::from(from.quarter_turns(to)))
    }
}

/// A walker that either steps forward along its facing or rotates in place.
///
/// Rotation cost depends only on the minimal angle between the old and new
/// facing, never on the rotation sense: 90° costs one `turn`, 180° two.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalMaze<'a> {
    grid: &'a Grid,
    costs: MazeCosts,
}

impl<'a> DirectionalMaze<'a> {
    /// Maze with the default costs (step 1, turn 1000).
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            costs: MazeCosts::default(),
        }
    }

    /// Maze with custom costs.
    pub fn with_costs(grid: &'a Grid, costs: MazeCosts) -> Result<Self, CostError> {
        Ok(Self {
            grid,
            costs: costs.validate()?,
        })
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    pub fn costs(&self) -> MazeCosts {
        self.costs
    }
}

impl StateSpace for DirectionalMaze<'_> {
    type State = Heading;

    fn state_count(&self) -> usize {
        self.grid.len() * 4
    }

    fn index(&self, h: Heading) -> Option<usize> {
        if !self.grid.is_passable(h.pos) {
            return None;
        }
        let cell = self.grid.index(h.pos)?;
        Some(cell * 4 + h.dir.index())
    }

    fn state(&self, idx: usize) -> Heading {
        Heading::new(self.grid.point(idx / 4), Direction::from_index(idx % 4))
    }

    fn position(&self, h: Heading) -> Point {
        h.pos
    }

    fn successors(&self, h: Heading, buf: &mut Vec<(Heading, Cost)>) {
        let ahead = h.pos.step(h.dir);
        if self.grid.is_passable(ahead) {
            buf.push((Heading::new(ahead, h.dir), self.costs.step));
        }
        for d in Direction::ALL {
            if d != h.dir {
                buf.push((Heading::new(h.pos, d), self.costs.rotation(h.dir, d)));
            }
        }
    }

    fn variants(&self, p: Point, buf: &mut Vec<Heading>) {
        if self.grid.is_passable(p) {
            buf.extend(Direction::ALL.map(|d| Heading::new(p, d)));
        }
    }
}

/// Errors in transition-cost configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostError {
    /// A zero step cost would let equal-cost cycles form.
    ZeroStep,
}

impl fmt::Display for CostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroStep => write!(f, "maze costs: step cost must be positive"),
        }
    }
}

impl std::error::Error for CostError {}
