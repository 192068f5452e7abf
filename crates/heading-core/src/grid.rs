//! An immutable grid of free and blocked cells.
//!
//! [`Grid`] is built once per puzzle input and never mutated afterwards.
//! Lookups are total: out-of-bounds coordinates yield `None` rather than a
//! panic, so callers can use [`Grid::cell_at`] for bounds checking.

use std::fmt;

use crate::geom::{Bounds, Point};

/// The kind of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Free,
    Blocked,
}

impl CellKind {
    /// Whether a walker may stand on this cell.
    #[inline]
    pub const fn is_free(self) -> bool {
        matches!(self, CellKind::Free)
    }
}

/// A rectangular map of [`CellKind`]s with origin at (0, 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<CellKind>,
    bounds: Bounds,
}

impl Grid {
    /// Create a `width` × `height` grid with every cell free.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Bounds::new(width, height);
        Self {
            cells: vec![CellKind::Free; bounds.len()],
            bounds,
        }
    }

    /// Create a grid whose cell at each point is given by `f`.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Point) -> CellKind) -> Self {
        let bounds = Bounds::new(width, height);
        Self {
            cells: bounds.points().map(&mut f).collect(),
            bounds,
        }
    }

    /// Build a grid from rows of cells, top row first.
    ///
    /// Every row must have the same length as the first one.
    pub fn from_rows<R, I>(rows: R) -> Result<Self, GridError>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = CellKind>,
    {
        let mut cells = Vec::new();
        let mut width: Option<usize> = None;
        let mut height = 0usize;
        for (y, row) in rows.into_iter().enumerate() {
            let start = cells.len();
            cells.extend(row);
            let found = cells.len() - start;
            match width {
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(GridError::MalformedGrid {
                        row: y,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
            height = y + 1;
        }
        let width = width.unwrap_or(0);
        if width == 0 {
            // Rows of zero length carry no cells.
            height = 0;
        }
        Ok(Self {
            cells,
            bounds: Bounds::new(width as i32, height as i32),
        })
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width() as usize + p.x as usize)
    }

    /// Inverse of [`index`](Self::index). `idx` must be below [`len`](Self::len).
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width() as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// The cell at `p`, or `None` if `p` is out of bounds.
    #[inline]
    pub fn cell_at(&self, p: Point) -> Option<CellKind> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Whether `p` is inside the grid and free.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.cell_at(p) == Some(CellKind::Free)
    }

    /// Count free cells.
    pub fn count_passable(&self) -> usize {
        self.cells.iter().filter(|c| c.is_free()).count()
    }

    /// A copy of this grid with the cell at `p` replaced by `kind`.
    /// Out-of-bounds points leave the copy unchanged.
    pub fn with_cell(&self, p: Point, kind: CellKind) -> Grid {
        let mut g = self.clone();
        if let Some(i) = g.index(p) {
            g.cells[i] = kind;
        }
        g
    }

    /// A copy of this grid with `p` blocked.
    pub fn with_blocked(&self, p: Point) -> Grid {
        self.with_cell(p, CellKind::Blocked)
    }

    /// A copy of this grid with `p` free.
    pub fn with_free(&self, p: Point) -> Grid {
        self.with_cell(p, CellKind::Free)
    }

    /// Iterate over `(Point, CellKind)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellKind)> + '_ {
        self.bounds.points().zip(self.cells.iter().copied())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let ch = match self.cell_at(Point::new(x, y)) {
                    Some(CellKind::Blocked) => '#',
                    _ => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Errors that can occur when building a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A row's length differs from the first row's.
    MalformedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedGrid {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: malformed row {row}: expected {expected} cells, found {found}"
            ),
        }
    }
}

impl std::error::Error for GridError {}
