//! Text mazes with start and end markers.
//!
//! A [`Maze`] parses an ASCII map into a [`Grid`] plus the walker's start,
//! facing and goal:
//!
//! | glyph | meaning |
//! |---|---|
//! | `#` | blocked |
//! | `.` | free |
//! | `S` | start (free), facing right |
//! | `^ > v <` | start (free) with that facing |
//! | `E` | end (free) |

use std::fmt;
use std::str::FromStr;

use heading_core::{CellKind, Direction, Grid, GridError, Point};
use heading_paths::{
    Cost, DirectionalMaze, Heading, PathError, PlainGrid, ShortcutCounts, ShortcutRules,
    shortest_distance, solve,
};

/// A decoded maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    start: Point,
    end: Point,
    facing: Direction,
}

impl Maze {
    /// Facing used when the start is marked with `S`.
    pub const DEFAULT_FACING: Direction = Direction::Right;

    /// Build a maze from parts.
    pub fn new(grid: Grid, start: Point, end: Point, facing: Direction) -> Self {
        Self {
            grid,
            start,
            end,
            facing,
        }
    }

    /// Parse a maze. Surrounding whitespace of the whole text is trimmed,
    /// and every line must have the same width.
    pub fn parse(s: &str) -> Result<Self, MazeError> {
        let s = s.trim();
        let mut rows: Vec<Vec<CellKind>> = Vec::new();
        let mut start: Option<Point> = None;
        let mut end: Option<Point> = None;
        let mut facing = Self::DEFAULT_FACING;

        for (y, line) in s.lines().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let kind = match ch {
                    '#' => CellKind::Blocked,
                    '.' => CellKind::Free,
                    'S' => {
                        place('S', &mut start, pos)?;
                        CellKind::Free
                    }
                    'E' => {
                        place('E', &mut end, pos)?;
                        CellKind::Free
                    }
                    _ => match Direction::from_glyph(ch) {
                        Some(dir) => {
                            place('S', &mut start, pos)?;
                            facing = dir;
                            CellKind::Free
                        }
                        None => return Err(MazeError::InvalidGlyph { ch, pos }),
                    },
                };
                row.push(kind);
            }
            rows.push(row);
        }

        let grid = Grid::from_rows(rows)?;
        let start = start.ok_or(MazeError::MissingMarker('S'))?;
        let end = end.ok_or(MazeError::MissingMarker('E'))?;
        log::debug!(
            "maze: {}x{} grid, start {} facing {}, end {}",
            grid.width(),
            grid.height(),
            start,
            facing,
            end
        );
        Ok(Self::new(grid, start, end, facing))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// The start position together with its facing.
    pub fn start_heading(&self) -> Heading {
        Heading::new(self.start, self.facing)
    }

    /// Fewest steps from start to end, ignoring facing.
    pub fn step_distance(&self) -> Option<Cost> {
        shortest_distance(&PlainGrid::new(&self.grid), self.start, self.end)
    }

    /// Cheapest score from start to end in a [`DirectionalMaze`] with the
    /// default costs.
    pub fn lowest_score(&self) -> Option<Cost> {
        shortest_distance(
            &DirectionalMaze::new(&self.grid),
            self.start_heading(),
            self.end,
        )
    }

    /// Number of cells on at least one lowest-score route, or `None` if the
    /// end is unreachable.
    pub fn best_seat_count(&self) -> Option<usize> {
        let space = DirectionalMaze::new(&self.grid);
        let result = solve(&space, self.start_heading(), self.end, true);
        result.distance_to_target?;
        result.optimal_cells().ok().map(|cells| cells.len())
    }

    /// One shortest step route from start to end.
    pub fn track(&self) -> Result<Option<Vec<Point>>, PathError> {
        let space = PlainGrid::new(&self.grid);
        solve(&space, self.start, self.end, true).baseline_path()
    }

    /// Shortcuts along the shortest step route, or `None` if the end is
    /// unreachable.
    pub fn shortcuts(&self, rules: ShortcutRules) -> Option<ShortcutCounts> {
        let track = self.track().ok()??;
        Some(rules.count(&track))
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let p = Point::new(x, y);
                let ch = if p == self.start {
                    if self.facing == Self::DEFAULT_FACING {
                        'S'
                    } else {
                        self.facing.glyph()
                    }
                } else if p == self.end {
                    'E'
                } else if self.grid.is_passable(p) {
                    '.'
                } else {
                    '#'
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn place(marker: char, slot: &mut Option<Point>, pos: Point) -> Result<(), MazeError> {
    if let Some(first) = slot.replace(pos) {
        return Err(MazeError::DuplicateMarker {
            marker,
            first,
            second: pos,
        });
    }
    Ok(())
}

/// Parse one `x,y` point per non-blank line.
pub fn parse_points(s: &str) -> Result<Vec<Point>, MazeError> {
    s.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| -> Result<Point, MazeError> {
            let bad = || MazeError::InvalidPoint {
                line: i + 1,
                text: line.to_string(),
            };
            let (x, y) = line.trim().split_once(',').ok_or_else(bad)?;
            let x = x.trim().parse().map_err(|_| bad())?;
            let y = y.trim().parse().map_err(|_| bad())?;
            Ok(Point::new(x, y))
        })
        .collect()
}

/// Errors that can occur when decoding maze text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Lines have inconsistent widths.
    Grid(GridError),
    /// A character with no meaning in a maze.
    InvalidGlyph { ch: char, pos: Point },
    /// No `S`/arrow or no `E` marker.
    MissingMarker(char),
    /// A marker appears more than once.
    DuplicateMarker {
        marker: char,
        first: Point,
        second: Point,
    },
    /// A coordinate line is not of the form `x,y`.
    InvalidPoint { line: usize, text: String },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "maze: {e}"),
            Self::InvalidGlyph { ch, pos } => {
                write!(f, "maze contains invalid glyph \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MissingMarker(m) => write!(f, "maze: missing {m} marker"),
            Self::DuplicateMarker {
                marker,
                first,
                second,
            } => write!(f, "maze: {marker} marker at both {first} and {second}"),
            Self::InvalidPoint { line, text } => {
                write!(f, "points: line {line} is not x,y: {text:?}")
            }
        }
    }
}

impl std::error::Error for MazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for MazeError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REINDEER: &str = "\
###############
#.......#....E#
#.#.###.#.###.#
#.....#.#...#.#
#.###.#####.#.#
#.#.#.......#.#
#.#.#####.###.#
#...........#.#
###.#.#####.#.#
#...#.....#.#.#
#.#.#.###.#.#.#
#.....#...#.#.#
#.###.#.#.#.#.#
#S..#.....#...#
###############";

    const REINDEER_2: &str = "\
#################
#...#...#...#..E#
#.#.#.#.#.#.#.#.#
#.#.#.#...#...#.#
#.#.#.#.###.#.#.#
#...#.#.#.....#.#
#.#.#.#.#.#####.#
#.#...#.#.#.....#
#.#.#####.#.###.#
#.#.#.......#...#
#.#.###.#####.###
#.#.#...#.....#.#
#.#.#.#####.###.#
#.#.#.........#.#
#.#.#.#########.#
#S#.............#
#################";

    const RACETRACK: &str = "\
###############
#...#...#.....#
#.#.#.#.#.###.#
#S#...#.#.#...#
#######.#.#.###
#######.#.#...#
#######.#.###.#
###..E#...#...#
###.#######.###
#...###...#...#
#.#####.#.###.#
#.#...#.#.#...#
#.#.#.#.#.#.###
#...#...#...###
###############";

    #[test]
    fn parse_markers() {
        let m = Maze::parse(REINDEER).unwrap();
        assert_eq!(m.start(), Point::new(1, 13));
        assert_eq!(m.end(), Point::new(13, 1));
        assert_eq!(m.facing(), Direction::Right);
        assert_eq!(m.grid().width(), 15);
        assert!(m.grid().is_passable(m.start()));
        assert!(m.grid().is_passable(m.end()));
    }

    #[test]
    fn lowest_scores() {
        assert_eq!(Maze::parse(REINDEER).unwrap().lowest_score(), Some(7036));
        assert_eq!(Maze::parse(REINDEER_2).unwrap().lowest_score(), Some(11048));
    }

    #[test]
    fn best_seats() {
        assert_eq!(Maze::parse(REINDEER).unwrap().best_seat_count(), Some(45));
        assert_eq!(Maze::parse(REINDEER_2).unwrap().best_seat_count(), Some(64));
    }

    #[test]
    fn racetrack_cheats() {
        let m = Maze::parse(RACETRACK).unwrap();
        assert_eq!(m.step_distance(), Some(84));
        let short = m.shortcuts(ShortcutRules::default()).unwrap();
        assert_eq!(short.total, 44);
        assert_eq!(short.histogram.get(&2), Some(&14));
        assert_eq!(short.histogram.get(&64), Some(&1));

        let long = m
            .shortcuts(ShortcutRules {
                max_detour: 20,
                min_improvement: 50,
            })
            .unwrap();
        assert_eq!(long.total, 285);
        assert_eq!(long.histogram.get(&50), Some(&32));
        assert_eq!(long.histogram.get(&76), Some(&3));
    }

    #[test]
    fn arrow_sets_start_and_facing() {
        let m: Maze = "#####\n#.^E#\n#####".parse().unwrap();
        assert_eq!(m.start(), Point::new(2, 1));
        assert_eq!(m.facing(), Direction::Up);
        assert_eq!(m.lowest_score(), Some(1001));
        assert_eq!(m.to_string(), "#####\n#.^E#\n#####\n");
    }

    #[test]
    fn unreachable_end() {
        let m = Maze::parse("S#E").unwrap();
        assert_eq!(m.lowest_score(), None);
        assert_eq!(m.best_seat_count(), None);
        assert_eq!(m.shortcuts(ShortcutRules::default()), None);
    }

    #[test]
    fn invalid_glyph() {
        let err = Maze::parse("S.x\n..E").unwrap_err();
        assert_eq!(
            err,
            MazeError::InvalidGlyph {
                ch: 'x',
                pos: Point::new(2, 0)
            }
        );
    }

    #[test]
    fn marker_errors() {
        assert_eq!(Maze::parse("S..").unwrap_err(), MazeError::MissingMarker('E'));
        assert_eq!(Maze::parse("..E").unwrap_err(), MazeError::MissingMarker('S'));
        assert_eq!(
            Maze::parse("S.>E").unwrap_err(),
            MazeError::DuplicateMarker {
                marker: 'S',
                first: Point::new(0, 0),
                second: Point::new(2, 0)
            }
        );
    }

    #[test]
    fn ragged_rows() {
        let err = Maze::parse("S..\n.E").unwrap_err();
        assert!(matches!(err, MazeError::Grid(GridError::MalformedGrid { row: 1, .. })));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn points() {
        let pts = parse_points("5,4\n4,2\n\n 3 , 0 \n").unwrap();
        assert_eq!(pts, vec![Point::new(5, 4), Point::new(4, 2), Point::new(3, 0)]);
        assert_eq!(
            parse_points("1,2\n1;2").unwrap_err(),
            MazeError::InvalidPoint {
                line: 2,
                text: "1;2".to_string()
            }
        );
    }
}
