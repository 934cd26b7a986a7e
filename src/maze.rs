use crate::{Action, MazeError};
use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use std::fs;
use std::mem;
use std::path::Path;
use std::str::FromStr;

/// A rectangular maze with exactly one start and one goal. Walls are stored in a [BoolGrid] where
/// [true] marks an impassable cell. Cells are addressed as [Point]s with `x` the column and `y`
/// the row, so `Point::new(0, 0)` is the top-left corner of the text.
///
/// Connected components of the open cells are maintained in a [UnionFind] structure so that
/// reachability can be answered without searching.
#[derive(Clone, Debug)]
pub struct Maze {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    start: Point,
    goal: Point,
}

impl Maze {
    /// Builds the cell at `row`, `col`.
    pub fn cell(row: i32, col: i32) -> Point {
        Point::new(col, row)
    }

    /// Reads and parses a maze file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Maze, MazeError> {
        let contents = fs::read_to_string(path.as_ref())?;
        info!("Loaded maze from {}", path.as_ref().display());
        contents.parse()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }
    pub fn height(&self) -> usize {
        self.grid.height()
    }
    pub fn start(&self) -> Point {
        self.start
    }
    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        self.grid.point_in_bounds(point)
    }

    /// Out-of-bounds cells count as walls here since they can never be entered.
    pub fn is_wall(&self, point: Point) -> bool {
        !self.in_bounds(point) || self.grid.get_point(point)
    }

    /// Number of cells that are not walls.
    pub fn open_cells(&self) -> usize {
        (0..self.height() as i32)
            .flat_map(|y| (0..self.width() as i32).map(move |x| Point::new(x, y)))
            .filter(|p| !self.grid.get_point(*p))
            .count()
    }

    /// The open cells orthogonally adjacent to `point`, paired with the action leading there.
    /// Always enumerated up, down, left, right.
    pub fn neighbours(&self, point: &Point) -> SmallVec<[(Action, Point); 4]> {
        Action::ALL
            .into_iter()
            .map(|action| (action, action.apply(*point)))
            .filter(|(_, p)| !self.is_wall(*p))
            .collect()
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(*start) && self.in_bounds(*goal) {
            self.components
                .equiv(self.grid.get_ix_point(start), self.grid.get_ix_point(goal))
        } else {
            false
        }
    }

    /// Whether the goal can be reached from the start at all.
    pub fn is_solvable(&self) -> bool {
        self.reachable(&self.start, &self.goal)
    }

    /// Generates a new [UnionFind] structure and links up open neighbours to the same components.
    fn generate_components(&mut self) {
        let w = self.width();
        let h = self.height();
        self.components = UnionFind::new(w * h);
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let point = Point::new(x, y);
                if self.grid.get_point(point) {
                    continue;
                }
                let ix = self.grid.get_ix_point(&point);
                // Linking right and down covers every edge once.
                for n in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if !self.is_wall(n) {
                        self.components.union(ix, self.grid.get_ix_point(&n));
                    }
                }
            }
        }
    }

    /// Writes the maze as text, marking the cells for which `marked` holds with `*`.
    pub(crate) fn write_with<F>(&self, f: &mut fmt::Formatter, marked: F) -> fmt::Result
    where
        F: Fn(&Point) -> bool,
    {
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                let p = Point::new(x, y);
                let c = if self.grid.get_point(p) {
                    '█'
                } else if p == self.start {
                    'A'
                } else if p == self.goal {
                    'B'
                } else if marked(&p) {
                    '*'
                } else {
                    ' '
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Splits text into rows of characters at every line boundary: `\n`, `\r\n` and a lone `\r`, as
/// well as the vertical tab, form feed, file/group/record separators, `NEL` and the Unicode line
/// and paragraph separators. A trailing boundary does not start an extra row.
fn split_rows(contents: &str) -> Vec<Vec<char>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut chars = contents.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                chars.next_if_eq(&'\n');
                rows.push(mem::take(&mut row));
            }
            '\n' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}'
            | '\u{2029}' => rows.push(mem::take(&mut row)),
            _ => row.push(c),
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

impl FromStr for Maze {
    type Err = MazeError;

    /// Rows shorter than the longest one are padded with open cells, not walls.
    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        if contents.matches('A').count() != 1 {
            return Err(MazeError::MalformedMaze(
                "missing or duplicate start".to_owned(),
            ));
        }
        if contents.matches('B').count() != 1 {
            return Err(MazeError::MalformedMaze("missing or duplicate goal".to_owned()));
        }
        let lines = split_rows(contents);
        let height = lines.len();
        let width = lines.iter().map(Vec::len).max().unwrap_or(0);

        let mut grid = BoolGrid::new(width, height, false);
        let mut start = None;
        let mut goal = None;
        for (y, line) in lines.iter().enumerate() {
            for (x, c) in line.iter().enumerate() {
                let p = Point::new(x as i32, y as i32);
                match c {
                    'A' => start = Some(p),
                    'B' => goal = Some(p),
                    ' ' => {}
                    _ => grid.set_point(p, true),
                }
            }
        }
        let (Some(start), Some(goal)) = (start, goal) else {
            return Err(MazeError::MalformedMaze(
                "missing or duplicate start".to_owned(),
            ));
        };

        let mut maze = Maze {
            grid,
            components: UnionFind::new(0),
            start,
            goal,
        };
        maze.generate_components();
        info!(
            "Parsed {}x{} maze with start {} and goal {}",
            width, height, start, goal
        );
        Ok(maze)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_with(f, |_| false)
    }
}
