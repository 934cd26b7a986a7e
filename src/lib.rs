//! # maze_search
//!
//! Uninformed search over a 2-D maze described as text. A [Maze](maze::Maze) is parsed from rows
//! of characters (`A` start, `B` goal, space open, anything else wall) and solved with either
//! [depth-first](https://en.wikipedia.org/wiki/Depth-first_search) or
//! [breadth-first](https://en.wikipedia.org/wiki/Breadth-first_search) search. Both strategies
//! share one search loop and differ only in the removal policy of the
//! [Frontier](frontier::Frontier).
//!
//! The search itself has no rendering dependency: progress is handed to a
//! [SearchObserver](observer::SearchObserver), of which [FrameRecorder](render::FrameRecorder)
//! draws each step into an animation.
pub mod error;
pub mod frontier;
pub mod maze;
pub mod node;
pub mod observer;
pub mod render;
pub mod solver;

use core::fmt;

pub use error::MazeError;
pub use frontier::{Frontier, FrontierPolicy};
pub use grid_util::point::Point;
pub use maze::Maze;
pub use observer::{SearchObserver, Snapshot};
pub use solver::{MazeSolver, SearchResult, Solution};

/// Edge length of a rendered cell in pixels.
pub const CELL_SIZE: u32 = 50;
/// Gap left on each side of a rendered cell, showing the black canvas as grid lines.
pub const CELL_BORDER: u32 = 2;
/// Number of frames repeated at the end of an animation to pause on the solution.
pub const FINAL_FRAMES: usize = 10;
/// Playback rate of assembled animations.
pub const FRAMES_PER_SECOND: u32 = 5;

/// A move between two orthogonally adjacent cells.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// All actions in the order neighbours are enumerated, which fixes tie-breaking for both
    /// search strategies.
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// The `(dx, dy)` offset of the action, with `y` growing downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Action::Up => (0, -1),
            Action::Down => (0, 1),
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
        }
    }

    /// The cell reached by taking this action from `point`.
    pub fn apply(self, point: Point) -> Point {
        let (dx, dy) = self.delta();
        Point::new(point.x + dx, point.y + dy)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Action::Up => "up",
                Action::Down => "down",
                Action::Left => "left",
                Action::Right => "right",
            }
        )
    }
}
