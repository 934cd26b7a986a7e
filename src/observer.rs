use core::fmt;
use crate::maze::Maze;
use crate::solver::{ExploredSet, Solution};
use grid_util::point::Point;
use log::debug;
use std::thread;
use std::time::Duration;

/// Point-in-time view of a running search, handed to a [SearchObserver].
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub maze: &'a Maze,
    pub explored: &'a ExploredSet,
    /// The node being expanded, [None] once the search has finished.
    pub current: Option<Point>,
    /// Only set for the frames emitted after the goal has been found.
    pub solution: Option<&'a Solution>,
    /// Number of nodes removed from the frontier so far.
    pub step: usize,
}

impl<'a> Snapshot<'a> {
    pub fn is_explored(&self, point: &Point) -> bool {
        self.explored.contains(point)
    }

    pub fn on_solution(&self, point: &Point) -> bool {
        self.solution.map_or(false, |s| s.cells.contains(point))
    }
}

/// Receives progress from [MazeSolver::solve_observed](crate::solver::MazeSolver::solve_observed).
/// The search does not depend on anything an observer does.
pub trait SearchObserver {
    /// Called once for every node removed from the frontier, before it is expanded.
    fn capture(&mut self, snapshot: &Snapshot<'_>);

    /// Called a fixed number of times after the goal is found, with the solution attached.
    fn finalize(&mut self, _snapshot: &Snapshot<'_>) {}
}

/// Observing nothing.
impl SearchObserver for () {
    fn capture(&mut self, _snapshot: &Snapshot<'_>) {}
}

impl<O: SearchObserver + ?Sized> SearchObserver for &mut O {
    fn capture(&mut self, snapshot: &Snapshot<'_>) {
        (**self).capture(snapshot)
    }
    fn finalize(&mut self, snapshot: &Snapshot<'_>) {
        (**self).finalize(snapshot)
    }
}

/// Pairs two observers so that both see every step.
impl<A: SearchObserver, B: SearchObserver> SearchObserver for (A, B) {
    fn capture(&mut self, snapshot: &Snapshot<'_>) {
        self.0.capture(snapshot);
        self.1.capture(snapshot);
    }
    fn finalize(&mut self, snapshot: &Snapshot<'_>) {
        self.0.finalize(snapshot);
        self.1.finalize(snapshot);
    }
}

/// Observing only when present.
impl<O: SearchObserver> SearchObserver for Option<O> {
    fn capture(&mut self, snapshot: &Snapshot<'_>) {
        if let Some(observer) = self {
            observer.capture(snapshot)
        }
    }
    fn finalize(&mut self, snapshot: &Snapshot<'_>) {
        if let Some(observer) = self {
            observer.finalize(snapshot)
        }
    }
}

/// Displays the maze of a snapshot with the cell being expanded marked as `*`.
pub struct StepTrace<'a, 'b>(pub &'a Snapshot<'b>);

impl fmt::Display for StepTrace<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let current = self.0.current;
        self.0.maze.write_with(f, |p| Some(*p) == current)
    }
}

/// Logs every step at debug level, for watching a search unfold in a terminal. With `redraw` set
/// the maze is printed to stdout on every step, optionally waiting `pause` after each one.
#[derive(Clone, Debug, Default)]
pub struct StepLogger {
    pub redraw: bool,
    pub pause: Option<Duration>,
}

impl StepLogger {
    pub fn new(redraw: bool, pause: Option<Duration>) -> StepLogger {
        StepLogger { redraw, pause }
    }
}

impl SearchObserver for StepLogger {
    fn capture(&mut self, snapshot: &Snapshot<'_>) {
        if let Some(current) = snapshot.current {
            debug!(
                "Step {}: expanding {} with {} explored",
                snapshot.step,
                current,
                snapshot.explored.len()
            );
        }
        if self.redraw {
            println!("{}", StepTrace(snapshot));
        }
        if let Some(pause) = self.pause {
            thread::sleep(pause);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_marks_current_cell() {
        let maze: Maze = "#A \n  B\n".parse().unwrap();
        let explored = ExploredSet::default();
        let snapshot = Snapshot {
            maze: &maze,
            explored: &explored,
            current: Some(Maze::cell(0, 2)),
            solution: None,
            step: 2,
        };
        assert_eq!(StepTrace(&snapshot).to_string(), "█A*\n  B\n");
        let finished = Snapshot {
            current: None,
            ..snapshot
        };
        assert_eq!(StepTrace(&finished).to_string(), "█A \n  B\n");
    }

    #[derive(Default)]
    struct Steps(usize);

    impl SearchObserver for Steps {
        fn capture(&mut self, _snapshot: &Snapshot<'_>) {
            self.0 += 1;
        }
    }

    #[test]
    fn optional_observer_forwards_when_present() {
        let maze: Maze = "AB".parse().unwrap();
        let explored = ExploredSet::default();
        let snapshot = Snapshot {
            maze: &maze,
            explored: &explored,
            current: Some(maze.start()),
            solution: None,
            step: 1,
        };
        let mut present = Some(Steps::default());
        let mut absent: Option<Steps> = None;
        present.capture(&snapshot);
        absent.capture(&snapshot);
        assert_eq!(present.map(|s| s.0), Some(1));
        assert!(absent.is_none());
    }
}
