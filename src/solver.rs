use crate::frontier::{Frontier, FrontierPolicy};
use crate::maze::Maze;
use crate::node::{NodeArena, SearchNode};
use crate::observer::{SearchObserver, Snapshot};
use crate::{Action, MazeError, FINAL_FRAMES};
use core::fmt;
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexSet;
use itertools::Itertools;
use log::{debug, info, warn};

/// Explored states in the order they were expanded.
pub type ExploredSet = IndexSet<Point, FxBuildHasher>;

/// The actions taken from the start and the cells they lead to, both excluding the start and
/// ending at the goal.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Solution {
    pub actions: Vec<Action>,
    pub cells: Vec<Point>,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl FromIterator<(Action, Point)> for Solution {
    fn from_iter<I: IntoIterator<Item = (Action, Point)>>(iter: I) -> Self {
        let (actions, cells) = iter.into_iter().unzip();
        Solution { actions, cells }
    }
}

/// Everything a finished search produced.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub solution: Solution,
    /// States expanded before the goal was removed. Never contains the goal.
    pub explored: ExploredSet,
    /// Nodes removed from the frontier, including the goal node.
    pub states_explored: usize,
}

impl SearchResult {
    /// Pairs the result with its maze for printing the solution path.
    pub fn overlay<'a>(&'a self, maze: &'a Maze) -> SolutionOverlay<'a> {
        SolutionOverlay {
            maze,
            solution: &self.solution,
        }
    }
}

/// Displays a maze with the cells of a solution marked as `*`.
pub struct SolutionOverlay<'a> {
    maze: &'a Maze,
    solution: &'a Solution,
}

impl fmt::Display for SolutionOverlay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.maze.write_with(f, |p| self.solution.cells.contains(p))
    }
}

/// Uninformed search from the start to the goal of a [Maze]. The [FrontierPolicy] alone decides
/// between depth-first and breadth-first search.
#[derive(Clone, Debug)]
pub struct MazeSolver {
    pub policy: FrontierPolicy,
    /// How often [SearchObserver::finalize] is called once the goal is found.
    pub final_frames: usize,
}

impl Default for MazeSolver {
    fn default() -> MazeSolver {
        MazeSolver::new(FrontierPolicy::default())
    }
}

impl MazeSolver {
    pub fn new(policy: FrontierPolicy) -> MazeSolver {
        MazeSolver {
            policy,
            final_frames: FINAL_FRAMES,
        }
    }

    pub fn dfs() -> MazeSolver {
        MazeSolver::new(FrontierPolicy::LastInFirstOut)
    }

    pub fn bfs() -> MazeSolver {
        MazeSolver::new(FrontierPolicy::FirstInFirstOut)
    }

    /// Searches without reporting progress.
    pub fn solve(&self, maze: &Maze) -> Result<SearchResult, MazeError> {
        self.solve_observed(maze, &mut ())
    }

    /// Searches for the goal, reporting each expansion to `observer`. Fails with
    /// [MazeError::NoSolution] once the frontier runs dry.
    pub fn solve_observed<O>(
        &self,
        maze: &Maze,
        observer: &mut O,
    ) -> Result<SearchResult, MazeError>
    where
        O: SearchObserver + ?Sized,
    {
        let goal = maze.goal();
        info!(
            "Starting {} search from {} to {} (reachable: {})",
            self.policy,
            maze.start(),
            goal,
            maze.is_solvable()
        );
        let mut frontier = Frontier::new(self.policy);
        frontier.add(SearchNode::root(maze.start()));
        let mut arena = NodeArena::new();
        let mut explored = ExploredSet::default();
        let mut states_explored = 0;

        loop {
            let node = frontier.remove().map_err(|_| {
                warn!("Frontier exhausted after {} states", states_explored);
                MazeError::NoSolution {
                    explored: states_explored,
                }
            })?;
            states_explored += 1;

            observer.capture(&Snapshot {
                maze,
                explored: &explored,
                current: Some(node.state),
                solution: None,
                step: states_explored,
            });

            let id = arena.insert(node);
            if node.state == goal {
                let solution: Solution = arena.path_to(id).into_iter().collect();
                info!(
                    "Found a path of length {} after exploring {} states",
                    solution.len(),
                    states_explored
                );
                debug!("Actions: {}", solution.actions.iter().join(", "));
                for _ in 0..self.final_frames {
                    observer.finalize(&Snapshot {
                        maze,
                        explored: &explored,
                        current: None,
                        solution: Some(&solution),
                        step: states_explored,
                    });
                }
                return Ok(SearchResult {
                    solution,
                    explored,
                    states_explored,
                });
            }

            explored.insert(node.state);
            for (action, state) in maze.neighbours(&node.state) {
                if !frontier.contains_state(&state) && !explored.contains(&state) {
                    frontier.add(SearchNode::child(state, id, action));
                }
            }
        }
    }
}
