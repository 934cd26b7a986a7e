//! Pending search nodes, removed either last-in-first-out (depth-first search) or
//! first-in-first-out (breadth-first search).
use crate::node::SearchNode;
use crate::MazeError;
use core::fmt;
use fxhash::FxHashMap;
use grid_util::point::Point;
use std::collections::VecDeque;
use std::str::FromStr;

/// Which end of the frontier [Frontier::remove] takes from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum FrontierPolicy {
    /// Stack order, giving depth-first search.
    #[default]
    LastInFirstOut,
    /// Queue order, giving breadth-first search.
    FirstInFirstOut,
}

impl FromStr for FrontierPolicy {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dfs" | "stack" | "lifo" => Ok(FrontierPolicy::LastInFirstOut),
            "bfs" | "queue" | "fifo" => Ok(FrontierPolicy::FirstInFirstOut),
            _ => Err(MazeError::UnknownStrategy(s.to_owned())),
        }
    }
}

impl fmt::Display for FrontierPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FrontierPolicy::LastInFirstOut => write!(f, "depth-first"),
            FrontierPolicy::FirstInFirstOut => write!(f, "breadth-first"),
        }
    }
}

/// An ordered collection of [SearchNode]s. Adding never suppresses duplicates; callers check
/// [contains_state](Frontier::contains_state) first.
///
/// Next to the nodes themselves a count per state is kept in sync so that membership checks do
/// not have to scan the whole frontier. This does not influence removal order.
#[derive(Clone, Debug)]
pub struct Frontier {
    policy: FrontierPolicy,
    nodes: VecDeque<SearchNode>,
    states: FxHashMap<Point, usize>,
}

impl Frontier {
    pub fn new(policy: FrontierPolicy) -> Frontier {
        Frontier {
            policy,
            nodes: VecDeque::new(),
            states: FxHashMap::default(),
        }
    }

    pub fn add(&mut self, node: SearchNode) {
        *self.states.entry(node.state).or_insert(0) += 1;
        self.nodes.push_back(node);
    }

    /// Takes the next node according to the policy, failing with [MazeError::EmptyFrontier]
    /// when nothing is left.
    pub fn remove(&mut self) -> Result<SearchNode, MazeError> {
        let node = match self.policy {
            FrontierPolicy::LastInFirstOut => self.nodes.pop_back(),
            FrontierPolicy::FirstInFirstOut => self.nodes.pop_front(),
        }
        .ok_or(MazeError::EmptyFrontier)?;
        if let Some(count) = self.states.get_mut(&node.state) {
            *count -= 1;
            if *count == 0 {
                self.states.remove(&node.state);
            }
        }
        Ok(node)
    }

    pub fn contains_state(&self, state: &Point) -> bool {
        self.states.contains_key(state)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
