use crate::Action;
use grid_util::point::Point;

/// Handle of a [SearchNode] stored in a [NodeArena].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(usize);

/// A state together with the node it was discovered from and the action taken to get there. The
/// root node has neither a parent nor an action.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SearchNode {
    pub state: Point,
    pub parent: Option<NodeId>,
    pub action: Option<Action>,
}

impl SearchNode {
    pub fn root(state: Point) -> SearchNode {
        SearchNode {
            state,
            parent: None,
            action: None,
        }
    }

    pub fn child(state: Point, parent: NodeId, action: Action) -> SearchNode {
        SearchNode {
            state,
            parent: Some(parent),
            action: Some(action),
        }
    }
}

/// Owns every node removed from the frontier so that children can refer to their parent by
/// [NodeId]. A parent is always inserted before its children, which rules out cycles.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn insert(&mut self, node: SearchNode) -> NodeId {
        debug_assert!(node.parent.map_or(true, |NodeId(ix)| ix < self.nodes.len()));
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Follows parent handles from `id` back to the root and returns the `(action, state)` pairs
    /// in forward order. The root itself is not part of the result since it has no action.
    pub fn path_to(&self, id: NodeId) -> Vec<(Action, Point)> {
        let mut path: Vec<(Action, Point)> =
            std::iter::successors(Some(id), |&current| self.get(current).parent)
                .map(|current| self.get(current))
                .filter_map(|node| node.action.map(|action| (action, node.state)))
                .collect();
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_walks_back_to_root() {
        let mut arena = NodeArena::new();
        let root = arena.insert(SearchNode::root(Point::new(0, 0)));
        let a = arena.insert(SearchNode::child(Point::new(1, 0), root, Action::Right));
        let _sibling = arena.insert(SearchNode::child(Point::new(0, 1), root, Action::Down));
        let b = arena.insert(SearchNode::child(Point::new(1, 1), a, Action::Down));
        assert_eq!(
            arena.path_to(b),
            vec![
                (Action::Right, Point::new(1, 0)),
                (Action::Down, Point::new(1, 1))
            ]
        );
        assert!(arena.path_to(root).is_empty());
        assert_eq!(arena.len(), 4);
    }
}
