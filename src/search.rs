use crate::maze::Action;
use crate::maze::Cost;
use crate::maze::Position;
use crate::trace::Frame;

/// A reference to a `SearchNode` in its `SearchTree`.
///
/// Ids are handed out in creation order, so a `NodeId` doubles as the
/// insertion sequence number the priority frontier uses to break ties.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One entry of the search tree.
///
/// `parent` is a back-reference by index; the arena owns every node, so
/// nothing here outlives the search invocation that allocated it.
#[derive(Copy, Clone, Debug)]
pub struct SearchNode {
    pub state: Position,
    pub parent: Option<(NodeId, Action)>,
    pub g: Cost,
}

impl SearchNode {
    pub fn root(state: Position) -> Self {
        Self {
            state,
            parent: None,
            g: 0,
        }
    }

    pub fn reached(state: Position, parent: NodeId, action: Action, g: Cost) -> Self {
        Self {
            state,
            parent: Some((parent, action)),
            g,
        }
    }
}

/// All the search nodes of one run. Naturally forms a tree rooted at the
/// start node, since each node keeps the index of the node that reached it.
#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: vec![] }
    }

    #[inline(always)]
    pub fn push(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Positions from the start to `id`, following parent links and
    /// reversing. `[start]` for the root itself. O(depth).
    #[must_use]
    pub fn trail(&self, id: NodeId) -> Vec<Position> {
        let mut positions = vec![self[id].state];
        let mut current = id;
        while let Some((parent, _)) = self[current].parent {
            debug_assert!(parent < current);
            positions.push(self[parent].state);
            current = parent;
        }
        positions.reverse();
        positions
    }

    /// Full path to `id`, actions and accumulated cost included.
    #[must_use]
    pub fn path(&self, id: NodeId) -> Path {
        let mut positions = vec![self[id].state];
        let mut actions = vec![];
        let mut current = id;
        while let Some((parent, action)) = self[current].parent {
            debug_assert!(parent < current);
            positions.push(self[parent].state);
            actions.push(action);
            current = parent;
        }
        positions.reverse();
        actions.reverse();
        Path {
            positions,
            actions,
            cost: self[id].g,
        }
    }
}

impl std::ops::Index<NodeId> for SearchTree {
    type Output = SearchNode;

    #[inline(always)]
    fn index(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }
}

/// A start-to-goal walk through the maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    /// Visited cells, start and goal inclusive.
    pub positions: Vec<Position>,
    /// The moves between them; one fewer than `positions`.
    pub actions: Vec<Action>,
    pub cost: Cost,
}

impl Path {
    /// Number of positions, start and goal included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn start(&self) -> Option<Position> {
        self.positions.first().copied()
    }
    pub fn end(&self) -> Option<Position> {
        self.positions.last().copied()
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => {
                write!(f, "Path({}, {start}", self.cost)?;
                for action in &self.actions {
                    write!(f, "{action}")?;
                }
                write!(f, "{end})")
            }
            _ => write!(f, "Path()"),
        }
    }
}

/// What a single search invocation reports back.
#[derive(Debug, PartialEq, Eq)]
pub struct SearchReport {
    /// `None` when the goal is unreachable. Not an error.
    pub path: Option<Path>,
    /// Size of the explored set on termination.
    pub expanded: usize,
    /// One frame per expansion when tracing, empty otherwise.
    pub frames: Vec<Frame>,
}

impl SearchReport {
    pub fn path_length(&self) -> usize {
        self.path.as_ref().map_or(0, Path::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Action;

    #[test]
    fn root_trail_is_just_the_start() {
        let mut tree = SearchTree::new();
        let start = Position::new(2, 3);
        let root = tree.push(SearchNode::root(start));
        assert_eq!(tree.trail(root), vec![start]);

        let path = tree.path(root);
        assert_eq!(path.positions, vec![start]);
        assert!(path.actions.is_empty());
        assert_eq!(path.cost, 0);
    }

    #[test]
    fn path_reconstruction_reverses_parent_links() {
        let mut tree = SearchTree::new();
        let root = tree.push(SearchNode::root(Position::new(0, 0)));
        let a = tree.push(SearchNode::reached(Position::new(1, 0), root, Action::Down, 1));
        let b = tree.push(SearchNode::reached(Position::new(1, 1), a, Action::Right, 2));

        let path = tree.path(b);
        assert_eq!(
            path.positions,
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)]
        );
        assert_eq!(path.actions, vec![Action::Down, Action::Right]);
        assert_eq!(path.cost, 2);
        assert_eq!(path.len(), 3);
        assert_eq!(tree.trail(b), path.positions);
    }

    #[test]
    fn node_ids_are_insertion_ordered() {
        let mut tree = SearchTree::new();
        let first = tree.push(SearchNode::root(Position::new(0, 0)));
        let second = tree.push(SearchNode::reached(Position::new(0, 1), first, Action::Right, 1));
        assert!(first < second);
        assert_eq!(tree.len(), 2);
    }
}
