use rustc_hash::FxHashSet;

use crate::frontier::Frontier;
use crate::frontier::LifoFrontier;
use crate::maze::Maze;
use crate::maze::MazeCell;
use crate::maze::MazeError;
use crate::search::SearchNode;
use crate::search::SearchReport;
use crate::search::SearchTree;
use crate::trace::snapshot;

/// Depth-first search.
///
/// States are marked explored when they are popped. The stack may hold
/// several entries for one state; later pops of an already-explored state
/// are skipped without counting as expansions. The path found is valid but
/// carries no optimality guarantee.
pub fn search(maze: &Maze, record_trace: bool) -> Result<SearchReport, MazeError> {
    let start = maze.find_position(MazeCell::Start)?;
    let goal = maze.find_position(MazeCell::Goal)?;

    let mut tree = SearchTree::new();
    let mut frontier = LifoFrontier::new();
    let mut explored = FxHashSet::default();
    let mut frames = vec![];

    let root = tree.push(SearchNode::root(start));
    frontier.push(root, start, ());
    if record_trace {
        frames.push(snapshot(maze, &explored, &[start], goal));
    }

    while let Some(id) = frontier.pop() {
        let state = tree[id].state;
        if !explored.insert(state) {
            // A deeper copy of this state was expanded already.
            continue;
        }
        if state == goal {
            let path = tree.path(id);
            if record_trace {
                frames.push(snapshot(maze, &explored, &path.positions, goal));
            }
            return Ok(SearchReport {
                path: Some(path),
                expanded: explored.len(),
                frames,
            });
        }

        if record_trace {
            frames.push(snapshot(maze, &explored, &tree.trail(id), goal));
        }

        let g = tree[id].g;
        for (action, next) in maze.neighbours(state) {
            if !explored.contains(&next) {
                let child = tree.push(SearchNode::reached(next, id, action, g + 1));
                frontier.push(child, next, ());
            }
        }
    }

    Ok(SearchReport {
        path: None,
        expanded: explored.len(),
        frames,
    })
}
