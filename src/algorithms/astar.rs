use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

use crate::frontier::AStarRank;
use crate::frontier::Frontier;
use crate::frontier::PriorityFrontier;
use crate::maze::Cost;
use crate::maze::Maze;
use crate::maze::MazeCell;
use crate::maze::MazeError;
use crate::maze::Position;
use crate::maze::manhattan_distance;
use crate::search::SearchNode;
use crate::search::SearchReport;
use crate::search::SearchTree;
use crate::trace::snapshot;

/// A* with the Manhattan-distance heuristic.
///
/// The g-score map keeps the best known cost per state; a better path to a
/// queued state is re-pushed as a fresh node and the stale frontier entry
/// is discarded lazily when it surfaces. With an admissible and consistent
/// heuristic the first goal pop carries an optimal path.
pub fn search(maze: &Maze, record_trace: bool) -> Result<SearchReport, MazeError> {
    let start = maze.find_position(MazeCell::Start)?;
    let goal = maze.find_position(MazeCell::Goal)?;

    let mut tree = SearchTree::new();
    let mut frontier = PriorityFrontier::new();
    let mut explored = FxHashSet::default();
    let mut g_score: FxHashMap<Position, Cost> = FxHashMap::default();
    let mut frames = vec![];

    let root = tree.push(SearchNode::root(start));
    g_score.insert(start, 0);
    frontier.push(root, start, AStarRank::new(0, manhattan_distance(start, goal)));
    if record_trace {
        frames.push(snapshot(maze, &explored, &[start], goal));
    }

    while let Some(id) = frontier.pop() {
        let state = tree[id].state;
        if !explored.insert(state) {
            // Stale entry: this state already came off the heap cheaper.
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
            if explored.contains(&next) {
                continue;
            }
            let next_g = g + 1;
            match g_score.get(&next) {
                Some(&best) if next_g >= best => continue,
                _ => {}
            }
            g_score.insert(next, next_g);
            let child = tree.push(SearchNode::reached(next, id, action, next_g));
            frontier.push(
                child,
                next,
                AStarRank::new(next_g, manhattan_distance(next, goal)),
            );
        }
    }

    Ok(SearchReport {
        path: None,
        expanded: explored.len(),
        frames,
    })
}
