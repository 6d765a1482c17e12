use crate::maze::Maze;
use crate::maze::MazeCell;

/// Attempts before giving up on placing the start and goal.
pub const MAX_PLACEMENT_TRIES: usize = 1000;

/// Generates a square maze with random walls and random start/goal cells.
///
/// Each cell is a wall with probability `density`. Start and goal are drawn
/// uniformly until both land on distinct open cells; `None` past the retry
/// cap or for degenerate sizes. The result only depends on `rng`, so seeded
/// callers get reproducible mazes. Reachability is not guaranteed: a dense
/// maze may well wall the goal off, which the engines report as a normal
/// no-path outcome.
pub fn generate<R: rand::Rng>(size: usize, density: f64, rng: &mut R) -> Option<Maze> {
    if size < 2 {
        return None;
    }

    let mut cells = vec![vec![MazeCell::Open; size]; size];
    for row in cells.iter_mut() {
        for cell in row.iter_mut() {
            if rng.random::<f64>() < density {
                *cell = MazeCell::Wall;
            }
        }
    }

    for _tries in 0..MAX_PLACEMENT_TRIES {
        let start = (rng.random_range(0..size), rng.random_range(0..size));
        let goal = (rng.random_range(0..size), rng.random_range(0..size));
        if start == goal
            || cells[start.0][start.1] == MazeCell::Wall
            || cells[goal.0][goal.1] == MazeCell::Wall
        {
            continue;
        }

        cells[start.0][start.1] = MazeCell::Start;
        cells[goal.0][goal.1] = MazeCell::Goal;
        // Rectangular by construction.
        return Maze::new(cells).ok();
    }

    log::warn!("gave up placing start/goal after {MAX_PLACEMENT_TRIES} tries (density {density})");
    None
}
