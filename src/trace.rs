use derive_more::Display;
use rustc_hash::FxHashSet;

use crate::maze::Maze;
use crate::maze::MazeCell;
use crate::maze::Position;

/// A cell of a rendered exploration frame.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum TraceCell {
    Cell(MazeCell),
    #[display("▒")]
    Explored,
    #[display("●")]
    PathStep,
}

/// One rendered grid, same shape as the maze it was taken from.
///
/// This is the sole interface the visualization side consumes; it plays a
/// sequence of frames at a fixed display interval.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    cells: Vec<Vec<TraceCell>>,
}

impl Frame {
    pub fn cell(&self, pos: Position) -> TraceCell {
        self.cells[pos.row as usize][pos.col as usize]
    }

    pub fn grid(&self) -> &[Vec<TraceCell>] {
        &self.cells
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for line in &self.cells {
            for cell in line {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Renders the exploration state into a frame.
///
/// Explored cells are overwritten first, then the current best-known path,
/// and the goal is always forced back to its marker so it stays visible
/// once the search closes in. The maze itself is never touched.
#[must_use]
pub fn snapshot(
    maze: &Maze,
    explored: &FxHashSet<Position>,
    current_path: &[Position],
    goal: Position,
) -> Frame {
    let mut cells: Vec<Vec<TraceCell>> = maze
        .grid()
        .iter()
        .map(|line| line.iter().map(|c| TraceCell::Cell(*c)).collect())
        .collect();

    for pos in explored {
        cells[pos.row as usize][pos.col as usize] = TraceCell::Explored;
    }
    for pos in current_path {
        cells[pos.row as usize][pos.col as usize] = TraceCell::PathStep;
    }
    cells[goal.row as usize][goal.col as usize] = TraceCell::Cell(MazeCell::Goal);

    Frame { cells }
}
