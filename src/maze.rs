use derive_more::Display;
use smallvec::SmallVec;
use thiserror::Error;

type Coord = u32;

/// Path cost. One unit per move, no weighted edges.
pub type Cost = u32;

/// A cell coordinate, `(0, 0)` being the top-left corner of the maze.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
#[display("({row},{col})")]
pub struct Position {
    pub row: Coord,
    pub col: Coord,
}

impl Position {
    pub fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }
}

impl From<(Coord, Coord)> for Position {
    fn from((row, col): (Coord, Coord)) -> Self {
        Self { row, col }
    }
}

/// Estimated remaining cost on a 4-connected unit-cost grid.
///
/// Never overestimates, so A* stays optimal.
#[inline(always)]
pub fn manhattan_distance(a: Position, b: Position) -> Cost {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}

/// A move between adjacent cells. Rows run top to bottom.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Action {
    #[display("↑")]
    Up, // row--
    #[display("↓")]
    Down, // row++
    #[display("←")]
    Left, // col--
    #[display("→")]
    Right, // col++
}

impl Action {
    /// Candidate enumeration order for successor generation.
    ///
    /// Fixed on purpose: it decides which of several equal-cost paths
    /// BFS returns and the generation order feeding A* tie-breaks.
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Applies the move, or `None` when it would leave the grid at the
    /// top or left edge. The bottom and right edges are the maze's to check.
    #[inline(always)]
    pub fn apply(self, pos: Position) -> Option<Position> {
        match self {
            Action::Up => pos.row.checked_sub(1).map(|row| Position::new(row, pos.col)),
            Action::Down => Some(Position::new(pos.row + 1, pos.col)),
            Action::Left => pos.col.checked_sub(1).map(|col| Position::new(pos.row, col)),
            Action::Right => Some(Position::new(pos.row, pos.col + 1)),
        }
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum MazeCell {
    #[display("░")]
    Open,
    #[display("█")]
    Wall,
    #[display("S")]
    Start,
    #[display("G")]
    Goal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("no {kind} cell in the maze")]
    MissingCell { kind: MazeCell },
    #[error("position {pos} lies outside the {rows}x{cols} grid")]
    OutOfBounds { pos: Position, rows: Coord, cols: Coord },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeParseError {
    #[error("empty input")]
    EmptyInput,
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },
    #[error("invalid character '{ch}' at ({row},{col})")]
    InvalidCharacter { ch: char, row: usize, col: usize },
    #[error("more than one {kind} cell (first at {first}, again at {again})")]
    DuplicateCell { kind: MazeCell, first: Position, again: Position },
}

impl std::convert::TryFrom<char> for MazeCell {
    type Error = char;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            ' ' | '.' | '░' => Ok(MazeCell::Open),
            '#' | 'X' | '█' => Ok(MazeCell::Wall),
            'S' => Ok(MazeCell::Start),
            'G' => Ok(MazeCell::Goal),
            ch => Err(ch),
        }
    }
}

/// A rectangular grid of cells, immutable for the duration of a search.
///
/// A well-formed maze holds exactly one `Start` and one `Goal`; the parser
/// and the generator both guarantee it.
#[derive(Clone, PartialEq, Eq)]
pub struct Maze {
    cells: Vec<Vec<MazeCell>>,
}

impl Maze {
    pub fn new(cells: Vec<Vec<MazeCell>>) -> Result<Self, MazeParseError> {
        if cells.is_empty() || cells[0].is_empty() {
            return Err(MazeParseError::EmptyInput);
        }
        let expected = cells[0].len();
        for (row, line) in cells.iter().enumerate() {
            if line.len() != expected {
                return Err(MazeParseError::RaggedRow {
                    row,
                    len: line.len(),
                    expected,
                });
            }
        }
        Ok(Self { cells })
    }

    pub fn rows(&self) -> Coord {
        self.cells.len() as Coord
    }
    pub fn cols(&self) -> Coord {
        self.cells[0].len() as Coord
    }
    pub fn dimensions(&self) -> (Coord, Coord) {
        (self.rows(), self.cols())
    }

    #[inline(always)]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows() && pos.col < self.cols()
    }

    #[inline(always)]
    fn at(&self, pos: Position) -> MazeCell {
        debug_assert!(self.in_bounds(pos));
        self.cells[pos.row as usize][pos.col as usize]
    }

    pub fn cell_at(&self, pos: Position) -> Result<MazeCell, MazeError> {
        if !self.in_bounds(pos) {
            return Err(MazeError::OutOfBounds {
                pos,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(self.at(pos))
    }

    /// The unique position of the given cell kind.
    ///
    /// Scans row-major; uniqueness is a construction guarantee.
    pub fn find_position(&self, kind: MazeCell) -> Result<Position, MazeError> {
        for (row, line) in self.cells.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                if *cell == kind {
                    return Ok(Position::new(row as Coord, col as Coord));
                }
            }
        }
        Err(MazeError::MissingCell { kind })
    }

    /// Walkable successors of `pos`, in the fixed `Action::ALL` order.
    #[inline]
    pub fn neighbours(&self, pos: Position) -> SmallVec<[(Action, Position); 4]> {
        debug_assert!(self.in_bounds(pos));
        let mut v = SmallVec::new();
        for action in Action::ALL {
            if let Some(next) = action.apply(pos) {
                if self.in_bounds(next) && self.at(next) != MazeCell::Wall {
                    v.push((action, next));
                }
            }
        }
        v
    }

    /// Number of non-wall cells; an upper bound on node expansions.
    pub fn walkable_cells(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| **c != MazeCell::Wall)
            .count()
    }

    pub(crate) fn grid(&self) -> &[Vec<MazeCell>] {
        &self.cells
    }
}

impl std::convert::TryFrom<&str> for Maze {
    type Error = MazeParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut cells: Vec<Vec<MazeCell>> = vec![];
        let mut start: Option<Position> = None;
        let mut goal: Option<Position> = None;

        for (row, line) in s.lines().enumerate() {
            let mut cell_row = vec![];
            for (col, ch) in line.chars().enumerate() {
                let cell = MazeCell::try_from(ch)
                    .map_err(|ch| MazeParseError::InvalidCharacter { ch, row, col })?;
                let pos = Position::new(row as Coord, col as Coord);
                let seen = match cell {
                    MazeCell::Start => &mut start,
                    MazeCell::Goal => &mut goal,
                    _ => {
                        cell_row.push(cell);
                        continue;
                    }
                };
                if let Some(first) = *seen {
                    return Err(MazeParseError::DuplicateCell {
                        kind: cell,
                        first,
                        again: pos,
                    });
                }
                *seen = Some(pos);
                cell_row.push(cell);
            }
            cells.push(cell_row);
        }

        Maze::new(cells)
    }
}

impl std::fmt::Display for Maze {
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

impl std::fmt::Debug for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Maze{:?}", self.dimensions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn maze() -> Maze {
        Maze::try_from(indoc! {"
            S....
            .XX..
            ...X.
            .X...
            ....G
        "})
        .unwrap()
    }

    #[test]
    fn parse_and_dimensions() {
        let m = maze();
        assert_eq!(m.dimensions(), (5, 5));
        assert_eq!(m.find_position(MazeCell::Start).unwrap(), Position::new(0, 0));
        assert_eq!(m.find_position(MazeCell::Goal).unwrap(), Position::new(4, 4));
        assert_eq!(m.walkable_cells(), 21);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(Maze::try_from(""), Err(MazeParseError::EmptyInput));
        assert_eq!(
            Maze::try_from("..\n..."),
            Err(MazeParseError::RaggedRow { row: 1, len: 3, expected: 2 })
        );
        assert!(matches!(
            Maze::try_from(".?."),
            Err(MazeParseError::InvalidCharacter { ch: '?', row: 0, col: 1 })
        ));
        assert!(matches!(
            Maze::try_from("SS\nG."),
            Err(MazeParseError::DuplicateCell { kind: MazeCell::Start, .. })
        ));
    }

    #[test]
    fn missing_cells_are_reported() {
        let m = Maze::try_from("..\n..").unwrap();
        assert_eq!(
            m.find_position(MazeCell::Start),
            Err(MazeError::MissingCell { kind: MazeCell::Start })
        );
    }

    #[test]
    fn cell_at_checks_bounds() {
        let m = maze();
        assert_eq!(m.cell_at(Position::new(1, 1)), Ok(MazeCell::Wall));
        assert_eq!(
            m.cell_at(Position::new(5, 0)),
            Err(MazeError::OutOfBounds { pos: Position::new(5, 0), rows: 5, cols: 5 })
        );
    }

    #[test]
    fn neighbour_order_is_up_down_left_right() {
        let m = maze();
        // Both (1, 1) above and (3, 1) below are walls.
        let n = m.neighbours(Position::new(2, 1));
        assert_eq!(
            n.as_slice(),
            &[
                (Action::Left, Position::new(2, 0)),
                (Action::Right, Position::new(2, 2)),
            ]
        );
        let n = m.neighbours(Position::new(2, 2));
        assert_eq!(
            n.as_slice(),
            &[
                (Action::Down, Position::new(3, 2)),
                (Action::Left, Position::new(2, 1)),
            ]
        );
    }

    #[test]
    fn neighbours_respect_edges() {
        let m = maze();
        let n = m.neighbours(Position::new(0, 0));
        assert_eq!(
            n.as_slice(),
            &[
                (Action::Down, Position::new(1, 0)),
                (Action::Right, Position::new(0, 1)),
            ]
        );
        let n = m.neighbours(Position::new(4, 4));
        assert_eq!(
            n.as_slice(),
            &[
                (Action::Up, Position::new(3, 4)),
                (Action::Left, Position::new(4, 3)),
            ]
        );
    }

    #[test]
    fn manhattan() {
        assert_eq!(manhattan_distance(Position::new(0, 0), Position::new(4, 4)), 8);
        assert_eq!(manhattan_distance(Position::new(3, 1), Position::new(1, 2)), 3);
        assert_eq!(manhattan_distance(Position::new(2, 2), Position::new(2, 2)), 0);
    }
}
