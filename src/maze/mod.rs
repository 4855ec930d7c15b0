pub mod cell;
mod grid;

use std::{fmt, path::Path};

pub use cell::Cell;
pub use grid::Grid;

use crate::error::MazeError;

/// A `(row, col)` coordinate inside a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// The orthogonal neighbor in `direction`, or `None` if it would underflow.
    /// Upper bounds are left to the grid.
    pub fn step(self, direction: Direction) -> Option<Position> {
        let (row, col) = match direction {
            Direction::Right => (Some(self.row), self.col.checked_add(1)),
            Direction::Down => (self.row.checked_add(1), Some(self.col)),
            Direction::Left => (Some(self.row), self.col.checked_sub(1)),
            Direction::Up => (self.row.checked_sub(1), Some(self.col)),
        };
        Some(Position::new(row?, col?))
    }

    /// Manhattan distance to `other`.
    pub fn manhattan(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position::new(row, col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// Order in which neighbors are generated by the grid and pushed by the solvers.
    pub const SEARCH_ORDER: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// `(row, col)` delta of one step in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
        }
    }

    pub fn from_delta(delta: (isize, isize)) -> Option<Direction> {
        Direction::SEARCH_ORDER
            .into_iter()
            .find(|direction| direction.delta() == delta)
    }
}

/// A parsed maze together with its start and goal positions.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid,
    start: Position,
    goal: Position,
}

impl Maze {
    /// Parse maze text and locate its start and goal.
    /// When several start or goal cells exist the first one in row-major order wins.
    pub fn from_text(text: &str) -> Result<Maze, MazeError> {
        let grid = Grid::parse(text)?;
        let start = grid.find(Cell::Start)?;
        let goal = grid.find(Cell::Goal)?;
        Ok(Maze { grid, start, goal })
    }

    /// Read and parse a maze file.
    pub fn load(path: impl AsRef<Path>) -> Result<Maze, MazeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MazeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let maze = Maze::from_text(&text)?;
        tracing::info!(
            "[maze] Loaded {}x{} maze from {}",
            maze.grid.rows(),
            maze.grid.cols(),
            path.display()
        );
        Ok(maze)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.goal
    }
}
