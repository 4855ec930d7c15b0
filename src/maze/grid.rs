use std::fmt;

use super::{Direction, Position, cell::Cell};
use crate::error::MazeError;

/// Row-major grid of cell kinds. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Box<[Cell]>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Parse a maze from its text form, one row per line.
    ///
    /// Trailing whitespace on each line and trailing blank lines are ignored.
    /// Every row must have the same number of cells and only use the glyphs
    /// known to [`Cell::from_glyph`].
    pub fn parse(text: &str) -> Result<Grid, MazeError> {
        let mut lines = text.lines().map(str::trim_end).collect::<Vec<_>>();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        let Some(first) = lines.first() else {
            return Err(MazeError::Empty);
        };
        let cols = first.chars().count();
        if cols == 0 {
            return Err(MazeError::Empty);
        }

        let mut data = Vec::with_capacity(cols * lines.len());
        for (row, line) in lines.iter().enumerate() {
            let start_len = data.len();
            for (col, glyph) in line.chars().enumerate() {
                let cell = Cell::from_glyph(glyph).ok_or(MazeError::Malformed {
                    line: row + 1,
                    column: col + 1,
                    glyph,
                })?;
                data.push(cell);
            }
            let found = data.len() - start_len;
            if found != cols {
                return Err(MazeError::Ragged {
                    line: row + 1,
                    expected: cols,
                    found,
                });
            }
        }

        Ok(Grid {
            data: data.into_boxed_slice(),
            rows: lines.len(),
            cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    fn ravel_index(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    /// Cell at `pos`, or `None` when out of bounds.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.is_in_bounds(pos) {
            Some(self.data[self.ravel_index(pos)])
        } else {
            None
        }
    }

    pub fn is_passable(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(Cell::is_passable)
    }

    /// First cell of the given kind in row-major order.
    pub fn find(&self, kind: Cell) -> Result<Position, MazeError> {
        self.data
            .iter()
            .position(|&cell| cell == kind)
            .map(|idx| Position::new(idx / self.cols, idx % self.cols))
            .ok_or(MazeError::NotFound(kind))
    }

    /// Passable orthogonal neighbors of `pos`, always in the order right, down, left, up.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::SEARCH_ORDER
            .into_iter()
            .filter_map(move |direction| pos.step(direction))
            .filter(|&next| self.is_passable(next))
    }
}

impl std::ops::Index<Position> for Grid {
    type Output = Cell;

    fn index(&self, index: Position) -> &Self::Output {
        &self.data[self.ravel_index(index)]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols) {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
