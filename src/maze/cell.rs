use std::fmt;

/// Kind of a single maze cell, fixed at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Floor,
    Start,
    Goal,
}

impl Cell {
    pub const WALL_GLYPH: char = 'X';
    pub const FLOOR_GLYPH: char = 'E';
    pub const START_GLYPH: char = 'S';
    pub const GOAL_GLYPH: char = 'G';

    /// Map a maze file glyph to its cell kind, or `None` for anything outside the alphabet.
    pub fn from_glyph(glyph: char) -> Option<Cell> {
        match glyph {
            Cell::WALL_GLYPH => Some(Cell::Wall),
            Cell::FLOOR_GLYPH => Some(Cell::Floor),
            Cell::START_GLYPH => Some(Cell::Start),
            Cell::GOAL_GLYPH => Some(Cell::Goal),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Cell::Wall => Cell::WALL_GLYPH,
            Cell::Floor => Cell::FLOOR_GLYPH,
            Cell::Start => Cell::START_GLYPH,
            Cell::Goal => Cell::GOAL_GLYPH,
        }
    }

    /// Anything but a wall can be walked on, by the player and by the solvers alike.
    pub fn is_passable(self) -> bool {
        !matches!(self, Cell::Wall)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
