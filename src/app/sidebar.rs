use unicode_truncate::{Alignment, UnicodeTruncateStr};

use crate::{
    app::state::{Action, GameState},
    solvers::Solver,
};

/// Width of the sidebar in terminal columns, including its one-column margin.
pub const SIDEBAR_WIDTH: u16 = 22;
/// Width of every button label.
const BUTTON_WIDTH: u16 = SIDEBAR_WIDTH - 4;
/// Smallest sidebar height that fits all buttons.
pub const MIN_SIDEBAR_HEIGHT: u16 = 13;

pub const TITLE: &str = "Maze Solver";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Restart,
    Solve,
    Dfs,
    AStar,
    Sound,
}

impl Button {
    pub const ALL: [Button; 5] = [
        Button::Restart,
        Button::Solve,
        Button::Dfs,
        Button::AStar,
        Button::Sound,
    ];

    pub fn action(self) -> Action {
        match self {
            Button::Restart => Action::Restart,
            Button::Solve => Action::Solve,
            Button::Dfs => Action::SelectSolver(Solver::Dfs),
            Button::AStar => Action::SelectSolver(Solver::AStar),
            Button::Sound => Action::ToggleSound,
        }
    }

    pub fn label(self, state: &GameState) -> String {
        match self {
            Button::Restart => "Restart (r)".to_string(),
            Button::Solve => "Solve (s)".to_string(),
            Button::Dfs => format!("{} (d)", Solver::Dfs),
            Button::AStar => format!("{} (a)", Solver::AStar),
            Button::Sound if state.sound_on() => "Sound: ON (m)".to_string(),
            Button::Sound => "Sound: OFF (m)".to_string(),
        }
    }

    /// Whether the button is drawn highlighted: the selected solver, or sound when on.
    pub fn is_active(self, state: &GameState) -> bool {
        match self {
            Button::Dfs => state.solver() == Solver::Dfs,
            Button::AStar => state.solver() == Solver::AStar,
            Button::Sound => state.sound_on(),
            Button::Restart | Button::Solve => false,
        }
    }

    /// Label padded and centered to the button width, truncated if it does not fit.
    pub fn padded_label(self, state: &GameState) -> String {
        self.label(state)
            .unicode_pad(BUTTON_WIDTH as usize, Alignment::Center, true)
            .into_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        (self.col..self.col.saturating_add(self.width)).contains(&col)
            && (self.row..self.row.saturating_add(self.height)).contains(&row)
    }
}

/// Layout of the sidebar drawn to the right of the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sidebar {
    /// First terminal column of the sidebar
    origin_col: u16,
    /// Number of rows available to the sidebar
    height: u16,
}

impl Sidebar {
    pub fn new(origin_col: u16, height: u16) -> Self {
        Sidebar {
            origin_col,
            height: height.max(MIN_SIDEBAR_HEIGHT),
        }
    }

    /// Column where text inside the sidebar starts
    pub fn content_col(&self) -> u16 {
        self.origin_col.saturating_add(2)
    }

    /// Buttons sit in the upper half, except sound which stays at the bottom.
    pub fn button_rect(&self, button: Button) -> Rect {
        let row = match button {
            Button::Restart => 2,
            Button::Solve => 4,
            Button::Dfs => 7,
            Button::AStar => 9,
            Button::Sound => self.height - 2,
        };
        Rect {
            col: self.content_col(),
            row,
            width: BUTTON_WIDTH,
            height: 1,
        }
    }

    /// Map a mouse click to the button under it.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<Button> {
        Button::ALL
            .into_iter()
            .find(|&button| self.button_rect(button).contains(col, row))
    }
}
