use std::{collections::HashMap, path::PathBuf, time::Duration};

use crate::{
    annotate::annotate,
    app::summary::Summary,
    maze::{Direction, Maze, Position},
    solvers::Solver,
};

/// Something the user asked for, from a key press or a sidebar click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Restart,
    Solve,
    SelectSolver(Solver),
    ToggleSound,
    DismissSummary,
    Quit,
}

impl Action {
    /// Whether the action comes with a click sound, like pressing a sidebar button.
    pub fn clicks(self) -> bool {
        matches!(
            self,
            Action::Restart | Action::Solve | Action::SelectSolver(_) | Action::ToggleSound
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: Tone,
}

impl StatusMessage {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        StatusMessage {
            text: text.into(),
            tone,
        }
    }
}

pub const VICTORY_MESSAGE: &str = "Congratulations! You solved the maze!";
pub const NO_PATH_MESSAGE: &str = "No path found from the player to the goal.";

/// Everything the frame loop reads and updates between frames.
pub struct GameState {
    /// File the maze is (re)loaded from
    maze_path: PathBuf,
    maze: Maze,
    /// Where the player avatar currently is
    player: Position,
    /// Solver used for the next solve
    solver: Solver,
    sound_on: bool,
    /// Set once the goal is reached, by hand or by a solver
    won: bool,
    /// Directional markers of the last solution, keyed by the cell they sit on
    arrows: HashMap<Position, Direction>,
    status: Option<StatusMessage>,
    summary: Option<Summary>,
}

impl GameState {
    pub fn new(maze_path: impl Into<PathBuf>, maze: Maze) -> Self {
        GameState {
            maze_path: maze_path.into(),
            player: maze.start(),
            maze,
            solver: Solver::Dfs,
            sound_on: true,
            won: false,
            arrows: HashMap::new(),
            status: None,
            summary: None,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn solver(&self) -> Solver {
        self.solver
    }

    pub fn sound_on(&self) -> bool {
        self.sound_on
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn arrow_at(&self, pos: Position) -> Option<Direction> {
        self.arrows.get(&pos).copied()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    /// Apply every action except [`Action::Solve`] and [`Action::Quit`],
    /// which the frame loop handles itself.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Move(direction) => {
                self.move_player(direction);
            }
            Action::Restart => self.restart(),
            Action::SelectSolver(solver) => {
                tracing::debug!("[state] Selected solver {}", solver);
                self.solver = solver;
            }
            Action::ToggleSound => {
                self.sound_on = !self.sound_on;
            }
            Action::DismissSummary => {
                self.summary = None;
            }
            Action::Solve | Action::Quit => {}
        }
    }

    /// Move the player one cell if the target is inside the maze and not a wall.
    /// The player is frozen once the maze is won. Returns the new position if the
    /// move happened.
    pub fn move_player(&mut self, direction: Direction) -> Option<Position> {
        if self.won {
            return None;
        }
        let next = self.player.step(direction)?;
        if !self.maze.grid().is_passable(next) {
            return None;
        }
        self.player = next;

        if next == self.maze.goal() {
            tracing::info!("[state] Goal reached by hand");
            self.won = true;
            self.status = Some(StatusMessage::new(VICTORY_MESSAGE, Tone::Success));
        }
        Some(next)
    }

    /// Reload the maze file and reset the game. On failure the current maze is kept
    /// and the error is shown in the status line.
    pub fn restart(&mut self) {
        match Maze::load(&self.maze_path) {
            Ok(maze) => {
                self.player = maze.start();
                self.maze = maze;
                self.won = false;
                self.arrows.clear();
                self.summary = None;
                self.status = None;
            }
            Err(err) => {
                tracing::warn!("[state] Restart failed: {}", err);
                self.status = Some(StatusMessage::new(
                    format!("Could not reload maze: {}", err),
                    Tone::Error,
                ));
            }
        }
    }

    /// Record a solution: arrows along the path, victory, and the summary panel.
    pub fn apply_solution(
        &mut self,
        solver: Solver,
        path: &[Position],
        step_count: usize,
        elapsed: Duration,
    ) {
        match annotate(path) {
            Ok(markers) => {
                self.arrows = markers.into_iter().collect();
            }
            Err(err) => {
                tracing::error!("[state] Solver produced an invalid path: {}", err);
                self.arrows.clear();
            }
        }
        self.won = true;
        self.status = Some(StatusMessage::new(VICTORY_MESSAGE, Tone::Success));
        self.summary = Some(Summary {
            solver,
            step_count,
            elapsed,
        });
    }

    pub fn report_no_path(&mut self) {
        self.status = Some(StatusMessage::new(NO_PATH_MESSAGE, Tone::Error));
    }

    pub fn report_cancelled(&mut self) {
        self.status = Some(StatusMessage::new("Solve cancelled.", Tone::Info));
    }
}
