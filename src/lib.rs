pub mod annotate;
pub mod app;
pub mod error;
pub mod logging;
pub mod maze;
pub mod solvers;

pub use annotate::annotate;
pub use error::{InvalidStep, LoggingError, MazeError};
pub use maze::{Cell, Direction, Grid, Maze, Position};
pub use solvers::{Run, SolveResult, Solver, StepOutcome, solve};
