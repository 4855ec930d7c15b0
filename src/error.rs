use std::path::PathBuf;

use crate::maze::{Cell, Position};

/// Errors raised while loading a maze. All of them abort the load attempt only.
#[derive(Debug, thiserror::Error)]
pub enum MazeError {
    #[error("unrecognized glyph {glyph:?} at line {line}, column {column}")]
    Malformed {
        line: usize,
        column: usize,
        glyph: char,
    },
    #[error("line {line} has {found} cells, expected {expected}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("maze has no rows")]
    Empty,
    #[error("maze has no {0:?} cell")]
    NotFound(Cell),
    #[error("failed to read maze file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Two consecutive path positions that are not orthogonally adjacent.
/// Only produced when a path did not come from the search engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid step from {from} to {to}")]
pub struct InvalidStep {
    pub from: Position,
    pub to: Position,
}

/// The global log subscriber could not be installed, usually because one is already set.
#[derive(Debug, thiserror::Error)]
#[error("failed to install the log subscriber")]
pub struct LoggingError(#[source] pub Box<dyn std::error::Error + Send + Sync + 'static>);
