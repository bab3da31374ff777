use thiserror::Error;

use crate::{CellCount, Coord, Difficulty};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board parameters: {rows}x{cols} with {mines} mines")]
    InvalidParameters {
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    },
    /// Grid axes longer than a [`Coord`] can address.
    #[error("Grid of {rows}x{cols} cells is too large")]
    GridTooLarge { rows: usize, cols: usize },
    #[error("Board does not match the {0} preset")]
    DifficultyMismatch(Difficulty),
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failures of the high-score storage sink.
#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Could not access score storage")]
    Io(#[from] std::io::Error),
    #[error("Malformed score document")]
    Json(#[from] serde_json::Error),
}

impl ScoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(err) if err.kind() == std::io::ErrorKind::NotFound)
    }
}
