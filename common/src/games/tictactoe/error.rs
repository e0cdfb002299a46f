use std::fmt;

use crate::GameId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    NotFound(GameId),
    InvalidCoordinates { row: i64, col: i64 },
    CellOccupied { row: usize, col: usize },
    GameOver,
    /// The bot's search did not complete, e.g. its worker panicked.
    EngineFailed,
}

impl GameError {
    /// Short client-facing message, stable across requests.
    pub fn detail(&self) -> &'static str {
        match self {
            GameError::NotFound(_) => "Game not found",
            GameError::InvalidCoordinates { .. } => "Invalid move coordinates",
            GameError::CellOccupied { .. } => "Cell already occupied",
            GameError::GameOver => "Game is over",
            GameError::EngineFailed => "AI move failed",
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NotFound(id) => write!(f, "Game {} not found", id),
            GameError::InvalidCoordinates { row, col } => {
                write!(f, "Invalid move coordinates ({}, {})", row, col)
            }
            GameError::CellOccupied { row, col } => {
                write!(f, "Cell ({}, {}) already occupied", row, col)
            }
            GameError::GameOver => write!(f, "Game is over"),
            GameError::EngineFailed => write!(f, "AI move search failed"),
        }
    }
}

impl std::error::Error for GameError {}
