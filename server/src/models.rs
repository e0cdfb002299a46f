use serde::{Deserialize, Serialize};

use common::games::tictactoe::{Mark, TicTacToeGameState};

use crate::session_store::GameSession;

pub const API_NAME: &str = "Tic-Tac-Toe API";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Coordinates arrive signed so that negative values surface as invalid
/// coordinates instead of a body rejection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub row: i64,
    pub col: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResponse {
    pub game_id: String,
    pub board: Vec<Vec<String>>,
    pub user_player: String,
    pub ai_player: String,
    pub status: String,
    pub game_over: bool,
    pub winning_line: Option<Vec<[usize; 2]>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

fn mark_label(mark: Mark) -> String {
    mark.symbol().to_string()
}

fn board_rows(state: &TicTacToeGameState) -> Vec<Vec<String>> {
    state
        .board
        .cells()
        .iter()
        .map(|row| row.iter().map(|&cell| mark_label(cell)).collect())
        .collect()
}

impl From<&GameSession> for GameResponse {
    fn from(session: &GameSession) -> Self {
        let state = &session.state;
        let status = state.status();

        Self {
            game_id: session.id.to_string(),
            board: board_rows(state),
            user_player: mark_label(state.user_mark),
            ai_player: mark_label(state.ai_mark),
            status: status.message().to_string(),
            game_over: status.is_over(),
            winning_line: state
                .winning_line()
                .map(|line| line.iter().map(|pos| [pos.row, pos.col]).collect()),
        }
    }
}
