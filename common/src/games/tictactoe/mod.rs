mod board;
mod bot_controller;
mod error;
mod game_state;
mod types;
mod win_detector;

pub use board::{Board, get_available_moves};
pub use bot_controller::{DRAW_SCORE, LOSS_SCORE, MinimaxBot, WIN_SCORE, calculate_minimax_move};
pub use error::GameError;
pub use game_state::{MoveOutcome, TicTacToeGameState};
pub use types::{BOARD_SIZE, GameStatus, Mark, Position, WinningLine};
pub use win_detector::{LINES, is_winner, winning_line};
