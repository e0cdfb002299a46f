use super::board::Board;
use super::types::{Mark, Position};

pub const WIN_SCORE: i32 = 1;
pub const LOSS_SCORE: i32 = -1;
pub const DRAW_SCORE: i32 = 0;

/// Full-depth minimax over the 3x3 tree. No pruning, no depth discount.
///
/// The board is searched in place: every hypothetical placement is undone
/// before the call returns, so callers get their board back unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinimaxBot {
    ai_mark: Mark,
    opponent_mark: Mark,
}

impl MinimaxBot {
    pub fn new(ai_mark: Mark, opponent_mark: Mark) -> Self {
        Self {
            ai_mark,
            opponent_mark,
        }
    }

    /// Bot playing `ai_mark` against its opponent. `None` for `Mark::Empty`.
    pub fn for_mark(ai_mark: Mark) -> Option<Self> {
        let opponent_mark = ai_mark.opponent()?;
        Some(Self::new(ai_mark, opponent_mark))
    }

    pub fn ai_mark(&self) -> Mark {
        self.ai_mark
    }

    pub fn opponent_mark(&self) -> Mark {
        self.opponent_mark
    }

    pub fn best_move(&self, board: &mut Board) -> Option<Position> {
        let mut best_move = None;
        let mut best_score = i32::MIN;

        for pos in board.available_moves() {
            board.set(pos, self.ai_mark);
            let score = self.score(board, false);
            board.clear(pos);

            // Strict comparison: the first move in row-major order keeps ties.
            if score > best_score {
                best_score = score;
                best_move = Some(pos);
            }
        }

        best_move
    }

    pub fn score(&self, board: &mut Board, is_maximizing: bool) -> i32 {
        if board.is_winner(self.ai_mark) {
            return WIN_SCORE;
        }
        if board.is_winner(self.opponent_mark) {
            return LOSS_SCORE;
        }
        if board.is_full() {
            return DRAW_SCORE;
        }

        if is_maximizing {
            let mut max_eval = i32::MIN;
            for pos in board.available_moves() {
                board.set(pos, self.ai_mark);
                let eval = self.score(board, false);
                board.clear(pos);
                max_eval = max_eval.max(eval);
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for pos in board.available_moves() {
                board.set(pos, self.opponent_mark);
                let eval = self.score(board, true);
                board.clear(pos);
                min_eval = min_eval.min(eval);
            }
            min_eval
        }
    }
}

pub fn calculate_minimax_move(
    board: &mut Board,
    ai_mark: Mark,
    opponent_mark: Mark,
) -> Option<Position> {
    MinimaxBot::new(ai_mark, opponent_mark).best_move(board)
}
