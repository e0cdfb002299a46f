use rand::Rng;

use super::board::Board;
use super::bot_controller::MinimaxBot;
use super::error::GameError;
use super::types::{GameStatus, Mark, Position, WinningLine};

/// Human against the minimax bot. X opens unless `with_opening` says
/// otherwise; an opening bot plays its first move on construction.
#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub user_mark: Mark,
    pub ai_mark: Mark,
    pub last_move: Option<Position>,
    bot: MinimaxBot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub user_move: Position,
    pub ai_move: Option<Position>,
    pub status: GameStatus,
}

impl TicTacToeGameState {
    /// `None` when `user_mark` is `Mark::Empty`.
    pub fn new(user_mark: Mark) -> Option<Self> {
        Self::with_opening(user_mark, user_mark == Mark::O)
    }

    /// Like `new`, but the caller decides who opens regardless of marks.
    pub fn with_opening(user_mark: Mark, ai_opens: bool) -> Option<Self> {
        let ai_mark = user_mark.opponent()?;
        Some(Self::start(user_mark, ai_mark, ai_opens))
    }

    /// Assigns the marks at random without playing any move. When the bot
    /// holds X the caller is expected to play its opening.
    pub fn with_random_marks<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Self::start(Mark::X, Mark::O, false)
        } else {
            Self::start(Mark::O, Mark::X, false)
        }
    }

    fn start(user_mark: Mark, ai_mark: Mark, ai_opens: bool) -> Self {
        let mut state = Self {
            board: Board::new(),
            user_mark,
            ai_mark,
            last_move: None,
            bot: MinimaxBot::new(ai_mark, user_mark),
        };

        if ai_opens {
            state.play_ai_turn();
        }

        state
    }

    pub fn status(&self) -> GameStatus {
        if self.board.is_winner(self.user_mark) {
            GameStatus::UserWon
        } else if self.board.is_winner(self.ai_mark) {
            GameStatus::AiWon
        } else if self.board.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    pub fn is_over(&self) -> bool {
        self.status().is_over()
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.board
            .winning_line(self.user_mark)
            .or_else(|| self.board.winning_line(self.ai_mark))
    }

    pub fn bot(&self) -> MinimaxBot {
        self.bot
    }

    /// Validates and places the human mark, then lets the bot answer unless
    /// the human move ended the game.
    pub fn place_mark(&mut self, row: i64, col: i64) -> Result<MoveOutcome, GameError> {
        let user_move = self.place_user_mark(row, col)?;

        let ai_move = if self.is_over() {
            None
        } else {
            self.play_ai_turn()
        };

        Ok(MoveOutcome {
            user_move,
            ai_move,
            status: self.status(),
        })
    }

    /// Checks range, occupancy and game over, in that order, then places the
    /// human mark. The bot does not answer.
    pub fn place_user_mark(&mut self, row: i64, col: i64) -> Result<Position, GameError> {
        let pos = Position::checked(row, col).ok_or(GameError::InvalidCoordinates { row, col })?;

        if !self.board.is_empty(pos) {
            return Err(GameError::CellOccupied {
                row: pos.row,
                col: pos.col,
            });
        }

        if self.is_over() {
            return Err(GameError::GameOver);
        }

        self.board.set(pos, self.user_mark);
        self.last_move = Some(pos);
        Ok(pos)
    }

    /// Searches and places the bot's best move. `None` when the board is
    /// already full.
    pub fn play_ai_turn(&mut self) -> Option<Position> {
        let pos = self.bot.best_move(&mut self.board)?;
        self.apply_ai_move(pos);
        Some(pos)
    }

    /// Places a bot move that was searched elsewhere, e.g. on a copy of the
    /// board.
    pub fn apply_ai_move(&mut self, pos: Position) {
        self.board.set(pos, self.ai_mark);
        self.last_move = Some(pos);
    }
}
