use std::fmt;

pub const BOARD_SIZE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Mark::Empty => ' ',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    /// Parses a player mark. `Empty` is never produced.
    pub fn from_player_symbol(symbol: &str) -> Option<Mark> {
        match symbol.trim() {
            "X" | "x" => Some(Mark::X),
            "O" | "o" => Some(Mark::O),
            _ => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Converts raw request coordinates, `None` when either falls outside the board.
    pub fn checked(row: i64, col: i64) -> Option<Self> {
        let range = 0..BOARD_SIZE as i64;
        if range.contains(&row) && range.contains(&col) {
            Some(Self::new(row as usize, col as usize))
        } else {
            None
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

pub type WinningLine = [Position; BOARD_SIZE];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    UserWon,
    AiWon,
    Draw,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        *self != GameStatus::InProgress
    }

    pub fn message(&self) -> &'static str {
        match self {
            GameStatus::InProgress => "Your turn",
            GameStatus::UserWon => "You win! 🎉",
            GameStatus::AiWon => "AI wins! 🤖",
            GameStatus::Draw => "It's a tie!",
        }
    }
}
