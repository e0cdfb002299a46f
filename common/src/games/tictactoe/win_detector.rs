use super::board::Board;
use super::types::{Mark, Position, WinningLine};

const fn line(cells: [(usize, usize); 3]) -> WinningLine {
    [
        Position { row: cells[0].0, col: cells[0].1 },
        Position { row: cells[1].0, col: cells[1].1 },
        Position { row: cells[2].0, col: cells[2].1 },
    ]
}

/// Rows, then columns, then the two diagonals.
pub const LINES: [WinningLine; 8] = [
    line([(0, 0), (0, 1), (0, 2)]),
    line([(1, 0), (1, 1), (1, 2)]),
    line([(2, 0), (2, 1), (2, 2)]),
    line([(0, 0), (1, 0), (2, 0)]),
    line([(0, 1), (1, 1), (2, 1)]),
    line([(0, 2), (1, 2), (2, 2)]),
    line([(0, 0), (1, 1), (2, 2)]),
    line([(0, 2), (1, 1), (2, 0)]),
];

pub fn is_winner(board: &Board, mark: Mark) -> bool {
    winning_line(board, mark).is_some()
}

pub fn winning_line(board: &Board, mark: Mark) -> Option<WinningLine> {
    if mark == Mark::Empty {
        return None;
    }

    LINES
        .iter()
        .find(|line| line.iter().all(|&pos| board.get(pos) == mark))
        .copied()
}
