use std::fmt;

use super::types::{BOARD_SIZE, Mark, Position, WinningLine};
use super::win_detector;

/// Fixed 3x3 grid. Occupancy is not enforced here; callers check `is_empty`
/// before placing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [[Mark; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[[Mark; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn get(&self, pos: Position) -> Mark {
        self.cells[pos.row][pos.col]
    }

    pub fn set(&mut self, pos: Position, mark: Mark) {
        self.cells[pos.row][pos.col] = mark;
    }

    pub fn clear(&mut self, pos: Position) {
        self.set(pos, Mark::Empty);
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Mark::Empty
    }

    pub fn is_winner(&self, mark: Mark) -> bool {
        win_detector::is_winner(self, mark)
    }

    pub fn winning_line(&self, mark: Mark) -> Option<WinningLine> {
        win_detector::winning_line(self, mark)
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Mark::Empty))
    }

    pub fn available_moves(&self) -> impl Iterator<Item = Position> + use<> {
        get_available_moves(self)
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == mark)
            .count()
    }
}

/// Empty cells in row-major order. Move selection tie-breaks on this order.
///
/// The iterator walks a snapshot of the cells, so the board may be mutated
/// while iterating and nothing is allocated.
pub fn get_available_moves(board: &Board) -> impl Iterator<Item = Position> + use<> {
    let cells = board.cells;
    (0..BOARD_SIZE * BOARD_SIZE)
        .map(|index| Position::new(index / BOARD_SIZE, index % BOARD_SIZE))
        .filter(move |pos| cells[pos.row][pos.col] == Mark::Empty)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: Vec<String> = row.iter().map(|cell| cell.symbol().to_string()).collect();
            writeln!(f, "{}", line.join("|"))?;
            writeln!(f, "-----")?;
        }
        Ok(())
    }
}
