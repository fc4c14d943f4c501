use std::fmt;

use super::side::Side;
use super::state::{GameOutcome, MoveError, MoveResult};

pub const BOARD_SIZE: usize = 3;
pub const CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// Winning lines in enumeration order: rows, columns, then diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Cross,
    Circle,
}

impl Cell {
    /// Numeric value fed to the scoring function (0 empty, 1 cross, 2 circle).
    pub fn encode(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Cross => 1,
            Cell::Circle => 2,
        }
    }

    pub fn decode(value: u8) -> Option<Cell> {
        match value {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Cross),
            2 => Some(Cell::Circle),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Cross => 'X',
            Cell::Circle => 'O',
        }
    }
}

/// Snapshot of the nine cells, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardState {
    cells: [Cell; CELLS],
}

impl BoardState {
    pub fn empty() -> Self {
        BoardState {
            cells: [Cell::Empty; CELLS],
        }
    }

    pub fn from_cells(cells: [Cell; CELLS]) -> Self {
        BoardState { cells }
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    pub fn get(&self, position: usize) -> Cell {
        self.cells[position]
    }

    /// Encoded feature vector, one value per cell.
    pub fn encode(&self) -> [u8; CELLS] {
        self.cells.map(Cell::encode)
    }

    pub fn empty_squares(&self) -> Vec<usize> {
        (0..CELLS)
            .filter(|&i| self.cells[i] == Cell::Empty)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    /// The side owning a completed line, if any.
    pub fn winner(&self) -> Option<Side> {
        WINNING_LINES.iter().find_map(|line| {
            let first = self.cells[line[0]];
            if first != Cell::Empty && line.iter().all(|&i| self.cells[i] == first) {
                Side::from_cell(first)
            } else {
                None
            }
        })
    }

    pub fn outcome(&self) -> GameOutcome {
        match self.winner() {
            Some(side) => GameOutcome::won_by(side),
            None if self.is_full() => GameOutcome::Draw,
            None => GameOutcome::NotFinished,
        }
    }

    fn with_mark(mut self, position: usize, side: Side) -> Self {
        self.cells[position] = side.to_cell();
        self
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-----")?;
        for row in self.cells.chunks(BOARD_SIZE) {
            let line: String = row.iter().map(|c| c.symbol()).collect();
            writeln!(f, "|{}|", line)?;
        }
        write!(f, "-----")
    }
}

/// A single game's board. Mutated only through [`Board::play_move`].
#[derive(Debug, Clone, Default)]
pub struct Board {
    state: BoardState,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            state: BoardState::empty(),
        }
    }

    pub fn reset(&mut self) {
        self.state = BoardState::empty();
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn get(&self, position: usize) -> Cell {
        self.state.get(position)
    }

    /// Indices of all empty cells, ascending.
    pub fn empty_squares(&self) -> Vec<usize> {
        self.state.empty_squares()
    }

    pub fn winner(&self) -> Option<Side> {
        self.state.winner()
    }

    pub fn outcome(&self) -> GameOutcome {
        self.state.outcome()
    }

    /// Every reachable state for `side`, paired with the square it plays.
    /// The board itself is left untouched.
    pub fn next_states(&self, side: Side) -> Vec<(usize, BoardState)> {
        self.empty_squares()
            .into_iter()
            .map(|pos| (pos, self.state.with_mark(pos, side)))
            .collect()
    }

    /// Place `side`'s mark at `position`.
    pub fn play_move(&mut self, position: usize, side: Side) -> Result<MoveResult, MoveError> {
        if position >= CELLS {
            return Err(MoveError::OutOfRange { position });
        }
        if self.state.get(position) != Cell::Empty {
            return Err(MoveError::InvalidMove { position });
        }

        self.state = self.state.with_mark(position, side);
        let outcome = self.state.outcome();

        Ok(MoveResult {
            state: self.state,
            outcome,
            terminal: outcome.is_terminal(),
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.state.fmt(f)
    }
}
