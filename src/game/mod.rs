//! Core tic-tac-toe logic: cells and board states, sides, move results and
//! win/draw detection.

mod board;
mod side;
mod state;

pub use board::{Board, BoardState, Cell, BOARD_SIZE, CELLS, WINNING_LINES};
pub use side::Side;
pub use state::{GameOutcome, MoveError, MoveResult, OUTCOME_CLASSES};
