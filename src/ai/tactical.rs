use rand::rngs::StdRng;
use rand::SeedableRng;

use super::agent::Agent;
use super::random::random_square;
use crate::game::{Board, Cell, Side, WINNING_LINES};

/// Completes a line when one move away from winning, otherwise plays randomly.
pub struct TacticalAgent {
    side: Side,
    rng: StdRng,
}

impl TacticalAgent {
    pub fn new(side: Side) -> Self {
        TacticalAgent {
            side,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(side: Side, seed: u64) -> Self {
        TacticalAgent {
            side,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

/// First square (in line enumeration order) that completes a line for `side`.
pub fn winning_square(board: &Board, side: Side) -> Option<usize> {
    let target = side.to_cell();
    WINNING_LINES.iter().find_map(|line| {
        let mut own = 0;
        let mut empty = None;
        for &idx in line {
            match board.get(idx) {
                Cell::Empty if empty.is_none() => empty = Some(idx),
                c if c == target => own += 1,
                _ => return None,
            }
        }
        if own == 2 {
            empty
        } else {
            None
        }
    })
}

impl Agent for TacticalAgent {
    fn side(&self) -> Side {
        self.side
    }

    fn new_game(&mut self, side: Side) {
        self.side = side;
    }

    fn select_move(&mut self, board: &Board) -> usize {
        winning_square(board, self.side).unwrap_or_else(|| random_square(board, &mut self.rng))
    }

    fn name(&self) -> &str {
        "Tactical"
    }
}
