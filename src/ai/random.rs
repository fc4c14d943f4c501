use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use super::agent::Agent;
use crate::game::{Board, Side};

/// An agent that selects uniformly at random from the empty squares.
pub struct RandomAgent {
    side: Side,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(side: Side) -> Self {
        RandomAgent {
            side,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(side: Side, seed: u64) -> Self {
        RandomAgent {
            side,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

/// Uniform choice among the empty squares of `board`.
pub(crate) fn random_square(board: &Board, rng: &mut StdRng) -> usize {
    let squares = board.empty_squares();
    *squares.choose(rng).expect("No empty squares available")
}

impl Agent for RandomAgent {
    fn side(&self) -> Side {
        self.side
    }

    fn new_game(&mut self, side: Side) {
        self.side = side;
    }

    fn select_move(&mut self, board: &Board) -> usize {
        random_square(board, &mut self.rng)
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameOutcome;

    #[test]
    fn test_random_agent_selects_empty_square() {
        let mut agent = RandomAgent::with_seed(Side::Cross, 7);
        let mut board = Board::new();
        board.play_move(0, Side::Circle).unwrap();
        board.play_move(5, Side::Circle).unwrap();
        let empty = board.empty_squares();

        for _ in 0..100 {
            let square = agent.select_move(&board);
            assert!(empty.contains(&square), "Square {} is not empty", square);
        }
    }

    #[test]
    fn test_single_empty_square_is_always_played() {
        let mut board = Board::new();
        // Fill everything except square 6 without completing a line:
        // X O X / X O O / _ X O
        let moves = [
            (0, Side::Cross),
            (1, Side::Circle),
            (2, Side::Cross),
            (4, Side::Circle),
            (3, Side::Cross),
            (5, Side::Circle),
            (7, Side::Cross),
            (8, Side::Circle),
        ];
        for (pos, side) in moves {
            board.play_move(pos, side).unwrap();
        }
        assert_eq!(board.empty_squares(), vec![6]);

        for seed in 0..20 {
            let mut agent = RandomAgent::with_seed(Side::Cross, seed);
            assert_eq!(agent.select_move(&board), 6);
        }
    }

    #[test]
    fn test_random_agents_play_full_game() {
        let mut cross = RandomAgent::with_seed(Side::Cross, 1);
        let mut circle = RandomAgent::with_seed(Side::Circle, 2);
        let mut board = Board::new();

        let mut plies = 0;
        let outcome = loop {
            let agent: &mut dyn Agent = if plies % 2 == 0 { &mut cross } else { &mut circle };
            let result = agent.play(&mut board).unwrap();
            plies += 1;
            if result.terminal {
                break result.outcome;
            }
        };

        assert!(plies <= 9);
        assert_ne!(outcome, GameOutcome::NotFinished);
        assert_eq!(outcome, board.outcome());
    }

    #[test]
    fn test_random_agent_name() {
        let agent = RandomAgent::new(Side::Cross);
        assert_eq!(agent.name(), "Random");
    }
}
