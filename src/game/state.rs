use super::board::BoardState;
use super::side::Side;

/// Number of outcome classes seen by the scoring function.
pub const OUTCOME_CLASSES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    NotFinished,
    CrossWin,
    CircleWin,
    Draw,
}

impl GameOutcome {
    pub fn won_by(side: Side) -> GameOutcome {
        match side {
            Side::Cross => GameOutcome::CrossWin,
            Side::Circle => GameOutcome::CircleWin,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != GameOutcome::NotFinished
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            GameOutcome::CrossWin => Some(Side::Cross),
            GameOutcome::CircleWin => Some(Side::Circle),
            GameOutcome::NotFinished | GameOutcome::Draw => None,
        }
    }

    /// Class index used for training labels and prediction reads.
    /// Unfinished games have no class.
    pub fn class_index(self) -> Option<usize> {
        match self {
            GameOutcome::CrossWin => Some(0),
            GameOutcome::CircleWin => Some(1),
            GameOutcome::Draw => Some(2),
            GameOutcome::NotFinished => None,
        }
    }

    pub fn from_class_index(index: usize) -> Option<GameOutcome> {
        match index {
            0 => Some(GameOutcome::CrossWin),
            1 => Some(GameOutcome::CircleWin),
            2 => Some(GameOutcome::Draw),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GameOutcome::NotFinished => "not finished",
            GameOutcome::CrossWin => "Cross",
            GameOutcome::CircleWin => "Circle",
            GameOutcome::Draw => "draw",
        }
    }
}

/// What a single ply produced: the new state, its outcome, and whether the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub state: BoardState,
    pub outcome: GameOutcome,
    pub terminal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("invalid move: position {position} is already occupied")]
    InvalidMove { position: usize },

    #[error("position {position} is out of bounds (must be 0-8)")]
    OutOfRange { position: usize },
}
