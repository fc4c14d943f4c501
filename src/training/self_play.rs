use crate::ai::{Agent, MemoryRecord, UpdateMetrics};
use crate::error::SelfPlayError;
use crate::game::{Board, BoardState, GameOutcome, Side, CELLS};

/// Full history of one finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    /// Every board state seen, starting with the empty board.
    pub history: Vec<BoardState>,
    pub outcome: GameOutcome,
    pub plies: usize,
}

impl GameRecord {
    pub fn final_state(&self) -> &BoardState {
        self.history
            .last()
            .expect("history always holds the initial board")
    }

    /// Every state in the history labeled with the game's outcome.
    pub fn labeled_records(&self) -> Vec<MemoryRecord> {
        self.history
            .iter()
            .map(|&state| MemoryRecord::new(state, self.outcome))
            .collect()
    }
}

/// A finished game plus any training passes it triggered, per side.
pub struct GameReport {
    pub record: GameRecord,
    pub cross_update: Option<UpdateMetrics>,
    pub circle_update: Option<UpdateMetrics>,
}

/// Play one game: `cross` moves first, plies alternate until the board is terminal.
pub fn play_game(
    board: &mut Board,
    cross: &mut dyn Agent,
    circle: &mut dyn Agent,
) -> Result<GameRecord, SelfPlayError> {
    board.reset();
    cross.new_game(Side::Cross);
    circle.new_game(Side::Circle);

    let mut history = Vec::with_capacity(CELLS + 1);
    history.push(*board.state());
    let mut plies = 0;
    let mut active = Side::Cross;

    loop {
        let agent: &mut dyn Agent = match active {
            Side::Cross => &mut *cross,
            Side::Circle => &mut *circle,
        };
        let result = agent.play(board).map_err(|source| SelfPlayError::IllegalMove {
            agent: format!("{} ({})", agent.name(), active.name()),
            source,
        })?;
        history.push(result.state);
        plies += 1;

        if result.terminal {
            return Ok(GameRecord {
                history,
                outcome: result.outcome,
                plies,
            });
        }
        if plies >= CELLS {
            return Err(SelfPlayError::MissingOutcome { plies });
        }
        active = active.other();
    }
}

/// Play one game and let both agents memorize its labeled history.
pub fn play_and_memorize(
    board: &mut Board,
    cross: &mut dyn Agent,
    circle: &mut dyn Agent,
) -> Result<GameReport, SelfPlayError> {
    let record = play_game(board, cross, circle)?;
    let records = record.labeled_records();
    let cross_update = cross.memorize(&records)?;
    let circle_update = circle.memorize(&records)?;

    log::debug!(
        "game over after {} plies, winner: {}",
        record.plies,
        record.outcome.name()
    );

    Ok(GameReport {
        record,
        cross_update,
        circle_update,
    })
}

/// Play `n` games back to back, memorizing after each one.
pub fn play_games(
    n: usize,
    cross: &mut dyn Agent,
    circle: &mut dyn Agent,
) -> Result<Vec<GameReport>, SelfPlayError> {
    let mut board = Board::new();
    (0..n)
        .map(|_| play_and_memorize(&mut board, &mut *cross, &mut *circle))
        .collect()
}
