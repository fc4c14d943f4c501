use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::agent::{Agent, EvalState, UpdateMetrics};
use super::memory::{Memory, MemoryRecord};
use super::model::{ModelConfig, NeuralOutcomeModel, OutcomeModel};
use super::random::random_square;
use crate::error::SelfPlayError;
use crate::game::{Board, BoardState, GameOutcome, Side};

/// Learned-mover hyperparameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BrainConfig {
    pub exploration_rate: f64,
    pub max_memory: usize,
    pub update_after_n_states: usize,
    pub model: ModelConfig,
}

impl Default for BrainConfig {
    fn default() -> Self {
        BrainConfig {
            exploration_rate: 0.1,
            max_memory: 100_000,
            update_after_n_states: 10_000,
            model: ModelConfig::default(),
        }
    }
}

/// Agent that scores candidate positions with a trainable outcome model.
///
/// With probability `exploration_rate` it plays a random square; otherwise it
/// plays the square whose resulting position has the highest predicted
/// probability of its own side winning. Every finished game it sees is
/// memorized, and the model is retrained once enough new records arrive.
pub struct BrainAgent<M: OutcomeModel = NeuralOutcomeModel> {
    side: Side,
    model: M,
    memory: Memory,
    exploration_rate: f64,
    training_passes: usize,
    rng: StdRng,
}

impl BrainAgent<NeuralOutcomeModel> {
    pub fn new(side: Side, config: BrainConfig) -> Self {
        let model = NeuralOutcomeModel::new(config.model.clone());
        Self::with_model(side, config, model, StdRng::from_os_rng())
    }

    pub fn with_seed(side: Side, config: BrainConfig, seed: u64) -> Self {
        let model = NeuralOutcomeModel::with_seed(config.model.clone(), seed);
        Self::with_model(side, config, model, StdRng::seed_from_u64(seed))
    }
}

impl<M: OutcomeModel> BrainAgent<M> {
    pub fn with_model(side: Side, config: BrainConfig, model: M, rng: StdRng) -> Self {
        BrainAgent {
            side,
            model,
            memory: Memory::new(config.max_memory, config.update_after_n_states),
            exploration_rate: config.exploration_rate,
            training_passes: 0,
            rng,
        }
    }

    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    pub fn set_exploration_rate(&mut self, rate: f64) {
        self.exploration_rate = rate;
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn training_passes(&self) -> usize {
        self.training_passes
    }

    /// Greedy choice: the square whose next state maximizes the own-win probability.
    /// Ties go to the lowest square.
    pub fn best_move(&self, board: &Board) -> usize {
        let candidates = board.next_states(self.side);
        assert!(!candidates.is_empty(), "No empty squares available");

        let states: Vec<BoardState> = candidates.iter().map(|&(_, s)| s).collect();
        let win_class = GameOutcome::won_by(self.side)
            .class_index()
            .expect("a win always has a class");
        let scores = self.model.predict(&states);

        let mut best = candidates[0].0;
        let mut best_score = f32::NEG_INFINITY;
        for (&(square, _), probs) in candidates.iter().zip(&scores) {
            if probs[win_class] > best_score {
                best_score = probs[win_class];
                best = square;
            }
        }
        best
    }

    /// Retrain on the records added since the last pass.
    fn train_pass(&mut self) -> Result<UpdateMetrics, SelfPlayError> {
        let (states, outcomes): (Vec<BoardState>, Vec<GameOutcome>) =
            self.memory.recent().map(|r| (r.state, r.outcome)).unzip();
        let loss = self.model.train(&states, &outcomes)?;
        self.memory.mark_trained();
        self.training_passes += 1;

        log::info!(
            "{} brain training pass {} on {} records (loss {:.4})",
            self.side.name(),
            self.training_passes,
            states.len(),
            loss
        );

        Ok(UpdateMetrics {
            loss,
            records: states.len(),
        })
    }
}

impl<M: OutcomeModel> Agent for BrainAgent<M> {
    fn side(&self) -> Side {
        self.side
    }

    fn new_game(&mut self, side: Side) {
        self.side = side;
    }

    fn select_move(&mut self, board: &Board) -> usize {
        if self.rng.random_range(0.0..1.0) < self.exploration_rate {
            return random_square(board, &mut self.rng);
        }
        self.best_move(board)
    }

    fn name(&self) -> &str {
        "Brain"
    }

    fn memorize(&mut self, records: &[MemoryRecord]) -> Result<Option<UpdateMetrics>, SelfPlayError> {
        self.memory.memorize(records)?;
        if self.memory.training_due() {
            return self.train_pass().map(Some);
        }
        Ok(None)
    }

    fn enter_eval_mode(&mut self) -> EvalState {
        let saved = self.exploration_rate;
        self.exploration_rate = 0.0;
        EvalState::Exploration(saved)
    }

    fn exit_eval_mode(&mut self, state: EvalState) {
        if let EvalState::Exploration(rate) = state {
            self.exploration_rate = rate;
        }
    }
}
