use crate::ai::brain::{BrainAgent, BrainConfig};
use crate::ai::memory::MemoryRecord;
use crate::ai::random::RandomAgent;
use crate::ai::tactical::TacticalAgent;
use crate::error::SelfPlayError;
use crate::game::{Board, MoveError, MoveResult, Side};

/// Summary of a training pass triggered by memorizing a game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateMetrics {
    pub loss: f32,
    pub records: usize,
}

/// Opaque eval state for enter/exit eval mode.
pub enum EvalState {
    Exploration(f64),
    NoOp,
}

/// Universal interface for all tic-tac-toe agents.
pub trait Agent {
    /// The side this agent plays in the current game.
    fn side(&self) -> Side;

    /// Prepare for a new game playing `side`.
    fn new_game(&mut self, side: Side);

    /// Pick an empty square on `board` for the agent's side.
    fn select_move(&mut self, board: &Board) -> usize;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Play one ply on `board`.
    fn play(&mut self, board: &mut Board) -> Result<MoveResult, MoveError> {
        let position = self.select_move(board);
        board.play_move(position, self.side())
    }

    /// Learn from a finished game's labeled history. Scripted agents ignore it.
    /// Returns metrics when the call triggered a training pass.
    fn memorize(&mut self, _records: &[MemoryRecord]) -> Result<Option<UpdateMetrics>, SelfPlayError> {
        Ok(None)
    }

    /// Enter eval mode (no exploration). Returns state to restore.
    fn enter_eval_mode(&mut self) -> EvalState {
        EvalState::NoOp
    }

    /// Exit eval mode, restoring previous state.
    fn exit_eval_mode(&mut self, _state: EvalState) {}
}

/// Which agent implementation to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Random,
    Tactical,
    Brain,
}

impl AgentKind {
    /// Build a boxed agent for `side`. A seed makes its choices reproducible.
    pub fn build(self, side: Side, brain: &BrainConfig, seed: Option<u64>) -> Box<dyn Agent> {
        match (self, seed) {
            (AgentKind::Random, Some(seed)) => Box::new(RandomAgent::with_seed(side, seed)),
            (AgentKind::Random, None) => Box::new(RandomAgent::new(side)),
            (AgentKind::Tactical, Some(seed)) => Box::new(TacticalAgent::with_seed(side, seed)),
            (AgentKind::Tactical, None) => Box::new(TacticalAgent::new(side)),
            (AgentKind::Brain, Some(seed)) => Box::new(BrainAgent::with_seed(side, brain.clone(), seed)),
            (AgentKind::Brain, None) => Box::new(BrainAgent::new(side, brain.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_each_kind() {
        let brain = BrainConfig::default();
        for (kind, name) in [
            (AgentKind::Random, "Random"),
            (AgentKind::Tactical, "Tactical"),
            (AgentKind::Brain, "Brain"),
        ] {
            let agent = kind.build(Side::Circle, &brain, Some(1));
            assert_eq!(agent.name(), name);
            assert_eq!(agent.side(), Side::Circle);
        }
    }

    #[test]
    fn test_new_game_switches_side() {
        let mut agent = AgentKind::Random.build(Side::Cross, &BrainConfig::default(), None);
        agent.new_game(Side::Circle);
        assert_eq!(agent.side(), Side::Circle);
    }

    #[test]
    fn test_scripted_agents_ignore_memorize() {
        let mut agent = AgentKind::Tactical.build(Side::Cross, &BrainConfig::default(), Some(2));
        assert!(agent.memorize(&[]).unwrap().is_none());
    }
}
