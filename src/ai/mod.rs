mod agent;
mod brain;
pub mod memory;
pub mod model;
pub mod networks;
mod random;
pub mod state_encoding;
mod tactical;

pub use agent::{Agent, AgentKind, EvalState, UpdateMetrics};
pub use brain::{BrainAgent, BrainConfig};
pub use memory::{Memory, MemoryRecord};
pub use model::{ModelConfig, NeuralOutcomeModel, OutcomeModel, OutcomeProbabilities};
pub use random::RandomAgent;
pub use tactical::{winning_square, TacticalAgent};
