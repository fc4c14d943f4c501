//! Self-play driver, batch trainer and rolling metrics.

pub mod metrics;
pub mod self_play;
pub mod trainer;

pub use self_play::{play_and_memorize, play_game, play_games, GameRecord, GameReport};
pub use trainer::{EvalSummary, Trainer, TrainerConfig};
