use crate::ai::{Agent, RandomAgent};
use crate::error::SelfPlayError;
use crate::game::{Board, Side};
use crate::training::metrics::{EpisodeResult, TrainingMetrics};
use crate::training::self_play::{play_and_memorize, play_game};

/// Trainer configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub num_games: usize,
    pub log_interval: usize,
    pub eval_interval: usize,
    pub eval_games: usize,
    pub print_result: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            num_games: 10_000,
            log_interval: 1_000,
            eval_interval: 5_000,
            eval_games: 100,
            print_result: false,
        }
    }
}

/// Win/draw/loss tally of an evaluation run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvalSummary {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl EvalSummary {
    pub fn games(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    pub fn win_rate(&self) -> f32 {
        if self.games() == 0 {
            return 0.0;
        }
        self.wins as f32 / self.games() as f32
    }
}

/// Runs batches of self-play games between two agents.
pub struct Trainer {
    config: TrainerConfig,
    eval_seed: Option<u64>,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer {
            config,
            eval_seed: None,
        }
    }

    /// Like [`Trainer::new`], but every evaluation faces a random mover seeded with `seed`.
    pub fn with_seed(config: TrainerConfig, seed: u64) -> Self {
        Trainer {
            config,
            eval_seed: Some(seed),
        }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Play `num_games` games, `cross` always moving first.
    pub fn train(
        &self,
        cross: &mut dyn Agent,
        circle: &mut dyn Agent,
    ) -> Result<TrainingMetrics, SelfPlayError> {
        let mut metrics = TrainingMetrics::new();
        let mut board = Board::new();
        let log_interval = self.config.log_interval.max(1);
        let eval_interval = self.config.eval_interval.max(1);
        let window = log_interval;

        log::info!(
            "Starting self-play: {} (Cross) vs {} (Circle), {} games",
            cross.name(),
            circle.name(),
            self.config.num_games
        );

        for game in 1..=self.config.num_games {
            let report = play_and_memorize(&mut board, cross, circle)?;
            for update in [&report.cross_update, &report.circle_update].into_iter().flatten() {
                metrics.record_update(update.loss);
            }
            metrics.record_episode(EpisodeResult::new(report.record.outcome, report.record.plies));

            if self.config.print_result {
                log::debug!(
                    "Game {} won by {}\n{}",
                    game,
                    report.record.outcome.name(),
                    report.record.final_state()
                );
            }

            if game % log_interval == 0 {
                log::info!(
                    "Game {}/{} | cross: {:.1}% | circle: {:.1}% | draw: {:.1}% | avg_len: {:.2} | loss: {:.4} ({} passes)",
                    game,
                    self.config.num_games,
                    metrics.win_rate(Side::Cross, window) * 100.0,
                    metrics.win_rate(Side::Circle, window) * 100.0,
                    metrics.draw_rate(window) * 100.0,
                    metrics.average_game_length(window),
                    metrics.average_loss(window),
                    metrics.total_updates(),
                );
            }

            if game % eval_interval == 0 {
                let summary = self.evaluate(cross)?;
                log::info!(
                    "  >> Eval {} vs Random ({} games): {:.1}% win, {} draws",
                    cross.name(),
                    summary.games(),
                    summary.win_rate() * 100.0,
                    summary.draws
                );
            }
        }

        log::info!("Self-play complete. Total games: {}", metrics.total_episodes());
        Ok(metrics)
    }

    /// Evaluate `agent` against a random mover over `eval_games`, alternating sides.
    /// Exploration is disabled and nothing is memorized.
    pub fn evaluate(&self, agent: &mut dyn Agent) -> Result<EvalSummary, SelfPlayError> {
        let mut random = match self.eval_seed {
            Some(seed) => RandomAgent::with_seed(Side::Circle, seed),
            None => RandomAgent::new(Side::Circle),
        };
        let mut board = Board::new();
        let mut summary = EvalSummary::default();

        let eval_state = agent.enter_eval_mode();
        for game_idx in 0..self.config.eval_games {
            let agent_side = if game_idx % 2 == 0 { Side::Cross } else { Side::Circle };
            let record = match agent_side {
                Side::Cross => play_game(&mut board, agent, &mut random),
                Side::Circle => play_game(&mut board, &mut random, agent),
            };
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    agent.exit_eval_mode(eval_state);
                    return Err(e);
                }
            };

            match record.outcome.winner() {
                Some(side) if side == agent_side => summary.wins += 1,
                Some(_) => summary.losses += 1,
                None => summary.draws += 1,
            }
        }
        agent.exit_eval_mode(eval_state);

        Ok(summary)
    }
}
