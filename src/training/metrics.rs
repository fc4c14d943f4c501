use std::collections::VecDeque;

use crate::game::{GameOutcome, Side};

/// Result of a single self-play game.
#[derive(Debug, Clone, Copy)]
pub struct EpisodeResult {
    pub winner: Option<Side>,
    pub game_length: usize,
}

impl EpisodeResult {
    pub fn new(outcome: GameOutcome, game_length: usize) -> Self {
        EpisodeResult {
            winner: outcome.winner(),
            game_length,
        }
    }
}

/// Training metrics tracker with rolling window computations.
pub struct TrainingMetrics {
    episode_results: VecDeque<EpisodeResult>,
    update_losses: VecDeque<f32>,
    capacity: usize,
    // Lifetime counts, never capped by the window.
    total_episodes: usize,
    total_updates: usize,
    cross_wins: usize,
    circle_wins: usize,
    draws: usize,
}

impl TrainingMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        TrainingMetrics {
            episode_results: VecDeque::with_capacity(capacity),
            update_losses: VecDeque::with_capacity(capacity),
            capacity,
            total_episodes: 0,
            total_updates: 0,
            cross_wins: 0,
            circle_wins: 0,
            draws: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(1000)
    }

    pub fn record_episode(&mut self, result: EpisodeResult) {
        self.total_episodes += 1;
        match result.winner {
            Some(Side::Cross) => self.cross_wins += 1,
            Some(Side::Circle) => self.circle_wins += 1,
            None => self.draws += 1,
        }
        self.episode_results.push_back(result);
        if self.episode_results.len() > self.capacity {
            self.episode_results.pop_front();
        }
    }

    pub fn record_update(&mut self, loss: f32) {
        self.total_updates += 1;
        self.update_losses.push_back(loss);
        if self.update_losses.len() > self.capacity {
            self.update_losses.pop_front();
        }
    }

    fn rate(&self, last_n: usize, pred: impl Fn(&EpisodeResult) -> bool) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let hits = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .filter(|r| pred(r))
            .count();
        hits as f32 / n as f32
    }

    /// Win rate for `side` in the last N episodes.
    pub fn win_rate(&self, side: Side, last_n: usize) -> f32 {
        self.rate(last_n, |r| r.winner == Some(side))
    }

    /// Draw rate in the last N episodes.
    pub fn draw_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, |r| r.winner.is_none())
    }

    /// Average loss over the last N updates.
    pub fn average_loss(&self, last_n: usize) -> f32 {
        let n = self.update_losses.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let sum: f32 = self.update_losses.iter().rev().take(n).sum();
        sum / n as f32
    }

    /// Average game length over the last N episodes.
    pub fn average_game_length(&self, last_n: usize) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: usize = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .map(|r| r.game_length)
            .sum();
        total as f32 / n as f32
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_updates(&self) -> usize {
        self.total_updates
    }

    /// Games won by `side` since tracking began.
    pub fn total_wins(&self, side: Side) -> usize {
        match side {
            Side::Cross => self.cross_wins,
            Side::Circle => self.circle_wins,
        }
    }

    pub fn total_draws(&self) -> usize {
        self.draws
    }

    /// Win rate for `side` over every recorded episode.
    pub fn overall_win_rate(&self, side: Side) -> f32 {
        lifetime_rate(self.total_wins(side), self.total_episodes)
    }

    /// Draw rate over every recorded episode.
    pub fn overall_draw_rate(&self) -> f32 {
        lifetime_rate(self.draws, self.total_episodes)
    }
}

fn lifetime_rate(hits: usize, total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    hits as f32 / total as f32
}

impl Default for TrainingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_rate() {
        let mut m = TrainingMetrics::new();
        for _ in 0..7 {
            m.record_episode(EpisodeResult::new(GameOutcome::CrossWin, 7));
        }
        for _ in 0..3 {
            m.record_episode(EpisodeResult::new(GameOutcome::CircleWin, 6));
        }
        assert!((m.win_rate(Side::Cross, 10) - 0.7).abs() < 1e-6);
        assert!((m.win_rate(Side::Circle, 10) - 0.3).abs() < 1e-6);
        // last 3 are all circle wins
        assert!((m.win_rate(Side::Circle, 3) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_draw_rate() {
        let mut m = TrainingMetrics::new();
        m.record_episode(EpisodeResult::new(GameOutcome::Draw, 9));
        m.record_episode(EpisodeResult::new(GameOutcome::CrossWin, 5));
        assert!((m.draw_rate(10) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_average_loss() {
        let mut m = TrainingMetrics::new();
        m.record_update(1.0);
        m.record_update(3.0);
        assert!((m.average_loss(10) - 2.0).abs() < 1e-6);
        assert_eq!(m.total_updates(), 2);
    }

    #[test]
    fn test_average_game_length() {
        let mut m = TrainingMetrics::new();
        m.record_episode(EpisodeResult::new(GameOutcome::Draw, 9));
        m.record_episode(EpisodeResult::new(GameOutcome::CrossWin, 5));
        assert!((m.average_game_length(10) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_window_is_capped_but_total_is_not() {
        let mut m = TrainingMetrics::with_capacity(4);
        for _ in 0..10 {
            m.record_episode(EpisodeResult::new(GameOutcome::Draw, 9));
        }
        assert_eq!(m.total_episodes(), 10);
        assert!((m.draw_rate(100) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_metrics() {
        let m = TrainingMetrics::new();
        assert_eq!(m.win_rate(Side::Cross, 10), 0.0);
        assert_eq!(m.average_loss(10), 0.0);
        assert_eq!(m.overall_win_rate(Side::Cross), 0.0);
        assert_eq!(m.overall_draw_rate(), 0.0);
    }

    #[test]
    fn test_overall_rates_cover_episodes_beyond_window() {
        let mut m = TrainingMetrics::with_capacity(1000);
        for _ in 0..1000 {
            m.record_episode(EpisodeResult::new(GameOutcome::Draw, 9));
        }
        for _ in 0..500 {
            m.record_episode(EpisodeResult::new(GameOutcome::CrossWin, 5));
        }
        assert_eq!(m.total_episodes(), 1500);
        assert_eq!(m.total_wins(Side::Cross), 500);
        assert_eq!(m.total_wins(Side::Circle), 0);
        assert_eq!(m.total_draws(), 1000);
        assert!((m.overall_win_rate(Side::Cross) - 1.0 / 3.0).abs() < 1e-6);
        assert!((m.overall_draw_rate() - 2.0 / 3.0).abs() < 1e-6);
        // The rolling window only sees the newest 1000.
        assert!((m.win_rate(Side::Cross, 1500) - 0.5).abs() < 1e-6);
    }
}
