use std::collections::VecDeque;

use crate::game::Reward;

/// Result of a single training game, from the learner's side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeResult {
    pub reward: Reward,
    pub game_length: usize,
    /// Moves the learner made
    pub learner_moves: usize,
    /// Of those, moves picked at random
    pub explorations: usize,
}

/// Training metrics tracker with rolling window computations.
pub struct TrainingMetrics {
    episode_results: VecDeque<EpisodeResult>,
    capacity: usize,
    total_episodes: usize, // lifetime count, never capped
}

impl TrainingMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        TrainingMetrics {
            episode_results: VecDeque::with_capacity(capacity),
            capacity,
            total_episodes: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record_episode(&mut self, result: EpisodeResult) {
        self.total_episodes += 1;
        self.episode_results.push_back(result);
        if self.episode_results.len() > self.capacity {
            self.episode_results.pop_front();
        }
    }

    fn recent(&self, last_n: usize) -> impl Iterator<Item = &EpisodeResult> {
        self.episode_results.iter().rev().take(last_n)
    }

    fn rate_of(&self, last_n: usize, reward: Reward) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let hits = self.recent(n).filter(|r| r.reward == reward).count();
        hits as f32 / n as f32
    }

    /// Learner win rate in the last N episodes.
    pub fn win_rate(&self, last_n: usize) -> f32 {
        self.rate_of(last_n, Reward::Win)
    }

    /// Draw rate in the last N episodes.
    pub fn draw_rate(&self, last_n: usize) -> f32 {
        self.rate_of(last_n, Reward::Draw)
    }

    pub fn loss_rate(&self, last_n: usize) -> f32 {
        self.rate_of(last_n, Reward::Loss)
    }

    /// Average game length over the last N episodes.
    pub fn average_game_length(&self, last_n: usize) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: usize = self.recent(n).map(|r| r.game_length).sum();
        total as f32 / n as f32
    }

    /// Share of learner moves that were exploratory over the last N episodes.
    pub fn exploration_rate(&self, last_n: usize) -> f32 {
        let (explored, moves) = self
            .recent(last_n)
            .fold((0, 0), |(e, m), r| (e + r.explorations, m + r.learner_moves));
        if moves == 0 {
            return 0.0;
        }
        explored as f32 / moves as f32
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }
}

impl Default for TrainingMetrics {
    fn default() -> Self {
        Self::new()
    }
}
