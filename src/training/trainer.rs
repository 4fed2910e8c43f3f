use std::path::PathBuf;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::ai::{Agent, RandomAgent, SearchConfig, TdLearner};
use crate::error::TrainingError;
use crate::game::scenario::random_opening;
use crate::game::{Board, GameState, Mark, Reward, COLS, ROWS};
use crate::storage::GameStats;
use crate::training::episode::{
    episode_seed, play_eval_game, play_self_play_game, play_training_game,
};
use crate::training::metrics::TrainingMetrics;
use crate::training::mode::TrainingMode;

/// The learner always trains as the first player's color.
pub const LEARNER_MARK: Mark = Mark::Red;

/// Trainer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub num_games: usize,
    pub mode: TrainingMode,
    pub log_interval: usize,
    /// Games between evaluation rounds; 0 disables them
    pub eval_interval: usize,
    pub eval_games: usize,
    /// Start games from a random mid-game position
    pub random_openings: bool,
    /// Empty cells a random opening leaves on the board
    pub opening_reserve: usize,
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            num_games: 1000,
            mode: TrainingMode::Semi,
            log_interval: 100,
            eval_interval: 0,
            eval_games: 50,
            random_openings: true,
            opening_reserve: 12,
            seed: None,
        }
    }
}

/// Greedy results against the evaluation opponent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalSummary {
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl EvalSummary {
    pub fn games(&self) -> usize {
        self.wins + self.losses + self.draws
    }

    pub fn win_rate(&self) -> f64 {
        if self.games() == 0 {
            return 0.0;
        }
        self.wins as f64 / self.games() as f64
    }

    fn record(&mut self, reward: Reward) {
        match reward {
            Reward::Win => self.wins += 1,
            Reward::Loss => self.losses += 1,
            Reward::Draw => self.draws += 1,
        }
    }
}

/// What one call to [`Trainer::train`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainingSummary {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub explorations: usize,
    /// States in the learner's table when training stopped
    pub states_known: usize,
}

/// Runs batches of learning games against one opponent and keeps the
/// lifetime statistics file up to date.
pub struct Trainer {
    config: TrainerConfig,
    search: SearchConfig,
    stats: GameStats,
    stats_path: Option<PathBuf>,
    base_seed: u64,
    rng: StdRng,
    eval_rounds: usize,
}

impl Trainer {
    pub fn new(config: TrainerConfig, search: SearchConfig) -> Self {
        let base_seed = config.seed.unwrap_or_else(rand::random);
        Trainer {
            config,
            search,
            stats: GameStats::default(),
            stats_path: None,
            base_seed,
            rng: StdRng::seed_from_u64(base_seed),
            eval_rounds: 0,
        }
    }

    /// Accumulate statistics into the file at `path`, loading what is there.
    pub fn with_stats(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.stats = GameStats::load_or_default(&path);
        self.stats_path = Some(path);
        self
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Run the full training loop.
    pub fn train(&mut self, learner: &mut TdLearner) -> Result<TrainingSummary, TrainingError> {
        let mode = self.config.mode;
        let mut opponent = mode.opponent(&self.search, Some(episode_seed(self.base_seed, 0)));
        let mut metrics = TrainingMetrics::with_capacity(self.config.log_interval.max(1));
        let mut summary = TrainingSummary::default();

        learner.set_epsilon(learner.config().epsilon_train);

        info!(
            "starting {} training games vs {} (epsilon {:.2}, {} known states)",
            self.config.num_games,
            opponent.as_ref().map_or("itself", |o| o.name()),
            learner.epsilon(),
            learner.values().len()
        );

        for game in 1..=self.config.num_games {
            let start = self.starting_position(game);
            let result = match opponent.as_mut() {
                Some(agent) => play_training_game(learner, &mut **agent, LEARNER_MARK, start)?,
                None => play_self_play_game(learner, LEARNER_MARK, start)?,
            };

            metrics.record_episode(result);
            summary.games += 1;
            summary.explorations += result.explorations;
            match result.reward {
                Reward::Win => summary.wins += 1,
                Reward::Loss => summary.losses += 1,
                Reward::Draw => summary.draws += 1,
            }

            self.stats.record(mode.as_str(), result.reward);
            self.save_stats();

            if game % self.config.log_interval.max(1) == 0 {
                let window = self.config.log_interval;
                info!(
                    "game {}/{} | win: {:.1}% | draw: {:.1}% | loss: {:.1}% | avg_len: {:.1} | explore: {:.1}% | states: {}",
                    game,
                    self.config.num_games,
                    metrics.win_rate(window) * 100.0,
                    metrics.draw_rate(window) * 100.0,
                    metrics.loss_rate(window) * 100.0,
                    metrics.average_game_length(window),
                    metrics.exploration_rate(window) * 100.0,
                    learner.values().len()
                );
            }

            if self.config.eval_interval > 0 && game % self.config.eval_interval == 0 {
                let eval = self.evaluate(learner)?;
                info!(
                    "  >> eval ({} games): {:.1}% win, {} draws, {} losses",
                    eval.games(),
                    eval.win_rate() * 100.0,
                    eval.draws,
                    eval.losses
                );
            }
        }

        if let Err(e) = learner.flush() {
            warn!("final value table save failed: {e}");
        }

        summary.states_known = learner.values().len();
        info!(
            "training complete: {} games, {} wins, {} draws, {} losses",
            summary.games, summary.wins, summary.draws, summary.losses
        );
        Ok(summary)
    }

    /// Play `eval_games` greedy games against a fresh copy of the training
    /// opponent (a random player in self-play mode), alternating sides.
    pub fn evaluate(&mut self, learner: &mut TdLearner) -> Result<EvalSummary, TrainingError> {
        self.eval_rounds += 1;
        let seed = episode_seed(self.base_seed, self.eval_rounds);
        let mut opponent: Box<dyn Agent> = self
            .config
            .mode
            .opponent(&self.search, Some(seed))
            .unwrap_or_else(|| Box::new(RandomAgent::with_seed(seed)));

        let mut summary = EvalSummary::default();
        for game_idx in 0..self.config.eval_games {
            let learner_mark = if game_idx % 2 == 0 {
                Mark::Red
            } else {
                Mark::Yellow
            };
            let reward =
                play_eval_game(learner, &mut *opponent, learner_mark, GameState::initial())?;
            summary.record(reward);
        }
        Ok(summary)
    }

    fn starting_position(&mut self, game: usize) -> GameState {
        if self.config.random_openings {
            let (board, to_move) =
                random_opening(&mut self.rng, ROWS, COLS, self.config.opening_reserve);
            GameState::from_position(board, to_move)
        } else {
            let first = if game % 2 == 1 { Mark::Red } else { Mark::Yellow };
            GameState::from_position(Board::new(), first)
        }
    }

    fn save_stats(&self) {
        if let Some(path) = &self.stats_path {
            if let Err(e) = self.stats.save(path) {
                warn!("statistics not saved: {e}");
            }
        }
    }
}
