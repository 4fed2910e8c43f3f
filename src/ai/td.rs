//! Tabular TD(0) learner.
//!
//! The learner keeps a value for every (board, perspective) it has produced.
//! During a game it records the position left behind after each of its own
//! moves; when the game ends the recorded positions are updated back to
//! front, each toward the final reward plus the discounted value of the
//! position that followed it:
//!
//! ```text
//! target(last) = r
//! target(i)    = r + gamma * V(s[i+1])
//! V(s[i])     += alpha * (target(i) - V(s[i]))
//! ```
//!
//! Because the pass runs backward, `V(s[i+1])` has already received its own
//! update for this game when `s[i]` reads it.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{AgentError, StorageError};
use crate::game::{Board, Mark, Reward};
use crate::storage::ValueTable;

use super::agent::Agent;
use super::state_encoding::{encode_state, StateKey};

/// Learning hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TdConfig {
    /// Step size toward the TD target
    pub alpha: f64,
    /// Discount applied to the successor's value
    pub gamma: f64,
    /// Exploration rate while training against scripted opponents
    pub epsilon_train: f64,
    /// Exploration rate while playing a human
    pub epsilon_human: f64,
    /// Finished episodes between value-table saves
    pub save_every: usize,
}

impl Default for TdConfig {
    fn default() -> Self {
        TdConfig {
            alpha: 0.1,
            gamma: 0.99,
            epsilon_train: 0.20,
            epsilon_human: 0.10,
            save_every: 1,
        }
    }
}

/// Which branch of the epsilon-greedy policy produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    Exploration,
    Exploitation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveChoice {
    pub column: usize,
    pub kind: DecisionKind,
}

/// Value-table agent owning its table and the current episode.
pub struct TdLearner {
    config: TdConfig,
    epsilon: f64,
    values: ValueTable,
    episode: Vec<StateKey>,
    rng: StdRng,
    store: Option<PathBuf>,
    unsaved_episodes: usize,
    last_choice: Option<MoveChoice>,
}

impl TdLearner {
    /// In-memory learner with an empty table
    pub fn new(config: TdConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_seed(config: TdConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: TdConfig, rng: StdRng) -> Self {
        TdLearner {
            epsilon: config.epsilon_train,
            config,
            values: ValueTable::new(),
            episode: Vec::new(),
            rng,
            store: None,
            unsaved_episodes: 0,
            last_choice: None,
        }
    }

    /// Persist the table at `path`, loading whatever is already there.
    pub fn with_store(mut self, path: impl Into<PathBuf>) -> Self {
        self.store = Some(path.into());
        self.load_values();
        self
    }

    pub fn config(&self) -> &TdConfig {
        &self.config
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    /// Current value of a state
    pub fn value(&self, key: &StateKey) -> f64 {
        self.values.get(key)
    }

    pub fn set_value(&mut self, key: StateKey, value: f64) {
        self.values.insert(key, value);
    }

    /// States recorded so far in the current game, oldest first
    pub fn episode(&self) -> &[StateKey] {
        &self.episode
    }

    /// The most recent move choice, for display
    pub fn last_choice(&self) -> Option<MoveChoice> {
        self.last_choice
    }

    pub fn store_path(&self) -> Option<&Path> {
        self.store.as_deref()
    }

    /// Epsilon-greedy move for `mark`.
    ///
    /// With probability `epsilon` a uniformly random valid column is
    /// returned. Otherwise each valid column is simulated and scored by the
    /// value of the resulting state from `mark`'s perspective; ties between
    /// the best columns are broken uniformly at random.
    pub fn select_move(
        &mut self,
        board: &Board,
        mark: Mark,
        epsilon: f64,
    ) -> Result<MoveChoice, AgentError> {
        let valid = board.valid_columns();
        if valid.is_empty() {
            return Err(AgentError::NoLegalMove);
        }

        let choice = if self.rng.random::<f64>() < epsilon {
            MoveChoice {
                column: valid[self.rng.random_range(0..valid.len())],
                kind: DecisionKind::Exploration,
            }
        } else {
            let mut best_value = f64::NEG_INFINITY;
            let mut best_columns = Vec::with_capacity(valid.len());
            for &col in &valid {
                let Ok(next) = board.with_move(col, mark) else {
                    continue;
                };
                let value = self.values.get(&encode_state(&next, mark));
                if value > best_value {
                    best_value = value;
                    best_columns.clear();
                    best_columns.push(col);
                } else if value == best_value {
                    best_columns.push(col);
                }
            }
            if best_columns.is_empty() {
                return Err(AgentError::NoLegalMove);
            }
            MoveChoice {
                column: best_columns[self.rng.random_range(0..best_columns.len())],
                kind: DecisionKind::Exploitation,
            }
        };

        debug!(
            "td {} picks column {} ({:?})",
            mark.name(),
            choice.column,
            choice.kind
        );
        self.last_choice = Some(choice);
        Ok(choice)
    }

    /// Forget any states left over from an unfinished game.
    pub fn start_episode(&mut self) {
        self.episode.clear();
        self.last_choice = None;
    }

    /// Remember the position the learner just produced.
    pub fn record_state(&mut self, board: &Board, mark: Mark) {
        self.episode.push(encode_state(board, mark));
    }

    /// Apply the backward TD(0) pass for the finished game, clear the
    /// episode, and save the table when a save is due.
    ///
    /// Returns the number of states updated. A save failure is returned as
    /// an error, but the in-memory updates are kept and the next save
    /// retries them. A game in which the learner never moved changes
    /// nothing and triggers no save.
    pub fn finish_episode(&mut self, reward: Reward) -> Result<usize, StorageError> {
        if self.episode.is_empty() {
            return Ok(0);
        }
        let updated = self.update(reward.value());
        self.unsaved_episodes += 1;
        if self.unsaved_episodes >= self.config.save_every.max(1) {
            self.save_values()?;
        }
        Ok(updated)
    }

    fn update(&mut self, reward: f64) -> usize {
        let episode = std::mem::take(&mut self.episode);
        let Some(last) = episode.len().checked_sub(1) else {
            return 0;
        };

        for i in (0..=last).rev() {
            let current = self.values.get(&episode[i]);
            let target = if i == last {
                reward
            } else {
                reward + self.config.gamma * self.values.get(&episode[i + 1])
            };
            self.values
                .insert(episode[i].clone(), current + self.config.alpha * (target - current));
        }

        debug!("td update: {} states toward reward {}", episode.len(), reward);
        episode.len()
    }

    /// Reload the table from the store, resetting to empty on any failure.
    pub fn load_values(&mut self) {
        if let Some(path) = &self.store {
            self.values = ValueTable::load_or_default(path);
            self.unsaved_episodes = 0;
            info!("loaded {} state values from {}", self.values.len(), path.display());
        }
    }

    /// Write the table to the store. Without a store this does nothing.
    pub fn save_values(&mut self) -> Result<(), StorageError> {
        let Some(path) = &self.store else {
            return Ok(());
        };
        self.values.save(path)?;
        self.unsaved_episodes = 0;
        Ok(())
    }

    /// Save if any finished episode has not been written yet.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        if self.unsaved_episodes > 0 {
            self.save_values()?;
        }
        Ok(())
    }
}

impl Agent for TdLearner {
    fn select_move(&mut self, board: &Board, mark: Mark) -> Result<usize, AgentError> {
        let epsilon = self.epsilon;
        TdLearner::select_move(self, board, mark, epsilon).map(|choice| choice.column)
    }

    fn name(&self) -> &str {
        "TD learner"
    }
}

impl Drop for TdLearner {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!("value table not saved on shutdown: {e}");
        }
    }
}
