use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::game::Reward;

/// Results for one training mode, from the learner's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeStats {
    pub games: u64,
    pub learner_wins: u64,
    pub opponent_wins: u64,
    pub draws: u64,
}

impl ModeStats {
    /// Fraction of games the learner won
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.learner_wins as f64 / self.games as f64
    }
}

/// Lifetime results across all modes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStats {
    pub total_games: u64,
    pub modes: BTreeMap<String, ModeStats>,
}

impl GameStats {
    pub fn record(&mut self, mode: &str, reward: Reward) {
        self.total_games += 1;
        let entry = self.modes.entry(mode.to_string()).or_default();
        entry.games += 1;
        match reward {
            Reward::Win => entry.learner_wins += 1,
            Reward::Loss => entry.opponent_wins += 1,
            Reward::Draw => entry.draws += 1,
        }
    }

    pub fn mode(&self, mode: &str) -> ModeStats {
        self.modes.get(mode).copied().unwrap_or_default()
    }

    pub fn load(path: &Path) -> Result<Self, StorageError> {
        super::read_json(path)
    }

    pub fn load_or_default(path: &Path) -> Self {
        super::read_json_or_default(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        super::write_json(path, self)
    }
}
