use std::collections::HashMap;
use std::path::Path;

use crate::ai::state_encoding::StateKey;
use crate::error::StorageError;

/// State values learned by the TD learner. Unseen states are worth 0.0.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ValueTable {
    values: HashMap<StateKey, f64>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `key`, or 0.0 if it has never been updated
    pub fn get(&self, key: &StateKey) -> f64 {
        self.values.get(key).copied().unwrap_or(0.0)
    }

    pub fn insert(&mut self, key: StateKey, value: f64) {
        self.values.insert(key, value);
    }

    pub fn contains(&self, key: &StateKey) -> bool {
        self.values.contains_key(key)
    }

    /// Number of states with a stored value
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, f64)> {
        self.values.iter().map(|(k, &v)| (k, v))
    }

    pub fn load(path: &Path) -> Result<Self, StorageError> {
        super::read_json(path)
    }

    /// Load from `path`, or start with an empty table if that fails.
    pub fn load_or_default(path: &Path) -> Self {
        super::read_json_or_default(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        super::write_json(path, self)
    }
}
