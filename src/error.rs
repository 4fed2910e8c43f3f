use std::path::PathBuf;

/// Errors from applying a move to a board or game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {col} is out of range (board has {cols} columns)")]
    InvalidColumn { col: usize, cols: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("game is already over")]
    GameOver,
}

/// Errors an agent can report instead of a column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    #[error("no legal move: every column is full")]
    NoLegalMove,
}

/// Errors that can occur while reading or writing persisted state.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors that can occur while playing training or evaluation games.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("agent selected illegal column {col} (legal: {legal:?})")]
    IllegalAction { col: usize, legal: Vec<usize> },

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("game should be terminal but has no outcome")]
    MissingOutcome,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        let err = MoveError::InvalidColumn { col: 9, cols: 7 };
        assert_eq!(
            err.to_string(),
            "column 9 is out of range (board has 7 columns)"
        );
        assert_eq!(MoveError::ColumnFull(3).to_string(), "column 3 is full");
    }

    #[test]
    fn test_training_error_display() {
        let err = TrainingError::IllegalAction {
            col: 5,
            legal: vec![0, 1, 2],
        };
        assert_eq!(
            err.to_string(),
            "agent selected illegal column 5 (legal: [0, 1, 2])"
        );
    }

    #[test]
    fn test_agent_error_converts_into_training_error() {
        let err: TrainingError = AgentError::NoLegalMove.into();
        assert_eq!(
            err.to_string(),
            "agent error: no legal move: every column is full"
        );
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Read {
            path: PathBuf::from("td_values.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "failed to read td_values.json: missing");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("learning.alpha must be in (0, 1]".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: learning.alpha must be in (0, 1]"
        );
    }
}
