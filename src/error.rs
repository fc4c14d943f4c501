use std::path::PathBuf;

use crate::game::MoveError;

/// Errors raised when records are written to an agent's memory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemoryError {
    #[error("record has {got} columns, expected {expected}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("cell value {value} at column {column} is not a valid cell encoding")]
    InvalidCell { column: usize, value: i64 },

    #[error("outcome label {value} is not a valid outcome encoding")]
    InvalidOutcome { value: i64 },

    #[error("records from unfinished games cannot be memorized")]
    UnfinishedRecord,
}

/// Errors raised at the scoring-function boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("got {states} states but {outcomes} outcome labels")]
    ShapeMismatch { states: usize, outcomes: usize },

    #[error("outcome labels must be terminal")]
    UnfinishedLabel,
}

/// Errors that can occur while playing or learning from self-play games.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error("{agent} made an illegal move: {source}")]
    IllegalMove {
        agent: String,
        #[source]
        source: MoveError,
    },

    #[error("game ended without a terminal outcome after {plies} plies")]
    MissingOutcome { plies: usize },

    #[error("memory error: {0}")]
    Memory(#[from] MemoryError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),
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
    fn test_memory_error_display() {
        let err = MemoryError::ShapeMismatch {
            expected: 10,
            got: 9,
        };
        assert_eq!(err.to_string(), "record has 9 columns, expected 10");
    }

    #[test]
    fn test_self_play_error_display() {
        let err = SelfPlayError::IllegalMove {
            agent: "Tactical".to_string(),
            source: MoveError::InvalidMove { position: 2 },
        };
        assert_eq!(
            err.to_string(),
            "Tactical made an illegal move: invalid move: position 2 is already occupied"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("brain.learning_rate must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: brain.learning_rate must be > 0"
        );
    }
}
