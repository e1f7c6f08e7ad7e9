use std::path::PathBuf;

use crate::game::{MoveError, MoveOutcome, Player};

/// Errors that can occur while loading or saving learned weights.
#[derive(Debug, thiserror::Error)]
pub enum WeightsError {
    #[error("failed to read weights from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse weights from {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write weights to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("weights file {0} does not contain a JSON object")]
    NotAnObject(PathBuf),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur during self-play training.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("{player:?} had no move on a non-terminal board")]
    NoMove { player: Player },

    #[error("{player:?} selected illegal column {column}: {reason}")]
    IllegalMove {
        player: Player,
        column: usize,
        reason: MoveError,
    },

    #[error("weights error: {0}")]
    Weights(#[from] WeightsError),
}

/// Errors reported by [`Session`](crate::session::Session).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("it is not a human player's turn")]
    NotHumanTurn,

    #[error("it is not an agent's turn")]
    NotAgentTurn,

    #[error("game is already over")]
    GameOver,

    #[error("{player:?} agent returned no move")]
    NoMove { player: Player },

    #[error("{player:?} agent selected illegal column {column}: {reason}")]
    IllegalAgentMove {
        player: Player,
        column: usize,
        reason: MoveError,
    },

    /// The move was played and stands, but finalizing an agent failed.
    #[error("move played ({outcome:?}) but finalizing an agent failed: {source}")]
    Finalize {
        outcome: MoveOutcome,
        source: WeightsError,
    },
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
    fn test_weights_error_display() {
        let err = WeightsError::NotAnObject(PathBuf::from("agent_weights.json"));
        assert_eq!(
            err.to_string(),
            "weights file agent_weights.json does not contain a JSON object"
        );
    }

    #[test]
    fn test_training_error_display() {
        let err = TrainingError::IllegalMove {
            player: Player::Two,
            column: 5,
            reason: MoveError::ColumnFull,
        };
        assert_eq!(err.to_string(), "Two selected illegal column 5: column is full");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("adaptive.learning_rate must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: adaptive.learning_rate must be > 0"
        );
    }
}
