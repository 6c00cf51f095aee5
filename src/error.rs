use std::path::PathBuf;

/// Errors that can occur when applying a move to a game session.
///
/// An invalid move is an expected, recoverable condition: the session is left
/// untouched and the caller simply does not advance the turn.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell ({row}, {col}) is out of bounds")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("the game is already over")]
    GameOver,
}

/// A collaborator (renderer, sound, persistence) failed while a move was
/// being resolved. The coordinator finalizes the state transition and
/// releases its locks before surfacing this.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("collaborator failed during move resolution: {0}")]
pub struct ObserverError(pub String);

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
        let err = MoveError::Occupied { row: 2, col: 5 };
        assert_eq!(err.to_string(), "cell (2, 5) is already occupied");
    }

    #[test]
    fn test_observer_error_display() {
        let err = ObserverError("renderer crashed".to_string());
        assert_eq!(
            err.to_string(),
            "collaborator failed during move resolution: renderer crashed"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("rows must be >= 1".to_string());
        assert_eq!(err.to_string(), "config validation error: rows must be >= 1");
    }
}
