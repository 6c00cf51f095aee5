use std::path::Path;

use crate::ai::Difficulty;
use crate::error::ConfigError;
use crate::game::{PlacementMode, DEFAULT_COLS, DEFAULT_ROWS};

/// Game configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub placement: PlacementMode,
    pub difficulty: Difficulty,
    /// Pause in milliseconds after a placement before win/draw is evaluated,
    /// so a placement animation can settle. Zero disables it.
    pub settle_ms: u64,
    /// Whether the AI pauses for its difficulty's thinking delay before
    /// answering.
    pub thinking_delay: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            placement: PlacementMode::Gravity,
            difficulty: Difficulty::Medium,
            settle_ms: 0,
            thinking_delay: true,
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: GameConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!(
                "Warning: config file '{}' not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.rows > 32 {
            return Err(ConfigError::Validation("rows must be in 1..=32".into()));
        }
        if self.cols == 0 || self.cols > 32 {
            return Err(ConfigError::Validation("cols must be in 1..=32".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.rows, 6);
        assert_eq!(config.cols, 7);
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.placement, PlacementMode::Gravity);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
difficulty = "hard"
"#;
        let config: GameConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.rows, 6);
        assert_eq!(config.cols, 7);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: GameConfig = toml::from_str("").unwrap();
        assert_eq!(config.rows, 6);
        assert!(config.thinking_delay);
    }

    #[test]
    fn test_placement_mode_parses() {
        let config: GameConfig = toml::from_str(r#"placement = "free""#).unwrap();
        assert_eq!(config.placement, PlacementMode::Free);
    }

    #[test]
    fn test_validation_rejects_zero_rows() {
        let mut config = GameConfig::default();
        config.rows = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_oversized_board() {
        let mut config = GameConfig::default();
        config.cols = 33;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = GameConfig::load_or_default(Path::new("no_such_config.toml")).unwrap();
        assert_eq!(config.rows, 6);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
rows = 8
cols = 9
difficulty = "extreme"
settle_ms = 120
"#
        )
        .unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.rows, 8);
        assert_eq!(config.cols, 9);
        assert_eq!(config.difficulty, Difficulty::Extreme);
        assert_eq!(config.settle_ms, 120);
        // others are defaults
        assert_eq!(config.placement, PlacementMode::Gravity);
    }

    #[test]
    fn test_load_rejects_invalid_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");
        std::fs::write(&path, "rows = 0\n").unwrap();
        assert!(GameConfig::load(&path).is_err());
    }
}
