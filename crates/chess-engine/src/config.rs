//! Engine configuration.
//!
//! Settings are read from a TOML file. Every field has a default, so a
//! missing file or an empty one yields a working configuration.

use crate::board::{Board, PANDEMONIUM_PROBABILITY};
use crate::rules::WinCondition;
use crate::search::{Evaluation, SearchConfig, Strategy};
use chess_core::Color;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Deepest search the configuration accepts.
pub const MAX_SEARCH_DEPTH: u32 = 6;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The search depth is larger than [`MAX_SEARCH_DEPTH`].
    #[error("Search depth {0} exceeds the maximum of {max}", max = MAX_SEARCH_DEPTH)]
    InvalidSearchDepth(u32),
}

/// How the board is laid out when a game starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Setup {
    /// The usual 32-piece starting position.
    #[default]
    Standard,
    /// Every square filled at random with probability
    /// [`PANDEMONIUM_PROBABILITY`].
    Pandemonium,
}

impl Setup {
    /// Builds a starting board, drawing from `rng` when the setup is random.
    pub fn board<R: Rng + ?Sized>(self, rng: &mut R) -> Board {
        match self {
            Setup::Standard => Board::startpos(),
            Setup::Pandemonium => Board::pandemonium(rng, PANDEMONIUM_PROBABILITY),
        }
    }
}

/// Settings for one game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Plies searched below each candidate move. Defaults to 2.
    #[serde(default = "default_search_depth")]
    pub search_depth: u32,
    /// The color the engine plays, or `None` for no engine. Defaults to Black.
    /// In TOML this is `"white"`, `"black"` or `"none"`.
    #[serde(default = "default_engine_color", with = "engine_color")]
    pub engine_color: Option<Color>,
    #[serde(default)]
    pub setup: Setup,
    #[serde(default)]
    pub win_condition: WinCondition,
    #[serde(default)]
    pub evaluation: Evaluation,
    #[serde(default)]
    pub strategy: Strategy,
    /// Seed for tie-breaking. Unseeded sessions draw from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_search_depth() -> u32 {
    2
}

fn default_engine_color() -> Option<Color> {
    Some(Color::Black)
}

/// Reads and writes an optional engine color as a plain name, with
/// `"none"` standing for no engine.
mod engine_color {
    use chess_core::Color;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    const NAMES: &[&str] = &["white", "black", "none"];

    pub fn serialize<S: Serializer>(
        color: &Option<Color>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match color {
            Some(color) => color.serialize(serializer),
            None => serializer.serialize_str("none"),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Color>, D::Error> {
        let name = String::deserialize(deserializer)?;
        match name.as_str() {
            "white" => Ok(Some(Color::White)),
            "black" => Ok(Some(Color::Black)),
            "none" => Ok(None),
            other => Err(D::Error::unknown_variant(other, NAMES)),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            search_depth: default_search_depth(),
            engine_color: default_engine_color(),
            setup: Setup::default(),
            win_condition: WinCondition::default(),
            evaluation: Evaluation::default(),
            strategy: Strategy::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Loads the configuration from [`Self::config_path()`].
    ///
    /// # Errors
    ///
    /// See [`Self::load_from`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::config_path())
    }

    /// Loads the configuration from `path`, or the defaults if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] if the file contains invalid TOML, or
    /// [`ConfigError::InvalidSearchDepth`] if the depth is out of range.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the default configuration file path, `engine.toml` in the
    /// current working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("engine.toml")
    }

    /// Checks values that parse but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::InvalidSearchDepth(self.search_depth));
        }
        Ok(())
    }

    /// Returns the search parameters.
    pub fn search(&self) -> SearchConfig {
        SearchConfig {
            depth: self.search_depth,
            evaluation: self.evaluation,
            strategy: self.strategy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
search_depth = 3
engine_color = "white"
setup = "pandemonium"
win_condition = "capture-king"
evaluation = "piece-square"
strategy = "random"
seed = 42
"#;

        let config = EngineConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.search_depth, 3);
        assert_eq!(config.engine_color, Some(Color::White));
        assert_eq!(config.setup, Setup::Pandemonium);
        assert_eq!(config.win_condition, WinCondition::CaptureKing);
        assert_eq!(config.evaluation, Evaluation::PieceSquare);
        assert_eq!(config.strategy, Strategy::Random);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.search_depth, 2);
        assert_eq!(config.engine_color, Some(Color::Black));
        assert_eq!(config.setup, Setup::Standard);
        assert_eq!(config.win_condition, WinCondition::CaptureAll);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_invalid_toml() {
        let err = EngineConfig::from_toml_str("search_depth = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_unknown_variant_is_rejected() {
        let err = EngineConfig::from_toml_str("win_condition = \"checkmate\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_depth_limit() {
        let err = EngineConfig::from_toml_str("search_depth = 9").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSearchDepth(9)));
        assert_eq!(
            err.to_string(),
            "Search depth 9 exceeds the maximum of 6"
        );
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = EngineConfig::load_from("does/not/exist/engine.toml").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_search_config() {
        let config = EngineConfig {
            search_depth: 4,
            evaluation: Evaluation::PieceSquare,
            ..EngineConfig::default()
        };
        let search = config.search();
        assert_eq!(search.depth, 4);
        assert_eq!(search.evaluation, Evaluation::PieceSquare);
        assert_eq!(search.strategy, Strategy::Minimax);
    }

    #[test]
    fn test_engine_color_none() {
        let config = EngineConfig::from_toml_str("engine_color = \"none\"").unwrap();
        assert_eq!(config.engine_color, None);

        let err = EngineConfig::from_toml_str("engine_color = \"red\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_engine_color_survives_serialization() {
        for engine_color in [None, Some(Color::White), Some(Color::Black)] {
            let config = EngineConfig {
                engine_color,
                ..EngineConfig::default()
            };
            let text = toml::to_string(&config).unwrap();
            assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
        }
    }

    #[test]
    fn test_setup_builds_board() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Setup::Standard.board(&mut rng), Board::startpos());
        let board = Setup::Pandemonium.board(&mut rng);
        assert!(board.is_consistent());
    }
}
