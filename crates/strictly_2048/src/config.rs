//! Game configuration.

use crate::board::Board;
use crate::error::{ConfigError, GameError};
use crate::values::{PresetValues, StandardValues, ValueSource};
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Where spawned tile values come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ValuesConfig {
    /// Classic 2-or-4 spawns.
    Standard {
        /// Probability of spawning a 4.
        #[serde(default = "default_four_chance")]
        four_chance: f64,
    },
    /// A preset table file (line or TOML format).
    Preset {
        /// Path to the table.
        path: PathBuf,
    },
}

impl Default for ValuesConfig {
    fn default() -> Self {
        ValuesConfig::Standard {
            four_chance: default_four_chance(),
        }
    }
}

impl ValuesConfig {
    /// Builds the configured value source.
    ///
    /// # Errors
    ///
    /// Returns `GameError` if the chance is out of range or the preset file
    /// cannot be loaded.
    #[instrument]
    pub fn build(&self) -> Result<Box<dyn ValueSource + Send>, GameError> {
        let source: Box<dyn ValueSource + Send> = match self {
            ValuesConfig::Standard { four_chance } => Box::new(StandardValues::new(*four_chance)?),
            ValuesConfig::Preset { path } => Box::new(PresetValues::from_file(path)?),
        };
        Ok(source)
    }
}

/// Configuration for a game session.
///
/// Every field has a default, so an empty TOML file is a valid 4x4 game to
/// 2048.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Board width (columns).
    #[serde(default = "default_size")]
    width: usize,

    /// Board height (rows).
    #[serde(default = "default_size")]
    height: usize,

    /// Tile value that wins the game.
    #[serde(default = "default_winning_value")]
    winning_value: u32,

    /// Tiles spawned when the session starts.
    #[serde(default = "default_initial_tiles")]
    initial_tiles: usize,

    /// Random seed; a fresh one is drawn when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Keep accepting moves after a victory.
    #[serde(default)]
    continue_after_victory: bool,

    /// Value source for spawns.
    #[serde(default)]
    values: ValuesConfig,
}

fn default_size() -> usize {
    4
}

fn default_winning_value() -> u32 {
    2048
}

fn default_initial_tiles() -> usize {
    1
}

fn default_four_chance() -> f64 {
    StandardValues::DEFAULT_FOUR_CHANCE
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: default_size(),
            height: default_size(),
            winning_value: default_winning_value(),
            initial_tiles: default_initial_tiles(),
            seed: None,
            continue_after_victory: false,
            values: ValuesConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parses configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on malformed TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    ///
    /// A relative preset path is resolved against the config file's directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_toml_str(&content)?;
        if let ValuesConfig::Preset { path: preset } = &mut config.values
            && preset.is_relative()
            && let Some(dir) = path.parent()
        {
            *preset = dir.join(&*preset);
        }

        info!(
            width = config.width,
            height = config.height,
            winning_value = config.winning_value,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Checks that the configuration describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidConfiguration` for a zero dimension, more
    /// than [`Board::MAX_CELLS`] cells, a winning value below 4, more initial
    /// tiles than cells, or a `four_chance` outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), GameError> {
        let cells = Board::cell_count(self.height, self.width)?;
        if self.winning_value < 4 {
            return Err(GameError::InvalidConfiguration(format!(
                "winning_value({}) must be at least 4",
                self.winning_value
            )));
        }
        if self.initial_tiles > cells {
            return Err(GameError::InvalidConfiguration(format!(
                "initial_tiles({}) exceeds the {} cells of the board",
                self.initial_tiles, cells
            )));
        }
        if let ValuesConfig::Standard { four_chance } = self.values {
            StandardValues::new(four_chance)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(*config.width(), 4);
        assert_eq!(*config.winning_value(), 2048);
    }

    #[test]
    fn test_toml_overrides() {
        let config = GameConfig::from_toml_str(
            r#"
            width = 5
            height = 3
            winning_value = 512
            seed = 99

            [values]
            kind = "preset"
            path = "values.txt"
            "#,
        )
        .unwrap();

        assert_eq!(*config.width(), 5);
        assert_eq!(*config.height(), 3);
        assert_eq!(*config.seed(), Some(99));
        assert_eq!(
            config.values(),
            &ValuesConfig::Preset {
                path: PathBuf::from("values.txt")
            }
        );
    }

    #[test]
    fn test_standard_chance_defaults() {
        let config = GameConfig::from_toml_str("[values]\nkind = \"standard\"\n").unwrap();
        assert_eq!(config.values(), &ValuesConfig::default());
    }

    #[test]
    fn test_validate_rejects_zero_width() {
        let config = GameConfig::default().with_width(0);
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_overflowing_dimensions() {
        let config = GameConfig::default()
            .with_width(usize::MAX / 2)
            .with_height(4);
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_board() {
        let config = GameConfig::default().with_width(1 << 12).with_height(1 << 12);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds 65536 cells"));
    }

    #[test]
    fn test_validate_rejects_too_many_initial_tiles() {
        let config = GameConfig::default()
            .with_width(2)
            .with_height(2)
            .with_initial_tiles(5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = GameConfig::from_toml_str("width = \"wide\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }
}
