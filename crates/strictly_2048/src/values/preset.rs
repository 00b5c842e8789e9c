//! Table-driven value source.
//!
//! A preset maps "largest value on the board" to a weighted list of values
//! to spawn. Two file formats are accepted.
//!
//! Line format, one row per line, `#` starts a comment line:
//!
//! ```text
//! # max | value(chance) ...
//! 2    | 2(100)
//! 64   | 2(80) 4(20)
//! 512  | 2(60) 4(30) 8(10)
//! ```
//!
//! TOML format:
//!
//! ```toml
//! [[rules]]
//! max = 2
//! values = [{ value = 2, chance = 100 }]
//! ```
//!
//! Chances in each row must add up to 100.

use super::ValueSource;
use crate::error::ConfigError;
use crate::random::GameRng;
use crate::tile::{MAX_TILE_VALUE, MIN_TILE_VALUE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// One weighted candidate in a preset row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetChoice {
    /// Value to spawn.
    pub value: u32,
    /// Percentage weight.
    pub chance: u32,
}

/// A preset row: the candidates used while the board maximum is `max`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetRow {
    /// Board maximum this row applies from.
    pub max: u32,
    /// Weighted candidates.
    pub values: Vec<PresetChoice>,
}

#[derive(Debug, Deserialize)]
struct PresetFile {
    rules: Vec<PresetRow>,
}

/// Value source driven by a preset table.
///
/// The row used is the one with the greatest `max` not above the current
/// board maximum; below the smallest key the first row applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetValues {
    rows: BTreeMap<u32, Vec<PresetChoice>>,
    max_value: u32,
}

impl PresetValues {
    /// Builds a preset from rows, validating each one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if there are no rows, a key repeats, a value is
    /// below 2, or a row's chances do not add up to 100.
    #[instrument(skip(rows))]
    pub fn new(rows: impl IntoIterator<Item = PresetRow>) -> Result<Self, ConfigError> {
        let mut table = BTreeMap::new();
        for row in rows {
            validate_row(&row)?;
            if table.insert(row.max, row.values).is_some() {
                return Err(ConfigError::new(format!(
                    "Preset row for max {} appears twice",
                    row.max
                )));
            }
        }
        if table.is_empty() {
            return Err(ConfigError::new("Preset has no rows"));
        }
        debug!(rows = table.len(), "Preset table built");
        Ok(Self {
            rows: table,
            max_value: 2,
        })
    }

    /// Parses the TOML format.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on malformed TOML or an invalid table.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: PresetFile = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse preset: {}", e)))?;
        Self::new(file.rules)
    }

    /// Loads a preset file; `.toml` files use the TOML format, anything else
    /// the line format.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Cannot open file {}: {}", path.display(), e)))?;

        let preset = if path.extension().is_some_and(|ext| ext == "toml") {
            Self::from_toml_str(&content)?
        } else {
            content.parse()?
        };
        info!(rows = preset.rows.len(), "Preset loaded");
        Ok(preset)
    }

    /// Rows in ascending `max` order.
    pub fn rows(&self) -> Vec<PresetRow> {
        self.rows
            .iter()
            .map(|(&max, values)| PresetRow {
                max,
                values: values.clone(),
            })
            .collect()
    }

    /// Board maximum last reported through [`ValueSource::set_max_value`].
    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    fn active_row(&self) -> &[PresetChoice] {
        self.rows
            .range(..=self.max_value)
            .next_back()
            .or_else(|| self.rows.iter().next())
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }
}

impl ValueSource for PresetValues {
    fn generate_value(&mut self, rng: &mut GameRng) -> u32 {
        let row = self.active_row();
        let roll = rng.next_in(0, 100);

        let mut sum = 0;
        for choice in row {
            sum += choice.chance;
            if roll <= sum {
                return choice.value;
            }
        }
        // Chances add up to 100, so only an empty table gets here.
        row.last().map(|c| c.value).unwrap_or(2)
    }

    fn set_max_value(&mut self, value: u32) {
        debug_assert!(value >= 2, "max value {value} must be >= 2");
        self.max_value = value;
    }
}

impl FromStr for PresetValues {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            rows.push(parse_line(line).map_err(|message| {
                ConfigError::new(format!("Line {}: {}", number + 1, message))
            })?);
        }
        Self::new(rows)
    }
}

fn parse_line(line: &str) -> Result<PresetRow, String> {
    let (max, choices) = line
        .split_once('|')
        .ok_or_else(|| format!("expected `max | value(chance) ...`, got `{line}`"))?;
    let max = max
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("bad max value `{}`: {e}", max.trim()))?;

    let values = choices
        .split_whitespace()
        .map(parse_choice)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PresetRow { max, values })
}

fn parse_choice(token: &str) -> Result<PresetChoice, String> {
    let (value, rest) = token
        .split_once('(')
        .ok_or_else(|| format!("expected `value(chance)`, got `{token}`"))?;
    let chance = rest
        .strip_suffix(')')
        .ok_or_else(|| format!("missing `)` in `{token}`"))?;

    let value = value
        .parse::<u32>()
        .map_err(|e| format!("bad value in `{token}`: {e}"))?;
    let chance = chance
        .parse::<u32>()
        .map_err(|e| format!("bad chance in `{token}`: {e}"))?;
    Ok(PresetChoice { value, chance })
}

#[track_caller]
fn validate_row(row: &PresetRow) -> Result<(), ConfigError> {
    if row.max < 2 {
        return Err(ConfigError::new(format!(
            "Preset max({}) must be >= 2",
            row.max
        )));
    }
    if row.values.is_empty() {
        return Err(ConfigError::new(format!(
            "Preset row for max {} has no values",
            row.max
        )));
    }
    if let Some(choice) = row
        .values
        .iter()
        .find(|c| !(MIN_TILE_VALUE..=MAX_TILE_VALUE).contains(&c.value))
    {
        return Err(ConfigError::new(format!(
            "Preset value({}) for max {} must be within [{}, {}]",
            choice.value, row.max, MIN_TILE_VALUE, MAX_TILE_VALUE
        )));
    }
    let total: u32 = row.values.iter().map(|c| c.chance).sum();
    if total != 100 {
        return Err(ConfigError::new(format!(
            "Preset chances for max {} add up to {}, expected 100",
            row.max, total
        )));
    }
    Ok(())
}
