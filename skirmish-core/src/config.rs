//! Game configuration: map size, enemy count, and stat ranges.
//!
//! Everything that the game rolls or places at setup time is driven by an
//! explicit [`GameConfig`] handed to the roster factory; there are no
//! process-wide tunables. A JSON file can override any field, with missing
//! fields falling back to the defaults.

use crate::grid::{Grid, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("map must be at least 1x1, got {width}x{height}")]
    BadDimensions { width: i32, height: i32 },

    #[error("enemy count must not be negative, got {0}")]
    NegativeEnemyCount(i32),

    #[error("{requested} enemies will not fit on a {width}x{height} map")]
    TooManyEnemies {
        requested: i32,
        width: i32,
        height: i32,
    },

    #[error("stat range {min}..={max} is inverted")]
    InvertedRange { min: i32, max: i32 },

    #[error("player start {0} is outside the map")]
    StartOutOfBounds(Position),

    #[error("player name must not be empty")]
    EmptyPlayerName,
}

/// Inclusive range an enemy stat is rolled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRange {
    pub min: i32,
    pub max: i32,
}

impl StatRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Uniform draw over the inclusive range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        rng.gen_range(self.min..=self.max)
    }
}

/// The player character's name, start cell, and stats.
///
/// `start: None` means a random free cell is picked before any enemies are
/// placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
    pub start: Option<Position>,
    pub health: i32,
    pub armor: i32,
    pub damage: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Player".to_string(),
            start: Some(Position::new(0, 0)),
            health: 100,
            armor: 0,
            damage: 1,
        }
    }
}

/// Ranges that each enemy's stats are rolled from, independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyStatConfig {
    pub health: StatRange,
    pub armor: StatRange,
    pub damage: StatRange,
}

impl Default for EnemyStatConfig {
    fn default() -> Self {
        Self {
            health: StatRange::new(50, 150),
            armor: StatRange::new(0, 50),
            damage: StatRange::new(15, 30),
        }
    }
}

/// Complete game setup: map dimensions, enemy count, player, enemy stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub enemies: i32,
    pub player: PlayerConfig,
    pub enemy_stats: EnemyStatConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 2,
            height: 2,
            enemies: 2,
            player: PlayerConfig::default(),
            enemy_stats: EnemyStatConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.width, self.height)
    }

    /// Reject configurations the roster factory cannot honor.
    ///
    /// The "more enemies than free cells" case in particular must fail here,
    /// once, rather than send placement into an endless rejection loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 1 || self.height < 1 {
            return Err(ConfigError::BadDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.enemies < 0 {
            return Err(ConfigError::NegativeEnemyCount(self.enemies));
        }
        let free_cells = self.grid().cell_count() - 1;
        if i64::from(self.enemies) > free_cells {
            return Err(ConfigError::TooManyEnemies {
                requested: self.enemies,
                width: self.width,
                height: self.height,
            });
        }
        for range in [
            self.enemy_stats.health,
            self.enemy_stats.armor,
            self.enemy_stats.damage,
        ] {
            if range.min > range.max {
                return Err(ConfigError::InvertedRange {
                    min: range.min,
                    max: range.max,
                });
            }
        }
        if let Some(start) = self.player.start {
            if !self.grid().contains(start) {
                return Err(ConfigError::StartOutOfBounds(start));
            }
        }
        if self.player.name.is_empty() {
            // A zero name length terminates the save stream, so empty names
            // are rejected at the source.
            return Err(ConfigError::EmptyPlayerName);
        }
        Ok(())
    }
}
