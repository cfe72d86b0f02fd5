use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::difficulty::{Difficulty, PerDifficulty};

const APP_DIR_NAME: &str = "snake-arcade";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 30;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Snake length after every reset.
pub const DEFAULT_INITIAL_LENGTH: usize = 3;

/// Base points per food before the difficulty multiplier.
pub const DEFAULT_POINTS_PER_FOOD: u32 = 10;

/// Score interval at which the tick rate ramps up by one.
pub const DEFAULT_SPEED_RAMP_INTERVAL: u32 = 100;

/// Tick rate the speed ramp never exceeds.
pub const DEFAULT_MAX_TICK_RATE: u32 = 25;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Everything a [`crate::game::GameState`] needs to know about the rules.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub grid: GridSize,
    pub initial_length: usize,
    /// Difficulty selected when the game starts.
    pub difficulty: Difficulty,
    /// Base ticks per second for each difficulty.
    pub tick_rates: PerDifficulty<u32>,
    pub multipliers: PerDifficulty<u32>,
    pub points_per_food: u32,
    pub speed_ramp_interval: u32,
    pub max_tick_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            initial_length: DEFAULT_INITIAL_LENGTH,
            difficulty: Difficulty::default(),
            tick_rates: PerDifficulty::from_fn(Difficulty::default_tick_rate),
            multipliers: PerDifficulty::from_fn(Difficulty::default_multiplier),
            points_per_food: DEFAULT_POINTS_PER_FOOD,
            speed_ramp_interval: DEFAULT_SPEED_RAMP_INTERVAL,
            max_tick_rate: DEFAULT_MAX_TICK_RATE,
        }
    }
}

impl GameConfig {
    /// Default rules on a custom grid.
    #[must_use]
    pub fn with_grid(width: u16, height: u16) -> Self {
        Self {
            grid: GridSize { width, height },
            ..Self::default()
        }
    }

    /// Base tick rate for `difficulty`.
    #[must_use]
    pub fn base_tick_rate(&self, difficulty: Difficulty) -> u32 {
        self.tick_rates.get(difficulty)
    }

    /// Points awarded per food at `difficulty`.
    #[must_use]
    pub fn food_points(&self, difficulty: Difficulty) -> u32 {
        self.points_per_food
            .saturating_mul(self.multipliers.get(difficulty))
    }

    /// Checks the invariants the game loop relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridSize { width, height } = self.grid;
        if width == 0 || height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {width}x{height}"
            )));
        }

        if self.initial_length == 0 {
            return Err(ConfigError::Invalid(
                "initial snake length must be at least 1".to_owned(),
            ));
        }

        // The starting snake extends left from the centre column.
        let room = usize::from(width / 2) + 1;
        if self.initial_length > room {
            return Err(ConfigError::Invalid(format!(
                "initial snake length {} does not fit a grid {width} cells wide",
                self.initial_length
            )));
        }

        if self.initial_length >= self.grid.total_cells() {
            return Err(ConfigError::Invalid(format!(
                "grid {width}x{height} leaves no free cell for food"
            )));
        }

        for difficulty in Difficulty::ALL {
            let rate = self.base_tick_rate(difficulty);
            if rate == 0 {
                return Err(ConfigError::Invalid(format!(
                    "tick rate for {difficulty} must be positive"
                )));
            }
            if rate > self.max_tick_rate {
                return Err(ConfigError::Invalid(format!(
                    "tick rate {rate} for {difficulty} exceeds max tick rate {}",
                    self.max_tick_rate
                )));
            }
            if self.multipliers.get(difficulty) == 0 {
                return Err(ConfigError::Invalid(format!(
                    "score multiplier for {difficulty} must be positive"
                )));
            }
        }

        if self.points_per_food == 0 {
            return Err(ConfigError::Invalid(
                "points per food must be positive".to_owned(),
            ));
        }

        if self.speed_ramp_interval == 0 {
            return Err(ConfigError::Invalid(
                "speed ramp interval must be positive".to_owned(),
            ));
        }

        Ok(())
    }

    /// Parses a JSON document; missing fields fall back to defaults.
    pub fn from_json_str(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Loads a JSON config file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw, path)
    }

    /// Resolves the file layer of the configuration.
    ///
    /// An explicit path must exist. Without one, the per-user file is read
    /// when present and built-in defaults are used otherwise.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        match user_config_path() {
            Some(path) if path.is_file() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Applies command-line overrides on top of the file layer.
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(width) = overrides.width {
            self.grid.width = width;
        }
        if let Some(height) = overrides.height {
            self.grid.height = height;
        }
        if let Some(difficulty) = overrides.difficulty {
            self.difficulty = difficulty;
        }
    }
}

/// Values the command line may override.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ConfigOverrides {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub difficulty: Option<Difficulty>,
}

/// Returns the platform-correct per-user config file path.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}
