//! Game Configuration
//!
//! Every tunable in one serde tree. Missing fields fall back to the
//! defaults, so a config file only needs the values it changes.
//!
//! ```json
//! { "seed": 7, "max_days": 3, "economy": { "waste_penalty_per_item": 10000 } }
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use tracing::{debug, info};

use crate::core::rng::derive_session_seed;
use crate::game::catalog::Catalog;
use crate::game::runner::RunnerConfig;

/// Env var naming a JSON config file.
pub const CONFIG_PATH_ENV: &str = "ZERO_WASTE_CONFIG";

/// Env var overriding the seed. Numbers are used as-is; anything else is
/// hashed into a seed.
pub const SEED_ENV: &str = "ZERO_WASTE_SEED";

/// Default session seed.
pub const DEFAULT_SEED: u64 = 0x2E40_4A57_E000_0001;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

// =============================================================================
// ECONOMY
// =============================================================================

/// Money and scoring rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub dish_base_reward: i64,
    /// Added once per dish already served today, counting the new one
    pub dish_reward_increment: i64,
    pub waste_penalty_per_item: i64,
    pub waste_score_per_item: u32,
    /// Time lost when the runner hits an obstacle
    pub obstacle_penalty_ms: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            dish_base_reward: 20_000,
            dish_reward_increment: 5_000,
            waste_penalty_per_item: 20_000,
            waste_score_per_item: 15,
            obstacle_penalty_ms: 5_000,
        }
    }
}

impl EconomyConfig {
    /// Reward for the `dish_index`-th dish of the day (1-based).
    #[inline]
    pub fn dish_reward(&self, dish_index: u32) -> i64 {
        self.dish_base_reward + i64::from(dish_index) * self.dish_reward_increment
    }

    /// Total reward for the first `count` dishes of a day.
    pub fn earnings_for(&self, count: usize) -> i64 {
        (1..=count as u32).map(|index| self.dish_reward(index)).sum()
    }
}

// =============================================================================
// GAME CONFIG
// =============================================================================

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub seed: u64,
    pub max_days: u32,
    pub day_duration_ms: u32,
    pub clock_tick_ms: u32,
    /// Frame interval for the real-time driver
    pub frame_interval_ms: u32,
    pub starting_money: i64,
    pub economy: EconomyConfig,
    pub runner: RunnerConfig,
    pub catalog: Catalog,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_days: 5,
            day_duration_ms: 60_000,
            clock_tick_ms: 100,
            frame_interval_ms: 16,
            starting_money: 100_000,
            economy: EconomyConfig::default(),
            runner: RunnerConfig::default(),
            catalog: Catalog::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Build from the environment: optional config file, optional seed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load(path)?,
            Err(_) => Self::default(),
        };

        if let Ok(raw) = std::env::var(SEED_ENV) {
            config.seed = parse_seed(&raw);
            debug!(seed = config.seed, "Seed overridden from environment");
        }

        config.validate()?;
        Ok(config)
    }

    /// Same config with a different seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject configs the simulation cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.max_days == 0 {
            return invalid("max_days must be at least 1");
        }
        if self.day_duration_ms == 0 {
            return invalid("day_duration_ms must be positive");
        }
        if self.clock_tick_ms == 0 {
            return invalid("clock_tick_ms must be positive");
        }
        if self.frame_interval_ms == 0 {
            return invalid("frame_interval_ms must be positive");
        }
        if self.catalog.items.is_empty() {
            return invalid("catalog must sell at least one item");
        }
        if self.catalog.challenges.is_empty() {
            return invalid("challenge pool must not be empty");
        }

        let mut recipe_ids = BTreeSet::new();
        for recipe in &self.catalog.recipes {
            if !recipe_ids.insert(recipe.id.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate recipe id: {}", recipe.id)));
            }
            if recipe.required.is_empty() {
                return Err(ConfigError::Invalid(format!("recipe {} has no ingredients", recipe.id)));
            }
            if recipe.cooking_ms == 0 {
                return Err(ConfigError::Invalid(format!("recipe {} has zero cooking time", recipe.id)));
            }
        }

        let runner = &self.runner;
        if runner.max_frame_dt <= 0.0 {
            return invalid("runner.max_frame_dt must be positive");
        }
        if runner.collectible_interval <= 0.0 || runner.obstacle_interval <= 0.0 {
            return invalid("runner spawn intervals must be positive");
        }
        for [min, max] in [runner.collectible_speed_factor, runner.obstacle_speed_factor] {
            if min > max {
                return invalid("runner speed factor range is inverted");
            }
        }
        if runner.ground_offset >= runner.height {
            return invalid("runner ground must lie inside the playfield");
        }

        Ok(())
    }
}

/// Parse a seed string: a u64, or any label hashed into one.
pub fn parse_seed(raw: &str) -> u64 {
    raw.trim()
        .parse::<u64>()
        .unwrap_or_else(|_| derive_session_seed(raw.trim()))
}
