//! # Configuration Management Module
//!
//! Castle Crawler reads a small TOML file that shapes the generated castle and
//! the logging setup. Every field has a default, so a missing section (or a
//! missing file, when playing) still yields a playable game.
//!
//! ## Configuration Structure
//!
//! - [`WorldConfig`] - Grid bounds, room density and an optional fixed seed
//! - [`LoggingConfig`] - Log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use castle_crawler::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Write a starter file, then read it back
//!     Config::create_default("crawler.toml").await?;
//!     let config = Config::load("crawler.toml").await?;
//!
//!     println!("Grid: {}..={}", config.world.grid_min, config.world.grid_max);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [world]
//! grid_min = -5
//! grid_max = 5
//! room_probability = 0.7
//! # seed = 42
//!
//! [logging]
//! level = "info"
//! # file = "crawler.log"
//! ```
//!
//! A `--seed` given on the command line wins over `world.seed`. The grid may
//! span at most [`MAX_GRID_SPAN`] + 1 cells per side.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Largest allowed `grid_max - grid_min`.
pub const MAX_GRID_SPAN: i64 = 100;

/// Shape of the generated castle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Lowest coordinate on both axes. Must be <= 0 so the entry hall fits.
    #[serde(default = "default_grid_min")]
    pub grid_min: i32,
    /// Highest coordinate on both axes. Must be >= 1 so the throne room fits.
    #[serde(default = "default_grid_max")]
    pub grid_max: i32,
    /// Chance that an ordinary cell holds a room.
    #[serde(default = "default_room_probability")]
    pub room_probability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_grid_min() -> i32 {
    -5
}

fn default_grid_max() -> i32 {
    5
}

fn default_room_probability() -> f64 {
    0.7
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            grid_min: default_grid_min(),
            grid_max: default_grid_max(),
            room_probability: default_room_probability(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but a file that does not exist yields `None`
    /// so the caller can fall back to defaults.
    pub async fn load_optional(path: &str) -> Result<Option<Self>> {
        match fs::metadata(path).await {
            Ok(_) => Config::load(path).await.map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow!("Failed to stat config file {}: {}", path, e)),
        }
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Reject worlds the generator cannot build.
    pub fn validate(&self) -> Result<()> {
        let w = &self.world;
        if w.grid_min > 0 {
            return Err(anyhow!("world.grid_min must be <= 0 (got {})", w.grid_min));
        }
        if w.grid_max < 1 {
            return Err(anyhow!("world.grid_max must be >= 1 (got {})", w.grid_max));
        }
        let span = i64::from(w.grid_max) - i64::from(w.grid_min);
        if span > MAX_GRID_SPAN {
            return Err(anyhow!(
                "world grid spans {} cells per side; at most {} allowed",
                span + 1,
                MAX_GRID_SPAN + 1
            ));
        }
        if !(0.0..=1.0).contains(&w.room_probability) {
            return Err(anyhow!(
                "world.room_probability must be between 0 and 1 (got {})",
                w.room_probability
            ));
        }
        if log_level_filter(&self.logging.level).is_none() {
            return Err(anyhow!("Unknown logging.level '{}'", self.logging.level));
        }
        Ok(())
    }
}

/// Map a config level name onto a `log` filter.
pub fn log_level_filter(level: &str) -> Option<log::LevelFilter> {
    match level.to_lowercase().as_str() {
        "off" => Some(log::LevelFilter::Off),
        "error" => Some(log::LevelFilter::Error),
        "warn" => Some(log::LevelFilter::Warn),
        "info" => Some(log::LevelFilter::Info),
        "debug" => Some(log::LevelFilter::Debug),
        "trace" => Some(log::LevelFilter::Trace),
        _ => None,
    }
}
