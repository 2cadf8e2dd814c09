//! Configuration file support for LifeOS.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/lifeos/config.toml`.

use crate::streak::StreakConfig;
use crate::{Error, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub habits: HabitsConfig,

    #[serde(default)]
    pub tasks: TasksConfig,
}

/// Snapshot location configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

/// Habit tracking parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HabitsConfig {
    /// First day of a streak week
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,

    /// Weekly target for custom habits that carry no `times_per_week`
    #[serde(default = "default_custom_required")]
    pub custom_default_required: u32,

    /// Completions older than this many days are ignored
    #[serde(default = "default_completion_window_days")]
    pub completion_window_days: u32,
}

impl Default for HabitsConfig {
    fn default() -> Self {
        Self {
            week_start: default_week_start(),
            custom_default_required: default_custom_required(),
            completion_window_days: default_completion_window_days(),
        }
    }
}

impl HabitsConfig {
    pub fn streak_config(&self) -> StreakConfig {
        StreakConfig {
            week_start: self.week_start,
            custom_default_required: self.custom_default_required,
        }
    }
}

/// Task board parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Completed tasks older than this move from the board to the archive
    #[serde(default = "default_archive_after_days")]
    pub archive_after_days: u32,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            archive_after_days: default_archive_after_days(),
        }
    }
}

// Default value functions
fn default_snapshot_path() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("lifeos").join("snapshot.json")
}

fn default_week_start() -> Weekday {
    Weekday::Mon
}

fn default_custom_required() -> u32 {
    1
}

fn default_completion_window_days() -> u32 {
    90
}

fn default_archive_after_days() -> u32 {
    7
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("lifeos").join("config.toml")
    }

    /// Reject values the view computations cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(1..=7).contains(&self.habits.custom_default_required) {
            return Err(Error::Config(format!(
                "habits.custom_default_required must be between 1 and 7, got {}",
                self.habits.custom_default_required
            )));
        }
        if self.habits.completion_window_days == 0 {
            return Err(Error::Config(
                "habits.completion_window_days must be positive".into(),
            ));
        }
        if self.tasks.archive_after_days == 0 {
            return Err(Error::Config(
                "tasks.archive_after_days must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
