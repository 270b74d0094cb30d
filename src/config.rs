use crate::booking::DEFAULT_SLOT_MINUTES;
use crate::store::DEFAULT_TIMEZONE;
use anyhow::{Context, Result};
use chrono::Weekday;
use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub contacts: ContactsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_week_start")]
    pub week_starts_on: Weekday,
    #[serde(default = "default_duration")]
    pub default_duration_minutes: i64,
}

fn default_week_start() -> Weekday {
    Weekday::Sun
}

fn default_duration() -> i64 {
    DEFAULT_SLOT_MINUTES
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self { week_starts_on: default_week_start(), default_duration_minutes: default_duration() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactsConfig {
    #[serde(default = "default_timezone")]
    pub default_timezone: String,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self { default_timezone: default_timezone() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Overrides the platform data directory for the state file.
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Load from the platform config directory, writing defaults on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        // If config doesn't exist, create default
        if !config_path.exists() {
            info!("No config at {}, writing defaults", config_path.display());
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(config_path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        debug!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content).context("Failed to write config file")?;
        Ok(())
    }
}

fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "positify", "positify")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.calendar.week_starts_on, Weekday::Sun);
        assert_eq!(config.calendar.default_duration_minutes, 30);
        assert_eq!(config.contacts.default_timezone, "UTC");
        assert_eq!(config.storage.data_dir, None);
    }

    #[test]
    fn test_config_save_load() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        // First load writes the defaults
        let created = Config::load_from(&config_path)?;
        assert!(config_path.exists());

        let mut config = created.clone();
        config.calendar.week_starts_on = Weekday::Mon;
        config.calendar.default_duration_minutes = 45;
        config.save_to(&config_path)?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_partial_config_uses_defaults() -> Result<()> {
        let config: Config = toml::from_str("[calendar]\nweek_starts_on = \"Monday\"\n")?;
        assert_eq!(config.calendar.week_starts_on, Weekday::Mon);
        assert_eq!(config.calendar.default_duration_minutes, 30);
        assert_eq!(config.contacts.default_timezone, "UTC");
        Ok(())
    }
}
