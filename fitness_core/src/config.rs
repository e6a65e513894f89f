//! Configuration file support for fitrack.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fitrack/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,

    #[serde(default)]
    pub abs_limit: AbsLimitConfig,
}

/// Rest timer durations, in seconds
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Countdown armed when a set is checked off
    #[serde(default = "default_set_rest_seconds")]
    pub set_rest_seconds: u32,

    /// Countdown armed by the explicit "rest" action
    #[serde(default = "default_long_rest_seconds")]
    pub long_rest_seconds: u32,

    /// How long the completion alert stays up before the timer closes
    #[serde(default = "default_alert_grace_seconds")]
    pub alert_grace_seconds: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            set_rest_seconds: default_set_rest_seconds(),
            long_rest_seconds: default_long_rest_seconds(),
            alert_grace_seconds: default_alert_grace_seconds(),
        }
    }
}

/// Abs-limit policy
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AbsLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_abs_cap")]
    pub cap: usize,

    /// Explicit member names; empty means "use the catalog's abs tags"
    #[serde(default)]
    pub members: Vec<String>,
}

impl Default for AbsLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cap: default_abs_cap(),
            members: Vec::new(),
        }
    }
}

// Default value functions
fn default_set_rest_seconds() -> u32 {
    30
}

fn default_long_rest_seconds() -> u32 {
    90
}

fn default_alert_grace_seconds() -> u32 {
    3
}

fn default_abs_cap() -> usize {
    3
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            config_path => {
                tracing::info!(
                    "No config file found at {:?}, using defaults",
                    config_path
                );
                Ok(Self::default())
            }
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
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("fitrack").join("config.toml"))
    }

    /// Reject values the session cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.timer.set_rest_seconds == 0 {
            return Err(Error::Config("timer.set_rest_seconds must be > 0".into()));
        }
        if self.timer.long_rest_seconds == 0 {
            return Err(Error::Config("timer.long_rest_seconds must be > 0".into()));
        }
        if self.abs_limit.enabled && self.abs_limit.cap == 0 {
            return Err(Error::Config(
                "abs_limit.cap must be >= 1 (set enabled = false to turn the rule off)".into(),
            ));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
