//! TOML-based application configuration.
//!
//! Stores:
//! - Scoring penalty factors
//! - Slot-offer horizon
//! - Webhook notification settings
//! - Admin/master key digests
//!
//! Configuration is stored at `~/.config/examplan/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::penalty::PenaltyFactors;
use crate::storage::data_dir;

/// Scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_factor")]
    pub consecutive: f64,
    #[serde(default = "default_factor")]
    pub day_imbalance: f64,
    #[serde(default = "default_factor")]
    pub week_imbalance: f64,
    #[serde(default = "default_factor")]
    pub proximity: f64,
}

impl ScoringConfig {
    pub fn factors(&self) -> PenaltyFactors {
        PenaltyFactors {
            consecutive: self.consecutive,
            day_imbalance: self.day_imbalance,
            week_imbalance: self.week_imbalance,
            proximity: self.proximity,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            consecutive: default_factor(),
            day_imbalance: default_factor(),
            week_imbalance: default_factor(),
            proximity: default_factor(),
        }
    }
}

/// Slot-offer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsConfig {
    /// How many days ahead to expand subject moments into concrete offers.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
}

impl Default for SlotsConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
        }
    }
}

/// Webhook notification configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub webhook_url: String,
}

/// Admin key configuration.
///
/// Digests are lowercase SHA-256 hex; the environment variables
/// EXAMPLAN_ADMIN_KEY and EXAMPLAN_MASTER_KEY take precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub admin_key_sha256: Option<String>,
    #[serde(default)]
    pub master_key_sha256: Option<String>,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub slots: SlotsConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

fn default_factor() -> f64 {
    0.5
}

fn default_horizon_days() -> u32 {
    60
}

impl Config {
    fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Load from disk, returning default on error. Never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.scoring.proximity, 0.5);
        assert_eq!(parsed.slots.horizon_days, 60);
        assert!(!parsed.notify.enabled);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("[notify]\nenabled = true\n").unwrap();
        assert!(parsed.notify.enabled);
        assert_eq!(parsed.scoring.consecutive, 0.5);
        assert_eq!(parsed.slots.horizon_days, 60);
        assert!(parsed.auth.admin_key_sha256.is_none());
    }
}
