//! Run settings
//!
//! Loaded from an optional JSON file; any field left out keeps its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TICK_RATE;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Seed for the world's RNG (turn-around jitter, spell choice)
    pub seed: u64,
    /// Cheat: the player never loses health
    pub invincible: bool,
    /// Fixed tick rate; only 60 Hz is supported
    pub tick_rate: u32,
    /// How many ticks the headless runner simulates
    pub run_ticks: u64,
    /// Report interval for the headless runner (0 disables periodic reports)
    pub log_every: u64,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            invincible: false,
            tick_rate: TICK_RATE,
            run_ticks: 60 * 60,
            log_every: 300,
        }
    }
}

impl SimSettings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: SimSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_rate != TICK_RATE {
            return Err(SettingsError::Invalid(format!(
                "tick_rate must be {TICK_RATE}, got {}",
                self.tick_rate
            )));
        }
        if self.run_ticks == 0 {
            return Err(SettingsError::Invalid("run_ticks must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = SimSettings::from_json(r#"{ "seed": 42, "invincible": true }"#).unwrap();
        assert_eq!(settings.seed, 42);
        assert!(settings.invincible);
        assert_eq!(settings.tick_rate, TICK_RATE);
        assert_eq!(settings.log_every, SimSettings::default().log_every);
    }

    #[test]
    fn test_rejects_other_tick_rates() {
        let err = SimSettings::from_json(r#"{ "tick_rate": 30 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = SimSettings::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SimSettings::load("/definitely/not/here/settings.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let settings = SimSettings {
            seed: 9,
            ..Default::default()
        };
        let parsed = SimSettings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(parsed, settings);
    }
}
