//! Per-user configuration
//!
//! Window and estimator defaults live in a TOML file. Values are
//! validated on every load and save: a zero budget or a non-positive
//! ratio would make every prompt un-fittable, so such a file is
//! rejected before it can reach a window.

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::context::{DEFAULT_MAX_TOKENS, TOKENS_PER_CHAR};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub estimator: EstimatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Token budget for the rendered prompt
    pub max_tokens: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Tokens estimated per character of prompt text
    pub tokens_per_char: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            tokens_per_char: TOKENS_PER_CHAR,
        }
    }
}

impl Config {
    /// Load the per-user config, writing defaults on first run
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Config::default();
            config.write_to(&path)?;
            Ok(config)
        }
    }

    /// Load and validate a config file at an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("{} is not a valid chatsnip config", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Rejecting {}", path.display()))?;

        Ok(config)
    }

    /// Save this config to the per-user location
    pub fn save(&self) -> Result<()> {
        self.write_to(&Self::config_path()?)
    }

    /// Validate and write this config to an explicit path
    pub fn write_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }

        let rendered = toml::to_string_pretty(self).context("Config did not serialize")?;

        fs::write(path, rendered)
            .with_context(|| format!("Could not write {}", path.display()))?;

        Ok(())
    }

    /// Reject values no window could ever satisfy.
    ///
    /// A zero budget fails every non-empty prompt, and a zero or
    /// negative ratio turns the estimate into a constant, so neither is
    /// allowed to leave the config layer.
    pub fn validate(&self) -> Result<()> {
        if self.window.max_tokens == 0 {
            bail!("window.max_tokens must be at least 1");
        }

        let ratio = self.estimator.tokens_per_char;
        if !(ratio > 0.0 && ratio.is_finite()) {
            bail!(
                "estimator.tokens_per_char must be a positive number, got {}",
                ratio
            );
        }

        Ok(())
    }

    /// Path of the per-user config file
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("No home directory for config"))?;

        Ok(home.join(".chatsnip").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.window.max_tokens, 4096);
        assert_eq!(config.estimator.tokens_per_char, 0.4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("[window]\nmax_tokens = 2048\n").unwrap();

        assert_eq!(config.window.max_tokens, 2048);
        assert_eq!(config.estimator.tokens_per_char, 0.4);
    }

    #[test]
    fn test_zero_budget_rejected() {
        let mut config = Config::default();
        config.window.max_tokens = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_ratio_rejected() {
        for ratio in [0.0, -0.4, f64::NAN, f64::INFINITY] {
            let mut config = Config::default();
            config.estimator.tokens_per_char = ratio;

            assert!(
                config.validate().is_err(),
                "ratio {} should be rejected",
                ratio
            );
        }
    }

    #[test]
    fn test_file_round_trip_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.window.max_tokens = 2048;
        config.write_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.window.max_tokens, 2048);
        assert_eq!(loaded.estimator.tokens_per_char, 0.4);
    }

    #[test]
    fn test_invalid_file_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[window]\nmax_tokens = 0\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_write_refuses_unfittable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.estimator.tokens_per_char = -1.0;

        assert!(config.write_to(&path).is_err());
        assert!(!path.exists(), "invalid config must not reach disk");
    }
}
