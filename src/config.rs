//! Configuration for padmap tools
//!
//! Loaded from an optional YAML file. Every field has a default, so an empty
//! file (or no file) yields the standard behaviour.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::input::{Thresholds, DEFAULT_DETECTION_THRESHOLD, DEFAULT_PRESS_THRESHOLD};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PadmapConfig {
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    /// Database file; defaults to the per-user location from [`crate::paths`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
}

/// Accessor and estimator thresholds
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ThresholdConfig {
    /// Axis value above which an axis-bound control reads as pressed
    #[serde(default = "default_press")]
    pub press: f32,
    /// Minimum confidence for the origin estimator
    #[serde(default = "default_detection")]
    pub detection: f32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            press: default_press(),
            detection: default_detection(),
        }
    }
}

impl From<ThresholdConfig> for Thresholds {
    fn from(config: ThresholdConfig) -> Self {
        Thresholds {
            press: config.press,
            detection: config.detection,
        }
    }
}

impl PadmapConfig {
    /// Load configuration from file with validation
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_yaml(&contents)
            .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?;

        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty mapping
        let config: PadmapConfig = if contents.trim().is_empty() {
            PadmapConfig::default()
        } else {
            serde_yaml::from_str(contents)?
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self).context("Failed to serialize config to YAML")?;

        fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        validate_unit("thresholds.press", self.thresholds.press)?;
        validate_unit("thresholds.detection", self.thresholds.detection)?;

        if let Some(db) = &self.database {
            if db.as_os_str().is_empty() {
                anyhow::bail!("database path cannot be empty");
            }
        }

        Ok(())
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds.into()
    }
}

fn validate_unit(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        anyhow::bail!("{} must be within 0.0..=1.0 (got {})", name, value);
    }
    Ok(())
}

// Default value functions
fn default_press() -> f32 { DEFAULT_PRESS_THRESHOLD }
fn default_detection() -> f32 { DEFAULT_DETECTION_THRESHOLD }
