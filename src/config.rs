//! Engine configuration
//!
//! Thresholds and pass counts for merging, plus intake and clustering
//! settings, stored in TOML. Every field has a default so a partial file
//! (or none at all) is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{OcrLinesError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub merge: MergeConfig,
    pub normalize: NormalizeConfig,
    pub cluster: ClusterConfig,
}

/// How many horizontal rounds Stage A runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RoundStrategy {
    /// Exactly `rounds` passes, whether or not they still merge anything.
    Fixed { rounds: usize },
    /// Repeat until one round in each scan direction merges nothing, at most
    /// `max_rounds` times.
    UntilStable { max_rounds: usize },
}

impl RoundStrategy {
    pub fn max_rounds(&self) -> usize {
        match *self {
            RoundStrategy::Fixed { rounds } => rounds,
            RoundStrategy::UntilStable { max_rounds } => max_rounds,
        }
    }

    pub fn stops_when_stable(&self) -> bool {
        matches!(self, RoundStrategy::UntilStable { .. })
    }
}

impl Default for RoundStrategy {
    fn default() -> Self {
        RoundStrategy::Fixed { rounds: 4 }
    }
}

/// Classifier thresholds (multiples of font size) and engine pass control.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MergeConfig {
    /// Baseline drift allowed between basis BR and candidate BL, times basis font size.
    pub baseline_tolerance: f32,
    /// Horizontal gap between basis BR and candidate BL, times the smaller font size.
    pub horizontal_gap: f32,
    /// Largest allowed ratio between the two font sizes for a horizontal merge.
    pub max_font_ratio: f32,
    pub center_dx: f32,
    /// Centroid y distance, times the mean vertical extent.
    pub center_dy: f32,
    pub left_dx: f32,
    pub left_gap: f32,
    pub right_dx: f32,
    pub right_gap: f32,
    /// Stage A drops fragments with this many characters or fewer.
    pub noise_max_chars: usize,
    pub horizontal_rounds: RoundStrategy,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            baseline_tolerance: 0.2,
            horizontal_gap: 0.9,
            max_font_ratio: 1.5,
            center_dx: 2.0,
            center_dy: 1.3,
            left_dx: 2.5,
            left_gap: 1.0,
            right_dx: 0.5,
            right_gap: 1.0,
            noise_max_chars: 1,
            horizontal_rounds: RoundStrategy::default(),
        }
    }
}

/// Intake settings for raw OCR annotations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Drop the first annotation after sorting (the whole-image box).
    pub drop_first: bool,
    /// Compose text to NFC before merging.
    pub nfc: bool,
    pub trim: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            drop_first: true,
            nfc: false,
            trim: false,
        }
    }
}

/// DBSCAN parameters for grouping merged lines into blocks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClusterConfig {
    pub eps: f32,
    pub min_samples: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            eps: 15.0,
            min_samples: 1,
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| OcrLinesError::io(path, e))?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|e| OcrLinesError::io(path, e))?;
    Ok(())
}
