//! Configuration management for the eye screening pipeline

use crate::constants::{
    DEFAULT_BLINK_CLOSURE_THRESHOLD, DEFAULT_BLINK_MIN_HOLD_FRAMES, DEFAULT_FRAME_STRIDE,
    DEFAULT_MAX_SAMPLED_FRAMES, DEFAULT_VERTICAL_PTP_THRESHOLD,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Analysis configuration
///
/// All thresholds are screening defaults with no clinical derivation;
/// validation happens here at the boundary, not inside the analysis core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Frame sampling configuration
    pub sampling: SamplingConfig,

    /// Blink detection configuration
    pub blink: BlinkConfig,

    /// Screening rule configuration
    pub screening: ScreeningConfig,
}

/// Frame sampling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Process every Nth raw frame
    pub frame_stride: usize,

    /// Hard cap on sampled frames per run
    pub max_sampled_frames: usize,
}

/// Blink detection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    /// Openness ratio below which the eye counts as closed
    pub closure_threshold: f64,

    /// Minimum consecutive closed frames for one blink
    pub min_hold_frames: usize,
}

/// Screening rule parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningConfig {
    /// Vertical peak-to-peak value below which the run is flagged
    pub vertical_ptp_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingConfig::default(),
            blink: BlinkConfig::default(),
            screening: ScreeningConfig::default(),
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            frame_stride: DEFAULT_FRAME_STRIDE,
            max_sampled_frames: DEFAULT_MAX_SAMPLED_FRAMES,
        }
    }
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            closure_threshold: DEFAULT_BLINK_CLOSURE_THRESHOLD,
            min_hold_frames: DEFAULT_BLINK_MIN_HOLD_FRAMES,
        }
    }
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            vertical_ptp_threshold: DEFAULT_VERTICAL_PTP_THRESHOLD,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.sampling.frame_stride == 0 {
            return Err(Error::ConfigError(
                "Frame stride must be at least 1".to_string(),
            ));
        }
        if self.sampling.max_sampled_frames == 0 {
            return Err(Error::ConfigError(
                "Max sampled frames must be at least 1".to_string(),
            ));
        }

        if self.blink.closure_threshold <= 0.0 {
            return Err(Error::ConfigError(
                "Blink closure threshold must be greater than 0".to_string(),
            ));
        }
        if self.blink.min_hold_frames == 0 {
            return Err(Error::ConfigError(
                "Blink minimum hold frames must be at least 1".to_string(),
            ));
        }

        if self.screening.vertical_ptp_threshold <= 0.0 {
            return Err(Error::ConfigError(
                "Vertical peak-to-peak threshold must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r"# Eye Screening Configuration

# Frame sampling
sampling:
  frame_stride: 1
  max_sampled_frames: 12000

# Blink detection
blink:
  closure_threshold: 0.18
  min_hold_frames: 2

# Screening rule
screening:
  vertical_ptp_threshold: 0.06
";
