//! Configuration Management

use crate::pipeline::classifier::DEFAULT_PINCH_RATIO;
use crate::pipeline::descriptor::MotionDescriptorBuilder;
use crate::pipeline::velocity::{
    DEFAULT_GAP_THRESHOLD_SECS, DEFAULT_WINDOW, MAX_WINDOW, MIN_WINDOW,
};
use crate::recording::session::{SequenceRecorder, StartPolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Classifier calibration
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Velocity estimation settings
    #[serde(default)]
    pub velocity: VelocityConfig,
    /// Recording session settings
    #[serde(default)]
    pub recording: RecordingConfig,
}

/// Classifier calibration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Pinch contact threshold: thumb-tip-to-index-tip distance as a
    /// fraction of the wrist-to-middle-MCP reference distance
    pub pinch_ratio: f64,
}

/// Velocity estimation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VelocityConfig {
    /// Smoothing window (buffered samples, 2-5)
    pub window: usize,
    /// Tracking-gap threshold in seconds
    pub gap_threshold_secs: f64,
}

/// Recording session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Safety cap forcing an automatic stop (0 = uncapped)
    pub max_frames: usize,
    /// Policy for `start` while already recording
    pub start_policy: StartPolicy,
    /// Directory persisted sequences are written to
    pub output_dir: PathBuf,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            pinch_ratio: DEFAULT_PINCH_RATIO,
        }
    }
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            gap_threshold_secs: DEFAULT_GAP_THRESHOLD_SECS,
        }
    }
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            max_frames: 0,
            start_policy: StartPolicy::default(),
            output_dir: PathBuf::from("motion_data"),
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.classifier.pinch_ratio <= 0.0 || self.classifier.pinch_ratio > 2.0 {
            return Err(crate::Error::Config(format!(
                "classifier.pinch_ratio must be in (0, 2], got {}",
                self.classifier.pinch_ratio
            )));
        }
        if !(MIN_WINDOW..=MAX_WINDOW).contains(&self.velocity.window) {
            return Err(crate::Error::Config(format!(
                "velocity.window must be in [{}, {}], got {}",
                MIN_WINDOW, MAX_WINDOW, self.velocity.window
            )));
        }
        if self.velocity.gap_threshold_secs <= 0.0 {
            return Err(crate::Error::Config(format!(
                "velocity.gap_threshold_secs must be > 0, got {}",
                self.velocity.gap_threshold_secs
            )));
        }
        if self.recording.output_dir.as_os_str().is_empty() {
            return Err(crate::Error::Config(
                "recording.output_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Build a descriptor builder calibrated from this config
    pub fn descriptor_builder(&self) -> MotionDescriptorBuilder {
        MotionDescriptorBuilder::with_settings(
            self.classifier.pinch_ratio,
            self.velocity.window,
            self.velocity.gap_threshold_secs,
        )
    }

    /// Build a sequence recorder configured from this config
    pub fn sequence_recorder(&self) -> SequenceRecorder {
        SequenceRecorder::new(self.recording.start_policy, self.recording.max_frames)
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".motion_descriptor").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
