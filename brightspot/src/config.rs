// THEORY:
// The configuration mirrors the four sections an operator actually tunes:
// detection, tracking, overlay and capture. Every section carries
// `#[serde(default)]`, so a config file only needs to name the values it
// changes. Validation is separate from parsing: a `Config` built in code goes
// through exactly the same checks as one loaded from disk, and every check runs
// once at construction so the per-frame path never has to fail.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub type Rgb = [u8; 3];

/// Parameters of the per-frame detection pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Intensity at or above which a pixel counts as bright (0-255).
    pub threshold: u8,
    /// Smallest polygon area a region may have to be kept.
    pub min_area: f64,
    /// Largest polygon area a region may have to be kept.
    pub max_area: f64,
    /// Upper bound on the number of subjects reported per frame.
    pub max_subjects: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            threshold: 150,
            min_area: 10.0,
            max_area: 100_000_000.0,
            max_subjects: 30,
        }
    }
}

/// Reserved for temporal tracking. Nothing in the engine reads these values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub max_subjects: usize,
    pub smoothing: f64,
    pub search_radius: f64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            max_subjects: 30,
            smoothing: 0.7,
            search_radius: 50.0,
        }
    }
}

/// Settings shared by both overlay renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Initial enabled flag for both renderers.
    pub enabled: bool,
    /// Ring radius in pixels for the simple overlay.
    pub ring_size: u32,
    /// Palette cycled by rank index. RGB order.
    pub colors: Vec<Rgb>,
    /// Seed for the glitch renderer's generator. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ring_size: 10,
            colors: vec![[0, 255, 0], [0, 0, 255], [255, 0, 0]],
            seed: None,
        }
    }
}

/// Camera settings consumed by the capture loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub device: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device: 0,
            width: 640,
            height: 480,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub detection: DetectionConfig,
    pub tracking: TrackingConfig,
    pub overlay: OverlayConfig,
    pub capture: CaptureConfig,
}

impl DetectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_area.is_nan() || self.min_area < 0.0 {
            return Err(ConfigError::NegativeMinArea(self.min_area));
        }
        if self.max_area.is_nan() || self.max_area < self.min_area {
            return Err(ConfigError::InvertedAreaBounds {
                min: self.min_area,
                max: self.max_area,
            });
        }
        Ok(())
    }
}

impl OverlayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }
}

impl CaptureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Config {
    /// Parses a JSON document. Missing fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.detection.validate()?;
        self.overlay.validate()?;
        self.capture.validate()
    }
}
