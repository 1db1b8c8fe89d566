//! Tunables for guide detection and presentation.

use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default snap distance in pixels.
pub const DEFAULT_THRESHOLD: f64 = 4.0;

/// Default grid cell size in pixels.
pub const DEFAULT_GRID_SIZE: f64 = 10.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl GuideColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Alpha as a fraction in `[0, 1]`.
    pub fn alpha(&self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl From<Color> for GuideColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<GuideColor> for Color {
    fn from(color: GuideColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Guide detection and presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Max distance in pixels at which coordinates count as aligned.
    pub threshold: f64,
    pub guide_color: GuideColor,
    /// Alignment line thickness in pixels.
    pub guide_thickness: f64,
    pub dimension_color: GuideColor,
    /// Equal-dimension marker thickness in pixels.
    pub dimension_thickness: f64,
    /// Stacking order of guide primitives in the host.
    pub z_index: i32,
    pub guide_class: String,
    pub dimension_class: String,
    /// Grid cell size used when snapping positions.
    pub grid_size: f64,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            guide_color: GuideColor::new(0xE5, 0x4D, 0x2E, 255),
            guide_thickness: 1.0,
            dimension_color: GuideColor::new(139, 255, 131, 179),
            dimension_thickness: 3.0,
            z_index: 10000,
            guide_class: "bloom-ui-canvas-guide-line".to_string(),
            dimension_class: "bloom-ui-canvas-equal-dimension-indicator".to_string(),
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

impl GuideConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set the snap threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the grid size.
    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Check values that would make guides misbehave.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::Invalid {
                field: "threshold",
                reason: format!("must be a non-negative number, got {}", self.threshold),
            });
        }
        for (field, value) in [
            ("guide_thickness", self.guide_thickness),
            ("dimension_thickness", self.dimension_thickness),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {}", value),
                });
            }
        }
        if self.grid_size.is_nan() {
            return Err(ConfigError::Invalid {
                field: "grid_size",
                reason: "must be a number".to_string(),
            });
        }
        Ok(())
    }
}
