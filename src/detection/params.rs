use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoinError, Result};
use crate::models::Color;

pub const CANNY_LOW_THRESHOLD: f32 = 30.0;
pub const CANNY_HIGH_THRESHOLD: f32 = 150.0;
pub const DEFAULT_MIN_RADIUS: f32 = 30.0;
pub const DEFAULT_MAX_RADIUS: f32 = 50.0;
pub const DEFAULT_STROKE_WIDTH: u32 = 2;

/// Median filter window is `2 * MEDIAN_RADIUS + 1` pixels wide.
pub const MEDIAN_RADIUS: u32 = 2;
pub const GAUSSIAN_KERNEL_SIZE: u32 = 9;

/// Sigma picked automatically for a square Gaussian kernel of `ksize`.
pub fn auto_sigma(ksize: u32) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Smoothing applied before edge detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DenoiseMethod {
    /// 5x5 median filter.
    #[default]
    Median,
    /// 9x9 Gaussian with automatic sigma.
    Gaussian,
}

impl FromStr for DenoiseMethod {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "median" => Ok(Self::Median),
            "gaussian" => Ok(Self::Gaussian),
            other => Err(CoinError::invalid(format!(
                "unknown denoise method {other:?} (expected median or gaussian)"
            ))),
        }
    }
}

/// Admissible minimum-enclosing-circle radius, in pixels, exclusive on both ends.
///
/// This is the setting most sensitive to resolution: the defaults (30, 50)
/// assume photos resized to the default working width of 255 px with coins
/// filling a fair share of the frame. Closer cameras or wider working images
/// need proportionally larger bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusBounds {
    pub lower: f32,
    pub upper: f32,
}

impl RadiusBounds {
    pub fn new(lower: f32, upper: f32) -> Self {
        Self { lower, upper }
    }

    pub fn admits(&self, radius: f32) -> bool {
        self.lower < radius && radius < self.upper
    }
}

impl Default for RadiusBounds {
    fn default() -> Self {
        Self {
            lower: DEFAULT_MIN_RADIUS,
            upper: DEFAULT_MAX_RADIUS,
        }
    }
}

/// Hysteresis thresholds for the Canny edge detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyThresholds {
    pub low: f32,
    pub high: f32,
}

impl Default for CannyThresholds {
    fn default() -> Self {
        Self {
            low: CANNY_LOW_THRESHOLD,
            high: CANNY_HIGH_THRESHOLD,
        }
    }
}

/// Everything a detection run needs besides the image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionParams {
    pub method: DenoiseMethod,
    pub color: Color,
    pub radius: RadiusBounds,
    pub canny: CannyThresholds,
    pub stroke_width: u32,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            method: DenoiseMethod::default(),
            color: Color::GREEN,
            radius: RadiusBounds::default(),
            canny: CannyThresholds::default(),
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl DetectionParams {
    pub fn with_method(mut self, method: DenoiseMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_radius_bounds(mut self, lower: f32, upper: f32) -> Self {
        self.radius = RadiusBounds::new(lower, upper);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let RadiusBounds { lower, upper } = self.radius;
        if !lower.is_finite() || !upper.is_finite() || lower < 0.0 || lower >= upper {
            return Err(CoinError::invalid(format!(
                "radius bounds must satisfy 0 <= lower < upper, got ({lower}, {upper})"
            )));
        }
        let CannyThresholds { low, high } = self.canny;
        if !low.is_finite() || !high.is_finite() || low < 0.0 || low > high {
            return Err(CoinError::invalid(format!(
                "canny thresholds must satisfy 0 <= low <= high, got ({low}, {high})"
            )));
        }
        if self.stroke_width == 0 {
            return Err(CoinError::invalid("stroke width must be positive"));
        }
        Ok(())
    }

    /// Load params from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&data).map_err(|e| {
            CoinError::invalid(format!("failed to parse config {}: {e}", path.display()))
        })?;
        params.validate()?;
        Ok(params)
    }
}
