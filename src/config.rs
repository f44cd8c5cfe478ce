use crate::error::{ExtractionError, Result};
use image::imageops::FilterType;

pub const DEFAULT_ALPHA_MIN: u8 = 200;
pub const DEFAULT_RELAXED_ALPHA_MIN: u8 = 26;
pub const DEFAULT_WHITE_THRESHOLD: u8 = 245;
pub const DEFAULT_GREY_TOLERANCE: u8 = 8;
pub const DEFAULT_SATURATION_MIN: f32 = 0.25;
pub const DEFAULT_VALUE_MIN: f32 = 0.20;
pub const DEFAULT_QUANT_STEP: u8 = 8;
pub const DEFAULT_MARGIN_FRACTION: f32 = 0.15;
pub const DEFAULT_GRID_SIZE: u32 = 64;

/// How each color bucket accumulates its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScoringMode {
    /// Every kept pixel adds 1. Picks the most common surviving color.
    Frequency,
    /// Every kept pixel adds `saturation * (0.6 + 0.4 * value)`, favoring vivid accents over large dull areas.
    #[default]
    SaturationWeighted,
}

/// Kernel used when shrinking the cropped logo down to the sampling grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Every tunable threshold of one extraction call.
///
/// Start from [`ExtractionConfig::default`] and override fields with the builder methods:
///
/// ```
/// use logo_color::{ExtractionConfig, ScoringMode};
///
/// let config = ExtractionConfig::default()
///     .quant_step(16)
///     .scoring_mode(ScoringMode::Frequency);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExtractionConfig {
    /// Minimum alpha for a pixel to survive the strict pass.
    pub alpha_min: u8,
    /// Minimum alpha for a pixel to survive the relaxed pass.
    pub relaxed_alpha_min: u8,
    /// A pixel whose every channel is at least this value counts as background white.
    pub white_threshold: u8,
    /// A pixel whose channel spread is at most this value counts as grey. 0 disables the check.
    pub grey_tolerance: u8,
    /// Minimum HSV saturation, in `[0, 1]`.
    pub saturation_min: f32,
    /// Minimum HSV value, in `[0, 1]`.
    pub value_min: f32,
    /// Channel truncation step used to merge near-identical shades.
    pub quant_step: u8,
    /// Fraction of the smaller bounding-box side trimmed from every edge, in `[0, 0.5)`.
    pub margin_fraction: f32,
    /// Side length of the square sampling grid.
    pub grid_size: u32,
    pub scoring_mode: ScoringMode,
    pub resample_filter: ResampleFilter,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            alpha_min: DEFAULT_ALPHA_MIN,
            relaxed_alpha_min: DEFAULT_RELAXED_ALPHA_MIN,
            white_threshold: DEFAULT_WHITE_THRESHOLD,
            grey_tolerance: DEFAULT_GREY_TOLERANCE,
            saturation_min: DEFAULT_SATURATION_MIN,
            value_min: DEFAULT_VALUE_MIN,
            quant_step: DEFAULT_QUANT_STEP,
            margin_fraction: DEFAULT_MARGIN_FRACTION,
            grid_size: DEFAULT_GRID_SIZE,
            scoring_mode: ScoringMode::default(),
            resample_filter: ResampleFilter::default(),
        }
    }
}

impl ExtractionConfig {
    pub fn alpha_min(self, alpha_min: u8) -> Self {
        Self { alpha_min, ..self }
    }

    pub fn relaxed_alpha_min(self, relaxed_alpha_min: u8) -> Self {
        Self {
            relaxed_alpha_min,
            ..self
        }
    }

    pub fn white_threshold(self, white_threshold: u8) -> Self {
        Self {
            white_threshold,
            ..self
        }
    }

    pub fn grey_tolerance(self, grey_tolerance: u8) -> Self {
        Self { grey_tolerance, ..self }
    }

    pub fn saturation_min(self, saturation_min: f32) -> Self {
        Self { saturation_min, ..self }
    }

    pub fn value_min(self, value_min: f32) -> Self {
        Self { value_min, ..self }
    }

    pub fn quant_step(self, quant_step: u8) -> Self {
        Self { quant_step, ..self }
    }

    pub fn margin_fraction(self, margin_fraction: f32) -> Self {
        Self {
            margin_fraction,
            ..self
        }
    }

    pub fn grid_size(self, grid_size: u32) -> Self {
        Self { grid_size, ..self }
    }

    pub fn scoring_mode(self, scoring_mode: ScoringMode) -> Self {
        Self { scoring_mode, ..self }
    }

    pub fn resample_filter(self, resample_filter: ResampleFilter) -> Self {
        Self {
            resample_filter,
            ..self
        }
    }

    /// Reject configurations that cannot describe a meaningful extraction.
    pub fn validate(&self) -> Result<()> {
        if !is_unit_interval(self.saturation_min) {
            return Err(ExtractionError::invalid_config("saturation_min", self.saturation_min));
        }

        if !is_unit_interval(self.value_min) {
            return Err(ExtractionError::invalid_config("value_min", self.value_min));
        }

        if self.quant_step == 0 {
            return Err(ExtractionError::invalid_config("quant_step", self.quant_step));
        }

        if !(self.margin_fraction.is_finite() && (0.0..0.5).contains(&self.margin_fraction)) {
            return Err(ExtractionError::invalid_config("margin_fraction", self.margin_fraction));
        }

        if self.grid_size == 0 {
            return Err(ExtractionError::invalid_config("grid_size", self.grid_size));
        }

        if self.relaxed_alpha_min > self.alpha_min {
            return Err(ExtractionError::invalid_config(
                "relaxed_alpha_min",
                format!("{} (above alpha_min {})", self.relaxed_alpha_min, self.alpha_min),
            ));
        }

        Ok(())
    }
}

fn is_unit_interval(v: f32) -> bool {
    v.is_finite() && (0.0..=1.0).contains(&v)
}
