use crate::{config::ExtractionConfig, resample::PixelSample};

/// Decides whether a sampled pixel belongs to the logo's colored content.
///
/// The same pixel is given with its HSV saturation and value for convenience.
pub(crate) trait Filter {
    fn is_allowed(&self, sample: PixelSample, saturation_value: (f32, f32)) -> bool;
}

/// The first-pass filter: opaque enough, not background white, not grey, colorful and bright enough.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StrictFilter {
    alpha_min: u8,
    white_threshold: u8,
    grey_tolerance: u8,
    saturation_min: f32,
    value_min: f32,
}

impl StrictFilter {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            alpha_min: config.alpha_min,
            white_threshold: config.white_threshold,
            grey_tolerance: config.grey_tolerance,
            saturation_min: config.saturation_min,
            value_min: config.value_min,
        }
    }
}

impl Filter for StrictFilter {
    fn is_allowed(&self, sample: PixelSample, (s, v): (f32, f32)) -> bool {
        sample.a >= self.alpha_min
            && !is_near_white(sample, self.white_threshold)
            && !(self.grey_tolerance > 0 && is_near_grey(sample, self.grey_tolerance))
            && s >= self.saturation_min
            && v >= self.value_min
    }
}

/// The fallback filter: anything that is not mostly transparent.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RelaxedFilter {
    alpha_min: u8,
}

impl RelaxedFilter {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            alpha_min: config.relaxed_alpha_min,
        }
    }
}

impl Filter for RelaxedFilter {
    fn is_allowed(&self, sample: PixelSample, _: (f32, f32)) -> bool {
        sample.a >= self.alpha_min
    }
}

fn is_near_white(sample: PixelSample, threshold: u8) -> bool {
    sample.r.min(sample.g).min(sample.b) >= threshold
}

fn is_near_grey(sample: PixelSample, tolerance: u8) -> bool {
    let max = sample.r.max(sample.g).max(sample.b);
    let min = sample.r.min(sample.g).min(sample.b);
    max - min <= tolerance
}
