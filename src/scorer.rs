use crate::{
    config::ScoringMode,
    quantizer::{Buckets, ColorQuantizer},
    resample::PixelSample,
};

const VALUE_BASE_WEIGHT: f64 = 0.6;
const VALUE_EXTRA_WEIGHT: f64 = 0.4;

/// Accumulates a score into every bucket from the pixels that fell into it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColorScorer {
    mode: ScoringMode,
}

impl ColorScorer {
    pub fn new(mode: ScoringMode) -> Self {
        Self { mode }
    }

    pub fn score(&self, quantizer: &ColorQuantizer, pixels: &[PixelSample], buckets: &mut Buckets) {
        for pixel in pixels {
            if let Some(bucket) = buckets.get_mut(&quantizer.key(pixel.rgb())) {
                bucket.add_score(self.weight(*pixel));
            }
        }
    }

    fn weight(&self, pixel: PixelSample) -> f64 {
        match self.mode {
            ScoringMode::Frequency => 1.0,
            ScoringMode::SaturationWeighted => {
                let (s, v) = pixel.saturation_value();
                s as f64 * (VALUE_BASE_WEIGHT + VALUE_EXTRA_WEIGHT * v as f64)
            }
        }
    }
}
