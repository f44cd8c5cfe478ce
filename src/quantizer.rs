use crate::{bucket::ColorBucket, resample::PixelSample};
use std::collections::BTreeMap;

/// Buckets keyed by quantized color. Ordered by key so iteration never depends on hashing.
pub(crate) type Buckets = BTreeMap<(u8, u8, u8), ColorBucket>;

/// Collapses near-identical shades into one key by truncating every channel to a multiple of `step`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColorQuantizer {
    step: u8,
}

impl ColorQuantizer {
    /// `step` must be at least 1. A step of 1 counts exact colors.
    pub fn new(step: u8) -> Self {
        debug_assert!(step >= 1);
        Self { step }
    }

    pub fn key(&self, (r, g, b): (u8, u8, u8)) -> (u8, u8, u8) {
        (self.truncate(r), self.truncate(g), self.truncate(b))
    }

    /// Builds the histogram of kept pixels. Scores are left at zero for the scorer to fill in.
    pub fn quantize(&self, pixels: &[PixelSample]) -> Buckets {
        let mut buckets = Buckets::new();

        for pixel in pixels {
            let key = self.key(pixel.rgb());
            buckets.entry(key).or_insert_with(|| ColorBucket::new(key)).add_pixel();
        }

        buckets
    }

    fn truncate(&self, channel: u8) -> u8 {
        channel / self.step * self.step
    }
}
