// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A library to extract a team's primary brand color from its logo.
//!
//! Extraction is a fixed pipeline over an RGBA pixel grid:
//!
//! 1. crop to the non-transparent content, minus a margin that removes outer rings and frames;
//! 2. resample the crop to a small square grid;
//! 3. keep only content pixels, first with a strict filter and, if that keeps nothing, with a relaxed one;
//! 4. bucket the kept pixels by quantized color;
//! 5. score every bucket by frequency or by saturation;
//! 6. pick the best bucket and format it as `#RRGGBB`.
//!
//! ```
//! use logo_color::{image::{Rgba, RgbaImage}, ExtractionConfig};
//!
//! let logo = RgbaImage::from_pixel(32, 32, Rgba([220, 20, 60, 255]));
//! let result = logo_color::extract(&logo, &ExtractionConfig::default())?;
//!
//! assert_eq!(result.hex(), "#D81038");
//! assert!(!result.fallback_used());
//! # Ok::<(), logo_color::ExtractionError>(())
//! ```
//!
//! Extraction holds no state between calls, so independent logos can be processed in parallel with a shared config.

mod bucket;
mod classifier;
mod config;
mod crop;
mod error;
mod filter;
mod quantizer;
mod resample;
mod scorer;
mod select;

#[cfg(feature = "cli")]
pub mod teams;

pub use crate::{
    bucket::{is_valid_hex, rgb_to_hex},
    config::{ExtractionConfig, ResampleFilter, ScoringMode},
    error::{ExtractionError, Result},
    resample::PixelSample,
};
pub use image;

use classifier::{Classification, Pass, PixelClassifier};
use crop::ContentCropper;
use image::RgbaImage;
use palette::IntoColor;
use quantizer::ColorQuantizer;
use resample::Resampler;
use scorer::ColorScorer;
use std::path::Path;

/// The color chosen for one logo.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractionResult {
    hex: String,
    rgb: (u8, u8, u8),
    fallback_used: bool,
    pixels_considered: u64,
}

impl ExtractionResult {
    /// The chosen color as `#RRGGBB`, uppercase.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// The chosen quantized color.
    pub fn rgb(&self) -> (u8, u8, u8) {
        self.rgb
    }

    /// Whether the strict filter kept nothing and the color came from the relaxed pass.
    pub fn fallback_used(&self) -> bool {
        self.fallback_used
    }

    /// How many grid pixels survived classification.
    pub fn pixels_considered(&self) -> u64 {
        self.pixels_considered
    }

    /// Consumes the result, returning the hex string.
    pub fn into_hex(self) -> String {
        self.hex
    }
}

/// Extract the primary color of a decoded logo.
///
/// # Errors
///
/// - [`ExtractionError::InvalidConfig`] if `config` fails [`ExtractionConfig::validate`]; nothing is processed.
/// - [`ExtractionError::NoUsableContent`] if neither classification pass keeps a single pixel.
pub fn extract(image: &RgbaImage, config: &ExtractionConfig) -> Result<ExtractionResult> {
    config.validate()?;

    let region = ContentCropper::new(config.margin_fraction).crop(image);
    tracing::debug!(?region, width = image.width(), height = image.height(), "content region");

    let samples = Resampler::new(config.grid_size, config.resample_filter).samples(image, region);

    let (pixels, pass) = match PixelClassifier::new(config).classify(&samples) {
        Classification::Success { pixels, pass } => (pixels, pass),
        Classification::Fail => return Err(ExtractionError::NoUsableContent),
    };

    let quantizer = ColorQuantizer::new(config.quant_step);
    let mut buckets = quantizer.quantize(&pixels);
    ColorScorer::new(config.scoring_mode).score(&quantizer, &pixels, &mut buckets);

    let winner = select::select(&buckets).ok_or(ExtractionError::NoUsableContent)?;
    tracing::debug!(
        ?pass,
        kept = pixels.len(),
        buckets = buckets.len(),
        winner = %winner.hex(),
        count = winner.count(),
        score = winner.score(),
        "selected color"
    );

    Ok(ExtractionResult {
        hex: winner.hex(),
        rgb: winner.key(),
        fallback_used: pass == Pass::Relaxed,
        pixels_considered: pixels.len() as u64,
    })
}

/// Decode image bytes into an RGBA grid. Sources without alpha come out fully opaque.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage> {
    image::load_from_memory(bytes)
        .map(|image| image.to_rgba8())
        .map_err(|e| ExtractionError::decode("unsupported or corrupt image data", e))
}

/// Read and decode a logo file.
pub fn open(path: &Path) -> Result<RgbaImage> {
    let bytes =
        std::fs::read(path).map_err(|e| ExtractionError::decode(format!("cannot read {}", path.display()), e))?;
    decode(&bytes)
}

/// [`decode`] followed by [`extract`].
pub fn extract_from_bytes(bytes: &[u8], config: &ExtractionConfig) -> Result<ExtractionResult> {
    config.validate()?;
    extract(&decode(bytes)?, config)
}

fn rgb_to_hsv(rgb: (u8, u8, u8)) -> (f32, f32, f32) {
    let raw = palette::Srgb::from_components(rgb);
    let raw_float: palette::Srgb<f32> = raw.into_format();
    let hsv: palette::Hsv = raw_float.into_color();
    let (h, s, v) = hsv.into_components();

    (h.into_positive_degrees(), s, v)
}
