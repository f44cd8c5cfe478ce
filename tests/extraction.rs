//! End-to-end tests for `extract` on synthetic logos.

use logo_color::{
    extract, extract_from_bytes,
    image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage, Rgba, RgbaImage},
    ExtractionConfig, ExtractionError, ResampleFilter, ScoringMode,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::io::Cursor;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

fn disk(size: u32, radius: f32, color: Rgba<u8>, background: Rgba<u8>) -> RgbaImage {
    let center = size as f32 / 2.0;
    RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        if (dx * dx + dy * dy).sqrt() <= radius {
            color
        } else {
            background
        }
    })
}

fn split_rows(width: u32, height: u32, split: u32, top: Rgba<u8>, bottom: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_fn(width, height, |_, y| if y < split { top } else { bottom })
}

fn exact_grid(size: u32) -> ExtractionConfig {
    ExtractionConfig::default()
        .margin_fraction(0.0)
        .grid_size(size)
        .resample_filter(ResampleFilter::Nearest)
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn solid_color_yields_its_quantized_hex() {
    let (r, g, b) = (38u8, 102u8, 206u8);
    let logo = RgbaImage::from_pixel(40, 30, Rgba([r, g, b, 255]));

    for step in [1u8, 4, 8, 16] {
        for scoring in [ScoringMode::Frequency, ScoringMode::SaturationWeighted] {
            for grid in [1u32, 17, 64] {
                for margin in [0.0f32, 0.15, 0.3] {
                    let config = ExtractionConfig::default()
                        .quant_step(step)
                        .scoring_mode(scoring)
                        .grid_size(grid)
                        .margin_fraction(margin)
                        .resample_filter(ResampleFilter::Nearest);
                    let expected = logo_color::rgb_to_hex((r / step * step, g / step * step, b / step * step));

                    let result = extract(&logo, &config).unwrap();
                    assert_eq!(result.hex(), expected, "config {:?}", config);
                    assert!(!result.fallback_used());
                    assert_eq!(result.pixels_considered(), (grid * grid) as u64);
                }
            }
        }
    }
}

#[test]
fn solid_color_survives_smooth_resampling() {
    let logo = RgbaImage::from_pixel(300, 300, Rgba([38, 102, 206, 255]));

    for filter in [ResampleFilter::Triangle, ResampleFilter::CatmullRom, ResampleFilter::Lanczos3] {
        let result = extract(&logo, &ExtractionConfig::default().resample_filter(filter)).unwrap();
        assert_eq!(result.hex(), "#2060C8");
    }
}

#[test]
fn fully_transparent_image_has_no_usable_content() {
    let logo = RgbaImage::from_pixel(32, 32, Rgba([220, 20, 60, 0]));

    let err = extract(&logo, &ExtractionConfig::default()).unwrap_err();
    assert!(matches!(err, ExtractionError::NoUsableContent));
    assert!(err.is_skippable());
}

#[test]
fn faint_content_below_relaxed_alpha_has_no_usable_content() {
    let logo = RgbaImage::from_pixel(32, 32, Rgba([220, 20, 60, 10]));
    assert!(matches!(
        extract(&logo, &ExtractionConfig::default().resample_filter(ResampleFilter::Nearest)),
        Err(ExtractionError::NoUsableContent)
    ));
}

#[test]
fn extraction_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..8 {
        let logo = RgbaImage::from_fn(48, 48, |_, _| Rgba([rng.gen(), rng.gen(), rng.gen(), rng.gen()]));

        for scoring in [ScoringMode::Frequency, ScoringMode::SaturationWeighted] {
            let config = ExtractionConfig::default().scoring_mode(scoring);
            let first = format!("{:?}", extract(&logo, &config));
            let second = format!("{:?}", extract(&logo.clone(), &config));
            assert_eq!(first, second);
        }
    }
}

#[test]
fn invalid_config_is_rejected_before_processing() {
    let logo = RgbaImage::from_pixel(8, 8, Rgba([220, 20, 60, 255]));

    for config in [
        ExtractionConfig::default().quant_step(0),
        ExtractionConfig::default().margin_fraction(0.5),
        ExtractionConfig::default().grid_size(0),
    ] {
        let err = extract(&logo, &config).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidConfig { .. }));
        assert!(!err.is_skippable());
    }

    // the config is checked even when the image itself would fail
    assert!(matches!(
        extract(&RgbaImage::new(4, 4), &ExtractionConfig::default().quant_step(0)),
        Err(ExtractionError::InvalidConfig { .. })
    ));
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn crimson_disk_on_white() {
    // about 20% of a 64x64 canvas
    let logo = disk(64, 16.15, Rgba([220, 20, 60, 255]), WHITE);

    let result = extract(&logo, &ExtractionConfig::default()).unwrap();

    assert_eq!(result.hex(), "#D81038");
    assert_eq!(result.rgb(), (216, 16, 56));
    assert!(!result.fallback_used());
    assert!(result.pixels_considered() > 0);
    assert!(result.pixels_considered() < 64 * 64);
}

#[test]
fn grey_on_transparent_falls_back_to_relaxed_pass() {
    let logo = RgbaImage::from_fn(64, 64, |x, _| if x < 32 { TRANSPARENT } else { Rgba([128, 128, 128, 255]) });

    let result = extract(&logo, &ExtractionConfig::default()).unwrap();

    assert_eq!(result.hex(), "#808080");
    assert!(result.fallback_used());
}

#[test]
fn grey_shapes_on_transparent_keep_their_grey() {
    const GREY: Rgba<u8> = Rgba([128, 128, 128, 255]);

    let triangle = RgbaImage::from_fn(200, 200, |x, y| if x <= y { GREY } else { TRANSPARENT });
    let round = disk(200, 95.0, GREY, TRANSPARENT);

    for logo in [&triangle, &round] {
        for margin in [0.0, 0.15] {
            for filter in [ResampleFilter::Triangle, ResampleFilter::Lanczos3] {
                let config = ExtractionConfig::default().margin_fraction(margin).resample_filter(filter);
                let result = extract(logo, &config).unwrap();

                assert_eq!(result.hex(), "#808080", "margin {} filter {:?}", margin, filter);
                assert!(result.fallback_used());
            }
        }
    }
}

#[test]
fn white_only_logo_falls_back_to_white() {
    let logo = disk(40, 15.0, WHITE, TRANSPARENT);

    let result = extract(&logo, &ExtractionConfig::default().scoring_mode(ScoringMode::Frequency)).unwrap();

    assert_eq!(result.hex(), "#F8F8F8");
    assert!(result.fallback_used());
}

#[test]
fn equal_scores_pick_lowest_key() {
    let logo = split_rows(64, 64, 32, Rgba([200, 40, 40, 255]), Rgba([40, 40, 200, 255]));

    for scoring in [ScoringMode::Frequency, ScoringMode::SaturationWeighted] {
        let result = extract(&logo, &exact_grid(64).scoring_mode(scoring)).unwrap();
        assert_eq!(result.hex(), "#2828C8");
    }
}

#[test]
fn vivid_accent_beats_dull_majority_only_when_weighted() {
    let logo = split_rows(50, 50, 30, Rgba([150, 120, 90, 255]), Rgba([30, 200, 60, 255]));

    let weighted = extract(&logo, &exact_grid(50)).unwrap();
    assert_eq!(weighted.hex(), "#18C838");

    let frequency = extract(&logo, &exact_grid(50).scoring_mode(ScoringMode::Frequency)).unwrap();
    assert_eq!(frequency.hex(), "#907858");
}

#[test]
fn outer_ring_is_trimmed_by_margin() {
    // a 4px blue ring around a red emblem, 40x40
    let logo = RgbaImage::from_fn(40, 40, |x, y| {
        let edge = x.min(y).min(39 - x).min(39 - y);
        if edge < 4 {
            Rgba([20, 60, 200, 255])
        } else {
            Rgba([220, 20, 60, 255])
        }
    });

    let untrimmed = extract(&logo, &exact_grid(40)).unwrap();
    assert_eq!(untrimmed.hex(), "#D81038");

    // floor(0.15 * 40) = 6 removes the ring entirely
    let trimmed = extract(&logo, &exact_grid(40).margin_fraction(0.15).grid_size(28)).unwrap();
    assert_eq!(trimmed.hex(), "#D81038");
    assert_eq!(trimmed.pixels_considered(), 28 * 28);
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn corrupt_bytes_are_a_decode_failure() {
    let err = extract_from_bytes(b"definitely not a png", &ExtractionConfig::default()).unwrap_err();

    assert!(matches!(err, ExtractionError::DecodeFailure { .. }));
    assert!(err.is_skippable());
}

#[test]
fn images_without_alpha_decode_opaque() {
    let rgb = RgbImage::from_pixel(20, 20, Rgb([220, 20, 60]));
    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb).write_to(&mut png, ImageOutputFormat::Png).unwrap();

    let decoded = logo_color::decode(png.get_ref()).unwrap();
    assert!(decoded.pixels().all(|p| p.0[3] == 255));

    let result = extract_from_bytes(png.get_ref(), &ExtractionConfig::default()).unwrap();
    assert_eq!(result.hex(), "#D81038");
}
