use crate::config::ResampleFilter;
use image::{imageops, math::Rect, ImageBuffer, Rgba, RgbaImage};

/// Fixed-point scale of the premultiplied grid. Full opacity maps to half the `u16` range, which leaves headroom for
/// kernel overshoot so the color-to-alpha ratio survives resampling unclamped.
const PREMULTIPLIED_ONE: f32 = 128.0;

type PremultipliedImage = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// One pixel of the resampled grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    pub x: u32,
    pub y: u32,
}

impl PixelSample {
    pub fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// HSV saturation and value, both in `[0, 1]`.
    pub fn saturation_value(self) -> (f32, f32) {
        let (_, s, v) = crate::rgb_to_hsv(self.rgb());
        (s, v)
    }
}

/// Shrinks (or stretches) the content region to a fixed square grid so the work after it never depends on the
/// source resolution.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Resampler {
    grid_size: u32,
    filter: ResampleFilter,
}

impl Resampler {
    pub fn new(grid_size: u32, filter: ResampleFilter) -> Self {
        Self { grid_size, filter }
    }

    /// An absent region produces no samples at all.
    pub fn samples(&self, image: &RgbaImage, region: Option<Rect>) -> Vec<PixelSample> {
        let Some(region) = region else {
            return Vec::new();
        };

        // resampling straight alpha would bleed the color of transparent pixels into visible edges
        let cropped = imageops::crop_imm(image, region.x, region.y, region.width, region.height).to_image();
        let premultiplied = premultiply(&cropped);
        let grid = imageops::resize(&premultiplied, self.grid_size, self.grid_size, self.filter.into());

        grid.enumerate_pixels()
            .map(|(x, y, pixel)| {
                let [r, g, b, a] = unpremultiply(pixel.0);
                PixelSample { r, g, b, a, x, y }
            })
            .collect()
    }
}

fn premultiply(image: &RgbaImage) -> PremultipliedImage {
    PremultipliedImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let alpha = a as f32 / 255.0 * PREMULTIPLIED_ONE;
        let channel = |c: u8| (c as f32 * alpha).round() as u16;

        Rgba([channel(r), channel(g), channel(b), (a as f32 * PREMULTIPLIED_ONE).round() as u16])
    })
}

fn unpremultiply([r, g, b, a]: [u16; 4]) -> [u8; 4] {
    if a == 0 {
        return [0, 0, 0, 0];
    }

    let alpha = a as f32;
    let channel = |c: u16| (c as f32 / alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    let opacity = (alpha / PREMULTIPLIED_ONE).round().clamp(0.0, 255.0) as u8;

    [channel(r), channel(g), channel(b), opacity]
}
