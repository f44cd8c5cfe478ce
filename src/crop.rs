use image::{math::Rect, RgbaImage};

/// Finds the part of a logo worth sampling: the box around every non-transparent pixel, pulled in on all sides to cut
/// away rings and frames drawn around the emblem.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ContentCropper {
    margin_fraction: f32,
}

impl ContentCropper {
    pub fn new(margin_fraction: f32) -> Self {
        Self { margin_fraction }
    }

    /// Returns `None` when the image has no pixel with non-zero alpha.
    pub fn crop(&self, image: &RgbaImage) -> Option<Rect> {
        alpha_bounding_box(image).map(|bbox| self.shrink(bbox))
    }

    fn shrink(&self, bbox: Rect) -> Rect {
        let fraction = self.margin_fraction.max(0.0);
        let margin = (fraction * bbox.width.min(bbox.height) as f32).floor() as u32;

        // a margin that would erase the box entirely is ignored instead, small square logos would vanish otherwise
        match (
            bbox.width.checked_sub(margin.saturating_mul(2)),
            bbox.height.checked_sub(margin.saturating_mul(2)),
        ) {
            (Some(width), Some(height)) if width > 0 && height > 0 => Rect {
                x: bbox.x + margin,
                y: bbox.y + margin,
                width,
                height,
            },
            _ => bbox,
        }
    }
}

fn alpha_bounding_box(image: &RgbaImage) -> Option<Rect> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[3] == 0 {
            continue;
        }

        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y)),
        });
    }

    bounds.map(|(min_x, min_y, max_x, max_y)| Rect {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}
