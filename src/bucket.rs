/// All kept pixels that quantize to the same color key, together with their accumulated score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ColorBucket {
    red: u8,
    green: u8,
    blue: u8,
    count: u64,
    score: f64,
}

impl ColorBucket {
    pub fn new((red, green, blue): (u8, u8, u8)) -> ColorBucket {
        Self {
            red,
            green,
            blue,
            count: 0,
            score: 0.0,
        }
    }

    pub fn key(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    pub fn count(self) -> u64 {
        self.count
    }

    pub fn score(self) -> f64 {
        self.score
    }

    pub fn hex(self) -> String {
        rgb_to_hex(self.key())
    }

    pub(crate) fn add_pixel(&mut self) {
        self.count += 1;
    }

    pub(crate) fn add_score(&mut self, weight: f64) {
        self.score += weight;
    }
}

/// Formats a color as `#RRGGBB` with uppercase digits.
pub fn rgb_to_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Whether `value` is a six-digit hex color, with or without the leading `#`.
pub fn is_valid_hex(value: &str) -> bool {
    let digits = value.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}
