//! 8-bit RGB pixel type.

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    /// Pure white, the blank canvas color.
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);

    /// Pure black.
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Neutral gray from a level in [0, 1].
    ///
    /// Every channel is `floor(255 * level)`. The level is clamped to [0, 1]
    /// first, and NaN maps to black.
    pub fn gray(level: f64) -> Self {
        let level = if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, 1.0)
        };
        // `as` truncates toward zero, which is floor for non-negative values.
        let v = (255.0 * level) as u8;
        Self::new(v, v, v)
    }

    /// True when all three channels are equal.
    pub fn is_gray(&self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// Channels as an `[r, g, b]` array.
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}
