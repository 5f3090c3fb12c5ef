//! Axis-aligned ellipses and hard-edged rasterization onto a [`Canvas`].

use crate::canvas::{Canvas, CHANNELS};
use crate::color::Rgb8;

/// An axis-aligned ellipse with integer center and radii.
///
/// The center may lie anywhere, including outside any canvas. Radii that are
/// zero or negative describe an empty shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ellipse {
    pub cx: i64,
    pub cy: i64,
    /// Horizontal radius.
    pub rx: i64,
    /// Vertical radius.
    pub ry: i64,
}

/// Inclusive integer rectangle `[x0, x1] × [y0, y1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl Bounds {
    pub fn is_empty(&self) -> bool {
        self.x0 > self.x1 || self.y0 > self.y1
    }

    /// Intersects with `[0, width-1] × [0, height-1]`.
    pub fn clamp_to(self, width: usize, height: usize) -> Bounds {
        let max_x = i64::try_from(width).unwrap_or(i64::MAX).saturating_sub(1);
        let max_y = i64::try_from(height).unwrap_or(i64::MAX).saturating_sub(1);
        Bounds {
            x0: self.x0.max(0),
            y0: self.y0.max(0),
            x1: self.x1.min(max_x),
            y1: self.y1.min(max_y),
        }
    }
}

impl Ellipse {
    pub fn new(cx: i64, cy: i64, rx: i64, ry: i64) -> Self {
        Self { cx, cy, rx, ry }
    }

    /// True when either radius is zero or negative.
    pub fn is_degenerate(&self) -> bool {
        self.rx <= 0 || self.ry <= 0
    }

    /// Bounding box `[cx-rx, cx+rx] × [cy-ry, cy+ry]`.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            x0: self.cx.saturating_sub(self.rx),
            y0: self.cy.saturating_sub(self.ry),
            x1: self.cx.saturating_add(self.rx),
            y1: self.cy.saturating_add(self.ry),
        }
    }

    /// Membership test `(x-cx)²/rx² + (y-cy)²/ry² <= 1`, evaluated in f64.
    ///
    /// Always false for a degenerate ellipse.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let dx = (x as f64) - (self.cx as f64);
        let dy = (y as f64) - (self.cy as f64);
        let rx = self.rx as f64;
        let ry = self.ry as f64;
        dx * dx / (rx * rx) + dy * dy / (ry * ry) <= 1.0
    }
}

/// Fills `ellipse` with `color`, overwriting whatever was there.
///
/// The bounding box is clamped to the canvas, so any center and radius is
/// safe. Degenerate ellipses write nothing. Returns the number of pixels
/// written.
pub fn fill_ellipse(canvas: &mut Canvas, ellipse: &Ellipse, color: Rgb8) -> usize {
    if ellipse.is_degenerate() {
        return 0;
    }
    let clip = ellipse.bounds().clamp_to(canvas.width(), canvas.height());
    if clip.is_empty() {
        return 0;
    }

    let rgb = color.to_array();
    let mut written = 0;
    for y in clip.y0..=clip.y1 {
        // clip is inside the canvas, so these casts are lossless
        let row = canvas.row_mut(y as usize);
        for x in clip.x0..=clip.x1 {
            if ellipse.contains(x, y) {
                let i = x as usize * CHANNELS;
                row[i..i + CHANNELS].copy_from_slice(&rgb);
                written += 1;
            }
        }
    }
    written
}
