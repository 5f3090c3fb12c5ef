//! Fixed-size RGB8 pixel buffer.
//!
//! A [`Canvas`] owns `width * height` pixels in row-major order, three bytes
//! per pixel. The buffer is allocated once and never resized; only channel
//! values change.

use crate::color::Rgb8;
use crate::error::BrushError;

/// Bytes per pixel (R, G, B).
pub const CHANNELS: usize = 3;

/// An owned, row-major RGB8 image under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Canvas {
    /// Creates a canvas with every pixel set to `fill`.
    ///
    /// Returns `BrushError::InvalidDimensions` if width or height is zero,
    /// if the byte count `width * height * 3` exceeds `isize::MAX`, or if
    /// the buffer cannot be allocated.
    pub fn new(width: usize, height: usize, fill: Rgb8) -> Result<Self, BrushError> {
        if width == 0 || height == 0 {
            return Err(BrushError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .filter(|&n| isize::try_from(n).is_ok())
            .ok_or(BrushError::InvalidDimensions)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| BrushError::InvalidDimensions)?;
        data.extend(std::iter::repeat(fill.to_array()).take(width * height).flatten());
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates an all-white canvas.
    pub fn white(width: usize, height: usize) -> Result<Self, BrushError> {
        Self::new(width, height, Rgb8::WHITE)
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) * CHANNELS)
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb8> {
        let i = self.offset(x, y)?;
        Some(Rgb8::new(self.data[i], self.data[i + 1], self.data[i + 2]))
    }

    /// Overwrites the pixel at `(x, y)`. Coordinates outside the canvas are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb8) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + CHANNELS].copy_from_slice(&color.to_array());
        }
    }

    /// Mutable view of one row's bytes, `width * 3` long.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let stride = self.width * CHANNELS;
        &mut self.data[y * stride..(y + 1) * stride]
    }

    /// Iterates over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb8> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|p| Rgb8::new(p[0], p[1], p[2]))
    }

    /// True when every pixel has equal R, G and B channels.
    pub fn is_grayscale(&self) -> bool {
        self.pixels().all(|p| p.is_gray())
    }

    /// Read-only access to the raw RGB bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the canvas and returns the raw RGB bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}
