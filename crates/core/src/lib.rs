#![deny(unsafe_code)]
//! Core types for brushgen, the brush texture generator.
//!
//! Provides the RGB8 [`Canvas`], the [`Ellipse`] shape and its hard-edged
//! [`fill_ellipse`] rasterizer, the [`RandomSource`] capability with its
//! seedable [`Xorshift64`] implementation, the step-based [`Generator`]
//! trait, and [`BrushError`].

pub mod canvas;
pub mod color;
pub mod ellipse;
pub mod error;
pub mod generator;
pub mod params;
pub mod prng;

pub use canvas::Canvas;
pub use color::Rgb8;
pub use ellipse::{fill_ellipse, Bounds, Ellipse};
pub use error::BrushError;
pub use generator::Generator;
pub use prng::{RandomSource, Xorshift64};
