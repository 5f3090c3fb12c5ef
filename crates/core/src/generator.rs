//! The step-based `Generator` trait.
//!
//! The trait is object-safe so a texture generator can be driven as
//! `dyn Generator` by code that only needs "advance, then read the canvas".

use crate::canvas::Canvas;
use crate::error::BrushError;
use serde_json::Value;

/// A procedural texture generator that mutates a [`Canvas`] one step at a time.
pub trait Generator {
    /// Performs one unit of work, e.g. stamping a single shape.
    fn step(&mut self) -> Result<(), BrushError>;

    /// The canvas being built.
    fn canvas(&self) -> &Canvas;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;
}
