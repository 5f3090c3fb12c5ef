#![deny(unsafe_code)]
//! Brush texture generator.
//!
//! Stamps thousands of randomly sized, positioned and shaded ellipses onto a
//! white canvas. Every stamp is a hard-edged, horizontally stretched ellipse
//! filled with a light neutral gray; later stamps overwrite earlier ones.
//!
//! The stamp loop is sequential so that, for a fixed seed, "last write wins"
//! resolves identically on every run.

#[cfg(feature = "png")]
pub mod snapshot;

use brushgen_core::ellipse::{fill_ellipse, Ellipse};
use brushgen_core::error::BrushError;
use brushgen_core::params::{param_f64, param_i64, param_usize};
use brushgen_core::prng::{entropy_seed, RandomSource, Xorshift64};
use brushgen_core::{Canvas, Generator, Rgb8};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default canvas width in pixels.
pub const DEFAULT_WIDTH: usize = 1024;
/// Default canvas height in pixels.
pub const DEFAULT_HEIGHT: usize = 1024;
/// Default number of ellipses stamped per texture.
pub const DEFAULT_STAMPS: usize = 4000;
/// Smallest vertical radius (inclusive).
const DEFAULT_RY_MIN: i64 = 6;
/// Largest vertical radius (inclusive).
const DEFAULT_RY_MAX: i64 = 15;
/// Horizontal stretch factor range, `[min, max)`.
const DEFAULT_STRETCH_MIN: f64 = 1.5;
const DEFAULT_STRETCH_MAX: f64 = 6.0;
/// Gray level range, `[min, max)`.
const DEFAULT_GRAY_MIN: f64 = 0.6;
const DEFAULT_GRAY_MAX: f64 = 1.0;

/// Tunable constants for the brush texture.
///
/// [`Default`] yields the stock brush: 1024x1024, 4000 stamps, vertical
/// radius 6..=15, stretch 1.5..6.0, gray level 0.6..1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushParams {
    pub width: usize,
    pub height: usize,
    /// Number of ellipses to stamp.
    pub stamps: usize,
    pub ry_min: i64,
    pub ry_max: i64,
    /// `rx = round(ry * stretch)` with stretch drawn from `[stretch_min, stretch_max)`.
    pub stretch_min: f64,
    pub stretch_max: f64,
    pub gray_min: f64,
    pub gray_max: f64,
}

impl Default for BrushParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            stamps: DEFAULT_STAMPS,
            ry_min: DEFAULT_RY_MIN,
            ry_max: DEFAULT_RY_MAX,
            stretch_min: DEFAULT_STRETCH_MIN,
            stretch_max: DEFAULT_STRETCH_MAX,
            gray_min: DEFAULT_GRAY_MIN,
            gray_max: DEFAULT_GRAY_MAX,
        }
    }
}

impl BrushParams {
    /// Overlays recognized keys from a JSON object onto the defaults.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            width: param_usize(params, "width", d.width),
            height: param_usize(params, "height", d.height),
            stamps: param_usize(params, "stamps", d.stamps),
            ry_min: param_i64(params, "ry_min", d.ry_min),
            ry_max: param_i64(params, "ry_max", d.ry_max),
            stretch_min: param_f64(params, "stretch_min", d.stretch_min),
            stretch_max: param_f64(params, "stretch_max", d.stretch_max),
            gray_min: param_f64(params, "gray_min", d.gray_min),
            gray_max: param_f64(params, "gray_max", d.gray_max),
        }
    }

    /// Checks dimensions and that every range is non-empty.
    pub fn validate(&self) -> Result<(), BrushError> {
        if self.width == 0 || self.height == 0 {
            return Err(BrushError::InvalidDimensions);
        }
        if i64::try_from(self.width).is_err() || i64::try_from(self.height).is_err() {
            return Err(BrushError::InvalidDimensions);
        }
        if self.ry_min < 1 {
            return Err(invalid("ry_min", "must be at least 1"));
        }
        if self.ry_max < self.ry_min {
            return Err(invalid("ry_max", "must not be below ry_min"));
        }
        if !(self.stretch_min > 0.0 && self.stretch_min < self.stretch_max) {
            return Err(invalid(
                "stretch_min",
                "must be positive and below stretch_max",
            ));
        }
        if !(0.0..=1.0).contains(&self.gray_min)
            || !(0.0..=1.0).contains(&self.gray_max)
            || self.gray_min >= self.gray_max
        {
            return Err(invalid(
                "gray_min",
                "gray range must satisfy 0 <= gray_min < gray_max <= 1",
            ));
        }
        Ok(())
    }
}

fn invalid(name: &str, reason: &str) -> BrushError {
    BrushError::InvalidParam {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// One ellipse and the gray it is filled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    pub ellipse: Ellipse,
    pub color: Rgb8,
}

/// Draws one stamp from the distributions in `params`.
///
/// Draw order is center x, center y, vertical radius, stretch, gray level.
pub fn sample_stamp<R: RandomSource + ?Sized>(rng: &mut R, params: &BrushParams) -> Stamp {
    let cx = rng.next_int_inclusive(0, params.width as i64 - 1);
    let cy = rng.next_int_inclusive(0, params.height as i64 - 1);
    let ry = rng.next_int_inclusive(params.ry_min, params.ry_max);
    let stretch = rng.next_range(params.stretch_min, params.stretch_max);
    let rx = (ry as f64 * stretch).round() as i64;
    let level = rng.next_range(params.gray_min, params.gray_max);
    Stamp {
        ellipse: Ellipse::new(cx, cy, rx, ry),
        color: Rgb8::gray(level),
    }
}

/// Step-based brush generator: each [`step`](Generator::step) stamps one
/// random ellipse.
pub struct BrushGenerator<R: RandomSource = Xorshift64> {
    canvas: Canvas,
    rng: R,
    params: BrushParams,
    stamped: usize,
}

impl BrushGenerator<Xorshift64> {
    /// Creates a generator driven by a seeded [`Xorshift64`].
    pub fn with_seed(params: BrushParams, seed: u64) -> Result<Self, BrushError> {
        Self::new(params, Xorshift64::new(seed))
    }
}

impl<R: RandomSource> BrushGenerator<R> {
    /// Validates `params` and allocates a white canvas.
    pub fn new(params: BrushParams, rng: R) -> Result<Self, BrushError> {
        params.validate()?;
        let canvas = Canvas::white(params.width, params.height)?;
        Ok(Self {
            canvas,
            rng,
            params,
            stamped: 0,
        })
    }

    /// Applies a caller-chosen stamp. Returns the number of pixels written.
    pub fn stamp(&mut self, stamp: &Stamp) -> usize {
        self.stamped += 1;
        fill_ellipse(&mut self.canvas, &stamp.ellipse, stamp.color)
    }

    /// Runs `params.stamps` steps.
    pub fn run(&mut self) -> Result<(), BrushError> {
        log::debug!(
            "stamping {} ellipses onto {}x{} canvas",
            self.params.stamps,
            self.params.width,
            self.params.height
        );
        (0..self.params.stamps).try_for_each(|_| self.step())
    }

    /// Number of stamps applied so far.
    pub fn stamped(&self) -> usize {
        self.stamped
    }

    pub fn brush_params(&self) -> &BrushParams {
        &self.params
    }

    /// Consumes the generator and returns the finished canvas.
    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }
}

impl<R: RandomSource> Generator for BrushGenerator<R> {
    fn step(&mut self) -> Result<(), BrushError> {
        let stamp = sample_stamp(&mut self.rng, &self.params);
        let written = self.stamp(&stamp);
        log::trace!("stamp {:?} wrote {written} pixels", stamp.ellipse);
        Ok(())
    }

    fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn params(&self) -> Value {
        json!({
            "width": self.params.width,
            "height": self.params.height,
            "stamps": self.params.stamps,
            "stamped": self.stamped,
            "ry_min": self.params.ry_min,
            "ry_max": self.params.ry_max,
            "stretch_min": self.params.stretch_min,
            "stretch_max": self.params.stretch_max,
            "gray_min": self.params.gray_min,
            "gray_max": self.params.gray_max,
        })
    }
}

/// Builds a complete brush texture.
///
/// `None` seeds from the system clock, so every run differs.
pub fn generate(params: &BrushParams, seed: Option<u64>) -> Result<Canvas, BrushError> {
    let seed = seed.unwrap_or_else(entropy_seed);
    log::info!("generating brush texture (seed {seed})");
    let mut brush = BrushGenerator::with_seed(params.clone(), seed)?;
    brush.run()?;
    Ok(brush.into_canvas())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Small canvas keeps the per-test cost low while exercising clamping.
    fn small() -> BrushParams {
        BrushParams {
            width: 128,
            height: 96,
            stamps: 300,
            ..BrushParams::default()
        }
    }

    /// Returns the same raw value forever.
    struct Constant(u64);

    impl RandomSource for Constant {
        fn next_u64(&mut self) -> u64 {
            self.0
        }
    }

    // ---- Parameters ----

    #[test]
    fn default_params_match_stock_brush() {
        let p = BrushParams::default();
        assert_eq!((p.width, p.height), (1024, 1024));
        assert_eq!(p.stamps, 4000);
        assert_eq!((p.ry_min, p.ry_max), (6, 15));
        assert_eq!((p.stretch_min, p.stretch_max), (1.5, 6.0));
        assert_eq!((p.gray_min, p.gray_max), (0.6, 1.0));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn from_json_uses_defaults_for_empty_json() {
        assert_eq!(BrushParams::from_json(&json!({})), BrushParams::default());
    }

    #[test]
    fn from_json_overlays_custom_values() {
        let p = BrushParams::from_json(&json!({"stamps": 12, "gray_min": 0.2, "ry_max": 30}));
        assert_eq!(p.stamps, 12);
        assert_eq!(p.ry_max, 30);
        assert!((p.gray_min - 0.2).abs() < f64::EPSILON);
        assert_eq!(p.width, DEFAULT_WIDTH);
    }

    #[test]
    fn params_serde_round_trip() {
        let p = small();
        let text = serde_json::to_string(&p).unwrap();
        let back: BrushParams = serde_json::from_str(&text).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn validate_rejects_bad_ranges() {
        let cases = [
            BrushParams { width: 0, ..small() },
            BrushParams { ry_min: 0, ..small() },
            BrushParams { ry_min: 9, ry_max: 8, ..small() },
            BrushParams { stretch_min: 0.0, ..small() },
            BrushParams { stretch_min: 3.0, stretch_max: 3.0, ..small() },
            BrushParams { gray_min: 0.8, gray_max: 0.4, ..small() },
            BrushParams { gray_max: 1.5, ..small() },
            BrushParams { gray_min: f64::NAN, ..small() },
        ];
        for p in cases {
            assert!(p.validate().is_err(), "accepted {p:?}");
            assert!(BrushGenerator::with_seed(p, 1).is_err());
        }
    }

    #[test]
    fn unallocatable_canvas_is_an_error_not_a_panic() {
        let params = BrushParams {
            width: usize::MAX / 4,
            height: 1,
            stamps: 0,
            ..BrushParams::default()
        };
        assert!(params.validate().is_ok());
        let result = std::panic::catch_unwind(|| BrushGenerator::with_seed(params, 1).is_ok());
        assert!(matches!(result, Ok(false)), "generator construction panicked or succeeded");
        let params = BrushParams {
            width: usize::MAX / 4,
            height: 1,
            stamps: 0,
            ..BrushParams::default()
        };
        assert!(matches!(
            generate(&params, Some(1)),
            Err(BrushError::InvalidDimensions)
        ));
    }

    #[test]
    fn invalid_param_error_names_the_field() {
        let err = BrushParams { ry_min: 0, ..small() }.validate().unwrap_err();
        assert!(err.to_string().contains("ry_min"), "{err}");
    }

    // ---- Sampling ----

    #[test]
    fn lowest_draws_give_smallest_stamp() {
        let s = sample_stamp(&mut Constant(0), &BrushParams::default());
        assert_eq!(s.ellipse, Ellipse::new(0, 0, 9, 6));
        assert_eq!(s.color, Rgb8::gray(0.6));
    }

    #[test]
    fn stretch_is_rounded_not_truncated() {
        // ry = 7, stretch 1.5 -> 10.5 rounds away from zero to 11
        let params = BrushParams {
            ry_min: 7,
            ry_max: 7,
            ..BrushParams::default()
        };
        let s = sample_stamp(&mut Constant(0), &params);
        assert_eq!(s.ellipse.rx, 11);
    }

    #[test]
    fn sampled_stamps_stay_in_range() {
        let params = BrushParams::default();
        let mut rng = Xorshift64::new(7);
        for _ in 0..5000 {
            let s = sample_stamp(&mut rng, &params);
            let e = s.ellipse;
            assert!((0..1024).contains(&e.cx) && (0..1024).contains(&e.cy));
            assert!((6..=15).contains(&e.ry), "ry = {}", e.ry);
            assert!(e.rx >= e.ry, "rx {} < ry {}", e.rx, e.ry);
            assert!(e.rx <= e.ry * 6, "rx {} too wide for ry {}", e.rx, e.ry);
            assert!(s.color.is_gray());
            assert!((152..=254).contains(&s.color.r), "gray {}", s.color.r);
        }
    }

    // ---- Generation ----

    #[test]
    fn zero_stamps_leave_canvas_white() {
        let params = BrushParams {
            stamps: 0,
            ..BrushParams::default()
        };
        let canvas = generate(&params, Some(1)).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (1024, 1024));
        assert!(canvas.pixels().all(|p| p == Rgb8::WHITE));
    }

    #[test]
    fn single_forced_stamp_matches_direct_fill() {
        let params = BrushParams {
            stamps: 0,
            ..BrushParams::default()
        };
        let mut brush = BrushGenerator::with_seed(params, 3).unwrap();
        let stamp = Stamp {
            ellipse: Ellipse::new(512, 512, 100, 50),
            color: Rgb8::new(200, 200, 200),
        };
        brush.stamp(&stamp);
        assert_eq!(brush.stamped(), 1);

        let mut expected = Canvas::white(1024, 1024).unwrap();
        fill_ellipse(&mut expected, &stamp.ellipse, stamp.color);
        assert_eq!(brush.canvas(), &expected);

        let c = brush.into_canvas();
        assert_eq!(c.pixel(512, 512), Some(Rgb8::new(200, 200, 200)));
        assert_eq!(c.pixel(611, 512), Some(Rgb8::new(200, 200, 200)));
        assert_eq!(c.pixel(613, 512), Some(Rgb8::WHITE));
        assert_eq!(c.pixel(512, 563), Some(Rgb8::WHITE));
    }

    #[test]
    fn full_run_is_deterministic_for_fixed_seed() {
        let params = BrushParams::default();
        let a = generate(&params, Some(0xB2_05_11)).unwrap();
        let b = generate(&params, Some(0xB2_05_11)).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn full_run_is_grayscale_and_fixed_size() {
        let canvas = generate(&BrushParams::default(), Some(99)).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (1024, 1024));
        assert_eq!(canvas.as_raw().len(), 1024 * 1024 * 3);
        assert!(canvas.is_grayscale());
        assert!(canvas.pixels().any(|p| p != Rgb8::WHITE));
    }

    #[test]
    fn different_seeds_differ() {
        let a = generate(&small(), Some(1)).unwrap();
        let b = generate(&small(), Some(2)).unwrap();
        assert_ne!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn unseeded_run_succeeds() {
        let canvas = generate(&small(), None).unwrap();
        assert!(canvas.is_grayscale());
    }

    #[test]
    fn run_counts_every_step() {
        let mut brush = BrushGenerator::with_seed(small(), 5).unwrap();
        brush.run().unwrap();
        assert_eq!(brush.stamped(), 300);
        assert_eq!(brush.brush_params(), &small());
        assert_eq!(brush.params()["stamped"], 300);
        assert_eq!(brush.params()["stamps"], 300);
    }

    #[test]
    fn injected_source_drives_generation() {
        let mut brush = BrushGenerator::new(small(), Constant(0)).unwrap();
        brush.step().unwrap();
        // center (0, 0), rx 9, ry 6
        assert_eq!(brush.canvas().pixel(0, 0), Some(Rgb8::gray(0.6)));
        assert_eq!(brush.canvas().pixel(9, 0), Some(Rgb8::gray(0.6)));
        assert_eq!(brush.canvas().pixel(10, 0), Some(Rgb8::WHITE));
    }

    #[test]
    fn generator_is_object_safe() {
        let mut brush = BrushGenerator::with_seed(small(), 11).unwrap();
        let dyn_gen: &mut dyn Generator = &mut brush;
        dyn_gen.step().unwrap();
        assert_eq!(dyn_gen.canvas().width(), 128);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn tiny(stamps: usize) -> BrushParams {
            BrushParams {
                width: 48,
                height: 32,
                stamps,
                ..BrushParams::default()
            }
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn output_is_always_grayscale(seed: u64, stamps in 0_usize..200) {
                let canvas = generate(&tiny(stamps), Some(seed)).unwrap();
                prop_assert!(canvas.is_grayscale());
                prop_assert_eq!(canvas.as_raw().len(), 48 * 32 * 3);
            }

            #[test]
            fn deterministic_across_instances(seed: u64) {
                let a = generate(&tiny(100), Some(seed)).unwrap();
                let b = generate(&tiny(100), Some(seed)).unwrap();
                prop_assert_eq!(a, b);
            }

            #[test]
            fn pixels_are_white_or_in_gray_band(seed: u64) {
                let canvas = generate(&tiny(150), Some(seed)).unwrap();
                for p in canvas.pixels() {
                    prop_assert!(p == Rgb8::WHITE || (152..=254).contains(&p.r), "{:?}", p);
                }
            }
        }
    }
}
