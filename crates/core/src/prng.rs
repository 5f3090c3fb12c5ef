//! Random sources for stamp sampling.
//!
//! [`RandomSource`] is the capability the generator needs: uniform floats and
//! integers in a range. [`Xorshift64`] is the seedable implementation; the
//! same seed always produces the same sequence on every platform.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of uniformly distributed values.
///
/// Implementors supply [`next_u64`](RandomSource::next_u64); the ranged
/// helpers are derived from it.
pub trait RandomSource {
    /// Returns the next raw 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Uses the upper 53 bits of `next_u64()` for full mantissa precision.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [min, max).
    fn next_range(&mut self, min: f64, max: f64) -> f64 {
        let v = min + self.next_f64() * (max - min);
        // f64 rounding can land exactly on `max`
        if v >= max {
            min
        } else {
            v
        }
    }

    /// Returns a uniformly distributed integer in the closed range [min, max].
    ///
    /// Uses modulo reduction; the bias is negligible for the small spans
    /// this crate draws from. Returns `min` if `max < min`.
    fn next_int_inclusive(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = (max as i128 - min as i128 + 1) as u128;
        let offset = (self.next_u64() as u128) % span;
        (min as i128 + offset as i128) as i64
    }
}

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17). A seed of 0 is replaced
/// with a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Creates a PRNG seeded from the system clock.
    pub fn from_entropy() -> Self {
        Self::new(entropy_seed())
    }
}

impl RandomSource for Xorshift64 {
    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

/// Derives a seed from the current time.
///
/// The nanosecond timestamp is passed through a splitmix64 finalizer so that
/// runs started close together still get well-separated seeds.
pub fn entropy_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let mut z = nanos.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
