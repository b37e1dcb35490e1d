//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: All randomness in the simulator MUST go through a [`RandomSource`].
//! The tick engine never reaches for ambient randomness; callers pass the
//! source in, which makes every tick replayable from a seed.

mod xorshift;

pub use xorshift::RngManager;

use uuid::Uuid;

/// Capability for drawing random values.
///
/// Only `next_u64` is required; everything else is derived from it so that
/// alternative sources (scripted sequences in tests, other generators) stay
/// consistent with [`RngManager`].
pub trait RandomSource {
    /// Next raw 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Uniform float in [0.0, 1.0).
    fn next_f64(&mut self) -> f64 {
        let value = self.next_u64();
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform integer in [min, max).
    ///
    /// # Panics
    /// Panics if min >= max
    fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");
        let range_size = (max - min) as u64;
        min + (self.next_u64() % range_size) as i64
    }

    /// Uniform integer in [min, max].
    fn range_inclusive(&mut self, min: i64, max: i64) -> i64 {
        self.range(min, max + 1)
    }

    /// Bernoulli trial that succeeds with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Random (version 4 layout) UUID built from two draws.
    fn uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.next_u64().to_le_bytes());
        bytes[8..].copy_from_slice(&self.next_u64().to_le_bytes());
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}
