//! xorshift64* random number generator
//!
//! This is a fast, high-quality PRNG that is deterministic and suitable
//! for simulation purposes.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. The whole event (arrivals,
//! queue switching, screening) replays identically from a seed.

use serde::{Deserialize, Serialize};

use super::RandomSource;

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use stadium_security_core_rs::rng::{RandomSource, RngManager};
///
/// let mut rng = RngManager::new(12345);
/// let value = rng.next_u64();
/// let range_value = rng.range(0, 100); // [0, 100)
/// assert!((0..100).contains(&range_value));
/// # let _ = value;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is mapped to 1 (xorshift cannot leave the all-zero state).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Get current RNG state (for replay)
    ///
    /// # Example
    /// ```
    /// use stadium_security_core_rs::rng::{RandomSource, RngManager};
    ///
    /// let mut rng = RngManager::new(12345);
    /// rng.next_u64();
    /// let mut resumed = RngManager::new(rng.get_state());
    /// assert_eq!(rng.next_u64(), resumed.next_u64());
    /// ```
    pub fn get_state(&self) -> u64 {
        self.state
    }
}

impl RandomSource for RngManager {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }
}
