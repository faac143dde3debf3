//! Random stream used by the animation and the trigger policy
//!
//! Everything random in the crate goes through [`Entropy`], so a fixed
//! stream makes frames fully reproducible.

use embassy_time::Duration;
use rand::{Rng, RngCore, SeedableRng, rngs::SmallRng};

/// Source of the random values the renderer and policies consume
pub trait Entropy {
    /// Uniform value in `low..=high`
    fn next_u8_in(&mut self, low: u8, high: u8) -> u8;

    /// Uniform value in `low..=high`
    fn next_u64_in(&mut self, low: u64, high: u64) -> u64;

    /// `true` with the given probability (clamped to `0.0..=1.0`)
    fn chance(&mut self, probability: f32) -> bool;

    /// Uniform duration in `low..=high`, millisecond resolution
    fn next_duration_in(&mut self, low: Duration, high: Duration) -> Duration {
        Duration::from_millis(self.next_u64_in(low.as_millis(), high.as_millis()))
    }
}

/// [`Entropy`] backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RngEntropy<R> {
    rng: R,
}

impl RngEntropy<SmallRng> {
    /// Small, fast generator seeded with a fixed value
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> RngEntropy<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> Entropy for RngEntropy<R> {
    fn next_u8_in(&mut self, low: u8, high: u8) -> u8 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    fn next_u64_in(&mut self, low: u64, high: u64) -> u64 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    fn chance(&mut self, probability: f32) -> bool {
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.rng.r#gen::<f32>() < probability
    }
}
