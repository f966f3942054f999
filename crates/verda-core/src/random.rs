//! Injectable randomness so analysis runs stay reproducible under test.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of uniform random samples for the mock extraction pipeline.
pub trait RandomSource: Send {
    /// Uniform sample from `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Uniform integer from `[low, high)`.
    fn uniform_u32(&mut self, low: u32, high: u32) -> u32;
}

/// Default source backed by `StdRng`; seedable for deterministic runs.
#[derive(Debug)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for StdRandom {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.rng.gen_range(low..high)
    }

    fn uniform_u32(&mut self, low: u32, high: u32) -> u32 {
        self.rng.gen_range(low..high)
    }
}
