//! Sources of synthetic category values.
//!
//! The pricing pipeline never blocks the UI on missing data; instead it draws
//! a uniform integer from a category range. The source is injected so runs can
//! be reproduced with a fixed seed.

use std::sync::Mutex;

use rand::{rngs::StdRng, Rng, SeedableRng};

use super::entities::FallbackRange;

pub trait FallbackSource: Send + Sync {
    /// Uniform integer in `min..=max`.
    fn in_range(&self, min: u32, max: u32) -> u32;

    fn draw(&self, range: FallbackRange) -> u32 {
        self.in_range(range.min, range.max)
    }
}

/// Thread-local RNG; the default for the running app.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRngSource;

impl FallbackSource for ThreadRngSource {
    fn in_range(&self, min: u32, max: u32) -> u32 {
        let (low, high) = ordered(min, max);
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Deterministic source for reproducible comparisons.
#[derive(Debug)]
pub struct SeededSource {
    rng: Mutex<StdRng>,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl FallbackSource for SeededSource {
    fn in_range(&self, min: u32, max: u32) -> u32 {
        let (low, high) = ordered(min, max);
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(low..=high)
    }
}

fn ordered(a: u32, b: u32) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
