//! Random sources for spawn placement and missile direction
//!
//! Production runs use a seeded PCG generator; tests script exact values.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform randomness capability
pub trait RandomSource {
    /// Integer in `[min, max)`. Returns `min` when the range is empty.
    fn next_int(&mut self, min: i32, max: i32) -> i32;
    /// Float in `[0, 1)`
    fn next_double(&mut self) -> f64;
}

/// Seeded PCG-backed random source
#[derive(Debug, Clone)]
pub struct PcgRandom {
    seed: u64,
    rng: Pcg32,
}

impl PcgRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from the thread RNG (non-reproducible runs)
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for PcgRandom {
    fn next_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }

    fn next_double(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Pre-programmed sequence for deterministic tests
///
/// Once a queue runs dry, ints fall back to the midpoint of the requested
/// range and doubles to `0.5`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    ints: VecDeque<i32>,
    doubles: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new(ints: impl IntoIterator<Item = i32>, doubles: impl IntoIterator<Item = f64>) -> Self {
        Self {
            ints: ints.into_iter().collect(),
            doubles: doubles.into_iter().collect(),
        }
    }

    pub fn push_int(&mut self, value: i32) {
        self.ints.push_back(value);
    }

    pub fn push_double(&mut self, value: f64) {
        self.doubles.push_back(value);
    }
}

impl RandomSource for ScriptedRandom {
    fn next_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        match self.ints.pop_front() {
            Some(v) => v.clamp(min, max - 1),
            None => min + (max - min) / 2,
        }
    }

    fn next_double(&mut self) -> f64 {
        self.doubles.pop_front().unwrap_or(0.5)
    }
}
