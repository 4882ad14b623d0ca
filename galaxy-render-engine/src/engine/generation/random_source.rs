use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws consumed by the generator.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f32;

    /// `+1.0` or `-1.0` with equal probability.
    fn next_sign(&mut self) -> f32 {
        if self.next_unit() < 0.5 { 1.0 } else { -1.0 }
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f32 {
        self.r#gen::<f32>()
    }
}

/// Application-wide random source for regeneration. Entropy-seeded unless a
/// seed is supplied by a preset or over RPC.
#[derive(Resource)]
pub struct GalaxyRng {
    rng: StdRng,
    seed: Option<u64>,
}

impl Default for GalaxyRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl GalaxyRng {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Restart the sequence from `seed`, or from fresh entropy when `None`.
    pub fn reseed(&mut self, seed: Option<u64>) {
        *self = match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        };
    }

    /// Seed the current sequence started from, if it was seeded explicitly.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl RandomSource for GalaxyRng {
    fn next_unit(&mut self) -> f32 {
        self.rng.next_unit()
    }
}
