//! Random source for spawning and target assignment

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Small, fast PRNG. Seed it for reproducible runs.
pub struct ParticleRng {
    rng: SmallRng,
}

impl ParticleRng {
    /// Seeded from the operating system
    pub fn from_os_rng() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Returns a float in [min, max). Degenerate or inverted ranges do not panic.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform index into a collection of `len` items, `None` when empty
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.rng.random_range(0..len))
        }
    }
}

impl Default for ParticleRng {
    fn default() -> Self {
        Self::from_os_rng()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_range_bounds() {
        let mut rng = ParticleRng::seeded(42);
        for _ in 0..1000 {
            let v = rng.range(0.0, 10.0);
            assert!((0.0..10.0).contains(&v));
        }
    }

    #[test]
    fn degenerate_range_returns_min() {
        let mut rng = ParticleRng::seeded(1);
        assert_eq!(rng.range(2.0, 2.0), 2.0);
        let v = rng.range(5.0, 1.0);
        assert!(v <= 5.0 && v > 1.0);
    }

    #[test]
    fn index_stays_in_bounds() {
        let mut rng = ParticleRng::seeded(7);
        assert_eq!(rng.index(0), None);
        assert_eq!(rng.index(1), Some(0));
        for _ in 0..1000 {
            assert!(rng.index(13).unwrap() < 13);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = ParticleRng::seeded(99);
        let mut b = ParticleRng::seeded(99);
        for _ in 0..16 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }
}
