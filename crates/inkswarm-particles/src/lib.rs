//! Inkswarm Particles - target-seeking particle swarm
//!
//! Provides the CPU simulation behind the text effect:
//! - Swap-remove particle pool sized from the current target count
//! - Seek force toward an assigned target plus a small age-driven wobble
//! - Size driven by distance to target, geometric decay after `max_age`
//! - Target list swaps with unconditional reassignment

pub mod particle;
pub mod physics;
pub mod population;
pub mod rand;

use glam::Vec2;
use inkswarm_core::{ParticleSettings, TargetList};

pub use particle::{Particle, ParticlePool, MIN_VISIBLE_SIZE};
pub use population::{population_cap, PopulationReport};
pub use crate::rand::ParticleRng;

/// Owns the particles, the current target list and the random source.
pub struct ParticleSystem {
    pool: ParticlePool,
    targets: TargetList,
    rng: ParticleRng,
    /// Extraction surface size in pixels; spawn area
    area: Vec2,
}

impl ParticleSystem {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_rng(width, height, ParticleRng::from_os_rng())
    }

    pub fn with_rng(width: u32, height: u32, rng: ParticleRng) -> Self {
        Self {
            pool: ParticlePool::new(),
            targets: TargetList::empty(),
            rng,
            area: Vec2::new(width as f32, height as f32),
        }
    }

    pub fn set_area(&mut self, width: u32, height: u32) {
        self.area = Vec2::new(width as f32, height as f32);
    }

    /// Swap in a freshly extracted target list.
    ///
    /// When the new list is non-empty every particle gets a new random target,
    /// whether or not its old index would still be valid. With an empty list
    /// indices are left dangling and the pool drains through normal aging.
    pub fn replace_targets(&mut self, targets: TargetList) {
        if !targets.is_empty() {
            for p in self.pool.iter_mut() {
                if let Some(index) = self.rng.index(targets.len()) {
                    p.target = index;
                }
            }
        }
        log::debug!(
            "Swapped in target generation {} ({} targets, {} particles reassigned)",
            targets.generation(),
            targets.len(),
            if targets.is_empty() { 0 } else { self.pool.len() }
        );
        self.targets = targets;
    }

    /// One simulation tick: population step, then physics.
    pub fn update(&mut self, settings: &ParticleSettings) -> PopulationReport {
        let report = population::step(
            &mut self.pool,
            &self.targets,
            settings,
            self.area,
            &mut self.rng,
        );
        physics::integrate(&mut self.pool, &self.targets, settings, &mut self.rng);
        report
    }

    pub fn particles(&self) -> &[Particle] {
        self.pool.as_slice()
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn targets(&self) -> &TargetList {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Number of particles that will be drawn this frame
    pub fn visible_count(&self) -> usize {
        self.pool.iter().filter(|p| p.is_visible()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkswarm_core::Target;

    fn grid(w: u32, h: u32, generation: u64) -> TargetList {
        let mut points = Vec::new();
        for y in 0..h {
            for x in 0..w {
                points.push(Target::new(x, y));
            }
        }
        TargetList::new(points, generation)
    }

    fn system() -> ParticleSystem {
        ParticleSystem::with_rng(100, 100, ParticleRng::seeded(17))
    }

    #[test]
    fn population_never_exceeds_cap() {
        let settings = ParticleSettings::default();
        let mut sys = system();
        sys.replace_targets(grid(20, 20, 1));
        let cap = population_cap(400, settings.target_to_particle_ratio);

        let mut previous = 0;
        for _ in 0..50 {
            sys.update(&settings);
            assert!(sys.len() <= cap);
            assert!(sys.len() <= previous + settings.max_add_per_frame as usize);
            previous = sys.len();
        }
        assert_eq!(sys.len(), cap);
    }

    #[test]
    fn rebuild_reassigns_every_particle() {
        let settings = ParticleSettings::default();
        let mut sys = system();
        sys.replace_targets(grid(30, 30, 1));
        for _ in 0..5 {
            sys.update(&settings);
        }
        assert!(!sys.is_empty());

        sys.replace_targets(grid(3, 1, 2));
        assert_eq!(sys.targets().generation(), 2);
        assert!(sys.particles().iter().all(|p| p.target < 3));
    }

    #[test]
    fn empty_rebuild_leaves_indices_and_drains() {
        let settings = ParticleSettings {
            max_age: 5.0,
            ..Default::default()
        };
        let mut sys = system();
        sys.replace_targets(grid(10, 10, 1));
        sys.update(&settings);
        let before: Vec<usize> = sys.particles().iter().map(|p| p.target).collect();

        sys.replace_targets(TargetList::empty());
        let after: Vec<usize> = sys.particles().iter().map(|p| p.target).collect();
        assert_eq!(before, after);

        // ages grow by at least 0.1 per tick and sizes decay past max_age
        for _ in 0..200 {
            sys.update(&settings);
        }
        assert!(sys.is_empty());
    }

    #[test]
    fn particles_settle_on_text() {
        let settings = ParticleSettings {
            max_age: 1.0e6,
            chaos_acc: 0.0,
            ..Default::default()
        };
        let mut sys = system();
        sys.replace_targets(TargetList::new(vec![Target::new(50, 50); 10], 1));
        for _ in 0..2000 {
            sys.update(&settings);
        }
        assert_eq!(sys.len(), 5);
        assert!(sys.visible_count() > 0);
    }
}
