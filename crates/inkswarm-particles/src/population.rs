//! Population control: grow toward the cap, evict expired particles

use crate::particle::{Particle, ParticlePool};
use crate::rand::ParticleRng;
use glam::Vec2;
use inkswarm_core::{ParticleSettings, TargetList};

/// What one population step changed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PopulationReport {
    pub cap: usize,
    pub added: usize,
    pub removed: usize,
}

/// Maximum population for `target_count` targets.
///
/// A ratio that is zero, negative or not finite allows no particles.
pub fn population_cap(target_count: usize, ratio: f32) -> usize {
    if !ratio.is_finite() || ratio <= 0.0 {
        return 0;
    }
    let cap = (target_count as f64 / ratio as f64).floor();
    if cap >= usize::MAX as f64 {
        usize::MAX
    } else {
        cap as usize
    }
}

/// Add particles toward the cap (at most `max_add_per_frame`), then evict
/// every particle that is both past `max_age` and smaller than half a pixel.
///
/// `area` is the extraction surface size; spawn positions are whole pixels inside it.
pub fn step(
    pool: &mut ParticlePool,
    targets: &TargetList,
    settings: &ParticleSettings,
    area: Vec2,
    rng: &mut ParticleRng,
) -> PopulationReport {
    let cap = population_cap(targets.len(), settings.target_to_particle_ratio);
    let mut added = 0;

    if pool.len() < cap && !targets.is_empty() {
        let to_add = (cap - pool.len()).min(settings.max_add_per_frame as usize);
        for _ in 0..to_add {
            let pos = Vec2::new(
                (rng.next_f32() * area.x).floor(),
                (rng.next_f32() * area.y).floor(),
            );
            let age_per_frame = rng.range(settings.age_per_frame_min, settings.age_per_frame_max);
            let target = rng.index(targets.len()).unwrap_or(0);
            pool.push(Particle::spawn(pos, pool.len(), age_per_frame, target));
        }
        added = to_add;
    }

    let removed = pool.evict_expired(settings.max_age);

    PopulationReport {
        cap,
        added,
        removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkswarm_core::Target;

    fn targets(n: u32) -> TargetList {
        TargetList::new((0..n).map(|i| Target::new(i % 50, i / 50)).collect(), 1)
    }

    #[test]
    fn cap_handles_bad_ratios() {
        assert_eq!(population_cap(100, 2.0), 50);
        assert_eq!(population_cap(101, 2.0), 50);
        assert_eq!(population_cap(100, 0.5), 200);
        assert_eq!(population_cap(100, 0.0), 0);
        assert_eq!(population_cap(100, -1.0), 0);
        assert_eq!(population_cap(100, f32::NAN), 0);
        assert_eq!(population_cap(100, f32::INFINITY), 0);
    }

    #[test]
    fn growth_is_bounded_per_tick_and_by_cap() {
        let settings = ParticleSettings {
            target_to_particle_ratio: 2.0,
            max_add_per_frame: 60,
            ..Default::default()
        };
        let list = targets(300);
        let mut pool = ParticlePool::new();
        let mut rng = ParticleRng::seeded(3);
        let area = Vec2::new(100.0, 80.0);

        let first = step(&mut pool, &list, &settings, area, &mut rng);
        assert_eq!(first.added, 60);
        assert_eq!(pool.len(), 60);

        let second = step(&mut pool, &list, &settings, area, &mut rng);
        assert_eq!(second.added, 60);
        assert_eq!(pool.len(), 120);

        let third = step(&mut pool, &list, &settings, area, &mut rng);
        assert_eq!(third.added, 30);
        assert_eq!(pool.len(), 150);

        let fourth = step(&mut pool, &list, &settings, area, &mut rng);
        assert_eq!(fourth.added, 0);
        assert_eq!(pool.len(), 150);
    }

    #[test]
    fn spawned_particles_are_inside_area_and_valid() {
        let settings = ParticleSettings::default();
        let list = targets(200);
        let mut pool = ParticlePool::new();
        let mut rng = ParticleRng::seeded(11);
        step(&mut pool, &list, &settings, Vec2::new(64.0, 32.0), &mut rng);

        for (i, p) in pool.iter().enumerate() {
            assert!(p.pos.x >= 0.0 && p.pos.x < 64.0);
            assert!(p.pos.y >= 0.0 && p.pos.y < 32.0);
            assert_eq!(p.pos.x, p.pos.x.floor());
            assert_eq!(p.pos.y, p.pos.y.floor());
            assert!(p.target < list.len());
            assert!(p.age_per_frame >= settings.age_per_frame_min);
            assert!(p.age_per_frame < settings.age_per_frame_max);
            let drift = Vec2::new((i as f32).cos(), (i as f32).sin()) * 0.01;
            assert!((p.vel - drift).length() < 1e-6);
        }
    }

    #[test]
    fn empty_targets_add_nothing() {
        let settings = ParticleSettings::default();
        let mut pool = ParticlePool::new();
        let mut rng = ParticleRng::seeded(5);
        let report = step(&mut pool, &TargetList::empty(), &settings, Vec2::splat(10.0), &mut rng);
        assert_eq!(report.added, 0);
        assert!(pool.is_empty());
    }

    #[test]
    fn expired_particles_are_evicted() {
        let settings = ParticleSettings {
            max_age: 10.0,
            ..Default::default()
        };
        let mut pool = ParticlePool::new();
        for age in [5.0, 11.0, 20.0] {
            let mut p = Particle::spawn(Vec2::ZERO, 0, 1.0, 0);
            p.age = age;
            pool.push(p);
        }
        // a visible old particle stays
        let mut big = Particle::spawn(Vec2::ZERO, 0, 1.0, 0);
        big.age = 30.0;
        big.size = 1.0;
        pool.push(big);

        let mut rng = ParticleRng::seeded(5);
        let report = step(&mut pool, &TargetList::empty(), &settings, Vec2::splat(10.0), &mut rng);
        assert_eq!(report.removed, 2);
        assert_eq!(pool.len(), 2);
        assert!(pool.iter().all(|p| !p.is_expired(settings.max_age)));
    }
}
