//! Per-frame motion: seek force toward the target, chaos wobble, friction

use crate::particle::{ParticlePool, MIN_VISIBLE_SIZE};
use crate::rand::ParticleRng;
use glam::Vec2;
use inkswarm_core::math::{clamp, distance, remap};
use inkswarm_core::{ParticleSettings, TargetList};

/// Distance (in pixels) at which the seek force saturates
const SEEK_RANGE: f32 = 100.0;

/// Per-frame shrink factor once a particle is past `max_age`
const DECAY: f32 = 0.9;

/// Advance every particle by one frame.
///
/// A particle whose target index no longer exists is given a new random
/// target (when there are any) and skips seeking and distance sizing for
/// this frame.
pub fn integrate(
    pool: &mut ParticlePool,
    targets: &TargetList,
    settings: &ParticleSettings,
    rng: &mut ParticleRng,
) {
    for p in pool.iter_mut() {
        p.age += p.age_per_frame;

        let dist = match targets.get(p.target) {
            Some(target) => {
                let t = target.position();
                let d = distance(t, p.pos);
                let m = remap(d, 0.0, SEEK_RANGE, 0.0, settings.max_acc, true);
                p.acc.x += remap(t.x - p.pos.x, -SEEK_RANGE, SEEK_RANGE, -m, m, true);
                p.acc.y += remap(t.y - p.pos.y, -SEEK_RANGE, SEEK_RANGE, -m, m, true);
                p.acc += Vec2::new(p.age.cos(), p.age.sin()) * settings.chaos_acc;
                Some(d)
            }
            None => {
                if let Some(index) = rng.index(targets.len()) {
                    p.target = index;
                }
                None
            }
        };

        if p.age < settings.max_age {
            if let Some(d) = dist {
                p.size = remap(
                    d,
                    0.0,
                    settings.max_distance_to_target,
                    settings.max_size,
                    0.0,
                    true,
                );
            }
        } else {
            p.size *= DECAY;
        }
        if p.size < MIN_VISIBLE_SIZE {
            p.size = 0.0;
        }

        p.vel += p.acc;
        p.vel *= 1.0 - settings.friction;
        p.vel.x = clamp(p.vel.x, -settings.max_vel, settings.max_vel);
        p.vel.y = clamp(p.vel.y, -settings.max_vel, settings.max_vel);
        p.pos += p.vel;
        p.acc = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use inkswarm_core::Target;

    fn one_target(x: u32, y: u32) -> TargetList {
        TargetList::new(vec![Target::new(x, y)], 1)
    }

    fn pool_with(p: Particle) -> ParticlePool {
        let mut pool = ParticlePool::new();
        pool.push(p);
        pool
    }

    #[test]
    fn particle_on_target_grows_to_max_size() {
        let settings = ParticleSettings {
            chaos_acc: 0.0,
            ..Default::default()
        };
        let mut p = Particle::spawn(Vec2::new(10.0, 10.0), 0, 1.0, 0);
        p.vel = Vec2::ZERO;
        let mut pool = pool_with(p);
        let mut rng = ParticleRng::seeded(1);

        integrate(&mut pool, &one_target(10, 10), &settings, &mut rng);
        let p = &pool.as_slice()[0];
        assert_eq!(p.age, 1.0);
        assert_eq!(p.size, settings.max_size);
        assert_eq!(p.pos, Vec2::new(10.0, 10.0));
        assert_eq!(p.acc, Vec2::ZERO);
    }

    #[test]
    fn seek_force_points_at_target() {
        let settings = ParticleSettings {
            chaos_acc: 0.0,
            friction: 0.0,
            ..Default::default()
        };
        let mut p = Particle::spawn(Vec2::new(0.0, 50.0), 0, 1.0, 0);
        p.vel = Vec2::ZERO;
        let mut pool = pool_with(p);
        let mut rng = ParticleRng::seeded(1);

        integrate(&mut pool, &one_target(50, 50), &settings, &mut rng);
        let p = &pool.as_slice()[0];
        // d = 50 -> m = max_acc / 2; dx = 50 -> acc.x = m / 2
        let expected = settings.max_acc * 0.25;
        assert!((p.vel.x - expected).abs() < 1e-7);
        assert!(p.vel.y.abs() < 1e-7);
        // far from the target the particle stays invisible
        assert_eq!(p.size, 0.0);
    }

    #[test]
    fn velocity_is_clamped() {
        let settings = ParticleSettings {
            max_vel: 2.0,
            friction: 0.0,
            ..Default::default()
        };
        let mut p = Particle::spawn(Vec2::ZERO, 0, 1.0, 0);
        p.vel = Vec2::new(10.0, -10.0);
        let mut pool = pool_with(p);
        let mut rng = ParticleRng::seeded(1);

        for _ in 0..3 {
            integrate(&mut pool, &one_target(500, 0), &settings, &mut rng);
            let p = &pool.as_slice()[0];
            assert!(p.vel.x.abs() <= settings.max_vel);
            assert!(p.vel.y.abs() <= settings.max_vel);
        }
    }

    #[test]
    fn size_decays_geometrically_then_snaps_to_zero() {
        let settings = ParticleSettings {
            max_age: 10.0,
            ..Default::default()
        };
        let mut p = Particle::spawn(Vec2::ZERO, 0, 1.0, 0);
        p.age = 10.0;
        p.size = 2.0;
        let mut pool = pool_with(p);
        let mut rng = ParticleRng::seeded(1);
        let list = one_target(0, 0);

        let mut expected = 2.0f32;
        loop {
            integrate(&mut pool, &list, &settings, &mut rng);
            expected *= 0.9;
            let size = pool.as_slice()[0].size;
            if expected < 0.5 {
                assert_eq!(size, 0.0);
                break;
            }
            assert!((size - expected).abs() < 1e-5);
        }

        assert_eq!(pool.evict_expired(settings.max_age), 1);
        assert!(pool.is_empty());
    }

    #[test]
    fn dangling_target_is_reassigned_without_seeking() {
        let settings = ParticleSettings::default();
        let mut p = Particle::spawn(Vec2::new(5.0, 5.0), 0, 1.0, 40);
        p.vel = Vec2::ZERO;
        p.size = 1.5;
        let mut pool = pool_with(p);
        let mut rng = ParticleRng::seeded(9);
        let list = TargetList::new(vec![Target::new(0, 0), Target::new(1, 1)], 2);

        integrate(&mut pool, &list, &settings, &mut rng);
        let p = &pool.as_slice()[0];
        assert!(p.target < 2);
        // no seek force, no resize
        assert_eq!(p.vel, Vec2::ZERO);
        assert_eq!(p.size, 1.5);
    }

    #[test]
    fn dangling_target_with_no_targets_still_decays() {
        let settings = ParticleSettings {
            max_age: 1.0,
            ..Default::default()
        };
        let mut p = Particle::spawn(Vec2::ZERO, 0, 1.0, 3);
        p.size = 2.0;
        p.age = 5.0;
        let mut pool = pool_with(p);
        let mut rng = ParticleRng::seeded(9);

        integrate(&mut pool, &TargetList::empty(), &settings, &mut rng);
        let p = &pool.as_slice()[0];
        assert_eq!(p.target, 3);
        assert!((p.size - 1.8).abs() < 1e-6);
    }
}
