//! Particle state and the swap-remove pool that owns it

use glam::Vec2;

/// Below this size a particle is drawn as nothing and may be evicted
pub const MIN_VISIBLE_SIZE: f32 = 0.5;

/// One point of the swarm. Positions are in extraction-surface pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub age: f32,
    pub age_per_frame: f32,
    pub size: f32,
    /// Index into the current target list. May dangle after a rebuild
    /// until the next physics step repairs it.
    pub target: usize,
}

impl Particle {
    /// A freshly spawned particle: at rest apart from a tiny initial drift
    /// derived from its insertion index.
    pub fn spawn(pos: Vec2, insertion_index: usize, age_per_frame: f32, target: usize) -> Self {
        let i = insertion_index as f32;
        Self {
            pos,
            vel: Vec2::new(i.cos() * 0.01, i.sin() * 0.01),
            acc: Vec2::ZERO,
            age: 0.0,
            age_per_frame,
            size: 0.0,
            target,
        }
    }

    /// True once the particle has outlived `max_age` and shrunk out of sight
    pub fn is_expired(&self, max_age: f32) -> bool {
        self.age > max_age && self.size < MIN_VISIBLE_SIZE
    }

    pub fn is_visible(&self) -> bool {
        self.size > 0.0
    }
}

/// Growable particle storage with O(1) removal.
///
/// Removal swaps the last particle into the freed slot, so iteration order
/// is not stable across evictions.
#[derive(Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Append a particle, returning its insertion index
    pub fn push(&mut self, particle: Particle) -> usize {
        self.particles.push(particle);
        self.particles.len() - 1
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Remove every expired particle. Returns how many were evicted.
    pub fn evict_expired(&mut self, max_age: f32) -> usize {
        let before = self.particles.len();
        let mut i = 0;
        while i < self.particles.len() {
            if self.particles[i].is_expired(max_age) {
                self.particles.swap_remove(i);
                // Don't increment i, the swapped-in particle needs checking
            } else {
                i += 1;
            }
        }
        before - self.particles.len()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }
}
