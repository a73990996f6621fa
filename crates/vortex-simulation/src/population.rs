//! Fixed-size particle population split into exclusively owned shards
//!
//! Particles live in one contiguous array. Shard `i` is the range
//! `[i * particles_per_shard, (i + 1) * particles_per_shard)`; shards are handed
//! out through `chunks_exact_mut`, so two shards can never alias. The array is
//! never exposed mutably as a `Vec`, which keeps the population size fixed for
//! the lifetime of the process.

use std::slice::{ChunksExact, ChunksExactMut};

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vortex_physics::Particle;

use crate::error::{SimulationError, SimulationResult};

/// How the population is divided between workers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShardLayout {
    pub worker_count: usize,
    pub particles_per_shard: usize,
}

impl ShardLayout {
    /// Split `total_target` particles evenly (rounding down) across `worker_count` shards
    pub fn new(total_target: usize, worker_count: usize) -> SimulationResult<Self> {
        if worker_count == 0 {
            return Err(SimulationError::ZeroParallelism);
        }

        let particles_per_shard = total_target / worker_count;
        if particles_per_shard == 0 {
            return Err(SimulationError::Configuration(format!(
                "{total_target} particles cannot be split across {worker_count} workers"
            )));
        }

        Ok(Self {
            worker_count,
            particles_per_shard,
        })
    }

    pub fn total(&self) -> usize {
        self.worker_count * self.particles_per_shard
    }
}

pub struct Population {
    particles: Vec<Particle>,
    layout: ShardLayout,
}

impl Population {
    /// Wrap an existing particle array. Its length must equal `layout.total()`.
    pub fn from_particles(
        layout: ShardLayout,
        particles: Vec<Particle>,
    ) -> SimulationResult<Self> {
        if particles.len() != layout.total() {
            return Err(SimulationError::Configuration(format!(
                "expected {} particles for {} shards of {}, got {}",
                layout.total(),
                layout.worker_count,
                layout.particles_per_shard,
                particles.len()
            )));
        }

        Ok(Self { particles, layout })
    }

    /// Scatter particles at rest on integer pixel coordinates in `[0, width) × [0, height)`
    pub fn scatter(
        layout: ShardLayout,
        width: u32,
        height: u32,
        seed: u64,
    ) -> SimulationResult<Self> {
        if width == 0 || height == 0 {
            return Err(SimulationError::Configuration(format!(
                "cannot scatter particles over a {width}x{height} area"
            )));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..layout.total())
            .map(|_| {
                let x = rng.random_range(0..width) as f32;
                let y = rng.random_range(0..height) as f32;
                Particle::at(Vec2::new(x, y))
            })
            .collect();

        Ok(Self { particles, layout })
    }

    pub fn layout(&self) -> ShardLayout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn shard_count(&self) -> usize {
        self.layout.worker_count
    }

    /// All particles, shard after shard
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Read-only view of one worker's range, `None` past the last shard
    pub fn shard(&self, index: usize) -> Option<&[Particle]> {
        self.shards().nth(index)
    }

    pub fn shards(&self) -> ChunksExact<'_, Particle> {
        self.particles.chunks_exact(self.layout.particles_per_shard)
    }

    /// Disjoint mutable shards, one per worker
    pub fn shards_mut(&mut self) -> ChunksExactMut<'_, Particle> {
        self.particles.chunks_exact_mut(self.layout.particles_per_shard)
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.particles.iter().map(|p| p.position)
    }
}
