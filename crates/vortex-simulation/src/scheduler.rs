//! Fork/join dispatch of one update task per shard
//!
//! Each frame the scheduler spawns one task per shard on a dedicated worker
//! pool and blocks until every task has finished. Tasks receive the attractor
//! and turbo flag by value, and a `&mut` to their own shard only.
//!
//! Per frame: `Idle -> Dispatching -> Running -> Joined -> Idle`.

use std::time::{Duration, Instant};

use glam::Vec2;
use vortex_physics::{Particle, VortexKernel};

use crate::error::SimulationResult;
use crate::population::Population;

/// Frame-constant values shared read-only by every task
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInputs {
    pub attractor: Vec2,
    pub turbo: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SchedulerPhase {
    Idle,
    Dispatching,
    Running,
    Joined,
}

/// Summary of one completed frame update
#[derive(Clone, Copy, Debug)]
pub struct DispatchReport {
    pub shards: usize,
    pub particles: usize,
    pub elapsed: Duration,
}

pub struct ShardScheduler {
    pool: rayon::ThreadPool,
    phase: SchedulerPhase,
}

impl ShardScheduler {
    pub fn new(worker_count: usize) -> SimulationResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|index| format!("vortex-worker-{index}"))
            .build()?;

        log::info!(
            "✓ Worker pool started ({} threads)",
            pool.current_num_threads()
        );

        Ok(Self {
            pool,
            phase: SchedulerPhase::Idle,
        })
    }

    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    #[cfg(test)]
    fn phase(&self) -> SchedulerPhase {
        self.phase
    }

    fn transition(&mut self, next: SchedulerPhase) {
        log::trace!("scheduler {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    /// Advance every shard one frame. Returns once all shard tasks have joined.
    ///
    /// A panic inside a task is re-raised here after the join.
    pub fn update_frame(
        &mut self,
        population: &mut Population,
        kernel: VortexKernel,
        inputs: FrameInputs,
    ) -> DispatchReport {
        let start = Instant::now();
        let shards = population.shard_count();

        self.transition(SchedulerPhase::Dispatching);
        self.transition(SchedulerPhase::Running);

        self.pool.scope(|scope| {
            for shard in population.shards_mut() {
                scope.spawn(move |_| update_shard(shard, kernel, inputs));
            }
        });

        self.transition(SchedulerPhase::Joined);

        let report = DispatchReport {
            shards,
            particles: population.len(),
            elapsed: start.elapsed(),
        };

        self.transition(SchedulerPhase::Idle);
        report
    }
}

/// Body of one shard task
pub fn update_shard(shard: &mut [Particle], kernel: VortexKernel, inputs: FrameInputs) {
    for particle in shard {
        kernel.advance(particle, inputs.attractor, inputs.turbo);
    }
}

/// Single-threaded reference: shards one after another on the calling thread
pub fn update_frame_sequential(
    population: &mut Population,
    kernel: VortexKernel,
    inputs: FrameInputs,
) {
    for shard in population.shards_mut() {
        update_shard(shard, kernel, inputs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::ShardLayout;

    fn inputs() -> FrameInputs {
        FrameInputs {
            attractor: Vec2::new(400.5, 300.5),
            turbo: false,
        }
    }

    #[test]
    fn scheduler_returns_to_idle() {
        let layout = ShardLayout::new(400, 4).unwrap();
        let mut population = Population::scatter(layout, 800, 600, 1).unwrap();
        let mut scheduler = ShardScheduler::new(4).unwrap();

        assert_eq!(scheduler.phase(), SchedulerPhase::Idle);
        let report = scheduler.update_frame(&mut population, VortexKernel::default(), inputs());
        assert_eq!(scheduler.phase(), SchedulerPhase::Idle);
        assert_eq!(report.shards, 4);
        assert_eq!(report.particles, 400);
    }

    #[test]
    fn every_particle_moves_once_per_frame() {
        let layout = ShardLayout::new(8, 2).unwrap();
        let particles = (0..8)
            .map(|i| Particle::at(Vec2::new(i as f32 * 10.0, 0.0)))
            .collect();
        let mut population = Population::from_particles(layout, particles).unwrap();
        let mut expected = population.particles().to_vec();
        let kernel = VortexKernel::default();

        for p in &mut expected {
            kernel.advance(p, inputs().attractor, false);
        }

        let mut scheduler = ShardScheduler::new(2).unwrap();
        scheduler.update_frame(&mut population, kernel, inputs());
        assert_eq!(population.particles(), expected.as_slice());
    }

    #[test]
    fn more_shards_than_threads_still_joins() {
        let layout = ShardLayout::new(1_000, 10).unwrap();
        let mut population = Population::scatter(layout, 800, 600, 5).unwrap();
        let before = population.particles().to_vec();

        let mut scheduler = ShardScheduler::new(2).unwrap();
        let report = scheduler.update_frame(&mut population, VortexKernel::default(), inputs());

        assert_eq!(report.shards, 10);
        assert!(population
            .particles()
            .iter()
            .zip(&before)
            .all(|(after, before)| after.position != before.position));
    }

    #[test]
    fn sequential_reference_matches_update_shard() {
        let layout = ShardLayout::new(6, 3).unwrap();
        let mut population = Population::scatter(layout, 50, 50, 9).unwrap();
        let mut manual = population.particles().to_vec();
        let kernel = VortexKernel::default();

        update_frame_sequential(&mut population, kernel, inputs());
        update_shard(&mut manual, kernel, inputs());
        assert_eq!(population.particles(), manual.as_slice());
    }
}
