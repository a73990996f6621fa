//! Simulation state: the population plus the per-frame control inputs

use glam::Vec2;
use vortex_physics::VortexKernel;

use crate::config::SimulationConfig;
use crate::error::SimulationResult;
use crate::population::Population;
use crate::scheduler::{DispatchReport, FrameInputs, ShardScheduler};

pub struct Simulation {
    population: Population,
    scheduler: ShardScheduler,
    kernel: VortexKernel,

    attractor: Vec2,
    turbo: bool,
    paused: bool,

    frames_updated: u64,
}

impl Simulation {
    /// Validate `config`, start the worker pool and scatter the population.
    /// The attractor starts at the centre of the screen.
    pub fn new(config: &SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;
        let layout = config.shard_layout()?;

        log::info!("target FPS: {}", config.target_fps);
        log::info!("threads: {}", layout.worker_count);
        log::info!("total particles: {}", layout.total());

        let scheduler = ShardScheduler::new(layout.worker_count)?;
        let population = Population::scatter(
            layout,
            config.screen_width,
            config.screen_height,
            config.seed,
        )?;
        log::info!(
            "✓ Scattered {} shards of {} particles",
            layout.worker_count,
            layout.particles_per_shard
        );

        let attractor = Vec2::new(
            config.screen_width as f32 / 2.0,
            config.screen_height as f32 / 2.0,
        );

        Ok(Self::from_parts(
            population,
            scheduler,
            VortexKernel::default(),
            attractor,
        ))
    }

    pub fn from_parts(
        population: Population,
        scheduler: ShardScheduler,
        kernel: VortexKernel,
        attractor: Vec2,
    ) -> Self {
        Self {
            population,
            scheduler,
            kernel,
            attractor,
            turbo: false,
            paused: false,
            frames_updated: 0,
        }
    }

    /// Run one frame update, or nothing while paused
    pub fn step(&mut self) -> Option<DispatchReport> {
        if self.paused {
            return None;
        }

        let inputs = self.frame_inputs();
        let report = self
            .scheduler
            .update_frame(&mut self.population, self.kernel, inputs);
        self.frames_updated += 1;
        Some(report)
    }

    /// Snapshot handed to the worker tasks
    pub fn frame_inputs(&self) -> FrameInputs {
        FrameInputs {
            attractor: self.attractor,
            turbo: self.turbo,
        }
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn scheduler(&self) -> &ShardScheduler {
        &self.scheduler
    }

    pub fn attractor(&self) -> Vec2 {
        self.attractor
    }

    pub fn set_attractor(&mut self, attractor: Vec2) {
        self.attractor = attractor;
    }

    pub fn turbo(&self) -> bool {
        self.turbo
    }

    pub fn set_turbo(&mut self, turbo: bool) {
        self.turbo = turbo;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "paused" } else { "resumed" });
    }

    /// Number of frames in which the population was actually advanced
    pub fn frames_updated(&self) -> u64 {
        self.frames_updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            screen_width: 800,
            screen_height: 600,
            worker_count: Some(2),
            total_particles: 200,
            ..Default::default()
        }
    }

    #[test]
    fn starts_centred_and_running() {
        let sim = Simulation::new(&small_config()).unwrap();
        assert_eq!(sim.attractor(), Vec2::new(400.0, 300.0));
        assert!(!sim.turbo());
        assert!(!sim.is_paused());
        assert_eq!(sim.population().len(), 200);
        assert_eq!(sim.scheduler().worker_count(), 2);
    }

    #[test]
    fn paused_step_is_a_no_op() {
        let mut sim = Simulation::new(&small_config()).unwrap();
        sim.step();
        let before = sim.population().particles().to_vec();

        sim.toggle_pause();
        for _ in 0..10 {
            assert!(sim.step().is_none());
        }
        assert_eq!(sim.population().particles(), before.as_slice());
        assert_eq!(sim.frames_updated(), 1);

        sim.toggle_pause();
        assert!(sim.step().is_some());
        assert_ne!(sim.population().particles(), before.as_slice());
    }

    #[test]
    fn invalid_config_builds_nothing() {
        let config = SimulationConfig {
            screen_height: 0,
            ..small_config()
        };
        assert!(Simulation::new(&config).is_err());
    }
}
