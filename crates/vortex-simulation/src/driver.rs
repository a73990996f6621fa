//! Frame driver: input → update → draw → pace, once per frame
//!
//! Windowing and drawing are supplied by the caller. Input arrives as an
//! [`InputFrame`] collected over one polling pass, and positions leave through
//! a [`PointSink`] after every worker task has joined.

use std::time::Instant;

use glam::Vec2;
use vortex_physics::Particle;

use crate::config::SimulationConfig;
use crate::error::SimulationResult;
use crate::pacing::{FramePacer, FrameStats};
use crate::simulation::Simulation;

/// Input gathered during one polling pass
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputFrame {
    pub quit: bool,
    /// Button state after the last press or release of the pass
    pub pointer_held: Option<bool>,
    pub pointer_position: Option<Vec2>,
    pub pause_toggle: bool,
}

impl InputFrame {
    pub fn record_quit(&mut self) {
        self.quit = true;
    }

    pub fn record_pointer_down(&mut self) {
        self.pointer_held = Some(true);
    }

    pub fn record_pointer_up(&mut self) {
        self.pointer_held = Some(false);
    }

    /// Latest position wins
    pub fn record_pointer_motion(&mut self, position: Vec2) {
        self.pointer_position = Some(position);
    }

    /// Two presses within one pass cancel out
    pub fn record_pause_toggle(&mut self) {
        self.pause_toggle = !self.pause_toggle;
    }

    /// Hand over the collected input and start a new pass
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

/// Receives the particle array once per frame. Only positions are meant to be read.
pub trait PointSink {
    type Error;

    fn draw_points(&mut self, particles: &[Particle]) -> Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Quit,
}

pub struct FrameDriver {
    simulation: Simulation,
    pacer: FramePacer,
    stats: FrameStats,
}

impl FrameDriver {
    pub fn new(simulation: Simulation, pacer: FramePacer) -> Self {
        Self {
            simulation,
            pacer,
            stats: FrameStats::new(),
        }
    }

    pub fn from_config(config: &SimulationConfig) -> SimulationResult<Self> {
        let simulation = Simulation::new(config)?;
        Ok(Self::new(simulation, FramePacer::new(config.frame_interval())))
    }

    /// Fold one polling pass into the simulation state.
    /// The last pointer transition of the pass decides turbo.
    pub fn apply_input(&mut self, input: &InputFrame) {
        if let Some(held) = input.pointer_held {
            self.simulation.set_turbo(held);
        }
        if let Some(position) = input.pointer_position {
            self.simulation.set_attractor(position);
        }
        if input.pause_toggle {
            self.simulation.toggle_pause();
        }
    }

    /// Run one full frame. Returns `Quit` without updating or drawing when requested.
    pub fn tick<S: PointSink>(
        &mut self,
        input: InputFrame,
        sink: &mut S,
    ) -> Result<FrameStatus, S::Error> {
        let frame_start = Instant::now();

        self.apply_input(&input);
        if input.quit {
            return Ok(FrameStatus::Quit);
        }

        if let Some(report) = self.simulation.step() {
            log::trace!(
                "frame {}: updated {} particles in {} shards ({:.2}ms)",
                self.simulation.frames_updated(),
                report.particles,
                report.shards,
                report.elapsed.as_secs_f32() * 1000.0
            );
        }

        sink.draw_points(self.simulation.population().particles())?;

        let work = frame_start.elapsed();
        log::debug!(
            "render time: {:.2}ms ({:.0} FPS)",
            work.as_secs_f32() * 1000.0,
            1.0 / work.as_secs_f32().max(f32::EPSILON)
        );

        self.stats.tick(frame_start);
        self.pacer.pace(frame_start);

        Ok(FrameStatus::Continue)
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }
}
