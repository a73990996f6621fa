//! Startup configuration
//!
//! Defaults reproduce the classic setup: a 1920×1000 window, 120 FPS target and
//! about one million particles divided evenly across every hardware thread.

use std::num::NonZeroUsize;
use std::time::Duration;

use crate::error::{SimulationError, SimulationResult};
use crate::population::ShardLayout;

pub const DEFAULT_SCREEN_WIDTH: u32 = 1920;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 1000;
pub const DEFAULT_TARGET_FPS: u32 = 120;
pub const DEFAULT_TOTAL_PARTICLES: usize = 1_000_000;
pub const DEFAULT_SEED: u64 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    pub screen_width: u32, // pixels
    pub screen_height: u32, // pixels
    pub target_fps: u32, // frame pacing target
    pub wrap: bool, // draw positions modulo the screen size
    pub worker_count: Option<usize>, // `None` = hardware parallelism
    pub total_particles: usize, // split evenly (floor) across workers
    pub seed: u64, // initial scatter seed
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            wrap: false,
            worker_count: None,
            total_particles: DEFAULT_TOTAL_PARTICLES,
            seed: DEFAULT_SEED,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> SimulationResult<()> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(SimulationError::Configuration(format!(
                "screen size must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.target_fps == 0 {
            return Err(SimulationError::Configuration(
                "target FPS must be positive".to_string(),
            ));
        }
        if self.worker_count == Some(0) {
            return Err(SimulationError::Configuration(
                "worker count must be positive".to_string(),
            ));
        }
        if self.total_particles == 0 {
            return Err(SimulationError::Configuration(
                "particle count must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Target wall-clock duration of one frame
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.target_fps.max(1)
    }

    /// Resolve the worker count and split the particle target across it
    pub fn shard_layout(&self) -> SimulationResult<ShardLayout> {
        let worker_count = match self.worker_count {
            Some(count) => count,
            None => hardware_parallelism()?,
        };
        ShardLayout::new(self.total_particles, worker_count)
    }
}

/// Number of hardware threads, failing when the platform reports none
pub fn hardware_parallelism() -> SimulationResult<usize> {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .map_err(|_| SimulationError::ZeroParallelism)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.screen_width, 1920);
        assert_eq!(config.screen_height, 1000);
        assert_eq!(config.target_fps, 120);
        assert!(!config.wrap);
    }

    #[test]
    fn zero_width_is_rejected() {
        let config = SimulationConfig {
            screen_width: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimulationError::Configuration(_))
        ));
    }

    #[test]
    fn zero_workers_is_rejected() {
        let config = SimulationConfig {
            worker_count: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_workers_split_the_target() {
        let config = SimulationConfig {
            worker_count: Some(3),
            ..Default::default()
        };
        let layout = config.shard_layout().unwrap();
        assert_eq!(layout.worker_count, 3);
        assert_eq!(layout.particles_per_shard, 333_333);
        assert_eq!(layout.total(), 999_999);
    }

    #[test]
    fn frame_interval_matches_fps() {
        let config = SimulationConfig {
            target_fps: 100,
            ..Default::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_millis(10));
    }
}
