//! Error types for simulation startup.
//!
//! Nothing fails once the frame loop runs; every variant here is raised
//! before particles are allocated.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    /// A startup option is out of range.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The platform reported no usable hardware threads.
    #[error("no hardware parallelism available")]
    ZeroParallelism,

    /// The worker pool could not be started.
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type SimulationResult<T> = Result<T, SimulationError>;
