//! # Vortex Simulation Engine
//!
//! CPU particle-field simulation: a fixed population split into exclusively
//! owned shards, advanced once per frame by a fork/join worker pool, and a
//! frame driver that ties input, update, rendering and pacing together.

pub mod config;
pub mod driver;
pub mod error;
pub mod pacing;
pub mod population;
pub mod scheduler;
pub mod simulation;

pub use config::*;
pub use driver::*;
pub use error::*;
pub use pacing::*;
pub use population::*;
pub use scheduler::*;
pub use simulation::*;
