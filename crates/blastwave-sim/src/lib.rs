//! Area-effect damage engine for a tile-based battlefield.
//!
//! Radius blasts with falloff and knockback, line traces, filtered area
//! damage and staged dynamic explosions, driven by a deferred event
//! scheduler. `SimulationEngine` owns the hecs world and tile grid, runs the
//! systems at a fixed tick rate and produces `TickReport`s for the frontend.

pub mod battlefield;
pub mod damage;
pub mod engine;
pub mod error;
pub mod explosion;
pub mod scheduler;
pub mod spatial;
pub mod systems;
pub mod world_setup;

pub use blastwave_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use error::{SimError, SimResult};
