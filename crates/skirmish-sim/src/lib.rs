//! Simulation engine for SKIRMISH.
//!
//! Owns the entity registry, runs the per-tick update (player input, enemy
//! AI, collisions, integration) and produces snapshots for renderers.

pub mod engine;
pub mod shared;
pub mod systems;
pub mod world;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine, TickOutcome, TickReport};
pub use shared::SharedWorld;
pub use skirmish_core as core;
pub use world::WorldState;

#[cfg(test)]
mod tests;
