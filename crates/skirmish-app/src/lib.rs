//! SKIRMISH headless runtime.
//!
//! Wires the simulation to its three periodic actors (tick clock, render loop,
//! round countdown) and to the input adapter.

pub mod clock;
pub mod config;
pub mod countdown;
pub mod error;
pub mod input;
pub mod logging;
pub mod render;
pub mod round;

pub use error::RuntimeError;
pub use skirmish_core as core;
