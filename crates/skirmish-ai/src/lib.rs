//! Enemy AI for SKIRMISH.
//!
//! Implements the ranged enemy state machine: approach, retreat, freeze and
//! fire, driven by distance bands and a firing cooldown.

pub mod fsm;

pub use skirmish_core as core;
