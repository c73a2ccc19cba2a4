//! Systems that operate on the world each tick.
//!
//! Systems are free functions over `&mut WorldState` (or `&WorldState` for
//! read-only). They hold no state of their own.

pub mod collision;
pub mod enemy_ai;
pub mod kinematics;
pub mod player;
pub mod snapshot;
pub mod tick;
pub mod wave_spawner;
