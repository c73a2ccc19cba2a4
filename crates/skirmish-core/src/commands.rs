//! Player commands sent from the input adapter to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Replace the held directional keys.
    SetDirectionalInput {
        up: bool,
        down: bool,
        left: bool,
        right: bool,
    },
    /// Start a melee attack. Ignored while one is already in progress.
    MeleeAttack,
}
