//! Events emitted by the simulation for logging and UI feedback.

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Vector2};

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// An enemy fired a projectile.
    ProjectileFired {
        enemy: EntityId,
        projectile: EntityId,
        velocity: Vector2,
    },
    /// A projectile struck the player.
    PlayerHit { health: i32 },
    /// The player's health reached zero.
    PlayerDefeated,
    /// A melee zone damaged an enemy.
    EnemyHit { enemy: EntityId, health: f64 },
    /// An enemy's health reached zero.
    EnemyDestroyed { enemy: EntityId },
    /// The player started a melee attack.
    MeleeStarted { zone: EntityId },
    /// The player's melee zone expired.
    MeleeEnded { zone: EntityId },
    /// No enemy of the current wave remains.
    WaveCleared { round: u32 },
}
