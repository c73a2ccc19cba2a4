//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Entity kind. Every entity carries exactly one as a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Wall,
    Player,
    RangedEnemy,
    Projectile,
    MeleeZone,
}

impl EntityKind {
    /// Whether the tick driver integrates this kind's velocity.
    pub fn is_moving(self) -> bool {
        matches!(
            self,
            EntityKind::Player | EntityKind::RangedEnemy | EntityKind::Projectile
        )
    }
}

/// Ranged enemy behavior, as last decided by its state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    /// Between the retreat and approach thresholds, not accelerating.
    #[default]
    Cruising,
    /// Closing in on a distant player.
    Approaching,
    /// Backing away from a player that is too close.
    Retreating,
    /// Holding still before firing.
    Freezing,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Arena and wave being populated.
    #[default]
    Spawning,
    /// Between-rounds countdown; no ticks run.
    Countdown,
    Active,
    /// Every enemy of the current wave is gone; waiting for the next round.
    WaveCleared,
    /// The player was destroyed.
    GameOver,
}

/// Result of applying damage to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitOutcome {
    /// Damage was ignored (invulnerability window).
    Ignored,
    /// Damage applied, entity survives.
    Damaged,
    /// Health reached zero; the entity must be removed.
    Killed,
}
