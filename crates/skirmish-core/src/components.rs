//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in the sim systems and the AI
//! crate; the only methods here are damage bookkeeping that every caller must
//! agree on.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{Behavior, HitOutcome};
use crate::types::{EntityId, Vector2};

/// Current velocity of a moving entity (units per tick).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vector2);

/// Held directional keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionalInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// An in-progress melee attack and the zone it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeleeAttack {
    pub zone: EntityId,
    pub ticks_remaining: u32,
}

/// Player-only state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub health: i32,
    pub input: DirectionalInput,
    /// Set by input, consumed at the next tick boundary.
    pub melee_requested: bool,
    pub melee: Option<MeleeAttack>,
}

/// Ranged enemy state: health plus the AI counters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyState {
    pub health: f64,
    /// Ticks since the last shot.
    pub cooldown_tick: u32,
    /// Ticks left before firing; zero when not freezing.
    pub freeze_tick: u32,
    /// Length of the current (or last) freeze, for display.
    pub freeze_length: u32,
    /// Ticks left in the invulnerability window.
    pub invulnerable_ticks: u32,
    pub behavior: Behavior,
    /// Display color, irrelevant to logic.
    pub tint: [u8; 3],
}

/// Marks an entity as a melee zone and names the player that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeleeZone {
    pub owner: EntityId,
}

impl DirectionalInput {
    /// Per-tick acceleration implied by the held keys.
    pub fn acceleration(&self) -> Vector2 {
        let axis = |neg: bool, pos: bool| (pos as i32 - neg as i32) as f64 * PLAYER_ACCELERATION;
        Vector2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            health: PLAYER_MAX_HEALTH,
            input: DirectionalInput::default(),
            melee_requested: false,
            melee: None,
        }
    }
}

impl PlayerState {
    pub fn is_attacking(&self) -> bool {
        self.melee.is_some()
    }

    /// Apply projectile damage. Health never goes below zero.
    pub fn hit(&mut self, damage: i32) -> HitOutcome {
        self.health = (self.health - damage).max(0);
        if self.health == 0 {
            HitOutcome::Killed
        } else {
            HitOutcome::Damaged
        }
    }
}

impl EnemyState {
    pub fn new(tint: [u8; 3]) -> Self {
        Self {
            health: ENEMY_MAX_HEALTH,
            cooldown_tick: 0,
            freeze_tick: 0,
            freeze_length: 1,
            invulnerable_ticks: 0,
            behavior: Behavior::default(),
            tint,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    /// Apply melee damage, honoring the invulnerability window.
    pub fn hit(&mut self, damage: f64) -> HitOutcome {
        if self.is_invulnerable() {
            return HitOutcome::Ignored;
        }
        self.health = (self.health - damage).max(0.0);
        if self.health <= 0.0 {
            HitOutcome::Killed
        } else {
            self.invulnerable_ticks = ENEMY_I_FRAMES;
            HitOutcome::Damaged
        }
    }

    /// Fraction of the current freeze still to go (1.0 when idle).
    pub fn freeze_progress(&self) -> f64 {
        if self.freeze_tick == 0 {
            1.0
        } else {
            self.freeze_tick as f64 / self.freeze_length.max(1) as f64
        }
    }
}
