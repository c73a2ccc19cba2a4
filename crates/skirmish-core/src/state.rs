//! Game state snapshot: the complete visible state handed to render consumers.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Bounds, EntityId, Position, SimTime, Vector2};

/// Point-in-time copy of the whole game, safe to hold across ticks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Zero-based index of the current wave.
    pub round: u32,
    /// Seconds left in the between-rounds countdown, if one is running.
    pub countdown: Option<u32>,
    pub player_health: Option<i32>,
    pub enemies_remaining: u32,
    /// Entities in registry insertion order.
    pub entities: Vec<EntityView>,
}

/// One entity as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Position,
    /// Box on the rendered grid.
    pub bounds: Bounds,
    pub velocity: Option<Vector2>,
    pub detail: EntityDetail,
}

/// Kind-specific display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntityDetail {
    None,
    Player {
        health: i32,
        attacking: bool,
    },
    RangedEnemy {
        health: f64,
        behavior: Behavior,
        invulnerable: bool,
        /// 1.0 when not freezing, shrinking toward 0 as the shot approaches.
        freeze_progress: f64,
        tint: [u8; 3],
    },
}

impl GameStateSnapshot {
    /// Entities of the given kind, in registry order.
    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &EntityView> {
        self.entities.iter().filter(move |e| e.kind == kind)
    }
}
