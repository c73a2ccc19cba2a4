//! Snapshot system: builds a GameStateSnapshot from the world.

use skirmish_core::enums::{EntityKind, GamePhase};
use skirmish_core::state::GameStateSnapshot;
use skirmish_core::types::SimTime;

use crate::world::WorldState;

/// Copy the whole visible state. Called under the engine lock, so the copy
/// never observes a half-applied tick.
pub fn build_snapshot(
    state: &WorldState,
    time: &SimTime,
    phase: GamePhase,
    round: u32,
    countdown: Option<u32>,
) -> GameStateSnapshot {
    let player_health = state
        .player()
        .and_then(|player| state.player_state(player))
        .map(|ps| ps.health);

    GameStateSnapshot {
        time: *time,
        phase,
        round,
        countdown,
        player_health,
        enemies_remaining: state.count(EntityKind::RangedEnemy) as u32,
        entities: state.snapshot(),
    }
}
