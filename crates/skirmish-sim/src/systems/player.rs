//! Player input accumulation and melee attack lifecycle.

use hecs::Entity;

use skirmish_core::components::{MeleeAttack, PlayerState, Velocity};
use skirmish_core::constants::*;
use skirmish_core::events::GameEvent;
use skirmish_core::types::{EntityId, Vector2};

use crate::world::WorldState;
use crate::world_setup;

/// Result of one player velocity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStep {
    Moved,
    /// The melee attack ran out; its zone must be removed.
    MeleeEnded { zone: EntityId },
}

/// Consume a staged melee trigger, spawning the zone if no attack is running.
pub fn start_requested_melee(state: &mut WorldState, events: &mut Vec<GameEvent>) {
    let Some(player) = state.player() else {
        return;
    };
    let (Some(owner), Some(position)) = (state.id_of(player), state.position(player)) else {
        return;
    };

    let needs_zone = match state.ecs().get::<&mut PlayerState>(player) {
        Ok(mut ps) => std::mem::take(&mut ps.melee_requested) && ps.melee.is_none(),
        Err(_) => false,
    };
    if !needs_zone {
        return;
    }

    let zone = world_setup::spawn_melee_zone(state, owner, &position);
    let Some(zone_id) = state.id_of(zone) else {
        return;
    };
    if let Ok(mut ps) = state.ecs().get::<&mut PlayerState>(player) {
        ps.melee = Some(MeleeAttack {
            zone: zone_id,
            ticks_remaining: MELEE_HIT_LENGTH,
        });
    }
    log::debug!("melee started, zone {:?}", zone_id);
    events.push(GameEvent::MeleeStarted { zone: zone_id });
}

/// Per-tick velocity hook for the player.
pub fn update(state: &mut WorldState, player: Entity, events: &mut Vec<GameEvent>) {
    let result = state
        .ecs_mut()
        .query_one_mut::<(&mut PlayerState, &mut Velocity)>(player)
        .map(|(ps, velocity)| step(ps, &mut velocity.0));

    if let Ok(PlayerStep::MeleeEnded { zone }) = result {
        if let Some(entity) = state.resolve(zone) {
            state.remove(entity);
        }
        log::debug!("melee ended, zone {:?}", zone);
        events.push(GameEvent::MeleeEnded { zone });
    }
}

/// Accumulate held input into `velocity`, honoring the melee speed cap, then
/// apply friction.
pub fn step(ps: &mut PlayerState, velocity: &mut Vector2) -> PlayerStep {
    let mut result = PlayerStep::Moved;

    match ps.melee.as_mut() {
        Some(attack) if attack.ticks_remaining > 0 => {
            attack.ticks_remaining -= 1;
            *velocity += ps.input.acceleration();
            velocity.clamp_magnitude(PLAYER_REDUCED_MAX_SPEED);
        }
        Some(attack) => {
            result = PlayerStep::MeleeEnded { zone: attack.zone };
            ps.melee = None;
        }
        None => {
            *velocity += ps.input.acceleration();
            velocity.clamp_magnitude(PLAYER_MAX_SPEED);
        }
    }

    velocity.apply_friction(PLAYER_FRICTION);
    result
}

/// Remove the player together with its melee zone, if one is live.
pub fn despawn(state: &mut WorldState, player: Entity) {
    let zone = state
        .player_state(player)
        .and_then(|ps| ps.melee)
        .and_then(|attack| state.resolve(attack.zone));
    if let Some(zone) = zone {
        state.remove(zone);
    }
    state.remove(player);
}
