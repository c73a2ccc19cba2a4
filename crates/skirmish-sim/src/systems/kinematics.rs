//! Position integration.

use hecs::Entity;

use skirmish_core::components::Velocity;
use skirmish_core::types::Position;

use crate::world::WorldState;
use crate::world_setup::melee_zone_position;

/// `position += velocity`, at full precision.
pub fn integrate(state: &mut WorldState, entity: Entity) {
    if let Ok((position, velocity)) = state
        .ecs_mut()
        .query_one_mut::<(&mut Position, &Velocity)>(entity)
    {
        position.translate(velocity.0);
    }
}

/// Move the player's live melee zone to follow its rendered position.
pub fn track_melee_zone(state: &mut WorldState, player: Entity) {
    let Some(attack) = state.player_state(player).and_then(|ps| ps.melee) else {
        return;
    };
    let (Some(zone), Some(owner_position)) = (state.resolve(attack.zone), state.position(player))
    else {
        return;
    };
    if let Ok(position) = state.ecs_mut().query_one_mut::<&mut Position>(zone) {
        *position = melee_zone_position(&owner_position);
    }
}
