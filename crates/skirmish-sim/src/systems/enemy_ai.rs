//! Enemy AI system. Bridges the AI crate's pure FSM to the ECS.
//!
//! Reads one enemy's counters and velocity plus the player's position,
//! evaluates the FSM and writes the result back. Fires a projectile when the
//! FSM says so.

use hecs::Entity;

use skirmish_ai::fsm::{self, EnemyContext};
use skirmish_core::components::{EnemyState, Velocity};
use skirmish_core::events::GameEvent;
use skirmish_core::types::{Position, Vector2};

use crate::world::WorldState;
use crate::world_setup;

/// Per-tick velocity hook for a ranged enemy.
pub fn update(state: &mut WorldState, enemy: Entity, events: &mut Vec<GameEvent>) {
    let (Some(enemy_state), Some(velocity), Some(bounds)) = (
        state.enemy_state(enemy),
        state.velocity(enemy),
        state.bounds(enemy),
    ) else {
        return;
    };

    let to_player = state
        .player()
        .and_then(|player| state.bounds(player))
        .map(|player_bounds| bounds.center_offset(&player_bounds));

    let update = fsm::evaluate(&EnemyContext {
        state: enemy_state,
        velocity,
        to_player,
    });

    if let Ok((es, v)) = state
        .ecs_mut()
        .query_one_mut::<(&mut EnemyState, &mut Velocity)>(enemy)
    {
        *es = update.state;
        v.0 = update.velocity;
    }

    if let Some(aim) = update.fired {
        // Muzzle sits a quarter of the width into the enemy on both axes.
        let muzzle = Position::new(
            (bounds.x + bounds.width / 4) as f64,
            (bounds.y + bounds.width / 4) as f64,
        );
        fire(state, enemy, muzzle, aim, events);
    }
}

fn fire(
    state: &mut WorldState,
    enemy: Entity,
    muzzle: Position,
    aim: Vector2,
    events: &mut Vec<GameEvent>,
) {
    let velocity = fsm::projectile_velocity(aim);
    let projectile = world_setup::spawn_projectile(state, muzzle, velocity);

    if let (Some(enemy), Some(projectile)) = (state.id_of(enemy), state.id_of(projectile)) {
        log::debug!("enemy {:?} fired projectile {:?}", enemy, projectile);
        events.push(GameEvent::ProjectileFired {
            enemy,
            projectile,
            velocity,
        });
    }
}
