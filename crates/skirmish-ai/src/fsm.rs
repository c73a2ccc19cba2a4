//! Ranged enemy behavior finite state machine.
//!
//! Pure functions that compute counter updates, velocity adjustments and
//! firing decisions for one enemy per tick, given where the player is.
//! No ECS dependency; operates on plain data.

use skirmish_core::components::EnemyState;
use skirmish_core::constants::*;
use skirmish_core::enums::Behavior;
use skirmish_core::types::Vector2;

/// Input to the enemy FSM for a single entity.
pub struct EnemyContext {
    pub state: EnemyState,
    pub velocity: Vector2,
    /// Vector from the enemy's center to the player's center.
    /// `None` once the player has been removed from the world.
    pub to_player: Option<Vector2>,
}

/// Output from the enemy FSM.
pub struct EnemyUpdate {
    pub state: EnemyState,
    pub velocity: Vector2,
    /// Aim vector (enemy center to player center) when the enemy fired this tick.
    pub fired: Option<Vector2>,
}

/// Evaluate the FSM for one enemy. Returns the updated counters and velocity.
pub fn evaluate(ctx: &EnemyContext) -> EnemyUpdate {
    let mut state = ctx.state;
    let mut velocity = ctx.velocity;
    let mut fired = None;

    state.invulnerable_ticks = state.invulnerable_ticks.saturating_sub(1);
    state.cooldown_tick = state.cooldown_tick.saturating_add(1);

    if state.freeze_tick > 0 {
        state.freeze_tick -= 1;
        if state.freeze_tick == 0 {
            if let Some(aim) = ctx.to_player {
                velocity += recoil(aim);
                fired = Some(aim);
            }
            state.cooldown_tick = 0;
            state.behavior = Behavior::Cruising;
        }
    } else if let Some(to_player) = ctx.to_player {
        velocity += steer(&mut state, to_player);
    } else {
        state.behavior = Behavior::Cruising;
    }

    velocity.apply_friction(ENEMY_FRICTION);
    velocity.clamp_magnitude(ENEMY_MAX_SPEED);

    EnemyUpdate {
        state,
        velocity,
        fired,
    }
}

/// Pick approach / retreat / cruise for a non-freezing enemy, entering a
/// freeze when the cooldown for the current distance band has elapsed.
/// Returns the acceleration to apply this tick.
fn steer(state: &mut EnemyState, to_player: Vector2) -> Vector2 {
    let distance = to_player.magnitude();
    let cooldown = state.cooldown_tick as f64;
    let base = ENEMY_COOLDOWN as f64;

    if distance > ENEMY_RANGE {
        if cooldown >= 1.33 * base {
            freeze(state, ENEMY_COOLDOWN / 3);
            Vector2::ZERO
        } else {
            state.behavior = Behavior::Approaching;
            to_player.with_magnitude(ENEMY_ACCELERATION)
        }
    } else if distance <= ENEMY_TOO_CLOSE {
        if cooldown > 2.33 * base {
            freeze(state, ENEMY_COOLDOWN / 5);
            Vector2::ZERO
        } else {
            state.behavior = Behavior::Retreating;
            to_player.opposite().with_magnitude(ENEMY_ACCELERATION)
        }
    } else if cooldown >= 0.75 * base {
        freeze(state, ENEMY_COOLDOWN / 4);
        Vector2::ZERO
    } else {
        state.behavior = Behavior::Cruising;
        Vector2::ZERO
    }
}

fn freeze(state: &mut EnemyState, ticks: u32) {
    state.freeze_tick = ticks;
    state.freeze_length = ticks;
    state.behavior = Behavior::Freezing;
}

/// Velocity of a projectile fired along `aim`.
pub fn projectile_velocity(aim: Vector2) -> Vector2 {
    aim.with_magnitude(PROJECTILE_SPEED)
}

/// Kick applied to the shooter, opposite the aim.
pub fn recoil(aim: Vector2) -> Vector2 {
    aim.opposite().with_magnitude(ENEMY_RECOIL)
}
