//! Per-tick driver: velocity hooks, collisions and integration for every mover.

use hecs::Entity;

use skirmish_core::enums::{EntityKind, HitOutcome};
use skirmish_core::events::GameEvent;

use super::collision::{self, CollisionOutcome};
use super::{enemy_ai, kinematics, player};
use crate::world::WorldState;

/// Run one tick over the entities live at its start, in insertion order.
///
/// Entities spawned during the tick are not visited until the next one.
/// Entities removed earlier in the tick are skipped, and a mover stops
/// interacting as soon as it is removed.
pub fn run(state: &mut WorldState, events: &mut Vec<GameEvent>) {
    let order = state.entities();

    for &mover in &order {
        let Some(kind) = state.kind(mover) else {
            continue;
        };
        if !kind.is_moving() {
            continue;
        }

        match kind {
            EntityKind::Player => player::update(state, mover, events),
            EntityKind::RangedEnemy => enemy_ai::update(state, mover, events),
            _ => {}
        }

        for &other in &order {
            if other == mover {
                continue;
            }
            if !state.contains(mover) {
                break;
            }
            if !state.contains(other) {
                continue;
            }
            if let Some(overlap) = collision::detect(state, mover, other) {
                let outcome = collision::resolve(state, mover, other, overlap);
                apply(state, mover, other, outcome, events);
            }
        }

        if state.contains(mover) {
            kinematics::integrate(state, mover);
            if kind == EntityKind::Player {
                kinematics::track_melee_zone(state, mover);
            }
        }
    }
}

/// Carry out the removals a collision outcome calls for.
fn apply(
    state: &mut WorldState,
    mover: Entity,
    other: Entity,
    outcome: CollisionOutcome,
    events: &mut Vec<GameEvent>,
) {
    match outcome {
        CollisionOutcome::None | CollisionOutcome::Blocked => {}
        CollisionOutcome::ProjectileSpent => {
            state.remove(mover);
        }
        CollisionOutcome::PlayerHit { outcome, health } => {
            state.remove(mover);
            log::debug!("player hit, health {}", health);
            events.push(GameEvent::PlayerHit { health });
            if outcome == HitOutcome::Killed {
                player::despawn(state, other);
                events.push(GameEvent::PlayerDefeated);
            }
        }
        CollisionOutcome::EnemyHit { outcome, health } => {
            let Some(enemy) = state.id_of(mover) else {
                return;
            };
            match outcome {
                HitOutcome::Ignored => {}
                HitOutcome::Damaged => {
                    log::debug!("enemy {:?} hit, health {:.1}", enemy, health);
                    events.push(GameEvent::EnemyHit { enemy, health });
                }
                HitOutcome::Killed => {
                    state.remove(mover);
                    log::debug!("enemy {:?} destroyed", enemy);
                    events.push(GameEvent::EnemyHit { enemy, health });
                    events.push(GameEvent::EnemyDestroyed { enemy });
                }
            }
        }
    }
}
