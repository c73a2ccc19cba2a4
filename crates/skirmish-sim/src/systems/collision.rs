//! AABB collision detection and per-pair resolution.
//!
//! Resolution mutates velocities and health in place but never removes
//! entities; it reports what happened and the tick driver applies removals.

use hecs::Entity;

use skirmish_core::components::{EnemyState, PlayerState, Velocity};
use skirmish_core::constants::{MELEE_DAMAGE, PROJECTILE_DAMAGE};
use skirmish_core::enums::{EntityKind, HitOutcome};
use skirmish_core::types::{Intersection, Vector2};

use crate::world::WorldState;

/// What resolving one (mover, other) pair did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionOutcome {
    /// Pass-through, no effect.
    None,
    /// The mover's velocity was pushed back off a wall.
    Blocked,
    /// The mover is a projectile that must be removed.
    ProjectileSpent,
    /// A projectile (the mover) struck the player; the projectile must be removed.
    PlayerHit { outcome: HitOutcome, health: i32 },
    /// The mover is an enemy standing in a melee zone.
    EnemyHit { outcome: HitOutcome, health: f64 },
}

/// Overlap of the two entities' rendered bounding boxes, if any.
pub fn detect(state: &WorldState, mover: Entity, other: Entity) -> Option<Intersection> {
    let a = state.bounds(mover)?;
    let b = state.bounds(other)?;
    a.intersection(&b)
}

/// Apply the effect of `mover` overlapping `other` by `overlap`.
pub fn resolve(
    state: &mut WorldState,
    mover: Entity,
    other: Entity,
    overlap: Intersection,
) -> CollisionOutcome {
    let (Some(mover_kind), Some(other_kind)) = (state.kind(mover), state.kind(other)) else {
        return CollisionOutcome::None;
    };
    let world = state.ecs();

    match (mover_kind, other_kind) {
        (EntityKind::Projectile, EntityKind::Wall) => CollisionOutcome::ProjectileSpent,
        (_, EntityKind::Wall) => match world.get::<&mut Velocity>(mover) {
            Ok(mut velocity) => {
                push_back(&mut velocity.0, overlap);
                CollisionOutcome::Blocked
            }
            Err(_) => CollisionOutcome::None,
        },
        (EntityKind::Projectile, EntityKind::Player) => match world.get::<&mut PlayerState>(other) {
            Ok(mut player) => CollisionOutcome::PlayerHit {
                outcome: player.hit(PROJECTILE_DAMAGE),
                health: player.health,
            },
            Err(_) => CollisionOutcome::ProjectileSpent,
        },
        (EntityKind::RangedEnemy, EntityKind::MeleeZone) => {
            match world.get::<&mut EnemyState>(mover) {
                Ok(mut enemy) => CollisionOutcome::EnemyHit {
                    outcome: enemy.hit(MELEE_DAMAGE),
                    health: enemy.health,
                },
                Err(_) => CollisionOutcome::None,
            }
        }
        _ => CollisionOutcome::None,
    }
}

/// Velocity correction against a wall along the axis of minimum penetration.
///
/// The raw penetration is subtracted from a positive component and added to a
/// negative one, with no clamping; the result may overshoot past zero. A
/// component that is already zero is left alone.
pub fn push_back(velocity: &mut Vector2, overlap: Intersection) {
    let (component, depth) = if overlap.width < overlap.height {
        (&mut velocity.x, overlap.width as f64)
    } else {
        (&mut velocity.y, overlap.height as f64)
    };
    if *component > 0.0 {
        *component -= depth;
    } else if *component < 0.0 {
        *component += depth;
    }
}
