//! Entity spawn factories for setting up the arena.
//!
//! Each factory registers one entity kind with its component bundle.

use hecs::Entity;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::*;
use skirmish_core::constants::*;
use skirmish_core::enums::EntityKind;
use skirmish_core::types::{EntityId, Position, Size, Vector2};

use crate::world::WorldState;

/// Populate an empty arena: the four border walls and the player.
pub fn setup_arena(state: &mut WorldState) -> Entity {
    spawn_walls(state);
    spawn_player(state, Position::new(PLAYER_START.0, PLAYER_START.1))
}

/// Spawn the four walls bordering the arena.
pub fn spawn_walls(state: &mut WorldState) {
    let far = ARENA_SIZE - WALL_THICKNESS;
    let walls = [
        (0, 0, ARENA_SIZE, WALL_THICKNESS),
        (0, far, ARENA_SIZE, WALL_THICKNESS),
        (far, 0, WALL_THICKNESS, ARENA_SIZE),
        (0, 0, WALL_THICKNESS, ARENA_SIZE),
    ];
    for (x, y, width, height) in walls {
        spawn_wall(state, x, y, width, height);
    }
}

pub fn spawn_wall(state: &mut WorldState, x: i32, y: i32, width: i32, height: i32) -> Entity {
    state.add((
        EntityKind::Wall,
        Position::new(x as f64, y as f64),
        Size::new(width, height),
    ))
}

pub fn spawn_player(state: &mut WorldState, position: Position) -> Entity {
    state.add((
        EntityKind::Player,
        position,
        Size::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        Velocity::default(),
        PlayerState::default(),
    ))
}

/// Spawn a ranged enemy with a random blue-ish tint.
pub fn spawn_ranged_enemy(state: &mut WorldState, rng: &mut ChaCha8Rng, position: Position) -> Entity {
    let tint = [
        (66.0 + 89.0 * rng.gen::<f64>()) as u8,
        (66.0 + 124.0 * rng.gen::<f64>()) as u8,
        244,
    ];
    state.add((
        EntityKind::RangedEnemy,
        position,
        Size::new(ENEMY_WIDTH, ENEMY_HEIGHT),
        Velocity::default(),
        EnemyState::new(tint),
    ))
}

/// Spawn a projectile. Its velocity is never modified afterwards.
pub fn spawn_projectile(state: &mut WorldState, position: Position, velocity: Vector2) -> Entity {
    state.add((
        EntityKind::Projectile,
        position,
        Size::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        Velocity(velocity),
    ))
}

/// Spawn a melee zone in front of an owner standing at `owner_position`.
pub fn spawn_melee_zone(state: &mut WorldState, owner: EntityId, owner_position: &Position) -> Entity {
    state.add((
        EntityKind::MeleeZone,
        melee_zone_position(owner_position),
        Size::new(MELEE_ZONE_WIDTH, MELEE_ZONE_HEIGHT),
        MeleeZone { owner },
    ))
}

/// Where a melee zone sits relative to its owner's rendered position.
pub fn melee_zone_position(owner_position: &Position) -> Position {
    let (x, y) = owner_position.rendered();
    Position::new(
        (x + MELEE_ZONE_OFFSET.0) as f64,
        (y + MELEE_ZONE_OFFSET.1) as f64,
    )
}
