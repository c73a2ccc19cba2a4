//! Wave spawning: places a batch of ranged enemies in the play area.
//!
//! Positions are drawn uniformly from the spawn square and rejected until
//! they keep `SPAWN_SEPARATION` from every enemy already placed in the batch.

use hecs::Entity;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::constants::*;
use skirmish_core::types::Position;

use crate::world::WorldState;
use crate::world_setup;

/// Spawn `count` ranged enemies and return their handles.
pub fn spawn_wave(state: &mut WorldState, rng: &mut ChaCha8Rng, count: usize) -> Vec<Entity> {
    place_wave(rng, count)
        .into_iter()
        .map(|position| world_setup::spawn_ranged_enemy(state, rng, position))
        .collect()
}

/// Choose `count` spawn positions with pairwise separation.
///
/// Each position gets at most `SPAWN_MAX_ATTEMPTS` draws. If none of them is
/// far enough from the rest of the batch, the draw with the most clearance
/// is used.
pub fn place_wave(rng: &mut ChaCha8Rng, count: usize) -> Vec<Position> {
    let mut placed: Vec<Position> = Vec::with_capacity(count);

    for _ in 0..count {
        let mut best = random_position(rng);
        let mut best_clearance = clearance(&best, &placed);
        let mut attempts = 1;

        while best_clearance < SPAWN_SEPARATION && attempts < SPAWN_MAX_ATTEMPTS {
            let candidate = random_position(rng);
            let candidate_clearance = clearance(&candidate, &placed);
            if candidate_clearance > best_clearance {
                best = candidate;
                best_clearance = candidate_clearance;
            }
            attempts += 1;
        }

        if best_clearance < SPAWN_SEPARATION {
            log::warn!(
                "no spawn point {} units clear after {} attempts, using one {:.1} units clear",
                SPAWN_SEPARATION,
                attempts,
                best_clearance
            );
        }
        placed.push(best);
    }

    placed
}

fn random_position(rng: &mut ChaCha8Rng) -> Position {
    Position::new(
        SPAWN_MIN + SPAWN_EXTENT * rng.gen::<f64>(),
        SPAWN_MIN + SPAWN_EXTENT * rng.gen::<f64>(),
    )
}

/// Distance to the nearest already-placed position (infinite when none).
fn clearance(candidate: &Position, placed: &[Position]) -> f64 {
    placed
        .iter()
        .map(|p| candidate.distance_to(p))
        .fold(f64::INFINITY, f64::min)
}
