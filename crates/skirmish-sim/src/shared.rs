//! The single lock around the engine.
//!
//! Every registry mutation, every tick and every snapshot goes through the
//! same mutex, so readers see either the pre-tick or the post-tick state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hecs::DynamicBundle;

use skirmish_core::commands::PlayerCommand;
use skirmish_core::state::GameStateSnapshot;
use skirmish_core::types::EntityId;

use crate::engine::{SimulationEngine, TickReport};

/// Cloneable handle to the engine shared by the clock, render and round threads.
#[derive(Clone)]
pub struct SharedWorld {
    inner: Arc<Mutex<SimulationEngine>>,
}

impl SharedWorld {
    pub fn new(engine: SimulationEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Lock the engine. A tick that panicked leaves the engine usable, so a
    /// poisoned lock is recovered rather than propagated.
    pub fn lock(&self) -> MutexGuard<'_, SimulationEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with the engine locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut SimulationEngine) -> R) -> R {
        f(&mut self.lock())
    }

    /// Run one full tick under the lock.
    pub fn tick(&self) -> TickReport {
        self.lock().tick()
    }

    /// Consistent point-in-time copy of the game.
    pub fn snapshot(&self) -> GameStateSnapshot {
        self.lock().snapshot()
    }

    /// Stage a command for the next tick.
    pub fn queue_command(&self, command: PlayerCommand) {
        self.lock().queue_command(command);
    }

    /// Register an entity and return its id.
    pub fn add(&self, components: impl DynamicBundle) -> Option<EntityId> {
        let mut engine = self.lock();
        let world = engine.world_mut();
        let entity = world.add(components);
        world.id_of(entity)
    }

    /// Remove an entity by id. Removing an absent entity is a no-op.
    pub fn remove(&self, id: EntityId) -> bool {
        let mut engine = self.lock();
        let world = engine.world_mut();
        match world.resolve(id) {
            Some(entity) => world.remove(entity),
            None => false,
        }
    }
}
