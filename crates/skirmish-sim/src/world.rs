//! Authoritative entity registry.
//!
//! `WorldState` owns the hecs world plus the insertion order of its entities.
//! Every entity carries an `EntityId`, an `EntityKind`, a `Position` and a
//! `Size`; movers also carry a `Velocity`. Not synchronized on its own; the
//! engine lives behind [`SharedWorld`](crate::shared::SharedWorld).

use std::collections::HashMap;

use hecs::{DynamicBundle, Entity, EntityBuilder, World};

use skirmish_core::components::{EnemyState, PlayerState, Velocity};
use skirmish_core::enums::EntityKind;
use skirmish_core::state::{EntityDetail, EntityView};
use skirmish_core::types::{Bounds, EntityId, Position, Size, Vector2};

/// Entity registry with stable ids and insertion-ordered iteration.
#[derive(Default)]
pub struct WorldState {
    world: World,
    order: Vec<Entity>,
    ids: HashMap<EntityId, Entity>,
    next_id: u64,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new entity built from `components`. A fresh `EntityId` is attached.
    pub fn add(&mut self, components: impl DynamicBundle) -> Entity {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let mut builder = EntityBuilder::new();
        builder.add_bundle(components).add(id);
        let entity = self.world.spawn(builder.build());

        self.order.push(entity);
        self.ids.insert(id, entity);
        entity
    }

    /// Remove an entity. Returns `false` (and does nothing) if it is already gone.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let Some(id) = self.id_of(entity) else {
            return false;
        };
        let _ = self.world.despawn(entity);
        self.ids.remove(&id);
        self.order.retain(|e| *e != entity);
        true
    }

    /// Drop every entity. Ids keep counting up so they are never reused.
    pub fn clear(&mut self) {
        self.world.clear();
        self.order.clear();
        self.ids.clear();
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Live entity handles in insertion order. The copy is independent of later mutation.
    pub fn entities(&self) -> Vec<Entity> {
        self.order.clone()
    }

    /// Consistent copy of every entity, in insertion order.
    pub fn snapshot(&self) -> Vec<EntityView> {
        self.order.iter().filter_map(|&e| self.view(e)).collect()
    }

    pub fn id_of(&self, entity: Entity) -> Option<EntityId> {
        self.world.get::<&EntityId>(entity).ok().map(|id| *id)
    }

    pub fn resolve(&self, id: EntityId) -> Option<Entity> {
        self.ids.get(&id).copied()
    }

    pub fn kind(&self, entity: Entity) -> Option<EntityKind> {
        self.world.get::<&EntityKind>(entity).ok().map(|k| *k)
    }

    pub fn position(&self, entity: Entity) -> Option<Position> {
        self.world.get::<&Position>(entity).ok().map(|p| *p)
    }

    pub fn velocity(&self, entity: Entity) -> Option<Vector2> {
        self.world.get::<&Velocity>(entity).ok().map(|v| v.0)
    }

    /// Bounding box on the rendered grid.
    pub fn bounds(&self, entity: Entity) -> Option<Bounds> {
        let entity_ref = self.world.entity(entity).ok()?;
        let position = entity_ref.get::<&Position>()?;
        let size = entity_ref.get::<&Size>()?;
        Some(Bounds::at(&position, *size))
    }

    pub fn player_state(&self, entity: Entity) -> Option<PlayerState> {
        self.world.get::<&PlayerState>(entity).ok().map(|p| (*p).clone())
    }

    pub fn enemy_state(&self, entity: Entity) -> Option<EnemyState> {
        self.world.get::<&EnemyState>(entity).ok().map(|e| *e)
    }

    /// The player entity, if it is still alive.
    pub fn player(&self) -> Option<Entity> {
        self.world
            .query::<&PlayerState>()
            .iter()
            .next()
            .map(|(entity, _)| entity)
    }

    /// Number of live entities of `kind`.
    pub fn count(&self, kind: EntityKind) -> usize {
        self.world
            .query::<&EntityKind>()
            .iter()
            .filter(|(_, k)| **k == kind)
            .count()
    }

    /// Live entities of `kind`, in insertion order.
    pub fn of_kind(&self, kind: EntityKind) -> Vec<Entity> {
        self.order
            .iter()
            .copied()
            .filter(|&e| self.kind(e) == Some(kind))
            .collect()
    }

    pub(crate) fn ecs(&self) -> &World {
        &self.world
    }

    pub(crate) fn ecs_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn view(&self, entity: Entity) -> Option<EntityView> {
        let entity_ref = self.world.entity(entity).ok()?;
        let id = *entity_ref.get::<&EntityId>()?;
        let kind = *entity_ref.get::<&EntityKind>()?;
        let position = *entity_ref.get::<&Position>()?;
        let size = *entity_ref.get::<&Size>()?;
        let velocity = entity_ref.get::<&Velocity>().map(|v| v.0);

        let detail = if let Some(player) = entity_ref.get::<&PlayerState>() {
            EntityDetail::Player {
                health: player.health,
                attacking: player.is_attacking(),
            }
        } else if let Some(enemy) = entity_ref.get::<&EnemyState>() {
            EntityDetail::RangedEnemy {
                health: enemy.health,
                behavior: enemy.behavior,
                invulnerable: enemy.is_invulnerable(),
                freeze_progress: enemy.freeze_progress(),
                tint: enemy.tint,
            }
        } else {
            EntityDetail::None
        };

        Some(EntityView {
            id,
            kind,
            position,
            bounds: Bounds::at(&position, size),
            velocity,
            detail,
        })
    }
}
