// scene.rs - Entity storage for the reference host
//
// Components live in a hecs world. Scripts never see hecs handles; they
// address entities by the stable EntityId mapped here.

use std::collections::BTreeMap;

use hecs::{Ref, RefMut, World};
use tether_core::ecs::EntityId;
use tether_core::math::Vec2;

use crate::components::{Rigidbody2D, Tag, Transform};
use crate::error::HostError;

/// The live scene: every entity the host knows about.
pub struct Scene {
    world: World,
    entities: BTreeMap<EntityId, hecs::Entity>,
    next_entity_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            entities: BTreeMap::new(),
            next_entity_id: 1,
        }
    }

    /// Create a named entity with a freshly allocated id.
    pub fn create_entity(&mut self, name: &str) -> EntityId {
        let mut id = EntityId::from_raw(self.next_entity_id);
        while self.entities.contains_key(&id) {
            self.next_entity_id += 1;
            id = EntityId::from_raw(self.next_entity_id);
        }
        self.next_entity_id += 1;
        self.insert_entity(id, name);
        id
    }

    /// Create a named entity with a caller-chosen id, e.g. when loading a
    /// saved scene.
    pub fn create_entity_with_id(&mut self, id: EntityId, name: &str) -> Result<EntityId, HostError> {
        if id.is_null() {
            return Err(HostError::NullEntity);
        }
        if self.entities.contains_key(&id) {
            return Err(HostError::DuplicateEntity(id));
        }
        self.insert_entity(id, name);
        Ok(id)
    }

    fn insert_entity(&mut self, id: EntityId, name: &str) {
        let entity = self.world.spawn((Tag {
            name: name.to_string(),
        },));
        self.entities.insert(id, entity);
        tracing::debug!(entity = %id, name, "created entity");
    }

    pub fn destroy_entity(&mut self, id: EntityId) -> Result<(), HostError> {
        let entity = self.entities.remove(&id).ok_or(HostError::NoSuchEntity(id))?;
        self.world
            .despawn(entity)
            .map_err(|_| HostError::NoSuchEntity(id))?;
        tracing::debug!(entity = %id, "destroyed entity");
        Ok(())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Ids of all live entities, ascending.
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    /// First entity (lowest id) with the given name.
    pub fn find_entity_by_name(&self, name: &str) -> Option<EntityId> {
        self.entities.iter().find_map(|(&id, &entity)| {
            let tag = self.world.get::<&Tag>(entity).ok()?;
            (tag.name == name).then_some(id)
        })
    }

    pub fn name(&self, id: EntityId) -> Result<String, HostError> {
        Ok(self.component::<Tag>(id)?.name.clone())
    }

    pub fn add_component<C: hecs::Component>(&mut self, id: EntityId, component: C) -> Result<(), HostError> {
        let entity = self.resolve(id)?;
        self.world
            .insert_one(entity, component)
            .map_err(|_| HostError::NoSuchEntity(id))
    }

    pub fn remove_component<C: hecs::Component>(&mut self, id: EntityId) -> Result<C, HostError> {
        let entity = self.resolve(id)?;
        self.world
            .remove_one::<C>(entity)
            .map_err(|_| HostError::MissingComponent {
                entity: id,
                component: short_type_name::<C>(),
            })
    }

    pub fn has_component<C: hecs::Component>(&self, id: EntityId) -> bool {
        self.resolve(id)
            .ok()
            .and_then(|entity| self.world.entity(entity).ok())
            .is_some_and(|entity| entity.has::<C>())
    }

    pub fn component<C: hecs::Component>(&self, id: EntityId) -> Result<Ref<'_, C>, HostError> {
        let entity = self.resolve(id)?;
        self.world
            .get::<&C>(entity)
            .map_err(|_| HostError::MissingComponent {
                entity: id,
                component: short_type_name::<C>(),
            })
    }

    /// Mutable access to a component. Borrows are checked at runtime, so
    /// two different component types may be held at once.
    pub fn component_mut<C: hecs::Component>(&self, id: EntityId) -> Result<RefMut<'_, C>, HostError> {
        let entity = self.resolve(id)?;
        self.world
            .get::<&mut C>(entity)
            .map_err(|_| HostError::MissingComponent {
                entity: id,
                component: short_type_name::<C>(),
            })
    }

    /// Advance awake dynamic bodies by `dt` seconds.
    ///
    /// Integrates velocity into the transform and keeps each body's center
    /// in sync with its translation.
    pub fn step_physics(&mut self, dt: f32) {
        for (&id, &entity) in &self.entities {
            let (Ok(mut transform), Ok(mut rigidbody)) = (
                self.world.get::<&mut Transform>(entity),
                self.world.get::<&mut Rigidbody2D>(entity),
            ) else {
                continue;
            };

            let body = &mut rigidbody.body;
            if body.inv_mass() > 0.0 && body.awake {
                transform.translation.x += body.linear_velocity.x * dt;
                transform.translation.y += body.linear_velocity.y * dt;
                transform.rotation.z += body.angular_velocity * dt;
            }
            body.center = Vec2::new(transform.translation.x, transform.translation.y);
            tracing::trace!(entity = %id, velocity = ?body.linear_velocity, "stepped body");
        }
    }

    pub(crate) fn resolve(&self, id: EntityId) -> Result<hecs::Entity, HostError> {
        if id.is_null() {
            return Err(HostError::NullEntity);
        }
        self.entities
            .get(&id)
            .copied()
            .ok_or(HostError::NoSuchEntity(id))
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

fn short_type_name<C>() -> &'static str {
    let full = std::any::type_name::<C>();
    full.rsplit("::").next().unwrap_or(full)
}
