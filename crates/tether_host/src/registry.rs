// registry.rs - Script component descriptor -> native storage
//
// Scripts ask "does entity E have component T" by sending T's descriptor.
// Each component kind registers a presence check under its descriptor id at
// startup, so the host never enumerates script types itself.

use std::collections::HashMap;

use tether_core::ecs::{Component, ComponentId, ComponentType, EntityId};
use tether_script::{
    CircleRendererComponent, Rigidbody2DComponent, TextComponent, TransformComponent,
};

use crate::components::{CircleRenderer, Rigidbody2D, Text, Transform};
use crate::error::HostError;
use crate::scene::Scene;

/// Presence check for one native component type.
pub type PresenceCheck = fn(&hecs::World, hecs::Entity) -> bool;

struct Registration {
    ty: ComponentType,
    native: &'static str,
    check: PresenceCheck,
}

#[derive(Default)]
pub struct ComponentRegistry {
    entries: HashMap<ComponentId, Registration>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in wrapper mapped to its native type.
    pub fn with_builtin_components() -> Result<Self, HostError> {
        let mut registry = Self::new();
        registry.register_components()?;
        Ok(registry)
    }

    /// Map every built-in wrapper to its native component type.
    pub fn register_components(&mut self) -> Result<(), HostError> {
        self.register::<TransformComponent, Transform>()?;
        self.register::<CircleRendererComponent, CircleRenderer>()?;
        self.register::<Rigidbody2DComponent, Rigidbody2D>()?;
        self.register::<TextComponent, Text>()?;
        Ok(())
    }

    /// Answer presence checks for script kind `S` by looking for native `N`.
    ///
    /// The descriptor is first claimed in the global descriptor registry, so
    /// a kind reusing another kind's id or name is rejected instead of
    /// aliasing its storage. Registering the same pair twice is a no-op.
    pub fn register<S: Component, N: hecs::Component>(&mut self) -> Result<(), HostError> {
        let ty = S::component_type();
        let native = std::any::type_name::<N>();
        S::ensure_registered()?;

        if let Some(existing) = self.entries.get(&ty.id) {
            if existing.ty != ty {
                return Err(HostError::DescriptorMismatch {
                    existing: existing.ty,
                    requested: ty,
                });
            }
            if existing.native != native {
                return Err(HostError::NativeConflict {
                    component: ty,
                    existing: existing.native,
                    requested: native,
                });
            }
            return Ok(());
        }

        self.entries.insert(
            ty.id,
            Registration {
                ty,
                native,
                check: has_native::<N>,
            },
        );
        tracing::debug!(component = %ty, native, "registered presence check");
        Ok(())
    }

    pub fn is_registered(&self, id: ComponentId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether entity `id` has the native component behind descriptor `ty`.
    pub fn has_component(&self, scene: &Scene, id: EntityId, ty: ComponentType) -> Result<bool, HostError> {
        let registration = self
            .entries
            .get(&ty.id)
            .ok_or(HostError::UnregisteredComponent(ty))?;
        if registration.ty != ty {
            return Err(HostError::DescriptorMismatch {
                existing: registration.ty,
                requested: ty,
            });
        }
        let entity = scene.resolve(id)?;
        Ok((registration.check)(scene.world(), entity))
    }
}

fn has_native<N: hecs::Component>(world: &hecs::World, entity: hecs::Entity) -> bool {
    world.entity(entity).is_ok_and(|entity| entity.has::<N>())
}
