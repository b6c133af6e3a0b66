// component.rs - Runtime component descriptors
//
// Components are identified across the boundary by u32 IDs, not Rust TypeIds.
// The engine keys its presence checks by these IDs, so new script-side
// component kinds never require the engine to enumerate script types.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};
use thiserror::Error;

pub type ComponentId = u32;

/// Runtime descriptor for a component kind.
///
/// This is what crosses the boundary on a presence check: the engine looks
/// up `id` in its own table and never interprets `name` beyond diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComponentType {
    pub id: ComponentId,
    pub name: &'static str,
}

impl ComponentType {
    pub const fn new(id: ComponentId, name: &'static str) -> Self {
        Self { id, name }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("component id {id} is already registered as '{existing}', cannot register '{requested}'")]
    IdConflict {
        id: ComponentId,
        existing: &'static str,
        requested: &'static str,
    },

    #[error("component '{name}' is already registered with id {existing}, cannot re-register with id {requested}")]
    NameConflict {
        name: &'static str,
        existing: ComponentId,
        requested: ComponentId,
    },
}

/// Global registry of every component kind known to script code.
static REGISTRY: Lazy<RwLock<HashMap<ComponentId, ComponentType>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Register a component descriptor.
///
/// Re-registering an identical descriptor is a no-op. Reusing an id or a
/// name for a different kind is rejected, since the engine would then
/// answer presence checks for the wrong storage.
pub fn register_component(ty: ComponentType) -> Result<(), RegistryError> {
    let mut map = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);

    if let Some(prev) = map.get(&ty.id) {
        if prev.name == ty.name {
            return Ok(());
        }
        return Err(RegistryError::IdConflict {
            id: ty.id,
            existing: prev.name,
            requested: ty.name,
        });
    }

    if let Some(prev) = map.values().find(|prev| prev.name == ty.name) {
        return Err(RegistryError::NameConflict {
            name: ty.name,
            existing: prev.id,
            requested: ty.id,
        });
    }

    tracing::debug!(component = %ty, "registered component descriptor");
    map.insert(ty.id, ty);
    Ok(())
}

/// A component kind addressable from script code.
///
/// `ID` must be stable across builds: it is the key the engine uses to find
/// the matching native storage.
pub trait Component: 'static + Sized + Send + Sync {
    /// Globally unique component ID.
    const ID: ComponentId;

    /// Human-readable name for diagnostics.
    const NAME: &'static str;

    /// Runtime descriptor for this kind.
    fn component_type() -> ComponentType {
        ComponentType::new(Self::ID, Self::NAME)
    }

    /// Register this kind's descriptor with the global registry.
    /// Should be called once during startup.
    fn ensure_registered() -> Result<(), RegistryError> {
        register_component(Self::component_type())
    }
}

/// Helper macro to implement the Component trait.
///
/// # Example
/// ```ignore
/// #[derive(Clone, Copy)]
/// struct SpriteRendererComponent { entity: Entity }
///
/// define_component!(SpriteRendererComponent, 5, "SpriteRendererComponent");
/// ```
#[macro_export]
macro_rules! define_component {
    ($ty:ty, $id:expr, $name:expr) => {
        impl $crate::ecs::Component for $ty {
            const ID: $crate::ecs::ComponentId = $id;
            const NAME: &'static str = $name;
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Health;
    define_component!(Health, 9001, "Health");

    struct Armor;
    define_component!(Armor, 9002, "Armor");

    fn lookup(id: ComponentId) -> Option<ComponentType> {
        REGISTRY
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .copied()
    }

    #[test]
    fn test_register_is_idempotent() {
        Health::ensure_registered().unwrap();
        Health::ensure_registered().unwrap();

        assert_eq!(lookup(9001), Some(ComponentType::new(9001, "Health")));
    }

    #[test]
    fn test_id_conflict_is_rejected() {
        Armor::ensure_registered().unwrap();

        let err = register_component(ComponentType::new(9002, "Shield")).unwrap_err();
        assert_eq!(
            err,
            RegistryError::IdConflict {
                id: 9002,
                existing: "Armor",
                requested: "Shield",
            }
        );
        assert_eq!(lookup(9002).map(|ty| ty.name), Some("Armor"));
    }

    #[test]
    fn test_name_conflict_is_rejected() {
        register_component(ComponentType::new(9010, "Mana")).unwrap();

        let err = register_component(ComponentType::new(9011, "Mana")).unwrap_err();
        assert!(matches!(err, RegistryError::NameConflict { existing: 9010, .. }));
        assert_eq!(lookup(9011), None);
    }

    #[test]
    fn test_reusing_an_id_for_another_kind_fails() {
        struct Sprite;
        define_component!(Sprite, 9001, "Sprite");

        Health::ensure_registered().unwrap();
        assert!(matches!(
            Sprite::ensure_registered(),
            Err(RegistryError::IdConflict { id: 9001, existing: "Health", .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(ComponentType::new(3, "Rigidbody2DComponent").to_string(), "Rigidbody2DComponent#3");
    }
}
