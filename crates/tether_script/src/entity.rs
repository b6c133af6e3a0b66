//! Entity handle
//!
//! An [`Entity`] is just an id. It owns nothing in the engine, so copying or
//! dropping one has no engine-side effect.

use std::any::Any;
use std::rc::Rc;

use tether_core::ecs::EntityId;
use tether_core::math::Vec3;

use crate::components::{BindToken, ScriptComponent};
use crate::marshal;

/// Handle to an engine entity.
///
/// `Entity::default()` carries [`EntityId::NULL`]. It is what failed lookups
/// return and must not be used as the target of component calls.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Entity {
    id: EntityId,
}

impl Entity {
    /// Wrap an id handed out by the engine.
    pub const fn from_id(id: EntityId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// False for the "no entity" sentinel.
    pub fn is_valid(&self) -> bool {
        !self.id.is_null()
    }

    /// Shortcut for the transform translation, without resolving the
    /// component first. The entity must have a transform.
    pub fn translation(&self) -> Vec3 {
        marshal::fetch(|calls, out| calls.transform_component_get_translation(self.id, out))
    }

    pub fn set_translation(&self, translation: Vec3) {
        marshal::call(|calls| calls.transform_component_set_translation(self.id, &translation));
    }

    /// Ask the engine whether this entity currently has component `T`.
    pub fn has_component<T: ScriptComponent>(&self) -> bool {
        marshal::call(|calls| calls.entity_has_component(self.id, T::component_type()))
    }

    /// A fresh wrapper for `T`, or `None` if the entity lacks it.
    ///
    /// Wrappers are never cached; calling this twice yields two independent
    /// views onto the same engine state.
    pub fn get_component<T: ScriptComponent>(&self) -> Option<T> {
        if self.has_component::<T>() {
            Some(T::bind(*self, BindToken::new()))
        } else {
            None
        }
    }

    /// Look up a live entity by name.
    ///
    /// Returns the "no entity" sentinel when nothing matches; check with
    /// [`Entity::is_valid`].
    pub fn find_entity_by_name(name: &str) -> Entity {
        let id = marshal::call(|calls| calls.entity_find_entity_by_name(name));
        Entity::from_id(id)
    }

    /// This entity's script object, viewed as `T`.
    ///
    /// `None` when the entity has no script instance or its instance is of
    /// another type.
    pub fn as_script<T: Any>(&self) -> Option<Rc<T>> {
        let instance = marshal::call(|calls| calls.get_script_instance(self.id))?;
        instance.downcast::<T>().ok()
    }
}

impl From<EntityId> for Entity {
    fn from(id: EntityId) -> Self {
        Entity::from_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Rigidbody2DComponent, TransformComponent};
    use crate::ffi::CallName;
    use crate::glue;
    use crate::testing::RecordingCalls;
    use std::cell::Cell;
    use tether_core::ecs::Component;

    struct Player {
        health: Cell<i32>,
    }

    struct Camera;

    fn setup() -> (Rc<RecordingCalls>, glue::GlueGuard) {
        let calls = Rc::new(RecordingCalls::new());
        let guard = glue::install(calls.clone());
        (calls, guard)
    }

    #[test]
    fn test_default_entity_is_sentinel() {
        let entity = Entity::default();
        assert_eq!(entity.id(), EntityId::NULL);
        assert!(!entity.is_valid());
    }

    #[test]
    fn test_get_component_follows_has_component() {
        let (calls, _guard) = setup();
        let id = EntityId::from_raw(42);
        calls.spawn(id, "Player", &[TransformComponent::component_type()]);

        let entity = Entity::from_id(id);
        assert!(entity.has_component::<TransformComponent>());
        assert!(entity.get_component::<TransformComponent>().is_some());
        assert!(!entity.has_component::<Rigidbody2DComponent>());
        assert!(entity.get_component::<Rigidbody2DComponent>().is_none());
    }

    #[test]
    fn test_has_component_on_sentinel_is_tolerated() {
        let (_calls, _guard) = setup();
        let entity = Entity::default();
        assert!(!entity.has_component::<TransformComponent>());
        assert!(entity.get_component::<TransformComponent>().is_none());
    }

    #[test]
    fn test_find_entity_by_name() {
        let (calls, _guard) = setup();
        calls.spawn(EntityId::from_raw(5), "Camera", &[]);

        assert_eq!(Entity::find_entity_by_name("Camera").id(), EntityId::from_raw(5));

        let missing = Entity::find_entity_by_name("Nobody");
        assert_eq!(missing.id(), EntityId::NULL);
        assert!(!missing.is_valid());
    }

    #[test]
    fn test_as_script_downcasts() {
        let (calls, _guard) = setup();
        let id = EntityId::from_raw(3);
        calls.spawn(id, "Player", &[]);
        calls.attach_script(id, Rc::new(Player { health: Cell::new(100) }));

        let entity = Entity::from_id(id);
        let player = entity.as_script::<Player>().expect("player script");
        player.health.set(90);

        // Both views point at the same engine-owned instance.
        let again = entity.as_script::<Player>().unwrap();
        assert_eq!(again.health.get(), 90);

        assert!(entity.as_script::<Camera>().is_none());
    }

    #[test]
    fn test_as_script_without_instance() {
        let (calls, _guard) = setup();
        calls.spawn(EntityId::from_raw(8), "Prop", &[]);
        assert!(Entity::from_id(EntityId::from_raw(8)).as_script::<Player>().is_none());
    }

    #[test]
    fn test_translation_shortcut_uses_transform_entries() {
        let (calls, _guard) = setup();
        let id = EntityId::from_raw(11);
        calls.spawn(id, "Mover", &[TransformComponent::component_type()]);

        let entity = Entity::from_id(id);
        entity.set_translation(Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(entity.translation(), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(
            calls.calls(),
            vec![CallName::TransformSetTranslation, CallName::TransformGetTranslation]
        );
    }
}
