//! Component wrappers
//!
//! Each wrapper is a stateless view: it holds only the owning [`Entity`] and
//! forwards every accessor to exactly one call table entry. Nothing is
//! cached or validated here; the engine is the source of truth, so two reads
//! of the same property may differ if the engine changed it in between.

use tether_core::define_component;
use tether_core::ecs::Component;
use tether_core::math::{Vec2, Vec3, Vec4};
use tether_core::physics::BodyType;

use crate::entity::Entity;
use crate::marshal;

/// Proof that the engine confirmed a component is present.
///
/// Only [`Entity::get_component`] creates one, after a successful presence
/// check, so wrappers cannot be bound any other way:
///
/// ```compile_fail
/// use tether_script::components::BindToken;
/// use tether_script::{Entity, Rigidbody2DComponent, ScriptComponent};
///
/// let body = Rigidbody2DComponent::bind(Entity::default(), BindToken(()));
/// ```
#[derive(Debug)]
pub struct BindToken(());

impl BindToken {
    pub(crate) fn new() -> Self {
        BindToken(())
    }
}

/// A component kind that script code can resolve on an entity.
pub trait ScriptComponent: Component + Copy {
    /// Bind a wrapper to `entity`. Called by the resolver only.
    fn bind(entity: Entity, token: BindToken) -> Self;

    /// The entity this wrapper views.
    fn entity(&self) -> Entity;
}

macro_rules! script_component {
    ($ty:ident, $id:expr) => {
        define_component!($ty, $id, stringify!($ty));

        impl ScriptComponent for $ty {
            fn bind(entity: Entity, _token: BindToken) -> Self {
                Self { entity }
            }

            fn entity(&self) -> Entity {
                self.entity
            }
        }
    };
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TransformComponent {
    entity: Entity,
}

script_component!(TransformComponent, 1);

impl TransformComponent {
    pub fn translation(&self) -> Vec3 {
        let id = self.entity.id();
        marshal::fetch(|calls, out| calls.transform_component_get_translation(id, out))
    }

    pub fn set_translation(&self, translation: Vec3) {
        let id = self.entity.id();
        marshal::call(|calls| calls.transform_component_set_translation(id, &translation));
    }

    /// Euler angles in radians.
    pub fn rotation(&self) -> Vec3 {
        let id = self.entity.id();
        marshal::fetch(|calls, out| calls.transform_component_get_rotation(id, out))
    }

    pub fn set_rotation(&self, rotation: Vec3) {
        let id = self.entity.id();
        marshal::call(|calls| calls.transform_component_set_rotation(id, &rotation));
    }

    pub fn scale(&self) -> Vec3 {
        let id = self.entity.id();
        marshal::fetch(|calls, out| calls.transform_component_get_scale(id, out))
    }

    pub fn set_scale(&self, scale: Vec3) {
        let id = self.entity.id();
        marshal::call(|calls| calls.transform_component_set_scale(id, &scale));
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CircleRendererComponent {
    entity: Entity,
}

script_component!(CircleRendererComponent, 2);

impl CircleRendererComponent {
    pub fn color(&self) -> Vec4 {
        let id = self.entity.id();
        marshal::fetch(|calls, out| calls.circle_renderer_component_get_color(id, out))
    }

    pub fn set_color(&self, color: Vec4) {
        let id = self.entity.id();
        marshal::call(|calls| calls.circle_renderer_component_set_color(id, &color));
    }

    pub fn thickness(&self) -> f32 {
        let id = self.entity.id();
        marshal::call(|calls| calls.circle_renderer_component_get_thickness(id))
    }

    pub fn set_thickness(&self, thickness: f32) {
        let id = self.entity.id();
        marshal::call(|calls| calls.circle_renderer_component_set_thickness(id, thickness));
    }

    pub fn fade(&self) -> f32 {
        let id = self.entity.id();
        marshal::call(|calls| calls.circle_renderer_component_get_fade(id))
    }

    pub fn set_fade(&self, fade: f32) {
        let id = self.entity.id();
        marshal::call(|calls| calls.circle_renderer_component_set_fade(id, fade));
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rigidbody2DComponent {
    entity: Entity,
}

script_component!(Rigidbody2DComponent, 3);

impl Rigidbody2DComponent {
    pub fn linear_velocity(&self) -> Vec2 {
        let id = self.entity.id();
        marshal::fetch(|calls, out| calls.rigidbody2d_component_get_linear_velocity(id, out))
    }

    pub fn body_type(&self) -> BodyType {
        let id = self.entity.id();
        marshal::call(|calls| calls.rigidbody2d_component_get_type(id))
    }

    pub fn set_body_type(&self, body_type: BodyType) {
        let id = self.entity.id();
        marshal::call(|calls| calls.rigidbody2d_component_set_type(id, body_type));
    }

    /// Apply an impulse at `world_position`. Off-center impulses also spin
    /// the body.
    pub fn apply_linear_impulse(&self, impulse: Vec2, world_position: Vec2, wake: bool) {
        let id = self.entity.id();
        marshal::call(|calls| {
            calls.rigidbody2d_component_apply_linear_impulse(id, &impulse, &world_position, wake)
        });
    }

    /// Apply an impulse at the center of mass. Goes through its own engine
    /// entry rather than passing the center as a point.
    pub fn apply_linear_impulse_to_center(&self, impulse: Vec2, wake: bool) {
        let id = self.entity.id();
        marshal::call(|calls| {
            calls.rigidbody2d_component_apply_linear_impulse_to_center(id, &impulse, wake)
        });
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TextComponent {
    entity: Entity,
}

script_component!(TextComponent, 4);

impl TextComponent {
    /// An owned copy of the current text.
    pub fn text(&self) -> String {
        let id = self.entity.id();
        marshal::call(|calls| calls.text_component_get_text(id))
    }

    pub fn set_text(&self, text: &str) {
        let id = self.entity.id();
        marshal::call(|calls| calls.text_component_set_text(id, text));
    }

    pub fn color(&self) -> Vec4 {
        let id = self.entity.id();
        marshal::fetch(|calls, out| calls.text_component_get_color(id, out))
    }

    pub fn set_color(&self, color: Vec4) {
        let id = self.entity.id();
        marshal::call(|calls| calls.text_component_set_color(id, &color));
    }

    pub fn kerning(&self) -> f32 {
        let id = self.entity.id();
        marshal::call(|calls| calls.text_component_get_kerning(id))
    }

    pub fn set_kerning(&self, kerning: f32) {
        let id = self.entity.id();
        marshal::call(|calls| calls.text_component_set_kerning(id, kerning));
    }

    pub fn line_spacing(&self) -> f32 {
        let id = self.entity.id();
        marshal::call(|calls| calls.text_component_get_line_spacing(id))
    }

    pub fn set_line_spacing(&self, line_spacing: f32) {
        let id = self.entity.id();
        marshal::call(|calls| calls.text_component_set_line_spacing(id, line_spacing));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::CallName;
    use crate::glue;
    use crate::testing::{RecordedImpulse, RecordingCalls};
    use std::rc::Rc;
    use tether_core::ecs::EntityId;

    fn spawn_all(calls: &RecordingCalls, raw: u64) -> Entity {
        let id = EntityId::from_raw(raw);
        calls.spawn(
            id,
            "Everything",
            &[
                TransformComponent::component_type(),
                CircleRendererComponent::component_type(),
                Rigidbody2DComponent::component_type(),
                TextComponent::component_type(),
            ],
        );
        Entity::from_id(id)
    }

    #[test]
    fn test_component_ids_are_distinct() {
        let ids = [
            TransformComponent::ID,
            CircleRendererComponent::ID,
            Rigidbody2DComponent::ID,
            TextComponent::ID,
        ];
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(TransformComponent::NAME, "TransformComponent");
    }

    #[test]
    fn test_transform_round_trip() {
        let calls = Rc::new(RecordingCalls::new());
        let _guard = glue::install(calls.clone());
        let entity = spawn_all(&calls, 42);

        let transform = entity.get_component::<TransformComponent>().unwrap();
        transform.set_translation(Vec3::new(1.0, 2.0, 3.0));
        transform.set_rotation(Vec3::new(0.0, 0.5, 0.0));
        transform.set_scale(Vec3::splat(2.0));

        assert_eq!(transform.translation(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.rotation(), Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(transform.scale(), Vec3::splat(2.0));
    }

    #[test]
    fn test_wrappers_do_not_cache() {
        let calls = Rc::new(RecordingCalls::new());
        let _guard = glue::install(calls.clone());
        let entity = spawn_all(&calls, 9);

        let first = entity.get_component::<CircleRendererComponent>().unwrap();
        let second = entity.get_component::<CircleRendererComponent>().unwrap();
        first.set_thickness(0.25);
        assert_eq!(second.thickness(), 0.25);

        // The engine changes state behind the wrapper's back.
        calls.set_circle_thickness(entity.id(), 0.75);
        assert_eq!(first.thickness(), 0.75);
    }

    #[test]
    fn test_each_accessor_hits_one_entry() {
        let calls = Rc::new(RecordingCalls::new());
        let _guard = glue::install(calls.clone());
        let entity = spawn_all(&calls, 1);
        let circle = entity.get_component::<CircleRendererComponent>().unwrap();
        let text = entity.get_component::<TextComponent>().unwrap();
        calls.clear_calls();

        circle.set_color(Vec4::new(1.0, 0.0, 0.0, 1.0));
        let _ = circle.color();
        circle.set_fade(0.1);
        let _ = circle.fade();
        text.set_kerning(0.5);
        let _ = text.kerning();
        text.set_line_spacing(1.5);
        let _ = text.line_spacing();

        assert_eq!(
            calls.calls(),
            vec![
                CallName::CircleRendererSetColor,
                CallName::CircleRendererGetColor,
                CallName::CircleRendererSetFade,
                CallName::CircleRendererGetFade,
                CallName::TextSetKerning,
                CallName::TextGetKerning,
                CallName::TextSetLineSpacing,
                CallName::TextGetLineSpacing,
            ]
        );
    }

    #[test]
    fn test_text_is_an_owned_copy() {
        let calls = Rc::new(RecordingCalls::new());
        let _guard = glue::install(calls.clone());
        let entity = spawn_all(&calls, 2);
        let text = entity.get_component::<TextComponent>().unwrap();

        let mut message = String::from("Hello");
        text.set_text(&message);
        message.push_str(", world");

        let read = text.text();
        assert_eq!(read, "Hello");

        text.set_text("Goodbye");
        assert_eq!(read, "Hello");
        assert_eq!(text.text(), "Goodbye");
    }

    #[test]
    fn test_text_color_is_separate_from_circle_color() {
        let calls = Rc::new(RecordingCalls::new());
        let _guard = glue::install(calls.clone());
        let entity = spawn_all(&calls, 3);
        let circle = entity.get_component::<CircleRendererComponent>().unwrap();
        let text = entity.get_component::<TextComponent>().unwrap();

        circle.set_color(Vec4::new(1.0, 0.0, 0.0, 1.0));
        text.set_color(Vec4::new(0.0, 0.0, 1.0, 1.0));

        assert_eq!(circle.color(), Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(text.color(), Vec4::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_impulse_overloads_use_distinct_entries() {
        let calls = Rc::new(RecordingCalls::new());
        let _guard = glue::install(calls.clone());
        let entity = spawn_all(&calls, 4);
        let body = entity.get_component::<Rigidbody2DComponent>().unwrap();
        calls.clear_calls();

        let impulse = Vec2::new(0.0, 10.0);
        body.apply_linear_impulse(impulse, Vec2::ZERO, true);
        body.apply_linear_impulse_to_center(impulse, true);

        assert_eq!(
            calls.calls(),
            vec![
                CallName::Rigidbody2DApplyLinearImpulse,
                CallName::Rigidbody2DApplyLinearImpulseToCenter,
            ]
        );
        assert_eq!(
            calls.impulses(),
            vec![
                RecordedImpulse {
                    entity: entity.id(),
                    impulse,
                    point: Some(Vec2::ZERO),
                    wake: true,
                },
                RecordedImpulse {
                    entity: entity.id(),
                    impulse,
                    point: None,
                    wake: true,
                },
            ]
        );
    }

    #[test]
    fn test_body_type_and_velocity() {
        let calls = Rc::new(RecordingCalls::new());
        let _guard = glue::install(calls.clone());
        let entity = spawn_all(&calls, 5);
        let body = entity.get_component::<Rigidbody2DComponent>().unwrap();

        assert_eq!(body.body_type(), BodyType::Static);
        body.set_body_type(BodyType::Kinematic);
        assert_eq!(body.body_type(), BodyType::Kinematic);

        calls.set_linear_velocity(entity.id(), Vec2::new(3.0, -1.0));
        assert_eq!(body.linear_velocity(), Vec2::new(3.0, -1.0));
    }

    #[test]
    fn test_wrapper_reports_owner() {
        let calls = Rc::new(RecordingCalls::new());
        let _guard = glue::install(calls.clone());
        let entity = spawn_all(&calls, 6);
        let text = entity.get_component::<TextComponent>().unwrap();
        assert_eq!(text.entity(), entity);
    }
}
