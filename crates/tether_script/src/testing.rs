//! In-memory call table for exercising script code without an engine.
//!
//! [`RecordingCalls`] keeps plain per-entity property slots and records
//! every entry that was invoked, in order. Component entries on an entity
//! that lacks the component panic, so tests catch wrappers that skipped the
//! presence check.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

use tether_core::ecs::{Component, ComponentId, ComponentType, EntityId};
use tether_core::input::KeyCode;
use tether_core::math::{Vec2, Vec3, Vec4};
use tether_core::physics::BodyType;

use crate::components::{
    CircleRendererComponent, Rigidbody2DComponent, TextComponent, TransformComponent,
};
use crate::ffi::{CallName, NativeCalls, ScriptInstance};

/// One impulse as the engine received it.
///
/// `point` is `None` for center impulses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedImpulse {
    pub entity: EntityId,
    pub impulse: Vec2,
    pub point: Option<Vec2>,
    pub wake: bool,
}

#[derive(Default)]
struct MockEntity {
    name: String,
    components: HashSet<ComponentId>,
    translation: Vec3,
    rotation: Vec3,
    scale: Vec3,
    circle_color: Vec4,
    thickness: f32,
    fade: f32,
    linear_velocity: Vec2,
    body_type: BodyType,
    text: String,
    text_color: Vec4,
    kerning: f32,
    line_spacing: f32,
}

#[derive(Default)]
struct State {
    entities: BTreeMap<EntityId, MockEntity>,
    scripts: HashMap<EntityId, ScriptInstance>,
    keys: HashSet<KeyCode>,
    calls: Vec<CallName>,
    impulses: Vec<RecordedImpulse>,
    logged: Vec<(CallName, String)>,
}

#[derive(Default)]
pub struct RecordingCalls {
    state: RefCell<State>,
}

impl RecordingCalls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity carrying the given component kinds.
    pub fn spawn(&self, entity: EntityId, name: &str, components: &[ComponentType]) {
        let record = MockEntity {
            name: name.to_string(),
            components: components.iter().map(|ty| ty.id).collect(),
            scale: Vec3::ONE,
            ..Default::default()
        };
        self.state.borrow_mut().entities.insert(entity, record);
    }

    pub fn despawn(&self, entity: EntityId) {
        let mut state = self.state.borrow_mut();
        state.entities.remove(&entity);
        state.scripts.remove(&entity);
    }

    pub fn attach_script(&self, entity: EntityId, instance: ScriptInstance) {
        self.state.borrow_mut().scripts.insert(entity, instance);
    }

    pub fn press_key(&self, key: KeyCode) {
        self.state.borrow_mut().keys.insert(key);
    }

    pub fn release_key(&self, key: KeyCode) {
        self.state.borrow_mut().keys.remove(&key);
    }

    /// Engine-side write that bypasses the call table.
    pub fn set_circle_thickness(&self, entity: EntityId, thickness: f32) {
        if let Some(record) = self.state.borrow_mut().entities.get_mut(&entity) {
            record.thickness = thickness;
        }
    }

    /// Engine-side write that bypasses the call table.
    pub fn set_linear_velocity(&self, entity: EntityId, velocity: Vec2) {
        if let Some(record) = self.state.borrow_mut().entities.get_mut(&entity) {
            record.linear_velocity = velocity;
        }
    }

    /// Entries invoked so far, oldest first.
    pub fn calls(&self) -> Vec<CallName> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn impulses(&self) -> Vec<RecordedImpulse> {
        self.state.borrow().impulses.clone()
    }

    /// Messages received by the logger entries.
    pub fn logged(&self) -> Vec<(CallName, String)> {
        self.state.borrow().logged.clone()
    }

    fn record(&self, call: CallName) {
        self.state.borrow_mut().calls.push(call);
    }

    fn with_component<R>(
        &self,
        call: CallName,
        entity: EntityId,
        component: ComponentId,
        f: impl FnOnce(&mut MockEntity) -> R,
    ) -> R {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        state.calls.push(call);
        let Some(record) = state.entities.get_mut(&entity) else {
            panic!("{call}: entity {entity} does not exist");
        };
        assert!(
            record.components.contains(&component),
            "{call}: entity {entity} has no component #{component}"
        );
        f(record)
    }

    fn log(&self, call: CallName, message: &str) {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        state.logged.push((call, message.to_string()));
    }
}

const TRANSFORM: ComponentId = TransformComponent::ID;
const CIRCLE: ComponentId = CircleRendererComponent::ID;
const BODY: ComponentId = Rigidbody2DComponent::ID;
const TEXT: ComponentId = TextComponent::ID;

impl NativeCalls for RecordingCalls {
    fn get_script_instance(&self, entity: EntityId) -> Option<ScriptInstance> {
        self.record(CallName::GetScriptInstance);
        self.state.borrow().scripts.get(&entity).cloned()
    }

    fn entity_has_component(&self, entity: EntityId, component: ComponentType) -> bool {
        self.record(CallName::EntityHasComponent);
        self.state
            .borrow()
            .entities
            .get(&entity)
            .is_some_and(|record| record.components.contains(&component.id))
    }

    fn entity_find_entity_by_name(&self, name: &str) -> EntityId {
        self.record(CallName::EntityFindEntityByName);
        self.state
            .borrow()
            .entities
            .iter()
            .find(|(_, record)| record.name == name)
            .map(|(id, _)| *id)
            .unwrap_or(EntityId::NULL)
    }

    fn transform_component_get_translation(&self, entity: EntityId, out_translation: &mut Vec3) {
        self.with_component(CallName::TransformGetTranslation, entity, TRANSFORM, |e| {
            *out_translation = e.translation
        });
    }

    fn transform_component_set_translation(&self, entity: EntityId, translation: &Vec3) {
        self.with_component(CallName::TransformSetTranslation, entity, TRANSFORM, |e| {
            e.translation = *translation
        });
    }

    fn transform_component_get_rotation(&self, entity: EntityId, out_rotation: &mut Vec3) {
        self.with_component(CallName::TransformGetRotation, entity, TRANSFORM, |e| {
            *out_rotation = e.rotation
        });
    }

    fn transform_component_set_rotation(&self, entity: EntityId, rotation: &Vec3) {
        self.with_component(CallName::TransformSetRotation, entity, TRANSFORM, |e| {
            e.rotation = *rotation
        });
    }

    fn transform_component_get_scale(&self, entity: EntityId, out_scale: &mut Vec3) {
        self.with_component(CallName::TransformGetScale, entity, TRANSFORM, |e| {
            *out_scale = e.scale
        });
    }

    fn transform_component_set_scale(&self, entity: EntityId, scale: &Vec3) {
        self.with_component(CallName::TransformSetScale, entity, TRANSFORM, |e| {
            e.scale = *scale
        });
    }

    fn circle_renderer_component_get_color(&self, entity: EntityId, out_color: &mut Vec4) {
        self.with_component(CallName::CircleRendererGetColor, entity, CIRCLE, |e| {
            *out_color = e.circle_color
        });
    }

    fn circle_renderer_component_set_color(&self, entity: EntityId, color: &Vec4) {
        self.with_component(CallName::CircleRendererSetColor, entity, CIRCLE, |e| {
            e.circle_color = *color
        });
    }

    fn circle_renderer_component_get_thickness(&self, entity: EntityId) -> f32 {
        self.with_component(CallName::CircleRendererGetThickness, entity, CIRCLE, |e| {
            e.thickness
        })
    }

    fn circle_renderer_component_set_thickness(&self, entity: EntityId, thickness: f32) {
        self.with_component(CallName::CircleRendererSetThickness, entity, CIRCLE, |e| {
            e.thickness = thickness
        });
    }

    fn circle_renderer_component_get_fade(&self, entity: EntityId) -> f32 {
        self.with_component(CallName::CircleRendererGetFade, entity, CIRCLE, |e| e.fade)
    }

    fn circle_renderer_component_set_fade(&self, entity: EntityId, fade: f32) {
        self.with_component(CallName::CircleRendererSetFade, entity, CIRCLE, |e| {
            e.fade = fade
        });
    }

    fn rigidbody2d_component_apply_linear_impulse(
        &self,
        entity: EntityId,
        impulse: &Vec2,
        point: &Vec2,
        wake: bool,
    ) {
        self.with_component(CallName::Rigidbody2DApplyLinearImpulse, entity, BODY, |_| ());
        self.state.borrow_mut().impulses.push(RecordedImpulse {
            entity,
            impulse: *impulse,
            point: Some(*point),
            wake,
        });
    }

    fn rigidbody2d_component_apply_linear_impulse_to_center(
        &self,
        entity: EntityId,
        impulse: &Vec2,
        wake: bool,
    ) {
        self.with_component(CallName::Rigidbody2DApplyLinearImpulseToCenter, entity, BODY, |_| ());
        self.state.borrow_mut().impulses.push(RecordedImpulse {
            entity,
            impulse: *impulse,
            point: None,
            wake,
        });
    }

    fn rigidbody2d_component_get_linear_velocity(&self, entity: EntityId, out_velocity: &mut Vec2) {
        self.with_component(CallName::Rigidbody2DGetLinearVelocity, entity, BODY, |e| {
            *out_velocity = e.linear_velocity
        });
    }

    fn rigidbody2d_component_get_type(&self, entity: EntityId) -> BodyType {
        self.with_component(CallName::Rigidbody2DGetType, entity, BODY, |e| e.body_type)
    }

    fn rigidbody2d_component_set_type(&self, entity: EntityId, body_type: BodyType) {
        self.with_component(CallName::Rigidbody2DSetType, entity, BODY, |e| {
            e.body_type = body_type
        });
    }

    fn text_component_get_text(&self, entity: EntityId) -> String {
        self.with_component(CallName::TextGetText, entity, TEXT, |e| e.text.clone())
    }

    fn text_component_set_text(&self, entity: EntityId, text: &str) {
        self.with_component(CallName::TextSetText, entity, TEXT, |e| {
            e.text = text.to_string()
        });
    }

    fn text_component_get_color(&self, entity: EntityId, out_color: &mut Vec4) {
        self.with_component(CallName::TextGetColor, entity, TEXT, |e| {
            *out_color = e.text_color
        });
    }

    fn text_component_set_color(&self, entity: EntityId, color: &Vec4) {
        self.with_component(CallName::TextSetColor, entity, TEXT, |e| {
            e.text_color = *color
        });
    }

    fn text_component_get_kerning(&self, entity: EntityId) -> f32 {
        self.with_component(CallName::TextGetKerning, entity, TEXT, |e| e.kerning)
    }

    fn text_component_set_kerning(&self, entity: EntityId, kerning: f32) {
        self.with_component(CallName::TextSetKerning, entity, TEXT, |e| {
            e.kerning = kerning
        });
    }

    fn text_component_get_line_spacing(&self, entity: EntityId) -> f32 {
        self.with_component(CallName::TextGetLineSpacing, entity, TEXT, |e| e.line_spacing)
    }

    fn text_component_set_line_spacing(&self, entity: EntityId, line_spacing: f32) {
        self.with_component(CallName::TextSetLineSpacing, entity, TEXT, |e| {
            e.line_spacing = line_spacing
        });
    }

    fn input_is_key_down(&self, key: KeyCode) -> bool {
        self.record(CallName::InputIsKeyDown);
        self.state.borrow().keys.contains(&key)
    }

    fn logger_trace(&self, message: &str) {
        self.log(CallName::LoggerTrace, message);
    }

    fn logger_info(&self, message: &str) {
        self.log(CallName::LoggerInfo, message);
    }

    fn logger_warn(&self, message: &str) {
        self.log(CallName::LoggerWarn, message);
    }

    fn logger_error(&self, message: &str) {
        self.log(CallName::LoggerError, message);
    }

    fn logger_critical(&self, message: &str) {
        self.log(CallName::LoggerCritical, message);
    }

    fn logger_cout(&self, message: &str) {
        self.log(CallName::LoggerCout, message);
    }
}
