//! Call table implementation
//!
//! [`ScriptHost`] answers every [`NativeCalls`] entry against a [`Scene`].
//! Contract violations (unknown entity, missing component) are reported
//! through `tracing` and answered with a default value, or panic when
//! strict boundary checking is enabled. Presence checks never panic: a
//! script may legitimately ask about the "no entity" sentinel.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::io::Write;

use tether_core::ecs::{ComponentType, EntityId};
use tether_core::input::KeyCode;
use tether_core::math::{Vec2, Vec3, Vec4};
use tether_core::physics::BodyType;
use tether_script::{CallName, NativeCalls, ScriptInstance};

use crate::components::{CircleRenderer, Rigidbody2D, Text, Transform};
use crate::error::HostError;
use crate::input::KeyboardState;
use crate::registry::ComponentRegistry;
use crate::scene::Scene;
use crate::settings::HostSettings;

/// Log target for messages sent through the script logger.
pub const SCRIPT_LOG_TARGET: &str = "script";

pub struct ScriptHost {
    scene: RefCell<Scene>,
    registry: ComponentRegistry,
    scripts: RefCell<HashMap<EntityId, ScriptInstance>>,
    keyboard: RefCell<KeyboardState>,
    settings: HostSettings,
}

impl ScriptHost {
    /// A host answering presence checks for every built-in component kind.
    pub fn new(scene: Scene, settings: HostSettings) -> Result<Self, HostError> {
        let registry = ComponentRegistry::with_builtin_components()?;
        Ok(Self::with_registry(scene, registry, settings))
    }

    pub fn with_registry(scene: Scene, registry: ComponentRegistry, settings: HostSettings) -> Self {
        Self {
            scene: RefCell::new(scene),
            registry,
            scripts: RefCell::new(HashMap::new()),
            keyboard: RefCell::new(KeyboardState::default()),
            settings,
        }
    }

    pub fn settings(&self) -> &HostSettings {
        &self.settings
    }

    pub fn scene(&self) -> Ref<'_, Scene> {
        self.scene.borrow()
    }

    /// Mutate the scene between script calls.
    ///
    /// # Panics
    /// Panics if called from inside a call table entry.
    pub fn scene_mut(&self) -> RefMut<'_, Scene> {
        self.scene.borrow_mut()
    }

    pub fn keyboard_mut(&self) -> RefMut<'_, KeyboardState> {
        self.keyboard.borrow_mut()
    }

    /// Register `instance` as the script object of entity `id`.
    pub fn attach_script(&self, id: EntityId, instance: ScriptInstance) -> Result<(), HostError> {
        if id.is_null() {
            return Err(HostError::NullEntity);
        }
        if !self.scene.borrow().contains(id) {
            return Err(HostError::NoSuchEntity(id));
        }
        self.scripts.borrow_mut().insert(id, instance);
        tracing::debug!(entity = %id, "attached script instance");
        Ok(())
    }

    pub fn detach_script(&self, id: EntityId) -> Option<ScriptInstance> {
        self.scripts.borrow_mut().remove(&id)
    }

    /// Advance the physics model by `dt` seconds.
    pub fn step(&self, dt: f32) {
        self.scene.borrow_mut().step_physics(dt);
    }

    fn violation(&self, call: CallName, err: &HostError) {
        if self.settings.boundary.strict {
            panic!("{call}: {err}");
        }
        tracing::error!(call = %call, error = %err, "script boundary contract violated");
    }

    fn read<C: hecs::Component, R: Default>(
        &self,
        call: CallName,
        id: EntityId,
        f: impl FnOnce(&C) -> R,
    ) -> R {
        tracing::trace!(call = %call, entity = %id, "native call");
        let scene = self.scene.borrow();
        let result = scene.component::<C>(id).map(|component| f(&component));
        result.unwrap_or_else(|err| {
            self.violation(call, &err);
            R::default()
        })
    }

    fn write<C: hecs::Component>(&self, call: CallName, id: EntityId, f: impl FnOnce(&mut C)) {
        tracing::trace!(call = %call, entity = %id, "native call");
        let scene = self.scene.borrow();
        let result = scene.component_mut::<C>(id).map(|mut component| f(&mut component));
        if let Err(err) = result {
            self.violation(call, &err);
        }
    }

    fn log_cout(&self, message: &str) {
        if !self.settings.logging.echo_cout {
            return;
        }
        let mut stdout = std::io::stdout().lock();
        if let Err(err) = writeln!(stdout, "{message}") {
            tracing::warn!(error = %err, "failed to write script output");
        }
    }
}

impl NativeCalls for ScriptHost {
    fn get_script_instance(&self, entity: EntityId) -> Option<ScriptInstance> {
        tracing::trace!(call = %CallName::GetScriptInstance, entity = %entity, "native call");
        self.scripts.borrow().get(&entity).cloned()
    }

    fn entity_has_component(&self, entity: EntityId, component: ComponentType) -> bool {
        tracing::trace!(call = %CallName::EntityHasComponent, entity = %entity, component = %component, "native call");
        let scene = self.scene.borrow();
        match self.registry.has_component(&scene, entity, component) {
            Ok(present) => present,
            Err(err) => {
                tracing::warn!(entity = %entity, component = %component, error = %err, "presence check failed");
                false
            }
        }
    }

    fn entity_find_entity_by_name(&self, name: &str) -> EntityId {
        tracing::trace!(call = %CallName::EntityFindEntityByName, name, "native call");
        self.scene
            .borrow()
            .find_entity_by_name(name)
            .unwrap_or(EntityId::NULL)
    }

    fn transform_component_get_translation(&self, entity: EntityId, out_translation: &mut Vec3) {
        *out_translation = self.read(CallName::TransformGetTranslation, entity, |t: &Transform| t.translation);
    }

    fn transform_component_set_translation(&self, entity: EntityId, translation: &Vec3) {
        self.write(CallName::TransformSetTranslation, entity, |t: &mut Transform| {
            t.translation = *translation
        });
    }

    fn transform_component_get_rotation(&self, entity: EntityId, out_rotation: &mut Vec3) {
        *out_rotation = self.read(CallName::TransformGetRotation, entity, |t: &Transform| t.rotation);
    }

    fn transform_component_set_rotation(&self, entity: EntityId, rotation: &Vec3) {
        self.write(CallName::TransformSetRotation, entity, |t: &mut Transform| {
            t.rotation = *rotation
        });
    }

    fn transform_component_get_scale(&self, entity: EntityId, out_scale: &mut Vec3) {
        *out_scale = self.read(CallName::TransformGetScale, entity, |t: &Transform| t.scale);
    }

    fn transform_component_set_scale(&self, entity: EntityId, scale: &Vec3) {
        self.write(CallName::TransformSetScale, entity, |t: &mut Transform| t.scale = *scale);
    }

    fn circle_renderer_component_get_color(&self, entity: EntityId, out_color: &mut Vec4) {
        *out_color = self.read(CallName::CircleRendererGetColor, entity, |c: &CircleRenderer| c.color);
    }

    fn circle_renderer_component_set_color(&self, entity: EntityId, color: &Vec4) {
        self.write(CallName::CircleRendererSetColor, entity, |c: &mut CircleRenderer| {
            c.color = *color
        });
    }

    fn circle_renderer_component_get_thickness(&self, entity: EntityId) -> f32 {
        self.read(CallName::CircleRendererGetThickness, entity, |c: &CircleRenderer| c.thickness)
    }

    fn circle_renderer_component_set_thickness(&self, entity: EntityId, thickness: f32) {
        self.write(CallName::CircleRendererSetThickness, entity, |c: &mut CircleRenderer| {
            c.thickness = thickness
        });
    }

    fn circle_renderer_component_get_fade(&self, entity: EntityId) -> f32 {
        self.read(CallName::CircleRendererGetFade, entity, |c: &CircleRenderer| c.fade)
    }

    fn circle_renderer_component_set_fade(&self, entity: EntityId, fade: f32) {
        self.write(CallName::CircleRendererSetFade, entity, |c: &mut CircleRenderer| c.fade = fade);
    }

    fn rigidbody2d_component_apply_linear_impulse(
        &self,
        entity: EntityId,
        impulse: &Vec2,
        point: &Vec2,
        wake: bool,
    ) {
        // Off-center impulses need the current center of mass.
        let center = self
            .scene
            .borrow()
            .component::<Transform>(entity)
            .ok()
            .map(|t| t.translation.truncate());
        self.write(CallName::Rigidbody2DApplyLinearImpulse, entity, |rb: &mut Rigidbody2D| {
            if let Some(center) = center {
                rb.body.center = center;
            }
            rb.body.apply_linear_impulse(*impulse, *point, wake);
        });
    }

    fn rigidbody2d_component_apply_linear_impulse_to_center(
        &self,
        entity: EntityId,
        impulse: &Vec2,
        wake: bool,
    ) {
        self.write(
            CallName::Rigidbody2DApplyLinearImpulseToCenter,
            entity,
            |rb: &mut Rigidbody2D| rb.body.apply_linear_impulse_to_center(*impulse, wake),
        );
    }

    fn rigidbody2d_component_get_linear_velocity(&self, entity: EntityId, out_velocity: &mut Vec2) {
        *out_velocity = self.read(CallName::Rigidbody2DGetLinearVelocity, entity, |rb: &Rigidbody2D| {
            rb.body.linear_velocity
        });
    }

    fn rigidbody2d_component_get_type(&self, entity: EntityId) -> BodyType {
        self.read(CallName::Rigidbody2DGetType, entity, |rb: &Rigidbody2D| rb.body.kind.into())
    }

    fn rigidbody2d_component_set_type(&self, entity: EntityId, body_type: BodyType) {
        self.write(CallName::Rigidbody2DSetType, entity, |rb: &mut Rigidbody2D| {
            rb.body.set_kind(body_type.into())
        });
    }

    fn text_component_get_text(&self, entity: EntityId) -> String {
        self.read(CallName::TextGetText, entity, |t: &Text| t.text.clone())
    }

    fn text_component_set_text(&self, entity: EntityId, text: &str) {
        self.write(CallName::TextSetText, entity, |t: &mut Text| t.text = text.to_owned());
    }

    fn text_component_get_color(&self, entity: EntityId, out_color: &mut Vec4) {
        *out_color = self.read(CallName::TextGetColor, entity, |t: &Text| t.color);
    }

    fn text_component_set_color(&self, entity: EntityId, color: &Vec4) {
        self.write(CallName::TextSetColor, entity, |t: &mut Text| t.color = *color);
    }

    fn text_component_get_kerning(&self, entity: EntityId) -> f32 {
        self.read(CallName::TextGetKerning, entity, |t: &Text| t.kerning)
    }

    fn text_component_set_kerning(&self, entity: EntityId, kerning: f32) {
        self.write(CallName::TextSetKerning, entity, |t: &mut Text| t.kerning = kerning);
    }

    fn text_component_get_line_spacing(&self, entity: EntityId) -> f32 {
        self.read(CallName::TextGetLineSpacing, entity, |t: &Text| t.line_spacing)
    }

    fn text_component_set_line_spacing(&self, entity: EntityId, line_spacing: f32) {
        self.write(CallName::TextSetLineSpacing, entity, |t: &mut Text| {
            t.line_spacing = line_spacing
        });
    }

    fn input_is_key_down(&self, key: KeyCode) -> bool {
        tracing::trace!(call = %CallName::InputIsKeyDown, key = %key, "native call");
        self.keyboard.borrow().is_down(key)
    }

    fn logger_trace(&self, message: &str) {
        tracing::trace!(call = %CallName::LoggerTrace, "native call");
        tracing::trace!(target: SCRIPT_LOG_TARGET, "{message}");
    }

    fn logger_info(&self, message: &str) {
        tracing::trace!(call = %CallName::LoggerInfo, "native call");
        tracing::info!(target: SCRIPT_LOG_TARGET, "{message}");
    }

    fn logger_warn(&self, message: &str) {
        tracing::trace!(call = %CallName::LoggerWarn, "native call");
        tracing::warn!(target: SCRIPT_LOG_TARGET, "{message}");
    }

    fn logger_error(&self, message: &str) {
        tracing::trace!(call = %CallName::LoggerError, "native call");
        tracing::error!(target: SCRIPT_LOG_TARGET, "{message}");
    }

    fn logger_critical(&self, message: &str) {
        tracing::trace!(call = %CallName::LoggerCritical, "native call");
        tracing::error!(target: SCRIPT_LOG_TARGET, critical = true, "{message}");
    }

    fn logger_cout(&self, message: &str) {
        tracing::trace!(call = %CallName::LoggerCout, "native call");
        self.log_cout(message);
    }
}
