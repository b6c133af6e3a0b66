//! Native call table
//!
//! The only points where control and data cross from script code into the
//! engine. An embedding engine implements [`NativeCalls`]; everything else
//! in this crate is typed sugar over these entries.
//!
//! Every component entry assumes the entity is alive and currently has the
//! named component. The table does not check: wrappers only exist after a
//! successful presence check, and what happens when that contract is broken
//! is up to the engine.
//!
//! Marshalling follows [`crate::marshal`]: vectors are filled through `&mut`
//! out-parameters and written through `&`, strings come back owned and go
//! in borrowed, scalars travel by value.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use tether_core::ecs::{ComponentType, EntityId};
use tether_core::input::KeyCode;
use tether_core::math::{Vec2, Vec3, Vec4};
use tether_core::physics::BodyType;

/// A script object owned by the engine's instance registry.
pub type ScriptInstance = Rc<dyn Any>;

/// Engine-side implementation of the call table.
///
/// Calls are synchronous: each returns only once the engine has finished,
/// and none may yield to other work.
pub trait NativeCalls {
    // Entity
    fn get_script_instance(&self, entity: EntityId) -> Option<ScriptInstance>;
    fn entity_has_component(&self, entity: EntityId, component: ComponentType) -> bool;
    /// Returns [`EntityId::NULL`] when no live entity has that name.
    fn entity_find_entity_by_name(&self, name: &str) -> EntityId;

    // TransformComponent
    fn transform_component_get_translation(&self, entity: EntityId, out_translation: &mut Vec3);
    fn transform_component_set_translation(&self, entity: EntityId, translation: &Vec3);
    fn transform_component_get_rotation(&self, entity: EntityId, out_rotation: &mut Vec3);
    fn transform_component_set_rotation(&self, entity: EntityId, rotation: &Vec3);
    fn transform_component_get_scale(&self, entity: EntityId, out_scale: &mut Vec3);
    fn transform_component_set_scale(&self, entity: EntityId, scale: &Vec3);

    // CircleRendererComponent
    fn circle_renderer_component_get_color(&self, entity: EntityId, out_color: &mut Vec4);
    fn circle_renderer_component_set_color(&self, entity: EntityId, color: &Vec4);
    fn circle_renderer_component_get_thickness(&self, entity: EntityId) -> f32;
    fn circle_renderer_component_set_thickness(&self, entity: EntityId, thickness: f32);
    fn circle_renderer_component_get_fade(&self, entity: EntityId) -> f32;
    fn circle_renderer_component_set_fade(&self, entity: EntityId, fade: f32);

    // Rigidbody2DComponent
    fn rigidbody2d_component_apply_linear_impulse(
        &self,
        entity: EntityId,
        impulse: &Vec2,
        point: &Vec2,
        wake: bool,
    );
    fn rigidbody2d_component_apply_linear_impulse_to_center(
        &self,
        entity: EntityId,
        impulse: &Vec2,
        wake: bool,
    );
    fn rigidbody2d_component_get_linear_velocity(&self, entity: EntityId, out_velocity: &mut Vec2);
    fn rigidbody2d_component_get_type(&self, entity: EntityId) -> BodyType;
    fn rigidbody2d_component_set_type(&self, entity: EntityId, body_type: BodyType);

    // TextComponent
    fn text_component_get_text(&self, entity: EntityId) -> String;
    fn text_component_set_text(&self, entity: EntityId, text: &str);
    fn text_component_get_color(&self, entity: EntityId, out_color: &mut Vec4);
    fn text_component_set_color(&self, entity: EntityId, color: &Vec4);
    fn text_component_get_kerning(&self, entity: EntityId) -> f32;
    fn text_component_set_kerning(&self, entity: EntityId, kerning: f32);
    fn text_component_get_line_spacing(&self, entity: EntityId) -> f32;
    fn text_component_set_line_spacing(&self, entity: EntityId, line_spacing: f32);

    // Input
    fn input_is_key_down(&self, key: KeyCode) -> bool;

    // Logger
    fn logger_trace(&self, message: &str);
    fn logger_info(&self, message: &str);
    fn logger_warn(&self, message: &str);
    fn logger_error(&self, message: &str);
    fn logger_critical(&self, message: &str);
    /// Unleveled passthrough, written as-is.
    fn logger_cout(&self, message: &str);
}

/// Catalogue of every call table entry, by its registered name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CallName {
    GetScriptInstance,
    EntityHasComponent,
    EntityFindEntityByName,

    TransformGetTranslation,
    TransformSetTranslation,
    TransformGetRotation,
    TransformSetRotation,
    TransformGetScale,
    TransformSetScale,

    CircleRendererGetColor,
    CircleRendererSetColor,
    CircleRendererGetThickness,
    CircleRendererSetThickness,
    CircleRendererGetFade,
    CircleRendererSetFade,

    Rigidbody2DApplyLinearImpulse,
    Rigidbody2DApplyLinearImpulseToCenter,
    Rigidbody2DGetLinearVelocity,
    Rigidbody2DGetType,
    Rigidbody2DSetType,

    TextGetText,
    TextSetText,
    TextGetColor,
    TextSetColor,
    TextGetKerning,
    TextSetKerning,
    TextGetLineSpacing,
    TextSetLineSpacing,

    InputIsKeyDown,

    LoggerTrace,
    LoggerInfo,
    LoggerWarn,
    LoggerError,
    LoggerCritical,
    LoggerCout,
}

impl CallName {
    /// Every entry, in registration order.
    pub const ALL: [CallName; 35] = [
        CallName::GetScriptInstance,
        CallName::EntityHasComponent,
        CallName::EntityFindEntityByName,
        CallName::TransformGetTranslation,
        CallName::TransformSetTranslation,
        CallName::TransformGetRotation,
        CallName::TransformSetRotation,
        CallName::TransformGetScale,
        CallName::TransformSetScale,
        CallName::CircleRendererGetColor,
        CallName::CircleRendererSetColor,
        CallName::CircleRendererGetThickness,
        CallName::CircleRendererSetThickness,
        CallName::CircleRendererGetFade,
        CallName::CircleRendererSetFade,
        CallName::Rigidbody2DApplyLinearImpulse,
        CallName::Rigidbody2DApplyLinearImpulseToCenter,
        CallName::Rigidbody2DGetLinearVelocity,
        CallName::Rigidbody2DGetType,
        CallName::Rigidbody2DSetType,
        CallName::TextGetText,
        CallName::TextSetText,
        CallName::TextGetColor,
        CallName::TextSetColor,
        CallName::TextGetKerning,
        CallName::TextSetKerning,
        CallName::TextGetLineSpacing,
        CallName::TextSetLineSpacing,
        CallName::InputIsKeyDown,
        CallName::LoggerTrace,
        CallName::LoggerInfo,
        CallName::LoggerWarn,
        CallName::LoggerError,
        CallName::LoggerCritical,
        CallName::LoggerCout,
    ];

    /// The `<ComponentOrSubsystem>_<Operation>` name of this entry.
    pub const fn as_str(self) -> &'static str {
        match self {
            CallName::GetScriptInstance => "GetScriptInstance",
            CallName::EntityHasComponent => "Entity_HasComponent",
            CallName::EntityFindEntityByName => "Entity_FindEntityByName",
            CallName::TransformGetTranslation => "TransformComponent_GetTranslation",
            CallName::TransformSetTranslation => "TransformComponent_SetTranslation",
            CallName::TransformGetRotation => "TransformComponent_GetRotation",
            CallName::TransformSetRotation => "TransformComponent_SetRotation",
            CallName::TransformGetScale => "TransformComponent_GetScale",
            CallName::TransformSetScale => "TransformComponent_SetScale",
            CallName::CircleRendererGetColor => "CircleRendererComponent_GetColor",
            CallName::CircleRendererSetColor => "CircleRendererComponent_SetColor",
            CallName::CircleRendererGetThickness => "CircleRendererComponent_GetThickness",
            CallName::CircleRendererSetThickness => "CircleRendererComponent_SetThickness",
            CallName::CircleRendererGetFade => "CircleRendererComponent_GetFade",
            CallName::CircleRendererSetFade => "CircleRendererComponent_SetFade",
            CallName::Rigidbody2DApplyLinearImpulse => "Rigidbody2DComponent_ApplyLinearImpulse",
            CallName::Rigidbody2DApplyLinearImpulseToCenter => {
                "Rigidbody2DComponent_ApplyLinearImpulseToCenter"
            }
            CallName::Rigidbody2DGetLinearVelocity => "Rigidbody2DComponent_GetLinearVelocity",
            CallName::Rigidbody2DGetType => "Rigidbody2DComponent_GetType",
            CallName::Rigidbody2DSetType => "Rigidbody2DComponent_SetType",
            CallName::TextGetText => "TextComponent_GetText",
            CallName::TextSetText => "TextComponent_SetText",
            CallName::TextGetColor => "TextComponent_GetColor",
            CallName::TextSetColor => "TextComponent_SetColor",
            CallName::TextGetKerning => "TextComponent_GetKerning",
            CallName::TextSetKerning => "TextComponent_SetKerning",
            CallName::TextGetLineSpacing => "TextComponent_GetLineSpacing",
            CallName::TextSetLineSpacing => "TextComponent_SetLineSpacing",
            CallName::InputIsKeyDown => "Input_IsKeyDown",
            CallName::LoggerTrace => "Logger_Trace",
            CallName::LoggerInfo => "Logger_Info",
            CallName::LoggerWarn => "Logger_Warn",
            CallName::LoggerError => "Logger_Error",
            CallName::LoggerCritical => "Logger_Critical",
            CallName::LoggerCout => "Logger_cout",
        }
    }
}

impl fmt::Display for CallName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
