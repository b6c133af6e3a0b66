//! Tether Scripting Bridge
//!
//! Script-side half of the entity/component bridge. Script code reads and
//! writes engine-owned component state through typed wrappers; the engine
//! keeps all authoritative state.
//!
//! ## Architecture
//!
//! - **Call table:** [`ffi::NativeCalls`], the fixed set of entries an engine
//!   implements. Installed per thread with [`glue::install`].
//! - **Entities:** [`Entity`] is a plain id; it owns nothing.
//! - **Wrappers:** [`TransformComponent`], [`CircleRendererComponent`],
//!   [`Rigidbody2DComponent`], [`TextComponent`]. Each accessor forwards to
//!   one call table entry.
//! - **Resolver:** [`Entity::get_component`] sends the wrapper's
//!   [`ComponentType`](tether_core::ecs::ComponentType) to the engine and
//!   binds a wrapper only when the engine reports the component present.
//!
//! ```ignore
//! let _glue = tether_script::glue::install(engine);
//! let player = Entity::find_entity_by_name("Player");
//! if let Some(body) = player.get_component::<Rigidbody2DComponent>() {
//!     body.apply_linear_impulse_to_center(Vec2::new(0.0, 5.0), true);
//! }
//! ```

pub mod components;
pub mod entity;
pub mod ffi;
pub mod glue;
pub mod input;
pub mod logger;
mod marshal;
pub mod testing;

pub use components::{
    CircleRendererComponent, Rigidbody2DComponent, ScriptComponent, TextComponent,
    TransformComponent,
};
pub use entity::Entity;
pub use ffi::{CallName, NativeCalls, ScriptInstance};
pub use input::Input;
pub use logger::Logger;
pub use tether_core;
