//! Entity and component identity shared across the script boundary.
//!
//! Neither side owns the other's types: the engine hands out [`EntityId`]s,
//! and script code describes component kinds with [`ComponentType`]
//! descriptors that the engine maps onto its own storage.

mod component;
mod entity;

pub use component::{register_component, Component, ComponentId, ComponentType, RegistryError};
pub use entity::EntityId;
