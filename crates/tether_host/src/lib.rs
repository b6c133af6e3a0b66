//! Tether Reference Host
//!
//! An in-memory engine that implements the native call table, for running
//! and testing script code without a full engine:
//! - Scene storage (hecs-backed, keyed by [`EntityId`](tether_core::ecs::EntityId))
//! - Component presence registry keyed by script component descriptors
//! - Minimal 2D rigid body model
//! - Keyboard state and script instance registry
//! - Log routing into `tracing`

pub mod components;
pub mod error;
pub mod host;
pub mod input;
pub mod physics;
pub mod registry;
pub mod scene;
pub mod settings;

pub use components::{CircleRenderer, Rigidbody2D, Tag, Text, Transform};
pub use error::{ConfigError, HostError};
pub use host::ScriptHost;
pub use registry::ComponentRegistry;
pub use scene::Scene;
pub use settings::HostSettings;
