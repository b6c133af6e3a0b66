use std::io;
use std::path::PathBuf;

use tether_core::ecs::{ComponentType, EntityId, RegistryError};
use thiserror::Error;

/// Errors raised by the reference host's scene and registry.
///
/// Call table entries never return these to scripts; they are logged (or,
/// with strict boundary checking, turned into a panic) at the boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("entity id 0 is reserved for \"no entity\"")]
    NullEntity,

    #[error("entity {0} does not exist")]
    NoSuchEntity(EntityId),

    #[error("entity {0} already exists")]
    DuplicateEntity(EntityId),

    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        entity: EntityId,
        component: &'static str,
    },

    #[error("component {0} has no registered presence check")]
    UnregisteredComponent(ComponentType),

    #[error("component id {} is bound to {existing}, not {requested}", .existing.id)]
    DescriptorMismatch {
        existing: ComponentType,
        requested: ComponentType,
    },

    #[error("component {component} is already backed by {existing}, cannot rebind to {requested}")]
    NativeConflict {
        component: ComponentType,
        existing: &'static str,
        requested: &'static str,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors raised while loading host settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
