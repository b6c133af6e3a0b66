//! Tether Core
//!
//! Shared vocabulary for both halves of the script/engine bridge:
//! - Entity ids and component descriptors
//! - Vector value types
//! - Boundary enumerations (body type, key codes)

pub mod ecs;
pub mod input;
pub mod math;
pub mod physics;

pub use glam;

/// Bridge version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
