//! Entity identity
//!
//! Entity ids are allocated by the engine and are unique within a running
//! scene. Script code only ever copies them around.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque 64-bit entity id.
///
/// `0` is reserved: it means "no entity" and is what failed lookups return.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// The "no entity" sentinel.
    pub const NULL: EntityId = EntityId(0);

    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_is_default() {
        assert_eq!(EntityId::default(), EntityId::NULL);
        assert!(EntityId::NULL.is_null());
        assert!(!EntityId::from_raw(42).is_null());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&EntityId::from_raw(42)).unwrap();
        assert_eq!(json, "42");
        let back: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.raw(), 42);
    }
}
