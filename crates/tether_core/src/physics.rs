//! Physics enumerations shared with the engine
//!
//! [`BodyType`] crosses the boundary as its raw `u32` discriminant and is
//! persisted in scene files, so its encoding is a versioned contract.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Version of the [`BodyType`] encoding.
///
/// Bump this whenever a variant is added or a discriminant changes, and
/// update the engine's decoder in the same change.
pub const BODY_TYPE_ABI_VERSION: u32 = 1;

/// Rigidbody simulation mode as seen by scripts.
///
/// Encoding (ABI version 1): Static = 0, Dynamic = 1, Kinematic = 2.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum BodyType {
    #[default]
    Static = 0,
    Dynamic = 1,
    Kinematic = 2,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown body type encoding {raw} (body type ABI version {BODY_TYPE_ABI_VERSION})")]
pub struct BodyTypeError {
    pub raw: u32,
}

impl BodyType {
    /// Every variant, in encoding order.
    pub const ALL: [BodyType; 3] = [BodyType::Static, BodyType::Dynamic, BodyType::Kinematic];

    pub const fn to_raw(self) -> u32 {
        self as u32
    }

    pub const fn from_raw(raw: u32) -> Result<Self, BodyTypeError> {
        match raw {
            0 => Ok(BodyType::Static),
            1 => Ok(BodyType::Dynamic),
            2 => Ok(BodyType::Kinematic),
            _ => Err(BodyTypeError { raw }),
        }
    }
}

impl TryFrom<u32> for BodyType {
    type Error = BodyTypeError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

impl From<BodyType> for u32 {
    fn from(body_type: BodyType) -> Self {
        body_type.to_raw()
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BodyType::Static => "Static",
            BodyType::Dynamic => "Dynamic",
            BodyType::Kinematic => "Kinematic",
        };
        f.write_str(name)
    }
}
