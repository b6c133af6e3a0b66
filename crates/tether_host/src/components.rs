//! Native component data
//!
//! The authoritative state behind the script wrappers. Defaults match what
//! the editor assigns to a freshly added component.

use tether_core::math::{Vec3, Vec4};

use crate::physics::{NativeBodyKind, PhysicsBody};

/// Entity name, used by name lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

/// Position, rotation (Euler radians) and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleRenderer {
    pub color: Vec4,
    pub thickness: f32,
    pub fade: f32,
}

impl Default for CircleRenderer {
    fn default() -> Self {
        Self {
            color: Vec4::ONE,
            thickness: 1.0,
            fade: 0.005,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rigidbody2D {
    pub body: PhysicsBody,
}

impl Rigidbody2D {
    pub fn new(kind: NativeBodyKind) -> Self {
        Self {
            body: PhysicsBody::new(kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub text: String,
    pub color: Vec4,
    pub kerning: f32,
    pub line_spacing: f32,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: Vec4::ONE,
            kerning: 0.0,
            line_spacing: 0.0,
        }
    }
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}
