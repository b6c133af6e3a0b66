//! Vector value types
//!
//! Re-exports glam. Vectors are plain `Copy` data with component-wise
//! arithmetic; they are copied, never shared, when they cross the boundary.

pub use glam::*;

pub type Vector2 = glam::Vec2;
pub type Vector3 = glam::Vec3;
pub type Vector4 = glam::Vec4;
