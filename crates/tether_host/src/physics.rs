//! Minimal 2D rigid body model
//!
//! Just enough dynamics to answer the rigidbody call table entries:
//! impulses, velocities, body kind. No collision or constraints.

use tether_core::math::Vec2;
use tether_core::physics::BodyType;

/// Body kind in the physics backend's own encoding.
///
/// Note the order differs from the script-facing [`BodyType`]; always
/// convert through the `From` impls, never by casting discriminants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum NativeBodyKind {
    Static = 0,
    Kinematic = 1,
    Dynamic = 2,
}

impl From<BodyType> for NativeBodyKind {
    fn from(body_type: BodyType) -> Self {
        match body_type {
            BodyType::Static => NativeBodyKind::Static,
            BodyType::Dynamic => NativeBodyKind::Dynamic,
            BodyType::Kinematic => NativeBodyKind::Kinematic,
        }
    }
}

impl From<NativeBodyKind> for BodyType {
    fn from(kind: NativeBodyKind) -> Self {
        match kind {
            NativeBodyKind::Static => BodyType::Static,
            NativeBodyKind::Dynamic => BodyType::Dynamic,
            NativeBodyKind::Kinematic => BodyType::Kinematic,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    pub kind: NativeBodyKind,
    pub mass: f32,
    /// Rotational inertia about the center of mass.
    pub inertia: f32,
    pub fixed_rotation: bool,
    /// World-space center of mass.
    pub center: Vec2,
    pub linear_velocity: Vec2,
    pub angular_velocity: f32,
    pub awake: bool,
}

impl PhysicsBody {
    pub fn new(kind: NativeBodyKind) -> Self {
        Self {
            kind,
            mass: 1.0,
            inertia: 1.0,
            fixed_rotation: false,
            center: Vec2::ZERO,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            awake: true,
        }
    }

    pub fn inv_mass(&self) -> f32 {
        if self.kind == NativeBodyKind::Dynamic && self.mass > 0.0 {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    pub fn inv_inertia(&self) -> f32 {
        if self.kind == NativeBodyKind::Dynamic && !self.fixed_rotation && self.inertia > 0.0 {
            1.0 / self.inertia
        } else {
            0.0
        }
    }

    /// Whether an impulse should be applied now, waking the body if asked.
    fn accepts_impulse(&mut self, wake: bool) -> bool {
        if self.kind != NativeBodyKind::Dynamic {
            return false;
        }
        if wake && !self.awake {
            self.awake = true;
        }
        self.awake
    }

    /// Impulse applied at a world point; off-center points add spin.
    pub fn apply_linear_impulse(&mut self, impulse: Vec2, point: Vec2, wake: bool) {
        if !self.accepts_impulse(wake) {
            return;
        }
        self.linear_velocity += self.inv_mass() * impulse;
        self.angular_velocity += self.inv_inertia() * (point - self.center).perp_dot(impulse);
    }

    /// Impulse applied at the center of mass; never changes spin.
    pub fn apply_linear_impulse_to_center(&mut self, impulse: Vec2, wake: bool) {
        if !self.accepts_impulse(wake) {
            return;
        }
        self.linear_velocity += self.inv_mass() * impulse;
    }

    pub fn set_kind(&mut self, kind: NativeBodyKind) {
        if self.kind == kind {
            return;
        }
        self.kind = kind;
        if kind == NativeBodyKind::Static {
            self.linear_velocity = Vec2::ZERO;
            self.angular_velocity = 0.0;
        }
        self.awake = true;
    }
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self::new(NativeBodyKind::Static)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dynamic_body() -> PhysicsBody {
        PhysicsBody {
            mass: 2.0,
            inertia: 0.5,
            ..PhysicsBody::new(NativeBodyKind::Dynamic)
        }
    }

    #[test]
    fn test_kind_mapping_round_trips() {
        for body_type in BodyType::ALL {
            assert_eq!(BodyType::from(NativeBodyKind::from(body_type)), body_type);
        }
        // Same name, different numbers on each side.
        assert_eq!(NativeBodyKind::from(BodyType::Dynamic) as u32, 2);
        assert_eq!(BodyType::Dynamic.to_raw(), 1);
    }

    #[test]
    fn test_center_impulse_moves_without_spin() {
        let mut body = dynamic_body();
        body.apply_linear_impulse_to_center(Vec2::new(4.0, 0.0), true);
        assert_eq!(body.linear_velocity, Vec2::new(2.0, 0.0));
        assert_eq!(body.angular_velocity, 0.0);
    }

    #[test]
    fn test_point_impulse_adds_spin() {
        let mut body = dynamic_body();
        body.apply_linear_impulse(Vec2::new(0.0, 4.0), Vec2::new(1.0, 0.0), true);
        assert_eq!(body.linear_velocity, Vec2::new(0.0, 2.0));
        // r x J = (1, 0) x (0, 4) = 4, scaled by 1 / 0.5
        assert_eq!(body.angular_velocity, 8.0);
    }

    #[test]
    fn test_point_impulse_at_center_matches_center_impulse() {
        let mut at_point = dynamic_body();
        let mut at_center = dynamic_body();
        at_point.apply_linear_impulse(Vec2::new(1.0, 1.0), at_point.center, true);
        at_center.apply_linear_impulse_to_center(Vec2::new(1.0, 1.0), true);
        assert_eq!(at_point, at_center);
    }

    #[test]
    fn test_static_and_kinematic_ignore_impulses() {
        for kind in [NativeBodyKind::Static, NativeBodyKind::Kinematic] {
            let mut body = PhysicsBody::new(kind);
            body.apply_linear_impulse_to_center(Vec2::new(1.0, 0.0), true);
            assert_eq!(body.linear_velocity, Vec2::ZERO);
        }
    }

    #[test]
    fn test_sleeping_body_needs_wake() {
        let mut body = dynamic_body();
        body.awake = false;

        body.apply_linear_impulse_to_center(Vec2::new(2.0, 0.0), false);
        assert_eq!(body.linear_velocity, Vec2::ZERO);
        assert!(!body.awake);

        body.apply_linear_impulse_to_center(Vec2::new(2.0, 0.0), true);
        assert!(body.awake);
        assert_eq!(body.linear_velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_fixed_rotation_blocks_spin() {
        let mut body = dynamic_body();
        body.fixed_rotation = true;
        body.apply_linear_impulse(Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0), true);
        assert_eq!(body.angular_velocity, 0.0);
    }

    #[test]
    fn test_becoming_static_stops_body() {
        let mut body = dynamic_body();
        body.linear_velocity = Vec2::new(3.0, 3.0);
        body.angular_velocity = 1.0;
        body.set_kind(NativeBodyKind::Static);
        assert_eq!(body.linear_velocity, Vec2::ZERO);
        assert_eq!(body.angular_velocity, 0.0);
        assert_eq!(BodyType::from(body.kind), BodyType::Static);
    }
}
