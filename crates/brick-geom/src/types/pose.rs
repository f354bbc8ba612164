// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use brick_core::math::{Mat4, Quat, Vec3};

/// Rigid pose of a scene node: world or parent-relative.
///
/// Conventions:
/// - `position` in meters.
/// - `rotation` as a unit quaternion.
/// - No scale; bricks are rigid and connectors sit at fixed offsets.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    position: Vec3,
    rotation: Quat,
}

impl Pose {
    /// Identity pose at the origin.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::identity(),
        }
    }

    /// Creates a pose from components.
    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose with identity rotation.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self::new(position, Quat::identity())
    }

    /// Position component.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Rotation component.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Copy with `position` replaced.
    #[must_use]
    pub fn with_position(self, position: Vec3) -> Self {
        Self { position, ..self }
    }

    /// Copy with `rotation` replaced.
    #[must_use]
    pub fn with_rotation(self, rotation: Quat) -> Self {
        Self { rotation, ..self }
    }

    /// Maps a point from this pose's local frame into the parent frame.
    #[must_use]
    pub fn transform_point(&self, local: &Vec3) -> Vec3 {
        self.rotation.rotate(local).add(&self.position)
    }

    /// Composes `self` (parent) with `local` (child relative to parent).
    #[must_use]
    pub fn compose(&self, local: &Self) -> Self {
        Self {
            position: self.transform_point(&local.position),
            rotation: self.rotation.multiply(&local.rotation).normalize(),
        }
    }

    /// Inverse pose, so that `p.inverse().compose(&p)` is identity.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv_rot = self.rotation.conjugate();
        Self {
            position: inv_rot.rotate(&self.position).scale(-1.0),
            rotation: inv_rot,
        }
    }

    /// Returns the column-major `Mat4` corresponding to this pose (`T * R`).
    #[must_use]
    pub fn to_mat4(&self) -> Mat4 {
        let [tx, ty, tz] = self.position.to_array();
        let t = Mat4::new([
            1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, tx, ty, tz, 1.0,
        ]);
        t.multiply(&self.rotation.to_mat4())
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn compose_then_inverse_recovers_local() {
        let parent = Pose::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), FRAC_PI_2),
        );
        let local = Pose::at(Vec3::new(0.5, 0.0, 0.0));
        let world = parent.compose(&local);
        // +X rotated a quarter turn about Y points along -Z.
        assert!((world.position().z() - 2.5).abs() < 1e-6);
        let back = parent.inverse().compose(&world);
        assert!((back.position().x() - 0.5).abs() < 1e-6);
        assert!(back.position().z().abs() < 1e-6);
    }
}
