// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use brick_core::math::{Mat4, Vec3};

/// Axis-aligned bounding box in world coordinates.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Values are `f32` meters in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Constructs an AABB from its minimum and maximum corners.
    ///
    /// # Panics
    /// Panics if any component of `min` is greater than its counterpart in `max`.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        let a = min.to_array();
        let b = max.to_array();
        assert!(
            a[0] <= b[0] && a[1] <= b[1] && a[2] <= b[2],
            "invalid AABB: min > max"
        );
        Self { min, max }
    }

    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Builds an AABB centered at `center` with half-extents `he`.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, he: Vec3) -> Self {
        Self::new(center.sub(&he), center.add(&he))
    }

    /// Returns `true` if this AABB overlaps another (inclusive on faces).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let a_min = self.min.to_array();
        let a_max = self.max.to_array();
        let b_min = other.min.to_array();
        let b_max = other.max.to_array();
        (0..3).all(|i| a_max[i] >= b_min[i] && a_min[i] <= b_max[i])
    }

    /// Bounds of this box after transformation by `mat` (all eight corners).
    #[must_use]
    pub fn transformed(&self, mat: &Mat4) -> Self {
        let [minx, miny, minz] = self.min.to_array();
        let [maxx, maxy, maxz] = self.max.to_array();
        let corners = [
            Vec3::new(minx, miny, minz),
            Vec3::new(minx, miny, maxz),
            Vec3::new(minx, maxy, minz),
            Vec3::new(minx, maxy, maxz),
            Vec3::new(maxx, miny, minz),
            Vec3::new(maxx, miny, maxz),
            Vec3::new(maxx, maxy, minz),
            Vec3::new(maxx, maxy, maxz),
        ];
        let mut lo = mat.transform_point(&corners[0]).to_array();
        let mut hi = lo;
        for c in &corners[1..] {
            let p = mat.transform_point(c).to_array();
            for i in 0..3 {
                lo[i] = lo[i].min(p[i]);
                hi[i] = hi[i].max(p[i]);
            }
        }
        Self {
            min: Vec3::from(lo),
            max: Vec3::from(hi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_faces_overlap() {
        let a = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::new(0.5, 0.5, 0.5));
        let b = Aabb::from_center_half_extents(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.5, 0.5, 0.5));
        let c = Aabb::from_center_half_extents(Vec3::new(1.01, 0.0, 0.0), Vec3::new(0.5, 0.5, 0.5));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
