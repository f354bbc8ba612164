// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Float32 math helpers for snap alignment: scalar easing, vectors,
//! quaternions and a column-major matrix for volume bounds.
//!
//! Everything is `f32` to match the host engine's transform precision. The
//! interpolation helpers are approach-phase tools only; callers that need an
//! exact landing pose assign the target directly.

use std::f32::consts::TAU;

const EPSILON: f32 = 1e-6;

/// Above this cosine two rotations are close enough that slerp degrades to a
/// normalised lerp without visible error.
const SLERP_LINEAR_THRESHOLD: f32 = 0.9995;

/// Clamps `value` to the inclusive `[min, max]` range.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    debug_assert!(min <= max, "invalid clamp range: {min} > {max}");
    value.max(min).min(max)
}

/// Linear interpolation between two scalars.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite ease-in/ease-out of `t` clamped to `[0, 1]`.
///
/// `smoothstep(0) == 0` and `smoothstep(1) == 1` exactly.
pub fn smoothstep(t: f32) -> f32 {
    let t = clamp(t, 0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Converts degrees to radians with float32 precision.
pub fn deg_to_rad(value: f32) -> f32 {
    value * (TAU / 360.0)
}

/// Converts radians to degrees with float32 precision.
pub fn rad_to_deg(value: f32) -> f32 {
    value * (360.0 / TAU)
}

/// 3D vector in world units (meters).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec3 {
    data: [f32; 3],
}

impl Vec3 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit scale / all-ones vector.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { data: [x, y, z] }
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f32; 3] {
        self.data
    }

    /// X component.
    pub fn x(&self) -> f32 {
        self.data[0]
    }

    /// Y component.
    pub fn y(&self) -> f32 {
        self.data[1]
    }

    /// Z component.
    pub fn z(&self) -> f32 {
        self.data[2]
    }

    /// Adds two vectors.
    pub fn add(&self, other: &Self) -> Self {
        Self::new(
            self.x() + other.x(),
            self.y() + other.y(),
            self.z() + other.z(),
        )
    }

    /// Subtracts another vector.
    pub fn sub(&self, other: &Self) -> Self {
        Self::new(
            self.x() - other.x(),
            self.y() - other.y(),
            self.z() - other.z(),
        )
    }

    /// Scales the vector by a scalar.
    pub fn scale(&self, scalar: f32) -> Self {
        Self::new(self.x() * scalar, self.y() * scalar, self.z() * scalar)
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &Self) -> f32 {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    /// Cross product with another vector.
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.data;
        let [bx, by, bz] = other.data;
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// Vector length (magnitude).
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Normalises the vector, returning zero vector if length is ~0.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len.abs() <= EPSILON {
            return Self::ZERO;
        }
        self.scale(1.0 / len)
    }

    /// Component-wise linear interpolation from `self` toward `target`.
    ///
    /// Not guaranteed to return `target` bit-exactly at `t == 1`.
    pub fn lerp(&self, target: &Self, t: f32) -> Self {
        Self::new(
            lerp(self.x(), target.x(), t),
            lerp(self.y(), target.y(), t),
            lerp(self.z(), target.z(), t),
        )
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(value: [f32; 3]) -> Self {
        Self { data: value }
    }
}

/// Column-major 4x4 matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    data: [f32; 16],
}

impl Mat4 {
    /// Creates a matrix from column-major array data.
    pub const fn new(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Identity matrix.
    pub const fn identity() -> Self {
        Self::new([
            1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Returns the matrix as a column-major array.
    pub fn to_array(self) -> [f32; 16] {
        self.data
    }

    fn at(&self, row: usize, col: usize) -> f32 {
        self.data[col * 4 + row]
    }

    /// Multiplies the matrix with another matrix (self * rhs).
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.at(row, k) * rhs.at(k, col);
                }
                out[col * 4 + row] = sum;
            }
        }
        Self::new(out)
    }

    /// Transforms a point (assumes w = 1).
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        let [x, y, z] = point.to_array();
        let nx = self.at(0, 0) * x + self.at(0, 1) * y + self.at(0, 2) * z + self.at(0, 3);
        let ny = self.at(1, 0) * x + self.at(1, 1) * y + self.at(1, 2) * z + self.at(1, 3);
        let nz = self.at(2, 0) * x + self.at(2, 1) * y + self.at(2, 2) * z + self.at(2, 3);
        Vec3::new(nx, ny, nz)
    }
}

impl From<[f32; 16]> for Mat4 {
    fn from(value: [f32; 16]) -> Self {
        Self { data: value }
    }
}

/// Quaternion stored as (x, y, z, w).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quat {
    data: [f32; 4],
}

impl Quat {
    /// Creates a quaternion from components.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Returns the identity quaternion.
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Returns the quaternion as an array.
    pub fn to_array(self) -> [f32; 4] {
        self.data
    }

    fn component(&self, idx: usize) -> f32 {
        self.data[idx]
    }

    /// Constructs a quaternion from a rotation axis (assumed non-zero) and angle in radians.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let norm_axis = axis.normalize();
        let half = angle * 0.5;
        let (sin_half, cos_half) = half.sin_cos();
        let scaled = norm_axis.scale(sin_half);
        Self::new(scaled.x(), scaled.y(), scaled.z(), cos_half)
    }

    /// Multiplies two quaternions (self * other).
    pub fn multiply(&self, other: &Self) -> Self {
        let [ax, ay, az, aw] = self.data;
        let [bx, by, bz, bw] = other.data;
        Self::new(
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }

    /// 4D dot product; `|dot|` is the cosine of half the angle between unit rotations.
    pub fn dot(&self, other: &Self) -> f32 {
        (0..4).map(|i| self.component(i) * other.component(i)).sum()
    }

    /// Conjugate, which is the inverse for unit quaternions.
    pub fn conjugate(&self) -> Self {
        let [x, y, z, w] = self.data;
        Self::new(-x, -y, -z, w)
    }

    /// Component-wise negation. Represents the same rotation.
    pub fn negate(&self) -> Self {
        let [x, y, z, w] = self.data;
        Self::new(-x, -y, -z, -w)
    }

    /// Normalises the quaternion; returns identity when norm is ~0.
    pub fn normalize(&self) -> Self {
        let len = self.dot(self).sqrt();
        if len.abs() <= EPSILON {
            return Self::identity();
        }
        let inv = 1.0 / len;
        let [x, y, z, w] = self.data;
        Self::new(x * inv, y * inv, z * inv, w * inv)
    }

    /// Rotates a vector by this (unit) quaternion.
    pub fn rotate(&self, v: &Vec3) -> Vec3 {
        let [x, y, z, w] = self.data;
        let u = Vec3::new(x, y, z);
        // v' = v + 2w(u × v) + 2u × (u × v)
        let uv = u.cross(v);
        let uuv = u.cross(&uv);
        v.add(&uv.scale(2.0 * w)).add(&uuv.scale(2.0))
    }

    /// Shortest-arc spherical interpolation from `self` toward `target`.
    ///
    /// The target is negated when the 4D dot is negative so the path never
    /// takes the long way around. Nearly parallel inputs fall back to a
    /// normalised lerp.
    pub fn slerp(&self, target: &Self, t: f32) -> Self {
        let mut end = *target;
        let mut cos = self.dot(target);
        if cos < 0.0 {
            end = end.negate();
            cos = -cos;
        }

        if cos > SLERP_LINEAR_THRESHOLD {
            let blended = Self::new(
                lerp(self.component(0), end.component(0), t),
                lerp(self.component(1), end.component(1), t),
                lerp(self.component(2), end.component(2), t),
                lerp(self.component(3), end.component(3), t),
            );
            return blended.normalize();
        }

        let theta = clamp(cos, -1.0, 1.0).acos();
        let sin_theta = theta.sin();
        let w0 = ((1.0 - t) * theta).sin() / sin_theta;
        let w1 = (t * theta).sin() / sin_theta;
        Self::new(
            self.component(0) * w0 + end.component(0) * w1,
            self.component(1) * w0 + end.component(1) * w1,
            self.component(2) * w0 + end.component(2) * w1,
            self.component(3) * w0 + end.component(3) * w1,
        )
    }

    /// Angle in radians between two unit rotations.
    pub fn angle_to(&self, other: &Self) -> f32 {
        2.0 * clamp(self.dot(other).abs(), 0.0, 1.0).acos()
    }

    /// Converts the quaternion to a rotation matrix (column-major 4x4).
    pub fn to_mat4(&self) -> Mat4 {
        let q = self.normalize();
        let [x, y, z, w] = q.data;

        let xx = x * x;
        let yy = y * y;
        let zz = z * z;
        let xy = x * y;
        let xz = x * z;
        let yz = y * z;
        let wx = w * x;
        let wy = w * y;
        let wz = w * z;

        Mat4::new([
            1.0 - 2.0 * (yy + zz),
            2.0 * (xy + wz),
            2.0 * (xz - wy),
            0.0,
            2.0 * (xy - wz),
            1.0 - 2.0 * (xx + zz),
            2.0 * (yz + wx),
            0.0,
            2.0 * (xz + wy),
            2.0 * (yz - wx),
            1.0 - 2.0 * (xx + yy),
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[f32; 4]> for Quat {
    fn from(value: [f32; 4]) -> Self {
        Self { data: value }
    }
}
