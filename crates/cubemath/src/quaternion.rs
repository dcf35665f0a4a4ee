//! Quaternions for representing 3D rotations.

use std::fmt;
use std::ops::{Mul, MulAssign, Neg};

use approx::AbsDiffEq;

use crate::{DegenerateVectorError, Float, Vector3};

/// Quaternion `w + xi + yj + zk`.
///
/// Rotations are represented by unit quaternions. Note that `q` and `-q`
/// represent the same rotation; use [`Quaternion::is_same_rotation()`] to
/// compare rotations.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quaternion {
    /// Scalar component.
    pub w: Float,
    /// Coefficient of `i`.
    pub x: Float,
    /// Coefficient of `j`.
    pub y: Float,
    /// Coefficient of `k`.
    pub z: Float,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { w, x, y, z } = self;
        write!(f, "quaternion({w}, {x}, {y}, {z})")
    }
}

impl Quaternion {
    /// Identity rotation.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// Constructs a quaternion from its components.
    pub const fn new(w: Float, x: Float, y: Float, z: Float) -> Self {
        Self { w, x, y, z }
    }

    /// Constructs a rotation by `angle` radians counterclockwise around
    /// `axis`.
    ///
    /// Returns an error if `axis` is zero.
    pub fn from_axis_angle(axis: Vector3, angle: Float) -> Result<Self, DegenerateVectorError> {
        Ok(Self::from_normalized_axis_angle(axis.normalize()?, angle))
    }
    /// Constructs a rotation by `angle` radians counterclockwise around
    /// `axis`, which **must** be normalized.
    pub fn from_normalized_axis_angle(axis: Vector3, angle: Float) -> Self {
        let half_angle = angle / 2.0;
        let (sin, cos) = half_angle.sin_cos();
        Self::new(cos, axis.x * sin, axis.y * sin, axis.z * sin)
    }
    /// Constructs a rotation from a rotation vector, whose direction is the
    /// rotation axis and whose magnitude is the angle in radians. The zero
    /// vector gives the identity.
    pub fn from_rotation_vector(v: Vector3) -> Self {
        let angle = v.norm();
        match v.normalize() {
            Ok(axis) => Self::from_normalized_axis_angle(axis, angle),
            Err(DegenerateVectorError) => Self::IDENTITY,
        }
    }

    /// Returns the vector part `(x, y, z)`.
    pub fn vector_part(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
    /// Returns the 4D dot product of two quaternions.
    pub fn dot(self, rhs: Self) -> Float {
        self.w * rhs.w + self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }
    /// Returns the magnitude of the quaternion.
    pub fn norm(self) -> Float {
        self.dot(self).sqrt()
    }
    /// Returns the conjugate `w - xi - yj - zk`.
    #[must_use]
    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }
    /// Returns a unit quaternion with the same direction.
    ///
    /// Returns an error if the quaternion is zero.
    pub fn normalize(self) -> Result<Self, DegenerateVectorError> {
        let norm = self.norm();
        if norm == 0.0 || !norm.is_finite() {
            return Err(DegenerateVectorError);
        }
        Ok(Self::new(
            self.w / norm,
            self.x / norm,
            self.y / norm,
            self.z / norm,
        ))
    }
    /// Returns the multiplicative inverse.
    ///
    /// Returns an error if the quaternion is zero.
    pub fn inverse(self) -> Result<Self, DegenerateVectorError> {
        let norm2 = self.dot(self);
        if norm2 == 0.0 || !norm2.is_finite() {
            return Err(DegenerateVectorError);
        }
        let c = self.conjugate();
        Ok(Self::new(c.w / norm2, c.x / norm2, c.y / norm2, c.z / norm2))
    }

    /// Returns the rotation angle in radians, in the range `0..=2π`.
    pub fn angle(self) -> Float {
        2.0 * self.vector_part().norm().atan2(self.w)
    }

    /// Rotates a vector by this quaternion, computing `q v q⁻¹`.
    ///
    /// The quaternion is expected to be a unit quaternion.
    pub fn rotate_vector(self, v: Vector3) -> Vector3 {
        let u = self.vector_part();
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }

    /// Returns whether two unit quaternions represent the same rotation,
    /// treating `q` and `-q` as equal.
    pub fn is_same_rotation(self, other: Self, epsilon: Float) -> bool {
        self.abs_diff_eq(&other, epsilon) || self.abs_diff_eq(&-other, epsilon)
    }
}

impl Mul for Quaternion {
    type Output = Self;

    /// Hamilton product. `a * b` applies `b` first, then `a`.
    fn mul(self, rhs: Self) -> Self::Output {
        let Self {
            w: w1,
            x: x1,
            y: y1,
            z: z1,
        } = self;
        let Self {
            w: w2,
            x: x2,
            y: y2,
            z: z2,
        } = rhs;
        Self::new(
            w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
            w1 * x2 + x1 * w2 + y1 * z2 - z1 * y2,
            w1 * y2 - x1 * z2 + y1 * w2 + z1 * x2,
            w1 * z2 + x1 * y2 - y1 * x2 + z1 * w2,
        )
    }
}
impl MulAssign for Quaternion {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}
impl Mul<Vector3> for Quaternion {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Self::Output {
        self.rotate_vector(rhs)
    }
}
impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl AbsDiffEq for Quaternion {
    type Epsilon = Float;

    fn default_epsilon() -> Self::Epsilon {
        crate::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.w.abs_diff_eq(&other.w, epsilon)
            && self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use proptest::prelude::*;

    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_quaternion_rotates_counterclockwise() {
        let q = Quaternion::from_axis_angle(Vector3::Z, FRAC_PI_2).expect("nonzero axis");
        assert_approx_eq!(Vector3::Y, q.rotate_vector(Vector3::X));
        assert_approx_eq!(-Vector3::X, q * Vector3::Y);
        assert_approx_eq!(Vector3::Z, q * Vector3::Z);

        let q = Quaternion::from_axis_angle(Vector3::new(-2.0, 0.0, 0.0), FRAC_PI_2)
            .expect("nonzero axis");
        assert_approx_eq!(-Vector3::Z, q * Vector3::Y);
    }

    #[test]
    fn test_quaternion_zero_axis() {
        assert_eq!(
            Err(DegenerateVectorError),
            Quaternion::from_axis_angle(Vector3::ZERO, PI),
        );
        assert_eq!(
            Quaternion::IDENTITY,
            Quaternion::from_rotation_vector(Vector3::ZERO),
        );
    }

    #[test]
    fn test_quaternion_composition_order() {
        let x90 = Quaternion::from_axis_angle(Vector3::X, FRAC_PI_2).expect("nonzero axis");
        let y90 = Quaternion::from_axis_angle(Vector3::Y, FRAC_PI_2).expect("nonzero axis");
        // `y90 * x90` applies `x90` first.
        let v = Vector3::Y;
        assert_approx_eq!(y90 * (x90 * v), (y90 * x90) * v);
        assert_approx_eq!(Vector3::X, (y90 * x90) * v);
    }

    #[test]
    fn test_quaternion_full_turn_is_negative_identity() {
        let q = Quaternion::from_rotation_vector(Vector3::X * FRAC_PI_2);
        let full = q * q * q * q;
        assert_approx_eq!(-Quaternion::IDENTITY, full);
        assert!(full.is_same_rotation(Quaternion::IDENTITY, 1e-12));
        assert!(!q.is_same_rotation(Quaternion::IDENTITY, 1e-12));
    }

    #[test]
    fn test_quaternion_inverse() {
        let q = Quaternion::new(1.0, 2.0, -3.0, 0.5);
        assert_approx_eq!(Quaternion::IDENTITY, q * q.inverse().expect("nonzero"));
        assert_eq!(
            Err(DegenerateVectorError),
            Quaternion::new(0.0, 0.0, 0.0, 0.0).inverse(),
        );
    }

    proptest! {
        #[test]
        fn proptest_rotation_preserves_length(
            axis in prop::array::uniform3(-1.0..1.0_f64),
            angle in -10.0..10.0_f64,
            v in prop::array::uniform3(-5.0..5.0_f64),
        ) {
            let axis = Vector3::from(axis);
            prop_assume!(axis.norm() > 0.01);
            let q = Quaternion::from_axis_angle(axis, angle).expect("nonzero axis");
            let v = Vector3::from(v);
            prop_assert!((q.norm() - 1.0).abs() < 1e-12);
            prop_assert!((q.rotate_vector(v).norm() - v.norm()).abs() < 1e-9);
            prop_assert!(q.rotate_vector(axis).abs_diff_eq(&axis, 1e-9));
        }
    }
}
