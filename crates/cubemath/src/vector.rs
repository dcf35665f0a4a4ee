//! 3D vector math.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::*;

use approx::{AbsDiffEq, RelativeEq};

use crate::{DegenerateVectorError, Float, Quaternion};

/// 3D vector. Equality is component-wise.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vector3 {
    /// X component.
    pub x: Float,
    /// Y component.
    pub y: Float,
    /// Z component.
    pub z: Float,
}

impl Vector3 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit vector along the X axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit vector along the Y axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit vector along the Z axis.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Constructs a vector from its components.
    pub const fn new(x: Float, y: Float, z: Float) -> Self {
        Self { x, y, z }
    }
    /// Constructs a vector from a slice of three components. Any other length
    /// produces the zero vector.
    pub fn from_slice(components: &[Float]) -> Self {
        match *components {
            [x, y, z] => Self::new(x, y, z),
            _ => Self::ZERO,
        }
    }
    /// Returns the unit vector along axis `axis` (0, 1, or 2), or the zero
    /// vector for any other axis.
    pub fn unit(axis: u8) -> Self {
        match axis {
            0 => Self::X,
            1 => Self::Y,
            2 => Self::Z,
            _ => Self::ZERO,
        }
    }

    /// Returns the components as an array.
    pub const fn to_array(self) -> [Float; 3] {
        [self.x, self.y, self.z]
    }
    /// Returns an iterator over the components in the order X, Y, Z.
    pub fn iter(self) -> std::array::IntoIter<Float, 3> {
        self.to_array().into_iter()
    }

    /// Returns the dot product of this vector with another.
    pub fn dot(self, rhs: Self) -> Float {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }
    /// Returns the cross product of this vector with another.
    #[must_use]
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }
    /// Returns the magnitude of the vector.
    pub fn norm(self) -> Float {
        self.norm2().sqrt()
    }
    /// Returns the squared magnitude of the vector.
    pub fn norm2(self) -> Float {
        self.dot(self)
    }
    /// Returns a scaled copy of the vector.
    #[must_use]
    pub fn scale(self, scalar: Float) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
    /// Returns a normalized copy of the vector.
    ///
    /// Returns an error if the vector has zero magnitude.
    pub fn normalize(self) -> Result<Self, DegenerateVectorError> {
        let norm = self.norm();
        if norm == 0.0 || !norm.is_finite() {
            return Err(DegenerateVectorError);
        }
        Ok(self / norm)
    }
    /// Returns the point halfway between this vector and another.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        (self + other).scale(0.5)
    }
    /// Returns the largest absolute value of any component.
    pub fn max_abs_component(self) -> Float {
        self.iter().map(Float::abs).fold(0.0, Float::max)
    }
    /// Returns `v` rotated by `q`.
    ///
    /// `q` is expected to be a unit quaternion.
    #[must_use]
    pub fn rotate(v: Self, q: Quaternion) -> Self {
        q.rotate_vector(v)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.x, self.y, self.z)
    }
}

impl Eq for Vector3 {}

impl Hash for Vector3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Adding zero maps `-0.0` to `0.0` so that equal vectors hash equally.
        for x in self.iter() {
            (x + 0.0).to_bits().hash(state);
        }
    }
}

impl IntoIterator for Vector3 {
    type Item = Float;
    type IntoIter = std::array::IntoIter<Float, 3>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<[Float; 3]> for Vector3 {
    fn from([x, y, z]: [Float; 3]) -> Self {
        Self::new(x, y, z)
    }
}
impl From<Vector3> for [Float; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}
impl From<(Float, Float, Float)> for Vector3 {
    fn from((x, y, z): (Float, Float, Float)) -> Self {
        Self::new(x, y, z)
    }
}

impl Index<usize> for Vector3 {
    type Output = Float;

    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("axis {index} out of range for 3D vector"),
        }
    }
}
impl IndexMut<usize> for Vector3 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("axis {index} out of range for 3D vector"),
        }
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}
impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + rhs.scale(-1.0)
    }
}
impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}
impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}
impl Mul<Float> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: Float) -> Self::Output {
        self.scale(rhs)
    }
}
impl Mul<Vector3> for Float {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Self::Output {
        rhs.scale(self)
    }
}
impl MulAssign<Float> for Vector3 {
    fn mul_assign(&mut self, rhs: Float) {
        *self = self.scale(rhs);
    }
}
impl Div<Float> for Vector3 {
    type Output = Self;

    fn div(self, rhs: Float) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl AbsDiffEq for Vector3 {
    type Epsilon = Float;

    fn default_epsilon() -> Self::Epsilon {
        crate::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        std::iter::zip(self.iter(), other.iter()).all(|(a, b)| a.abs_diff_eq(&b, epsilon))
    }
}
impl RelativeEq for Vector3 {
    fn default_max_relative() -> Self::Epsilon {
        Float::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        std::iter::zip(self.iter(), other.iter())
            .all(|(a, b)| a.relative_eq(&b, epsilon, max_relative))
    }
}
