//! 3D vector and quaternion primitives.

pub use approx;

/// Floating-point type used for geometry.
pub type Float = f64;

/// Small floating-point value used for comparisons.
pub const EPSILON: Float = 0.000001;

/// Asserts that both arguments are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = $crate::EPSILON)
    };
    ($a:expr, $b:expr, epsilon = $eps:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = $eps)
    };
}

pub mod approx_cmp;
mod quaternion;
mod vector;

use thiserror::Error;

pub use quaternion::Quaternion;
pub use vector::Vector3;

/// Error produced when normalizing a vector with zero magnitude.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[error("cannot normalize zero-length vector")]
pub struct DegenerateVectorError;

/// Structs, traits, and constants.
pub mod prelude {
    pub use approx::AbsDiffEq;

    pub use crate::approx_cmp::*;
    pub use crate::{DegenerateVectorError, EPSILON, Float, Quaternion, Vector3};
}
