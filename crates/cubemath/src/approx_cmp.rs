//! Approximate comparison functions that automatically use [`EPSILON`].

pub use approx::AbsDiffEq;

use crate::{EPSILON, Float};

/// Compares two numbers, but considers them equal if they are separated by less
/// than `EPSILON`.
///
/// Handles infinity specially.
pub fn approx_eq<T: AbsDiffEq<Epsilon = Float>>(a: &T, b: &T) -> bool {
    // use native float equality to handle infinities
    a == b || approx::abs_diff_eq!(a, b, epsilon = EPSILON)
}
