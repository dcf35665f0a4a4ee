//! NxNxN Rubik's cube simulation.
//!
//! A [`Cube`] owns the visible pieces of the puzzle. Each [`Piece`] has fixed
//! sticker colors and a position and orientation that change as layers of the
//! cube are rotated. Moves are written in a canonical notation (see
//! [`notation`]) and may be translated from a size-specific [`Dialect`].

pub use cubemath;

mod animator;
mod cube;
mod dialect;
mod errors;
mod face;
pub mod geometry;
pub mod input;
pub mod notation;
mod piece;

pub use animator::{AnimationSettings, Animator, DEFAULT_ANGLE_STEP, Step};
pub use cube::{Cube, DEFAULT_ANGLE, LAYER_EPSILON};
pub use dialect::Dialect;
pub use errors::CubeError;
pub use face::{Face, FaceIter, Rgb, Sign};
pub use notation::{LayerList, LayerSpec, Move, TurnDirection};
pub use piece::{Colors, Piece, PieceKind};

#[cfg(test)]
mod tests;
