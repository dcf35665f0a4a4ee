//! Pieces of the cube.

use std::fmt;

use cubemath::approx_cmp::approx_eq;
use cubemath::{Float, Quaternion, Vector3};
use strum::Display;

use crate::Face;

/// Which faces a piece carries a sticker on, indexed in [`Face`] order
/// `(+X, -X, +Y, -Y, +Z, -Z)`.
pub type Colors = [bool; 6];

/// Kind of piece.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Display, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum PieceKind {
    /// Piece with one sticker in the middle of a face.
    Center,
    /// Piece with two stickers along an edge.
    Edge,
    /// Piece with three stickers at a corner.
    Corner,
    /// The only piece of a 1x1x1 cube.
    #[strum(to_string = "cubie")]
    SingleCubie,
}

/// Single piece of the cube.
///
/// The kind and colors of a piece are fixed when it is constructed. Only
/// [`crate::Cube`] can change its position and orientation.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    kind: PieceKind,
    colors: Colors,
    position: Vector3,
    orientation: Quaternion,
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            kind,
            position,
            orientation,
            ..
        } = self;
        write!(f, "{kind} piece at {position} with {orientation}")
    }
}

impl Piece {
    /// Constructs a piece in its solved position with the identity
    /// orientation.
    pub fn new(kind: PieceKind, solved_position: Vector3) -> Self {
        Self {
            kind,
            colors: Self::calculate_colors(solved_position),
            position: solved_position,
            orientation: Quaternion::IDENTITY,
        }
    }

    /// Returns which faces a piece at `solved_position` has stickers on.
    ///
    /// A piece gets a sticker on each face whose coordinate is the most
    /// extreme coordinate of the piece, comparing the largest coordinate
    /// against the negated smallest one.
    pub fn calculate_colors(solved_position: Vector3) -> Colors {
        let p = solved_position;
        let max = p.iter().fold(Float::NEG_INFINITY, Float::max);
        let min = p.iter().fold(Float::INFINITY, Float::min);
        let dist = Float::max(max, -min);

        let mut colors = [false; 6];
        for (axis, value) in p.iter().enumerate() {
            if value == dist {
                colors[axis * 2] = true;
            }
            if value == -dist {
                colors[axis * 2 + 1] = true;
            }
        }
        colors
    }

    /// Returns the kind of piece.
    pub fn kind(&self) -> PieceKind {
        self.kind
    }
    /// Returns which faces the piece has stickers on, in its solved
    /// orientation.
    pub fn colors(&self) -> Colors {
        self.colors
    }
    /// Returns the current position of the center of the piece.
    pub fn position(&self) -> Vector3 {
        self.position
    }
    /// Returns the rotation from the solved orientation to the current one.
    pub fn orientation(&self) -> Quaternion {
        self.orientation
    }

    /// Returns whether the piece has a sticker of the given face's color.
    pub fn has_color(&self, face: Face) -> bool {
        self.colors[face.index()]
    }
    /// Returns the faces whose color the piece has a sticker of.
    pub fn sticker_faces(&self) -> impl Iterator<Item = Face> + '_ {
        Face::iter().filter(|&f| self.has_color(f))
    }
    /// Returns the number of stickers on the piece.
    pub fn sticker_count(&self) -> usize {
        self.colors.iter().filter(|&&c| c).count()
    }
    /// Returns the direction that the sticker of color `face` is currently
    /// facing, or `None` if the piece has no such sticker or is not aligned
    /// to the axes (such as in the middle of an animation).
    pub fn sticker_direction(&self, face: Face) -> Option<Face> {
        if !self.has_color(face) {
            return None;
        }
        let normal = self.orientation.rotate_vector(face.vector());
        Face::iter().find(|f| approx_eq(&normal.dot(f.vector()), &1.0))
    }

    /// Applies a rotation around the origin to the piece.
    pub(crate) fn rotate(&mut self, rotation: Quaternion) {
        self.orientation = rotation * self.orientation;
        self.position = Vector3::rotate(self.position, rotation);
    }
}
