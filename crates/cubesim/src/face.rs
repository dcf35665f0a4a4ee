//! Faces of the cube and their sticker colors.

use std::fmt;

use cubemath::{Float, Vector3};
use strum::{EnumIter, IntoEnumIterator};

/// Positive or negative direction along an axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Negative.
    Neg = -1,
    /// Positive.
    Pos = 1,
}
impl std::ops::Neg for Sign {
    type Output = Sign;

    fn neg(self) -> Sign {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Pos => Sign::Neg,
        }
    }
}
impl Sign {
    /// Returns an integer representation of the sign (either -1 or 1).
    pub const fn int(self) -> i8 {
        self as i8
    }
    /// Returns a floating-point representation of the sign (either -1.0 or
    /// 1.0).
    pub const fn float(self) -> Float {
        self.int() as Float
    }
}

/// 8-bit RGB color.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}
impl Rgb {
    /// Color of the plastic between stickers.
    pub const BLACK: Self = Self([0, 0, 0]);
}

/// Face of the cube.
///
/// Faces are ordered `+X, -X, +Y, -Y, +Z, -Z`, which is also the order of
/// [`crate::Colors`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Face {
    /// Right (+X).
    R = 0,
    /// Left (-X).
    L = 1,
    /// Up (+Y).
    U = 2,
    /// Down (-Y).
    D = 3,
    /// Front (+Z).
    F = 4,
    /// Back (-Z).
    B = 5,
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Face {
    /// Returns an iterator over all faces in color order.
    pub fn iter() -> FaceIter {
        <Self as IntoEnumIterator>::iter()
    }
    /// Returns the face at index `i` in color order.
    pub fn from_index(i: usize) -> Option<Self> {
        Self::iter().nth(i)
    }
    /// Returns the face with the given uppercase symbol.
    pub fn from_symbol(c: char) -> Option<Self> {
        Self::iter().find(|f| f.symbol() == c)
    }
    /// Returns the face on the given side of an axis (0, 1, or 2).
    pub fn from_axis_sign(axis: u8, sign: Sign) -> Option<Self> {
        Self::iter().find(|f| f.axis() == axis && f.sign() == sign)
    }

    /// Returns the index of this face in color order.
    pub fn index(self) -> usize {
        self as usize
    }
    /// Returns the uppercase symbol for the face.
    pub fn symbol(self) -> char {
        use Face::*;

        match self {
            R => 'R',
            L => 'L',
            U => 'U',
            D => 'D',
            F => 'F',
            B => 'B',
        }
    }
    /// Returns the human-friendly name of the face.
    pub fn name(self) -> &'static str {
        use Face::*;

        match self {
            R => "Right",
            L => "Left",
            U => "Up",
            D => "Down",
            F => "Front",
            B => "Back",
        }
    }

    /// Returns the axis perpendicular to this face: 0 for X, 1 for Y, 2 for Z.
    pub fn axis(self) -> u8 {
        self as u8 / 2
    }
    /// Returns the sign of this face along its perpendicular axis.
    pub fn sign(self) -> Sign {
        match self as u8 % 2 {
            0 => Sign::Pos,
            _ => Sign::Neg,
        }
    }
    /// Returns the face on the opposite side of the cube.
    #[must_use]
    pub fn opposite(self) -> Self {
        use Face::*;

        match self {
            R => L,
            L => R,
            U => D,
            D => U,
            F => B,
            B => F,
        }
    }

    /// Returns the outward unit normal of the face, which is also the axis
    /// that twists of this face rotate around.
    pub fn vector(self) -> Vector3 {
        Vector3::unit(self.axis()) * self.sign().float()
    }

    /// Returns the sticker color of the face.
    pub fn color(self) -> Rgb {
        use Face::*;

        match self {
            R => Rgb([233, 68, 48]),    // red
            L => Rgb([241, 148, 47]),   // orange
            U => Rgb([244, 234, 43]),   // yellow
            D => Rgb([255, 255, 255]),  // white
            F => Rgb([1, 118, 206]),    // blue
            B => Rgb([118, 227, 11]),   // green
        }
    }
}
