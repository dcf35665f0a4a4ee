//! Size-specific notation dialects.

use std::borrow::Cow;

use strum::{Display, EnumIter, EnumString};

use crate::{CubeError, Face, Move};

/// Notation vocabulary for a particular cube size, translated into canonical
/// notation before a move is applied.
///
/// Only the first character of a move is ever rewritten.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(
    Display, EnumString, EnumIter, Debug, Default, Copy, Clone, PartialEq, Eq, Hash,
)]
#[strum(ascii_case_insensitive)]
pub enum Dialect {
    /// Whole-cube rotations `X`, `Y`, and `Z` only.
    #[cfg_attr(feature = "serde", serde(rename = "1x1"))]
    #[strum(serialize = "1x1")]
    Size1,
    /// Face turns and whole-cube rotations.
    #[cfg_attr(feature = "serde", serde(rename = "2x2"))]
    #[strum(serialize = "2x2")]
    Size2,
    /// Face turns, lowercase wide turns, slices `M`, `E`, `S`, and whole-cube
    /// rotations.
    #[cfg_attr(feature = "serde", serde(rename = "3x3"))]
    #[strum(serialize = "3x3")]
    Size3,
    /// Canonical notation, plus whole-cube rotations.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "nxn"))]
    #[strum(serialize = "nxn")]
    SizeN,
}

impl Dialect {
    /// Returns the usual dialect for a cube with `size` layers.
    pub fn for_size(size: usize) -> Self {
        match size {
            1 => Dialect::Size1,
            2 => Dialect::Size2,
            3 => Dialect::Size3,
            _ => Dialect::SizeN,
        }
    }

    /// Translates a move into canonical notation and parses it.
    ///
    /// Errors refer to the move as it was given, not its translation.
    pub fn parse_move(self, s: &str) -> Result<Move, CubeError> {
        let canonical = self.translate(s)?;
        Move::parse(&canonical).map_err(|_| CubeError::invalid_notation(s))
    }

    /// Translates a move into canonical notation.
    pub fn translate(self, s: &str) -> Result<Cow<'_, str>, CubeError> {
        let mut chars = s.chars();
        let first = chars.next();
        let rest = chars.as_str();

        let first = match first {
            Some(c) => c,
            None if self == Dialect::SizeN => return Ok(Cow::Borrowed(s)),
            None => return Err(CubeError::invalid_notation(s)),
        };

        let rotation = rotation_prefix(first);
        let slice = slice_prefix(first);
        let is_face = Face::from_symbol(first).is_some();

        let prefix = match self {
            Dialect::SizeN => match rotation {
                Some(prefix) => prefix,
                None => return Ok(Cow::Borrowed(s)),
            },
            Dialect::Size3 if is_face => return Ok(Cow::Borrowed(s)),
            Dialect::Size3 => {
                // Lowercase face letters are two-layer tier turns.
                if let Some(face) = Face::from_symbol(first.to_ascii_uppercase()) {
                    return Ok(Cow::Owned(format!("T{face}{rest}")));
                }
                slice
                    .or(rotation)
                    .ok_or_else(|| CubeError::invalid_notation(s))?
            }
            Dialect::Size2 if is_face => return Ok(Cow::Borrowed(s)),
            Dialect::Size2 | Dialect::Size1 => {
                rotation.ok_or_else(|| CubeError::invalid_notation(s))?
            }
        };
        Ok(Cow::Owned(format!("{prefix}{rest}")))
    }
}

fn rotation_prefix(c: char) -> Option<&'static str> {
    match c {
        'X' => Some("CR"),
        'Y' => Some("CU"),
        'Z' => Some("CF"),
        _ => None,
    }
}

fn slice_prefix(c: char) -> Option<&'static str> {
    match c {
        'M' => Some("NL"),
        'E' => Some("ND"),
        'S' => Some("NF"),
        _ => None,
    }
}
