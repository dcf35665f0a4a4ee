//! Canonical move notation.
//!
//! ```text
//! move   := prefix? face suffix?
//! face   := R | U | F | L | D | B
//! suffix := ' | 2
//! prefix := C | T | T<int> | N | N<int> | N<int>-<int>
//! ```

use std::fmt;
use std::str::FromStr;

use cubemath::Float;
use smallvec::SmallVec;

use crate::{CubeError, Face};

/// List of 1-based layer indices, counted inward from the turned face.
pub type LayerList = SmallVec<[usize; 4]>;

/// Direction and amount of a turn.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TurnDirection {
    /// Quarter turn clockwise, looking at the face. No suffix.
    #[default]
    Clockwise,
    /// Quarter turn counterclockwise, looking at the face. Suffix `'`.
    CounterClockwise,
    /// Half turn. Suffix `2`.
    Double,
}

impl TurnDirection {
    /// Returns the number of quarter turns counterclockwise around the face's
    /// outward normal.
    pub fn multiplier(self) -> Float {
        match self {
            TurnDirection::Clockwise => -1.0,
            TurnDirection::CounterClockwise => 1.0,
            TurnDirection::Double => 2.0,
        }
    }
    /// Returns the notation suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            TurnDirection::Clockwise => "",
            TurnDirection::CounterClockwise => "'",
            TurnDirection::Double => "2",
        }
    }
    /// Returns the direction that undoes this one.
    #[must_use]
    pub fn rev(self) -> Self {
        match self {
            TurnDirection::Clockwise => TurnDirection::CounterClockwise,
            TurnDirection::CounterClockwise => TurnDirection::Clockwise,
            TurnDirection::Double => TurnDirection::Double,
        }
    }
}

/// Set of layers affected by a move.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LayerSpec {
    /// Outer layer only. No prefix.
    #[default]
    Outer,
    /// Every layer, rotating the whole cube. Prefix `C`.
    WholeCube,
    /// Outer layers `1..=depth`. Prefix `T` (depth 2) or `T<depth>`.
    ///
    /// Layer 1 is always included, even if `depth` is less than 1.
    Tier {
        /// Innermost layer.
        depth: usize,
    },
    /// Layers `first..=last`. Prefix `N` (layer 2), `N<m>`, or
    /// `N<first>-<last>`.
    ///
    /// If `first > last` then no layers are affected.
    Slice {
        /// Outermost layer.
        first: usize,
        /// Innermost layer.
        last: usize,
    },
}

impl fmt::Display for LayerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            LayerSpec::Outer => Ok(()),
            LayerSpec::WholeCube => write!(f, "C"),
            LayerSpec::Tier { depth: 2 } => write!(f, "T"),
            LayerSpec::Tier { depth } => write!(f, "T{depth}"),
            LayerSpec::Slice { first: 2, last: 2 } => write!(f, "N"),
            LayerSpec::Slice { first, last } if first == last => write!(f, "N{first}"),
            LayerSpec::Slice { first, last } => write!(f, "N{first}-{last}"),
        }
    }
}

impl LayerSpec {
    /// Parses a layer prefix, returning `None` if it is invalid.
    ///
    /// Anything after a leading `C` is ignored.
    pub fn parse(prefix: &str) -> Option<Self> {
        let parse_int = |s: &str| s.parse::<usize>().ok();

        let mut chars = prefix.chars();
        match chars.next() {
            None => Some(LayerSpec::Outer),
            Some('C') => Some(LayerSpec::WholeCube),
            Some('T') => match chars.as_str() {
                "" => Some(LayerSpec::Tier { depth: 2 }),
                rest => Some(LayerSpec::Tier {
                    depth: parse_int(rest)?,
                }),
            },
            Some('N') => match chars.as_str() {
                "" => Some(LayerSpec::Slice { first: 2, last: 2 }),
                rest => match rest.split_once('-') {
                    None => {
                        let m = parse_int(rest)?;
                        Some(LayerSpec::Slice { first: m, last: m })
                    }
                    Some((a, b)) => Some(LayerSpec::Slice {
                        first: parse_int(a)?,
                        last: parse_int(b)?,
                    }),
                },
            },
            Some(_) => None,
        }
    }

    /// Returns the layer indices in ascending order for a cube with `size`
    /// layers, without checking that they are in range.
    fn layer_list(self, size: usize) -> LayerList {
        match self {
            LayerSpec::Outer => smallvec::smallvec![1],
            LayerSpec::WholeCube => (1..=size).collect(),
            LayerSpec::Tier { depth } => std::iter::once(1).chain(2..=depth).collect(),
            LayerSpec::Slice { first, last } => (first..=last).collect(),
        }
    }

    /// Returns the layer indices in ascending order for a cube with `size`
    /// layers, or an error if any of them is outside `1..=size`.
    ///
    /// The bounds are checked before the list is built, so the error names the
    /// outermost layer that is out of range.
    pub fn layers(self, size: usize) -> Result<LayerList, CubeError> {
        match self.first_invalid_layer(size) {
            Some(layer) => Err(CubeError::InvalidLayerIndex { layer, size }),
            None => Ok(self.layer_list(size)),
        }
    }

    fn first_invalid_layer(self, size: usize) -> Option<usize> {
        match self {
            LayerSpec::Outer | LayerSpec::Tier { .. } if size == 0 => Some(1),
            LayerSpec::Outer | LayerSpec::WholeCube => None,
            LayerSpec::Tier { depth } => (depth > size).then_some(size + 1),
            LayerSpec::Slice { first, last } if first > last => None,
            LayerSpec::Slice { first: 0, .. } => Some(0),
            LayerSpec::Slice { first, last } => (last > size).then(|| first.max(size + 1)),
        }
    }
}

/// Move in canonical notation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// Face whose outward normal is the rotation axis.
    pub face: Face,
    /// Layers to rotate, counted inward from `face`.
    pub layers: LayerSpec,
    /// Direction and amount.
    pub direction: TurnDirection,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            face,
            layers,
            direction,
        } = self;
        write!(f, "{layers}{face}{}", direction.suffix())
    }
}

impl FromStr for Move {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Move {
    /// Constructs a quarter turn of the outer layer of a face.
    pub fn face_turn(face: Face, direction: TurnDirection) -> Self {
        Self {
            face,
            layers: LayerSpec::Outer,
            direction,
        }
    }

    /// Parses a move in canonical notation.
    pub fn parse(s: &str) -> Result<Self, CubeError> {
        let invalid = || CubeError::invalid_notation(s);

        let (rest, direction) = if let Some(rest) = s.strip_suffix('\'') {
            (rest, TurnDirection::CounterClockwise)
        } else if let Some(rest) = s.strip_suffix('2') {
            (rest, TurnDirection::Double)
        } else {
            (s, TurnDirection::Clockwise)
        };

        let mut chars = rest.chars();
        let face = chars
            .next_back()
            .and_then(Face::from_symbol)
            .ok_or_else(invalid)?;
        let layers = LayerSpec::parse(chars.as_str()).ok_or_else(invalid)?;

        Ok(Self {
            face,
            layers,
            direction,
        })
    }

    /// Returns the layer indices affected by the move on a cube with `size`
    /// layers, or an error if any of them is out of range.
    pub fn layers(&self, size: usize) -> Result<LayerList, CubeError> {
        self.layers.layers(size)
    }

    /// Returns the move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            direction: self.direction.rev(),
            ..self
        }
    }
}
