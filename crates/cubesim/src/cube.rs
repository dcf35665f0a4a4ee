//! Cube state and the rotation engine.

use std::f64::consts::FRAC_PI_2;

use cubemath::{Float, Quaternion, Vector3};
use itertools::{Itertools, iproduct};

use crate::{CubeError, Dialect, Face, LayerList, Move, Piece, PieceKind};

/// Angle of a quarter turn, in radians.
pub const DEFAULT_ANGLE: Float = FRAC_PI_2;

/// Tolerance when deciding whether a piece is in a layer.
pub const LAYER_EPSILON: Float = 1e-6;

/// NxNxN cube.
///
/// Pieces are only generated on the surface of the cube, in the order
/// centers, corners, edges. Pieces are never added or removed after
/// construction.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    size: usize,
    pieces: Vec<Piece>,
}

impl Cube {
    /// Constructs a solved cube with `size` layers along each axis.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size >= 1, "cube must have at least one layer");

        if size == 1 {
            return Self {
                size,
                pieces: vec![Piece::new(PieceKind::SingleCubie, Vector3::ZERO)],
            };
        }

        let dist = Self::half_width(size);
        let ends = [-dist, dist];
        let offsets = linspace((3.0 - size as Float) / 2.0, (size as Float - 3.0) / 2.0, size - 2);

        let corners = iproduct!(ends, ends, ends).map(Vector3::from);

        let mut edges = vec![];
        for (c1, c2) in iproduct!(ends, ends) {
            edges.extend(offsets.iter().map(|&o| Vector3::new(o, c1, c2)));
            edges.extend(offsets.iter().map(|&o| Vector3::new(c1, o, c2)));
            edges.extend(offsets.iter().map(|&o| Vector3::new(c1, c2, o)));
        }

        let center_offsets = iproduct!(&offsets, &offsets)
            .map(|(&b, &a)| (a, b))
            .collect_vec();
        let mut centers = vec![];
        for c in ends {
            centers.extend(center_offsets.iter().map(|&(a, b)| Vector3::new(c, a, b)));
            centers.extend(center_offsets.iter().map(|&(a, b)| Vector3::new(a, c, b)));
            centers.extend(center_offsets.iter().map(|&(a, b)| Vector3::new(a, b, c)));
        }

        let pieces = itertools::chain!(
            centers.into_iter().map(|p| Piece::new(PieceKind::Center, p)),
            corners.map(|p| Piece::new(PieceKind::Corner, p)),
            edges.into_iter().map(|p| Piece::new(PieceKind::Edge, p)),
        )
        .collect();

        Self { size, pieces }
    }

    /// Returns the distance from the center of the cube to the center of an
    /// outer layer.
    fn half_width(size: usize) -> Float {
        (size as Float - 1.0) / 2.0
    }

    /// Returns the number of layers along each axis.
    pub fn size(&self) -> usize {
        self.size
    }
    /// Returns all the pieces of the cube.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Resets the cube to its solved state.
    pub fn reset(&mut self) {
        *self = Self::new(self.size);
    }

    /// Returns whether every visible sticker on each side of the cube has the
    /// same color, regardless of how the whole cube is oriented.
    ///
    /// Returns `false` if any piece is not aligned to the axes.
    pub fn is_solved(&self) -> bool {
        let mut color_facing = [None::<Face>; 6];
        for piece in &self.pieces {
            for color in piece.sticker_faces() {
                let Some(direction) = piece.sticker_direction(color) else {
                    return false;
                };
                let slot = &mut color_facing[direction.index()];
                match *slot {
                    None => *slot = Some(color),
                    Some(existing) if existing != color => return false,
                    Some(_) => (),
                }
            }
        }
        true
    }

    fn check_layer(&self, layer: usize) -> Result<(), CubeError> {
        if (1..=self.size).contains(&layer) {
            Ok(())
        } else {
            Err(CubeError::InvalidLayerIndex {
                layer,
                size: self.size,
            })
        }
    }

    /// Returns the indices of the pieces in a layer, counted inward from the
    /// side of the cube that `axis` points toward.
    pub fn layer_pieces(&self, axis: Vector3, layer: usize) -> Result<Vec<usize>, CubeError> {
        let axis = axis.normalize()?;
        self.check_layer(layer)?;
        let dist = Self::half_width(self.size);
        Ok((0..self.pieces.len())
            .filter(|&i| is_in_layer(dist, self.pieces[i].position(), axis, layer))
            .collect())
    }

    /// Rotates a single layer by `angle` radians counterclockwise around
    /// `axis`. Layers are counted inward from the side of the cube that `axis`
    /// points toward, starting at 1.
    pub fn rotate_layer(
        &mut self,
        axis: Vector3,
        layer: usize,
        angle: Float,
    ) -> Result<(), CubeError> {
        let axis = axis.normalize()?;
        self.check_layer(layer)?;
        let rotation = Quaternion::from_normalized_axis_angle(axis, angle);
        self.rotate_layer_unchecked(axis, layer, rotation);
        Ok(())
    }

    /// Rotates every piece in a layer. `axis` must be normalized.
    fn rotate_layer_unchecked(&mut self, axis: Vector3, layer: usize, rotation: Quaternion) {
        let dist = Self::half_width(self.size);
        let mut count = 0;
        for piece in &mut self.pieces {
            if is_in_layer(dist, piece.position(), axis, layer) {
                piece.rotate(rotation);
                count += 1;
            }
        }
        log::trace!("rotated {count} pieces in layer {layer} around {axis}");
        if count == 0 {
            log::warn!("layer {layer} around {axis} has no pieces aligned to it");
        }
    }

    /// Applies a parsed move, scaling each quarter turn to `angle` radians.
    ///
    /// All layers are checked before any piece is moved.
    pub fn apply_move(&mut self, mv: Move, angle: Float) -> Result<(), CubeError> {
        let layers = mv.layers(self.size)?;
        self.apply_move_layers(mv, &layers, angle);
        Ok(())
    }

    /// Applies a move to layers that have already been checked.
    pub(crate) fn apply_move_layers(&mut self, mv: Move, layers: &LayerList, angle: Float) {
        let axis = mv.face.vector();
        let angle = angle * mv.direction.multiplier();
        let rotation = Quaternion::from_normalized_axis_angle(axis, angle);
        log::debug!("applying {mv} to layers {layers:?} by {angle} radians");
        for &layer in layers {
            self.rotate_layer_unchecked(axis, layer, rotation);
        }
    }

    /// Parses and applies a move in canonical notation, scaling each quarter
    /// turn to `angle` radians.
    ///
    /// The cube is unchanged if the move is invalid.
    pub fn rotate(&mut self, s: &str, angle: Float) -> Result<(), CubeError> {
        self.apply_move(Move::parse(s)?, angle)
    }

    /// Parses and applies a full move in canonical notation.
    pub fn rotate_quarter(&mut self, s: &str) -> Result<(), CubeError> {
        self.rotate(s, DEFAULT_ANGLE)
    }

    /// Applies a whitespace-separated sequence of moves in canonical notation.
    ///
    /// The cube is unchanged if any move is invalid.
    pub fn rotate_sequence(&mut self, s: &str, angle: Float) -> Result<(), CubeError> {
        let moves = s
            .split_whitespace()
            .map(|word| {
                let mv = Move::parse(word)?;
                Ok((mv, mv.layers(self.size)?))
            })
            .collect::<Result<Vec<_>, CubeError>>()?;
        for (mv, layers) in &moves {
            self.apply_move_layers(*mv, layers, angle);
        }
        Ok(())
    }

    /// Translates a move from `dialect` into canonical notation and applies
    /// it.
    pub fn rotate_with(
        &mut self,
        dialect: Dialect,
        s: &str,
        angle: Float,
    ) -> Result<(), CubeError> {
        self.apply_move(dialect.parse_move(s)?, angle)
    }
    /// Applies a move in [`Dialect::Size1`] notation.
    pub fn rotate_1x1(&mut self, s: &str, angle: Float) -> Result<(), CubeError> {
        self.rotate_with(Dialect::Size1, s, angle)
    }
    /// Applies a move in [`Dialect::Size2`] notation.
    pub fn rotate_2x2(&mut self, s: &str, angle: Float) -> Result<(), CubeError> {
        self.rotate_with(Dialect::Size2, s, angle)
    }
    /// Applies a move in [`Dialect::Size3`] notation.
    pub fn rotate_3x3(&mut self, s: &str, angle: Float) -> Result<(), CubeError> {
        self.rotate_with(Dialect::Size3, s, angle)
    }
    /// Applies a move in [`Dialect::SizeN`] notation.
    pub fn rotate_nxn(&mut self, s: &str, angle: Float) -> Result<(), CubeError> {
        self.rotate_with(Dialect::SizeN, s, angle)
    }
}

/// Returns whether a piece at `position` is in a layer, where `dist` is the
/// half width of the cube.
fn is_in_layer(dist: Float, position: Vector3, axis: Vector3, layer: usize) -> bool {
    ((dist - position.dot(axis) + 1.0) - layer as Float).abs() < LAYER_EPSILON
}

/// Returns `n` evenly spaced values from `start` to `end` inclusive.
fn linspace(start: Float, end: Float, n: usize) -> Vec<Float> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as Float;
            (0..n).map(|i| start + step * i as Float).collect()
        }
    }
}
