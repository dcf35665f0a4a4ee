//! Quads for drawing pieces.
//!
//! Each piece is a unit cube with black body faces. Each sticker is a slightly
//! smaller colored quad floating just above the body face.

use cubemath::{Float, Vector3};

use crate::{Cube, Face, Piece, PieceKind, Rgb};

/// Default size of a sticker relative to the piece.
pub const DEFAULT_STICKER_FACTOR: Float = 0.9;

/// Distance of a sticker from the center of its piece, relative to the body
/// face.
const STICKER_OFFSET: Float = 1.01;

/// Corners of a face in drawing order.
const FACE_CORNERS: [(Float, Float); 4] = [(-1.0, -1.0), (-1.0, 1.0), (1.0, 1.0), (1.0, -1.0)];

/// What part of a piece a quad belongs to.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum QuadKind {
    /// Black face of the piece.
    Body,
    /// Colored sticker.
    Sticker,
}

/// Flat quadrilateral with a solid color.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quad {
    /// Part of the piece.
    pub kind: QuadKind,
    /// Fill color.
    pub color: Rgb,
    /// Vertices in winding order.
    pub vertices: [Vector3; 4],
}

/// Returns the quads for a piece in its current position and orientation.
pub fn piece_quads(piece: &Piece, sticker_factor: Float) -> Vec<Quad> {
    let orientation = piece.orientation();
    let position = piece.position();
    local_piece_quads(piece, sticker_factor)
        .into_iter()
        .map(|quad| Quad {
            vertices: quad.vertices.map(|v| orientation.rotate_vector(v) + position),
            ..quad
        })
        .collect()
}

/// Returns the quads for every piece of a cube, in piece order.
pub fn cube_quads(cube: &Cube, sticker_factor: Float) -> Vec<Vec<Quad>> {
    cube.pieces()
        .iter()
        .map(|piece| piece_quads(piece, sticker_factor))
        .collect()
}

/// Returns the quads for a piece centered at the origin in its solved
/// orientation.
///
/// Body faces that can never be seen are skipped.
pub fn local_piece_quads(piece: &Piece, sticker_factor: Float) -> Vec<Quad> {
    let colors = piece.colors();
    let uncolored_axis = (0..3).find(|&axis| !colors[axis * 2] && !colors[axis * 2 + 1]);
    let colored_axis = colors.iter().position(|&c| c).map(|i| i / 2);

    let mut quads = vec![];
    for face in Face::iter() {
        let axis = face.axis() as usize;
        if piece.has_color(face) {
            quads.push(face_quad(face, QuadKind::Body, sticker_factor));
            quads.push(face_quad(face, QuadKind::Sticker, sticker_factor));
        } else {
            let has_body_face = match piece.kind() {
                PieceKind::Corner | PieceKind::SingleCubie => true,
                PieceKind::Edge => uncolored_axis == Some(axis),
                PieceKind::Center => colored_axis != Some(axis),
            };
            if has_body_face {
                quads.push(face_quad(face, QuadKind::Body, sticker_factor));
            }
        }
    }
    quads
}

fn face_quad(face: Face, kind: QuadKind, sticker_factor: Float) -> Quad {
    let (height, scale, color) = match kind {
        QuadKind::Body => (1.0, 1.0, Rgb::BLACK),
        QuadKind::Sticker => (STICKER_OFFSET, sticker_factor, face.color()),
    };

    let axis = face.axis() as i8;
    let sign = face.sign();
    let u = (axis + 2 * sign.int()).rem_euclid(3) as usize;
    let v = (axis + sign.int()).rem_euclid(3) as usize;

    let vertices = FACE_CORNERS.map(|(c1, c2)| {
        let mut vertex = Vector3::ZERO;
        vertex[axis as usize] = sign.float() * height;
        vertex[u] = c1 * scale;
        vertex[v] = c2 * scale;
        vertex * 0.5
    });

    Quad {
        kind,
        color,
        vertices,
    }
}
