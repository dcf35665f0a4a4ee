use cubemath::DegenerateVectorError;
use thiserror::Error;

/// Error produced when constructing or rotating a cube.
///
/// A rejected operation never modifies the cube.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    /// Layer index outside `1..=size`
    #[error("layer {layer} is out of range for a cube with {size} layers")]
    InvalidLayerIndex {
        /// Requested 1-based layer index.
        layer: usize,
        /// Number of layers along each axis.
        size: usize,
    },
    /// Rotation axis has zero length
    #[error(transparent)]
    DegenerateVector(#[from] DegenerateVectorError),
    /// Move string not recognized by the active notation dialect
    #[error("invalid move notation {0:?}")]
    InvalidNotation(String),
}

impl CubeError {
    pub(crate) fn invalid_notation(s: &str) -> Self {
        Self::InvalidNotation(s.to_owned())
    }
}
