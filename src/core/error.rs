//! Errors raised by grid construction and carving.

use thiserror::Error;

/// Errors that can occur while building a voxel grid or carving it.
///
/// None of these are transient: they describe bad input data, so callers
/// should surface them rather than retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CarveError {
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    #[error(
        "Degenerate projection in camera {camera}: voxel at {voxel:?} has homogeneous depth {depth}"
    )]
    DegenerateProjection {
        /// Index of the camera within its `CameraSet`
        camera: usize,
        /// World-space voxel center
        voxel: [f64; 3],
        /// Homogeneous depth `w` of the projected point
        depth: f64,
    },

    #[error("Camera/silhouette mismatch: {0}")]
    CameraSilhouetteMismatch(String),

    #[error("Invalid carve configuration: {0}")]
    InvalidConfig(String),
}
