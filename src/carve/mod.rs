//! Voxel carving against calibrated silhouettes.
//!
//! Three policies are available:
//! - `carve_one`: a single view; out-of-frame voxels survive
//! - `carve_sequential`: `carve_one` for every view in turn (all must agree)
//! - `carve_consensus`: a vote threshold over all views; out-of-frame voxels
//!   simply don't vote
//!
//! The single-view and consensus rules treat out-of-frame projections
//! differently on purpose and produce different hulls on noisy masks.
//!
//! Every pass is data-parallel over voxels and returns a new grid; the input
//! grid is never modified.

mod config;
mod consensus;
mod project;
mod single;

pub use config::{CarveConfig, CarvePolicy, DEFAULT_CONSENSUS_FRACTION};
pub use consensus::{carve_consensus, tally_votes, VoteTally};
pub use project::{classify, Classification};
pub use single::{carve_one, carve_sequential};

use crate::core::{CameraSet, CarveError, VoxelGrid};

/// Run the carving policy selected by `config`.
pub fn carve(
    grid: &VoxelGrid,
    cameras: &CameraSet,
    config: &CarveConfig,
) -> Result<VoxelGrid, CarveError> {
    match config.policy {
        CarvePolicy::SingleView { camera } => {
            let view = cameras.get(camera).ok_or_else(|| {
                CarveError::CameraSilhouetteMismatch(format!(
                    "camera index {} out of range for {} cameras",
                    camera,
                    cameras.len()
                ))
            })?;
            single::carve_one_indexed(grid, view, camera)
        }
        CarvePolicy::Sequential => carve_sequential(grid, cameras),
        CarvePolicy::Consensus => carve_consensus(grid, cameras, config),
    }
}

/// Voxel counts before and after a carving pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarveStats {
    pub input: usize,
    pub kept: usize,
    pub removed: usize,
}

impl CarveStats {
    pub fn between(before: &VoxelGrid, after: &VoxelGrid) -> Self {
        let input = before.len();
        let kept = after.len();
        Self {
            input,
            kept,
            removed: input.saturating_sub(kept),
        }
    }

    /// Fraction of input voxels that survived (0 for an empty input).
    pub fn kept_fraction(&self) -> f64 {
        if self.input == 0 {
            0.0
        } else {
            self.kept as f64 / self.input as f64
        }
    }
}
