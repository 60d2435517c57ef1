//! Single-view carving and its sequential composition.
//!
//! A single view can only disprove voxels it actually sees: voxels that
//! project outside the frame are kept, voxels that land on background are
//! removed.

use super::project::{classify, Classification};
use crate::core::{CameraSet, CameraView, CarveError, VoxelGrid};
use rayon::prelude::*;

fn keep_mask(grid: &VoxelGrid, view: &CameraView, camera: usize) -> Result<Vec<bool>, CarveError> {
    grid.centers()
        .par_iter()
        .map(|center| {
            classify(view, camera, center).map(|c| c != Classification::Background)
        })
        .collect()
}

/// Carve `grid` against one view.
pub fn carve_one(grid: &VoxelGrid, view: &CameraView) -> Result<VoxelGrid, CarveError> {
    carve_one_indexed(grid, view, 0)
}

/// Like [`carve_one`], labelling degenerate projections with `camera`.
pub(crate) fn carve_one_indexed(
    grid: &VoxelGrid,
    view: &CameraView,
    camera: usize,
) -> Result<VoxelGrid, CarveError> {
    let mask = keep_mask(grid, view, camera)?;
    Ok(grid.retain_mask(&mask))
}

/// Apply [`carve_one`] for every camera in order on the shrinking grid.
///
/// Every view must agree for a voxel to survive, which makes this stricter
/// than consensus carving on noisy silhouettes.
pub fn carve_sequential(grid: &VoxelGrid, cameras: &CameraSet) -> Result<VoxelGrid, CarveError> {
    let mut current = grid.clone();
    for (index, view) in cameras.iter().enumerate() {
        let before = current.len();
        current = carve_one_indexed(&current, view, index)?;
        log::debug!(
            "camera {} ({}): {} -> {} voxels",
            index,
            view.name,
            before,
            current.len()
        );
        if current.is_empty() {
            break;
        }
    }
    Ok(current)
}
