//! Multi-view consensus carving.
//!
//! Each camera casts one vote for a voxel when the voxel projects onto a
//! foreground pixel. Out-of-frame and background projections cast nothing, but
//! the threshold is still taken over the full camera count, so voxels that few
//! cameras can see are dropped.

use super::config::CarveConfig;
use super::project::{classify, Classification};
use crate::core::{CameraSet, CarveError, VoxelGrid};
use rayon::prelude::*;

/// Foreground vote counts for every voxel of a grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteTally {
    votes: Vec<usize>,
    cameras: usize,
}

impl VoteTally {
    /// Votes per voxel, in grid order.
    pub fn votes(&self) -> &[usize] {
        &self.votes
    }

    /// Number of cameras that voted.
    pub fn cameras(&self) -> usize {
        self.cameras
    }

    /// Keep the voxels of `grid` with at least `min_votes` votes.
    ///
    /// `grid` must be the grid this tally was computed from.
    pub fn retain(&self, grid: &VoxelGrid, min_votes: usize) -> Result<VoxelGrid, CarveError> {
        if grid.len() != self.votes.len() {
            return Err(CarveError::InvalidConfig(format!(
                "tally has {} entries but grid has {} voxels",
                self.votes.len(),
                grid.len()
            )));
        }
        let mask: Vec<bool> = self.votes.iter().map(|&v| v >= min_votes).collect();
        Ok(grid.retain_mask(&mask))
    }

    /// Histogram of vote counts: entry `k` is how many voxels got exactly `k` votes.
    pub fn histogram(&self) -> Vec<usize> {
        let mut hist = vec![0; self.cameras + 1];
        for &v in &self.votes {
            hist[v] += 1;
        }
        hist
    }
}

/// Count foreground votes for every voxel across every camera.
pub fn tally_votes(grid: &VoxelGrid, cameras: &CameraSet) -> Result<VoteTally, CarveError> {
    let votes = grid
        .centers()
        .par_iter()
        .map(|center| {
            cameras
                .iter()
                .enumerate()
                .try_fold(0usize, |acc, (index, view)| {
                    classify(view, index, center)
                        .map(|c| acc + usize::from(c == Classification::Foreground))
                })
        })
        .collect::<Result<Vec<usize>, CarveError>>()?;

    Ok(VoteTally {
        votes,
        cameras: cameras.len(),
    })
}

/// Keep voxels seen as foreground by at least `config.threshold(N)` cameras.
pub fn carve_consensus(
    grid: &VoxelGrid,
    cameras: &CameraSet,
    config: &CarveConfig,
) -> Result<VoxelGrid, CarveError> {
    let threshold = config.threshold(cameras.len())?;
    let tally = tally_votes(grid, cameras)?;
    log::debug!(
        "consensus threshold {}/{}; vote histogram {:?}",
        threshold,
        cameras.len(),
        tally.histogram()
    );
    tally.retain(grid, threshold)
}
