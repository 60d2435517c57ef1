//! JSON run configuration.
//!
//! ```json
//! {
//!   "dataset": { "images_dir": "data/dino", "calibration": "data/dino_info/dino_par.txt" },
//!   "bounds": { "min": [-0.042, 0.001, -0.038], "max": [0.031, 0.088, 0.035] },
//!   "voxel_count": 200000,
//!   "carve": { "policy": { "kind": "consensus" }, "consensus_fraction": 0.8 },
//!   "silhouette": { "threshold": 40, "blur": true },
//!   "output": { "ply": "hull.ply" }
//! }
//! ```

use crate::carve::CarveConfig;
use crate::core::BoundingBox;
use crate::io::silhouette::SilhouetteParams;
use crate::io::LoadError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default number of voxels requested for the initial lattice.
pub const DEFAULT_VOXEL_COUNT: usize = 200_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub images_dir: PathBuf,
    pub calibration: PathBuf,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Point cloud of surviving voxel centers
    pub ply: Option<PathBuf>,
    /// Cube mesh of surviving voxels
    pub obj: Option<PathBuf>,
    /// Directory for per-camera silhouette PNGs
    pub debug_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub dataset: DatasetConfig,
    /// Working volume; derived from camera centers when absent.
    #[serde(default)]
    pub bounds: Option<BoundingBox>,
    #[serde(default = "default_voxel_count")]
    pub voxel_count: usize,
    #[serde(default)]
    pub carve: CarveConfig,
    #[serde(default)]
    pub silhouette: SilhouetteParams,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_voxel_count() -> usize {
    DEFAULT_VOXEL_COUNT
}

pub fn load_config(path: &Path) -> Result<RunConfig, LoadError> {
    let contents = fs::read_to_string(path)?;
    let config: RunConfig = serde_json::from_str(&contents)?;
    Ok(config)
}
