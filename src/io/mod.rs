//! I/O operations for loading datasets and saving results.
//!
//! This module handles everything around the carving core:
//! - Calibration text files (per-camera K, R, t)
//! - Image loading and silhouette extraction
//! - Pairing calibration records with silhouettes by file name
//! - PLY / OBJ export of carved voxels
//! - JSON run configuration

pub mod calibration;
pub mod config;
mod dataset;
mod images;
mod obj;
mod ply;
pub mod silhouette;

// Re-export public types and functions
pub use calibration::{load_calibration, parse_calibration, CalibrationRecord, LoadError};
pub use config::{load_config, DatasetConfig, OutputConfig, RunConfig, DEFAULT_VOXEL_COUNT};
pub use dataset::{assemble_cameras, load_dataset, Dataset, DatasetLayout};
pub use images::load_image_dir;
pub use obj::{save_voxels_obj, write_voxels_obj};
pub use ply::{read_voxel_size, save_voxels_ply, write_voxels_ply};
pub use silhouette::{
    box_blur_3x3, extract_silhouette, luma_601, save_silhouette_png, threshold_binary,
    SilhouetteParams,
};
