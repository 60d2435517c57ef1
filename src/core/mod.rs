//! Core data structures and mathematical operations.
//!
//! This module contains the fundamental types used throughout the system:
//! - `BoundingBox`: the working volume
//! - `VoxelGrid`: voxel centers plus a shared side length
//! - `ProjectionMatrix`: 3x4 pinhole projection
//! - `Silhouette` / `CameraSet`: binary masks paired with their cameras
//!
//! All types here are "pure data" - no I/O, no carving logic.

mod bounds;
mod camera;
mod camera_set;
mod error;
mod grid;
pub mod math;
mod silhouette;

// Re-export public types
pub use bounds::BoundingBox;
pub use camera::{camera_center, Projected, ProjectionMatrix, DEPTH_EPSILON};
pub use camera_set::{CameraSet, CameraView};
pub use error::CarveError;
pub use grid::{build_grid, grid_dims, GridDims, VoxelGrid};
pub use silhouette::{Silhouette, FOREGROUND_VALUE};
