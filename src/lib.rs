//! # carve-rs: Shape-from-Silhouette Voxel Carving in Rust
//!
//! This crate reconstructs a coarse 3D occupancy model (a visual hull) of an
//! object from calibrated camera images. A bounding volume is split into a
//! uniform voxel lattice; every voxel center is projected into each camera and
//! tested against that camera's binary silhouette.
//!
//! ## Architecture
//!
//! The crate is organized into three modules:
//!
//! - `core`: Fundamental data structures (bounds, voxel grid, projection
//!   matrices, silhouettes, camera sets)
//! - `carve`: Carving policies (single view, sequential, consensus vote)
//! - `io`: File I/O (calibration parsing, silhouette extraction, PLY/OBJ
//!   export, JSON configuration)
//!
//! ## Example
//!
//! ```no_run
//! use carve_rs::carve::{carve, CarveConfig};
//! use carve_rs::core::{build_grid, BoundingBox};
//! use carve_rs::io::{load_dataset, save_voxels_ply, SilhouetteParams};
//! use nalgebra::Point3;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = load_dataset(
//!     Path::new("data/dino"),
//!     Path::new("data/dino_info/dino_par.txt"),
//!     &SilhouetteParams::default(),
//! )?;
//! let bounds = BoundingBox::new(
//!     Point3::new(-0.041897, 0.001126, -0.037845),
//!     Point3::new(0.030897, 0.088227, 0.035495),
//! )?;
//! let grid = build_grid(&bounds, 200_000)?;
//! let hull = carve(&grid, &dataset.cameras, &CarveConfig::default())?;
//! save_voxels_ply(&hull, Path::new("hull.ply"))?;
//! # Ok(())
//! # }
//! ```

// Core data structures and math
pub mod core;

// Carving policies
pub mod carve;

// I/O operations (calibration, images, PLY/OBJ, config)
pub mod io;

// Re-export commonly used types at crate root for convenience
pub use crate::carve::{carve, CarveConfig, CarvePolicy};
pub use crate::core::{build_grid, BoundingBox, CameraSet, CarveError, VoxelGrid};
pub use crate::io::LoadError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
