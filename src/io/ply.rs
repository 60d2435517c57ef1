//! PLY export of carved voxel grids.
//!
//! Voxels are written as an ASCII point cloud of their centers. The shared
//! side length goes into a `comment voxel_size` header line so viewers (or
//! [`read_voxel_size`]) can rebuild cubes from the points.

use crate::core::VoxelGrid;
use crate::io::LoadError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Save voxel centers to an ASCII PLY point cloud.
pub fn save_voxels_ply(grid: &VoxelGrid, path: &Path) -> Result<(), LoadError> {
    let mut file = BufWriter::new(File::create(path)?);
    write_voxels_ply(grid, &mut file)?;
    file.flush()?;
    Ok(())
}

/// Write the PLY representation of `grid` to any writer.
pub fn write_voxels_ply<W: Write>(grid: &VoxelGrid, out: &mut W) -> std::io::Result<()> {
    // Header
    writeln!(out, "ply")?;
    writeln!(out, "format ascii 1.0")?;
    writeln!(out, "comment voxel_size {}", grid.side_length())?;
    writeln!(out, "element vertex {}", grid.len())?;
    writeln!(out, "property double x")?;
    writeln!(out, "property double y")?;
    writeln!(out, "property double z")?;
    writeln!(out, "end_header")?;

    for c in grid {
        writeln!(out, "{} {} {}", c.x, c.y, c.z)?;
    }

    Ok(())
}

/// Read back the `comment voxel_size` value from a PLY header, if present.
pub fn read_voxel_size(contents: &str) -> Option<f64> {
    contents
        .lines()
        .take_while(|l| l.trim() != "end_header")
        .find_map(|l| l.trim().strip_prefix("comment voxel_size "))
        .and_then(|v| v.trim().parse().ok())
}
