//! OBJ export of carved voxels as cube meshes.
//!
//! OBJ format is simple:
//! ```text
//! v x y z           # Vertex positions
//! f i j k l         # Faces (1-based vertex indices)
//! ```
//! Every voxel becomes its own cube with 8 vertices and 6 quads; shared faces
//! between neighbours are not merged.

use crate::core::VoxelGrid;
use crate::io::LoadError;
use nalgebra::Vector3;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Cube corner offsets in units of half the side length.
const CORNERS: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Quads as 0-based corner indices, counter-clockwise seen from outside.
const FACES: [[usize; 4]; 6] = [
    [0, 3, 2, 1], // -z
    [4, 5, 6, 7], // +z
    [0, 1, 5, 4], // -y
    [2, 3, 7, 6], // +y
    [0, 4, 7, 3], // -x
    [1, 2, 6, 5], // +x
];

/// Save voxels as a cube mesh in OBJ format.
pub fn save_voxels_obj(grid: &VoxelGrid, path: &Path) -> Result<(), LoadError> {
    let mut file = BufWriter::new(File::create(path)?);
    write_voxels_obj(grid, &mut file)?;
    file.flush()?;
    Ok(())
}

pub fn write_voxels_obj<W: Write>(grid: &VoxelGrid, out: &mut W) -> std::io::Result<()> {
    let half = grid.side_length() / 2.0;

    writeln!(out, "# {} voxels, side {}", grid.len(), grid.side_length())?;
    for center in grid {
        for corner in &CORNERS {
            let p = center + Vector3::from(*corner) * half;
            writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
        }
    }

    for voxel in 0..grid.len() {
        let base = voxel * CORNERS.len() + 1;
        for face in &FACES {
            writeln!(
                out,
                "f {} {} {} {}",
                base + face[0],
                base + face[1],
                base + face[2],
                base + face[3]
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_single_cube() {
        let grid = VoxelGrid::from_centers(vec![Point3::new(1.0, 1.0, 1.0)], 2.0);
        let mut buf = Vec::new();
        write_voxels_obj(&grid, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let vertices: Vec<&str> = text.lines().filter(|l| l.starts_with("v ")).collect();
        let faces: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();
        assert_eq!(vertices.len(), 8);
        assert_eq!(faces.len(), 6);
        assert_eq!(vertices[0], "v 0 0 0");
        assert_eq!(vertices[6], "v 2 2 2");
        assert_eq!(faces[0], "f 1 4 3 2");
    }

    #[test]
    fn test_second_cube_indices_are_offset() {
        let grid = VoxelGrid::from_centers(
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(5.0, 0.0, 0.0)],
            1.0,
        );
        let mut buf = Vec::new();
        write_voxels_obj(&grid, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let faces: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();
        assert_eq!(faces.len(), 12);
        assert_eq!(faces[6], "f 9 12 11 10");
    }
}
