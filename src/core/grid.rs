//! Uniform voxel lattice.
//!
//! A `VoxelGrid` is the list of voxel centers plus the side length shared by
//! every voxel. Carving passes never mutate a grid; they return a filtered
//! copy.

use crate::core::{BoundingBox, CarveError};
use nalgebra::Point3;

/// Number of cells along each axis of a freshly built lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDims {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl GridDims {
    /// Number of cells in the lattice (`nx * ny * nz`).
    pub fn count(&self) -> usize {
        self.nx * self.ny * self.nz
    }
}

/// An ordered set of voxel centers with a uniform side length.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    centers: Vec<Point3<f64>>,
    side_length: f64,
}

impl VoxelGrid {
    /// Wrap an existing list of centers.
    ///
    /// Any point set with a shared side length is a valid grid for carving,
    /// it does not have to come from [`build_grid`].
    pub fn from_centers(centers: Vec<Point3<f64>>, side_length: f64) -> Self {
        Self {
            centers,
            side_length,
        }
    }

    pub fn centers(&self) -> &[Point3<f64>] {
        &self.centers
    }

    pub fn side_length(&self) -> f64 {
        self.side_length
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3<f64>> {
        self.centers.iter()
    }

    /// Keep the voxels whose mask entry is `true`, preserving order.
    ///
    /// # Panics
    /// Panics if `mask.len() != self.len()`.
    pub(crate) fn retain_mask(&self, mask: &[bool]) -> VoxelGrid {
        assert_eq!(
            mask.len(),
            self.centers.len(),
            "mask length must match voxel count"
        );

        let centers = self
            .centers
            .iter()
            .zip(mask)
            .filter_map(|(c, &keep)| keep.then_some(*c))
            .collect();

        VoxelGrid {
            centers,
            side_length: self.side_length,
        }
    }
}

impl<'a> IntoIterator for &'a VoxelGrid {
    type Item = &'a Point3<f64>;
    type IntoIter = std::slice::Iter<'a, Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.centers.iter()
    }
}

/// Side length of a cube whose volume is `bounds.volume() / target_count`.
fn side_length_for(bounds: &BoundingBox, target_count: usize) -> Result<f64, CarveError> {
    if target_count == 0 {
        return Err(CarveError::InvalidBounds(
            "target voxel count must be positive".to_string(),
        ));
    }

    let extents = bounds.extents();
    if extents.iter().any(|&e| !(e.is_finite() && e > 0.0)) {
        return Err(CarveError::InvalidBounds(format!(
            "extents must be positive, got {:?}",
            extents.as_slice()
        )));
    }

    let cell_volume = bounds.volume() / target_count as f64;
    Ok(cell_volume.cbrt())
}

/// Per-axis cell counts for a lattice over `bounds` aiming at `target_count` voxels.
///
/// Counts truncate (`floor(extent / side)`), so the realized voxel count is
/// generally below the target.
pub fn grid_dims(bounds: &BoundingBox, target_count: usize) -> Result<(GridDims, f64), CarveError> {
    let side = side_length_for(bounds, target_count)?;
    let extents = bounds.extents();

    let dims = GridDims {
        nx: (extents.x / side).floor() as usize,
        ny: (extents.y / side).floor() as usize,
        nz: (extents.z / side).floor() as usize,
    };

    if dims.count() == 0 {
        return Err(CarveError::InvalidBounds(format!(
            "lattice is empty ({}x{}x{}) for side length {}",
            dims.nx, dims.ny, dims.nz, side
        )));
    }

    Ok((dims, side))
}

/// Build the initial voxel lattice over `bounds`.
///
/// Voxel centers sit at `min + (index * side + side / 2)` along each axis and
/// are enumerated with x outermost and z innermost.
pub fn build_grid(bounds: &BoundingBox, target_count: usize) -> Result<VoxelGrid, CarveError> {
    let (dims, side) = grid_dims(bounds, target_count)?;
    let half = side / 2.0;
    let min = bounds.min();

    let mut centers = Vec::with_capacity(dims.count());
    for i in 0..dims.nx {
        let x = min.x + (i as f64 * side + half);
        for j in 0..dims.ny {
            let y = min.y + (j as f64 * side + half);
            for k in 0..dims.nz {
                let z = min.z + (k as f64 * side + half);
                centers.push(Point3::new(x, y, z));
            }
        }
    }

    log::debug!(
        "built {}x{}x{} voxel lattice ({} voxels, side {:.6}) for target {}",
        dims.nx,
        dims.ny,
        dims.nz,
        centers.len(),
        side,
        target_count
    );

    Ok(VoxelGrid {
        centers,
        side_length: side,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box(size: f64) -> BoundingBox {
        BoundingBox::new(Point3::origin(), Point3::new(size, size, size)).unwrap()
    }

    #[test]
    fn test_two_by_two_by_two() {
        let grid = build_grid(&unit_box(2.0), 8).unwrap();
        assert_relative_eq!(grid.side_length(), 1.0, epsilon = 1e-12);
        assert_eq!(grid.len(), 8);
        assert_relative_eq!(grid.centers()[0], Point3::new(0.5, 0.5, 0.5), epsilon = 1e-12);
        // z is the innermost axis
        assert_relative_eq!(grid.centers()[1], Point3::new(0.5, 0.5, 1.5), epsilon = 1e-12);
        assert_relative_eq!(grid.centers()[7], Point3::new(1.5, 1.5, 1.5), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_target_rejected() {
        assert!(matches!(
            build_grid(&unit_box(1.0), 0),
            Err(CarveError::InvalidBounds(_))
        ));
    }

    #[test]
    fn test_thin_box_with_empty_axis_rejected() {
        // side = cbrt(0.001) = 0.1 > 0.001, so the z axis has no cells
        let bounds =
            BoundingBox::new(Point3::origin(), Point3::new(1.0, 1.0, 0.001)).unwrap();
        assert!(matches!(
            build_grid(&bounds, 1),
            Err(CarveError::InvalidBounds(_))
        ));
    }

    #[test]
    fn test_dims_truncate() {
        let bounds = BoundingBox::new(Point3::origin(), Point3::new(3.0, 2.0, 1.0)).unwrap();
        let (dims, side) = grid_dims(&bounds, 6).unwrap();
        assert_relative_eq!(side, 1.0, epsilon = 1e-12);
        assert_eq!(dims, GridDims { nx: 3, ny: 2, nz: 1 });
    }

    #[test]
    fn test_retain_mask_preserves_order_and_side() {
        let grid = build_grid(&unit_box(2.0), 8).unwrap();
        let mask = [true, false, false, true, false, false, false, true];
        let kept = grid.retain_mask(&mask);

        assert_eq!(kept.len(), 3);
        assert_eq!(kept.side_length(), grid.side_length());
        assert_eq!(kept.centers()[0], grid.centers()[0]);
        assert_eq!(kept.centers()[1], grid.centers()[3]);
        assert_eq!(kept.centers()[2], grid.centers()[7]);
        // input untouched
        assert_eq!(grid.len(), 8);
    }
}
