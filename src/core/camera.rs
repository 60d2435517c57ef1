//! Camera projection (3x4 matrix built from intrinsics and extrinsics).
//!
//! Cameras are used to:
//! - Project voxel centers to pixel coordinates
//! - Locate camera centers for deriving a working volume

use nalgebra::{Matrix3, Matrix3x4, Point3, Vector2, Vector3};

/// Homogeneous depths with magnitude below this are treated as degenerate.
pub const DEPTH_EPSILON: f64 = 1e-12;

/// A pinhole projection `P = K * [R | t]` mapping `[x, y, z, 1]` to `[u, v, w]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionMatrix {
    matrix: Matrix3x4<f64>,
}

/// Result of projecting a point through a `ProjectionMatrix`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projected {
    /// Pixel coordinates `(u / w, v / w)`, not yet rounded.
    Pixel(Vector2<f64>),
    /// `w` was zero, nearly zero, or the result was not finite.
    Degenerate { depth: f64 },
}

impl ProjectionMatrix {
    /// Wrap a raw 3x4 projection matrix.
    pub fn new(matrix: Matrix3x4<f64>) -> Self {
        Self { matrix }
    }

    /// Compose intrinsics `K` with the world-to-camera pose `[R | t]`.
    ///
    /// p_image = K * (R * p_world + t)
    pub fn from_intrinsics_pose(
        intrinsics: &Matrix3<f64>,
        rotation: &Matrix3<f64>,
        translation: &Vector3<f64>,
    ) -> Self {
        let mut extrinsics = Matrix3x4::zeros();
        extrinsics.fixed_view_mut::<3, 3>(0, 0).copy_from(rotation);
        extrinsics.set_column(3, translation);
        Self {
            matrix: intrinsics * extrinsics,
        }
    }

    pub fn matrix(&self) -> &Matrix3x4<f64> {
        &self.matrix
    }

    /// Homogeneous image coordinates `[u, v, w]` of a world point.
    pub fn apply(&self, point: &Point3<f64>) -> Vector3<f64> {
        self.matrix * point.to_homogeneous()
    }

    /// Project a world point to (unrounded) pixel coordinates.
    ///
    /// No check is made for points behind the camera; only the homogeneous
    /// divide is guarded.
    pub fn project(&self, point: &Point3<f64>) -> Projected {
        let q = self.apply(point);
        if !q.z.is_finite() || q.z.abs() < DEPTH_EPSILON {
            return Projected::Degenerate { depth: q.z };
        }

        let pixel = Vector2::new(q.x / q.z, q.y / q.z);
        if !(pixel.x.is_finite() && pixel.y.is_finite()) {
            return Projected::Degenerate { depth: q.z };
        }
        Projected::Pixel(pixel)
    }
}

/// Camera center in world coordinates for a `[R | t]` pose: C = -R^T * t
pub fn camera_center(rotation: &Matrix3<f64>, translation: &Vector3<f64>) -> Point3<f64> {
    Point3::from(-rotation.transpose() * translation)
}
