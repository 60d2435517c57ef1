//! Per-voxel silhouette test for one camera.

use crate::core::math::{pixel_index, round_pixel};
use crate::core::{CameraView, CarveError, Projected};
use nalgebra::Point3;

/// Where a voxel center lands in one camera's silhouette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Rounded pixel lies outside the image (including negative indices).
    OutOfFrame,
    /// In frame, on an object pixel.
    Foreground,
    /// In frame, on a background pixel.
    Background,
}

/// Project `center` through `view` and look it up in the view's silhouette.
///
/// `camera` is only used to label a degenerate-projection error.
pub fn classify(
    view: &CameraView,
    camera: usize,
    center: &Point3<f64>,
) -> Result<Classification, CarveError> {
    let pixel = match view.projection.project(center) {
        Projected::Pixel(p) => p,
        Projected::Degenerate { depth } => {
            return Err(CarveError::DegenerateProjection {
                camera,
                voxel: [center.x, center.y, center.z],
                depth,
            })
        }
    };

    let silhouette = &view.silhouette;
    let u = pixel_index(round_pixel(pixel.x), silhouette.width());
    let v = pixel_index(round_pixel(pixel.y), silhouette.height());

    let (Some(u), Some(v)) = (u, v) else {
        return Ok(Classification::OutOfFrame);
    };

    // Both indices were bounds-checked above
    Ok(match silhouette.get(u, v) {
        Some(true) => Classification::Foreground,
        Some(false) => Classification::Background,
        None => Classification::OutOfFrame,
    })
}
