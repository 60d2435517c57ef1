//! Axis-aligned bounding volume for the voxel lattice.

use crate::core::CarveError;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// An axis-aligned box with `max[i] > min[i]` on every axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct BoundingBox {
    min: Point3<f64>,
    max: Point3<f64>,
}

#[derive(Deserialize)]
struct RawBounds {
    min: [f64; 3],
    max: [f64; 3],
}

impl TryFrom<RawBounds> for BoundingBox {
    type Error = CarveError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        BoundingBox::new(Point3::from(raw.min), Point3::from(raw.max))
    }
}

impl BoundingBox {
    /// Create a box, rejecting non-finite corners and empty or inverted extents.
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Result<Self, CarveError> {
        for axis in 0..3 {
            if !min[axis].is_finite() || !max[axis].is_finite() {
                return Err(CarveError::InvalidBounds(format!(
                    "non-finite coordinate on axis {}: min={}, max={}",
                    axis, min[axis], max[axis]
                )));
            }
            if max[axis] <= min[axis] {
                return Err(CarveError::InvalidBounds(format!(
                    "extent on axis {} is not positive: min={}, max={}",
                    axis, min[axis], max[axis]
                )));
            }
        }
        Ok(Self { min, max })
    }

    /// Smallest box containing every point.
    ///
    /// Fails if there are no points or if they are coplanar along some axis,
    /// since the result would have a zero extent.
    pub fn enclosing<'a, I>(points: I) -> Result<Self, CarveError>
    where
        I: IntoIterator<Item = &'a Point3<f64>>,
    {
        let mut iter = points.into_iter();
        let first = iter
            .next()
            .ok_or_else(|| CarveError::InvalidBounds("no points to enclose".to_string()))?;

        let mut min = *first;
        let mut max = *first;
        for p in iter {
            min = min.inf(p);
            max = max.sup(p);
        }

        Self::new(min, max)
    }

    pub fn min(&self) -> &Point3<f64> {
        &self.min
    }

    pub fn max(&self) -> &Point3<f64> {
        &self.max
    }

    /// Edge lengths along x, y and z.
    pub fn extents(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn volume(&self) -> f64 {
        let e = self.extents();
        e.x * e.y * e.z
    }

    /// True if `p` lies inside the box (boundaries included).
    pub fn contains(&self, p: &Point3<f64>) -> bool {
        (0..3).all(|axis| p[axis] >= self.min[axis] && p[axis] <= self.max[axis])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_inverted_axis() {
        let err = BoundingBox::new(Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 1.0, 1.0));
        assert!(matches!(err, Err(CarveError::InvalidBounds(_))));
    }

    #[test]
    fn test_rejects_nan() {
        let err = BoundingBox::new(Point3::new(f64::NAN, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert!(matches!(err, Err(CarveError::InvalidBounds(_))));
    }

    #[test]
    fn test_extents_and_volume() {
        let b = BoundingBox::new(Point3::new(-1.0, 0.0, 2.0), Point3::new(1.0, 3.0, 6.0)).unwrap();
        assert_relative_eq!(b.extents(), Vector3::new(2.0, 3.0, 4.0));
        assert_relative_eq!(b.volume(), 24.0);
    }

    #[test]
    fn test_enclosing_points() {
        let points = vec![
            Point3::new(1.0, -2.0, 0.5),
            Point3::new(-3.0, 4.0, 0.0),
            Point3::new(0.0, 0.0, 2.0),
        ];
        let b = BoundingBox::enclosing(&points).unwrap();
        assert_relative_eq!(*b.min(), Point3::new(-3.0, -2.0, 0.0));
        assert_relative_eq!(*b.max(), Point3::new(1.0, 4.0, 2.0));
        assert!(points.iter().all(|p| b.contains(p)));
    }

    #[test]
    fn test_enclosing_empty_fails() {
        let points: Vec<Point3<f64>> = Vec::new();
        assert!(BoundingBox::enclosing(&points).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: BoundingBox =
            serde_json::from_str(r#"{"min":[0,0,0],"max":[1,2,3]}"#).unwrap();
        assert_relative_eq!(ok.volume(), 6.0);

        let bad = serde_json::from_str::<BoundingBox>(r#"{"min":[0,0,0],"max":[1,0,3]}"#);
        assert!(bad.is_err());
    }
}
