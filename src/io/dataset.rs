//! Assemble a `CameraSet` from an image directory and a calibration file.
//!
//! Cameras are paired with silhouettes by image file name. The calibration
//! file order decides camera order; directory order is irrelevant.

use crate::core::{BoundingBox, CameraSet, CameraView, CarveError, Silhouette};
use crate::io::calibration::{load_calibration, CalibrationRecord};
use crate::io::images::load_image_dir;
use crate::io::silhouette::{extract_silhouette, SilhouetteParams};
use crate::io::LoadError;
use nalgebra::Point3;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Conventional on-disk layout of a named dataset:
/// ```text
/// <root>/<name>/                    images
/// <root>/<name>_info/<name>_par.txt calibration
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetLayout {
    pub images_dir: PathBuf,
    pub calibration: PathBuf,
}

impl DatasetLayout {
    pub fn named(root: &Path, name: &str) -> Self {
        Self {
            images_dir: root.join(name),
            calibration: root
                .join(format!("{}_info", name))
                .join(format!("{}_par.txt", name)),
        }
    }
}

/// A loaded dataset: cameras in calibration order plus the raw records.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub cameras: CameraSet,
    pub records: Vec<CalibrationRecord>,
}

impl Dataset {
    /// Camera positions in world coordinates, in camera order.
    pub fn camera_centers(&self) -> Vec<Point3<f64>> {
        self.records.iter().map(|r| r.camera_center()).collect()
    }

    /// Smallest box containing every camera center.
    pub fn camera_bounds(&self) -> Result<BoundingBox, CarveError> {
        BoundingBox::enclosing(&self.camera_centers())
    }
}

/// Pair each calibration record with the silhouette of the same file name.
///
/// A record without a matching silhouette is an error; silhouettes without a
/// record are skipped.
pub fn assemble_cameras(
    records: &[CalibrationRecord],
    mut silhouettes: HashMap<String, Silhouette>,
) -> Result<CameraSet, CarveError> {
    let mut views = Vec::with_capacity(records.len());
    for record in records {
        let silhouette = silhouettes.remove(&record.name).ok_or_else(|| {
            CarveError::CameraSilhouetteMismatch(format!(
                "calibration references {:?} but no such image was loaded",
                record.name
            ))
        })?;
        views.push(CameraView::new(
            record.name.clone(),
            record.projection(),
            silhouette,
        ));
    }

    if !silhouettes.is_empty() {
        let mut unused: Vec<&String> = silhouettes.keys().collect();
        unused.sort();
        log::warn!(
            "{} images have no calibration record and are ignored: {:?}",
            unused.len(),
            unused
        );
    }

    CameraSet::new(views)
}

/// Load images, extract silhouettes and pair them with the calibration.
pub fn load_dataset(
    images_dir: &Path,
    calibration: &Path,
    params: &SilhouetteParams,
) -> Result<Dataset, LoadError> {
    let records = load_calibration(calibration)?;
    let images = load_image_dir(images_dir)?;

    let silhouettes: HashMap<String, Silhouette> = images
        .par_iter()
        .map(|(name, img)| (name.clone(), extract_silhouette(img, params)))
        .collect();
    log::info!(
        "extracted {} silhouettes (threshold {}, blur {})",
        silhouettes.len(),
        params.threshold,
        params.blur
    );

    let cameras = assemble_cameras(&records, silhouettes)?;
    Ok(Dataset { cameras, records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Matrix3, Vector3};

    fn record(name: &str, tz: f64) -> CalibrationRecord {
        CalibrationRecord {
            name: name.to_string(),
            intrinsics: Matrix3::identity(),
            rotation: Matrix3::identity(),
            translation: Vector3::new(0.0, 0.0, tz),
        }
    }

    #[test]
    fn test_matches_by_name_not_order() {
        let records = vec![record("b.png", 1.0), record("a.png", 2.0)];
        let mut silhouettes = HashMap::new();
        silhouettes.insert("a.png".to_string(), Silhouette::filled(2, 2, true));
        silhouettes.insert("b.png".to_string(), Silhouette::filled(3, 3, false));

        let cameras = assemble_cameras(&records, silhouettes).unwrap();
        assert_eq!(cameras.views()[0].name, "b.png");
        assert_eq!(cameras.views()[0].silhouette.width(), 3);
        assert_eq!(cameras.views()[1].name, "a.png");
        assert_eq!(cameras.views()[1].silhouette.width(), 2);
    }

    #[test]
    fn test_missing_image_is_mismatch() {
        let records = vec![record("a.png", 1.0), record("missing.png", 1.0)];
        let mut silhouettes = HashMap::new();
        silhouettes.insert("a.png".to_string(), Silhouette::filled(2, 2, true));

        let err = assemble_cameras(&records, silhouettes).unwrap_err();
        assert!(matches!(err, CarveError::CameraSilhouetteMismatch(_)));
    }

    #[test]
    fn test_extra_images_ignored() {
        let records = vec![record("a.png", 1.0)];
        let mut silhouettes = HashMap::new();
        silhouettes.insert("a.png".to_string(), Silhouette::filled(2, 2, true));
        silhouettes.insert("extra.png".to_string(), Silhouette::filled(2, 2, true));

        assert_eq!(assemble_cameras(&records, silhouettes).unwrap().len(), 1);
    }

    #[test]
    fn test_layout() {
        let layout = DatasetLayout::named(Path::new("data"), "dino");
        assert_eq!(layout.images_dir, PathBuf::from("data/dino"));
        assert_eq!(
            layout.calibration,
            PathBuf::from("data/dino_info/dino_par.txt")
        );
    }
}
