//! Camera calibration text format parser.
//!
//! The calibration file lists one camera per line after a header line holding
//! the camera count:
//! ```text
//! 3
//! view_0001.png k11 k12 k13 k21 k22 k23 k31 k32 k33 r11 r12 r13 r21 r22 r23 r31 r32 r33 t1 t2 t3
//! view_0002.png ...
//! ```
//! `K` is the 3x3 intrinsic matrix, `R` and `t` the world-to-camera pose, both
//! row-major. Records are matched to images by file name, never by line order.

use crate::core::{camera_center, CarveError, ProjectionMatrix};
use nalgebra::{Matrix3, Point3, Vector3};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Number of whitespace-separated fields in a camera record (name + 21 numbers).
const RECORD_FIELDS: usize = 22;

/// Errors that can occur when loading calibration, images or configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid calibration format: {0}")]
    InvalidFormat(String),

    #[error(transparent)]
    Carve(#[from] CarveError),
}

/// Calibration of a single camera.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationRecord {
    /// Image file name this camera belongs to
    pub name: String,

    /// Intrinsic matrix `K`
    pub intrinsics: Matrix3<f64>,

    /// Rotation from world to camera coordinates
    pub rotation: Matrix3<f64>,

    /// Translation from world to camera coordinates
    pub translation: Vector3<f64>,
}

impl CalibrationRecord {
    /// `K * [R | t]`
    pub fn projection(&self) -> ProjectionMatrix {
        ProjectionMatrix::from_intrinsics_pose(&self.intrinsics, &self.rotation, &self.translation)
    }

    /// Camera position in world coordinates.
    pub fn camera_center(&self) -> Point3<f64> {
        camera_center(&self.rotation, &self.translation)
    }
}

/// Read and parse a calibration file.
pub fn load_calibration(path: &Path) -> Result<Vec<CalibrationRecord>, LoadError> {
    let contents = fs::read_to_string(path)?;
    let records = parse_calibration(&contents)?;
    log::info!(
        "loaded {} camera calibrations from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Parse calibration text (header line followed by one record per line).
pub fn parse_calibration(contents: &str) -> Result<Vec<CalibrationRecord>, LoadError> {
    let mut lines = contents
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_no, header) = lines
        .next()
        .ok_or_else(|| LoadError::InvalidFormat("calibration file is empty".to_string()))?;
    let declared: usize = header.parse().map_err(|_| {
        LoadError::InvalidFormat(format!(
            "line {}: expected camera count, got {:?}",
            header_no, header
        ))
    })?;

    let records = lines
        .map(|(line_no, line)| parse_record(line_no, line))
        .collect::<Result<Vec<_>, _>>()?;

    if records.len() != declared {
        log::warn!(
            "calibration header declares {} cameras but {} records were found",
            declared,
            records.len()
        );
    }

    Ok(records)
}

fn parse_record(line_no: usize, line: &str) -> Result<CalibrationRecord, LoadError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != RECORD_FIELDS {
        return Err(LoadError::InvalidFormat(format!(
            "line {}: expected {} fields, found {}",
            line_no,
            RECORD_FIELDS,
            fields.len()
        )));
    }

    let values = fields[1..]
        .iter()
        .map(|f| {
            f.parse::<f64>().map_err(|e| {
                LoadError::InvalidFormat(format!("line {}: bad number {:?}: {}", line_no, f, e))
            })
        })
        .collect::<Result<Vec<f64>, _>>()?;

    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(LoadError::InvalidFormat(format!(
            "line {}: non-finite value {}",
            line_no, bad
        )));
    }

    Ok(CalibrationRecord {
        name: fields[0].to_string(),
        intrinsics: Matrix3::from_row_slice(&values[0..9]),
        rotation: Matrix3::from_row_slice(&values[9..18]),
        translation: Vector3::new(values[18], values[19], values[20]),
    })
}
