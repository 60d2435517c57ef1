//! Silhouette extraction: grayscale, 3x3 box blur, binary threshold.
//!
//! Each stage reproduces the usual OpenCV pipeline bit for bit: fixed-point
//! Rec.601 luma, a box mean rounded to nearest with reflect-101 borders, and a
//! strict binary threshold.

use crate::core::{Silhouette, FOREGROUND_VALUE};
use crate::io::LoadError;
use image::{DynamicImage, GrayImage, Luma};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Rec.601 luma weights in 14-bit fixed point (0.299, 0.587, 0.114).
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SilhouetteParams {
    /// Pixels strictly brighter than this (after blurring) are foreground.
    pub threshold: u8,
    /// Smooth the grayscale image with a 3x3 box filter before thresholding.
    pub blur: bool,
}

impl Default for SilhouetteParams {
    fn default() -> Self {
        Self {
            threshold: 40,
            blur: true,
        }
    }
}

/// Convert to 8-bit grayscale with Rec.601 weights, rounding to nearest.
///
/// Alpha is ignored. Gray inputs pass through unchanged.
pub fn luma_601(image: &DynamicImage) -> GrayImage {
    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let weighted = r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B;
        let rounded = (weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT;
        Luma([rounded.min(255) as u8])
    })
}

/// Mirror an out-of-range index back into `0..len` without repeating the edge
/// sample (`-1 -> 1`, `len -> len - 2`).
fn reflect_101(index: i64, len: u32) -> u32 {
    let len = len as i64;
    if len == 1 {
        return 0;
    }
    let mut i = index;
    if i < 0 {
        i = -i;
    }
    if i >= len {
        i = 2 * (len - 1) - i;
    }
    i as u32
}

/// 3x3 box mean with reflect-101 borders, rounded to the nearest integer.
pub fn box_blur_3x3(gray: &GrayImage) -> GrayImage {
    let (w, h) = gray.dimensions();
    GrayImage::from_fn(w, h, |x, y| {
        let mut sum = 0u32;
        for dy in -1i64..=1 {
            let sy = reflect_101(y as i64 + dy, h);
            for dx in -1i64..=1 {
                let sx = reflect_101(x as i64 + dx, w);
                sum += gray.get_pixel(sx, sy).0[0] as u32;
            }
        }
        // sum / 9 is never exactly halfway, so +4 rounds to nearest
        Luma([((sum + 4) / 9) as u8])
    })
}

/// Binarize an 8-bit grayscale image: `value > threshold` becomes 255, else 0.
pub fn threshold_binary(gray: &GrayImage, threshold: u8) -> GrayImage {
    let mut out = gray.clone();
    for p in out.pixels_mut() {
        *p = Luma([if p.0[0] > threshold { FOREGROUND_VALUE } else { 0 }]);
    }
    out
}

/// Compute the silhouette of a decoded image.
pub fn extract_silhouette(image: &DynamicImage, params: &SilhouetteParams) -> Silhouette {
    let gray = luma_601(image);
    let smoothed = if params.blur { box_blur_3x3(&gray) } else { gray };
    Silhouette::from_gray(&threshold_binary(&smoothed, params.threshold))
}

/// Write a silhouette as a 0/255 grayscale PNG, creating parent directories.
pub fn save_silhouette_png(silhouette: &Silhouette, path: &Path) -> Result<(), LoadError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    silhouette.to_gray().save(path)?;
    Ok(())
}
