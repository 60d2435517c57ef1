//! Loading the image sequence of a dataset.

use crate::io::LoadError;
use image::DynamicImage;
use std::fs;
use std::path::Path;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "ppm", "pgm", "bmp", "tif", "tiff"];

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Load every image in `dir`, sorted by file name.
///
/// Non-image files are ignored; an image that fails to decode is an error.
pub fn load_image_dir(dir: &Path) -> Result<Vec<(String, DynamicImage)>, LoadError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_image_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let img = image::open(&path)?;
        images.push((name, img));
    }

    log::info!("loaded {} images from {}", images.len(), dir.display());
    Ok(images)
}
