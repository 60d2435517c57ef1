//! End-to-end test: synthetic dataset on disk -> silhouettes -> carved hull
//!
//! Eight cameras orbit a sphere of radius 0.5 at the origin. Each image is
//! rendered analytically (the sphere's outline is a disk), saved as PNG, and
//! paired with a calibration file whose lines are deliberately shuffled.

use carve_rs::carve::{carve, CarveConfig, CarveStats};
use carve_rs::core::{build_grid, BoundingBox, CarveError};
use carve_rs::io::{
    load_calibration, load_dataset, read_voxel_size, save_voxels_obj, save_voxels_ply, LoadError,
    SilhouetteParams,
};
use image::{Rgb, RgbImage};
use nalgebra::{Matrix3, Point3, Rotation3, Vector3};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const CAMERAS: usize = 8;
const SIZE: u32 = 128;
const FOCAL: f64 = 100.0;
const DISTANCE: f64 = 4.0;
const RADIUS: f64 = 0.5;

fn rotation(i: usize) -> Matrix3<f64> {
    let angle = i as f64 * std::f64::consts::TAU / CAMERAS as f64;
    Rotation3::from_axis_angle(&Vector3::y_axis(), angle).into_inner()
}

fn image_name(i: usize) -> String {
    format!("view_{:02}.png", i)
}

/// Write the images and a calibration file into `dir`; returns the calibration path.
fn write_dataset(dir: &Path, images_dir: &Path) -> std::path::PathBuf {
    fs::create_dir_all(images_dir).unwrap();

    // Every camera looks at the origin from DISTANCE, so the sphere projects
    // to a disk around the principal point.
    let c = SIZE as f64 / 2.0;
    let disk = FOCAL * RADIUS / (DISTANCE * DISTANCE - RADIUS * RADIUS).sqrt();
    for i in 0..CAMERAS {
        let img = RgbImage::from_fn(SIZE, SIZE, |x, y| {
            let dx = x as f64 - c;
            let dy = y as f64 - c;
            if dx * dx + dy * dy <= disk * disk {
                Rgb([220, 210, 200])
            } else {
                Rgb([5, 5, 5])
            }
        });
        img.save(images_dir.join(image_name(i))).unwrap();
    }

    let mut text = format!("{}\n", CAMERAS);
    // Reverse order: matching must go by file name
    for i in (0..CAMERAS).rev() {
        let r = rotation(i);
        write!(text, "{} {} 0 {} 0 {} {} 0 0 1", image_name(i), FOCAL, c, FOCAL, c).unwrap();
        for row in 0..3 {
            for col in 0..3 {
                write!(text, " {}", r[(row, col)]).unwrap();
            }
        }
        writeln!(text, " 0 0 {}", DISTANCE).unwrap();
    }

    let calibration = dir.join("par.txt");
    fs::write(&calibration, text).unwrap();
    calibration
}

#[test]
fn test_carve_sphere_from_disk_images() {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir().unwrap();
    let images_dir = dir.path().join("images");
    let calibration = write_dataset(dir.path(), &images_dir);
    // An image without calibration is ignored
    RgbImage::new(4, 4).save(images_dir.join("stray.png")).unwrap();

    let dataset = load_dataset(&images_dir, &calibration, &SilhouetteParams::default()).unwrap();
    assert_eq!(dataset.cameras.len(), CAMERAS);
    assert_eq!(dataset.cameras.views()[0].name, image_name(CAMERAS - 1));
    for view in dataset.cameras.iter() {
        assert_eq!(view.silhouette.width(), SIZE);
        assert!(view.silhouette.foreground_count() > 0);
    }

    let bounds = BoundingBox::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)).unwrap();
    let grid = build_grid(&bounds, 4_000).unwrap();

    let sequential = carve(&grid, &dataset.cameras, &CarveConfig::sequential()).unwrap();
    let consensus = carve(&grid, &dataset.cameras, &CarveConfig::consensus()).unwrap();

    for hull in [&sequential, &consensus] {
        let stats = CarveStats::between(&grid, hull);
        assert!(stats.kept > 0, "hull is empty");
        assert!(stats.kept_fraction() < 0.3, "kept {:?}", stats);

        // The voxel nearest the origin is inside the sphere
        let nearest = grid
            .iter()
            .min_by(|a, b| a.coords.norm().partial_cmp(&b.coords.norm()).unwrap())
            .unwrap();
        assert!(hull.centers().contains(nearest));

        // Nothing far outside the sphere survives
        for c in hull.iter() {
            assert!(c.coords.norm() < 1.0, "voxel {:?} survived", c);
        }
    }

    // Sequential carving needs every view to agree
    assert!(sequential.len() <= consensus.len());
    for c in sequential.iter() {
        assert!(consensus.centers().contains(c));
    }

    // Export both sinks
    let ply = dir.path().join("hull.ply");
    save_voxels_ply(&consensus, &ply).unwrap();
    let text = fs::read_to_string(&ply).unwrap();
    assert!(text.contains(&format!("element vertex {}", consensus.len())));
    assert_eq!(read_voxel_size(&text), Some(grid.side_length()));

    let obj = dir.path().join("hull.obj");
    save_voxels_obj(&consensus, &obj).unwrap();
    let faces = fs::read_to_string(&obj)
        .unwrap()
        .lines()
        .filter(|l| l.starts_with("f "))
        .count();
    assert_eq!(faces, consensus.len() * 6);
}

#[test]
fn test_camera_bounds_enclose_orbit() {
    let dir = tempfile::tempdir().unwrap();
    let images_dir = dir.path().join("images");
    let calibration = write_dataset(dir.path(), &images_dir);

    let records = load_calibration(&calibration).unwrap();
    for record in &records {
        let center = record.camera_center();
        approx::assert_relative_eq!(center.coords.norm(), DISTANCE, epsilon = 1e-9);
        approx::assert_relative_eq!(center.y, 0.0, epsilon = 1e-9);
    }

    // All camera centers lie in the y = 0 plane, so the enclosing box is flat
    let dataset = load_dataset(&images_dir, &calibration, &SilhouetteParams::default()).unwrap();
    assert!(matches!(
        dataset.camera_bounds(),
        Err(CarveError::InvalidBounds(_))
    ));
}

#[test]
fn test_missing_image_for_calibration_record() {
    let dir = tempfile::tempdir().unwrap();
    let images_dir = dir.path().join("images");
    let calibration = write_dataset(dir.path(), &images_dir);
    fs::remove_file(images_dir.join(image_name(3))).unwrap();

    let err = load_dataset(&images_dir, &calibration, &SilhouetteParams::default()).unwrap_err();
    match err {
        LoadError::Carve(CarveError::CameraSilhouetteMismatch(msg)) => {
            assert!(msg.contains(&image_name(3)), "{}", msg);
        }
        other => panic!("unexpected error {:?}", other),
    }
}
