//! carve-hull: Reconstruct a voxel hull from calibrated silhouettes
//!
//! Usage:
//!   carve-hull --dataset-root data --images dino --out hull.ply
//!   carve-hull --images-dir imgs --calibration par.txt --voxels 50000 --policy sequential
//!   carve-hull --config run.json

use anyhow::{anyhow, bail, Context};
use carve_rs::carve::{carve, CarveConfig, CarvePolicy, CarveStats};
use carve_rs::core::{build_grid, grid_dims, BoundingBox};
use carve_rs::io::{
    load_config, load_dataset, save_silhouette_png, save_voxels_obj, save_voxels_ply,
    DatasetConfig, DatasetLayout, OutputConfig, RunConfig, SilhouetteParams, DEFAULT_VOXEL_COUNT,
};
use nalgebra::Point3;
use std::path::PathBuf;
use std::time::Instant;

/// Command-line options; every field overrides the config file when set.
#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    dataset_root: Option<PathBuf>,
    images: Option<String>,
    images_dir: Option<PathBuf>,
    calibration: Option<PathBuf>,
    voxels: Option<usize>,
    min: Option<Point3<f64>>,
    max: Option<Point3<f64>>,
    bounds_from_cameras: bool,
    policy: Option<String>,
    camera: Option<usize>,
    fraction: Option<f64>,
    min_votes: Option<usize>,
    threshold: Option<u8>,
    no_blur: bool,
    out: Option<PathBuf>,
    obj: Option<PathBuf>,
    debug_dir: Option<PathBuf>,
}

enum Command {
    Run(CliArgs),
    Help,
}

/// Bounding boxes known for the bundled datasets.
fn preset_bounds(name: &str) -> Option<BoundingBox> {
    match name {
        "dino" | "dino_test" => BoundingBox::new(
            Point3::new(-0.041897, 0.001126, -0.037845),
            Point3::new(0.030897, 0.088227, 0.035495),
        )
        .ok(),
        _ => None,
    }
}

fn parse_point(s: &str) -> anyhow::Result<Point3<f64>> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("invalid coordinate list {:?}", s))?;
    if parts.len() != 3 {
        bail!("expected three comma-separated values (e.g. '0,0,0'), got {:?}", s);
    }
    Ok(Point3::new(parts[0], parts[1], parts[2]))
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Command> {
    let mut args = args.into_iter();
    let mut cli = CliArgs::default();

    fn value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> anyhow::Result<String> {
        args.next().ok_or_else(|| anyhow!("missing value for {}", flag))
    }

    fn number<T, I>(args: &mut I, flag: &str) -> anyhow::Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
        I: Iterator<Item = String>,
    {
        let raw = value(args, flag)?;
        raw.parse()
            .with_context(|| format!("invalid value {:?} for {}", raw, flag))
    }

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => cli.config = Some(PathBuf::from(value(&mut args, &arg)?)),
            "--dataset-root" => cli.dataset_root = Some(PathBuf::from(value(&mut args, &arg)?)),
            "--images" => cli.images = Some(value(&mut args, &arg)?),
            "--images-dir" => cli.images_dir = Some(PathBuf::from(value(&mut args, &arg)?)),
            "--calibration" => cli.calibration = Some(PathBuf::from(value(&mut args, &arg)?)),
            "--voxels" => cli.voxels = Some(number(&mut args, &arg)?),
            "--min" => cli.min = Some(parse_point(&value(&mut args, &arg)?)?),
            "--max" => cli.max = Some(parse_point(&value(&mut args, &arg)?)?),
            "--bounds-from-cameras" => cli.bounds_from_cameras = true,
            "--policy" => cli.policy = Some(value(&mut args, &arg)?),
            "--camera" => cli.camera = Some(number(&mut args, &arg)?),
            "--fraction" => cli.fraction = Some(number(&mut args, &arg)?),
            "--min-votes" => cli.min_votes = Some(number(&mut args, &arg)?),
            "--threshold" => cli.threshold = Some(number(&mut args, &arg)?),
            "--no-blur" => cli.no_blur = true,
            "--out" => cli.out = Some(PathBuf::from(value(&mut args, &arg)?)),
            "--obj" => cli.obj = Some(PathBuf::from(value(&mut args, &arg)?)),
            "--debug-dir" => cli.debug_dir = Some(PathBuf::from(value(&mut args, &arg)?)),
            "--help" | "-h" => return Ok(Command::Help),
            other => bail!("unknown argument: {}", other),
        }
    }

    Ok(Command::Run(cli))
}

fn parse_policy(name: &str, camera: Option<usize>) -> anyhow::Result<CarvePolicy> {
    Ok(match name {
        "consensus" => CarvePolicy::Consensus,
        "sequential" => CarvePolicy::Sequential,
        "single" => CarvePolicy::SingleView {
            camera: camera.unwrap_or(0),
        },
        other => bail!(
            "unknown policy {:?} (expected consensus, sequential or single)",
            other
        ),
    })
}

/// Merge the optional config file with command-line overrides.
fn resolve_config(cli: &CliArgs) -> anyhow::Result<RunConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => {
            let dataset = match (&cli.dataset_root, &cli.images, &cli.images_dir, &cli.calibration) {
                (_, _, Some(images_dir), Some(calibration)) => DatasetConfig {
                    images_dir: images_dir.clone(),
                    calibration: calibration.clone(),
                },
                (Some(root), Some(name), _, _) => {
                    let layout = DatasetLayout::named(root, name);
                    DatasetConfig {
                        images_dir: layout.images_dir,
                        calibration: layout.calibration,
                    }
                }
                _ => bail!(
                    "specify --config, --dataset-root with --images, or --images-dir with --calibration"
                ),
            };
            RunConfig {
                dataset,
                bounds: None,
                voxel_count: DEFAULT_VOXEL_COUNT,
                carve: CarveConfig::default(),
                silhouette: SilhouetteParams::default(),
                output: OutputConfig::default(),
            }
        }
    };

    if let Some(voxels) = cli.voxels {
        config.voxel_count = voxels;
    }

    if cli.bounds_from_cameras && (cli.min.is_some() || cli.max.is_some()) {
        bail!("--bounds-from-cameras cannot be combined with --min/--max");
    }
    match (cli.min, cli.max) {
        (Some(min), Some(max)) => config.bounds = Some(BoundingBox::new(min, max)?),
        (None, None) => {}
        _ => bail!("--min and --max must be given together"),
    }
    if config.bounds.is_none() && !cli.bounds_from_cameras {
        config.bounds = cli.images.as_deref().and_then(preset_bounds);
    }
    if cli.bounds_from_cameras {
        config.bounds = None;
    }

    if let Some(policy) = &cli.policy {
        config.carve.policy = parse_policy(policy, cli.camera)?;
    }
    if let Some(camera) = cli.camera {
        match config.carve.policy {
            CarvePolicy::SingleView { .. } => {
                config.carve.policy = CarvePolicy::SingleView { camera }
            }
            other => bail!("--camera only applies to the single policy, not {:?}", other),
        }
    }
    if let Some(fraction) = cli.fraction {
        config.carve.consensus_fraction = fraction;
    }
    if cli.min_votes.is_some() {
        config.carve.min_votes = cli.min_votes;
    }

    if let Some(threshold) = cli.threshold {
        config.silhouette.threshold = threshold;
    }
    if cli.no_blur {
        config.silhouette.blur = false;
    }

    if cli.out.is_some() {
        config.output.ply = cli.out.clone();
    }
    if cli.obj.is_some() {
        config.output.obj = cli.obj.clone();
    }
    if cli.debug_dir.is_some() {
        config.output.debug_dir = cli.debug_dir.clone();
    }
    if config.output.ply.is_none() && config.output.obj.is_none() {
        config.output.ply = Some(PathBuf::from("hull.ply"));
    }

    Ok(config)
}

fn run(config: &RunConfig) -> anyhow::Result<()> {
    let dataset = load_dataset(
        &config.dataset.images_dir,
        &config.dataset.calibration,
        &config.silhouette,
    )
    .with_context(|| {
        format!(
            "failed to load dataset from {} / {}",
            config.dataset.images_dir.display(),
            config.dataset.calibration.display()
        )
    })?;
    log::info!("{} cameras paired with silhouettes", dataset.cameras.len());

    if let Some(debug_dir) = &config.output.debug_dir {
        for view in dataset.cameras.iter() {
            let path = debug_dir.join(format!("silhouette_{}.png", view.name));
            save_silhouette_png(&view.silhouette, &path)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        log::info!("silhouettes written to {}", debug_dir.display());
    }

    let bounds = match config.bounds {
        Some(bounds) => bounds,
        None => {
            let bounds = dataset.camera_bounds()?;
            log::info!("bounds derived from camera centers");
            bounds
        }
    };
    log::info!("bounds: min={:?} max={:?}", bounds.min(), bounds.max());

    let (dims, side) = grid_dims(&bounds, config.voxel_count)?;
    log::info!(
        "voxel lattice {}x{}x{} = {} voxels (target {}), side {:.6}",
        dims.nx,
        dims.ny,
        dims.nz,
        dims.count(),
        config.voxel_count,
        side
    );
    let grid = build_grid(&bounds, config.voxel_count)?;

    let started = Instant::now();
    let hull = carve(&grid, &dataset.cameras, &config.carve)?;
    let stats = CarveStats::between(&grid, &hull);
    log::info!(
        "{:?} carve kept {}/{} voxels ({:.1}%) in {:.2?}",
        config.carve.policy,
        stats.kept,
        stats.input,
        stats.kept_fraction() * 100.0,
        started.elapsed()
    );
    if hull.is_empty() {
        log::warn!("every voxel was carved away; check bounds and silhouettes");
    }

    if let Some(path) = &config.output.ply {
        save_voxels_ply(&hull, path).with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("point cloud saved to {}", path.display());
    }
    if let Some(path) = &config.output.obj {
        save_voxels_obj(&hull, path).with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("cube mesh saved to {}", path.display());
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("carve-hull v{}", carve_rs::VERSION);

    let result = parse_args(std::env::args().skip(1)).and_then(|command| match command {
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Run(cli) => resolve_config(&cli).and_then(|config| run(&config)),
    });

    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn print_help() {
    println!(
        r#"carve-hull: Reconstruct a voxel hull from calibrated silhouettes

USAGE:
    carve-hull [DATASET] [OPTIONS]

DATASET (choose one):
    --config PATH              JSON run configuration
    --dataset-root DIR --images NAME
                               Use DIR/NAME/ and DIR/NAME_info/NAME_par.txt
    --images-dir DIR --calibration PATH
                               Explicit image directory and calibration file

OPTIONS:
    --voxels N                 Target voxel count [default: 200000]
    --min X,Y,Z --max X,Y,Z    Bounding box (dino/dino_test have built-in bounds)
    --bounds-from-cameras      Use the box enclosing all camera centers
    --policy NAME              consensus | sequential | single [default: consensus]
    --camera I                 Camera index for --policy single [default: 0]
    --fraction F               Consensus fraction in (0, 1] [default: 0.8]
    --min-votes N              Explicit consensus vote threshold
    --threshold T              Silhouette gray threshold [default: 40]
    --no-blur                  Skip the 3x3 box blur before thresholding
    --out PATH                 PLY point cloud output [default: hull.ply]
    --obj PATH                 OBJ cube mesh output
    --debug-dir DIR            Write every silhouette as a PNG
    --help, -h                 Print this help message

Set RUST_LOG=debug for per-camera carving details.
"#
    );
}
