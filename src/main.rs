//! edge-crop - uniform border removal
//!
//! CLI entry point

use anyhow::{bail, Context};
use clap::Parser;
use edge_crop::{
    border::{DEFAULT_COLUMN_EFFECTIVE_LENGTH, DEFAULT_MODE_EXCLUDE, DEFAULT_ROW_EFFECTIVE_LENGTH},
    config::{LOCAL_CONFIG_FILE, USER_CONFIG_DIR},
    create_progress_bar, exit_codes, load_image, save_image, save_preview, BorderError, Cli,
    CliOverrides, Commands, Config, CropArgs, DetectArgs, EdgeCropper, ExitCode, RunConfig,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, level_filters::LevelFilter, warn};

/// Extensions picked up from directory input
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp", "gif"];

/// Output subdirectory for directory input without `--output`
const DEFAULT_BATCH_DIR: &str = "cropped";

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, on stdout
            let code = if e.use_stderr() {
                exit_codes::INVALID_ARGS
            } else {
                exit_codes::SUCCESS
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Crop(args) => run_crop(&args),
        Commands::Detect(args) => run_detect(&args),
        Commands::Info => run_info(),
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for(&e).into()
        }
    });
}

/// Install the stderr log subscriber; `-v` raises the level step by step
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<BorderError>() {
        Some(border_err) => ExitCode::for_error(border_err),
        None => ExitCode::GeneralError,
    }
}

/// Config file (explicit path or search path) merged with CLI values
fn resolve_config(config_path: Option<&Path>, overrides: &CliOverrides) -> RunConfig {
    let file_config = match config_path {
        Some(path) => match Config::load_from_path(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}", e);
                Config::default()
            }
        },
        None => Config::load().unwrap_or_else(|e| {
            warn!("Ignoring config file: {}", e);
            Config::default()
        }),
    };

    file_config.merge_with_cli(overrides)
}

// ============ Crop Command ============

fn run_crop(args: &CropArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        eprintln!("Error: Input path does not exist: {}", args.input.display());
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    let run = resolve_config(args.thresholds.config.as_deref(), &args.overrides());
    let cropper = EdgeCropper::new(run.thresholds);

    if args.input.is_dir() {
        run_crop_directory(args, &run, &cropper)
    } else {
        run_crop_file(args, &run, &cropper)
    }
}

fn run_crop_file(args: &CropArgs, run: &RunConfig, cropper: &EdgeCropper) -> anyhow::Result<()> {
    let output = run
        .output
        .clone()
        .unwrap_or_else(EdgeCropper::default_output_path);

    let loaded = load_image(&args.input)?;
    let (detection, cropped) = cropper.crop_image(&loaded)?;
    save_image(&cropped, &output)?;

    if let Some(preview) = &run.preview {
        save_preview(&loaded.color, &cropped, &detection.bounding_box, preview)?;
        info!(path = %preview.display(), "preview saved");
    }

    let (width, height) = loaded.dimensions();
    if args.json {
        let report = edge_crop::CropReport {
            input_path: args.input.clone(),
            output_path: output.clone(),
            original_size: (width, height),
            cropped_size: (cropped.width(), cropped.height()),
            bounding_box: detection.bounding_box,
            background: detection.background,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !args.quiet {
        println!(
            "{}: {}x{} -> {}x{} ({})",
            args.input.display(),
            width,
            height,
            cropped.width(),
            cropped.height(),
            detection.bounding_box
        );
        println!("Saved: {}", output.display());
    }

    Ok(())
}

fn run_crop_directory(
    args: &CropArgs,
    run: &RunConfig,
    cropper: &EdgeCropper,
) -> anyhow::Result<()> {
    let start_time = Instant::now();

    let images = collect_image_files(&args.input)?;
    if images.is_empty() {
        eprintln!("Error: No image files found in input path");
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    let output_dir = run
        .output
        .clone()
        .unwrap_or_else(|| args.input.join(DEFAULT_BATCH_DIR));
    if is_same_dir(&output_dir, &args.input) {
        eprintln!(
            "Error: Output directory is the input directory; cropping would overwrite {}",
            args.input.display()
        );
        std::process::exit(exit_codes::INVALID_ARGS);
    }
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("cannot create {}", output_dir.display()))?;

    if run.preview.is_some() {
        warn!("--preview is ignored for directory input");
    }

    let jobs: Vec<(PathBuf, PathBuf)> = images
        .into_iter()
        .filter_map(|input| {
            let name = input.file_name()?.to_owned();
            Some((input, output_dir.join(name)))
        })
        .collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(run.thread_count())
        .build()?;

    let pb = create_progress_bar(jobs.len() as u64);
    if args.quiet || args.json {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let results = pool.install(|| {
        cropper.process_batch(&jobs, |input, _| {
            if let Some(name) = input.file_name() {
                pb.set_message(name.to_string_lossy().into_owned());
            }
            pb.inc(1);
        })
    });
    pb.finish_and_clear();

    let mut reports = Vec::new();
    let mut failures = Vec::new();
    for (input, result) in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => failures.push((input, e)),
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else if !args.quiet {
        for (input, e) in &failures {
            eprintln!("Failed: {}: {}", input.display(), e);
        }
        println!(
            "Processed {} image(s): {} cropped, {} failed",
            jobs.len(),
            reports.len(),
            failures.len()
        );
        println!("Output: {}", output_dir.display());
        println!("Total time: {:.2}s", start_time.elapsed().as_secs_f64());
    }

    if !failures.is_empty() {
        bail!("{} image(s) failed to process", failures.len());
    }

    Ok(())
}

/// Whether two paths name the same existing directory
fn is_same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Collect image files from a directory, sorted by name
fn collect_image_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
        if path.is_file() && is_image {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

// ============ Detect Command ============

fn run_detect(args: &DetectArgs) -> anyhow::Result<()> {
    let run = resolve_config(args.thresholds.config.as_deref(), &args.thresholds.overrides());
    let cropper = EdgeCropper::new(run.thresholds);

    let loaded = load_image(&args.input)?;
    let detection = cropper.detect(&loaded)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&detection)?);
    } else {
        let bbox = detection.bounding_box;
        println!("Image: {}", args.input.display());
        println!("Size: {}x{}", detection.image_size.0, detection.image_size.1);
        println!("Background intensity: {}", detection.background);
        println!(
            "Thresholds (px): mode exclude {:.2}, row length {:.2}, column length {:.2}",
            detection.thresholds.mode_exclude,
            detection.thresholds.row_effective_length,
            detection.thresholds.column_effective_length
        );
        println!("Rows: {}..{}", bbox.row_start, bbox.row_end);
        println!("Columns: {}..{}", bbox.column_start, bbox.column_end);
        println!("Content size: {}x{}", bbox.width(), bbox.height());
    }

    Ok(())
}

// ============ Info Command ============

fn run_info() -> anyhow::Result<()> {
    println!("edge-crop v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Default Thresholds (fractions of image size):");
    println!("  Mode exclude:  {} x width", DEFAULT_MODE_EXCLUDE);
    println!("  Row length:    {} x width", DEFAULT_ROW_EFFECTIVE_LENGTH);
    println!("  Column length: {} x height", DEFAULT_COLUMN_EFFECTIVE_LENGTH);
    println!("  Values above 1 are absolute pixel counts");
    println!();

    println!("System Information:");
    println!("  Platform: {}", std::env::consts::OS);
    println!("  CPUs: {}", num_cpus::get());
    println!();

    println!("Config File Locations:");
    println!("  Local: ./{}", LOCAL_CONFIG_FILE);
    if let Some(config_dir) = dirs::config_dir() {
        println!(
            "  User:  {}",
            config_dir.join(USER_CONFIG_DIR).join("config.toml").display()
        );
    }
    println!(
        "  Default output: {}",
        EdgeCropper::default_output_path().display()
    );

    Ok(())
}
