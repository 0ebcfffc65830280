//! CLI interface module
//!
//! Provides command-line interface using clap derive macros.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use crate::border::BorderError;
use crate::config::CliOverrides;

/// Exit codes for the CLI
///
/// These codes follow standard Unix conventions and provide
/// specific error categories for scripting and automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidArgs = 2,
    InputNotFound = 3,
    OutputError = 4,
    /// No content region under the given thresholds
    NoLegalRegion = 5,
}

impl ExitCode {
    /// Convert to process exit code
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Get human-readable description
    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::GeneralError => "General error",
            ExitCode::InvalidArgs => "Invalid arguments",
            ExitCode::InputNotFound => "Input file or directory not found",
            ExitCode::OutputError => "Output error (permission denied, disk full, etc.)",
            ExitCode::NoLegalRegion => "No legal region found; adjust thresholds",
        }
    }

    /// Exit code for a pipeline error
    pub fn for_error(err: &BorderError) -> Self {
        match err {
            BorderError::ImageNotFound(_) => ExitCode::InputNotFound,
            BorderError::InvalidImage(_) => ExitCode::GeneralError,
            BorderError::NoLegalRegion(_) => ExitCode::NoLegalRegion,
            BorderError::SaveFailed { .. } | BorderError::IoError(_) => ExitCode::OutputError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.code()
    }
}

/// Remove uniform borders around image content
#[derive(Parser, Debug)]
#[command(name = "edge-crop")]
#[command(version)]
#[command(about = "Detect and crop uniform-colored image borders", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crop the border of an image, or of every image in a directory
    Crop(CropArgs),
    /// Report the detected content region without writing anything
    Detect(DetectArgs),
    /// Show version and configuration information
    Info,
}

/// Threshold flags shared by `crop` and `detect`
///
/// Values `<= 1` are fractions of the image size, larger values pixel counts.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ThresholdArgs {
    /// Rows whose mode count is at or below this do not vote on the background
    /// [default: 0.1 of the width]
    #[arg(long = "mode-exclude", value_name = "VALUE")]
    pub mode_exclude: Option<f64>,

    /// Non-background pixels a border row may contain [default: 0.05 of the width]
    #[arg(long = "row-length", value_name = "VALUE")]
    pub row_effective_length: Option<f64>,

    /// Non-background pixels a border column may contain [default: 0.05 of the height]
    #[arg(long = "column-length", value_name = "VALUE")]
    pub column_effective_length: Option<f64>,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Arguments for the crop command
#[derive(clap::Args, Debug)]
pub struct CropArgs {
    /// Input image file or directory
    pub input: PathBuf,

    /// Output file (single image) or directory (directory input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a side-by-side preview of original and result
    #[arg(long, value_name = "PATH")]
    pub preview: Option<PathBuf>,

    /// Number of parallel threads for directory input
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Print a JSON report instead of text
    #[arg(long)]
    pub json: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

impl CropArgs {
    /// Values explicitly given on the command line
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            output: self.output.clone(),
            preview: self.preview.clone(),
            threads: self.threads,
            ..self.thresholds.overrides()
        }
    }
}

/// Arguments for the detect command
#[derive(clap::Args, Debug)]
pub struct DetectArgs {
    /// Input image file
    pub input: PathBuf,

    /// Print a JSON report instead of text
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

impl ThresholdArgs {
    /// Threshold values explicitly given on the command line
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            mode_exclude: self.mode_exclude,
            row_effective_length: self.row_effective_length,
            column_effective_length: self.column_effective_length,
            ..CliOverrides::new()
        }
    }
}

/// Create a styled progress bar for directory processing
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
            )
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    pb
}
