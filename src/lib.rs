//! edge-crop - uniform border detection and removal
//!
//! Finds the padding, letterboxing or scan margin around the content of a
//! raster image and crops it away.
//!
//! # Features
//!
//! - **Border Detection** ([`border`]) - Mode-based row/column analysis
//! - **Cropping** ([`border::crop`]) - Pixel-format preserving crop
//! - **Preview** ([`preview`]) - Side-by-side rendering of original and result
//! - **Configuration** ([`config`]) - TOML config file layered under CLI flags
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use edge_crop::{EdgeCropper, ThresholdOptions};
//! use std::path::Path;
//!
//! let cropper = EdgeCropper::new(ThresholdOptions::default());
//! let report = cropper
//!     .process(Path::new("scan.png"), Path::new("scan_cropped.png"))
//!     .unwrap();
//! println!("Kept {}", report.bounding_box);
//! ```
//!
//! # Thresholds
//!
//! Every threshold is a fraction of the image size when `<= 1` and an
//! absolute pixel count otherwise:
//!
//! ```rust
//! use edge_crop::ThresholdOptions;
//!
//! let options = ThresholdOptions::builder()
//!     .mode_exclude(0.2)
//!     .row_effective_length(20.0)
//!     .build();
//!
//! let thresholds = options.resolve(100, 100);
//! assert!((thresholds.mode_exclude - 20.0).abs() < 1e-9);
//! assert_eq!(thresholds.row_effective_length, 20.0);
//! ```
//!
//! # Architecture
//!
//! ```text
//! load -> grayscale projection -> row/column modes -> background intensity
//!                                                   |
//!                                     directional scans -> bounding box
//!                                                   |
//!                                       crop color image -> save / preview
//! ```
//!
//! # License
//!
//! AGPL-3.0

pub mod border;
pub mod cli;
pub mod config;
pub mod preview;

// Re-exports for convenience
pub use border::{
    crop, load_image, save_image, Axis, BorderDetector, BorderError, BoundingBox, CropReport,
    Detection, EdgeCropper, LoadedImage, ThresholdOptions, ThresholdOptionsBuilder, Thresholds,
};
pub use cli::{create_progress_bar, Cli, Commands, CropArgs, DetectArgs, ExitCode};
pub use config::{CliOverrides, Config, ConfigError, RunConfig};
pub use preview::{render_side_by_side, save_preview};

/// Exit codes for CLI
pub mod exit_codes {
    use super::ExitCode;

    pub const SUCCESS: i32 = ExitCode::Success as i32;
    pub const GENERAL_ERROR: i32 = ExitCode::GeneralError as i32;
    pub const INVALID_ARGS: i32 = ExitCode::InvalidArgs as i32;
    pub const INPUT_NOT_FOUND: i32 = ExitCode::InputNotFound as i32;
    pub const OUTPUT_ERROR: i32 = ExitCode::OutputError as i32;
    pub const NO_LEGAL_REGION: i32 = ExitCode::NoLegalRegion as i32;
}
