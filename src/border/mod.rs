//! Border Detection & Cropping module
//!
//! Detects a uniform-colored border (padding, letterboxing, scan margins)
//! around image content and crops it away.
//!
//! # Algorithm
//!
//! 1. Compute the mode of every row and column of the grayscale projection
//! 2. Derive the background intensity from the modes of homogeneous rows
//! 3. Scan each axis inward from both ends; a line is border while its mode
//!    is the background and almost all of its pixels share it
//! 4. Crop the color image to the first/last non-border row and column
//!
//! # Example
//!
//! ```rust,no_run
//! use edge_crop::{BorderDetector, ThresholdOptions};
//! use edge_crop::border::{crop, load_image};
//! use std::path::Path;
//!
//! let options = ThresholdOptions::builder()
//!     .mode_exclude(0.2)
//!     .row_effective_length(12.0)
//!     .build();
//!
//! let loaded = load_image(Path::new("scan.png")).unwrap();
//! let detection = BorderDetector::detect(&loaded.gray, &options).unwrap();
//! let cropped = crop(&loaded.color, &detection.bounding_box);
//!
//! println!("Content: {}", detection.bounding_box);
//! # let _ = cropped;
//! ```

// Submodules
mod cropper;
mod detect;
mod io;
pub mod mode;
mod types;

// Re-export public API
pub use cropper::{crop, crop_buffer, EdgeCropper, DEFAULT_OUTPUT_PATH};
pub use detect::BorderDetector;
pub use io::{load_image, save_image, LoadedImage};
pub use types::{
    Axis, BorderError, BoundingBox, CropReport, Detection, LineMode, Result, Thresholds,
};

use serde::{Deserialize, Serialize};

// ============================================================
// Constants
// ============================================================

/// Default mode exclusion threshold, as a fraction of the column count
pub const DEFAULT_MODE_EXCLUDE: f64 = 0.1;

/// Default row effective length threshold, as a fraction of the column count
pub const DEFAULT_ROW_EFFECTIVE_LENGTH: f64 = 0.05;

/// Default column effective length threshold, as a fraction of the row count
pub const DEFAULT_COLUMN_EFFECTIVE_LENGTH: f64 = 0.05;

/// Values at or below this are fractions of a dimension, above it pixel counts
const FRACTION_LIMIT: f64 = 1.0;

// ============================================================
// Options
// ============================================================

/// User-facing threshold values
///
/// Each value is either a fraction in `(0, 1]` of the relevant image
/// dimension or an absolute pixel count (`> 1`). They are turned into pixel
/// counts per image by [`ThresholdOptions::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdOptions {
    /// Minimum mode count for a row to vote on the background
    /// (relative to the column count)
    pub mode_exclude: f64,
    /// Non-background pixels tolerated in a border row
    /// (relative to the column count)
    pub row_effective_length: f64,
    /// Non-background pixels tolerated in a border column
    /// (relative to the row count)
    pub column_effective_length: f64,
}

impl Default for ThresholdOptions {
    fn default() -> Self {
        Self {
            mode_exclude: DEFAULT_MODE_EXCLUDE,
            row_effective_length: DEFAULT_ROW_EFFECTIVE_LENGTH,
            column_effective_length: DEFAULT_COLUMN_EFFECTIVE_LENGTH,
        }
    }
}

impl ThresholdOptions {
    /// Create a new options builder
    pub fn builder() -> ThresholdOptionsBuilder {
        ThresholdOptionsBuilder::default()
    }

    /// Build options from optional raw values, falling back to defaults
    pub fn from_raw(
        mode_exclude: Option<f64>,
        row_effective_length: Option<f64>,
        column_effective_length: Option<f64>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            mode_exclude: mode_exclude.unwrap_or(defaults.mode_exclude),
            row_effective_length: row_effective_length.unwrap_or(defaults.row_effective_length),
            column_effective_length: column_effective_length
                .unwrap_or(defaults.column_effective_length),
        }
    }

    /// Resolve to absolute pixel counts for an image of the given size
    pub fn resolve(&self, row_count: u32, column_count: u32) -> Thresholds {
        Thresholds {
            mode_exclude: resolve_value(self.mode_exclude, column_count),
            row_effective_length: resolve_value(self.row_effective_length, column_count),
            column_effective_length: resolve_value(self.column_effective_length, row_count),
        }
    }
}

/// Fraction-or-count rule, clamped to `[0, dimension]`
///
/// Clamping never turns an illegal configuration into a legal one: a
/// threshold at the full dimension already makes every line border (or
/// excludes every row), so detection still fails downstream.
pub fn resolve_value(value: f64, dimension: u32) -> f64 {
    let dimension = f64::from(dimension);
    let resolved = if value <= FRACTION_LIMIT {
        value * dimension
    } else {
        value
    };
    resolved.clamp(0.0, dimension)
}

/// Builder for ThresholdOptions
#[derive(Debug, Default)]
pub struct ThresholdOptionsBuilder {
    options: ThresholdOptions,
}

impl ThresholdOptionsBuilder {
    /// Set the mode exclusion threshold (fraction or pixels)
    #[must_use]
    pub fn mode_exclude(mut self, value: f64) -> Self {
        self.options.mode_exclude = value;
        self
    }

    /// Set the row effective length threshold (fraction or pixels)
    #[must_use]
    pub fn row_effective_length(mut self, value: f64) -> Self {
        self.options.row_effective_length = value;
        self
    }

    /// Set the column effective length threshold (fraction or pixels)
    #[must_use]
    pub fn column_effective_length(mut self, value: f64) -> Self {
        self.options.column_effective_length = value;
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> ThresholdOptions {
        self.options
    }
}
