//! Common types for the border module

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Border detection error types
#[derive(Debug, Error)]
pub enum BorderError {
    #[error("Image not found: {0}")]
    ImageNotFound(PathBuf),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Failed to save {}: {message}", .path.display())]
    SaveFailed { path: PathBuf, message: String },

    #[error("No legal region found along {}; adjust thresholds", join_axes(.0))]
    NoLegalRegion(Vec<Axis>),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl BorderError {
    /// Axes that had no content line, if this is a `NoLegalRegion` error
    pub fn failed_axes(&self) -> &[Axis] {
        match self {
            BorderError::NoLegalRegion(axes) => axes,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, BorderError>;

fn join_axes(axes: &[Axis]) -> String {
    axes.iter()
        .map(Axis::to_string)
        .collect::<Vec<_>>()
        .join(" and ")
}

/// Image axis scanned by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "rows"),
            Axis::Column => write!(f, "columns"),
        }
    }
}

/// Most frequent intensity of a line and how often it occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMode {
    pub value: u8,
    pub count: u32,
}

/// Absolute pixel-count thresholds for one image
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    /// Rows whose mode count is at or below this are ignored for the background
    pub mode_exclude: f64,
    /// Non-background pixels a row may hold and still be border
    pub row_effective_length: f64,
    /// Non-background pixels a column may hold and still be border
    pub column_effective_length: f64,
}

/// Half-open content region in row/column indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub row_start: u32,
    pub row_end: u32,
    pub column_start: u32,
    pub column_end: u32,
}

impl BoundingBox {
    /// Box covering a whole `width` x `height` image
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            row_start: 0,
            row_end: height,
            column_start: 0,
            column_end: width,
        }
    }

    pub fn width(&self) -> u32 {
        self.column_end - self.column_start
    }

    pub fn height(&self) -> u32 {
        self.row_end - self.row_start
    }

    /// Whether the box lies inside a `width` x `height` image and is non-empty
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.row_start < self.row_end
            && self.row_end <= height
            && self.column_start < self.column_end
            && self.column_end <= width
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows {}..{}, columns {}..{}",
            self.row_start, self.row_end, self.column_start, self.column_end
        )
    }
}

/// Border detection result
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    /// Detected content region
    pub bounding_box: BoundingBox,
    /// Dominant border intensity
    pub background: u8,
    /// Thresholds the detection ran with
    pub thresholds: Thresholds,
    /// Image size (width, height)
    pub image_size: (u32, u32),
}

impl Detection {
    /// Whether any border was found at all
    pub fn is_trimmed(&self) -> bool {
        self.bounding_box != BoundingBox::full(self.image_size.0, self.image_size.1)
    }
}

/// Crop operation result
#[derive(Debug, Clone, Serialize)]
pub struct CropReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub original_size: (u32, u32),
    pub cropped_size: (u32, u32),
    pub bounding_box: BoundingBox,
    pub background: u8,
}
