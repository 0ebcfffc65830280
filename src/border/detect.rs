//! Mode-based border detector

use image::GrayImage;
use tracing::debug;

use super::mode::{column_modes, line_mode, row_modes};
use super::types::{Axis, BorderError, BoundingBox, Detection, LineMode, Result};
use super::ThresholdOptions;

/// Uniform border detector working on a grayscale projection
pub struct BorderDetector;

impl BorderDetector {
    /// Detect the content bounding box of a grayscale image
    ///
    /// Fails with [`BorderError::NoLegalRegion`] when every row, every
    /// column, or both are classified as border, or when no row is
    /// homogeneous enough to vote on the background intensity.
    pub fn detect(gray: &GrayImage, options: &ThresholdOptions) -> Result<Detection> {
        let (column_count, row_count) = gray.dimensions();
        let thresholds = options.resolve(row_count, column_count);

        // Modes are computed once and shared by the pre-pass and the scans
        let rows = row_modes(gray);
        let columns = column_modes(gray);

        let edges = Self::edge_values(&rows, &columns);
        let background = Self::background_intensity(&rows, &edges, thresholds.mode_exclude)
            .ok_or_else(|| BorderError::NoLegalRegion(vec![Axis::Row, Axis::Column]))?;

        debug!(
            width = column_count,
            height = row_count,
            background,
            ?thresholds,
            "background intensity resolved"
        );

        let row_span = Self::content_span(
            &rows,
            background,
            column_count,
            thresholds.row_effective_length,
        );
        let column_span = Self::content_span(
            &columns,
            background,
            row_count,
            thresholds.column_effective_length,
        );

        let (row_start, row_end, column_start, column_end) = match (row_span, column_span) {
            (Some((rs, re)), Some((cs, ce))) => (rs, re, cs, ce),
            (rows_found, columns_found) => {
                let mut failed = Vec::new();
                if rows_found.is_none() {
                    failed.push(Axis::Row);
                }
                if columns_found.is_none() {
                    failed.push(Axis::Column);
                }
                return Err(BorderError::NoLegalRegion(failed));
            }
        };

        let bounding_box = BoundingBox {
            row_start,
            row_end,
            column_start,
            column_end,
        };
        debug!(%bounding_box, "content region detected");

        Ok(Detection {
            bounding_box,
            background,
            thresholds,
            image_size: (column_count, row_count),
        })
    }

    /// Mode of the modes of all sufficiently homogeneous rows
    ///
    /// Only intensities that are the mode of an outermost row or column
    /// take part in the vote, since a border always touches the image edge.
    /// When none of the voting rows has such a mode, the plain vote is used.
    pub fn background_intensity(
        rows: &[LineMode],
        edges: &[u8],
        mode_exclude: f64,
    ) -> Option<u8> {
        let voters: Vec<u8> = rows
            .iter()
            .filter(|mode| f64::from(mode.count) > mode_exclude)
            .map(|mode| mode.value)
            .collect();

        line_mode(voters.iter().copied().filter(|value| edges.contains(value)))
            .or_else(|| line_mode(voters.iter().copied()))
            .map(|mode| mode.value)
    }

    /// Modes of the first and last row and column
    fn edge_values(rows: &[LineMode], columns: &[LineMode]) -> Vec<u8> {
        [rows.first(), rows.last(), columns.first(), columns.last()]
            .into_iter()
            .flatten()
            .map(|mode| mode.value)
            .collect()
    }

    /// Whether a line of `length` samples belongs to the border
    pub fn is_border_line(
        mode: &LineMode,
        background: u8,
        length: u32,
        effective_length: f64,
    ) -> bool {
        mode.value == background && f64::from(mode.count) > f64::from(length) - effective_length
    }

    /// Half-open span between the first and last non-border line
    fn content_span(
        modes: &[LineMode],
        background: u8,
        length: u32,
        effective_length: f64,
    ) -> Option<(u32, u32)> {
        let is_content =
            |mode: &LineMode| !Self::is_border_line(mode, background, length, effective_length);

        let start = modes.iter().position(is_content)?;
        // A content line exists, so the backward scan always finds one
        let last = modes.iter().rposition(is_content)?;
        Some((start as u32, last as u32 + 1))
    }
}
