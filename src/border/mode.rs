//! Line mode analysis
//!
//! Computes the most frequent intensity of a row, a column, or any other
//! sequence of 8-bit samples. Ties on the maximal frequency are broken
//! toward the smallest intensity so results never depend on sample order.

use image::GrayImage;

use super::types::LineMode;

/// Number of distinct 8-bit intensities
const LEVELS: usize = 256;

/// Mode of a sequence of samples, `None` if the sequence is empty
pub fn line_mode<I>(samples: I) -> Option<LineMode>
where
    I: IntoIterator<Item = u8>,
{
    let mut histogram = [0u32; LEVELS];
    for sample in samples {
        histogram[sample as usize] += 1;
    }
    histogram_mode(&histogram)
}

/// Mode of a 256-bin histogram; smallest intensity wins on ties
pub fn histogram_mode(histogram: &[u32; LEVELS]) -> Option<LineMode> {
    let mut best: Option<LineMode> = None;
    for (value, &count) in histogram.iter().enumerate() {
        // strict comparison keeps the earliest (smallest) value on ties
        if count > 0 && best.map_or(true, |b| count > b.count) {
            best = Some(LineMode {
                value: value as u8,
                count,
            });
        }
    }
    best
}

/// Mode of every row, top to bottom
pub fn row_modes(gray: &GrayImage) -> Vec<LineMode> {
    let width = gray.width() as usize;
    if width == 0 {
        return Vec::new();
    }
    gray.as_raw()
        .chunks_exact(width)
        .filter_map(|row| line_mode(row.iter().copied()))
        .collect()
}

/// Mode of every column, left to right
pub fn column_modes(gray: &GrayImage) -> Vec<LineMode> {
    let (width, height) = gray.dimensions();
    if height == 0 {
        return Vec::new();
    }

    // One histogram per column, filled in a single row-major pass
    let mut histograms = vec![[0u32; LEVELS]; width as usize];
    for (x, _, pixel) in gray.enumerate_pixels() {
        histograms[x as usize][pixel.0[0] as usize] += 1;
    }

    histograms.iter().filter_map(histogram_mode).collect()
}
