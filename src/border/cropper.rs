//! Cropping and the load → detect → crop → save pipeline

use image::{imageops, DynamicImage, ImageBuffer, Pixel};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::detect::BorderDetector;
use super::io::{load_image, save_image, LoadedImage};
use super::types::{BoundingBox, CropReport, Detection, Result};
use super::ThresholdOptions;

/// Output path used when the caller does not supply one
pub const DEFAULT_OUTPUT_PATH: &str = "./untitled.jpg";

/// Crop a decoded image to a bounding box, keeping its pixel format
pub fn crop(image: &DynamicImage, bbox: &BoundingBox) -> DynamicImage {
    debug_assert!(bbox.fits(image.width(), image.height()), "{bbox} outside image");
    image.crop_imm(bbox.column_start, bbox.row_start, bbox.width(), bbox.height())
}

/// Crop a typed image buffer to a bounding box
pub fn crop_buffer<P>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    bbox: &BoundingBox,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
{
    debug_assert!(bbox.fits(image.width(), image.height()), "{bbox} outside image");
    imageops::crop_imm(image, bbox.column_start, bbox.row_start, bbox.width(), bbox.height())
        .to_image()
}

/// Border cropper holding only configuration
///
/// Every call is independent; nothing about a processed image is kept.
#[derive(Debug, Clone, Default)]
pub struct EdgeCropper {
    options: ThresholdOptions,
}

impl EdgeCropper {
    pub fn new(options: ThresholdOptions) -> Self {
        Self { options }
    }

    /// Threshold options in use
    pub fn options(&self) -> &ThresholdOptions {
        &self.options
    }

    /// Default destination for single-image runs
    pub fn default_output_path() -> PathBuf {
        PathBuf::from(DEFAULT_OUTPUT_PATH)
    }

    /// Detect the content region of a loaded image
    pub fn detect(&self, image: &LoadedImage) -> Result<Detection> {
        BorderDetector::detect(&image.gray, &self.options)
    }

    /// Detect and crop a loaded image
    pub fn crop_image(&self, image: &LoadedImage) -> Result<(Detection, DynamicImage)> {
        let detection = self.detect(image)?;
        let cropped = crop(&image.color, &detection.bounding_box);
        Ok((detection, cropped))
    }

    /// Load, crop and save one image
    pub fn process(&self, input_path: &Path, output_path: &Path) -> Result<CropReport> {
        let loaded = load_image(input_path)?;
        let (detection, cropped) = self.crop_image(&loaded)?;

        save_image(&cropped, output_path)?;
        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            region = %detection.bounding_box,
            "cropped image saved"
        );

        Ok(CropReport {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            original_size: loaded.dimensions(),
            cropped_size: (cropped.width(), cropped.height()),
            bounding_box: detection.bounding_box,
            background: detection.background,
        })
    }

    /// Process many (input, output) pairs in parallel
    ///
    /// Images are independent; a failure is reported for its pair only.
    /// `on_done` is called once per pair as soon as it finishes.
    pub fn process_batch<F>(
        &self,
        jobs: &[(PathBuf, PathBuf)],
        on_done: F,
    ) -> Vec<(PathBuf, Result<CropReport>)>
    where
        F: Fn(&Path, &Result<CropReport>) + Sync,
    {
        jobs.par_iter()
            .map(|(input, output)| {
                let result = self.process(input, output);
                if let Err(e) = &result {
                    warn!(input = %input.display(), error = %e, "image skipped");
                }
                on_done(input, &result);
                (input.clone(), result)
            })
            .collect()
    }
}
