//! Image loading and saving

use image::{DynamicImage, GrayImage};
use std::path::Path;

use super::types::{BorderError, Result};

/// Decoded image with its aligned grayscale projection
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Color buffer as decoded
    pub color: DynamicImage,
    /// 8-bit luma projection of `color`
    pub gray: GrayImage,
}

impl LoadedImage {
    /// Wrap an already decoded image
    pub fn from_image(color: DynamicImage) -> Self {
        let gray = color.to_luma8();
        Self { color, gray }
    }

    /// Image size (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.gray.dimensions()
    }
}

/// Load an image file
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    if !path.exists() {
        return Err(BorderError::ImageNotFound(path.to_path_buf()));
    }

    let color = image::open(path).map_err(|e| BorderError::InvalidImage(e.to_string()))?;
    Ok(LoadedImage::from_image(color))
}

/// Save an image, encoding chosen from the file extension
///
/// JPEG cannot hold an alpha channel or 16-bit samples, so such images are
/// converted to 8-bit RGB first.
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let is_jpeg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"));

    let jpeg_safe = matches!(
        image,
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_)
    );

    let result = if is_jpeg && !jpeg_safe {
        DynamicImage::ImageRgb8(image.to_rgb8()).save(path)
    } else {
        image.save(path)
    };

    result.map_err(|e| BorderError::SaveFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
