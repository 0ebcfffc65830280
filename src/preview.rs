//! Side-by-side preview of a crop
//!
//! Renders the original image, with the detected region outlined, next to
//! the cropped result. Purely diagnostic; detection never reads it back.

use image::{imageops, DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use std::path::Path;

use crate::border::{save_image, BoundingBox, Result};

/// Gap between the two panels in pixels
const PANEL_GAP: u32 = 16;

/// Canvas fill behind the panels
const CANVAS_COLOR: Rgb<u8> = Rgb([128, 128, 128]);

/// Outline color of the detected region
const OUTLINE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Compose original (with outline) and cropped image into one RGB canvas
pub fn render_side_by_side(
    original: &DynamicImage,
    cropped: &DynamicImage,
    bbox: &BoundingBox,
) -> RgbImage {
    let mut left = original.to_rgb8();
    let right = cropped.to_rgb8();

    if bbox.width() > 0 && bbox.height() > 0 {
        let outline = Rect::at(bbox.column_start as i32, bbox.row_start as i32)
            .of_size(bbox.width(), bbox.height());
        draw_hollow_rect_mut(&mut left, outline, OUTLINE_COLOR);
    }

    let width = left.width() + PANEL_GAP + right.width();
    let height = left.height().max(right.height());
    let mut canvas = RgbImage::from_pixel(width, height, CANVAS_COLOR);

    imageops::overlay(&mut canvas, &left, 0, 0);
    imageops::overlay(&mut canvas, &right, i64::from(left.width() + PANEL_GAP), 0);
    canvas
}

/// Render and save a preview
pub fn save_preview(
    original: &DynamicImage,
    cropped: &DynamicImage,
    bbox: &BoundingBox,
    path: &Path,
) -> Result<()> {
    let canvas = render_side_by_side(original, cropped, bbox);
    save_image(&DynamicImage::ImageRgb8(canvas), path)
}
