//! Image fitter
//!
//! Scales an image's natural dimensions to fit inside a target cell without
//! distortion, and centers the result. The scaled image never overflows the
//! cell in either axis and the aspect ratio is preserved exactly.

use std::fmt;

/// Scaled dimensions and centering offsets for one image in one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedImage {
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Natural dimensions that cannot be fitted (zero width or height)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegenerateGeometryError {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for DegenerateGeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cannot fit image with degenerate dimensions {}x{}",
            self.width, self.height
        )
    }
}

impl std::error::Error for DegenerateGeometryError {}

/// Fit natural image dimensions into a cell, preserving aspect ratio
///
/// If the image is relatively wider than the cell it is fitted to the cell
/// width and the height derived from the aspect ratio; otherwise it is fitted
/// to the cell height. Offsets center the scaled image within the cell.
///
/// Zero-sized natural dimensions are an error, never silently defaulted.
pub fn fit_image(
    img_width: u32,
    img_height: u32,
    cell_width: f32,
    cell_height: f32,
) -> Result<FittedImage, DegenerateGeometryError> {
    if img_width == 0 || img_height == 0 {
        return Err(DegenerateGeometryError {
            width: img_width,
            height: img_height,
        });
    }

    let img_aspect = img_width as f32 / img_height as f32;
    let cell_aspect = cell_width / cell_height;

    let (width, height) = if img_aspect > cell_aspect {
        // Image is wider - fit to width
        (cell_width, cell_width / img_aspect)
    } else {
        // Image is taller - fit to height
        (cell_height * img_aspect, cell_height)
    };

    Ok(FittedImage {
        width,
        height,
        offset_x: (cell_width - width) / 2.0,
        offset_y: (cell_height - height) / 2.0,
    })
}
