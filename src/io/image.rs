//! PNG heat-map preview of grid values

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::analysis::statistics::value_range;
use crate::io::error::{GridError, Result};
use crate::spatial::Grid;

// Color ramp stops from low to high values
const RAMP: [[u8; 3]; 5] = [
    [48, 18, 59],
    [40, 120, 240],
    [60, 200, 120],
    [240, 200, 40],
    [200, 30, 20],
];

/// Map a normalized value in `[0, 1]` onto the color ramp
pub fn ramp_color(t: f64) -> Rgba<u8> {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (RAMP.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(RAMP.len() - 2);
    let frac = scaled - lower as f64;

    let from = RAMP.get(lower).copied().unwrap_or([0, 0, 0]);
    let to = RAMP.get(lower + 1).copied().unwrap_or(from);
    let mix = |a: u8, b: u8| (f64::from(b) - f64::from(a)).mul_add(frac, f64::from(a)).round() as u8;

    Rgba([
        mix(from[0], to[0]),
        mix(from[1], to[1]),
        mix(from[2], to[2]),
        255,
    ])
}

/// Export grid values as a PNG with blank cells transparent
///
/// Colors span the range of the current non-blank cells, not the cached z
/// range. Row 0 (`y_min`) is drawn at the bottom of the image.
///
/// # Errors
///
/// Returns an error if:
/// - The grid has no cells
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &Grid, output_path: &Path) -> Result<()> {
    let (x_size, y_size) = grid.shape();
    if x_size == 0 || y_size == 0 {
        return Err(crate::io::error::invalid_parameter(
            "grid",
            &format!("{x_size}x{y_size}"),
            &"cannot render an empty grid",
        ));
    }

    let (low, high) =
        value_range(grid.cells().iter().copied(), grid.blank_value()).unwrap_or((0.0, 0.0));
    let span = high - low;

    let mut img: RgbaImage = ImageBuffer::new(x_size as u32, y_size as u32);
    for (pixel_x, pixel_y, pixel) in img.enumerate_pixels_mut() {
        let row = y_size - 1 - pixel_y as usize;
        *pixel = grid
            .value(pixel_x as i64, row as i64)
            .map_or(Rgba([0, 0, 0, 0]), |value| {
                let t = if span > 0.0 { (value - low) / span } else { 0.5 };
                ramp_color(t)
            });
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| GridError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| GridError::ImageExport {
            path: output_path.into(),
            source: e,
        })?;

    Ok(())
}
