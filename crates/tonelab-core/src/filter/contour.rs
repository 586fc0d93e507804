//! Gradient-magnitude contour (edge) detection.

use super::{validate_threshold, FilterError};
use crate::luminance::average_luminance;
use crate::raster::RasterBuffer;

/// Highlight edges in a raster, rendered dark on a light background.
///
/// The algorithm:
/// 1. Build a fully opaque grayscale working image (average luminance in
///    R, G, B, alpha forced to 255).
/// 2. For every interior pixel compute central differences over that
///    grayscale image: `gx = gray(x+1, y) - gray(x-1, y)` and
///    `gy = gray(x, y+1) - gray(x, y-1)`, then the gradient magnitude
///    `sqrt(gx^2 + gy^2)`.
/// 3. Binarize the magnitude against `threshold` (below maps to 0, at or
///    above to 255) and write `255 - magnitude` to R, G and B, so edges
///    come out black. Alpha is taken from the input raster.
///
/// Border policy: no gradient is defined for the outermost ring of pixels,
/// so the output starts as a copy of the input and the border keeps the
/// source pixel values.
///
/// # Errors
///
/// Returns `FilterError::InvalidThreshold` if `threshold` is outside
/// `[0, 255]`.
pub fn contour(buffer: &RasterBuffer, threshold: i32) -> Result<RasterBuffer, FilterError> {
    let threshold = validate_threshold(threshold)? as f32;

    // Opaque grayscale intermediate used for the gradient taps.
    let mut gray = buffer.pixels.clone();
    for px in gray.chunks_exact_mut(4) {
        let lum = average_luminance(px[0], px[1], px[2]);
        px[0] = lum;
        px[1] = lum;
        px[2] = lum;
        px[3] = 255;
    }

    let width = buffer.width as usize;
    let height = buffer.height as usize;
    let mut out = buffer.clone();

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let idx = (y * width + x) * 4;
            let left = (y * width + x - 1) * 4;
            let right = (y * width + x + 1) * 4;
            let up = ((y - 1) * width + x) * 4;
            let down = ((y + 1) * width + x) * 4;

            let gx = gray[right] as i32 - gray[left] as i32;
            let gy = gray[down] as i32 - gray[up] as i32;
            let magnitude = ((gx * gx + gy * gy) as f32).sqrt();

            let magnitude = if magnitude < threshold { 0u8 } else { 255u8 };
            let value = 255 - magnitude;
            out.pixels[idx] = value;
            out.pixels[idx + 1] = value;
            out.pixels[idx + 2] = value;
        }
    }

    Ok(out)
}
