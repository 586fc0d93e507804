//! Grayscale conversion.

use crate::luminance::average_luminance;
use crate::raster::RasterBuffer;

/// Convert a raster to grayscale.
///
/// Each pixel's R, G and B channels are replaced by their integer-truncated
/// average; the alpha channel passes through unchanged.
///
/// # Example
///
/// ```
/// use tonelab_core::{grayscale, RasterBuffer};
///
/// let red = RasterBuffer::filled(3, 3, [255, 0, 0, 255]);
/// let gray = grayscale(&red);
/// assert_eq!(gray.rgba_at(1, 1), [85, 85, 85, 255]);
/// ```
pub fn grayscale(buffer: &RasterBuffer) -> RasterBuffer {
    let mut out = buffer.clone();
    for px in out.pixels.chunks_exact_mut(4) {
        let lum = average_luminance(px[0], px[1], px[2]);
        px[0] = lum;
        px[1] = lum;
        px[2] = lum;
    }
    out
}
