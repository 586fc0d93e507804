//! Filter engine WASM bindings.

use crate::types::{mode_from_u8, JsRasterImage};
use tonelab_core::filter;
use wasm_bindgen::prelude::*;

/// Apply a filter mode to a raster image, returning a new image.
///
/// # Arguments
///
/// * `image` - The source raster (left untouched)
/// * `mode` - Filter mode: 0 = grayscale, 1 = blackwhite, 2 = contour,
///   3 = original; unknown values fall back to grayscale
/// * `threshold` - Binarization threshold, must be within 0-255
///
/// # Errors
///
/// Returns an error if the threshold is outside the 0-255 range.
///
/// # Example
///
/// ```typescript
/// const edges = apply_filter(image, 2, 30); // contour with threshold 30
/// ctx.putImageData(new ImageData(
///   new Uint8ClampedArray(edges.pixels()), edges.width, edges.height), 0, 0);
/// ```
#[wasm_bindgen]
pub fn apply_filter(
    image: &JsRasterImage,
    mode: u8,
    threshold: i32,
) -> Result<JsRasterImage, JsValue> {
    filter::apply(&image.to_raster(), mode_from_u8(mode), threshold)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
