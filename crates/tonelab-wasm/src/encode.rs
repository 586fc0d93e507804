//! Image encoding WASM bindings.

use crate::types::JsRasterImage;
use tonelab_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an RGBA raster image to lossless PNG bytes.
///
/// # Arguments
///
/// * `image` - The raster to encode
///
/// # Errors
///
/// Returns an error if the image has a zero dimension or its pixel buffer
/// does not match `width * height * 4` bytes.
///
/// # Example
///
/// ```typescript
/// const png = encode_png(image);
/// const blob = new Blob([png], { type: 'image/png' });
/// ```
#[wasm_bindgen]
pub fn encode_png(image: &JsRasterImage) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(&image.to_raster()).map_err(|e| JsValue::from_str(&e.to_string()))
}
