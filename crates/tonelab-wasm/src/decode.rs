//! Image decoding WASM bindings.

use crate::types::JsRasterImage;
use tonelab_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an encoded image (PNG or JPEG) from bytes.
///
/// EXIF orientation correction is applied automatically so the raster
/// matches what the browser renders for the original file.
///
/// # Arguments
///
/// * `bytes` - The raw image file bytes as a `Uint8Array`
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image format, the
/// file is corrupted, or the decoded dimensions are zero.
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const image = decode_image(bytes);
/// console.log(`Decoded ${image.width}x${image.height} image`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    decode::decode(bytes)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonelab_core::{encode_png, RasterBuffer};

    #[test]
    fn test_decode_image_round_trip() {
        let buf = RasterBuffer::filled(6, 4, [9, 8, 7, 255]);
        let png = encode_png(&buf).unwrap();

        let img = decode_image(&png).unwrap();
        assert_eq!(img.width(), 6);
        assert_eq!(img.height(), 4);
        assert_eq!(img.pixels(), buf.pixels);
    }
}
