//! Lossless PNG encoding for display and storage.
//!
//! Every processed raster is re-encoded as PNG before it leaves the core:
//! PNG is deterministic and lossless, so a buffer that came out of
//! [`crate::decode::decode`] survives an encode/decode round trip exactly.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::raster::RasterBuffer;

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an RGBA raster to PNG bytes.
///
/// # Errors
///
/// Fails if either dimension is zero or the pixel buffer does not hold
/// exactly `width * height * 4` bytes. Encoder failures (which should not
/// occur for a well-formed buffer) surface as `EncodingFailed`.
///
/// # Example
///
/// ```
/// use tonelab_core::{encode_png, RasterBuffer};
///
/// let buf = RasterBuffer::filled(16, 16, [128, 128, 128, 255]);
/// let png = encode_png(&buf).unwrap();
///
/// // Verify PNG signature
/// assert_eq!(&png[0..4], &[0x89, b'P', b'N', b'G']);
/// ```
pub fn encode_png(buffer: &RasterBuffer) -> Result<Vec<u8>, EncodeError> {
    if buffer.width == 0 || buffer.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: buffer.width,
            height: buffer.height,
        });
    }

    let expected_len = (buffer.width as usize) * (buffer.height as usize) * 4;
    if buffer.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: buffer.pixels.len(),
        });
    }

    let mut out = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut out);
    encoder
        .write_image(
            &buffer.pixels,
            buffer.width,
            buffer.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out.into_inner())
}
