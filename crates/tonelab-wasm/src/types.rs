//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Tonelab
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use tonelab_core::{ProcessingMode, RasterBuffer};
use wasm_bindgen::prelude::*;

/// A decoded RGBA image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy
/// is made to JavaScript memory as a `Uint8Array`. For performance-critical
/// code, keep the image in WASM memory and only extract pixels when needed.
///
/// The `free()` method can be called to explicitly release WASM memory, but
/// this is optional as wasm-bindgen's finalizer will handle cleanup
/// automatically.
#[wasm_bindgen]
pub struct JsRasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create a new JsRasterImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRasterImage {
        JsRasterImage {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4 for RGBA)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup
    /// automatically. Call this to immediately release a large image.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRasterImage {
    /// Create a JsRasterImage from a core RasterBuffer.
    pub(crate) fn from_raster(buf: RasterBuffer) -> Self {
        Self {
            width: buf.width,
            height: buf.height,
            pixels: buf.pixels,
        }
    }

    /// Convert back to a core RasterBuffer.
    ///
    /// Note: This clones the pixel data.
    pub(crate) fn to_raster(&self) -> RasterBuffer {
        RasterBuffer {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Convert a u8 mode value to the core ProcessingMode enum.
///
/// Values:
/// - 0 = Grayscale
/// - 1 = BlackWhite (threshold binarization)
/// - 2 = Contour (edge detection)
/// - 3 = Original (identity)
///
/// Any other value defaults to Grayscale.
pub(crate) fn mode_from_u8(value: u8) -> ProcessingMode {
    match value {
        1 => ProcessingMode::BlackWhite,
        2 => ProcessingMode::Contour,
        3 => ProcessingMode::Original,
        _ => ProcessingMode::Grayscale, // Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_raster_image_creation() {
        let img = JsRasterImage {
            width: 100,
            height: 50,
            pixels: vec![0u8; 100 * 50 * 4],
        };
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 20000);
    }

    #[test]
    fn test_js_raster_image_pixels() {
        let pixels = vec![255u8, 128, 64, 255, 32, 16, 8, 255]; // 2 RGBA pixels
        let img = JsRasterImage {
            width: 2,
            height: 1,
            pixels: pixels.clone(),
        };
        assert_eq!(img.pixels(), pixels);
    }

    #[test]
    fn test_from_raster() {
        let buf = RasterBuffer::filled(20, 10, [5, 6, 7, 255]);
        let js_img = JsRasterImage::from_raster(buf);
        assert_eq!(js_img.width(), 20);
        assert_eq!(js_img.height(), 10);
        assert_eq!(js_img.byte_length(), 800);
    }

    #[test]
    fn test_to_raster() {
        let js_img = JsRasterImage {
            width: 5,
            height: 4,
            pixels: vec![128u8; 5 * 4 * 4],
        };
        let buf = js_img.to_raster();
        assert_eq!(buf.width, 5);
        assert_eq!(buf.height, 4);
        assert_eq!(buf.pixels.len(), 80);
    }

    #[test]
    fn test_mode_from_u8() {
        assert!(matches!(mode_from_u8(0), ProcessingMode::Grayscale));
        assert!(matches!(mode_from_u8(1), ProcessingMode::BlackWhite));
        assert!(matches!(mode_from_u8(2), ProcessingMode::Contour));
        assert!(matches!(mode_from_u8(3), ProcessingMode::Original));
        // Unknown values default to Grayscale
        assert!(matches!(mode_from_u8(4), ProcessingMode::Grayscale));
        assert!(matches!(mode_from_u8(255), ProcessingMode::Grayscale));
    }
}
