//! Tonelab WASM - WebAssembly bindings for Tonelab
//!
//! This crate exposes the tonelab-core pixel pipeline to
//! JavaScript/TypeScript applications. Persistence stays on the host side;
//! these bindings cover the decode -> filter -> encode path only.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings (PNG/JPEG)
//! - `filter` - The fixed filter modes (grayscale, blackwhite, contour)
//! - `encode` - Lossless PNG encoding for display and download
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, apply_filter, encode_png } from '@tonelab/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const edges = apply_filter(image, 2, 30);
//! const png = encode_png(edges);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod filter;
mod types;

// Re-export public types
pub use decode::decode_image;
pub use encode::encode_png;
pub use filter::apply_filter;
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
