//! Tonelab Core - Image processing library
//!
//! This crate provides the core pixel pipeline for Tonelab: decoding uploaded
//! images into an RGBA raster, applying one of the fixed filter modes
//! (grayscale, black/white threshold, contour), and re-encoding the result
//! as lossless PNG for display or storage.

pub mod decode;
pub mod encode;
pub mod filter;
pub mod luminance;
pub mod raster;

pub use decode::{decode, DecodeError, Orientation};
pub use encode::{encode_png, EncodeError};
pub use filter::{apply, blackwhite, contour, grayscale, FilterError};
pub use raster::RasterBuffer;

/// The fixed set of transformation modes offered by the pipeline.
///
/// `Original` is the identity transform and exists so a host UI can show
/// the untouched upload through the same code path as the real filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    /// Per-pixel average luminance written back to R, G and B.
    #[default]
    Grayscale,
    /// Luminance binarized against a threshold; at or above maps to white.
    BlackWhite,
    /// Gradient-magnitude edge detection, edges rendered dark on light.
    Contour,
    /// Identity - the input passes through unchanged.
    Original,
}

impl ProcessingMode {
    /// Stable lowercase name, used as the prefix of saved image names.
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingMode::Grayscale => "grayscale",
            ProcessingMode::BlackWhite => "blackwhite",
            ProcessingMode::Contour => "contour",
            ProcessingMode::Original => "original",
        }
    }
}

impl std::fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
