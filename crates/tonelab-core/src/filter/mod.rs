//! The filter engine: pure transformations over a [`RasterBuffer`].
//!
//! Three fixed modes plus identity:
//! 1. Grayscale - average luminance written to R, G, B
//! 2. Black/white - luminance binarized against a threshold
//! 3. Contour - gradient-magnitude edge detection, dark edges on light
//!
//! All functions are stateless, run synchronously to completion, and
//! allocate their output - the input raster is never mutated. Channel math
//! runs in i32/f32 before the final clamp to u8, so the squared-gradient
//! sum in contour mode cannot overflow.

mod contour;
mod grayscale;
mod threshold;

pub use contour::contour;
pub use grayscale::grayscale;
pub use threshold::blackwhite;

use thiserror::Error;

use crate::raster::RasterBuffer;
use crate::ProcessingMode;

/// Errors produced by the filter engine.
///
/// The raster itself is well-formed by construction (it only ever comes out
/// of the decoder), so the only rejected input is an out-of-range threshold.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The threshold parameter is outside the valid 0-255 range.
    #[error("Threshold {0} is out of range (expected 0-255)")]
    InvalidThreshold(i32),
}

/// Validate a threshold into the u8 range before any pixel work begins.
pub(crate) fn validate_threshold(threshold: i32) -> Result<u8, FilterError> {
    u8::try_from(threshold).map_err(|_| FilterError::InvalidThreshold(threshold))
}

/// Apply the filter selected by `mode` to a raster.
///
/// The threshold is validated for every mode, including the ones that do
/// not consume it, so a caller holding bad parameters fails the same way
/// regardless of the mode it picked. `Original` returns a copy of the
/// input.
///
/// # Errors
///
/// Returns `FilterError::InvalidThreshold` if `threshold` is outside
/// `[0, 255]`; no pixels are touched in that case.
pub fn apply(
    buffer: &RasterBuffer,
    mode: ProcessingMode,
    threshold: i32,
) -> Result<RasterBuffer, FilterError> {
    validate_threshold(threshold)?;

    Ok(match mode {
        ProcessingMode::Grayscale => grayscale(buffer),
        ProcessingMode::BlackWhite => blackwhite(buffer, threshold)?,
        ProcessingMode::Contour => contour(buffer, threshold)?,
        ProcessingMode::Original => buffer.clone(),
    })
}
