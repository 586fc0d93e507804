//! Luminance calculation shared by the filter modes.
//!
//! The pipeline uses the unweighted channel average with integer truncation,
//! matching the reference rendering: `floor((R + G + B) / 3)`. This is
//! deliberately not the perceptual ITU-R weighting - the threshold and
//! contour modes binarize against this average, so the same definition has
//! to be used everywhere.

/// Calculate average luminance from u8 RGB values with integer truncation.
///
/// # Example
/// ```
/// use tonelab_core::luminance::average_luminance;
///
/// assert_eq!(average_luminance(255, 0, 0), 85); // 255 / 3, truncated
/// ```
#[inline]
pub fn average_luminance(r: u8, g: u8, b: u8) -> u8 {
    ((r as u16 + g as u16 + b as u16) / 3) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_pure_white() {
        assert_eq!(average_luminance(255, 255, 255), 255);
    }

    #[test]
    fn test_luminance_pure_black() {
        assert_eq!(average_luminance(0, 0, 0), 0);
    }

    #[test]
    fn test_luminance_truncates() {
        // (255 + 0 + 0) / 3 = 85.0, (255 + 255 + 0) / 3 = 170.0,
        // (1 + 0 + 0) / 3 = 0.33 -> 0
        assert_eq!(average_luminance(255, 0, 0), 85);
        assert_eq!(average_luminance(255, 255, 0), 170);
        assert_eq!(average_luminance(1, 0, 0), 0);
    }

    #[test]
    fn test_luminance_gray_preserves_value() {
        // For gray (r=g=b), the average equals that gray value exactly.
        for v in [0u8, 64, 128, 192, 255] {
            assert_eq!(average_luminance(v, v, v), v);
        }
    }
}
