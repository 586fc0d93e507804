//! Black/white threshold binarization.

use super::{validate_threshold, FilterError};
use crate::luminance::average_luminance;
use crate::raster::RasterBuffer;

/// Binarize a raster against a luminance threshold.
///
/// Each pixel's average luminance is compared with `threshold`: at or above
/// maps to white (255), below maps to black (0). The same value is written
/// to R, G and B; alpha passes through unchanged.
///
/// The boundary is deliberate: luminance exactly equal to the threshold is
/// white, not black.
///
/// # Errors
///
/// Returns `FilterError::InvalidThreshold` if `threshold` is outside
/// `[0, 255]`.
pub fn blackwhite(buffer: &RasterBuffer, threshold: i32) -> Result<RasterBuffer, FilterError> {
    let threshold = validate_threshold(threshold)?;

    let mut out = buffer.clone();
    for px in out.pixels.chunks_exact_mut(4) {
        let lum = average_luminance(px[0], px[1], px[2]);
        let value = if lum >= threshold { 255 } else { 0 };
        px[0] = value;
        px[1] = value;
        px[2] = value;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blackwhite_red_below_threshold() {
        // 3x3 opaque red has luminance 85; 85 < 100 maps to black.
        let buf = RasterBuffer::filled(3, 3, [255, 0, 0, 255]);
        let out = blackwhite(&buf, 100).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(out.rgba_at(x, y), [0, 0, 0, 255]);
            }
        }
    }

    #[test]
    fn test_blackwhite_boundary_maps_to_white() {
        // Luminance exactly equal to the threshold is white.
        let buf = RasterBuffer::filled(1, 1, [85, 85, 85, 255]);
        let out = blackwhite(&buf, 85).unwrap();
        assert_eq!(out.rgba_at(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_blackwhite_one_below_boundary_maps_to_black() {
        let buf = RasterBuffer::filled(1, 1, [84, 84, 84, 255]);
        let out = blackwhite(&buf, 85).unwrap();
        assert_eq!(out.rgba_at(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_blackwhite_threshold_zero_is_all_white() {
        let buf = RasterBuffer::filled(2, 2, [0, 0, 0, 255]);
        let out = blackwhite(&buf, 0).unwrap();
        assert_eq!(out.rgba_at(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_blackwhite_preserves_alpha() {
        let buf = RasterBuffer::filled(2, 1, [200, 200, 200, 42]);
        let out = blackwhite(&buf, 100).unwrap();
        assert_eq!(out.rgba_at(0, 0), [255, 255, 255, 42]);
    }

    #[test]
    fn test_blackwhite_rejects_bad_threshold() {
        let buf = RasterBuffer::filled(1, 1, [0, 0, 0, 255]);
        assert_eq!(
            blackwhite(&buf, -5).unwrap_err(),
            FilterError::InvalidThreshold(-5)
        );
        assert_eq!(
            blackwhite(&buf, 1000).unwrap_err(),
            FilterError::InvalidThreshold(1000)
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn raster_strategy() -> impl Strategy<Value = RasterBuffer> {
            ((1u32..=16, 1u32..=16))
                .prop_flat_map(|(w, h)| {
                    let size = (w as usize) * (h as usize) * 4;
                    (
                        Just(w),
                        Just(h),
                        prop::collection::vec(any::<u8>(), size..=size),
                    )
                })
                .prop_map(|(w, h, pixels)| RasterBuffer::new(w, h, pixels))
        }

        proptest! {
            /// Property: every color channel is exactly 0 or 255, the choice
            /// agrees with the luminance comparison, and alpha is preserved.
            #[test]
            fn prop_output_is_binary(buf in raster_strategy(), threshold in 0i32..=255) {
                let out = blackwhite(&buf, threshold).unwrap();
                for (src, dst) in buf.pixels.chunks_exact(4).zip(out.pixels.chunks_exact(4)) {
                    let lum = average_luminance(src[0], src[1], src[2]);
                    let expected = if lum as i32 >= threshold { 255 } else { 0 };
                    prop_assert_eq!(dst[0], expected);
                    prop_assert_eq!(dst[1], expected);
                    prop_assert_eq!(dst[2], expected);
                    prop_assert_eq!(dst[3], src[3]);
                }
            }
        }
    }
}
