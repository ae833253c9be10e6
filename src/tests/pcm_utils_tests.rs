//! Unit tests for PCM utilities

use crate::error::InputDataError;
use crate::pcm_utils::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rescale_16_bit_extremes() {
        assert_eq!(rescale_sample(i16::MAX as i32, 16), 0x7FFF_0000);
        assert_eq!(rescale_sample(i16::MIN as i32, 16), i32::MIN);
        assert_eq!(rescale_sample(-1, 16), -0x1_0000);
        assert_eq!(rescale_sample(0, 16), 0);
    }

    #[test]
    fn test_rescale_full_width_is_identity() {
        for sample in [i32::MIN, -1, 0, 1, i32::MAX] {
            assert_eq!(rescale_sample(sample, 32), sample);
        }
    }

    #[test]
    fn test_rescale_one_bit() {
        assert_eq!(rescale_sample(-1, 1), i32::MIN);
        assert_eq!(rescale_sample(0, 1), 0);
    }

    #[test]
    fn test_invalid_bit_depths() {
        assert_eq!(
            validate_bit_depth(0),
            Err(InputDataError::InvalidBitDepth { depth: 0, max: 32 })
        );
        assert!(validate_bit_depth(33).is_err());
        assert!(validate_bit_depth(1).is_ok());
        assert!(validate_bit_depth(24).is_ok());
    }

    #[test]
    fn test_rescale_into_takes_count_samples() {
        let mut out = vec![42];
        rescale_into(&[1, 2, 3, 4], 3, 24, &mut out).unwrap();
        assert_eq!(out, vec![1 << 8, 2 << 8, 3 << 8]);

        assert!(rescale_into(&[1], 1, 40, &mut out).is_err());
    }

    #[test]
    fn test_deinterleave_stereo() {
        let buffers = deinterleave(&[1, 4, 2, 5, 3, 6], 2);
        assert_eq!(buffers, vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }

    #[test]
    fn test_deinterleave_drops_partial_frame() {
        let buffers = deinterleave(&[1, 4, 2], 2);
        assert_eq!(buffers, vec![vec![1], vec![4]]);
        assert!(deinterleave(&[1, 2], 0).is_empty());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// Value in the signed range of `depth` bits
    fn sample_in_range(depth: u32, raw: i64) -> i32 {
        let span = 1i64 << depth;
        (raw.rem_euclid(span) - span / 2) as i32
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            failure_persistence: None,
            ..ProptestConfig::default()
        })]

        #[test]
        fn test_rescale_is_lossless(depth in 1u32..=32, raw in any::<i64>()) {
            let sample = sample_in_range(depth, raw);
            let scaled = rescale_sample(sample, depth);

            prop_assert_eq!(scaled >> (32 - depth), sample, "shift must be reversible");
            prop_assert_eq!(scaled.signum(), sample.signum(), "sign preserved");
        }

        #[test]
        fn test_rescale_extremes_fill_container(depth in 1u32..=32) {
            let max = ((1i64 << (depth - 1)) - 1) as i32;
            let min = (-(1i64 << (depth - 1))) as i32;

            prop_assert_eq!(rescale_sample(min, depth), i32::MIN);
            let expected_max = (i64::from(i32::MAX) + 1 - (1i64 << (32 - depth))) as i32;
            prop_assert_eq!(rescale_sample(max, depth), expected_max);
        }
    }
}
