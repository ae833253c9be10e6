//! Unit tests for the Layer III frame engine

use crate::config::{EncodingParameters, StreamParameters};
use crate::encoder::*;
use crate::error::ConfigError;

#[cfg(test)]
mod tests {
    use super::*;

    fn noise(len: usize, seed: u32) -> Vec<i32> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (state as i32) >> 2
            })
            .collect()
    }

    fn read_bits(bytes: &[u8], pos: &mut usize, n: usize) -> u32 {
        let mut value = 0;
        for _ in 0..n {
            let bit = (bytes[*pos / 8] >> (7 - *pos % 8)) & 1;
            value = (value << 1) | u32::from(bit);
            *pos += 1;
        }
        value
    }

    /// `(main_data_begin, [(part2_3_length, big_values, global_gain)])` of
    /// an MPEG-1 mono frame without CRC
    fn mono_side_info(frame: &[u8]) -> (u32, Vec<(u32, u32, u32)>) {
        let mut pos = 32;
        let main_data_begin = read_bits(frame, &mut pos, 9);
        pos += 5 + 4;
        let granules = (0..2)
            .map(|_| {
                let part2_3_length = read_bits(frame, &mut pos, 12);
                let big_values = read_bits(frame, &mut pos, 9);
                let global_gain = read_bits(frame, &mut pos, 8);
                pos += 4 + 1 + 15 + 4 + 3 + 3;
                (part2_3_length, big_values, global_gain)
            })
            .collect();
        (main_data_begin, granules)
    }

    #[test]
    fn test_rejects_invalid_stream() {
        let params = EncodingParameters::default();
        let err = FrameEncoder::new(&params, &StreamParameters::new(0, 44000, 1)).err();
        assert_eq!(err, Some(ConfigError::UnsupportedSampleRate(44000)));
    }

    #[test]
    fn test_cbr_frame_sizes_follow_slot_lag() {
        let params = EncodingParameters::default();
        let mut encoder = FrameEncoder::new(&params, &StreamParameters::new(0, 44100, 1)).unwrap();
        assert_eq!(encoder.samples_per_frame(), 1152);

        let silence = vec![0i32; 1152];
        let mut total = 0;
        for _ in 0..100 {
            let frame = encoder.encode_frame(&[silence.as_slice()]).unwrap();
            assert!(frame.len() == 417 || frame.len() == 418);
            assert_eq!(&frame[..2], &[0xFF, 0xFB]);
            total += frame.len();
        }

        // 100 frames of 417.96 slots
        assert!((41795..=41796).contains(&total), "total {}", total);
        assert_eq!(encoder.frames_encoded(), 100);
    }

    #[test]
    fn test_cbr_granules_fill_frame_payload() {
        let params = EncodingParameters::default();
        let mut encoder = FrameEncoder::new(&params, &StreamParameters::new(0, 44100, 1)).unwrap();
        let pcm = noise(1152 * 3, 5);

        for (i, samples) in pcm.chunks(1152).enumerate() {
            let frame = encoder.encode_frame(&[samples]).unwrap();
            let (main_data_begin, granules) = mono_side_info(&frame);
            let payload_bits = (frame.len() * 8 - 32 - 136) as u32;

            assert_eq!(main_data_begin, 0);
            let coded: u32 = granules.iter().map(|g| g.0).sum();
            assert_eq!(coded, payload_bits, "frame {}", i);
            for (part2_3_length, big_values, _) in granules {
                assert!(part2_3_length <= 4095);
                assert!(big_values > 0 && big_values <= 288, "noise needs big values");
            }
        }
    }

    #[test]
    fn test_cbr_silence_is_stuffed() {
        let params = EncodingParameters::default();
        let mut encoder = FrameEncoder::new(&params, &StreamParameters::new(0, 44100, 1)).unwrap();

        let frame = encoder.encode_frame(&[&[0i32; 1152][..]]).unwrap();
        let (_, granules) = mono_side_info(&frame);

        assert_eq!(granules[0].0, (frame.len() * 8 - 168) as u32);
        assert_eq!(granules[1], (0, 0, 210));
        assert!(frame[21..].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_short_input_is_rejected() {
        let params = EncodingParameters::default();
        let mut encoder = FrameEncoder::new(&params, &StreamParameters::new(0, 44100, 2)).unwrap();
        let left = vec![0i32; 1152];
        let right = vec![0i32; 100];

        assert!(encoder.encode_frame(&[left.as_slice(), right.as_slice()]).is_err());
        assert!(encoder.encode_frame(&[left.as_slice()]).is_err(), "missing channel");
        assert_eq!(encoder.frames_encoded(), 0);
    }

    #[test]
    fn test_stereo_header_mode() {
        let params = EncodingParameters::default();
        let mut encoder = FrameEncoder::new(&params, &StreamParameters::new(0, 48000, 2)).unwrap();
        let left = noise(1152, 1);
        let right = noise(1152, 2);

        let frame = encoder
            .encode_frame(&[left.as_slice(), right.as_slice()])
            .unwrap();

        assert_eq!(frame.len(), 384, "48 kHz frames never pad");
        assert_eq!(frame[3] >> 6, 0, "stereo mode");
    }

    #[test]
    fn test_mpeg2_frame() {
        let params = EncodingParameters::default().bitrate(64);
        let mut encoder = FrameEncoder::new(&params, &StreamParameters::new(0, 24000, 1)).unwrap();
        assert_eq!(encoder.samples_per_frame(), 576);

        let frame = encoder.encode_frame(&[noise(576, 3).as_slice()]).unwrap();
        assert_eq!(frame.len(), 192);
        assert_eq!(&frame[..2], &[0xFF, 0xF3]);
    }

    #[test]
    fn test_vbr_silence_uses_lowest_bitrate() {
        let params = EncodingParameters::default().vbr(true);
        let mut encoder = FrameEncoder::new(&params, &StreamParameters::new(0, 44100, 1)).unwrap();

        let frame = encoder.encode_frame(&[&[0i32; 1152][..]]).unwrap();

        assert_eq!(frame.len(), 104);
        assert_eq!(frame[2] >> 4, 1, "bitrate index 1");
    }

    #[test]
    fn test_vbr_noise_stays_within_max_bitrate() {
        let params = EncodingParameters::default().vbr(true).bitrate(128).quality(0);
        let mut encoder = FrameEncoder::new(&params, &StreamParameters::new(0, 44100, 2)).unwrap();
        let left = noise(1152 * 4, 7);
        let right = noise(1152 * 4, 11);

        for i in 0..4 {
            let range = i * 1152..(i + 1) * 1152;
            let frame = encoder
                .encode_frame(&[&left[range.clone()], &right[range]])
                .unwrap();
            assert!(frame.len() > 104, "noise needs more than the minimum");
            assert!(frame.len() <= 417);
            assert!(frame[2] >> 4 <= 9);
        }
    }
}
