//! Unit tests for frame headers, side information and the Xing frame

use crate::bitstream::BitstreamWriter;
use crate::config::MpegVersion;
use crate::frame::*;
use crate::types::{GranuleInfo, MAX_CHANNELS, MAX_GRANULES};

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_granules() -> [[GranuleInfo; MAX_CHANNELS]; MAX_GRANULES] {
        Default::default()
    }

    fn side_info_bytes(version: MpegVersion, channels: usize) -> usize {
        let mut bs = BitstreamWriter::default();
        write_side_info(&mut bs, version, channels, &empty_granules()).unwrap();
        assert_eq!(bs.bits_count() % 8, 0, "side info is byte aligned");
        bs.bits_count() / 8
    }

    #[test]
    fn test_header_128k_44100_mono() {
        let header = FrameHeader {
            version: MpegVersion::Mpeg1,
            bitrate_index: 9,
            sample_rate_index: 0,
            padding: false,
            channels: 1,
        };
        let mut bs = BitstreamWriter::default();
        header.write(&mut bs).unwrap();

        assert_eq!(bs.finish().unwrap(), vec![0xFF, 0xFB, 0x90, 0xC4]);
    }

    #[test]
    fn test_header_padding_and_stereo() {
        let header = FrameHeader {
            version: MpegVersion::Mpeg1,
            bitrate_index: 9,
            sample_rate_index: 0,
            padding: true,
            channels: 2,
        };
        let mut bs = BitstreamWriter::default();
        header.write(&mut bs).unwrap();

        assert_eq!(bs.finish().unwrap(), vec![0xFF, 0xFB, 0x92, 0x04]);
    }

    #[test]
    fn test_header_mpeg2_version_bits() {
        let header = FrameHeader {
            version: MpegVersion::Mpeg2,
            bitrate_index: 8,
            sample_rate_index: 0,
            padding: false,
            channels: 1,
        };
        let mut bs = BitstreamWriter::default();
        header.write(&mut bs).unwrap();

        let bytes = bs.finish().unwrap();
        assert_eq!(bytes[0], 0xFF);
        assert_eq!(bytes[1], 0xF3, "MPEG-2 layer III without CRC");
    }

    #[test]
    fn test_side_info_lengths_match_version() {
        for (version, channels) in [
            (MpegVersion::Mpeg1, 1),
            (MpegVersion::Mpeg1, 2),
            (MpegVersion::Mpeg2, 1),
            (MpegVersion::Mpeg2, 2),
            (MpegVersion::Mpeg25, 1),
            (MpegVersion::Mpeg25, 2),
        ] {
            assert_eq!(
                side_info_bytes(version, channels),
                version.side_info_len(channels),
                "{:?} with {} channel(s)",
                version,
                channels
            );
        }
    }

    #[test]
    fn test_frame_bytes() {
        assert_eq!(frame_bytes(MpegVersion::Mpeg1, 128, 44100, false), 417);
        assert_eq!(frame_bytes(MpegVersion::Mpeg1, 128, 44100, true), 418);
        assert_eq!(frame_bytes(MpegVersion::Mpeg1, 128, 48000, false), 384);
        assert_eq!(frame_bytes(MpegVersion::Mpeg2, 64, 24000, false), 192);
        assert_eq!(frame_bytes(MpegVersion::Mpeg25, 64, 8000, false), 576);
    }

    #[test]
    fn test_xing_frame_layout() {
        let summary = XingSummary {
            frames: 7,
            bytes: 3000,
            toc: [1; 100],
            quality: 50,
        };
        let frame = xing_frame(MpegVersion::Mpeg1, 44100, 1, &summary).unwrap();

        // smallest MPEG-1 bitrate holding header, side info and payload is 48 kbps
        assert_eq!(frame.len(), 156);
        assert_eq!(&frame[..3], &[0xFF, 0xFB, 0x30]);
        assert!(frame[4..21].iter().all(|&b| b == 0), "side info is zeroed");
        assert_eq!(&frame[21..25], b"Xing");
        assert_eq!(&frame[25..29], &0x0fu32.to_be_bytes());
        assert_eq!(&frame[29..33], &7u32.to_be_bytes());
        assert_eq!(&frame[33..37], &3000u32.to_be_bytes());
        assert!(frame[37..137].iter().all(|&b| b == 1));
        assert_eq!(&frame[137..141], &50u32.to_be_bytes());
    }

    #[test]
    fn test_xing_placeholder_has_final_length() {
        for (rate, channels) in [(44100, 2), (22050, 1), (8000, 2)] {
            let version = MpegVersion::from_sample_rate(rate).unwrap();
            let placeholder = xing_frame(version, rate, channels, &XingSummary::default()).unwrap();
            let filled = XingSummary {
                frames: u32::MAX,
                bytes: u32::MAX,
                toc: [255; 100],
                quality: 100,
            };
            let real = xing_frame(version, rate, channels, &filled).unwrap();
            assert_eq!(placeholder.len(), real.len(), "{} Hz", rate);
        }
    }

    #[test]
    fn test_seek_table() {
        let toc = seek_table(&[100, 100, 100, 100], 0);
        assert_eq!(toc[0], 0);
        assert_eq!(toc[25], 64);
        assert_eq!(toc[50], 128);
        assert_eq!(toc[99], 192);
        assert!(toc.windows(2).all(|w| w[0] <= w[1]), "TOC is monotonic");
    }

    #[test]
    fn test_seek_table_empty_stream() {
        assert_eq!(seek_table(&[], 156), [0; 100]);
    }
}
