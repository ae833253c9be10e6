//! Frame header, side information and the Xing summary frame
//!
//! Layout follows ISO 11172-3 / 13818-3 for Layer III without CRC. Side
//! information always describes long blocks with zero scalefactors and
//! `main_data_begin` 0, matching what [`crate::quantization`] and
//! [`crate::reservoir`] produce.

use crate::bitstream::BitstreamWriter;
use crate::config::MpegVersion;
use crate::error::{EncodingError, EncodingResult};
use crate::tables::{bitrate_for_index, sample_rate_index};
use crate::types::{GranuleInfo, MAX_CHANNELS, MAX_GRANULES};

/// Frame header fields that vary between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: MpegVersion,
    pub bitrate_index: u32,
    pub sample_rate_index: u32,
    pub padding: bool,
    pub channels: usize,
}

impl FrameHeader {
    pub fn write(&self, bs: &mut BitstreamWriter) -> EncodingResult<()> {
        let mode = if self.channels == 1 { 3 } else { 0 };

        bs.put_bits(0x7ff, 11)?;
        bs.put_bits(self.version.header_bits(), 2)?;
        bs.put_bits(1, 2)?; // layer III
        bs.put_bits(1, 1)?; // no CRC
        bs.put_bits(self.bitrate_index, 4)?;
        bs.put_bits(self.sample_rate_index, 2)?;
        bs.put_bits(u32::from(self.padding), 1)?;
        bs.put_bits(0, 1)?; // private
        bs.put_bits(mode, 2)?;
        bs.put_bits(0, 2)?; // mode extension
        bs.put_bits(0, 1)?; // copyright
        bs.put_bits(1, 1)?; // original
        bs.put_bits(0, 2)?; // emphasis
        Ok(())
    }
}

/// Frame length in bytes
pub fn frame_bytes(version: MpegVersion, bitrate: u32, sample_rate: u32, padding: bool) -> usize {
    let slots = match version {
        MpegVersion::Mpeg1 => 144_000,
        MpegVersion::Mpeg2 | MpegVersion::Mpeg25 => 72_000,
    };
    (slots * bitrate as usize) / sample_rate as usize + usize::from(padding)
}

/// Write side information for a frame
pub fn write_side_info(
    bs: &mut BitstreamWriter,
    version: MpegVersion,
    channels: usize,
    granules: &[[GranuleInfo; MAX_CHANNELS]; MAX_GRANULES],
) -> EncodingResult<()> {
    let mpeg1 = version == MpegVersion::Mpeg1;

    if mpeg1 {
        bs.put_bits(0, 9)?; // main_data_begin
        bs.put_bits(0, if channels == 1 { 5 } else { 3 })?;
        for _ in 0..channels {
            bs.put_bits(0, 4)?; // scfsi
        }
    } else {
        bs.put_bits(0, 8)?;
        bs.put_bits(0, if channels == 1 { 1 } else { 2 })?;
    }

    for granule in granules.iter().take(version.granules_per_frame()) {
        for gi in granule.iter().take(channels) {
            bs.put_bits(gi.part2_3_length, 12)?;
            bs.put_bits(gi.big_values, 9)?;
            bs.put_bits(gi.global_gain, 8)?;
            bs.put_bits(0, if mpeg1 { 4 } else { 9 })?; // scalefac_compress
            bs.put_bits(0, 1)?; // window_switching_flag
            for &table in &gi.table_select {
                bs.put_bits(table, 5)?;
            }
            bs.put_bits(gi.region0_count, 4)?;
            bs.put_bits(gi.region1_count, 3)?;
            if mpeg1 {
                bs.put_bits(0, 1)?; // preflag
            }
            bs.put_bits(0, 1)?; // scalefac_scale
            bs.put_bits(gi.count1table_select, 1)?;
        }
    }

    Ok(())
}

/// Length of the Xing payload: tag, flags, frames, bytes, TOC, quality
pub const XING_PAYLOAD_LEN: usize = 4 + 4 + 4 + 4 + 100 + 4;

const XING_FLAGS: u32 = 0x0f;

/// Stream statistics carried by the Xing frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XingSummary {
    /// Audio frames following the summary frame
    pub frames: u32,
    /// Bytes of MPEG data including the summary frame
    pub bytes: u32,
    pub toc: [u8; 100],
    /// 0 (worst) to 100 (best)
    pub quality: u32,
}

impl Default for XingSummary {
    fn default() -> Self {
        Self {
            frames: 0,
            bytes: 0,
            toc: [0; 100],
            quality: 0,
        }
    }
}

/// Build a Xing frame; the length depends only on the stream layout
pub fn xing_frame(
    version: MpegVersion,
    sample_rate: u32,
    channels: usize,
    summary: &XingSummary,
) -> EncodingResult<Vec<u8>> {
    let side_info_len = version.side_info_len(channels);
    let needed = 4 + side_info_len + XING_PAYLOAD_LEN;

    let (bitrate_index, frame_len) = (1..15)
        .filter_map(|idx| {
            bitrate_for_index(idx, version)
                .map(|rate| (idx, frame_bytes(version, rate, sample_rate, false)))
        })
        .find(|&(_, len)| len >= needed)
        .ok_or_else(|| {
            EncodingError::BitstreamError(format!(
                "no bitrate fits a {} byte summary frame",
                needed
            ))
        })?;

    let header = FrameHeader {
        version,
        bitrate_index,
        sample_rate_index: sample_rate_index(sample_rate).ok_or(EncodingError::NotInitialised)?,
        padding: false,
        channels,
    };

    let mut bs = BitstreamWriter::new(frame_len);
    header.write(&mut bs)?;
    let mut frame = bs.finish()?;
    frame.resize(4 + side_info_len, 0);
    frame.extend_from_slice(b"Xing");
    frame.extend_from_slice(&XING_FLAGS.to_be_bytes());
    frame.extend_from_slice(&summary.frames.to_be_bytes());
    frame.extend_from_slice(&summary.bytes.to_be_bytes());
    frame.extend_from_slice(&summary.toc);
    frame.extend_from_slice(&summary.quality.to_be_bytes());
    frame.resize(frame_len, 0);

    Ok(frame)
}

/// Seek table mapping each percent of duration to a byte position / 256
///
/// `leading` is the number of bytes before the first audio frame (the
/// summary frame itself); `frame_sizes` lists every audio frame in order.
pub fn seek_table(frame_sizes: &[u32], leading: u64) -> [u8; 100] {
    let mut toc = [0u8; 100];
    let total: u64 = leading + frame_sizes.iter().map(|&s| u64::from(s)).sum::<u64>();
    if frame_sizes.is_empty() || total == 0 {
        return toc;
    }

    let mut offsets = Vec::with_capacity(frame_sizes.len());
    let mut pos = leading;
    for &size in frame_sizes {
        offsets.push(pos);
        pos += u64::from(size);
    }

    for (i, entry) in toc.iter_mut().enumerate() {
        let frame = i * frame_sizes.len() / 100;
        *entry = (offsets[frame] * 256 / total).min(255) as u8;
    }
    toc
}
