//! Layer III frame engine
//!
//! [`FrameEncoder`] turns one frame of full-scale PCM per channel into one
//! complete MP3 frame. The stages follow shine's `encode_buffer_internal`:
//! padding decision, MDCT analysis, the rate loop against the frame's bit
//! budget, then bitstream formatting. The reservoir only moves bits between
//! granules of one frame, so every frame is self-contained.
//!
//! In VBR mode granules are quantized no finer than the quality's peak
//! level allows, within the budget of the maximum bitrate, and each frame
//! then takes the smallest bitrate that holds its main data.

use crate::bitstream::BitstreamWriter;
use crate::config::{EncodingParameters, MpegVersion, StreamParameters};
use crate::error::{ConfigError, ConfigResult, EncodingError, EncodingResult};
use crate::frame::{frame_bytes, write_side_info, FrameHeader};
use crate::huffman::write_granule;
use crate::mdct::{mdct_granule, mdct_initialise};
use crate::quantization::{bandwidth_lines, quantize_granule, GranuleLimits, VBR_PEAK_LEVELS};
use crate::reservoir::{distribute_stuffing, BitReservoir};
use crate::subband::subband_initialise;
use crate::tables::{bitrate_for_index, bitrate_index, sample_rate_index, scale_fact_bands};
use crate::types::{GranuleInfo, Mdct, Subband, GRANULE_SIZE, MAX_CHANNELS, MAX_GRANULES};

/// Per-frame analysis and coding state
pub struct FrameEncoder {
    version: MpegVersion,
    channels: usize,
    sample_rate: u32,
    sample_rate_index: u32,
    /// Bitrate index for CBR, upper bound for VBR
    bitrate_index: u32,
    vbr: bool,
    /// Spectral lines coded per granule
    lines: usize,
    /// Quantized peak limit in VBR mode
    peak_level: Option<u32>,
    bands: &'static [u32; 23],
    reservoir: BitReservoir,
    subband: Subband,
    mdct: Mdct,
    xr: Box<[[[i32; GRANULE_SIZE]; MAX_CHANNELS]; MAX_GRANULES]>,
    granules: Box<[[GranuleInfo; MAX_CHANNELS]; MAX_GRANULES]>,
    /// Frame size calculation parameters (CBR)
    whole_slots_per_frame: usize,
    frac_slots_per_frame: f64,
    slot_lag: f64,
    frames: u64,
}

impl FrameEncoder {
    /// Set up the engine for a validated stream
    pub fn new(params: &EncodingParameters, stream: &StreamParameters) -> ConfigResult<Self> {
        stream.validate(params)?;

        let version = stream
            .mpeg_version()
            .ok_or(ConfigError::UnsupportedSampleRate(stream.sample_rate))?;
        let sample_rate_index = sample_rate_index(stream.sample_rate)
            .ok_or(ConfigError::UnsupportedSampleRate(stream.sample_rate))?;
        let bands = scale_fact_bands(stream.sample_rate)
            .ok_or(ConfigError::UnsupportedSampleRate(stream.sample_rate))?;
        let bitrate_index = bitrate_index(params.bitrate, version).ok_or(
            ConfigError::IncompatibleRateCombination {
                sample_rate: stream.sample_rate,
                bitrate: params.bitrate,
            },
        )?;

        let avg_slots_per_frame = (version.samples_per_frame() as f64
            / stream.sample_rate as f64)
            * (1000.0 * params.bitrate as f64 / 8.0);
        let whole_slots_per_frame = avg_slots_per_frame as usize;
        let frac_slots_per_frame = avg_slots_per_frame - whole_slots_per_frame as f64;

        let mut subband = Subband::default();
        subband_initialise(&mut subband);
        let mut mdct = Mdct::default();
        mdct_initialise(&mut mdct);

        Ok(Self {
            version,
            channels: stream.channels as usize,
            sample_rate: stream.sample_rate,
            sample_rate_index,
            bitrate_index,
            vbr: params.vbr,
            lines: bandwidth_lines(params.quality),
            peak_level: params
                .vbr
                .then(|| VBR_PEAK_LEVELS[usize::from(params.quality).min(VBR_PEAK_LEVELS.len() - 1)]),
            bands,
            reservoir: BitReservoir::new(stream.channels as usize),
            subband,
            mdct,
            xr: Box::new([[[0; GRANULE_SIZE]; MAX_CHANNELS]; MAX_GRANULES]),
            granules: Box::default(),
            whole_slots_per_frame,
            frac_slots_per_frame,
            slot_lag: -frac_slots_per_frame,
            frames: 0,
        })
    }

    pub fn version(&self) -> MpegVersion {
        self.version
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples per channel consumed by one frame
    pub fn samples_per_frame(&self) -> usize {
        self.version.samples_per_frame()
    }

    /// Frames produced so far
    pub fn frames_encoded(&self) -> u64 {
        self.frames
    }

    /// Encode one frame; each channel slice must hold a full frame
    pub fn encode_frame(&mut self, pcm: &[&[i32]]) -> EncodingResult<Vec<u8>> {
        let samples_per_frame = self.samples_per_frame();
        if pcm.len() < self.channels {
            return Err(EncodingError::BitstreamError(format!(
                "{} channel(s) supplied to a {} channel encoder",
                pcm.len(),
                self.channels
            )));
        }
        for channel in pcm.iter().take(self.channels) {
            if channel.len() < samples_per_frame {
                return Err(EncodingError::BitstreamError(format!(
                    "frame needs {} samples per channel, got {}",
                    samples_per_frame,
                    channel.len()
                )));
            }
        }

        let granules_per_frame = self.version.granules_per_frame();
        let side_info_bits = 8 * (4 + self.version.side_info_len(self.channels));

        // CBR fixes the frame now; VBR budgets against its largest frame
        let (mut bitrate_index, mut padding, mut frame_len) = if self.vbr {
            let bitrate = bitrate_for_index(self.bitrate_index, self.version).ok_or_else(|| {
                EncodingError::BitstreamError(format!("bad bitrate index {}", self.bitrate_index))
            })?;
            (
                self.bitrate_index,
                false,
                frame_bytes(self.version, bitrate, self.sample_rate, false),
            )
        } else {
            let padding = self.next_padding();
            (
                self.bitrate_index,
                padding,
                self.whole_slots_per_frame + usize::from(padding),
            )
        };

        let payload_bits = (frame_len * 8).saturating_sub(side_info_bits) as u32;
        self.reservoir.frame_begin(payload_bits, granules_per_frame);

        for gr in 0..granules_per_frame {
            for ch in 0..self.channels {
                let samples = &pcm[ch][gr * GRANULE_SIZE..(gr + 1) * GRANULE_SIZE];
                mdct_granule(
                    samples,
                    ch,
                    &mut self.subband,
                    &mut self.mdct,
                    &mut self.xr[gr][ch],
                );

                let limits = GranuleLimits {
                    max_bits: self.reservoir.max_granule_bits(),
                    lines: self.lines,
                    peak_level: self.peak_level,
                };
                let bits = quantize_granule(
                    &self.xr[gr][ch],
                    &limits,
                    self.bands,
                    &mut self.granules[gr][ch],
                );
                self.reservoir.adjust(bits);
            }
        }

        let stuffing = self.reservoir.frame_end();
        if self.vbr {
            let main_data_bits: u32 = self.granules[..granules_per_frame]
                .iter()
                .flat_map(|granule| granule[..self.channels].iter())
                .map(|gi| gi.part2_3_length)
                .sum();
            (bitrate_index, padding, frame_len) =
                self.pick_vbr_bitrate(side_info_bits + main_data_bits as usize)?;
        } else {
            distribute_stuffing(
                &mut self.granules,
                granules_per_frame,
                self.channels,
                stuffing,
            );
        }

        let header = FrameHeader {
            version: self.version,
            bitrate_index,
            sample_rate_index: self.sample_rate_index,
            padding,
            channels: self.channels,
        };

        let mut bs = BitstreamWriter::new(frame_len);
        header.write(&mut bs)?;
        write_side_info(&mut bs, self.version, self.channels, &self.granules)?;
        for granule in self.granules[..granules_per_frame].iter() {
            for gi in granule[..self.channels].iter() {
                write_granule(&mut bs, gi)?;
            }
        }

        let mut frame = bs.finish()?;
        if frame.len() > frame_len {
            return Err(EncodingError::BitstreamError(format!(
                "frame overflow: {} bytes written into a {} byte frame",
                frame.len(),
                frame_len
            )));
        }
        frame.resize(frame_len, 0);

        self.frames += 1;
        Ok(frame)
    }

    /// Padding decision following shine's slot lag accounting
    fn next_padding(&mut self) -> bool {
        if self.frac_slots_per_frame <= 0.0 {
            return false;
        }
        let padding = self.slot_lag <= self.frac_slots_per_frame - 1.0;
        self.slot_lag += if padding { 1.0 } else { 0.0 } - self.frac_slots_per_frame;
        padding
    }

    /// Smallest bitrate whose frame holds `needed_bits`, capped at the maximum
    fn pick_vbr_bitrate(&self, needed_bits: usize) -> EncodingResult<(u32, bool, usize)> {
        let mut fallback = None;
        for index in 1..=self.bitrate_index {
            let bitrate = bitrate_for_index(index, self.version)
                .ok_or_else(|| EncodingError::BitstreamError(format!("bad bitrate index {}", index)))?;
            let len = frame_bytes(self.version, bitrate, self.sample_rate, false);
            if len * 8 >= needed_bits {
                return Ok((index, false, len));
            }
            fallback = Some((index, false, len));
        }
        fallback.ok_or(EncodingError::NotInitialised)
    }
}
