//! Configuration for an encoding session
//!
//! [`EncodingParameters`] are fixed when a session is created, while
//! [`StreamParameters`] describe the PCM stream and are applied exactly once
//! before any samples are submitted. Validation is deferred to the moment
//! the stream parameters reach the encoder, mirroring how the encoder setup
//! step is the one place where a rate/bitrate combination is accepted or
//! rejected.

use crate::error::{ConfigError, ConfigResult};

/// Supported sample rates (Hz)
pub const SUPPORTED_SAMPLE_RATES: &[u32] = &[
    8000, 11025, 12000, // MPEG 2.5
    16000, 22050, 24000, // MPEG 2
    32000, 44100, 48000, // MPEG 1
];

/// Supported bitrates (kbps)
pub const SUPPORTED_BITRATES: &[u32] = &[
    8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 192, 224, 256, 320,
];

/// Worst quality ordinal; 0 is best
pub const MAX_QUALITY: u8 = 9;

/// Encoder settings supplied when a session is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodingParameters {
    /// Quality ordinal, 0 (best) to 9 (worst)
    pub quality: u8,
    /// Variable bitrate mode
    pub vbr: bool,
    /// Bitrate in kbps; the maximum frame bitrate in VBR mode
    pub bitrate: u32,
    /// Append a 128-byte ID3v1 trailer when the session finishes
    pub legacy_tag: bool,
}

impl Default for EncodingParameters {
    fn default() -> Self {
        Self {
            quality: 5,
            vbr: false,
            bitrate: 128,
            legacy_tag: true,
        }
    }
}

impl EncodingParameters {
    /// Create parameters with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quality ordinal
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Select variable or constant bitrate
    pub fn vbr(mut self, vbr: bool) -> Self {
        self.vbr = vbr;
        self
    }

    /// Set the bitrate in kbps
    pub fn bitrate(mut self, bitrate: u32) -> Self {
        self.bitrate = bitrate;
        self
    }

    /// Enable or disable the ID3v1 trailer
    pub fn legacy_tag(mut self, legacy_tag: bool) -> Self {
        self.legacy_tag = legacy_tag;
        self
    }

    /// Check the settings that do not depend on the stream
    pub fn validate(&self) -> ConfigResult<()> {
        if self.quality > MAX_QUALITY {
            return Err(ConfigError::InvalidQuality(self.quality));
        }
        if !SUPPORTED_BITRATES.contains(&self.bitrate) {
            return Err(ConfigError::UnsupportedBitrate(self.bitrate));
        }
        Ok(())
    }
}

/// Description of the PCM stream being encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamParameters {
    /// Samples per channel in the whole stream
    pub sample_count: u64,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels (1 or 2)
    pub channels: u8,
}

impl StreamParameters {
    pub fn new(sample_count: u64, sample_rate: u32, channels: u8) -> Self {
        Self {
            sample_count,
            sample_rate,
            channels,
        }
    }

    /// Stream duration in whole milliseconds
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        (u128::from(self.sample_count) * 1000 / u128::from(self.sample_rate)) as u64
    }

    /// MPEG version implied by the sample rate
    pub fn mpeg_version(&self) -> Option<MpegVersion> {
        MpegVersion::from_sample_rate(self.sample_rate)
    }

    /// Check the stream against the encoder settings
    pub fn validate(&self, params: &EncodingParameters) -> ConfigResult<()> {
        params.validate()?;

        if self.channels == 0 || self.channels > 2 {
            return Err(ConfigError::InvalidChannels(self.channels));
        }

        let version = self
            .mpeg_version()
            .ok_or(ConfigError::UnsupportedSampleRate(self.sample_rate))?;

        if !version.allows_bitrate(params.bitrate) {
            return Err(ConfigError::IncompatibleRateCombination {
                sample_rate: self.sample_rate,
                bitrate: params.bitrate,
            });
        }

        Ok(())
    }
}

/// MPEG version enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpegVersion {
    /// MPEG-1
    Mpeg1,
    /// MPEG-2
    Mpeg2,
    /// MPEG-2.5
    Mpeg25,
}

impl MpegVersion {
    /// Version for a supported sample rate
    pub fn from_sample_rate(sample_rate: u32) -> Option<Self> {
        match sample_rate {
            44100 | 48000 | 32000 => Some(MpegVersion::Mpeg1),
            22050 | 24000 | 16000 => Some(MpegVersion::Mpeg2),
            11025 | 12000 | 8000 => Some(MpegVersion::Mpeg25),
            _ => None,
        }
    }

    /// Value of the two version bits in the frame header
    pub fn header_bits(self) -> u32 {
        match self {
            MpegVersion::Mpeg1 => 3,
            MpegVersion::Mpeg2 => 2,
            MpegVersion::Mpeg25 => 0,
        }
    }

    pub fn granules_per_frame(self) -> usize {
        match self {
            MpegVersion::Mpeg1 => 2,
            MpegVersion::Mpeg2 | MpegVersion::Mpeg25 => 1,
        }
    }

    /// Samples per channel in one frame
    pub fn samples_per_frame(self) -> usize {
        self.granules_per_frame() * crate::types::GRANULE_SIZE
    }

    /// Side information length in bytes
    pub fn side_info_len(self, channels: usize) -> usize {
        match (self, channels) {
            (MpegVersion::Mpeg1, 1) => 17,
            (MpegVersion::Mpeg1, _) => 32,
            (_, 1) => 9,
            (_, _) => 17,
        }
    }

    /// Whether a bitrate is legal for this version
    pub fn allows_bitrate(self, bitrate: u32) -> bool {
        crate::tables::bitrate_index(bitrate, self).is_some()
    }
}
