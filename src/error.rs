//! Error types for the encoding session
//!
//! This module defines all error types used throughout the crate. The
//! session-facing [`EncoderError`] wraps the narrower per-module errors and
//! exposes a closed [`ErrorKind`] classification for callers that only need
//! to know which kind of failure occurred.

use thiserror::Error;

use crate::session::SessionState;

/// Main error type returned by [`crate::EncodingSession`]
#[derive(Debug, Error)]
pub enum EncoderError {
    /// Stream parameters were rejected by the encoder setup step
    #[error("Encoder initialisation failed: {0}")]
    InitFailure(#[from] ConfigError),

    /// The encoder reported an internal overflow or invalid call sequence
    #[error("Encoding failed: {0}")]
    EncodeFailure(#[from] EncodingError),

    /// The VBR summary frame does not fit the placeholder reserved for it
    #[error("VBR summary frame of {size} bytes exceeds the {reserved} reserved bytes")]
    TagOverflow { size: usize, reserved: usize },

    /// Caller supplied PCM data that violates the input contract
    #[error("Input data error: {0}")]
    InputData(#[from] InputDataError),

    /// The output sink rejected a write
    #[error("Output sink error: {0}")]
    Sink(#[from] SinkError),

    /// The ID3 tag could not be serialized
    #[error("ID3 tag error: {0}")]
    Tag(#[from] id3::Error),

    /// Operation called in a phase of the session where it is not valid
    #[error("{operation} is not valid while the session is {state:?}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
}

/// Coarse classification of an [`EncoderError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InitFailure,
    EncodeFailure,
    TagOverflow,
    InputData,
    Sink,
    Tag,
    InvalidState,
}

impl EncoderError {
    /// Which kind of failure this is
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncoderError::InitFailure(_) => ErrorKind::InitFailure,
            EncoderError::EncodeFailure(_) => ErrorKind::EncodeFailure,
            EncoderError::TagOverflow { .. } => ErrorKind::TagOverflow,
            EncoderError::InputData(_) => ErrorKind::InputData,
            EncoderError::Sink(_) => ErrorKind::Sink,
            EncoderError::Tag(_) => ErrorKind::Tag,
            EncoderError::InvalidState { .. } => ErrorKind::InvalidState,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Unsupported sample rate
    #[error("Unsupported sample rate: {0} Hz")]
    UnsupportedSampleRate(u32),

    /// Unsupported bitrate
    #[error("Unsupported bitrate: {0} kbps")]
    UnsupportedBitrate(u32),

    /// Invalid channel configuration
    #[error("Invalid channel count: {0}")]
    InvalidChannels(u8),

    /// Quality ordinal out of range
    #[error("Invalid quality {0}: expected 0 (best) to 9 (worst)")]
    InvalidQuality(u8),

    /// Incompatible sample rate and bitrate combination
    #[error("Incompatible sample rate ({sample_rate} Hz) and bitrate ({bitrate} kbps) combination")]
    IncompatibleRateCombination { sample_rate: u32, bitrate: u32 },
}

/// Encoding process errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Encoded output would not fit the working buffer
    #[error("Output buffer too small: {required} bytes required, capacity is {capacity}")]
    OutputBufferTooSmall { required: usize, capacity: usize },

    /// Encoder used before its parameters were initialised
    #[error("Encoder parameters have not been initialised")]
    NotInitialised,

    /// Per-channel buffers handed to the encoder disagree in length
    #[error("Channel length mismatch: left has {left} samples, right has {right}")]
    ChannelLengthMismatch { left: usize, right: usize },

    /// Bitstream writing error
    #[error("Bitstream writing error: {0}")]
    BitstreamError(String),
}

/// Input data validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputDataError {
    /// Source bit depth outside what fits the sample container
    #[error("Invalid source bit depth {depth}: expected 1 to {max}")]
    InvalidBitDepth { depth: u32, max: u32 },

    /// A channel buffer is shorter than the declared sample count
    #[error("Channel {channel} holds {actual} samples, expected at least {expected}")]
    InvalidLength {
        channel: usize,
        expected: usize,
        actual: usize,
    },

    /// A channel required by the stream configuration was not supplied
    #[error("Missing PCM data for channel {0}")]
    MissingChannel(usize),
}

/// Output sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    /// Overwrite would extend past the current end of the sink
    #[error("Overwrite of {len} bytes at offset {offset} exceeds sink length {length}")]
    OutOfBounds { offset: u64, len: usize, length: u64 },

    /// Underlying storage failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Specialized result types for different modules
pub type Result<T> = std::result::Result<T, EncoderError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
pub type EncodingResult<T> = std::result::Result<T, EncodingError>;
pub type InputResult<T> = std::result::Result<T, InputDataError>;
pub type SinkResult<T> = std::result::Result<T, SinkError>;
