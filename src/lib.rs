//! # shinefs
//!
//! MP3 encoding sessions for serving audio as files. A session takes decoded
//! PCM of any bit depth, writes an ID3v2.3 header followed by MPEG Layer III
//! frames into an append/patch [`OutputSink`], and can estimate the final
//! file size before encoding completes.
//!
//! ```no_run
//! use std::path::Path;
//! use shinefs::{EncodingParameters, EncodingSession, MemorySink, MetadataKey};
//!
//! # fn main() -> shinefs::Result<()> {
//! let mut sink = MemorySink::new();
//! let mut session = EncodingSession::new(EncodingParameters::new(), &mut sink, Path::new("."));
//! session.set_text_tag(MetadataKey::Title, "Song")?;
//! session.set_stream_params(44100, 44100, 1)?;
//! session.render_tag()?;
//! let pcm = vec![0i32; 44100];
//! session.encode_samples(&[&pcm[..]], pcm.len(), 16)?;
//! session.finish()?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod bitstream;
pub mod config;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod huffman;
pub mod logging;
pub mod mdct;
pub mod metadata;
pub mod pcm_utils;
pub mod quantization;
pub mod reservoir;
pub mod session;
pub mod sink;
pub mod subband;
pub mod tables;
pub mod types;

pub use backend::{Mp3Backend, ReportHandlers, ShineBackend};
pub use config::{EncodingParameters, MpegVersion, StreamParameters};
pub use error::{EncoderError, ErrorKind, Result};
pub use logging::{init_logging, GlobalLogSink, Level, LogSink, LoggingConfig};
pub use metadata::{MetadataKey, PictureType, TagBuilder};
pub use session::{gain_to_scale, EncodingSession, SessionState};
pub use sink::{FileSink, MemorySink, OutputSink};

#[cfg(test)]
mod tests;
