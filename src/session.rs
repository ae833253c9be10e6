//! Encoding session
//!
//! An [`EncodingSession`] drives one stream through its lifecycle:
//!
//! 1. created with [`EncodingParameters`] in [`SessionState::Unconfigured`]
//! 2. [`set_stream_params`](EncodingSession::set_stream_params) sets up the
//!    encoder and records the track length
//! 3. [`render_tag`](EncodingSession::render_tag) writes the ID3v2 header,
//!    always the first bytes in the sink
//! 4. [`encode_samples`](EncodingSession::encode_samples) any number of times
//! 5. [`finish`](EncodingSession::finish) flushes the encoder, records the
//!    exact size, patches the VBR summary frame in place and appends the
//!    ID3v1 trailer
//!
//! In VBR mode the encoder emits a placeholder summary frame directly after
//! the header. Its final contents are only known once encoding is complete,
//! so `finish` overwrites it at offset `header_size`. A summary frame longer
//! than the placeholder is never written.

use std::path::Path;
use std::sync::Arc;

use crate::backend::{Mp3Backend, ReportFn, ReportHandlers, ShineBackend};
use crate::config::{EncodingParameters, StreamParameters};
use crate::error::{EncoderError, InputDataError, Result};
use crate::logging::{GlobalLogSink, Level, LogSink};
use crate::metadata::{MetadataKey, PictureType, TagBuilder, LEGACY_TAG_LEN};
use crate::pcm_utils::{rescale_into, validate_bit_depth};
use crate::sink::OutputSink;

/// Upper bound on one VBR frame, used for the summary frame in estimates
pub const MAX_VBR_FRAME_SIZE: u64 = 2880;

/// Output buffer size for the final flush
pub const FLUSH_BUFFER_SIZE: usize = 7200;

/// Prefix of diagnostics forwarded from the encoder
pub const ENCODER_LOG_PREFIX: &str = "shine: ";

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Unconfigured,
    Configured,
    HeaderWritten,
    Encoding,
    Finished,
    /// A fatal error occurred; no further operation is valid
    Failed,
}

/// Linear amplitude factor for a gain in decibels
pub fn gain_to_scale(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

/// Output buffer size for encoding `sample_count` samples per channel
pub fn output_capacity(sample_count: usize) -> usize {
    (5 * sample_count + 3) / 4 + FLUSH_BUFFER_SIZE
}

/// Route the encoder's diagnostic channels into `log`
fn report_handlers(log: &Arc<dyn LogSink>) -> ReportHandlers {
    let forward = |level: Level| -> ReportFn {
        let log = Arc::clone(log);
        Box::new(move |text: &str| log.log(level, &format!("{}{}", ENCODER_LOG_PREFIX, text)))
    };

    ReportHandlers {
        error: Some(forward(Level::Error)),
        message: Some(forward(Level::Error)),
        debug: Some(forward(Level::Debug)),
    }
}

/// One stream being encoded into a sink
pub struct EncodingSession<'a, S: OutputSink, B: Mp3Backend = ShineBackend> {
    params: EncodingParameters,
    backend: B,
    sink: &'a mut S,
    /// Directory searched for fallback cover art
    dir: &'a Path,
    tag: TagBuilder,
    state: SessionState,
    stream: Option<StreamParameters>,
    header_size: u64,
    actual_size: Option<u64>,
    scale: f64,
    log: Arc<dyn LogSink>,
    left: Vec<i32>,
    right: Vec<i32>,
    out: Vec<u8>,
}

impl<'a, S: OutputSink> EncodingSession<'a, S, ShineBackend> {
    /// Session on the built-in encoder, logging through the `log` facade
    pub fn new(params: EncodingParameters, sink: &'a mut S, dir: &'a Path) -> Self {
        Self::with_log_sink(params, sink, dir, Arc::new(GlobalLogSink))
    }

    /// Session on the built-in encoder with its own log sink
    pub fn with_log_sink(
        params: EncodingParameters,
        sink: &'a mut S,
        dir: &'a Path,
        log: Arc<dyn LogSink>,
    ) -> Self {
        Self::with_backend(ShineBackend::new(), log, params, sink, dir)
    }
}

impl<'a, S: OutputSink, B: Mp3Backend> EncodingSession<'a, S, B> {
    /// Session on an arbitrary encoder
    pub fn with_backend(
        mut backend: B,
        log: Arc<dyn LogSink>,
        params: EncodingParameters,
        sink: &'a mut S,
        dir: &'a Path,
    ) -> Self {
        backend.configure(&params);
        backend.set_report_handlers(report_handlers(&log));

        Self {
            params,
            backend,
            sink,
            dir,
            tag: TagBuilder::new(),
            state: SessionState::Unconfigured,
            stream: None,
            header_size: 0,
            actual_size: None,
            scale: 1.0,
            log,
            left: Vec::new(),
            right: Vec::new(),
            out: Vec::new(),
        }
    }

    fn expect_state(&self, operation: &'static str, allowed: &[SessionState]) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(EncoderError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    /// Enter `Failed` and report `err`
    fn fail<T>(&mut self, err: EncoderError) -> Result<T> {
        self.log.log(Level::Error, &format!("session failed: {}", err));
        self.state = SessionState::Failed;
        Err(err)
    }

    /// Add a text value to the header tag
    pub fn set_text_tag(&mut self, key: MetadataKey, value: &str) -> Result<()> {
        self.expect_state(
            "set_text_tag",
            &[SessionState::Unconfigured, SessionState::Configured],
        )?;
        self.tag.set_text(key, value);
        Ok(())
    }

    /// Add a picture to the header tag
    pub fn set_picture_tag(
        &mut self,
        mime_type: &str,
        picture_type: PictureType,
        description: &str,
        data: Vec<u8>,
    ) -> Result<()> {
        self.expect_state(
            "set_picture_tag",
            &[SessionState::Unconfigured, SessionState::Configured],
        )?;
        self.tag.set_picture(mime_type, picture_type, description, data);
        Ok(())
    }

    /// Describe the stream and finish encoder setup
    ///
    /// On failure the session stays `Unconfigured`.
    pub fn set_stream_params(
        &mut self,
        sample_count: u64,
        sample_rate: u32,
        channels: u8,
    ) -> Result<()> {
        self.expect_state("set_stream_params", &[SessionState::Unconfigured])?;

        let stream = StreamParameters::new(sample_count, sample_rate, channels);
        if let Err(e) = self.backend.init_params(&stream) {
            self.log
                .log(Level::Error, &format!("cannot initialise encoder: {}", e));
            return Err(EncoderError::InitFailure(e));
        }

        self.tag
            .set_text(MetadataKey::TrackLength, &stream.duration_ms().to_string());
        self.stream = Some(stream);
        self.state = SessionState::Configured;
        self.log.log(
            Level::Debug,
            &format!(
                "stream configured: {} samples at {} Hz, {} channel(s)",
                sample_count, sample_rate, channels
            ),
        );
        Ok(())
    }

    /// Write the ID3v2 header, returning its length
    pub fn render_tag(&mut self) -> Result<u64> {
        self.expect_state("render_tag", &[SessionState::Configured])?;

        self.tag.apply_fallbacks(self.dir);
        let bytes = self.tag.render()?;

        if let Err(e) = self.sink.append(&bytes) {
            return self.fail(e.into());
        }
        self.header_size = bytes.len() as u64;
        self.state = SessionState::HeaderWritten;
        self.log.log(
            Level::Debug,
            &format!("wrote {} byte tag header", self.header_size),
        );
        Ok(self.header_size)
    }

    /// Encode `sample_count` samples per channel of `bit_depth`-bit PCM
    ///
    /// `channels` holds one buffer per stream channel; only the first is
    /// read for mono streams. Returns the number of bytes appended.
    pub fn encode_samples(
        &mut self,
        channels: &[&[i32]],
        sample_count: usize,
        bit_depth: u32,
    ) -> Result<usize> {
        self.expect_state(
            "encode_samples",
            &[SessionState::HeaderWritten, SessionState::Encoding],
        )?;
        validate_bit_depth(bit_depth)?;

        let needed = self.backend.channels();
        for ch in 0..needed {
            let buffer = channels.get(ch).ok_or(InputDataError::MissingChannel(ch))?;
            if buffer.len() < sample_count {
                return Err(InputDataError::InvalidLength {
                    channel: ch,
                    expected: sample_count,
                    actual: buffer.len(),
                }
                .into());
            }
        }

        rescale_into(channels[0], sample_count, bit_depth, &mut self.left)?;
        if needed > 1 {
            rescale_into(channels[1], sample_count, bit_depth, &mut self.right)?;
        } else {
            self.right.clear();
        }

        let capacity = output_capacity(sample_count);
        let written =
            match self
                .backend
                .encode_buffer(&self.left, &self.right, &mut self.out, capacity)
            {
                Ok(written) => written,
                Err(e) => return self.fail(e.into()),
            };

        if written > 0 {
            if let Err(e) = self.sink.append(&self.out[..written]) {
                return self.fail(e.into());
            }
        }

        self.state = SessionState::Encoding;
        Ok(written)
    }

    /// Flush the encoder and finalize the stream
    ///
    /// Returns the number of flushed bytes.
    pub fn finish(&mut self) -> Result<usize> {
        self.expect_state(
            "finish",
            &[SessionState::HeaderWritten, SessionState::Encoding],
        )?;

        let flushed = match self.backend.flush(&mut self.out, FLUSH_BUFFER_SIZE) {
            Ok(flushed) => flushed,
            Err(e) => return self.fail(e.into()),
        };
        if flushed > 0 {
            if let Err(e) = self.sink.append(&self.out[..flushed]) {
                return self.fail(e.into());
            }
        }

        let exact = self.sink.tell() + self.trailing_legacy_tag_length() as u64;
        self.actual_size = Some(exact);

        if self.params.vbr {
            self.patch_summary()?;
        }

        if self.params.legacy_tag {
            let trailer = self.tag.render_legacy();
            if let Err(e) = self.sink.append(&trailer) {
                return self.fail(e.into());
            }
        }

        self.state = SessionState::Finished;
        self.log.log(
            Level::Debug,
            &format!(
                "finished after {} frames, {} bytes",
                self.backend.total_frames(),
                exact
            ),
        );
        Ok(flushed)
    }

    /// Overwrite the placeholder after the header with the summary frame
    fn patch_summary(&mut self) -> Result<()> {
        let reserved = self.backend.summary_reserved();
        let summary = match self.backend.summary_frame() {
            Ok(summary) => summary,
            Err(e) => return self.fail(e.into()),
        };

        if summary.len() > reserved {
            return self.fail(EncoderError::TagOverflow {
                size: summary.len(),
                reserved,
            });
        }
        if summary.is_empty() {
            return Ok(());
        }

        if let Err(e) = self.sink.overwrite(&summary, self.header_size) {
            return self.fail(e.into());
        }
        Ok(())
    }

    /// Exact size once finished, an estimate before
    ///
    /// The estimate counts the frames the declared sample count will
    /// produce, or the frames already written if the caller has sent more.
    pub fn calculate_size(&self) -> u64 {
        if self.state == SessionState::Finished {
            if let Some(size) = self.actual_size {
                return size;
            }
        }

        let (sample_rate, summary) = if self.params.vbr {
            (self.backend.in_sample_rate(), MAX_VBR_FRAME_SIZE)
        } else {
            (self.backend.out_sample_rate(), 0)
        };

        let frames = self
            .backend
            .predicted_frames()
            .max(self.backend.total_frames());
        let rate_hundreds = u128::from(sample_rate / 100);
        let payload = if rate_hundreds == 0 {
            0
        } else {
            u128::from(frames) * 144 * u128::from(self.params.bitrate) * 10 / rate_hundreds
        };

        let fixed = self.header_size + self.trailing_legacy_tag_length() as u64 + summary;
        u64::try_from(payload)
            .unwrap_or(u64::MAX)
            .saturating_add(fixed)
    }

    /// Scale future output by `db` decibels
    pub fn set_gain_db(&mut self, db: f64) -> Result<()> {
        if matches!(self.state, SessionState::Finished | SessionState::Failed) {
            return Err(EncoderError::InvalidState {
                operation: "set_gain_db",
                state: self.state,
            });
        }
        self.scale = gain_to_scale(db);
        self.backend.set_scale(self.scale as f32);
        Ok(())
    }

    /// Current linear gain factor
    pub fn gain_scale(&self) -> f64 {
        self.scale
    }

    /// Current lifecycle phase
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Length of the ID3v2 header, 0 before `render_tag`
    pub fn header_size(&self) -> u64 {
        self.header_size
    }

    /// Length of the ID3v1 trailer appended by `finish`
    pub fn trailing_legacy_tag_length(&self) -> usize {
        if self.params.legacy_tag {
            LEGACY_TAG_LEN
        } else {
            0
        }
    }

    /// Exact stream size recorded by `finish`
    pub fn actual_size(&self) -> Option<u64> {
        self.actual_size
    }

    /// Stream description, set once `set_stream_params` succeeds
    pub fn stream(&self) -> Option<&StreamParameters> {
        self.stream.as_ref()
    }

    /// Metadata collected for the header, fallbacks included after `render_tag`
    pub fn tag(&self) -> &TagBuilder {
        &self.tag
    }

    /// The sink receiving the encoded file
    pub fn sink(&self) -> &S {
        &*self.sink
    }

    /// Encoding parameters the session was created with
    pub fn params(&self) -> &EncodingParameters {
        &self.params
    }
}

impl<'a, S: OutputSink, B: Mp3Backend> Drop for EncodingSession<'a, S, B> {
    fn drop(&mut self) {
        self.log.log(
            Level::Debug,
            &format!("releasing encoder in state {:?}", self.state),
        );
    }
}
