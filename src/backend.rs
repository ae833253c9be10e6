//! Underlying encoder contract
//!
//! [`Mp3Backend`] is the narrow interface an encoding session drives: it is
//! configured once, fed full-scale PCM, and asked for flushed output and the
//! VBR summary frame at the end. [`ShineBackend`] implements it with the
//! in-crate Layer III engine.

use std::fmt;

use crate::config::{EncodingParameters, StreamParameters};
use crate::encoder::FrameEncoder;
use crate::error::{ConfigError, ConfigResult, EncodingError, EncodingResult};
use crate::frame::{seek_table, xing_frame, XingSummary};
use crate::types::MAX_CHANNELS;

/// Diagnostic callback
pub type ReportFn = Box<dyn Fn(&str) + Send + Sync>;

/// Error, message and debug channels of the encoder
#[derive(Default)]
pub struct ReportHandlers {
    pub error: Option<ReportFn>,
    pub message: Option<ReportFn>,
    pub debug: Option<ReportFn>,
}

impl ReportHandlers {
    fn error(&self, text: &str) {
        if let Some(report) = &self.error {
            report(text);
        }
    }

    fn message(&self, text: &str) {
        if let Some(report) = &self.message {
            report(text);
        }
    }

    fn debug(&self, text: &str) {
        if let Some(report) = &self.debug {
            report(text);
        }
    }
}

impl fmt::Debug for ReportHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportHandlers")
            .field("error", &self.error.is_some())
            .field("message", &self.message.is_some())
            .field("debug", &self.debug.is_some())
            .finish()
    }
}

/// Operations a session needs from an MP3 encoder
pub trait Mp3Backend {
    /// Select rate control and quality; called before `init_params`
    fn configure(&mut self, params: &EncodingParameters);

    fn set_report_handlers(&mut self, handlers: ReportHandlers);

    /// Apply the stream description and finish encoder setup
    fn init_params(&mut self, stream: &StreamParameters) -> ConfigResult<()>;

    /// Linear factor applied to samples submitted from now on
    fn set_scale(&mut self, scale: f32);

    /// Channels the encoder was set up for, 0 before `init_params`
    fn channels(&self) -> usize;

    /// Queue full-scale PCM and write any completed frames to `out`
    ///
    /// `right` is ignored for mono streams. Returns the number of bytes
    /// written; output that would exceed `capacity` is an error.
    fn encode_buffer(
        &mut self,
        left: &[i32],
        right: &[i32],
        out: &mut Vec<u8>,
        capacity: usize,
    ) -> EncodingResult<usize>;

    /// Encode whatever is still queued
    fn flush(&mut self, out: &mut Vec<u8>, capacity: usize) -> EncodingResult<usize>;

    /// Audio frames produced so far
    fn total_frames(&self) -> u64;

    /// Audio frames the whole stream will take, from its declared length
    ///
    /// Backends that cannot predict report the frames produced so far.
    fn predicted_frames(&self) -> u64 {
        self.total_frames()
    }

    fn in_sample_rate(&self) -> u32;

    fn out_sample_rate(&self) -> u32;

    /// Length of the summary frame placeholder, 0 when none is reserved
    fn summary_reserved(&self) -> usize;

    /// Final summary frame for the bytes produced so far
    fn summary_frame(&self) -> EncodingResult<Vec<u8>>;
}

/// [`Mp3Backend`] built on [`FrameEncoder`]
pub struct ShineBackend {
    params: EncodingParameters,
    handlers: ReportHandlers,
    scale: f32,
    encoder: Option<FrameEncoder>,
    /// Samples per channel declared for the stream
    sample_count: u64,
    pending: [Vec<i32>; MAX_CHANNELS],
    /// Placeholder still waiting to be emitted
    placeholder: Option<Vec<u8>>,
    summary_reserved: usize,
    /// Size of every audio frame, for the seek table
    frame_sizes: Vec<u32>,
    clip_reported: bool,
}

impl ShineBackend {
    pub fn new() -> Self {
        Self {
            params: EncodingParameters::default(),
            handlers: ReportHandlers::default(),
            scale: 1.0,
            encoder: None,
            sample_count: 0,
            pending: [Vec::new(), Vec::new()],
            placeholder: None,
            summary_reserved: 0,
            frame_sizes: Vec::new(),
            clip_reported: false,
        }
    }

    fn encoder(&self) -> EncodingResult<&FrameEncoder> {
        self.encoder.as_ref().ok_or(EncodingError::NotInitialised)
    }

    fn queue(&mut self, ch: usize, samples: &[i32]) {
        let scale = f64::from(self.scale);
        if scale == 1.0 {
            self.pending[ch].extend_from_slice(samples);
            return;
        }

        let mut clipped = false;
        self.pending[ch].extend(samples.iter().map(|&sample| {
            let scaled = (f64::from(sample) * scale).round();
            if scaled > f64::from(i32::MAX) || scaled < f64::from(i32::MIN) {
                clipped = true;
            }
            scaled.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
        }));

        if clipped && !self.clip_reported {
            self.clip_reported = true;
            self.handlers
                .message(&format!("input clipped after scaling by {:.3}", scale));
        }
    }

    fn emit(out: &mut Vec<u8>, bytes: &[u8], capacity: usize) -> EncodingResult<()> {
        let required = out.len() + bytes.len();
        if required > capacity {
            return Err(EncodingError::OutputBufferTooSmall { required, capacity });
        }
        out.extend_from_slice(bytes);
        Ok(())
    }

    fn emit_placeholder(&mut self, out: &mut Vec<u8>, capacity: usize) -> EncodingResult<()> {
        if let Some(placeholder) = self.placeholder.take() {
            Self::emit(out, &placeholder, capacity)?;
        }
        Ok(())
    }

    /// Encode every complete frame waiting in the queue
    fn drain_frames(&mut self, out: &mut Vec<u8>, capacity: usize) -> EncodingResult<()> {
        let encoder = self.encoder.as_mut().ok_or(EncodingError::NotInitialised)?;
        let samples_per_frame = encoder.samples_per_frame();
        let channels = encoder.channels();

        let mut consumed = 0;
        while self.pending[0].len() - consumed >= samples_per_frame {
            let range = consumed..consumed + samples_per_frame;
            let pcm: Vec<&[i32]> = self.pending[..channels]
                .iter()
                .map(|channel| &channel[range.clone()])
                .collect();
            let frame = encoder.encode_frame(&pcm)?;
            Self::emit(out, &frame, capacity)?;
            self.frame_sizes.push(frame.len() as u32);
            consumed += samples_per_frame;
        }

        for channel in self.pending[..channels].iter_mut() {
            channel.drain(..consumed);
        }

        Ok(())
    }
}

impl Default for ShineBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Mp3Backend for ShineBackend {
    fn configure(&mut self, params: &EncodingParameters) {
        self.params = *params;
    }

    fn set_report_handlers(&mut self, handlers: ReportHandlers) {
        self.handlers = handlers;
    }

    fn init_params(&mut self, stream: &StreamParameters) -> ConfigResult<()> {
        let encoder = match FrameEncoder::new(&self.params, stream) {
            Ok(encoder) => encoder,
            Err(e) => {
                self.handlers.error(&format!("rejected stream parameters: {}", e));
                return Err(e);
            }
        };

        if self.params.vbr {
            let placeholder = xing_frame(
                encoder.version(),
                encoder.sample_rate(),
                encoder.channels(),
                &XingSummary::default(),
            )
            .map_err(|e| {
                self.handlers.error(&format!("cannot reserve summary frame: {}", e));
                ConfigError::IncompatibleRateCombination {
                    sample_rate: stream.sample_rate,
                    bitrate: self.params.bitrate,
                }
            })?;
            self.summary_reserved = placeholder.len();
            self.placeholder = Some(placeholder);
        }

        self.handlers.debug(&format!(
            "{:?} layer III, {} Hz, {} channel(s), {} kbps {}, quality {}",
            encoder.version(),
            stream.sample_rate,
            stream.channels,
            self.params.bitrate,
            if self.params.vbr { "VBR max" } else { "CBR" },
            self.params.quality
        ));

        self.sample_count = stream.sample_count;
        self.encoder = Some(encoder);
        Ok(())
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    fn channels(&self) -> usize {
        self.encoder.as_ref().map_or(0, FrameEncoder::channels)
    }

    fn encode_buffer(
        &mut self,
        left: &[i32],
        right: &[i32],
        out: &mut Vec<u8>,
        capacity: usize,
    ) -> EncodingResult<usize> {
        let channels = self.encoder()?.channels();
        if channels == 2 && left.len() != right.len() {
            return Err(EncodingError::ChannelLengthMismatch {
                left: left.len(),
                right: right.len(),
            });
        }

        out.clear();
        self.emit_placeholder(out, capacity)?;

        self.queue(0, left);
        if channels == 2 {
            self.queue(1, right);
        }
        self.drain_frames(out, capacity)?;

        Ok(out.len())
    }

    fn flush(&mut self, out: &mut Vec<u8>, capacity: usize) -> EncodingResult<usize> {
        let encoder = self.encoder()?;
        let samples_per_frame = encoder.samples_per_frame();
        let channels = encoder.channels();

        out.clear();
        self.emit_placeholder(out, capacity)?;

        if !self.pending[0].is_empty() {
            for channel in self.pending[..channels].iter_mut() {
                channel.resize(samples_per_frame, 0);
            }
            self.drain_frames(out, capacity)?;
        }

        Ok(out.len())
    }

    fn total_frames(&self) -> u64 {
        self.encoder.as_ref().map_or(0, FrameEncoder::frames_encoded)
    }

    fn predicted_frames(&self) -> u64 {
        self.encoder.as_ref().map_or(0, |encoder| {
            let per_frame = encoder.samples_per_frame() as u64;
            self.sample_count.div_ceil(per_frame)
        })
    }

    fn in_sample_rate(&self) -> u32 {
        self.encoder.as_ref().map_or(0, FrameEncoder::sample_rate)
    }

    fn out_sample_rate(&self) -> u32 {
        // no resampling
        self.in_sample_rate()
    }

    fn summary_reserved(&self) -> usize {
        self.summary_reserved
    }

    fn summary_frame(&self) -> EncodingResult<Vec<u8>> {
        let encoder = self.encoder()?;
        if !self.params.vbr {
            return Ok(Vec::new());
        }

        let leading = self.summary_reserved as u64;
        let audio_bytes: u64 = self.frame_sizes.iter().map(|&s| u64::from(s)).sum();
        let summary = XingSummary {
            frames: self.frame_sizes.len() as u32,
            bytes: (leading + audio_bytes).min(u64::from(u32::MAX)) as u32,
            toc: seek_table(&self.frame_sizes, leading),
            quality: 100 - 10 * u32::from(self.params.quality),
        };

        xing_frame(
            encoder.version(),
            encoder.sample_rate(),
            encoder.channels(),
            &summary,
        )
    }
}
