//! Variable bitrate session tests
//!
//! The summary frame reserved after the header is patched in place by
//! `finish`; a summary that outgrows its reservation must leave the sink
//! untouched.

use std::f64::consts::PI;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use shinefs::error::{ConfigResult, EncodingResult};
use shinefs::{
    EncoderError, EncodingParameters, EncodingSession, ErrorKind, GlobalLogSink, MemorySink,
    Mp3Backend, OutputSink, ReportHandlers, SessionState, StreamParameters,
};

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

fn be_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn vbr_params() -> EncodingParameters {
    EncodingParameters::new().vbr(true).bitrate(128).quality(5)
}

/// Backend writing fixed filler so the session's patching can be checked
struct ScriptedBackend {
    reserved: usize,
    summary_len: usize,
    channels: usize,
    sample_rate: u32,
    placeholder_pending: bool,
    frames: u64,
}

impl ScriptedBackend {
    fn new(reserved: usize, summary_len: usize) -> Self {
        Self {
            reserved,
            summary_len,
            channels: 0,
            sample_rate: 0,
            placeholder_pending: false,
            frames: 0,
        }
    }
}

impl Mp3Backend for ScriptedBackend {
    fn configure(&mut self, _params: &EncodingParameters) {}

    fn set_report_handlers(&mut self, _handlers: ReportHandlers) {}

    fn init_params(&mut self, stream: &StreamParameters) -> ConfigResult<()> {
        self.channels = usize::from(stream.channels);
        self.sample_rate = stream.sample_rate;
        self.placeholder_pending = true;
        Ok(())
    }

    fn set_scale(&mut self, _scale: f32) {}

    fn channels(&self) -> usize {
        self.channels
    }

    fn encode_buffer(
        &mut self,
        left: &[i32],
        _right: &[i32],
        out: &mut Vec<u8>,
        _capacity: usize,
    ) -> EncodingResult<usize> {
        out.clear();
        if self.placeholder_pending {
            self.placeholder_pending = false;
            out.resize(self.reserved, 0xAA);
        }
        out.extend(std::iter::repeat(0x11).take(left.len() / 4));
        self.frames += 1;
        Ok(out.len())
    }

    fn flush(&mut self, out: &mut Vec<u8>, _capacity: usize) -> EncodingResult<usize> {
        out.clear();
        Ok(0)
    }

    fn total_frames(&self) -> u64 {
        self.frames
    }

    fn in_sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn out_sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn summary_reserved(&self) -> usize {
        self.reserved
    }

    fn summary_frame(&self) -> EncodingResult<Vec<u8>> {
        Ok(vec![0x55; self.summary_len])
    }
}

#[test]
fn test_summary_frame_is_patched_after_header() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = MemorySink::new();
    let pcm: Vec<i32> = (0..44100)
        .map(|n| (9000.0 * (2.0 * PI * 330.0 * n as f64 / 44100.0).sin()) as i32)
        .collect();

    let mut session = EncodingSession::new(vbr_params(), &mut sink, dir.path());
    session.set_stream_params(44100, 44100, 1).unwrap();
    let h = session.render_tag().unwrap() as usize;

    session.encode_samples(&[&pcm[..]], pcm.len(), 16).unwrap();
    {
        let bytes = session.sink().as_bytes();
        assert_eq!(&bytes[h + 21..h + 25], b"Xing");
        assert_eq!(be_u32(bytes, h + 29), 0, "placeholder carries no counts");
    }
    session.finish().unwrap();

    let bytes = session.sink().as_bytes();
    assert_eq!(session.calculate_size(), bytes.len() as u64);
    assert_eq!(&bytes[h..h + 3], &[0xFF, 0xFB, 0x30]);
    assert_eq!(&bytes[h + 21..h + 25], b"Xing");
    assert_eq!(be_u32(bytes, h + 25), 0x0F);
    assert_eq!(be_u32(bytes, h + 29), 39, "frame count");
    assert_eq!(
        be_u32(bytes, h + 33) as usize,
        bytes.len() - h - 128,
        "stream bytes exclude header and trailer"
    );
    assert_eq!(be_u32(bytes, h + 137), 50, "quality indicator");

    // first audio frame follows the 156 byte summary
    assert_eq!(&bytes[h + 156..h + 157], &[0xFF]);
    assert_eq!(&bytes[bytes.len() - 128..bytes.len() - 125], b"TAG");
}

#[test]
fn test_vbr_estimate_reserves_summary() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = MemorySink::new();

    let mut session = EncodingSession::new(vbr_params(), &mut sink, dir.path());
    session.set_stream_params(44100, 44100, 1).unwrap();
    let h = session.render_tag().unwrap();

    // 39 frames predicted from the sample count, at the 128 kbps ceiling
    assert_eq!(session.calculate_size(), h + 128 + 2880 + 16300);
}

#[test]
fn test_vbr_without_samples_keeps_summary() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = MemorySink::new();

    let mut session = EncodingSession::new(
        vbr_params().legacy_tag(false),
        &mut sink,
        dir.path(),
    );
    session.set_stream_params(0, 44100, 1).unwrap();
    let h = session.render_tag().unwrap();

    assert_eq!(session.finish().unwrap(), 156);
    assert_eq!(session.calculate_size(), h + 156);

    let bytes = session.sink().as_bytes();
    assert_eq!(be_u32(bytes, h as usize + 29), 0);
}

#[test]
fn test_fitting_summary_overwrites_placeholder_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = MemorySink::new();

    let mut session = EncodingSession::with_backend(
        ScriptedBackend::new(16, 16),
        Arc::new(GlobalLogSink),
        vbr_params().legacy_tag(false),
        &mut sink,
        dir.path(),
    );
    session.set_stream_params(400, 44100, 1).unwrap();
    let h = session.render_tag().unwrap() as usize;
    assert_eq!(session.encode_samples(&[&[0i32; 400][..]], 400, 16).unwrap(), 116);
    session.finish().unwrap();

    let bytes = session.sink().as_bytes();
    assert_eq!(bytes.len(), h + 116);
    assert!(bytes[h..h + 16].iter().all(|&b| b == 0x55));
    assert!(bytes[h + 16..].iter().all(|&b| b == 0x11));
}

#[test]
fn test_oversized_summary_is_tag_overflow() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = MemorySink::new();

    let mut session = EncodingSession::with_backend(
        ScriptedBackend::new(16, 32),
        Arc::new(GlobalLogSink),
        vbr_params(),
        &mut sink,
        dir.path(),
    );
    session.set_stream_params(400, 44100, 1).unwrap();
    session.render_tag().unwrap();
    session.encode_samples(&[&[0i32; 400][..]], 400, 16).unwrap();

    let before = sha256_hex(session.sink().as_bytes());
    let length = session.sink().current_length();

    let err = session.finish().unwrap_err();
    assert!(matches!(
        err,
        EncoderError::TagOverflow {
            size: 32,
            reserved: 16
        }
    ));
    assert_eq!(session.state(), SessionState::Failed);
    assert_eq!(sha256_hex(session.sink().as_bytes()), before);
    assert_eq!(session.sink().current_length(), length, "no trailer appended");

    assert_eq!(session.finish().unwrap_err().kind(), ErrorKind::InvalidState);
    assert_eq!(
        session
            .encode_samples(&[&[0i32; 4][..]], 4, 16)
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidState
    );
    assert_eq!(session.set_gain_db(1.0).unwrap_err().kind(), ErrorKind::InvalidState);
}

#[test]
fn test_vbr_rejects_incompatible_bitrate() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = MemorySink::new();

    let mut session = EncodingSession::new(vbr_params().bitrate(320), &mut sink, dir.path());
    let err = session.set_stream_params(100, 22050, 2).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InitFailure);
    assert_eq!(session.state(), SessionState::Unconfigured);
}
