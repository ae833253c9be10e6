//! PCM sample utilities
//!
//! The encoder takes full-scale 32-bit samples. Input of any smaller bit
//! depth is left-aligned into the container, which is exact for every depth
//! from 1 to 32 bits.

use crate::error::{InputDataError, InputResult};

/// Width of the sample container in bits
pub const CONTAINER_BITS: u32 = 32;

/// Check that `depth` significant bits fit the container
pub fn validate_bit_depth(depth: u32) -> InputResult<()> {
    if depth == 0 || depth > CONTAINER_BITS {
        return Err(InputDataError::InvalidBitDepth {
            depth,
            max: CONTAINER_BITS,
        });
    }
    Ok(())
}

/// Left-align a sample with `depth` significant bits
///
/// `depth` must already be validated.
#[inline]
pub fn rescale_sample(sample: i32, depth: u32) -> i32 {
    sample << (CONTAINER_BITS - depth)
}

/// Rescale the first `count` samples of `input` into `output`
pub fn rescale_into(input: &[i32], count: usize, depth: u32, output: &mut Vec<i32>) -> InputResult<()> {
    validate_bit_depth(depth)?;
    output.clear();
    output.extend(input.iter().take(count).map(|&s| rescale_sample(s, depth)));
    Ok(())
}

/// Split interleaved samples `[L0, R0, L1, R1, ...]` into per-channel buffers
///
/// A trailing partial sample frame is dropped.
pub fn deinterleave(pcm_data: &[i32], channels: usize) -> Vec<Vec<i32>> {
    if channels == 0 {
        return Vec::new();
    }
    let frames = pcm_data.len() / channels;
    let mut buffers = vec![Vec::with_capacity(frames); channels];
    for frame in pcm_data.chunks_exact(channels) {
        for (buffer, &sample) in buffers.iter_mut().zip(frame) {
            buffer.push(sample);
        }
    }
    buffers
}
