//! Bit reservoir
//!
//! Bits a granule leaves unused are lent to the granules coded after it
//! in the same frame. Frames are self-contained (`main_data_begin` is
//! always 0), so whatever is still in the reservoir when a frame ends is
//! written as stuffing inside that frame, following shine's
//! `reservoir.c` with a zero carry-over limit.

use crate::types::{GranuleInfo, MAX_CHANNELS, MAX_GRANULES};

/// Largest `part2_3_length` the side information can express
pub const MAX_GRANULE_BITS: u32 = 4095;

#[derive(Debug, Default)]
pub struct BitReservoir {
    /// Unused bits available to the next granule
    size: u32,
    /// Mean main data bits per granule, all channels together
    mean_bits: u32,
    channels: u32,
}

impl BitReservoir {
    pub fn new(channels: usize) -> Self {
        Self {
            size: 0,
            mean_bits: 0,
            channels: channels.max(1) as u32,
        }
    }

    /// Start a frame with `payload_bits` of main data space
    pub fn frame_begin(&mut self, payload_bits: u32, granules: usize) {
        self.mean_bits = payload_bits / granules.max(1) as u32;
        self.size = 0;
    }

    /// Budget for the next granule of one channel
    pub fn max_granule_bits(&self) -> u32 {
        (self.mean_bits / self.channels + self.size).min(MAX_GRANULE_BITS)
    }

    /// Account for a coded granule
    pub fn adjust(&mut self, part2_3_length: u32) {
        self.size = (self.size + self.mean_bits / self.channels).saturating_sub(part2_3_length);
    }

    /// Close the frame; returns the bits to stuff into it
    pub fn frame_end(&mut self) -> u32 {
        if self.channels == 2 && self.mean_bits & 1 == 1 {
            self.size += 1;
        }
        std::mem::take(&mut self.size)
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn mean_bits(&self) -> u32 {
        self.mean_bits
    }
}

/// Add `stuffing` bits to the granules of a frame
///
/// The first granule takes everything if it can; otherwise the bits are
/// spread in coding order. Returns what did not fit, which the frame
/// carries as zeroed ancillary data.
pub fn distribute_stuffing(
    granules: &mut [[GranuleInfo; MAX_CHANNELS]; MAX_GRANULES],
    granules_per_frame: usize,
    channels: usize,
    mut stuffing: u32,
) -> u32 {
    let first = &mut granules[0][0];
    if first.part2_3_length + stuffing <= MAX_GRANULE_BITS {
        first.part2_3_length += stuffing;
        return 0;
    }

    for granule in granules.iter_mut().take(granules_per_frame) {
        for gi in granule.iter_mut().take(channels) {
            let room = MAX_GRANULE_BITS.saturating_sub(gi.part2_3_length);
            let bits = room.min(stuffing);
            gi.part2_3_length += bits;
            stuffing -= bits;
        }
    }
    stuffing
}
