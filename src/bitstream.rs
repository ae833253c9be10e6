//! Bitstream writing for MP3 frames
//!
//! MSB-first bit writer with a 32-bit cache, following shine's
//! `bitstream.c`. Completed cache words are stored big-endian.

use crate::error::{EncodingError, EncodingResult};

/// Bitstream writer
#[derive(Debug)]
pub struct BitstreamWriter {
    data: Vec<u8>,
    /// Bit stream cache
    cache: u32,
    /// Free bits in cache
    cache_bits: u32,
}

impl BitstreamWriter {
    /// Open a writer with room for `capacity` bytes before reallocating
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            cache: 0,
            cache_bits: 32,
        }
    }

    /// Write the low `n` bits of `val`
    pub fn put_bits(&mut self, val: u32, n: u32) -> EncodingResult<()> {
        if n > 32 {
            return Err(EncodingError::BitstreamError(format!(
                "cannot write {} bits at a time",
                n
            )));
        }
        if n < 32 && (val >> n) != 0 {
            return Err(EncodingError::BitstreamError(format!(
                "value 0x{:X} does not fit in {} bits",
                val, n
            )));
        }
        if n == 0 {
            return Ok(());
        }

        if self.cache_bits > n {
            self.cache_bits -= n;
            self.cache |= val << self.cache_bits;
        } else {
            let remaining = n - self.cache_bits;
            self.cache |= if remaining == 32 { 0 } else { val >> remaining };
            self.data.extend_from_slice(&self.cache.to_be_bytes());
            self.cache_bits = 32 - remaining;
            self.cache = if remaining == 0 {
                0
            } else {
                val << self.cache_bits
            };
        }

        Ok(())
    }

    /// Number of bits written so far
    pub fn bits_count(&self) -> usize {
        self.data.len() * 8 + (32 - self.cache_bits) as usize
    }

    /// Pad with zero bits up to the next byte boundary
    pub fn byte_align(&mut self) -> EncodingResult<()> {
        let partial = (self.bits_count() % 8) as u32;
        if partial != 0 {
            self.put_bits(0, 8 - partial)?;
        }
        Ok(())
    }

    /// Flush the cache and return the written bytes
    pub fn finish(mut self) -> EncodingResult<Vec<u8>> {
        self.byte_align()?;
        let bytes = ((32 - self.cache_bits) / 8) as usize;
        let cache = self.cache.to_be_bytes();
        self.data.extend_from_slice(&cache[..bytes]);
        Ok(self.data)
    }
}

impl Default for BitstreamWriter {
    fn default() -> Self {
        Self::new(2048)
    }
}
