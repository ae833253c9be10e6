//! Huffman coding of quantized spectra
//!
//! Bit counting and code book selection for the big-value and count1
//! regions, plus the writers that emit a granule's main data. Values in
//! `ix` are signed; magnitudes select the code word and the sign follows
//! as a separate bit.

use crate::bitstream::BitstreamWriter;
use crate::error::{EncodingError, EncodingResult};
use crate::tables::{HuffmanTable, COUNT1_TABLES, HUFFMAN_TABLES};
use crate::types::{GranuleInfo, GRANULE_SIZE};

/// Largest magnitude any code book can carry (15 + 13 escape bits)
pub const MAX_QUANTIZED_VALUE: u32 = 8191 + 15;

fn table(index: u32) -> Option<&'static HuffmanTable> {
    HUFFMAN_TABLES.get(index as usize).and_then(Option::as_ref)
}

/// Largest magnitude in `ix[begin..end]`
pub fn ix_max(ix: &[i32; GRANULE_SIZE], begin: usize, end: usize) -> u32 {
    ix[begin..end.min(GRANULE_SIZE)]
        .iter()
        .map(|v| v.unsigned_abs())
        .max()
        .unwrap_or(0)
}

/// Bits needed to code the pairs in `ix[begin..end]` with a code book
///
/// Returns `u32::MAX` when a value does not fit the book.
pub fn count_bits(ix: &[i32; GRANULE_SIZE], begin: usize, end: usize, table_select: u32) -> u32 {
    let Some(h) = table(table_select) else {
        return 0;
    };

    let mut sum = 0;
    for pair in ix[begin..end.min(GRANULE_SIZE)].chunks_exact(2) {
        let mut x = pair[0].unsigned_abs();
        let mut y = pair[1].unsigned_abs();
        if h.linbits > 0 {
            if x > 14 {
                x = 15;
                sum += h.linbits;
            }
            if y > 14 {
                y = 15;
                sum += h.linbits;
            }
        }
        if x >= h.xlen || y >= h.ylen {
            return u32::MAX;
        }
        sum += u32::from(h.lengths[(x * h.ylen + y) as usize]);
        sum += u32::from(x != 0) + u32::from(y != 0);
    }
    sum
}

/// Cheapest code book for a region
pub fn choose_table(ix: &[i32; GRANULE_SIZE], begin: usize, end: usize) -> u32 {
    let max = ix_max(ix, begin, end);
    if max == 0 {
        return 0;
    }

    if max < 15 {
        let first = (1..14)
            .find(|&i| table(i).map_or(false, |h| h.xlen > max))
            .unwrap_or(13);

        // books of the same size differ only in their statistics
        let candidates: &[u32] = match first {
            2 => &[2, 3],
            5 => &[5, 6],
            7 => &[7, 8, 9],
            10 => &[10, 11, 12],
            13 => &[13, 15],
            first => return first,
        };

        let mut best = (first, count_bits(ix, begin, end, first));
        for &candidate in &candidates[1..] {
            let bits = count_bits(ix, begin, end, candidate);
            if bits <= best.1 {
                best = (candidate, bits);
            }
        }
        best.0
    } else {
        let escape = max - 15;
        let fits = |range: std::ops::Range<u32>| {
            range
                .into_iter()
                .find(|&i| table(i).map_or(false, |h| h.linmax >= escape))
        };
        match (fits(16..24), fits(24..32)) {
            (Some(a), Some(b)) => {
                if count_bits(ix, begin, end, b) < count_bits(ix, begin, end, a) {
                    b
                } else {
                    a
                }
            }
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => 31,
        }
    }
}

#[inline]
fn quad_index(quad: &[i32]) -> usize {
    quad.iter()
        .fold(0usize, |acc, &v| (acc << 1) | usize::from(v != 0))
}

/// Bits for the count1 region with table A and with table B
pub fn count1_bits(ix: &[i32; GRANULE_SIZE], begin: usize, quads: usize) -> (u32, u32) {
    let end = (begin + quads * 4).min(GRANULE_SIZE);
    ix[begin..end]
        .chunks_exact(4)
        .fold((0, 0), |(a, b), quad| {
            let p = quad_index(quad);
            let signs = quad.iter().filter(|&&v| v != 0).count() as u32;
            (
                a + u32::from(COUNT1_TABLES[0].lengths[p]) + signs,
                b + u32::from(COUNT1_TABLES[1].lengths[p]) + signs,
            )
        })
}

/// Write one big-value pair
pub fn write_pair(bs: &mut BitstreamWriter, table_select: u32, x: i32, y: i32) -> EncodingResult<()> {
    let h = table(table_select).ok_or_else(|| {
        EncodingError::BitstreamError(format!("no code book {}", table_select))
    })?;

    let (mut ax, mut ay) = (x.unsigned_abs(), y.unsigned_abs());
    let (mut ext_x, mut ext_y) = (None, None);
    if h.linbits > 0 {
        if ax > 14 {
            ext_x = Some(ax - 15);
            ax = 15;
        }
        if ay > 14 {
            ext_y = Some(ay - 15);
            ay = 15;
        }
    }
    if ax >= h.xlen || ay >= h.ylen {
        return Err(EncodingError::BitstreamError(format!(
            "pair ({}, {}) outside code book {}",
            x, y, table_select
        )));
    }

    let idx = (ax * h.ylen + ay) as usize;
    bs.put_bits(u32::from(h.codes[idx]), u32::from(h.lengths[idx]))?;
    if let Some(ext) = ext_x {
        bs.put_bits(ext, h.linbits)?;
    }
    if ax != 0 {
        bs.put_bits(u32::from(x < 0), 1)?;
    }
    if let Some(ext) = ext_y {
        bs.put_bits(ext, h.linbits)?;
    }
    if ay != 0 {
        bs.put_bits(u32::from(y < 0), 1)?;
    }
    Ok(())
}

/// Write one count1 quadruple; every value must be in `-1..=1`
pub fn write_quad(bs: &mut BitstreamWriter, table_select: u32, quad: &[i32]) -> EncodingResult<()> {
    let h = &COUNT1_TABLES[(table_select & 1) as usize];
    let p = quad_index(quad);
    bs.put_bits(u32::from(h.codes[p]), u32::from(h.lengths[p]))?;
    for &v in quad.iter().filter(|&&v| v != 0) {
        bs.put_bits(u32::from(v < 0), 1)?;
    }
    Ok(())
}

/// Write a granule's Huffman data followed by its stuffing bits
///
/// Returns the number of Huffman bits, not counting stuffing.
pub fn write_granule(bs: &mut BitstreamWriter, gi: &GranuleInfo) -> EncodingResult<u32> {
    let start = bs.bits_count();
    let big_end = (gi.big_values as usize) * 2;

    for (pair_start, pair) in gi.ix[..big_end].chunks_exact(2).enumerate() {
        let line = pair_start * 2;
        let table_select = if line < gi.address1 as usize {
            gi.table_select[0]
        } else if line < gi.address2 as usize {
            gi.table_select[1]
        } else {
            gi.table_select[2]
        };
        if table_select != 0 {
            write_pair(bs, table_select, pair[0], pair[1])?;
        }
    }

    let count1_end = (big_end + gi.count1 as usize * 4).min(GRANULE_SIZE);
    for quad in gi.ix[big_end..count1_end].chunks_exact(4) {
        write_quad(bs, gi.count1table_select, quad)?;
    }

    let huffman_bits = (bs.bits_count() - start) as u32;
    let stuffing = gi.part2_3_length.checked_sub(huffman_bits).ok_or_else(|| {
        EncodingError::BitstreamError(format!(
            "granule holds {} bits but part2_3_length is {}",
            huffman_bits, gi.part2_3_length
        ))
    })?;
    for _ in 0..stuffing / 32 {
        bs.put_bits(u32::MAX, 32)?;
    }
    let rest = stuffing % 32;
    if rest > 0 {
        bs.put_bits((1 << rest) - 1, rest)?;
    }

    Ok(huffman_bits)
}
