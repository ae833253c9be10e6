//! Quantization and rate control
//!
//! The inner loop of shine's `l3loop.c`: a binary search finds the
//! quantizer step size whose Huffman cost lands near the granule's bit
//! budget, then the step is raised until the coded granule fits. There is
//! no psychoacoustic model, so scalefactors stay zero and every band is
//! quantized against the granule's global gain.

use lazy_static::lazy_static;

use crate::huffman::{choose_table, count1_bits, count_bits};
use crate::types::{GranuleInfo, GRANULE_SIZE};

/// Lines dropped from the top of the spectrum per quality step
const LINES_PER_QUALITY_STEP: usize = 24;

/// Largest magnitude the quantizer may produce
const MAX_IX: u32 = 8192;

/// `MAX_IX` raised to 4/3, in the scaled domain of [`quantize`]
const MAX_IX_SCALED: u32 = 165_140;

/// Cost reported for a step size whose values overflow the code books
const OVERFLOW_BITS: u32 = 100_000;

/// Coarsest step size, global gain 255; every line quantizes to zero here
const MAX_STEP: i32 = 45;

/// Quantized peak allowed per VBR quality, best first
pub const VBR_PEAK_LEVELS: [u32; 10] = [2048, 1024, 512, 256, 160, 96, 64, 40, 24, 15];

/// Region sizes in scalefactor bands, indexed by bands in the big-value area
#[rustfmt::skip]
const SUBDIVISION: [(u32, u32); 23] = [
    (0, 0), (0, 0), (0, 0), (0, 0), (0, 0), (0, 1), (1, 1), (1, 1),
    (1, 2), (2, 2), (2, 3), (2, 3), (3, 4), (3, 4), (3, 4), (4, 5),
    (4, 5), (4, 6), (5, 6), (5, 6), (5, 7), (6, 7), (6, 7),
];

lazy_static! {
    /// 2^((127 - i) / 4)
    static ref STEP_TABLE: [f64; 128] = {
        let mut table = [0.0; 128];
        for (i, step) in table.iter_mut().enumerate() {
            *step = 2f64.powf((127 - i as i32) as f64 / 4.0);
        }
        table
    };

    /// Step table doubled and rounded to fixed point, saturating
    static ref STEP_TABLE_FIXED: [u32; 128] = {
        let mut table = [0u32; 128];
        for (fixed, &step) in table.iter_mut().zip(STEP_TABLE.iter()) {
            *fixed = if step * 2.0 > i32::MAX as f64 {
                i32::MAX as u32
            } else {
                (step * 2.0 + 0.5) as u32
            };
        }
        table
    };

    /// i^(3/4) with the ISO 0.0946 bias, rounded
    static ref POW_3_4: Vec<u32> = (0..10_000)
        .map(|i| ((i as f64).powf(0.75) - 0.0946 + 0.5) as u32)
        .collect();
}

#[inline]
fn mulr(a: u32, b: u32) -> u32 {
    ((u64::from(a) * u64::from(b) + 0x8000_0000) >> 32) as u32
}

#[inline]
fn step_index(step: i32) -> usize {
    (step + 127).clamp(0, 127) as usize
}

/// Number of spectral lines coded at the given quality
pub fn bandwidth_lines(quality: u8) -> usize {
    let dropped = quality as usize * LINES_PER_QUALITY_STEP;
    GRANULE_SIZE.saturating_sub(dropped) & !3
}

/// Smallest step size keeping a peak of `xrmax` at or below `level`
pub fn step_floor(xrmax: u32, level: u32) -> i32 {
    if xrmax == 0 || level == 0 {
        return 0;
    }
    let peak = f64::from(xrmax) / 2f64.powi(31);
    let floor = 4.0 * (peak.log2() - f64::from(level).log2() * 4.0 / 3.0);
    (floor.ceil() as i32).clamp(-120, 0)
}

/// Quantize magnitudes of `xr` at `step`; returns the largest value
///
/// Returns a value above 8192 without finishing when the step is too
/// fine for the code books.
pub fn quantize(xr: &[i32; GRANULE_SIZE], xrmax: u32, step: i32, ix: &mut [i32; GRANULE_SIZE]) -> u32 {
    if step > 0 {
        return quantize_coarse(xr, step, ix);
    }

    let idx = step_index(step);
    let scalei = STEP_TABLE_FIXED[idx];

    if mulr(xrmax, scalei) > MAX_IX_SCALED {
        return MAX_IX * 2;
    }

    let mut max = 0;
    for (q, &x) in ix.iter_mut().zip(xr.iter()) {
        let ln = mulr(x.unsigned_abs(), scalei);
        let value = match POW_3_4.get(ln as usize) {
            Some(&v) => v,
            None => {
                let dbl = f64::from(x.unsigned_abs()) * STEP_TABLE[idx] * 4.656612875e-10;
                dbl.powf(0.75) as u32
            }
        };
        *q = value as i32;
        max = max.max(value);
    }
    max
}

/// Steps past the fixed-point table, reached only when even unit values
/// overrun the budget
fn quantize_coarse(xr: &[i32; GRANULE_SIZE], step: i32, ix: &mut [i32; GRANULE_SIZE]) -> u32 {
    let scale = 2f64.powf(-f64::from(step) / 4.0) / 2f64.powi(31);

    let mut max = 0;
    for (q, &x) in ix.iter_mut().zip(xr.iter()) {
        let ln = (f64::from(x.unsigned_abs()) * scale).round() as usize;
        let value = POW_3_4.get(ln).copied().unwrap_or(1);
        *q = value as i32;
        max = max.max(value);
    }
    max
}

/// Split the spectrum into zero, count1 and big-value regions
pub fn calc_runlen(gi: &mut GranuleInfo) {
    let ix = &gi.ix;
    let mut i = GRANULE_SIZE;

    while i > 1 && ix[i - 2] == 0 && ix[i - 1] == 0 {
        i -= 2;
    }

    let mut count1 = 0;
    while i > 3 && ix[i - 4..i].iter().all(|v| v.unsigned_abs() <= 1) {
        count1 += 1;
        i -= 4;
    }

    gi.count1 = count1;
    gi.big_values = (i / 2) as u32;
}

/// Pick the cheaper count1 table and return its cost
pub fn count1_bitcount(gi: &mut GranuleInfo) -> u32 {
    let (a, b) = count1_bits(&gi.ix, gi.big_values as usize * 2, gi.count1 as usize);
    if a < b {
        gi.count1table_select = 0;
        a
    } else {
        gi.count1table_select = 1;
        b
    }
}

/// Divide the big-value area into three regions on band boundaries
pub fn subdivide(gi: &mut GranuleInfo, bands: &[u32; 23]) {
    if gi.big_values == 0 {
        gi.region0_count = 0;
        gi.region1_count = 0;
        gi.address1 = 0;
        gi.address2 = 0;
        gi.address3 = 0;
        return;
    }

    let region_end = gi.big_values * 2;
    let band_count = bands.iter().position(|&b| b >= region_end).unwrap_or(22);
    let (r0, r1) = SUBDIVISION[band_count];

    let region0 = (1..=r0)
        .rev()
        .find(|&n| bands[n as usize + 1] <= region_end)
        .unwrap_or(0);
    gi.region0_count = region0;
    gi.address1 = bands[region0 as usize + 1].min(region_end);

    let rest = &bands[region0 as usize + 1..];
    let region1 = (1..=r1)
        .rev()
        .find(|&n| rest[n as usize + 1] <= region_end)
        .unwrap_or(0);
    gi.region1_count = region1;
    gi.address2 = rest[region1 as usize + 1].min(region_end);
    gi.address3 = region_end;
}

/// Choose a code book for each big-value region
pub fn bigv_tab_select(gi: &mut GranuleInfo) {
    let (a1, a2, a3) = (
        gi.address1 as usize,
        gi.address2 as usize,
        gi.big_values as usize * 2,
    );
    gi.table_select = [0; 3];
    if a1 > 0 {
        gi.table_select[0] = choose_table(&gi.ix, 0, a1);
    }
    if a2 > a1 {
        gi.table_select[1] = choose_table(&gi.ix, a1, a2);
    }
    if a3 > a2 {
        gi.table_select[2] = choose_table(&gi.ix, a2, a3);
    }
}

/// Huffman cost of the big-value regions
pub fn bigv_bitcount(gi: &GranuleInfo) -> u32 {
    let bounds = [
        (0, gi.address1 as usize),
        (gi.address1 as usize, gi.address2 as usize),
        (gi.address2 as usize, gi.address3 as usize),
    ];

    let mut bits = 0;
    for (&(begin, end), &table) in bounds.iter().zip(gi.table_select.iter()) {
        if table != 0 && end > begin {
            bits = count_bits(&gi.ix, begin, end, table).saturating_add(bits);
        }
    }
    bits
}

/// Total Huffman cost of the values currently in `gi.ix`
pub fn granule_bits(gi: &mut GranuleInfo, bands: &[u32; 23]) -> u32 {
    calc_runlen(gi);
    let count1 = count1_bitcount(gi);
    subdivide(gi, bands);
    bigv_tab_select(gi);
    count1 + bigv_bitcount(gi)
}

/// Binary search for a step size costing about `desired` bits
pub fn bin_search_step_size(
    xr: &[i32; GRANULE_SIZE],
    xrmax: u32,
    desired: u32,
    bands: &[u32; 23],
    gi: &mut GranuleInfo,
) -> i32 {
    let mut next = -120;
    let mut count = 120;

    while count > 1 {
        let half = count / 2;
        let bits = if quantize(xr, xrmax, next + half, &mut gi.ix) > MAX_IX {
            OVERFLOW_BITS
        } else {
            granule_bits(gi, bands)
        };

        if bits < desired {
            count = half;
        } else {
            next += half;
            count -= half;
        }
    }

    next
}

/// Raise the step size from `gi.quantizer_step_size` until the granule fits
///
/// Stops at the coarsest step, where the spectrum is silent and costs
/// nothing.
pub fn inner_loop(
    xr: &[i32; GRANULE_SIZE],
    xrmax: u32,
    max_bits: u32,
    bands: &[u32; 23],
    gi: &mut GranuleInfo,
) -> u32 {
    loop {
        loop {
            gi.quantizer_step_size += 1;
            let max = quantize(xr, xrmax, gi.quantizer_step_size, &mut gi.ix);
            if max <= MAX_IX || gi.quantizer_step_size >= MAX_STEP {
                break;
            }
        }

        let bits = granule_bits(gi, bands);
        if bits <= max_bits || gi.quantizer_step_size >= MAX_STEP {
            return bits;
        }
    }
}

/// Rate control settings for one granule
#[derive(Debug, Clone, Copy)]
pub struct GranuleLimits {
    /// Huffman bit budget, at most 4095
    pub max_bits: u32,
    /// Lines at and above this index are not coded
    pub lines: usize,
    /// Highest quantized value the granule peak may reach (VBR)
    pub peak_level: Option<u32>,
}

/// Quantize and size one granule of MDCT lines into `gi`
///
/// On return `gi.ix` carries signed values and `gi.part2_3_length` the
/// Huffman bits needed, which never exceeds `limits.max_bits`.
pub fn quantize_granule(
    xr: &[i32; GRANULE_SIZE],
    limits: &GranuleLimits,
    bands: &[u32; 23],
    gi: &mut GranuleInfo,
) -> u32 {
    let mut lines = [0i32; GRANULE_SIZE];
    let coded = limits.lines.min(GRANULE_SIZE);
    lines[..coded].copy_from_slice(&xr[..coded]);
    let xrmax = lines.iter().map(|v| v.unsigned_abs()).max().unwrap_or(0);

    *gi = GranuleInfo::default();
    if xrmax == 0 {
        gi.global_gain = 210;
        return 0;
    }

    let mut start = bin_search_step_size(&lines, xrmax, limits.max_bits, bands, gi);
    if let Some(level) = limits.peak_level {
        start = start.max(step_floor(xrmax, level) - 1);
    }
    gi.quantizer_step_size = start;

    let bits = inner_loop(&lines, xrmax, limits.max_bits, bands, gi);
    gi.part2_3_length = bits;
    gi.global_gain = (gi.quantizer_step_size + 210).clamp(0, 255) as u32;

    for (q, &x) in gi.ix.iter_mut().zip(lines.iter()) {
        if x < 0 {
            *q = -*q;
        }
    }

    bits
}
