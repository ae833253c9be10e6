//! Lookup tables and constants for Layer III encoding
//!
//! Sample-rate and bitrate tables follow the MPEG frame header encoding;
//! the analysis window is ISO 11172-3 table C.1 as used by shine. Huffman
//! code tables are ISO 11172-3 table B.7, indexed `x * ylen + y` for
//! big-value pairs and `8v + 4w + 2x + y` for count1 quadruples.

use lazy_static::lazy_static;

use crate::config::MpegVersion;

/// Valid sample rates, ordered so that `index % 3` is the header field
pub const SAMPLERATES: [u32; 9] = [
    44100, 48000, 32000, // MPEG-I
    22050, 24000, 16000, // MPEG-II
    11025, 12000, 8000, // MPEG-2.5
];

/// Bitrate table indexed by `[bitrate_index][version column]`
///
/// Columns follow the header version bits: 2.5, reserved, II, I.
pub const BITRATES: [[i32; 4]; 16] = [
    [-1, -1, -1, -1],   // 0000
    [8, -1, 8, 32],     // 0001
    [16, -1, 16, 40],   // 0010
    [24, -1, 24, 48],   // 0011
    [32, -1, 32, 56],   // 0100
    [40, -1, 40, 64],   // 0101
    [48, -1, 48, 80],   // 0110
    [56, -1, 56, 96],   // 0111
    [64, -1, 64, 112],  // 1000
    [-1, -1, 80, 128],  // 1001
    [-1, -1, 96, 160],  // 1010
    [-1, -1, 112, 192], // 1011
    [-1, -1, 128, 224], // 1100
    [-1, -1, 144, 256], // 1101
    [-1, -1, 160, 320], // 1110
    [-1, -1, -1, -1],   // 1111
];

/// Long block scalefactor band boundaries, rows ordered like [`SAMPLERATES`]
#[rustfmt::skip]
pub const SCALE_FACT_BAND_INDEX: [[u32; 23]; 9] = [
    // MPEG-I: 44.1, 48, 32 kHz
    [0, 4, 8, 12, 16, 20, 24, 30, 36, 44, 52, 62, 74, 90, 110, 134, 162, 196, 238, 288, 342, 418, 576],
    [0, 4, 8, 12, 16, 20, 24, 30, 36, 42, 50, 60, 72, 88, 106, 128, 156, 190, 230, 276, 330, 384, 576],
    [0, 4, 8, 12, 16, 20, 24, 30, 36, 44, 54, 66, 82, 102, 126, 156, 194, 240, 296, 364, 448, 550, 576],
    // MPEG-II: 22.05, 24, 16 kHz
    [0, 6, 12, 18, 24, 30, 36, 44, 54, 66, 80, 96, 116, 140, 168, 200, 238, 284, 336, 396, 464, 522, 576],
    [0, 6, 12, 18, 24, 30, 36, 44, 54, 66, 80, 96, 114, 136, 162, 194, 232, 278, 330, 394, 464, 540, 576],
    [0, 6, 12, 18, 24, 30, 36, 44, 54, 66, 80, 96, 116, 140, 168, 200, 238, 284, 336, 396, 464, 522, 576],
    // MPEG-2.5: 11.025, 12, 8 kHz
    [0, 6, 12, 18, 24, 30, 36, 44, 54, 66, 80, 96, 116, 140, 168, 200, 238, 284, 336, 396, 464, 522, 576],
    [0, 6, 12, 18, 24, 30, 36, 44, 54, 66, 80, 96, 116, 140, 168, 200, 238, 284, 336, 396, 464, 522, 576],
    [0, 12, 24, 36, 48, 60, 72, 88, 108, 132, 160, 192, 232, 280, 336, 400, 476, 566, 568, 570, 572, 574, 576],
];

/// Scalefactor band boundaries for a sample rate
pub fn scale_fact_bands(sample_rate: u32) -> Option<&'static [u32; 23]> {
    SAMPLERATES
        .iter()
        .position(|&sr| sr == sample_rate)
        .map(|idx| &SCALE_FACT_BAND_INDEX[idx])
}

/// Sample rate field (0..=2) for the frame header
pub fn sample_rate_index(sample_rate: u32) -> Option<u32> {
    SAMPLERATES
        .iter()
        .position(|&sr| sr == sample_rate)
        .map(|idx| (idx % 3) as u32)
}

/// Header bitrate index for a bitrate, if legal for the version
pub fn bitrate_index(bitrate: u32, version: MpegVersion) -> Option<u32> {
    let column = version.header_bits() as usize;
    (1..15)
        .find(|&idx| BITRATES[idx][column] == bitrate as i32)
        .map(|idx| idx as u32)
}

/// Bitrate in kbps for a header bitrate index
pub fn bitrate_for_index(index: u32, version: MpegVersion) -> Option<u32> {
    let rate = *BITRATES.get(index as usize)?.get(version.header_bits() as usize)?;
    (rate > 0).then_some(rate as u32)
}

/// Analysis window coefficients (ISO 11172-3 table C.1, shine sign convention)
#[rustfmt::skip]
pub const ANALYSIS_WINDOW: [f64; 512] = [
    0.000000, -0.000000, -0.000000, -0.000000, -0.000000, -0.000000, -0.000000, -0.000001,
    -0.000001, -0.000001, -0.000001, -0.000001, -0.000001, -0.000002, -0.000002, -0.000002,
    -0.000002, -0.000003, -0.000003, -0.000003, -0.000004, -0.000004, -0.000005, -0.000005,
    -0.000006, -0.000007, -0.000008, -0.000008, -0.000009, -0.000010, -0.000011, -0.000012,
    -0.000014, -0.000015, -0.000017, -0.000018, -0.000020, -0.000021, -0.000023, -0.000025,
    -0.000028, -0.000030, -0.000032, -0.000035, -0.000038, -0.000041, -0.000043, -0.000046,
    -0.000050, -0.000053, -0.000056, -0.000060, -0.000063, -0.000066, -0.000070, -0.000073,
    -0.000077, -0.000081, -0.000084, -0.000087, -0.000091, -0.000093, -0.000096, -0.000099,
    0.000102, 0.000104, 0.000106, 0.000107, 0.000108, 0.000109, 0.000109, 0.000108,
    0.000107, 0.000105, 0.000103, 0.000099, 0.000095, 0.000090, 0.000084, 0.000078,
    0.000070, 0.000061, 0.000051, 0.000040, 0.000027, 0.000014, -0.000001, -0.000017,
    -0.000034, -0.000053, -0.000073, -0.000094, -0.000116, -0.000140, -0.000165, -0.000191,
    -0.000219, -0.000247, -0.000277, -0.000308, -0.000339, -0.000371, -0.000404, -0.000438,
    -0.000473, -0.000507, -0.000542, -0.000577, -0.000612, -0.000647, -0.000681, -0.000714,
    -0.000747, -0.000779, -0.000810, -0.000839, -0.000866, -0.000892, -0.000915, -0.000936,
    -0.000954, -0.000969, -0.000981, -0.000989, -0.000994, -0.000995, -0.000992, -0.000984,
    0.000971, 0.000954, 0.000931, 0.000903, 0.000869, 0.000829, 0.000784, 0.000732,
    0.000674, 0.000610, 0.000539, 0.000463, 0.000379, 0.000288, 0.000192, 0.000088,
    -0.000021, -0.000137, -0.000260, -0.000388, -0.000522, -0.000662, -0.000807, -0.000957,
    -0.001111, -0.001270, -0.001432, -0.001598, -0.001767, -0.001937, -0.002110, -0.002283,
    -0.002457, -0.002631, -0.002803, -0.002974, -0.003142, -0.003307, -0.003467, -0.003623,
    -0.003772, -0.003914, -0.004049, -0.004175, -0.004291, -0.004396, -0.004490, -0.004570,
    -0.004638, -0.004691, -0.004728, -0.004749, -0.004752, -0.004737, -0.004703, -0.004649,
    -0.004574, -0.004477, -0.004358, -0.004215, -0.004049, -0.003859, -0.003643, -0.003402,
    0.003135, 0.002841, 0.002522, 0.002175, 0.001801, 0.001400, 0.000971, 0.000516,
    0.000033, -0.000476, -0.001012, -0.001574, -0.002162, -0.002774, -0.003411, -0.004072,
    -0.004756, -0.005462, -0.006189, -0.006937, -0.007703, -0.008487, -0.009288, -0.010104,
    -0.010933, -0.011775, -0.012628, -0.013489, -0.014359, -0.015234, -0.016113, -0.016994,
    -0.017876, -0.018757, -0.019634, -0.020507, -0.021372, -0.022229, -0.023074, -0.023907,
    -0.024725, -0.025527, -0.026311, -0.027074, -0.027815, -0.028533, -0.029225, -0.029890,
    -0.030527, -0.031133, -0.031707, -0.032248, -0.032755, -0.033226, -0.033660, -0.034056,
    -0.034413, -0.034730, -0.035007, -0.035242, -0.035435, -0.035586, -0.035694, -0.035759,
    0.035781, 0.035759, 0.035694, 0.035586, 0.035435, 0.035242, 0.035007, 0.034730,
    0.034413, 0.034056, 0.033660, 0.033226, 0.032755, 0.032248, 0.031707, 0.031133,
    0.030527, 0.029890, 0.029225, 0.028533, 0.027815, 0.027074, 0.026311, 0.025527,
    0.024725, 0.023907, 0.023074, 0.022229, 0.021372, 0.020507, 0.019634, 0.018757,
    0.017876, 0.016994, 0.016113, 0.015234, 0.014359, 0.013489, 0.012628, 0.011775,
    0.010933, 0.010104, 0.009288, 0.008487, 0.007703, 0.006937, 0.006189, 0.005462,
    0.004756, 0.004072, 0.003411, 0.002774, 0.002162, 0.001574, 0.001012, 0.000476,
    -0.000033, -0.000516, -0.000971, -0.001400, -0.001801, -0.002175, -0.002522, -0.002841,
    0.003135, 0.003402, 0.003643, 0.003859, 0.004049, 0.004215, 0.004358, 0.004477,
    0.004574, 0.004649, 0.004703, 0.004737, 0.004752, 0.004749, 0.004728, 0.004691,
    0.004638, 0.004570, 0.004490, 0.004396, 0.004291, 0.004175, 0.004049, 0.003914,
    0.003772, 0.003623, 0.003467, 0.003307, 0.003142, 0.002974, 0.002803, 0.002631,
    0.002457, 0.002283, 0.002110, 0.001937, 0.001767, 0.001598, 0.001432, 0.001270,
    0.001111, 0.000957, 0.000807, 0.000662, 0.000522, 0.000388, 0.000260, 0.000137,
    0.000021, -0.000088, -0.000192, -0.000288, -0.000379, -0.000463, -0.000539, -0.000610,
    -0.000674, -0.000732, -0.000784, -0.000829, -0.000869, -0.000903, -0.000931, -0.000954,
    0.000971, 0.000984, 0.000992, 0.000995, 0.000994, 0.000989, 0.000981, 0.000969,
    0.000954, 0.000936, 0.000915, 0.000892, 0.000866, 0.000839, 0.000810, 0.000779,
    0.000747, 0.000714, 0.000681, 0.000647, 0.000612, 0.000577, 0.000542, 0.000507,
    0.000473, 0.000438, 0.000404, 0.000371, 0.000339, 0.000308, 0.000277, 0.000247,
    0.000219, 0.000191, 0.000165, 0.000140, 0.000116, 0.000094, 0.000073, 0.000053,
    0.000034, 0.000017, 0.000001, -0.000014, -0.000027, -0.000040, -0.000051, -0.000061,
    -0.000070, -0.000078, -0.000084, -0.000090, -0.000095, -0.000099, -0.000103, -0.000105,
    -0.000107, -0.000108, -0.000109, -0.000109, -0.000108, -0.000107, -0.000106, -0.000104,
    0.000102, 0.000099, 0.000096, 0.000093, 0.000091, 0.000087, 0.000084, 0.000081,
    0.000077, 0.000073, 0.000070, 0.000066, 0.000063, 0.000060, 0.000056, 0.000053,
    0.000050, 0.000046, 0.000043, 0.000041, 0.000038, 0.000035, 0.000032, 0.000030,
    0.000028, 0.000025, 0.000023, 0.000021, 0.000020, 0.000018, 0.000017, 0.000015,
    0.000014, 0.000012, 0.000011, 0.000010, 0.000009, 0.000008, 0.000008, 0.000007,
    0.000006, 0.000005, 0.000005, 0.000004, 0.000004, 0.000003, 0.000003, 0.000003,
    0.000002, 0.000002, 0.000002, 0.000002, 0.000001, 0.000001, 0.000001, 0.000001,
    0.000001, 0.000001, 0.000000, 0.000000, 0.000000, 0.000000, 0.000000, 0.000000,
];

lazy_static! {
    /// Analysis window scaled to Q31 fixed point
    pub static ref ENWINDOW: [i32; 512] = {
        let mut window = [0i32; 512];
        for (fixed, coeff) in window.iter_mut().zip(ANALYSIS_WINDOW.iter()) {
            *fixed = (coeff * 0x7fffffff as f64) as i32;
        }
        window
    };
}

/// One Huffman code book
#[derive(Debug, Clone, Copy)]
pub struct HuffmanTable {
    /// Number of values per coordinate (largest codable value + 1)
    pub xlen: u32,
    pub ylen: u32,
    /// Escape bits appended for values of 15 and above
    pub linbits: u32,
    /// Largest value the escape bits can carry
    pub linmax: u32,
    pub codes: &'static [u16],
    pub lengths: &'static [u8],
}

impl HuffmanTable {
    const fn plain(len: u32, codes: &'static [u16], lengths: &'static [u8]) -> Self {
        Self {
            xlen: len,
            ylen: len,
            linbits: 0,
            linmax: 0,
            codes,
            lengths,
        }
    }

    const fn escaped(linbits: u32, codes: &'static [u16], lengths: &'static [u8]) -> Self {
        Self {
            xlen: 16,
            ylen: 16,
            linbits,
            linmax: (1 << linbits) - 1,
            codes,
            lengths,
        }
    }
}

#[rustfmt::skip]
const T1_CODES: [u16; 4] = [
    1, 1,
    1, 0,
];

#[rustfmt::skip]
const T1_LENGTHS: [u8; 4] = [
    1, 3,
    2, 3,
];

#[rustfmt::skip]
const T2_CODES: [u16; 9] = [
    1, 2, 1,
    3, 1, 1,
    3, 2, 0,
];

#[rustfmt::skip]
const T2_LENGTHS: [u8; 9] = [
    1, 3, 6,
    3, 3, 5,
    5, 5, 6,
];

#[rustfmt::skip]
const T3_CODES: [u16; 9] = [
    3, 2, 1,
    1, 1, 1,
    3, 2, 0,
];

#[rustfmt::skip]
const T3_LENGTHS: [u8; 9] = [
    2, 2, 6,
    3, 2, 5,
    5, 5, 6,
];

#[rustfmt::skip]
const T5_CODES: [u16; 16] = [
    1, 2, 6, 5,
    3, 1, 4, 4,
    7, 5, 7, 1,
    6, 1, 1, 0,
];

#[rustfmt::skip]
const T5_LENGTHS: [u8; 16] = [
    1, 3, 6, 7,
    3, 3, 6, 7,
    6, 6, 7, 8,
    7, 6, 7, 8,
];

#[rustfmt::skip]
const T6_CODES: [u16; 16] = [
    7, 3, 5, 1,
    6, 2, 3, 2,
    5, 4, 4, 1,
    3, 3, 2, 0,
];

#[rustfmt::skip]
const T6_LENGTHS: [u8; 16] = [
    3, 3, 5, 7,
    3, 2, 4, 5,
    4, 4, 5, 6,
    6, 5, 6, 7,
];

#[rustfmt::skip]
const T7_CODES: [u16; 36] = [
    1, 2, 10, 19, 16, 10,
    3, 3, 7, 10, 5, 3,
    11, 4, 13, 17, 8, 4,
    12, 11, 18, 15, 11, 2,
    7, 6, 9, 14, 3, 1,
    6, 4, 5, 3, 2, 0,
];

#[rustfmt::skip]
const T7_LENGTHS: [u8; 36] = [
    1, 3, 6, 8, 8, 9,
    3, 4, 6, 7, 7, 8,
    6, 5, 7, 8, 8, 9,
    7, 7, 8, 9, 9, 9,
    7, 7, 8, 9, 9, 10,
    8, 8, 9, 10, 10, 10,
];

#[rustfmt::skip]
const T8_CODES: [u16; 36] = [
    3, 4, 6, 18, 12, 5,
    5, 1, 2, 16, 9, 3,
    7, 3, 5, 14, 7, 3,
    19, 17, 15, 13, 10, 4,
    13, 5, 8, 11, 5, 1,
    12, 4, 4, 1, 1, 0,
];

#[rustfmt::skip]
const T8_LENGTHS: [u8; 36] = [
    2, 3, 6, 8, 8, 9,
    3, 2, 4, 8, 8, 8,
    6, 4, 6, 8, 8, 9,
    8, 8, 8, 9, 9, 10,
    8, 7, 8, 9, 10, 10,
    9, 8, 9, 9, 11, 11,
];

#[rustfmt::skip]
const T9_CODES: [u16; 36] = [
    7, 5, 9, 14, 15, 7,
    6, 4, 5, 5, 6, 7,
    7, 6, 8, 8, 8, 5,
    15, 6, 9, 10, 5, 1,
    11, 7, 9, 6, 4, 1,
    14, 4, 6, 2, 6, 0,
];

#[rustfmt::skip]
const T9_LENGTHS: [u8; 36] = [
    3, 3, 5, 6, 8, 9,
    3, 3, 4, 5, 6, 8,
    4, 4, 5, 6, 7, 8,
    6, 5, 6, 7, 7, 8,
    7, 6, 7, 7, 8, 9,
    8, 7, 8, 8, 9, 9,
];

#[rustfmt::skip]
const T10_CODES: [u16; 64] = [
    1, 2, 10, 23, 35, 30, 12, 17,
    3, 3, 8, 12, 18, 21, 12, 7,
    11, 9, 15, 21, 32, 40, 19, 6,
    14, 13, 22, 34, 46, 23, 18, 7,
    20, 19, 33, 47, 27, 22, 9, 3,
    31, 22, 41, 26, 21, 20, 5, 3,
    14, 13, 10, 11, 16, 6, 5, 1,
    9, 8, 7, 8, 4, 4, 2, 0,
];

#[rustfmt::skip]
const T10_LENGTHS: [u8; 64] = [
    1, 3, 6, 8, 9, 9, 9, 10,
    3, 4, 6, 7, 8, 9, 8, 8,
    6, 6, 7, 8, 9, 10, 9, 9,
    7, 7, 8, 9, 10, 10, 9, 10,
    8, 8, 9, 10, 10, 10, 10, 10,
    9, 9, 10, 10, 11, 11, 10, 11,
    8, 8, 9, 10, 10, 10, 11, 11,
    9, 8, 9, 10, 10, 11, 11, 11,
];

#[rustfmt::skip]
const T11_CODES: [u16; 64] = [
    3, 4, 10, 24, 34, 33, 21, 15,
    5, 3, 4, 10, 32, 17, 11, 10,
    11, 7, 13, 18, 30, 31, 20, 5,
    25, 11, 19, 59, 27, 18, 12, 5,
    35, 33, 31, 58, 30, 16, 7, 5,
    28, 26, 32, 19, 17, 15, 8, 14,
    14, 12, 9, 13, 14, 9, 4, 1,
    11, 4, 6, 6, 6, 3, 2, 0,
];

#[rustfmt::skip]
const T11_LENGTHS: [u8; 64] = [
    2, 3, 5, 7, 8, 9, 8, 9,
    3, 3, 4, 6, 8, 8, 7, 8,
    5, 5, 6, 7, 8, 9, 8, 8,
    7, 6, 7, 9, 8, 10, 8, 9,
    8, 8, 8, 9, 9, 10, 9, 10,
    8, 8, 9, 10, 10, 11, 10, 11,
    8, 7, 7, 8, 9, 10, 10, 10,
    8, 7, 8, 9, 10, 10, 10, 10,
];

#[rustfmt::skip]
const T12_CODES: [u16; 64] = [
    9, 6, 16, 33, 41, 39, 38, 26,
    7, 5, 6, 9, 23, 16, 26, 11,
    17, 7, 11, 14, 21, 30, 10, 7,
    17, 10, 15, 12, 18, 28, 14, 5,
    32, 13, 22, 19, 18, 16, 9, 5,
    40, 17, 31, 29, 17, 13, 4, 2,
    27, 12, 11, 15, 10, 7, 4, 1,
    27, 12, 8, 12, 6, 3, 1, 0,
];

#[rustfmt::skip]
const T12_LENGTHS: [u8; 64] = [
    4, 3, 5, 7, 8, 9, 9, 9,
    3, 3, 4, 5, 7, 7, 8, 8,
    5, 4, 5, 6, 7, 8, 7, 8,
    6, 5, 6, 6, 7, 8, 8, 8,
    7, 6, 7, 7, 8, 8, 8, 9,
    8, 7, 8, 8, 8, 9, 8, 9,
    8, 7, 7, 8, 8, 9, 9, 10,
    9, 8, 8, 9, 9, 9, 9, 10,
];

#[rustfmt::skip]
const T13_CODES: [u16; 256] = [
    1, 5, 14, 21, 34, 51, 46, 71, 42, 52, 68, 52, 67, 44, 43, 19,
    3, 4, 12, 19, 31, 26, 44, 33, 31, 24, 32, 24, 31, 35, 22, 14,
    15, 13, 23, 36, 59, 49, 77, 65, 29, 40, 30, 40, 27, 33, 42, 16,
    22, 20, 37, 61, 56, 79, 73, 64, 43, 76, 56, 37, 26, 31, 25, 14,
    35, 16, 60, 57, 97, 75, 114, 91, 54, 73, 55, 41, 48, 53, 23, 24,
    58, 27, 50, 96, 76, 70, 93, 84, 77, 58, 79, 29, 74, 49, 41, 17,
    47, 45, 78, 74, 115, 94, 90, 79, 69, 83, 71, 50, 59, 38, 36, 15,
    72, 34, 56, 95, 92, 85, 91, 90, 86, 73, 77, 65, 51, 44, 43, 42,
    43, 20, 30, 44, 55, 78, 72, 87, 78, 61, 46, 54, 37, 30, 20, 16,
    53, 25, 41, 37, 44, 59, 54, 81, 66, 76, 57, 54, 37, 18, 39, 11,
    35, 33, 31, 57, 42, 82, 72, 80, 47, 58, 55, 21, 22, 26, 38, 22,
    53, 25, 23, 38, 70, 60, 51, 36, 55, 26, 34, 23, 27, 14, 9, 7,
    34, 32, 28, 39, 49, 75, 30, 52, 48, 40, 52, 28, 18, 17, 9, 5,
    45, 21, 34, 64, 56, 50, 49, 45, 31, 19, 12, 15, 10, 7, 6, 3,
    48, 23, 20, 39, 36, 35, 53, 21, 16, 23, 13, 10, 6, 1, 4, 2,
    16, 15, 17, 27, 25, 20, 29, 11, 17, 12, 16, 8, 1, 1, 0, 1,
];

#[rustfmt::skip]
const T13_LENGTHS: [u8; 256] = [
    1, 4, 6, 7, 8, 9, 9, 10, 9, 10, 11, 11, 12, 12, 13, 13,
    3, 4, 6, 7, 8, 8, 9, 9, 9, 9, 10, 10, 11, 12, 12, 12,
    6, 6, 7, 8, 9, 9, 10, 10, 9, 10, 10, 11, 11, 12, 13, 13,
    7, 7, 8, 9, 9, 10, 10, 10, 10, 11, 11, 11, 11, 12, 13, 13,
    8, 7, 9, 9, 10, 10, 11, 11, 10, 11, 11, 12, 12, 13, 13, 14,
    9, 8, 9, 10, 10, 10, 11, 11, 11, 11, 12, 11, 13, 13, 14, 14,
    9, 9, 10, 10, 11, 11, 11, 11, 11, 12, 12, 12, 13, 13, 14, 14,
    10, 9, 10, 11, 11, 11, 12, 12, 12, 12, 13, 13, 13, 14, 16, 16,
    9, 8, 9, 10, 10, 11, 11, 12, 12, 12, 12, 13, 13, 14, 15, 15,
    10, 9, 10, 10, 11, 11, 11, 13, 12, 13, 13, 14, 14, 14, 16, 15,
    10, 10, 10, 11, 11, 12, 12, 13, 12, 13, 14, 13, 14, 15, 16, 17,
    11, 10, 10, 11, 12, 12, 12, 12, 13, 13, 13, 14, 15, 15, 15, 16,
    11, 11, 11, 12, 12, 13, 12, 13, 14, 14, 15, 15, 15, 16, 16, 16,
    12, 11, 12, 13, 13, 13, 14, 14, 14, 14, 14, 15, 16, 15, 16, 16,
    13, 12, 12, 13, 13, 13, 15, 14, 14, 17, 15, 15, 15, 17, 16, 16,
    12, 12, 13, 14, 14, 14, 15, 14, 15, 15, 16, 16, 19, 18, 19, 16,
];

#[rustfmt::skip]
const T15_CODES: [u16; 256] = [
    7, 12, 18, 53, 47, 76, 124, 108, 89, 123, 108, 119, 107, 81, 122, 63,
    13, 5, 16, 27, 46, 36, 61, 51, 42, 70, 52, 83, 65, 41, 59, 36,
    19, 17, 15, 24, 41, 34, 59, 48, 40, 64, 50, 78, 62, 80, 56, 33,
    29, 28, 25, 43, 39, 63, 55, 93, 76, 59, 93, 72, 54, 75, 50, 29,
    52, 22, 42, 40, 67, 57, 95, 79, 72, 57, 89, 69, 49, 66, 46, 27,
    77, 37, 35, 66, 58, 52, 91, 74, 62, 48, 79, 63, 90, 62, 40, 38,
    125, 32, 60, 56, 50, 92, 78, 65, 55, 87, 71, 51, 73, 51, 70, 30,
    109, 53, 49, 94, 88, 75, 66, 122, 91, 73, 56, 42, 64, 44, 21, 25,
    90, 43, 41, 77, 73, 63, 56, 92, 77, 66, 47, 67, 48, 53, 36, 20,
    71, 34, 67, 60, 58, 49, 88, 76, 67, 106, 71, 54, 38, 39, 23, 15,
    109, 53, 51, 47, 90, 82, 58, 57, 48, 72, 57, 41, 23, 27, 62, 9,
    86, 42, 40, 37, 70, 64, 52, 43, 70, 55, 42, 25, 29, 18, 11, 11,
    118, 68, 30, 55, 50, 46, 74, 65, 49, 39, 24, 16, 22, 13, 14, 7,
    91, 44, 39, 38, 34, 63, 52, 45, 31, 52, 28, 19, 14, 8, 9, 3,
    123, 60, 58, 53, 47, 43, 32, 22, 37, 24, 17, 12, 15, 10, 2, 1,
    71, 37, 34, 30, 28, 20, 17, 26, 21, 16, 10, 6, 8, 6, 2, 0,
];

#[rustfmt::skip]
const T15_LENGTHS: [u8; 256] = [
    3, 4, 5, 7, 7, 8, 9, 9, 9, 10, 10, 11, 11, 11, 12, 13,
    4, 3, 5, 6, 7, 7, 8, 8, 8, 9, 9, 10, 10, 10, 11, 11,
    5, 5, 5, 6, 7, 7, 8, 8, 8, 9, 9, 10, 10, 11, 11, 11,
    6, 6, 6, 7, 7, 8, 8, 9, 9, 9, 10, 10, 10, 11, 11, 11,
    7, 6, 7, 7, 8, 8, 9, 9, 9, 9, 10, 10, 10, 11, 11, 11,
    8, 7, 7, 8, 8, 8, 9, 9, 9, 9, 10, 10, 11, 11, 11, 12,
    9, 7, 8, 8, 8, 9, 9, 9, 9, 10, 10, 10, 11, 11, 12, 12,
    9, 8, 8, 9, 9, 9, 9, 10, 10, 10, 10, 10, 11, 11, 11, 12,
    9, 8, 8, 9, 9, 9, 9, 10, 10, 10, 10, 11, 11, 12, 12, 12,
    9, 8, 9, 9, 9, 9, 10, 10, 10, 11, 11, 11, 11, 12, 12, 12,
    10, 9, 9, 9, 10, 10, 10, 10, 10, 11, 11, 11, 11, 12, 13, 12,
    10, 9, 9, 9, 10, 10, 10, 10, 11, 11, 11, 11, 12, 12, 12, 13,
    11, 10, 9, 10, 10, 10, 11, 11, 11, 11, 11, 11, 12, 12, 13, 13,
    11, 10, 10, 10, 10, 11, 11, 11, 11, 12, 12, 12, 12, 12, 13, 13,
    12, 11, 11, 11, 11, 11, 11, 11, 12, 12, 12, 12, 13, 13, 12, 13,
    12, 11, 11, 11, 11, 11, 11, 12, 12, 12, 12, 12, 13, 13, 13, 13,
];

#[rustfmt::skip]
const T16_CODES: [u16; 256] = [
    1, 5, 14, 44, 74, 63, 110, 93, 172, 149, 138, 242, 225, 195, 376, 17,
    3, 4, 12, 20, 35, 62, 53, 47, 83, 75, 68, 119, 201, 107, 207, 9,
    15, 13, 23, 38, 67, 58, 103, 90, 161, 72, 127, 117, 110, 209, 206, 16,
    45, 21, 39, 69, 64, 114, 99, 87, 158, 140, 252, 212, 199, 387, 365, 26,
    75, 36, 68, 65, 115, 101, 179, 164, 155, 264, 246, 226, 395, 382, 362, 9,
    66, 30, 59, 56, 102, 185, 173, 265, 142, 253, 232, 400, 388, 378, 445, 16,
    111, 54, 52, 100, 184, 178, 160, 133, 257, 244, 228, 217, 385, 366, 715, 10,
    98, 48, 91, 88, 165, 157, 148, 261, 248, 407, 397, 372, 380, 889, 884, 8,
    85, 84, 81, 159, 156, 143, 260, 249, 427, 401, 392, 383, 727, 713, 708, 7,
    154, 76, 73, 141, 131, 256, 245, 426, 406, 394, 384, 735, 359, 710, 352, 11,
    139, 129, 67, 125, 247, 233, 229, 219, 393, 743, 737, 720, 885, 882, 439, 4,
    243, 120, 118, 115, 227, 223, 396, 746, 742, 736, 721, 712, 706, 223, 436, 6,
    202, 224, 222, 218, 216, 389, 386, 381, 364, 888, 443, 707, 440, 437, 1728, 4,
    747, 211, 210, 208, 370, 379, 734, 723, 714, 1735, 883, 877, 876, 3459, 865, 2,
    377, 369, 102, 187, 726, 722, 358, 711, 709, 866, 1734, 871, 3458, 870, 434, 0,
    12, 10, 7, 11, 10, 17, 11, 9, 13, 12, 10, 7, 5, 3, 1, 3,
];

#[rustfmt::skip]
const T16_LENGTHS: [u8; 256] = [
    1, 4, 6, 8, 9, 9, 10, 10, 11, 11, 11, 12, 12, 12, 13, 9,
    3, 4, 6, 7, 8, 9, 9, 9, 10, 10, 10, 11, 12, 11, 12, 8,
    6, 6, 7, 8, 9, 9, 10, 10, 11, 10, 11, 11, 11, 12, 12, 9,
    8, 7, 8, 9, 9, 10, 10, 10, 11, 11, 12, 12, 12, 13, 13, 10,
    9, 8, 9, 9, 10, 10, 11, 11, 11, 12, 12, 12, 13, 13, 13, 9,
    9, 8, 9, 9, 10, 11, 11, 12, 11, 12, 12, 13, 13, 13, 14, 10,
    10, 9, 9, 10, 11, 11, 11, 11, 12, 12, 12, 12, 13, 13, 14, 10,
    10, 9, 10, 10, 11, 11, 11, 12, 12, 13, 13, 13, 13, 15, 15, 10,
    10, 10, 10, 11, 11, 11, 12, 12, 13, 13, 13, 13, 14, 14, 14, 10,
    11, 10, 10, 11, 11, 12, 12, 13, 13, 13, 13, 14, 13, 14, 13, 11,
    11, 11, 10, 11, 12, 12, 12, 12, 13, 14, 14, 14, 15, 15, 14, 10,
    12, 11, 11, 11, 12, 12, 13, 14, 14, 14, 14, 14, 14, 13, 14, 11,
    12, 12, 12, 12, 12, 13, 13, 13, 13, 15, 14, 14, 14, 14, 16, 11,
    14, 12, 12, 12, 13, 13, 14, 14, 14, 16, 15, 15, 15, 17, 15, 11,
    13, 13, 11, 12, 14, 14, 13, 14, 14, 15, 16, 15, 17, 15, 14, 11,
    9, 8, 8, 9, 9, 10, 10, 10, 11, 11, 11, 11, 11, 11, 11, 8,
];

#[rustfmt::skip]
const T24_CODES: [u16; 256] = [
    15, 13, 46, 80, 146, 262, 248, 434, 426, 669, 653, 649, 621, 517, 1032, 88,
    14, 12, 21, 38, 71, 130, 122, 216, 209, 198, 327, 345, 319, 297, 279, 42,
    47, 22, 41, 74, 68, 128, 120, 221, 207, 194, 182, 340, 315, 295, 541, 18,
    81, 39, 75, 70, 134, 125, 116, 220, 204, 190, 178, 325, 311, 293, 271, 16,
    147, 72, 69, 135, 127, 118, 112, 210, 200, 188, 352, 323, 306, 285, 540, 14,
    263, 66, 129, 126, 119, 114, 214, 202, 192, 180, 341, 317, 301, 281, 262, 12,
    249, 123, 121, 117, 113, 215, 206, 195, 185, 347, 330, 308, 291, 272, 520, 10,
    435, 115, 111, 109, 211, 203, 196, 187, 353, 332, 313, 298, 283, 531, 381, 17,
    427, 212, 208, 205, 201, 193, 186, 177, 169, 320, 303, 286, 268, 514, 377, 16,
    335, 199, 197, 191, 189, 181, 174, 333, 321, 305, 289, 275, 521, 379, 371, 11,
    668, 184, 183, 179, 175, 344, 331, 314, 304, 290, 277, 530, 383, 373, 366, 10,
    652, 346, 171, 168, 164, 318, 309, 299, 287, 276, 263, 513, 375, 368, 362, 6,
    648, 322, 316, 312, 307, 302, 292, 284, 269, 261, 512, 376, 370, 364, 359, 4,
    620, 300, 296, 294, 288, 282, 273, 266, 515, 380, 374, 369, 365, 361, 357, 2,
    1033, 280, 278, 274, 267, 264, 259, 382, 378, 372, 367, 363, 360, 358, 356, 0,
    43, 20, 19, 17, 15, 13, 11, 9, 7, 6, 4, 7, 5, 3, 1, 3,
];

#[rustfmt::skip]
const T24_LENGTHS: [u8; 256] = [
    4, 4, 6, 7, 8, 9, 9, 10, 10, 11, 11, 11, 11, 11, 12, 9,
    4, 4, 5, 6, 7, 8, 8, 9, 9, 9, 10, 10, 10, 10, 10, 8,
    6, 5, 6, 7, 7, 8, 8, 9, 9, 9, 9, 10, 10, 10, 11, 7,
    7, 6, 7, 7, 8, 8, 8, 9, 9, 9, 9, 10, 10, 10, 10, 7,
    8, 7, 7, 8, 8, 8, 8, 9, 9, 9, 10, 10, 10, 10, 11, 7,
    9, 7, 8, 8, 8, 8, 9, 9, 9, 9, 10, 10, 10, 10, 10, 7,
    9, 8, 8, 8, 8, 9, 9, 9, 9, 10, 10, 10, 10, 10, 11, 7,
    10, 8, 8, 8, 9, 9, 9, 9, 10, 10, 10, 10, 10, 11, 11, 8,
    10, 9, 9, 9, 9, 9, 9, 9, 9, 10, 10, 10, 10, 11, 11, 8,
    10, 9, 9, 9, 9, 9, 9, 10, 10, 10, 10, 10, 11, 11, 11, 8,
    11, 9, 9, 9, 9, 10, 10, 10, 10, 10, 10, 11, 11, 11, 11, 8,
    11, 10, 9, 9, 9, 10, 10, 10, 10, 10, 10, 11, 11, 11, 11, 8,
    11, 10, 10, 10, 10, 10, 10, 10, 10, 10, 11, 11, 11, 11, 11, 8,
    11, 10, 10, 10, 10, 10, 10, 10, 11, 11, 11, 11, 11, 11, 11, 8,
    12, 10, 10, 10, 10, 10, 10, 11, 11, 11, 11, 11, 11, 11, 11, 8,
    8, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 8, 8, 8, 8, 4,
];

#[rustfmt::skip]
const T32_CODES: [u16; 16] = [
    1, 5, 4, 5, 6, 5, 4, 4, 7, 3, 6, 0, 7, 2, 3, 1,
];

#[rustfmt::skip]
const T32_LENGTHS: [u8; 16] = [
    1, 4, 4, 5, 4, 6, 5, 6, 4, 5, 5, 6, 5, 6, 6, 6,
];

#[rustfmt::skip]
const T33_CODES: [u16; 16] = [
    15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0,
];

#[rustfmt::skip]
const T33_LENGTHS: [u8; 16] = [
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
];

/// Big-value code books by `table_select`; 0 codes nothing, 4 and 14 are unused
pub static HUFFMAN_TABLES: [Option<HuffmanTable>; 32] = [
    None,
    Some(HuffmanTable::plain(2, &T1_CODES, &T1_LENGTHS)),
    Some(HuffmanTable::plain(3, &T2_CODES, &T2_LENGTHS)),
    Some(HuffmanTable::plain(3, &T3_CODES, &T3_LENGTHS)),
    None,
    Some(HuffmanTable::plain(4, &T5_CODES, &T5_LENGTHS)),
    Some(HuffmanTable::plain(4, &T6_CODES, &T6_LENGTHS)),
    Some(HuffmanTable::plain(6, &T7_CODES, &T7_LENGTHS)),
    Some(HuffmanTable::plain(6, &T8_CODES, &T8_LENGTHS)),
    Some(HuffmanTable::plain(6, &T9_CODES, &T9_LENGTHS)),
    Some(HuffmanTable::plain(8, &T10_CODES, &T10_LENGTHS)),
    Some(HuffmanTable::plain(8, &T11_CODES, &T11_LENGTHS)),
    Some(HuffmanTable::plain(8, &T12_CODES, &T12_LENGTHS)),
    Some(HuffmanTable::plain(16, &T13_CODES, &T13_LENGTHS)),
    None,
    Some(HuffmanTable::plain(16, &T15_CODES, &T15_LENGTHS)),
    Some(HuffmanTable::escaped(1, &T16_CODES, &T16_LENGTHS)),
    Some(HuffmanTable::escaped(2, &T16_CODES, &T16_LENGTHS)),
    Some(HuffmanTable::escaped(3, &T16_CODES, &T16_LENGTHS)),
    Some(HuffmanTable::escaped(4, &T16_CODES, &T16_LENGTHS)),
    Some(HuffmanTable::escaped(6, &T16_CODES, &T16_LENGTHS)),
    Some(HuffmanTable::escaped(8, &T16_CODES, &T16_LENGTHS)),
    Some(HuffmanTable::escaped(10, &T16_CODES, &T16_LENGTHS)),
    Some(HuffmanTable::escaped(13, &T16_CODES, &T16_LENGTHS)),
    Some(HuffmanTable::escaped(4, &T24_CODES, &T24_LENGTHS)),
    Some(HuffmanTable::escaped(5, &T24_CODES, &T24_LENGTHS)),
    Some(HuffmanTable::escaped(6, &T24_CODES, &T24_LENGTHS)),
    Some(HuffmanTable::escaped(7, &T24_CODES, &T24_LENGTHS)),
    Some(HuffmanTable::escaped(8, &T24_CODES, &T24_LENGTHS)),
    Some(HuffmanTable::escaped(9, &T24_CODES, &T24_LENGTHS)),
    Some(HuffmanTable::escaped(11, &T24_CODES, &T24_LENGTHS)),
    Some(HuffmanTable::escaped(13, &T24_CODES, &T24_LENGTHS)),
];

/// Count1 code books, table A then table B
pub static COUNT1_TABLES: [HuffmanTable; 2] = [
    HuffmanTable {
        xlen: 1,
        ylen: 16,
        linbits: 0,
        linmax: 0,
        codes: &T32_CODES,
        lengths: &T32_LENGTHS,
    },
    HuffmanTable {
        xlen: 1,
        ylen: 16,
        linbits: 0,
        linmax: 0,
        codes: &T33_CODES,
        lengths: &T33_LENGTHS,
    },
];
