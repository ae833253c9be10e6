//! Engine constants and per-channel analysis state
//!
//! Constants match shine's `types.h`; the state structs hold everything the
//! analysis stages carry from one granule to the next.

pub const GRANULE_SIZE: usize = 576;
pub const HAN_SIZE: usize = 512;
pub const SBLIMIT: usize = 32;
pub const MAX_CHANNELS: usize = 2;
pub const MAX_GRANULES: usize = 2;

/// Subband samples of one granule: 18 time slots of 32 bands
pub type SubbandGranule = [[i32; SBLIMIT]; 18];

/// Polyphase filterbank state
#[derive(Debug)]
pub struct Subband {
    /// Write offset into each channel's circular window buffer
    pub off: [usize; MAX_CHANNELS],
    /// Cosine modulation matrix in Q31
    pub fl: [[i32; 64]; SBLIMIT],
    /// Circular input history per channel
    pub x: Box<[[i32; HAN_SIZE]; MAX_CHANNELS]>,
}

impl Default for Subband {
    fn default() -> Self {
        Self {
            off: [0; MAX_CHANNELS],
            fl: [[0; 64]; SBLIMIT],
            x: Box::new([[0; HAN_SIZE]; MAX_CHANNELS]),
        }
    }
}

/// MDCT state
#[derive(Debug)]
pub struct Mdct {
    /// Sine window folded into the MDCT cosine table, Q31
    pub cos_l: [[i32; 36]; 18],
    /// Subband samples of the previous granule per channel
    pub prev: Box<[SubbandGranule; MAX_CHANNELS]>,
}

impl Default for Mdct {
    fn default() -> Self {
        Self {
            cos_l: [[0; 36]; 18],
            prev: Box::new([[[0; SBLIMIT]; 18]; MAX_CHANNELS]),
        }
    }
}

/// Coded result for one granule of one channel
///
/// Field names follow the side information syntax of ISO 11172-3.
#[derive(Debug, Clone)]
pub struct GranuleInfo {
    /// Main data bits for this granule, stuffing included
    pub part2_3_length: u32,
    /// Pairs coded with the big-value tables
    pub big_values: u32,
    /// Quadruples coded with a count1 table
    pub count1: u32,
    pub global_gain: u32,
    pub table_select: [u32; 3],
    pub region0_count: u32,
    pub region1_count: u32,
    /// 0 for table A, 1 for table B
    pub count1table_select: u32,
    /// Region boundaries in lines
    pub address1: u32,
    pub address2: u32,
    pub address3: u32,
    pub quantizer_step_size: i32,
    /// Quantized spectrum
    pub ix: [i32; GRANULE_SIZE],
}

impl Default for GranuleInfo {
    fn default() -> Self {
        Self {
            part2_3_length: 0,
            big_values: 0,
            count1: 0,
            global_gain: 0,
            table_select: [0; 3],
            region0_count: 0,
            region1_count: 0,
            count1table_select: 0,
            address1: 0,
            address2: 0,
            address3: 0,
            quantizer_step_size: 0,
            ix: [0; GRANULE_SIZE],
        }
    }
}
