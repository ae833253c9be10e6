//! Subband analysis filterbank
//!
//! Polyphase filterbank turning 32 PCM samples into one sample for each of
//! the 32 subbands, in shine's fixed-point formulation (`l3subband.c`).

use std::f64::consts::PI;

use crate::tables::ENWINDOW;
use crate::types::{Subband, HAN_SIZE, SBLIMIT};

/// Q31 multiply keeping the high word
#[inline]
pub fn mul(a: i32, b: i32) -> i32 {
    ((a as i64 * b as i64) >> 32) as i32
}

#[inline]
fn muladd(acc: i32, a: i32, b: i32) -> i32 {
    acc.wrapping_add(mul(a, b))
}

/// Initialise the filterbank state and cosine modulation matrix
///
/// Coefficients are rounded to the 9th decimal place, the accuracy of the
/// ISO filterbank tables.
pub fn subband_initialise(subband: &mut Subband) {
    subband.off = [0; 2];
    for history in subband.x.iter_mut() {
        history.fill(0);
    }

    for i in 0..SBLIMIT {
        for j in 0..64 {
            let angle = (2 * i + 1) as f64 * (16 - j as i32) as f64 * (PI / 64.0);
            let filter = (1e9 * angle.cos()).round();
            subband.fl[i][j] = (filter * (0x7fffffff as f64 * 1e-9)) as i32;
        }
    }
}

/// Window and filter the next 32 samples of `samples` for channel `ch`
///
/// `samples` must hold at least 32 full-scale values; the result lands in
/// `s`, one value per subband.
pub fn window_filter_subband(
    samples: &[i32],
    s: &mut [i32; SBLIMIT],
    ch: usize,
    subband: &mut Subband,
) {
    let off = subband.off[ch];
    let history = &mut subband.x[ch];

    // newest sample goes to the lowest index
    for (i, &sample) in samples.iter().take(32).enumerate() {
        history[off + 31 - i] = sample;
    }

    let mut y = [0i32; 64];
    for (i, yi) in y.iter_mut().enumerate() {
        let mut acc = 0i32;
        for j in 0..8 {
            let idx = (off + i + (j << 6)) & (HAN_SIZE - 1);
            acc = muladd(acc, history[idx], ENWINDOW[i + (j << 6)]);
        }
        *yi = acc;
    }

    subband.off[ch] = (off + 480) & (HAN_SIZE - 1);

    for (i, out) in s.iter_mut().enumerate() {
        let row = &subband.fl[i];
        *out = row
            .iter()
            .zip(y.iter())
            .fold(0i32, |acc, (&f, &v)| muladd(acc, f, v));
    }
}
