//! MDCT analysis with aliasing reduction
//!
//! Runs the polyphase filterbank over a granule, transforms each subband's
//! 36-sample overlapped block into 18 frequency lines and applies the
//! aliasing-reduction butterflies, following shine's `l3mdct.c`.

use std::f64::consts::PI;

use lazy_static::lazy_static;

use crate::subband::{mul, window_filter_subband};
use crate::types::{Mdct, Subband, SubbandGranule, GRANULE_SIZE, SBLIMIT};

/// Aliasing-reduction coefficients, ISO 11172-3 table B.9
const ALIAS_COEFFS: [f64; 8] = [-0.6, -0.535, -0.33, -0.185, -0.095, -0.041, -0.0142, -0.0037];

lazy_static! {
    /// `(cs, ca)` butterfly pairs in Q31
    static ref BUTTERFLIES: [(i32, i32); 8] = {
        let mut pairs = [(0, 0); 8];
        for (pair, &coef) in pairs.iter_mut().zip(ALIAS_COEFFS.iter()) {
            let norm = (1.0 + coef * coef).sqrt();
            *pair = (
                (1.0 / norm * 0x7fffffff as f64) as i32,
                (coef / norm * 0x7fffffff as f64) as i32,
            );
        }
        pairs
    };
}

/// Complex multiply in Q31
#[inline]
fn cmuls(are: i32, aim: i32, bre: i32, bim: i32) -> (i32, i32) {
    let re = ((are as i64 * bre as i64 - aim as i64 * bim as i64) >> 31) as i32;
    let im = ((are as i64 * bim as i64 + aim as i64 * bre as i64) >> 31) as i32;
    (re, im)
}

/// Prepare the windowed MDCT cosine table and clear the overlap state
pub fn mdct_initialise(mdct: &mut Mdct) {
    for m in 0..18 {
        for k in 0..36 {
            mdct.cos_l[m][k] = ((PI / 36.0 * (k as f64 + 0.5)).sin()
                * (PI / 72.0 * (2 * k + 19) as f64 * (2 * m + 1) as f64).cos()
                * 0x7fffffff as f64) as i32;
        }
    }
    for granule in mdct.prev.iter_mut() {
        *granule = [[0; SBLIMIT]; 18];
    }
}

/// Transform one granule of channel `ch` into 576 frequency lines
///
/// `samples` holds exactly one granule of full-scale PCM.
pub fn mdct_granule(
    samples: &[i32],
    ch: usize,
    subband: &mut Subband,
    mdct: &mut Mdct,
    xr: &mut [i32; GRANULE_SIZE],
) {
    let mut current: SubbandGranule = [[0; SBLIMIT]; 18];

    for (k, chunk) in samples.chunks(32).take(18).enumerate() {
        window_filter_subband(chunk, &mut current[k], ch, subband);
        // compensate for the inversion in the analysis filter
        if k % 2 == 1 {
            for band in (1..SBLIMIT).step_by(2) {
                current[k][band] = current[k][band].wrapping_neg();
            }
        }
    }

    let prev = &mut mdct.prev[ch];
    let mut mdct_in = [0i32; 36];

    for band in 0..SBLIMIT {
        for k in 0..18 {
            mdct_in[k] = prev[k][band];
            mdct_in[k + 18] = current[k][band];
        }

        for m in 0..18 {
            xr[band * 18 + m] = mdct_in
                .iter()
                .zip(mdct.cos_l[m].iter())
                .fold(0i32, |acc, (&x, &c)| acc.wrapping_add(mul(x, c)));
        }

        if band != 0 {
            for (i, &(cs, ca)) in BUTTERFLIES.iter().enumerate() {
                let cur = band * 18 + i;
                let below = (band - 1) * 18 + 17 - i;
                let (re, im) = cmuls(xr[cur], xr[below], cs, ca);
                xr[cur] = re;
                xr[below] = im;
            }
        }
    }

    *prev = current;
}
