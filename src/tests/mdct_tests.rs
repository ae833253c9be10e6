//! Unit tests for the filterbank and MDCT

use crate::mdct::*;
use crate::subband::*;
use crate::types::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis_state() -> (Subband, Mdct) {
        let mut subband = Subband::default();
        subband_initialise(&mut subband);
        let mut mdct = Mdct::default();
        mdct_initialise(&mut mdct);
        (subband, mdct)
    }

    fn sine(freq: f64, rate: f64, amplitude: f64, len: usize) -> Vec<i32> {
        (0..len)
            .map(|n| (amplitude * (2.0 * std::f64::consts::PI * freq * n as f64 / rate).sin()) as i32)
            .collect()
    }

    fn energy(lines: &[i32]) -> f64 {
        lines.iter().map(|&v| (v as f64) * (v as f64)).sum()
    }

    #[test]
    fn test_mul_keeps_high_word() {
        assert_eq!(mul(0x4000_0000, 0x4000_0000), 0x1000_0000);
        assert_eq!(mul(-0x4000_0000, 0x4000_0000), -0x1000_0000);
        assert_eq!(mul(0, i32::MAX), 0);
    }

    #[test]
    fn test_silence_stays_silent() {
        let (mut subband, mut mdct) = analysis_state();
        let pcm = [0i32; GRANULE_SIZE];
        let mut xr = [1i32; GRANULE_SIZE];

        for _ in 0..3 {
            mdct_granule(&pcm, 0, &mut subband, &mut mdct, &mut xr);
            assert!(xr.iter().all(|&v| v == 0));
        }
    }

    #[test]
    fn test_low_tone_lands_in_low_lines() {
        let (mut subband, mut mdct) = analysis_state();
        let pcm = sine(1000.0, 44100.0, (1u32 << 30) as f64, 3 * GRANULE_SIZE);
        let mut xr = [0i32; GRANULE_SIZE];

        for granule in pcm.chunks(GRANULE_SIZE) {
            mdct_granule(granule, 0, &mut subband, &mut mdct, &mut xr);
        }

        let low = energy(&xr[..72]);
        let high = energy(&xr[288..]);
        assert!(low > 0.0, "tone must produce output");
        assert!(low > 100.0 * high, "low {} vs high {}", low, high);
    }

    #[test]
    fn test_channels_are_independent() {
        let (mut subband, mut mdct) = analysis_state();
        let loud = sine(440.0, 44100.0, (1u32 << 30) as f64, GRANULE_SIZE);
        let quiet = [0i32; GRANULE_SIZE];
        let mut xr = [0i32; GRANULE_SIZE];

        mdct_granule(&loud, 0, &mut subband, &mut mdct, &mut xr);
        mdct_granule(&quiet, 1, &mut subband, &mut mdct, &mut xr);

        assert!(xr.iter().all(|&v| v == 0), "channel 1 history is untouched");
    }
}

