//! Output level: peak scan and single-pass headroom normalization.

use crate::buffer::SampleBuffer;
use crate::dsp::db_to_lin;

/// Largest absolute sample value; 0.0 for an empty or silent buffer.
#[inline]
pub fn peak(buf: &SampleBuffer) -> f32 {
    buf.samples().iter().fold(0.0_f32, |m, s| m.max(s.abs()))
}

/// Scale the whole buffer so its peak lands exactly `headroom_db` below
/// full scale.
///
/// A silent buffer is left untouched: silence stays silence and nothing
/// divides by zero. One uniform gain over one full pass, not a
/// time-varying stage.
pub fn normalize(buf: &mut SampleBuffer, headroom_db: f32) {
    let p = peak(buf);
    if p <= 0.0 {
        return;
    }
    let gain = db_to_lin(-headroom_db) / p;
    for s in buf.samples_mut() {
        *s *= gain;
    }
}

// ------------------------------------ Tests --------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_finds_largest_magnitude() {
        let buf = SampleBuffer::from_samples(vec![0.1, -0.7, 0.3], 44_100);
        assert!((peak(&buf) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn normalize_hits_headroom_exactly() {
        let mut buf = SampleBuffer::from_samples(vec![0.05, -0.2, 0.1], 44_100);
        normalize(&mut buf, 1.0);
        let target = db_to_lin(-1.0); // ≈ 0.891
        assert!((peak(&buf) - target).abs() < 1e-6, "peak={}", peak(&buf));
    }

    #[test]
    fn normalize_can_attenuate_hot_buffers() {
        let mut buf = SampleBuffer::from_samples(vec![2.0, -1.5], 44_100);
        normalize(&mut buf, 1.0);
        assert!((peak(&buf) - db_to_lin(-1.0)).abs() < 1e-6);
    }

    #[test]
    fn silent_buffer_is_untouched() {
        let mut buf = SampleBuffer::silence(100.0, 44_100);
        normalize(&mut buf, 1.0);
        assert!(buf.samples().iter().all(|&s| s == 0.0));
    }
}
