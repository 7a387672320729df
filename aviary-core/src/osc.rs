//! The tone primitive: pure-sine rendering and sample-aligned overlay.
//!
//! Every call the engine composes bottoms out here. A [`ToneSpec`] is a
//! frequency/duration pair; [`generate_tone`] renders it as a sine at a
//! fixed −6 dB reference level, leaving headroom for the detune overlay
//! the chirp synthesizer mixes in. Sample rate is always an explicit
//! argument, never a process global.

use thiserror::Error;

use crate::buffer::{ms_to_samples, SampleBuffer};
use crate::dsp::{db_to_lin, fill_sine, TAU};

/// Reference level for a freshly generated tone, dB below full scale.
pub const TONE_LEVEL_DB: f32 = -6.0;

/// Errors from tone generation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ToneError {
    /// A frequency or duration that cannot produce a tone reached the
    /// oscillator. Not retried here; callers decide whether to re-draw.
    #[error("invalid tone: {freq_hz} Hz for {duration_ms} ms")]
    InvalidToneSpec { freq_hz: f32, duration_ms: f32 },
}

/// A pure tone request: frequency in Hz, duration in milliseconds.
/// Immutable once built; consumed by [`generate_tone`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ToneSpec {
    pub freq_hz: f32,
    pub duration_ms: f32,
}

impl ToneSpec {
    #[inline]
    pub fn new(freq_hz: f32, duration_ms: f32) -> Self {
        Self { freq_hz, duration_ms }
    }

    /// A tone is renderable when both fields are finite and positive.
    #[inline]
    pub fn validate(&self) -> Result<(), ToneError> {
        if self.freq_hz > 0.0
            && self.freq_hz.is_finite()
            && self.duration_ms > 0.0
            && self.duration_ms.is_finite()
        {
            Ok(())
        } else {
            Err(ToneError::InvalidToneSpec {
                freq_hz: self.freq_hz,
                duration_ms: self.duration_ms,
            })
        }
    }
}

/// Render `spec` as a sine at the −6 dB reference level.
///
/// The buffer holds `round(duration_ms * sample_rate / 1000)` samples of
/// `sin(2π · f · i / sample_rate)`.
pub fn generate_tone(spec: ToneSpec, sample_rate: u32) -> Result<SampleBuffer, ToneError> {
    spec.validate()?;
    let n = ms_to_samples(spec.duration_ms, sample_rate);
    let mut buf = SampleBuffer::from_samples(vec![0.0; n], sample_rate);
    let mut phase = 0.0_f32;
    let phase_inc = TAU * spec.freq_hz / sample_rate as f32;
    fill_sine(buf.samples_mut(), &mut phase, phase_inc, db_to_lin(TONE_LEVEL_DB));
    Ok(buf)
}

/// Sum `b` into `a` at `gain_b_db`, aligned at sample 0.
///
/// The shorter input is implicitly zero-padded; the result has the
/// length of the longer one. Both inputs must share a sample rate.
pub fn overlay(a: &SampleBuffer, b: &SampleBuffer, gain_b_db: f32) -> SampleBuffer {
    assert_eq!(
        a.sample_rate(),
        b.sample_rate(),
        "overlaying across sample rates"
    );
    let gain = db_to_lin(gain_b_db);
    let n = a.len().max(b.len());
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let xa = a.samples().get(i).copied().unwrap_or(0.0);
        let xb = b.samples().get(i).copied().unwrap_or(0.0);
        out.push(xa + xb * gain);
    }
    SampleBuffer::from_samples(out, a.sample_rate())
}

// ------------------------------------ Tests --------------------------------------
