//! The three call synthesizers: multi-chirp, descending whistle,
//! warbling trill.
//!
//! Each synthesizer draws its parameters from the supplied ranges,
//! renders through the `aviary-core` tone primitive, and returns one
//! bounded segment. All ranges are inclusive; a draw that would produce
//! a zero-length or non-positive-frequency tone is rejected and
//! re-drawn up to [`MAX_REDRAWS`] times rather than silently clamped.

use aviary_core::buffer::SampleBuffer;
use aviary_core::dsp::{lerp, TAU};
use aviary_core::envelope::apply_fade;
use aviary_core::osc::{generate_tone, overlay, ToneSpec};
use rand::Rng;

use crate::error::SynthError;
use crate::patterns::{CallKind, Pattern};

/// How many times a rejected draw is retried before the range is
/// declared degenerate.
pub const MAX_REDRAWS: u32 = 8;

/// Detune span for the chirp's second tone, ±15%.
const CHIRP_DETUNE: f32 = 0.15;
/// Overlay level for the detuned tone, dB below the base tone.
const CHIRP_OVERLAY_DB: f32 = -6.0;
/// Melodic drift span across a chirp sequence, ±30%.
const CHIRP_DRIFT: f32 = 0.3;
/// Inclusive silence range between chirps of one call, ms.
const CHIRP_GAP_MS: (f32, f32) = (30.0, 150.0);

/// A synthesized call tagged with the shape that produced it.
///
/// The tag is diagnostic only: the composer logs it and appends the
/// samples; nothing downstream branches on it.
#[derive(Clone, Debug)]
pub struct CallSegment {
    pub kind: CallKind,
    pub buffer: SampleBuffer,
}

/// Draw from an inclusive range, rejecting non-positive values.
///
/// Surfaces [`SynthError::DegenerateRange`] when the range is inverted,
/// can never yield a positive value, or keeps producing rejects after
/// [`MAX_REDRAWS`] attempts.
fn draw_positive<R: Rng>(
    rng: &mut R,
    what: &'static str,
    (lo, hi): (f32, f32),
) -> Result<f32, SynthError> {
    if lo.is_finite() && hi.is_finite() && lo <= hi && hi > 0.0 {
        for _ in 0..MAX_REDRAWS {
            let v = rng.gen_range(lo..=hi);
            if v > 0.0 {
                return Ok(v);
            }
        }
    }
    Err(SynthError::DegenerateRange { what, lo, hi })
}

/// One chirp: a base tone overlaid with a slightly detuned copy at
/// −6 dB for timbral richness, then a short fade at both ends.
fn chirp<R: Rng>(
    rng: &mut R,
    freq_hz: f32,
    duration_ms: f32,
    sample_rate: u32,
) -> Result<SampleBuffer, SynthError> {
    let base = generate_tone(ToneSpec::new(freq_hz, duration_ms), sample_rate)?;
    let detuned = freq_hz * (1.0 + rng.gen_range(-CHIRP_DETUNE..=CHIRP_DETUNE));
    let second = generate_tone(ToneSpec::new(detuned, duration_ms), sample_rate)?;
    let mut out = overlay(&base, &second, CHIRP_OVERLAY_DB);

    // 20 ms in / 50 ms out, shrunk for very short chirps
    let fade_in = 20.0_f32.min(duration_ms / 10.0);
    let fade_out = 50.0_f32.min(duration_ms / 5.0);
    apply_fade(&mut out, fade_in, fade_out);
    Ok(out)
}

/// A complete multi-chirp call: 2–6 chirps whose pitch drifts
/// melodically across the sequence, with 30–150 ms of air between all
/// but the last.
pub fn multi_chirp_call<R: Rng>(
    rng: &mut R,
    freq_hz: (f32, f32),
    chirp_ms: (f32, f32),
    sample_rate: u32,
) -> Result<SampleBuffer, SynthError> {
    let num_chirps: u32 = rng.gen_range(2..=6);
    let mut call = SampleBuffer::new(sample_rate);
    for i in 0..num_chirps {
        let drift = 1.0 + (i as f32 / num_chirps as f32) * rng.gen_range(-CHIRP_DRIFT..=CHIRP_DRIFT);
        let freq = draw_positive(rng, "chirp frequency", freq_hz)? * drift;
        let duration = draw_positive(rng, "chirp duration", chirp_ms)?;
        call.append(&chirp(rng, freq, duration, sample_rate)?);
        if i < num_chirps - 1 {
            call.extend_silence(rng.gen_range(CHIRP_GAP_MS.0..=CHIRP_GAP_MS.1));
        }
    }
    Ok(call)
}

/// A descending whistle: one smooth slide from a start pitch down to
/// 50–80% of it, rendered as ten contiguous held segments with a single
/// fade over the whole.
pub fn descending_whistle<R: Rng>(
    rng: &mut R,
    freq_hz: (f32, f32),
    duration_ms: f32,
    sample_rate: u32,
) -> Result<SampleBuffer, SynthError> {
    const SEGMENTS: usize = 10;
    let start = draw_positive(rng, "whistle frequency", freq_hz)?;
    let end = start * rng.gen_range(0.5..=0.8);

    let mut whistle = SampleBuffer::new(sample_rate);
    let seg_ms = duration_ms / SEGMENTS as f32;
    for i in 0..SEGMENTS {
        let t = i as f32 / SEGMENTS as f32;
        let freq = lerp(start, end, t);
        whistle.append(&generate_tone(ToneSpec::new(freq, seg_ms), sample_rate)?);
    }
    apply_fade(&mut whistle, 20.0, 50.0);
    Ok(whistle)
}

/// A warbling trill: twenty contiguous segments whose pitch swings ±20%
/// around the base in one sinusoidal cycle, simulating rapid vibrato.
pub fn warbling_trill(
    base_hz: f32,
    duration_ms: f32,
    sample_rate: u32,
) -> Result<SampleBuffer, SynthError> {
    const SEGMENTS: usize = 20;
    const DEPTH: f32 = 0.2;

    let mut trill = SampleBuffer::new(sample_rate);
    let seg_ms = duration_ms / SEGMENTS as f32;
    for i in 0..SEGMENTS {
        let swing = (i as f32 * TAU / SEGMENTS as f32).sin() * DEPTH;
        trill.append(&generate_tone(
            ToneSpec::new(base_hz * (1.0 + swing), seg_ms),
            sample_rate,
        )?);
    }
    apply_fade(&mut trill, 10.0, 30.0);
    Ok(trill)
}

/// Synthesize one call for `pattern`, drawing every free parameter from
/// the pattern's ranges.
pub fn synthesize_call<R: Rng>(
    rng: &mut R,
    pattern: &Pattern,
    sample_rate: u32,
) -> Result<CallSegment, SynthError> {
    let buffer = match pattern.kind {
        CallKind::MultiChirp => {
            multi_chirp_call(rng, pattern.freq_hz, pattern.call_ms, sample_rate)?
        }
        CallKind::DescendingWhistle => {
            let duration = draw_positive(rng, "whistle duration", pattern.call_ms)?;
            descending_whistle(rng, pattern.freq_hz, duration, sample_rate)?
        }
        CallKind::WarblingTrill => {
            let base = draw_positive(rng, "trill frequency", pattern.freq_hz)?;
            let duration = draw_positive(rng, "trill duration", pattern.call_ms)?;
            warbling_trill(base, duration, sample_rate)?
        }
    };
    Ok(CallSegment { kind: pattern.kind, buffer })
}

// ------------------------------------ Tests --------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use aviary_core::buffer::ms_to_samples;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn chirp_length_matches_requested_duration() {
        let mut r = rng();
        let buf = chirp(&mut r, 1_500.0, 120.0, 44_100).unwrap();
        assert_eq!(buf.len(), ms_to_samples(120.0, 44_100));
    }

    #[test]
    fn multi_chirp_call_is_bounded() {
        let mut r = rng();
        let buf = multi_chirp_call(&mut r, (800.0, 2_500.0), (80.0, 400.0), 44_100).unwrap();
        // at least 2 chirps of ≥80 ms, at most 6 of ≤400 ms plus 5 gaps of ≤150 ms
        assert!(buf.len() >= ms_to_samples(2.0 * 80.0 + 30.0, 44_100));
        assert!(buf.len() <= ms_to_samples(6.0 * 400.0 + 5.0 * 150.0, 44_100) + 6);
        assert!(buf.samples().iter().all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn whistle_segments_sum_within_rounding() {
        let mut r = rng();
        let buf = descending_whistle(&mut r, (1_500.0, 3_500.0), 300.0, 44_100).unwrap();
        // ten segments of round(30 ms) each; per-segment rounding is ±0.5 sample
        let expected = 10 * ms_to_samples(30.0, 44_100);
        assert!((buf.len() as i64 - expected as i64).abs() <= 10);
    }

    #[test]
    fn trill_is_contiguous_and_faded() {
        let buf = warbling_trill(2_000.0, 400.0, 44_100).unwrap();
        let expected = 20 * ms_to_samples(20.0, 44_100);
        assert!((buf.len() as i64 - expected as i64).abs() <= 20);
        // whole-call fade leaves the very first sample silent
        assert_eq!(buf.samples()[0], 0.0);
    }

    #[test]
    fn degenerate_frequency_range_is_reported() {
        let mut r = rng();
        let err = multi_chirp_call(&mut r, (0.0, 0.0), (80.0, 400.0), 44_100).unwrap_err();
        assert!(matches!(
            err,
            SynthError::DegenerateRange { what: "chirp frequency", .. }
        ));
    }

    #[test]
    fn inverted_range_is_reported() {
        let mut r = rng();
        let err = draw_positive(&mut r, "chirp duration", (400.0, 80.0)).unwrap_err();
        assert_eq!(
            err,
            SynthError::DegenerateRange { what: "chirp duration", lo: 400.0, hi: 80.0 }
        );
    }

    #[test]
    fn draw_positive_redraws_past_occasional_rejects() {
        // range straddling zero: negative draws are rejected, positive accepted
        let mut r = rng();
        for _ in 0..50 {
            if let Ok(v) = draw_positive(&mut r, "chirp frequency", (-1.0, 1_000.0)) {
                assert!(v > 0.0);
            }
        }
    }

    #[test]
    fn synthesize_call_tags_segments_with_their_kind() {
        let mut r = rng();
        for pattern in crate::patterns::default_patterns() {
            let segment = synthesize_call(&mut r, &pattern, 22_050).unwrap();
            assert_eq!(segment.kind, pattern.kind);
            assert!(!segment.buffer.is_empty());
        }
    }
}
