//! Amplitude envelopes: in-place linear fade ramps.
//!
//! One shaping operation covers every call the engine makes: a linear
//! fade-in over the head of a buffer and a linear fade-out over its
//! tail. No allocation, pure in-place scaling.

use crate::buffer::{ms_to_samples, SampleBuffer};

/// Apply a linear fade-in over the first `fade_in_ms` and a linear
/// fade-out over the last `fade_out_ms`, in place.
///
/// When the two fades together would outlast the buffer, both are
/// scaled by `buffer_ms / (fade_in + fade_out)` so the ramps partition
/// the buffer instead of fighting over the middle; a short segment can
/// never end up with a negative-length sustain. Negative fade requests
/// clamp to zero.
pub fn apply_fade(buf: &mut SampleBuffer, fade_in_ms: f32, fade_out_ms: f32) {
    if buf.is_empty() {
        return;
    }
    let mut fade_in = fade_in_ms.max(0.0);
    let mut fade_out = fade_out_ms.max(0.0);
    let requested = fade_in + fade_out;
    if requested <= 0.0 {
        return;
    }

    let buf_ms = buf.duration_ms();
    if requested > buf_ms {
        let scale = buf_ms / requested;
        fade_in *= scale;
        fade_out *= scale;
    }

    let sample_rate = buf.sample_rate();
    let len = buf.len();
    let n_in = ms_to_samples(fade_in, sample_rate).min(len);
    let n_out = ms_to_samples(fade_out, sample_rate).min(len);
    let samples = buf.samples_mut();

    for i in 0..n_in {
        samples[i] *= i as f32 / n_in as f32;
    }
    for i in 0..n_out {
        let idx = len - n_out + i;
        samples[idx] *= (n_out - i) as f32 / n_out as f32;
    }
}

// ------------------------------------ Tests --------------------------------------
