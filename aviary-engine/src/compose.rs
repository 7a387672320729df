//! The timeline composer: weighted-random calls and silence, trimmed to
//! an exact length and normalized once.
//!
//! This is the engine's entry point. One run owns one growing timeline
//! buffer with a single writer, tracks its progress in samples, and
//! finishes in two steps: truncate to exactly the target sample count,
//! then a single peak-normalization pass.

use aviary_core::buffer::SampleBuffer;
use aviary_core::level::normalize;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::calls::synthesize_call;
use crate::error::SynthError;
use crate::patterns::{Pattern, PatternPicker};

/// Everything one generation run needs. Explicit configuration, no
/// process-wide tuning constants; ranges are inclusive and must be
/// ordered low-to-high.
#[derive(Clone, Debug)]
pub struct SoundscapeConfig {
    /// Target length of the finished track, seconds.
    pub duration_secs: u32,
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// dB below full scale for the final peak.
    pub headroom_db: f32,
    /// Fixed seed for reproducible output; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Silence between calls, ms.
    pub gap_ms: (f32, f32),
    /// Occasional longer pause, ms.
    pub long_pause_ms: (f32, f32),
    /// Chance of appending the longer pause after a call, in [0, 1].
    pub long_pause_chance: f64,
    /// Upper bound on synthesized calls per run; guards tables that
    /// never advance the timeline.
    pub max_calls: usize,
}

impl Default for SoundscapeConfig {
    fn default() -> Self {
        Self {
            duration_secs: 300,
            sample_rate: 44_100,
            headroom_db: 1.0,
            seed: None,
            gap_ms: (500.0, 3_000.0),
            long_pause_ms: (2_000.0, 5_000.0),
            long_pause_chance: 0.1,
            max_calls: 100_000,
        }
    }
}

/// Compose a full soundscape.
///
/// Accumulation: pick a pattern (weight-proportional), synthesize its
/// call, append it plus a randomized gap, until the tracked duration
/// reaches the target. Finalization: truncate to exactly
/// `duration_secs * sample_rate` samples (the loop only exits at or
/// past the target, so the buffer is never short) and normalize to the
/// configured headroom.
///
/// With `seed = Some(s)` two runs with identical parameters produce
/// byte-identical buffers; all randomness flows through one RNG.
pub fn synthesize_soundscape(
    config: &SoundscapeConfig,
    patterns: &[Pattern],
) -> Result<SampleBuffer, SynthError> {
    let picker = PatternPicker::new(patterns)?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let target_samples = config.duration_secs as usize * config.sample_rate as usize;
    let mut timeline = SampleBuffer::with_capacity(config.sample_rate, target_samples);

    // Progress is tracked in this counter to decide termination; the
    // buffer itself is what gets trimmed.
    let mut accumulated: usize = 0;
    let mut calls: usize = 0;

    while accumulated < target_samples {
        if calls >= config.max_calls {
            return Err(SynthError::TimelineStalled { calls });
        }

        let pattern = picker.pick(&mut rng, patterns);
        let segment = synthesize_call(&mut rng, pattern, config.sample_rate)?;
        debug!(
            "call {calls}: {} ({:?}), {:.0} ms at sample {accumulated}",
            pattern.name,
            segment.kind,
            segment.buffer.duration_ms(),
        );
        accumulated += segment.buffer.len();
        timeline.append(&segment.buffer);

        // Variable silence between calls, with an occasional longer
        // pause to break the rhythm the way real birds do.
        let gap = SampleBuffer::silence(
            rng.gen_range(config.gap_ms.0..=config.gap_ms.1),
            config.sample_rate,
        );
        accumulated += gap.len();
        timeline.append(&gap);

        if rng.gen_bool(config.long_pause_chance) {
            let pause = SampleBuffer::silence(
                rng.gen_range(config.long_pause_ms.0..=config.long_pause_ms.1),
                config.sample_rate,
            );
            accumulated += pause.len();
            timeline.append(&pause);
        }
        calls += 1;
    }

    timeline.truncate(target_samples);
    normalize(&mut timeline, config.headroom_db);
    info!(
        "composed {calls} calls into {} samples ({} s at {} Hz)",
        timeline.len(),
        config.duration_secs,
        config.sample_rate
    );
    Ok(timeline)
}

// ------------------------------------ Tests --------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::default_patterns;
    use aviary_core::dsp::db_to_lin;
    use aviary_core::level::peak;

    fn quick_config(seed: u64) -> SoundscapeConfig {
        SoundscapeConfig {
            duration_secs: 5,
            sample_rate: 8_000,
            seed: Some(seed),
            ..SoundscapeConfig::default()
        }
    }

    #[test]
    fn output_length_is_exact() {
        let track =
            synthesize_soundscape(&quick_config(1), &default_patterns()).unwrap();
        assert_eq!(track.len(), 5 * 8_000);
    }

    #[test]
    fn output_peak_sits_at_headroom() {
        let track =
            synthesize_soundscape(&quick_config(2), &default_patterns()).unwrap();
        let target = db_to_lin(-1.0); // ≈ 0.891
        assert!(
            (peak(&track) - target).abs() < 1e-4,
            "peak={}",
            peak(&track)
        );
    }

    #[test]
    fn fixed_seed_reproduces_the_track() {
        let patterns = default_patterns();
        let a = synthesize_soundscape(&quick_config(1234), &patterns).unwrap();
        let b = synthesize_soundscape(&quick_config(1234), &patterns).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let patterns = default_patterns();
        let a = synthesize_soundscape(&quick_config(1), &patterns).unwrap();
        let b = synthesize_soundscape(&quick_config(2), &patterns).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn call_cap_stops_runaway_runs() {
        let config = SoundscapeConfig { max_calls: 0, ..quick_config(1) };
        assert_eq!(
            synthesize_soundscape(&config, &default_patterns()),
            Err(SynthError::TimelineStalled { calls: 0 })
        );
    }

    #[test]
    fn empty_pattern_table_is_rejected_up_front() {
        assert!(matches!(
            synthesize_soundscape(&quick_config(1), &[]),
            Err(SynthError::DegenerateRange { .. })
        ));
    }

    #[test]
    fn degenerate_pattern_range_aborts_the_run() {
        let patterns = vec![Pattern {
            name: "broken",
            kind: crate::patterns::CallKind::WarblingTrill,
            freq_hz: (0.0, 0.0),
            call_ms: (300.0, 600.0),
            weight: 1.0,
        }];
        assert!(matches!(
            synthesize_soundscape(&quick_config(1), &patterns),
            Err(SynthError::DegenerateRange { what: "trill frequency", .. })
        ));
    }
}
