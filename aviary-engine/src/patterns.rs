//! Bird-call archetypes and weighted pattern selection.
//!
//! A [`Pattern`] names one call archetype: which synthesizer shape to
//! run ([`CallKind`]), the frequency and duration ranges to draw from,
//! and a relative selection weight. The table is plain data, read-only
//! during a run; the composer samples it through a [`PatternPicker`].

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::error::SynthError;

/// The fixed set of call shapes the engine can synthesize.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CallKind {
    /// A handful of discrete chirps with melodic drift and tiny gaps.
    MultiChirp,
    /// One smooth slide from a start pitch down to 50–80% of it.
    DescendingWhistle,
    /// Rapid sinusoidal vibrato around a base pitch.
    WarblingTrill,
}

/// One row of the pattern table.
#[derive(Copy, Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub kind: CallKind,
    /// Inclusive frequency range in Hz.
    pub freq_hz: (f32, f32),
    /// Inclusive call duration range in ms.
    pub call_ms: (f32, f32),
    /// Relative selection weight; weights need not sum to one.
    pub weight: f32,
}

/// The default table: five songbird archetypes, weighted towards the
/// higher voices.
pub fn default_patterns() -> Vec<Pattern> {
    vec![
        Pattern {
            name: "high_songbird",
            kind: CallKind::MultiChirp,
            freq_hz: (1_200.0, 3_500.0),
            call_ms: (50.0, 250.0),
            weight: 3.0,
        },
        Pattern {
            name: "medium_songbird",
            kind: CallKind::MultiChirp,
            freq_hz: (800.0, 2_500.0),
            call_ms: (80.0, 400.0),
            weight: 3.0,
        },
        Pattern {
            name: "lower_songbird",
            kind: CallKind::MultiChirp,
            freq_hz: (600.0, 1_800.0),
            call_ms: (100.0, 500.0),
            weight: 2.0,
        },
        Pattern {
            name: "whistle",
            kind: CallKind::DescendingWhistle,
            freq_hz: (1_500.0, 3_500.0),
            call_ms: (200.0, 400.0),
            weight: 2.0,
        },
        Pattern {
            name: "trill",
            kind: CallKind::WarblingTrill,
            freq_hz: (1_800.0, 2_800.0),
            call_ms: (300.0, 600.0),
            weight: 1.0,
        },
    ]
}

/// Weighted random selection over a pattern table.
///
/// Row `i` is chosen with probability `weight_i / Σ weights`. The
/// distribution is built once per run; call [`PatternPicker::pick`]
/// with the same table the picker was built from.
pub struct PatternPicker {
    index: WeightedIndex<f32>,
}

impl PatternPicker {
    /// Fails when the table is empty, a weight is negative, or no
    /// weight is positive.
    pub fn new(patterns: &[Pattern]) -> Result<Self, SynthError> {
        let index = WeightedIndex::new(patterns.iter().map(|p| p.weight)).map_err(|_| {
            let lo = patterns.iter().map(|p| p.weight).fold(f32::INFINITY, f32::min);
            let hi = patterns.iter().map(|p| p.weight).fold(f32::NEG_INFINITY, f32::max);
            SynthError::DegenerateRange { what: "pattern weight", lo, hi }
        })?;
        Ok(Self { index })
    }

    /// Index of the next weighted draw.
    #[inline]
    pub fn pick_index<R: Rng>(&self, rng: &mut R) -> usize {
        self.index.sample(rng)
    }

    /// The next weighted draw out of `patterns`.
    #[inline]
    pub fn pick<'a, R: Rng>(&self, rng: &mut R, patterns: &'a [Pattern]) -> &'a Pattern {
        &patterns[self.pick_index(rng)]
    }
}

// ------------------------------------ Tests --------------------------------------
