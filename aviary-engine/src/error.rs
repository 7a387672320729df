//! Typed errors for call synthesis and timeline composition.
//!
//! The crate uses [`SynthError`] as the top-level public error type.
//! Tone-level failures from `aviary-core` are wrapped transparently so
//! callers match on one enum. Any error aborts the generation run
//! entirely; no partial buffer ever reaches an exporter.

use thiserror::Error;

use aviary_core::osc::ToneError;

/// Errors produced while synthesizing calls or composing a timeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    /// An invalid frequency/duration reached the tone primitive.
    #[error(transparent)]
    InvalidToneSpec(#[from] ToneError),

    /// A supplied range kept producing unusable draws. `lo`/`hi` are the
    /// offending bounds (for pattern weights, the smallest and largest
    /// weight in the table).
    #[error("degenerate {what} range [{lo}, {hi}]")]
    DegenerateRange {
        what: &'static str,
        lo: f32,
        hi: f32,
    },

    /// The accumulation loop hit its call cap without reaching the
    /// target duration; the pattern table never advances the timeline.
    #[error("timeline did not reach the target duration after {calls} calls")]
    TimelineStalled { calls: usize },
}
