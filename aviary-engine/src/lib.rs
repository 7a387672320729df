//! Aviary Engine — randomized birdsong composition over `aviary-core`.
//!
//! Crate layout:
//! - [`patterns`] : call archetypes, the default table, weighted selection
//! - [`calls`]    : the three call synthesizers (chirp sequence, whistle, trill)
//! - [`compose`]  : the timeline composer and its configuration
//! - [`error`]    : typed errors for synthesis runs
//!
//! The engine renders offline: every call is an owned buffer appended
//! onto one growing timeline with a single writer, then the whole track
//! is trimmed and normalized in one pass each. Randomness flows through
//! one injectable RNG, so a fixed seed reproduces a track byte-for-byte.

pub mod calls;
pub mod compose;
pub mod error;
pub mod patterns;

// Re-export some commonly used items to make downstream imports ergonomic.
pub use aviary_core::buffer::SampleBuffer;
pub use calls::CallSegment;
pub use compose::{synthesize_soundscape, SoundscapeConfig};
pub use error::SynthError;
pub use patterns::{default_patterns, CallKind, Pattern};
