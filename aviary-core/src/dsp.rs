//! Generic DSP utilities and math helpers.
//!
//! Design goals:
//! - Math that is testable in isolation from buffer plumbing
//! - Optional `fast-math` approximation for the tone-fill hot path
//! - Clean, side-effect free helpers
//!
//! Conventions:
//! - All functions are `#[inline]` where useful to help the optimizer.
//! - Argument and return domains are documented per function.

#![allow(clippy::excessive_precision)]

use core::f32::consts::PI;

use cfg_if::cfg_if;

// ----------------------------- Math backend selection -----------------------------

cfg_if! {
    // Polynomial approximation when requested; exact std sine otherwise.
    if #[cfg(feature = "fast-math")] {
        /// Sine with range reduction into [-π, π] and a 5th-order odd polynomial.
        /// Max abs error ~1e-3, plenty for audible tones.
        #[inline]
        fn m_sin(x: f32) -> f32 {
            let mut xr = x;
            let k = (xr / TAU).round();
            xr -= k * TAU;

            let x2 = xr * xr;
            xr * (0.999_979_313_3 + x2 * (-0.166_624_432_0 + x2 * 0.008_308_978_98))
        }
    } else {
        #[inline]
        fn m_sin(x: f32) -> f32 { x.sin() }
    }
}

// --------------------------------- Constants -------------------------------------

/// 2π (commonly useful)
pub const TAU: f32 = 2.0 * PI;

/// A very small epsilon used in peak tests and safe divisions.
pub const EPS_SMALL: f32 = 1.0e-20;

// --------------------------------- Utilities -------------------------------------

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// --------------------------------- dB / linear -----------------------------------

/// Convert dB to linear gain: lin = 10^(db/20).
#[inline]
pub fn db_to_lin(db: f32) -> f32 {
    if db <= -120.0 { 0.0 } else { (0.11512925464970229_f32 * db).exp() } // ln(10)/20 ≈ 0.115129...
}

/// Convert linear gain to dB: db = 20*log10(lin).
#[inline]
pub fn lin_to_db(lin: f32) -> f32 {
    if lin <= EPS_SMALL { -120.0 }
    else { 8.685889638065036553_f32 * lin.ln() } // 20/ln(10)
}

// --------------------------------- Sine fill -------------------------------------

/// Fill `out` with a sine at amplitude `amp`, using a running phase
/// accumulator. After the call, `*phase` has advanced by
/// `out.len() * phase_inc` and is kept wrapped near [-2π, 2π].
#[inline]
pub fn fill_sine(out: &mut [f32], phase: &mut f32, phase_inc: f32, amp: f32) {
    for y in out.iter_mut() {
        *y = m_sin(*phase) * amp;

        // advance phase; keep bounded occasionally
        *phase += phase_inc;
        if *phase > TAU || *phase < -TAU {
            let k = (*phase / TAU).round();
            *phase -= k * TAU;
        }
    }
}

// --------------------------------- Tests (std only) ------------------------------
