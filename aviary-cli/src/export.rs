//! WAV export adapter: hands a finished buffer to the hound encoder.
//!
//! The engine never sees this layer. The buffer arrives by move, is
//! quantized once to 16-bit PCM, and any encoder or file-system failure
//! surfaces as [`ExportError::ExportFailed`] instead of being swallowed.

use aviary_engine::SampleBuffer;
use thiserror::Error;

/// Output bit depth. The synthesizer works in f32 and quantizes here.
const BIT_DEPTH: u16 = 16;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Encoder or I/O failure from the WAV writer.
    #[error("export failed: {0}")]
    ExportFailed(#[from] hound::Error),
}

/// Encode `track` as 16-bit mono PCM at its own sample rate.
pub fn write_wav(path: &str, track: SampleBuffer) -> Result<(), ExportError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: track.sample_rate(),
        bits_per_sample: BIT_DEPTH,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &s in track.samples() {
        let clamped = s.clamp(-1.0, 1.0);
        writer.write_sample((clamped * f32::from(i16::MAX)) as i16)?;
    }
    writer.finalize()?;
    Ok(())
}

// ------------------------------------ Tests --------------------------------------
