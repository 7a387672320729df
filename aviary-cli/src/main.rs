//! Aviary CLI — render a procedural birdsong soundscape to a WAV file.

mod export;

use anyhow::Context;
use aviary_engine::{default_patterns, synthesize_soundscape, SoundscapeConfig};

#[derive(Debug, Default)]
struct Args {
    output: Option<String>,
    duration_secs: Option<u32>,
    sample_rate: Option<u32>,
    seed: Option<u64>,
    headroom_db: Option<f32>,
}

fn parse_args() -> Args {
    let mut a = Args::default();
    for s in std::env::args().skip(1) {
        if let Some(rest) = s.strip_prefix("--output=")      { a.output        = Some(rest.to_string()); continue; }
        if let Some(rest) = s.strip_prefix("--duration=")    { a.duration_secs = rest.parse().ok();      continue; }
        if let Some(rest) = s.strip_prefix("--sample-rate=") { a.sample_rate   = rest.parse().ok();      continue; }
        if let Some(rest) = s.strip_prefix("--seed=")        { a.seed          = rest.parse().ok();      continue; }
        if let Some(rest) = s.strip_prefix("--headroom=")    { a.headroom_db   = rest.parse().ok();      continue; }
        eprintln!("[warn] unknown arg: {s}");
    }
    a
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = parse_args();

    let mut config = SoundscapeConfig::default();
    if let Some(d) = args.duration_secs { config.duration_secs = d; }
    if let Some(sr) = args.sample_rate  { config.sample_rate   = sr; }
    if let Some(seed) = args.seed       { config.seed          = Some(seed); }
    if let Some(h) = args.headroom_db   { config.headroom_db   = h; }
    let output = args.output.unwrap_or_else(|| "birdsong.wav".to_string());

    println!("aviary-cli — procedural birdsong renderer\n");
    println!(
        "Generating {} seconds of bird sounds at {} Hz…",
        config.duration_secs, config.sample_rate
    );

    let patterns = default_patterns();
    let track = synthesize_soundscape(&config, &patterns).context("synthesis failed")?;
    let rendered_samples = track.len();

    println!("Saving to {output}…");
    export::write_wav(&output, track).context("export failed")?;

    let bytes = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
    println!("Bird sounds saved to {output}");
    println!("File size: {:.2} MB", bytes as f64 / (1024.0 * 1024.0));
    println!(
        "Duration: {:.1} seconds",
        rendered_samples as f64 / config.sample_rate as f64
    );
    println!("Sample rate: {} Hz, 16-bit, mono", config.sample_rate);
    Ok(())
}
