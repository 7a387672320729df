use criterion::{black_box, criterion_group, criterion_main, Criterion};

use aviary_core::level::normalize;
use aviary_core::osc::{generate_tone, overlay, ToneSpec};

fn bench_tone(c: &mut Criterion) {
    c.bench_function("tone_1s_44k", |b| {
        b.iter(|| generate_tone(black_box(ToneSpec::new(2_000.0, 1_000.0)), 44_100).unwrap())
    });

    c.bench_function("overlay_1s_44k", |b| {
        let base = generate_tone(ToneSpec::new(2_000.0, 1_000.0), 44_100).unwrap();
        let detuned = generate_tone(ToneSpec::new(2_300.0, 1_000.0), 44_100).unwrap();
        b.iter(|| overlay(black_box(&base), black_box(&detuned), -6.0))
    });

    c.bench_function("normalize_1s_44k", |b| {
        let tone = generate_tone(ToneSpec::new(2_000.0, 1_000.0), 44_100).unwrap();
        b.iter(|| {
            let mut buf = tone.clone();
            normalize(&mut buf, 1.0);
            black_box(buf.len())
        })
    });
}

criterion_group!(benches, bench_tone);
criterion_main!(benches);
