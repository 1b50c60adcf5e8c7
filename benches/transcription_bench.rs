//! Performance benchmarks for drum transcription

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use drumscribe::{transcribe, TranscriptionConfig};

/// Synthetic drum loop: kick/snare/hi-hat bursts on a 120 BPM grid
fn synthetic_loop(duration_s: f32, sample_rate: u32) -> Vec<f32> {
    let sr = sample_rate as f32;
    let mut samples = vec![0.0f32; (duration_s * sr) as usize];
    let beat = sr / 2.0; // 120 BPM

    let mut add_burst = |pos: usize, freq: f32, amplitude: f32| {
        for i in 0..2048 {
            let idx = pos + i;
            if idx >= samples.len() {
                break;
            }
            let t = i as f32 / sr;
            let decay = (-t * 40.0).exp();
            samples[idx] += amplitude * decay * (2.0 * std::f32::consts::PI * freq * t).sin();
        }
    };

    let beats = (duration_s * 2.0) as usize;
    for n in 0..beats {
        let pos = (n as f32 * beat) as usize;
        if n % 2 == 0 {
            add_burst(pos, 60.0, 1.0); // kick
        } else {
            add_burst(pos, 400.0, 0.8); // snare
        }
        add_burst(pos, 6000.0, 0.4); // hi-hat on every beat
        add_burst(pos + (beat / 2.0) as usize, 6000.0, 0.3);
    }

    samples
}

fn bench_transcribe(c: &mut Criterion) {
    let samples = synthetic_loop(30.0, 22050);
    let config = TranscriptionConfig::default();

    c.bench_function("transcribe_30s", |b| {
        b.iter(|| {
            let _ = transcribe(
                black_box(&samples),
                black_box(22050),
                black_box(config.clone()),
            );
        });
    });
}

fn bench_transcribe_short(c: &mut Criterion) {
    let samples = synthetic_loop(5.0, 22050);
    let config = TranscriptionConfig::default();

    c.bench_function("transcribe_5s", |b| {
        b.iter(|| {
            let _ = transcribe(
                black_box(&samples),
                black_box(22050),
                black_box(config.clone()),
            );
        });
    });
}

criterion_group!(benches, bench_transcribe, bench_transcribe_short);
criterion_main!(benches);
