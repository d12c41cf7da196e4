use std::hint::black_box;

use cadence_temporal::{Beats, RoundMode, PPQN};
use criterion::{criterion_group, criterion_main, Criterion};

fn positions() -> Vec<Beats> {
    (0..4096).map(|i| Beats::new(i / 7, (i * 37) % PPQN)).collect()
}

fn quantize(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantize");
    let input = positions();

    for (label, mode) in [
        ("nearest", RoundMode::Nearest),
        ("up_maybe", RoundMode::UpMaybe),
        ("down_always", RoundMode::DownAlways),
    ] {
        group.bench_function(format!("subdivision_16_{label}"), |b| {
            b.iter(|| {
                for value in &input {
                    black_box(value.round_to_subdivision(16, mode));
                }
            });
        });
    }

    group.bench_function("snap_to_eighth", |b| {
        let grid = Beats::from_ticks(PPQN / 2);
        b.iter(|| {
            for value in &input {
                black_box(value.snap_to(grid));
            }
        });
    });

    group.bench_function("accumulate", |b| {
        b.iter(|| {
            let mut total = Beats::ZERO;
            for value in &input {
                total += *value;
            }
            black_box(total)
        });
    });

    group.finish();
}

criterion_group!(benches, quantize);
criterion_main!(benches);
