use std::hint::black_box;

use cadence_routing::{Bundle, RoutingEngine};
use criterion::{criterion_group, criterion_main, Criterion};

struct NullEngine;

impl RoutingEngine for NullEngine {
    fn connect(&self, source: &str, destination: &str) {
        black_box((source, destination));
    }

    fn disconnect(&self, source: &str, destination: &str) {
        black_box((source, destination));
    }
}

fn wide_bundle(name: &str, channels: usize, ports: usize) -> Bundle {
    let bundle = Bundle::new(name);
    for ch in 0..channels {
        let index = bundle.add_channel(format!("{ch}"));
        for port in 0..ports {
            bundle.add_port_to_channel(index, format!("{name}:ch{ch}_p{port}"));
        }
    }
    bundle
}

fn bundle(c: &mut Criterion) {
    let mut group = c.benchmark_group("bundle");

    group.bench_function("connect_32x4", |b| {
        let ours = wide_bundle("track", 32, 4);
        let theirs = wide_bundle("bus", 32, 4);
        b.iter(|| ours.connect(&theirs, &NullEngine));
    });

    group.bench_function("uses_port_miss", |b| {
        let bundle = wide_bundle("track", 64, 8);
        b.iter(|| black_box(bundle.uses_port("other:port")));
    });

    group.finish();
}

criterion_group!(benches, bundle);
criterion_main!(benches);
