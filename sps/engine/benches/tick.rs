//! Tick throughput benchmark
//!
//! The engine must keep up with an oversampling rate of at least twice
//! the bus edge rate; this measures the cost of one tick in the idle and
//! actively clocking cases.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sps_engine::{BusSample, Level, SpiSlave};

fn bench_tick(c: &mut Criterion) {
    let mut slave = SpiSlave::with_defaults();
    let idle = BusSample::new(Level::Low, Level::High, Level::Low);
    c.bench_function("tick_idle", |b| {
        b.iter(|| slave.tick(black_box(idle)));
    });

    let mut slave = SpiSlave::with_defaults();
    let mut clock = Level::Low;
    c.bench_function("tick_clocking", |b| {
        b.iter(|| {
            clock = clock.inverted();
            slave.tick(black_box(BusSample::new(clock, Level::Low, Level::High)))
        });
    });
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
