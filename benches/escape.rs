#[macro_use]
extern crate criterion;
extern crate multibrot;
extern crate num;

use criterion::Criterion;
use multibrot::{evaluate, generate_single, Viewport};
use num::Complex;

fn escape_benchmark(c: &mut Criterion) {
    c.bench_function("evaluate inside the cardioid", |b| {
        b.iter(|| evaluate(Complex::new(-0.1, 0.1), 2.0, 900))
    });
    c.bench_function("evaluate at a fractional exponent", |b| {
        b.iter(|| evaluate(Complex::new(-0.743, 0.131), 2.5, 900))
    });
}

fn frame_benchmark(c: &mut Criterion) {
    let viewport =
        Viewport::new(108, 72, Complex::new(-2.0, -1.0), Complex::new(1.0, 1.0)).unwrap();
    c.bench_function("108x72 frame", move |b| {
        b.iter(|| generate_single(&viewport, 3.0, 100))
    });
}

criterion_group!(benches, escape_benchmark, frame_benchmark);
criterion_main!(benches);
