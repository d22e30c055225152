//! Benchmarks for transforms and plot sampling.
//!
//! Set `RUST_LOG=spectra_fourier=debug` to trace the engine while
//! benchmarking.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tracing_subscriber::EnvFilter;

use spectra::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

struct Vars {
    t: ExprHandle,
    f: ExprHandle,
    a: ExprHandle,
}

fn vars(arena: &mut ExprArena) -> Vars {
    Vars {
        t: arena.real_symbol("t"),
        f: arena.real_symbol("f"),
        a: arena.positive_symbol("a"),
    }
}

/// `exp(-a·t)·u(t)`
fn causal_exponential(arena: &mut ExprArena, v: &Vars) -> ExprHandle {
    let at = arena.mul([v.a, v.t]);
    let decay = arena.neg(at);
    let e = arena.exp(decay);
    let u = arena.step(v.t);
    arena.mul([e, u])
}

/// Benchmark forward transforms of table entries.
fn bench_forward(c: &mut Criterion) {
    init_tracing();
    let mut group = c.benchmark_group("forward");

    group.bench_function("impulse", |b| {
        b.iter(|| {
            let mut arena = ExprArena::new();
            let v = vars(&mut arena);
            let d = arena.delta(v.t);
            black_box(fourier_transform(&mut arena, d, v.t, v.f))
        })
    });

    group.bench_function("causal_exponential", |b| {
        b.iter(|| {
            let mut arena = ExprArena::new();
            let v = vars(&mut arena);
            let s = causal_exponential(&mut arena, &v);
            black_box(fourier_transform(&mut arena, s, v.t, v.f))
        })
    });

    // cos(2πkt) for growing k
    for k in [1i64, 10, 100] {
        group.bench_with_input(BenchmarkId::new("cosine", k), &k, |b, &k| {
            b.iter(|| {
                let mut arena = ExprArena::new();
                let v = vars(&mut arena);
                let two = arena.integer(2);
                let pi = arena.pi();
                let k = arena.integer(k);
                let arg = arena.mul([two, pi, k, v.t]);
                let c = arena.cos(arg);
                black_box(fourier_transform(&mut arena, c, v.t, v.f))
            })
        });
    }

    group.finish();
}

/// Benchmark repeated transforms through one engine.
fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache");

    let mut arena = ExprArena::new();
    let v = vars(&mut arena);
    let s = causal_exponential(&mut arena, &v);

    let mut engine = FourierEngine::new();
    group.bench_function("hit", |b| {
        b.iter(|| black_box(engine.forward_transform(&mut arena, s, v.t, v.f)))
    });

    let mut uncached = FourierEngine::with_config(FourierConfig {
        use_cache: false,
        ..FourierConfig::default()
    });
    group.bench_function("disabled", |b| {
        b.iter(|| black_box(uncached.forward_transform(&mut arena, s, v.t, v.f)))
    });

    group.finish();
}

/// Benchmark products of signals, which become convolutions.
fn bench_convolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("convolution");

    for n in [2usize, 3, 4] {
        group.bench_with_input(BenchmarkId::new("signals", n), &n, |b, &n| {
            b.iter(|| {
                let mut arena = ExprArena::new();
                let v = vars(&mut arena);
                let mut factors = Vec::with_capacity(n);
                for i in 0..n {
                    let (sig, _) = arena
                        .declare_signal_pair(&format!("s{i}"), &format!("S{i}"))
                        .unwrap();
                    factors.push(arena.signal(sig, v.t));
                }
                let product = arena.mul(factors);
                black_box(fourier_transform(&mut arena, product, v.t, v.f))
            })
        });
    }

    group.finish();
}

/// Benchmark inverse transforms, including simplification.
fn bench_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("inverse");

    group.bench_function("first_order_spectrum", |b| {
        b.iter(|| {
            let mut arena = ExprArena::new();
            let v = vars(&mut arena);
            let k = arena.two_pi_i();
            let kf = arena.mul([k, v.f]);
            let denom = arena.add([v.a, kf]);
            let spectrum = arena.recip(denom);
            black_box(inverse_fourier_transform(&mut arena, spectrum, v.f, v.t))
        })
    });

    group.finish();
}

/// Benchmark sampling a spectrum for a frequency plot.
fn bench_plot(c: &mut Criterion) {
    let mut group = c.benchmark_group("plot");

    for n in [100usize, 1000, 10000] {
        let mut arena = ExprArena::new();
        let v = vars(&mut arena);
        let s = causal_exponential(&mut arena, &v);
        let spectrum = fourier_transform(&mut arena, s, v.t, v.f).unwrap();
        let evaluator = Evaluator::new().bind_expr(&arena, v.a, 1.0).unwrap();
        #[allow(clippy::cast_precision_loss)]
        let points: Vec<f64> = (1..=n).map(|i| i as f64 * 0.01).collect();

        group.bench_with_input(BenchmarkId::new("db_phase", n), &points, |b, points| {
            b.iter(|| {
                black_box(
                    FrequencyPlot::new(spectrum, v.f)
                        .log_frequency(true)
                        .chart(&mut arena, &evaluator, points),
                )
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_forward,
    bench_cache,
    bench_convolution,
    bench_inverse,
    bench_plot
);
criterion_main!(benches);
