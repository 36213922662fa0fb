//! Criterion benchmarks for gluing, radius search and full layout.
//! Focus sizes: kaleidoscopic k-gons with k in {4, 8, 16, 32, 60}.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p fdomain

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use fdomain::api::{geodesic, glue, solve_radius, DSymbol, FdCfg, FundamentalDomain, Geometry, Polar};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn bench_pipeline(c: &mut Criterion) {
    let cfg = FdCfg::default();
    let mut group = c.benchmark_group("domain");
    for &k in &[4usize, 8, 16, 32, 60] {
        let sym = DSymbol::reflection_polygon(k, 4);
        group.bench_with_input(BenchmarkId::new("glue", k), &sym, |b, sym| {
            b.iter(|| glue(sym, &cfg).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("solve_radius", k), &sym, |b, sym| {
            b.iter_batched(
                || glue(sym, &cfg).unwrap(),
                |mut g| solve_radius(&mut g, &cfg),
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("build", k), &sym, |b, sym| {
            b.iter(|| FundamentalDomain::build(sym, &cfg).unwrap())
        });
    }
    group.finish();
}

fn random_polars(n: usize, seed: u64) -> Vec<(Polar, Polar)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let a = Polar::new(rng.gen_range(0.1..2.0), rng.gen::<f64>() * std::f64::consts::TAU);
            let b = Polar::new(rng.gen_range(0.1..2.0), rng.gen::<f64>() * std::f64::consts::TAU);
            (a, b)
        })
        .collect()
}

fn bench_geodesic(c: &mut Criterion) {
    let cfg = FdCfg::default();
    let mut group = c.benchmark_group("geodesic");
    for geom in [Geometry::Hyperbolic, Geometry::Spherical] {
        group.bench_function(geom.name(), |b| {
            b.iter_batched(
                || random_polars(100, 17),
                |pairs| {
                    for (p, q) in pairs {
                        let _g = geodesic(geom, p, q, true, &cfg);
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_geodesic);
criterion_main!(benches);
