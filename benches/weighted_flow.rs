//! Benchmarks for the weighted-flow strategies

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sparseflow::{
    reference_flow, CooGraph, EdgeCount, FlowKernel, SparseRows, Strategy, LANE_WIDTH,
};
use std::hint::black_box;

/// Random graphs at a fixed density, scalar and parallel kernels on CSR
fn bench_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("density_0.01");
    let mut rng = StdRng::seed_from_u64(42); // Deterministic for reproducibility

    for exp in [10u32, 12] {
        let n = 1usize << exp;
        let coo = CooGraph::<f32>::random(n, EdgeCount::Density(0.01), &mut rng).unwrap();
        let csr = coo.to_csr();
        group.throughput(Throughput::Elements(csr.nnz() as u64));

        for strategy in [Strategy::Scalar, Strategy::RowParallel] {
            let kernel = strategy.kernel::<f32>();
            group.bench_with_input(BenchmarkId::new(strategy.as_str(), n), &csr, |b, csr| {
                b.iter(|| black_box(kernel.compute(csr, coo.weights()).unwrap()))
            });
        }

        group.bench_with_input(BenchmarkId::new("reference", n), &csr, |b, csr| {
            b.iter(|| black_box(reference_flow(csr, coo.weights()).unwrap()))
        });
    }

    group.finish();
}

/// Fixed out-degree graphs, every strategy including the vectorized ones
fn bench_uniform_degree(c: &mut Criterion) {
    let mut group = c.benchmark_group("degree_16");
    let mut rng = StdRng::seed_from_u64(7);

    for exp in [10u32, 13] {
        let n = 1usize << exp;
        let coo = CooGraph::<f32>::random_regular(n, LANE_WIDTH, &mut rng).unwrap();
        let ell = coo.to_ellpack(Some(LANE_WIDTH)).unwrap();
        group.throughput(Throughput::Elements(ell.stored_entries() as u64));

        for strategy in Strategy::ALL {
            let kernel = strategy.kernel::<f32>();
            group.bench_with_input(BenchmarkId::new(strategy.as_str(), n), &ell, |b, ell| {
                b.iter(|| black_box(kernel.compute(ell, coo.weights()).unwrap()))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_density, bench_uniform_degree);
criterion_main!(benches);
