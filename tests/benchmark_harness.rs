//! Tests for the timing harness and CSV reporting

use rand::rngs::StdRng;
use rand::SeedableRng;
use sparseflow::{
    bandwidth_gbps, bytes_moved, measure, write_csv, BenchConfig, CooGraph, Error, FlowKernel,
    ReportRow, SparseRows, Strategy,
};

#[test]
fn test_measure_flow_kernel() {
    let mut rng = StdRng::seed_from_u64(41);
    let coo = CooGraph::<f32>::random_regular(256, 16, &mut rng).unwrap();
    let csr = coo.to_csr();
    let kernel = Strategy::VectorRow.kernel::<f32>();

    let config = BenchConfig {
        iterations: 4,
        warmup: 1,
    };
    let m = measure(&config, || kernel.compute(&csr, coo.weights())).unwrap();

    assert_eq!(m.samples_us.len(), 4);
    assert!(m.mean_us >= m.min_us);
    assert!(m.min_us >= 0.0);
}

#[test]
fn test_measure_stops_on_precondition_failure() {
    let mut rng = StdRng::seed_from_u64(42);
    let coo = CooGraph::<f32>::random_regular(64, 3, &mut rng).unwrap();
    let csr = coo.to_csr();
    let kernel = Strategy::VectorTransposed.kernel::<f32>();

    let result = measure(&BenchConfig::default(), || kernel.compute(&csr, coo.weights()));
    assert!(matches!(result, Err(Error::LaneWidthMismatch { degree: 3, .. })));
}

#[test]
fn test_bandwidth_derivation() {
    // 1000 edges, 100 vertices of f32
    let bytes = bytes_moved::<f32>(1000, 100);
    let expected_bytes = 1000 * (4 + std::mem::size_of::<usize>()) + 100 * 4 + 2 * 100 * 4;
    assert_eq!(bytes, expected_bytes);

    let mean_us = 37.5;
    let manual = expected_bytes as f64 / (1000.0 * mean_us);
    assert!((bandwidth_gbps(mean_us, bytes) - manual).abs() < 1e-12);
}

#[test]
fn test_report_for_layout() {
    let mut rng = StdRng::seed_from_u64(43);
    let coo = CooGraph::<f32>::random_regular(32, 16, &mut rng).unwrap();
    let ell = coo.to_ellpack(Some(16)).unwrap();
    let bytes = bytes_moved::<f32>(ell.stored_entries(), 32);

    let rows = vec![ReportRow {
        vertices: 32,
        density: 0.5,
        strategy: Strategy::VectorRow.to_string(),
        mean_us: 2.0,
        bandwidth_gbps: Some(bandwidth_gbps(2.0, bytes)),
    }];

    let mut out = Vec::new();
    write_csv(&mut out, &rows).unwrap();
    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();

    assert_eq!(lines.next(), Some("vertices,density,strategy,mean_us,bandwidth_gbps"));
    assert!(lines.next().unwrap().starts_with("32,0.5,vector-row,2.000,"));
    assert_eq!(lines.next(), None);
}
