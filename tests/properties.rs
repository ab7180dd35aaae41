//! Property tests over randomly generated graphs

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sparseflow::{compute_flow, CooGraph, EdgeCount, FlowGraph, Strategy, LANE_WIDTH};

fn graph(vertices: usize, density: f64, seed: u64) -> CooGraph<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let max = vertices * vertices.saturating_sub(1);
    let edges = ((density * (vertices * vertices) as f64).round() as usize).min(max);
    CooGraph::random(vertices, EdgeCount::Exact(edges), &mut rng).unwrap()
}

fn close(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| (x - y).abs() <= 1e-9 * y.abs().max(1.0))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_graphs_are_simple(vertices in 0usize..80, density in 0.0f64..0.5, seed in any::<u64>()) {
        let coo = graph(vertices, density, seed);

        prop_assert_eq!(coo.weights().len(), vertices);
        prop_assert!(coo.edges().iter().all(|e| e.row != e.col));
        prop_assert!(coo
            .edges()
            .windows(2)
            .all(|w| (w[0].row, w[0].col) < (w[1].row, w[1].col)));
    }

    #[test]
    fn csr_roundtrips_and_is_well_formed(vertices in 1usize..80, density in 0.0f64..0.5, seed in any::<u64>()) {
        let coo = graph(vertices, density, seed);
        let csr = coo.to_csr();

        prop_assert_eq!(csr.row_ptr.len(), vertices + 1);
        prop_assert_eq!(csr.row_ptr[0], 0);
        prop_assert_eq!(csr.row_ptr[vertices], coo.edges().len());
        prop_assert!(csr.row_ptr.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(csr.to_edges(), coo.edges().to_vec());
    }

    #[test]
    fn strategies_agree(vertices in 1usize..120, density in 0.0f64..0.2, seed in any::<u64>()) {
        let coo = graph(vertices, density, seed);
        let csr = coo.to_csr();
        let expected = coo.compute_flow(coo.weights()).unwrap();

        for strategy in [Strategy::Scalar, Strategy::RowParallel] {
            let flow = compute_flow(strategy, &csr, coo.weights()).unwrap();
            prop_assert!(close(&flow, &expected));
        }

        if coo.max_degree() <= LANE_WIDTH {
            let ell = coo.to_ellpack(Some(LANE_WIDTH)).unwrap();
            for strategy in [Strategy::VectorRow, Strategy::VectorTransposed] {
                let flow = compute_flow(strategy, &ell, coo.weights()).unwrap();
                prop_assert!(close(&flow, &expected));
            }
        }
    }

    #[test]
    fn ellpack_width_must_cover_max_degree(vertices in 2usize..60, density in 0.01f64..0.5, seed in any::<u64>()) {
        let coo = graph(vertices, density, seed);
        let max = coo.max_degree();

        prop_assert!(coo.to_ellpack(Some(max)).is_ok());
        if max > 0 {
            prop_assert!(coo.to_ellpack(Some(max - 1)).is_err());
        }
    }
}
