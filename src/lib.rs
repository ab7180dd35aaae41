//! # sparseflow: weighted flow over sparse graph layouts
//!
//! Generates synthetic sparse directed graphs, stores them as COO, CSR or
//! ELLPACK, and computes the weighted out-flow of every vertex
//! (`flow[i] = Σ_j value(i, j) · weight[j]`, a sparse matrix-vector product)
//! with several execution strategies, timing each one.
//!
//! ## Components
//!
//! 1. **COO store** ([`CooGraph`]): sorted `(row, col, value)` triples plus
//!    per-vertex weights; random or from external data.
//!
//! 2. **Converters**: [`CsrGraph::from_coo`] and [`EllpackGraph::from_coo`].
//!
//! 3. **Flow kernels** ([`flow`]):
//!    - **Scalar** and **row-parallel** on any layout
//!    - **Vector-row** and **vector-transposed** on rows of exactly
//!      [`LANE_WIDTH`] entries
//!
//! 4. **Benchmark harness** ([`benchmark`]): mean duration and derived
//!    bandwidth.
//!
//! 5. **Reference baseline** ([`reference_flow`]) computed by sprs.
//!
//! ## Usage
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use sparseflow::{compute_flow, CooGraph, EdgeCount, Strategy};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let coo = CooGraph::<f32>::random(256, EdgeCount::Density(0.01), &mut rng).unwrap();
//! let csr = coo.to_csr();
//!
//! let flow = compute_flow(Strategy::RowParallel, &csr, coo.weights()).unwrap();
//! assert_eq!(flow.len(), 256);
//! ```
//!
//! Vectorized strategies need uniform rows, which a padded ELLPACK layout
//! provides:
//!
//! ```
//! # use rand::rngs::StdRng;
//! # use rand::SeedableRng;
//! use sparseflow::{compute_flow, CooGraph, EdgeCount, Strategy, LANE_WIDTH};
//!
//! # let mut rng = StdRng::seed_from_u64(42);
//! let coo = CooGraph::<f32>::random(64, EdgeCount::Exact(200), &mut rng).unwrap();
//! if coo.max_degree() <= LANE_WIDTH {
//!     let ell = coo.to_ellpack(Some(LANE_WIDTH)).unwrap();
//!     let flow = compute_flow(Strategy::VectorTransposed, &ell, coo.weights()).unwrap();
//!     assert_eq!(flow.len(), 64);
//! }
//! ```

pub mod benchmark;
pub mod error;
pub mod flow;
pub mod matrix;
pub mod report;
pub mod utils;

// Re-export primary components
pub use benchmark::{bandwidth_gbps, bytes_moved, measure, BenchConfig, Measurement};
pub use error::{Error, Result};
pub use flow::{compute_flow, FlowEngine, FlowKernel, Strategy};
pub use matrix::{
    CooGraph, CsrGraph, DenseGraph, Edge, EdgeCount, EllpackGraph, FlowConfig, FlowGraph,
    LayoutSummary, Scalar, SparseRows, SystemParameters, LANE_WIDTH,
};
pub use report::{write_csv, ReportRow};
pub use utils::{load_matrix_market, read_matrix_market, reference_flow};

/// Version information for the sparseflow library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
