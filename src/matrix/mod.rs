// Graph layouts and the interfaces the flow kernels read them through

pub mod config;
pub mod conversion;
pub mod coo;
pub mod csr;
pub mod dense;
pub mod ellpack;

use std::fmt::Debug;
use std::ops::Range;

use num_traits::Float;

use crate::error::{Error, Result};

pub use config::{Architecture, FlowConfig, SystemParameters, LANE_WIDTH};
pub use coo::{CooGraph, Edge, EdgeCount};
pub use csr::CsrGraph;
pub use dense::DenseGraph;
pub use ellpack::EllpackGraph;

/// Numeric element type accepted by every layout and kernel
///
/// Covers `f32` and `f64`.
pub trait Scalar: Float + Send + Sync + Debug + 'static {}

impl<T> Scalar for T where T: Float + Send + Sync + Debug + 'static {}

/// Row-addressable sparse storage
///
/// Row `i` owns the entries `col_indices()[row_range(i)]` paired with
/// `values()[row_range(i)]`. Padded layouts report the padded range.
pub trait SparseRows<T>: Sync {
    /// Number of rows (vertices)
    fn n_rows(&self) -> usize;

    /// Position range of row `i` inside the index and value arrays
    fn row_range(&self, i: usize) -> Range<usize>;

    /// Column index per stored entry
    fn col_indices(&self) -> &[usize];

    /// Value per stored entry
    fn values(&self) -> &[T];

    /// Number of stored entries in row `i`
    fn row_len(&self, i: usize) -> usize {
        self.row_range(i).len()
    }

    /// Total number of stored entries, including padding
    fn stored_entries(&self) -> usize {
        self.values().len()
    }
}

/// A short, printable description of a graph layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSummary {
    /// Layout identifier ("coo", "csr", "ellpack", "dense")
    pub layout: &'static str,
    /// Number of vertices
    pub vertices: usize,
    /// Number of real edges
    pub nnz: usize,
    /// Number of stored value slots (padding and explicit zeros included)
    pub stored_slots: usize,
    /// Approximate heap footprint of the layout in bytes
    pub bytes: usize,
}

/// Common capability of every graph layout
pub trait FlowGraph<T: Scalar> {
    /// Number of vertices
    fn vertex_count(&self) -> usize;

    /// Number of real (non-padding) edges
    fn nnz(&self) -> usize;

    /// Computes `flow[i] = Σ value(i, j) · weights[j]` with the layout's
    /// own sequential traversal
    ///
    /// Weights must be finite; otherwise [`Error::NonFiniteWeight`] is
    /// returned.
    fn compute_flow(&self, weights: &[T]) -> Result<Vec<T>>;

    /// Reportable summary of the layout
    fn describe(&self) -> LayoutSummary;
}

/// Checks that `weights` has one finite entry per vertex
///
/// ELLPACK padding multiplies a zero value by `weights[0]`, so a non-finite
/// weight would leak into padded rows.
pub(crate) fn check_weights<T: Scalar>(vertices: usize, weights: &[T]) -> Result<()> {
    if weights.len() != vertices {
        return Err(Error::WeightLength {
            expected: vertices,
            got: weights.len(),
        });
    }
    if let Some(vertex) = weights.iter().position(|w| !w.is_finite()) {
        return Err(Error::NonFiniteWeight { vertex });
    }
    Ok(())
}
