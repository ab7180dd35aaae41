//! Weighted-flow kernels
//!
//! Every kernel computes, for each vertex `i`,
//! `flow[i] = Σ value(i, j) · weights[j]` over the stored entries of row `i`,
//! and returns a freshly built vector. The kernels differ only in how the
//! rows are traversed:
//!
//! - **Scalar**: rows one after another
//! - **Row-parallel**: rows spread over Rayon workers
//! - **Vector-row**: one lane register per row, horizontal sum
//! - **Vector-transposed**: one lane per row within a block of `L` rows
//!
//! The two vectorized kernels need every row to have exactly
//! [`LANE_WIDTH`](crate::matrix::LANE_WIDTH) entries and fail otherwise.

pub mod lane;
pub mod parallel;
pub mod scalar;
pub mod vector;

use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::matrix::{Scalar, SparseRows, SystemParameters};

pub use lane::Lane;
pub use parallel::ParallelKernel;
pub use scalar::{row_dot, ScalarKernel};
pub use vector::{check_uniform_rows, RowLaneKernel, TransposedLaneKernel};

/// A weighted-flow execution strategy
pub trait FlowKernel<T>: Send + Sync {
    /// Identifier used in logs and reports
    fn name(&self) -> &'static str;

    /// Computes the flow vector of `rows` for the given vertex weights
    ///
    /// # Errors
    ///
    /// Fails if `weights` does not have one finite entry per row, or if the
    /// kernel's layout precondition does not hold.
    fn compute(&self, rows: &dyn SparseRows<T>, weights: &[T]) -> Result<Vec<T>>;
}

/// Selectable strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Sequential reference
    Scalar,
    /// Rayon row-parallel
    RowParallel,
    /// Lane-vectorized, row-major
    VectorRow,
    /// Lane-vectorized, blocked and transposed
    VectorTransposed,
}

impl Strategy {
    /// Every strategy, in report order
    pub const ALL: [Strategy; 4] = [
        Strategy::Scalar,
        Strategy::RowParallel,
        Strategy::VectorRow,
        Strategy::VectorTransposed,
    ];

    /// Stable identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Scalar => "scalar",
            Strategy::RowParallel => "parallel",
            Strategy::VectorRow => "vector-row",
            Strategy::VectorTransposed => "vector-transposed",
        }
    }

    /// Whether the strategy needs rows of exactly `LANE_WIDTH` entries
    pub fn needs_uniform_rows(&self) -> bool {
        matches!(self, Strategy::VectorRow | Strategy::VectorTransposed)
    }

    /// Kernel for this strategy; the parallel kernel uses Rayon's global pool
    pub fn kernel<T: Scalar>(&self) -> Box<dyn FlowKernel<T>> {
        match self {
            Strategy::Scalar => Box::new(ScalarKernel),
            Strategy::RowParallel => Box::new(ParallelKernel::new()),
            Strategy::VectorRow => Box::new(RowLaneKernel::<{ crate::matrix::LANE_WIDTH }>),
            Strategy::VectorTransposed => {
                Box::new(TransposedLaneKernel::<{ crate::matrix::LANE_WIDTH }>)
            }
        }
    }

    /// Kernel for this strategy sized by `params`
    ///
    /// The parallel kernel gets a dedicated pool of `params.n_threads` workers.
    pub fn build<T: Scalar>(&self, params: &SystemParameters) -> Result<Box<dyn FlowKernel<T>>> {
        match self {
            Strategy::RowParallel => Ok(Box::new(ParallelKernel::with_threads(params.n_threads)?)),
            other => Ok(other.kernel()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Strategy::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<_> = Strategy::ALL.iter().map(Strategy::as_str).collect();
                format!("unknown strategy '{}' (expected one of {})", s, known.join(", "))
            })
    }
}

/// Runs `strategy` once on `rows`
pub fn compute_flow<T: Scalar>(strategy: Strategy, rows: &dyn SparseRows<T>, weights: &[T]) -> Result<Vec<T>> {
    strategy.kernel().compute(rows, weights)
}

/// A kernel together with the flow vector it last produced
///
/// Each [`run`](FlowEngine::run) replaces the whole vector; a failed run
/// leaves it empty.
pub struct FlowEngine<T> {
    kernel: Box<dyn FlowKernel<T>>,
    flow: Vec<T>,
}

impl<T: Scalar> FlowEngine<T> {
    /// Wraps an existing kernel
    pub fn new(kernel: Box<dyn FlowKernel<T>>) -> Self {
        Self {
            kernel,
            flow: Vec::new(),
        }
    }

    /// Engine for a strategy using default kernel settings
    pub fn for_strategy(strategy: Strategy) -> Self {
        Self::new(strategy.kernel())
    }

    /// Name of the wrapped kernel
    pub fn kernel_name(&self) -> &'static str {
        self.kernel.name()
    }

    /// Recomputes the flow vector
    pub fn run(&mut self, rows: &dyn SparseRows<T>, weights: &[T]) -> Result<&[T]> {
        self.flow.clear();
        self.flow = self.kernel.compute(rows, weights)?;
        Ok(&self.flow)
    }

    /// The flow vector from the last successful run
    pub fn flow(&self) -> &[T] {
        &self.flow
    }
}
