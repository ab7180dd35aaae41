//! # Row-parallel kernel
//!
//! Rows are spread across Rayon workers. Each output slot is written by
//! exactly one worker and the inputs are only read, so no locking is needed.

use std::sync::Arc;

use log::debug;
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::error::Result;
use crate::flow::scalar::row_dot;
use crate::flow::FlowKernel;
use crate::matrix::{check_weights, Scalar, SparseRows};

/// Parallel per-row reduction
///
/// Runs on Rayon's global pool unless built with [`ParallelKernel::with_threads`].
#[derive(Clone, Default)]
pub struct ParallelKernel {
    pool: Option<Arc<ThreadPool>>,
}

impl ParallelKernel {
    /// Uses the global Rayon pool
    pub fn new() -> Self {
        Self { pool: None }
    }

    /// Uses a dedicated pool of `n_threads` workers
    pub fn with_threads(n_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .build()?;
        debug!("row-parallel kernel using {} threads", pool.current_num_threads());
        Ok(Self {
            pool: Some(Arc::new(pool)),
        })
    }

    /// Number of workers rows are spread over
    pub fn num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }
}

impl<T: Scalar> FlowKernel<T> for ParallelKernel {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn compute(&self, rows: &dyn SparseRows<T>, weights: &[T]) -> Result<Vec<T>> {
        check_weights(rows.n_rows(), weights)?;
        let cols = rows.col_indices();
        let vals = rows.values();

        let fill = |flow: &mut [T]| {
            flow.par_iter_mut().enumerate().for_each(|(i, out)| {
                let range = rows.row_range(i);
                *out = row_dot(&cols[range.clone()], &vals[range], weights);
            })
        };

        let mut flow = vec![T::zero(); rows.n_rows()];
        match &self.pool {
            Some(pool) => pool.install(|| fill(&mut flow)),
            None => fill(&mut flow),
        }
        Ok(flow)
    }
}
