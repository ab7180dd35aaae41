//! Sequential reference kernel

use crate::error::Result;
use crate::flow::FlowKernel;
use crate::matrix::{check_weights, Scalar, SparseRows};

/// Sums `value * weights[col]` over one row's entries
#[inline]
pub fn row_dot<T: Scalar>(cols: &[usize], vals: &[T], weights: &[T]) -> T {
    cols.iter()
        .zip(vals)
        .fold(T::zero(), |acc, (&col, &val)| acc + val * weights[col])
}

/// One row after another on the calling thread
///
/// Every other kernel is checked against this one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarKernel;

impl<T: Scalar> FlowKernel<T> for ScalarKernel {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn compute(&self, rows: &dyn SparseRows<T>, weights: &[T]) -> Result<Vec<T>> {
        check_weights(rows.n_rows(), weights)?;
        let cols = rows.col_indices();
        let vals = rows.values();

        Ok((0..rows.n_rows())
            .map(|i| {
                let range = rows.row_range(i);
                row_dot(&cols[range.clone()], &vals[range], weights)
            })
            .collect())
    }
}
