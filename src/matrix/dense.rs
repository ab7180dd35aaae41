//! Dense adjacency layout, for small graphs and as an independent oracle

use ndarray::Array2;

use crate::error::Result;
use crate::matrix::{check_weights, CooGraph, FlowGraph, LayoutSummary, Scalar};

/// An `n × n` adjacency matrix holding edge values
#[derive(Debug, Clone)]
pub struct DenseGraph<T> {
    adjacency: Array2<T>,
}

impl<T: Scalar> DenseGraph<T> {
    /// Expands the COO store into a dense matrix
    pub fn from_coo(coo: &CooGraph<T>) -> Self {
        let n = coo.n_vertices();
        let mut adjacency = Array2::from_elem((n, n), T::zero());
        for e in coo.edges() {
            adjacency[[e.row, e.col]] = e.value;
        }
        Self { adjacency }
    }

    /// The underlying matrix
    pub fn adjacency(&self) -> &Array2<T> {
        &self.adjacency
    }
}

impl<T: Scalar> FlowGraph<T> for DenseGraph<T> {
    fn vertex_count(&self) -> usize {
        self.adjacency.nrows()
    }

    fn nnz(&self) -> usize {
        self.adjacency.iter().filter(|v| !v.is_zero()).count()
    }

    fn compute_flow(&self, weights: &[T]) -> Result<Vec<T>> {
        check_weights(self.vertex_count(), weights)?;
        Ok(self
            .adjacency
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .zip(weights)
                    .fold(T::zero(), |acc, (&a, &w)| acc + a * w)
            })
            .collect())
    }

    fn describe(&self) -> LayoutSummary {
        LayoutSummary {
            layout: "dense",
            vertices: self.vertex_count(),
            nnz: self.nnz(),
            stored_slots: self.adjacency.len(),
            bytes: self.adjacency.len() * std::mem::size_of::<T>(),
        }
    }
}
