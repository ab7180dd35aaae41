//! Compressed Sparse Row (CSR) graph layout

use std::fmt;
use std::ops::Range;

use crate::error::{Error, Result};
use crate::matrix::{check_weights, Edge, FlowGraph, LayoutSummary, Scalar, SparseRows};

/// A square sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores the adjacency of a graph using three arrays:
/// - row_ptr: Array of size n_vertices + 1 containing indices into col_idx and values arrays
/// - col_idx: Array of size nnz containing the destination vertex of each edge
/// - values: Array of size nnz containing the edge weights
#[derive(Clone)]
pub struct CsrGraph<T> {
    /// Number of vertices (rows and columns)
    pub n_vertices: usize,

    /// Row pointers (size: n_vertices + 1)
    /// row_ptr[i] is the index in col_idx and values where row i starts
    /// row_ptr[n_vertices] is equal to nnz
    pub row_ptr: Vec<usize>,

    /// Column indices (size: nnz)
    pub col_idx: Vec<usize>,

    /// Edge values (size: nnz)
    pub values: Vec<T>,
}

impl<T: Scalar> CsrGraph<T> {
    /// Creates a new CSR graph from raw arrays
    ///
    /// # Panics
    ///
    /// Panics if the input arrays are inconsistent. See
    /// [`try_new`](CsrGraph::try_new) for the checks and for a non-panicking
    /// variant.
    pub fn new(n_vertices: usize, row_ptr: Vec<usize>, col_idx: Vec<usize>, values: Vec<T>) -> Self {
        match Self::try_new(n_vertices, row_ptr, col_idx, values) {
            Ok(graph) => graph,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a new CSR graph from raw arrays, validating them first
    ///
    /// - row_ptr.len() must be n_vertices + 1, starting at 0
    /// - col_idx.len() must equal values.len()
    /// - row_ptr[n_vertices] must equal col_idx.len()
    /// - row_ptr must be non-decreasing and every column index below n_vertices
    ///
    /// # Errors
    ///
    /// [`Error::MalformedCsr`] for inconsistent arrays and
    /// [`Error::VertexOutOfRange`] for a column index past the last vertex.
    pub fn try_new(
        n_vertices: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        if row_ptr.len() != n_vertices + 1 {
            return Err(Error::MalformedCsr("row_ptr.len() must be n_vertices + 1"));
        }
        if col_idx.len() != values.len() {
            return Err(Error::MalformedCsr("col_idx.len() must equal values.len()"));
        }
        if row_ptr[0] != 0 {
            return Err(Error::MalformedCsr("row_ptr[0] must be 0"));
        }
        if row_ptr[n_vertices] != col_idx.len() {
            return Err(Error::MalformedCsr("row_ptr[n_vertices] must equal col_idx.len()"));
        }
        if !row_ptr.windows(2).all(|w| w[0] <= w[1]) {
            return Err(Error::MalformedCsr("row_ptr must be non-decreasing"));
        }

        for row in 0..n_vertices {
            if let Some(&col) = col_idx[row_ptr[row]..row_ptr[row + 1]]
                .iter()
                .find(|&&col| col >= n_vertices)
            {
                return Err(Error::VertexOutOfRange {
                    row,
                    col,
                    vertices: n_vertices,
                });
            }
        }

        Ok(Self {
            n_vertices,
            row_ptr,
            col_idx,
            values,
        })
    }

    /// Returns the number of stored edges
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns an iterator over the edges leaving vertex i
    ///
    /// Each item is a tuple (col_idx, value)
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(i < self.n_vertices, "Row index out of bounds");

        let start = self.row_ptr[i];
        let end = self.row_ptr[i + 1];

        self.col_idx[start..end]
            .iter()
            .zip(&self.values[start..end])
            .map(|(&col, val)| (col, val))
    }

    /// Walks the row pointers back into an edge list
    pub fn to_edges(&self) -> Vec<Edge<T>> {
        (0..self.n_vertices)
            .flat_map(|row| self.row_iter(row).map(move |(col, &value)| Edge::new(row, col, value)))
            .collect()
    }

    /// Creates a graph with no edges
    pub fn zeros(n_vertices: usize) -> Self {
        Self {
            n_vertices,
            row_ptr: vec![0; n_vertices + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<T: Scalar> SparseRows<T> for CsrGraph<T> {
    fn n_rows(&self) -> usize {
        self.n_vertices
    }

    fn row_range(&self, i: usize) -> Range<usize> {
        self.row_ptr[i]..self.row_ptr[i + 1]
    }

    fn col_indices(&self) -> &[usize] {
        &self.col_idx
    }

    fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T: Scalar> FlowGraph<T> for CsrGraph<T> {
    fn vertex_count(&self) -> usize {
        self.n_vertices
    }

    fn nnz(&self) -> usize {
        self.values.len()
    }

    fn compute_flow(&self, weights: &[T]) -> Result<Vec<T>> {
        check_weights(self.n_vertices, weights)?;
        Ok((0..self.n_vertices)
            .map(|i| {
                self.row_iter(i)
                    .fold(T::zero(), |acc, (col, &val)| acc + val * weights[col])
            })
            .collect())
    }

    fn describe(&self) -> LayoutSummary {
        let index = std::mem::size_of::<usize>();
        LayoutSummary {
            layout: "csr",
            vertices: self.n_vertices,
            nnz: self.values.len(),
            stored_slots: self.values.len(),
            bytes: self.row_ptr.len() * index
                + self.col_idx.len() * index
                + self.values.len() * std::mem::size_of::<T>(),
        }
    }
}

impl<T: Scalar> fmt::Debug for CsrGraph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CsrGraph {{")?;
        writeln!(f, "  vertices: {}", self.n_vertices)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        // Print a sample of the adjacency
        let max_rows_to_print = 5.min(self.n_vertices);

        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for i in 0..max_rows_to_print {
                write!(f, "    row {}: ", i)?;
                let start = self.row_ptr[i];
                let end = self.row_ptr[i + 1];

                if start == end {
                    writeln!(f, "(empty)")?;
                } else {
                    let max_elements = 5.min(end - start);

                    for j in start..(start + max_elements) {
                        write!(f, "({}, {:?}) ", self.col_idx[j], self.values[j])?;
                    }

                    if end - start > max_elements {
                        write!(f, "... ({} more)", end - start - max_elements)?;
                    }

                    writeln!(f)?;
                }
            }

            if self.n_vertices > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", self.n_vertices - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}
