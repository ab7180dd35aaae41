//! Conversion functions from the COO store into the compressed layouts

use aligned_vec::AVec;
use log::debug;

use crate::error::{Error, Result};
use crate::matrix::ellpack::ELL_ALIGN;
use crate::matrix::{CooGraph, CsrGraph, DenseGraph, EllpackGraph, Scalar};

impl<T: Scalar> CsrGraph<T> {
    /// Builds CSR arrays with a single pass over the sorted edge list
    ///
    /// Rows without edges get repeated row pointers, so the result is valid
    /// for any degree distribution.
    pub fn from_coo(coo: &CooGraph<T>) -> Self {
        let n = coo.n_vertices();
        let nnz = coo.edges().len();

        let mut row_ptr = Vec::with_capacity(n + 1);
        let mut col_idx = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        row_ptr.push(0);
        let mut current_row = 0;

        for edge in coo.edges() {
            // Close every row up to this edge's row, including empty ones
            while edge.row > current_row {
                row_ptr.push(col_idx.len());
                current_row += 1;
            }
            col_idx.push(edge.col);
            values.push(edge.value);
        }

        // Trailing empty rows and the closing sentinel
        while row_ptr.len() < n + 1 {
            row_ptr.push(col_idx.len());
        }

        debug!("converted to CSR: {} vertices, {} nnz", n, nnz);
        CsrGraph::new(n, row_ptr, col_idx, values)
    }
}

impl<T: Scalar> EllpackGraph<T> {
    /// Packs the edge list into fixed-width rows
    ///
    /// With `width == None` the width is the largest out-degree. Unused slots
    /// hold value zero and column zero.
    ///
    /// # Errors
    ///
    /// [`Error::LayoutMismatch`] if an explicit width is smaller than some
    /// row's degree.
    pub fn from_coo(coo: &CooGraph<T>, width: Option<usize>) -> Result<Self> {
        let n = coo.n_vertices();
        let degrees = coo.out_degrees();
        let max_degree = degrees.iter().copied().max().unwrap_or(0);
        let width = width.unwrap_or(max_degree);

        if let Some((row, &degree)) = degrees.iter().enumerate().find(|&(_, &d)| d > width) {
            return Err(Error::LayoutMismatch { row, degree, width });
        }

        let slots = n * width;
        let mut col_idx: AVec<usize> = AVec::from_iter(ELL_ALIGN, std::iter::repeat(0).take(slots));
        let mut values: AVec<T> = AVec::from_iter(ELL_ALIGN, std::iter::repeat(T::zero()).take(slots));

        // Rows are contiguous in the sorted edge list
        let mut fill = vec![0usize; n];
        for edge in coo.edges() {
            let slot = edge.row * width + fill[edge.row];
            col_idx[slot] = edge.col;
            values[slot] = edge.value;
            fill[edge.row] += 1;
        }

        debug!(
            "converted to ELLPACK: {} vertices, width {}, {} padding slots",
            n,
            width,
            slots - coo.edges().len()
        );
        Ok(EllpackGraph::from_parts(n, width, col_idx, values, degrees))
    }
}

impl<T: Scalar> CooGraph<T> {
    /// Shorthand for [`CsrGraph::from_coo`]
    pub fn to_csr(&self) -> CsrGraph<T> {
        CsrGraph::from_coo(self)
    }

    /// Shorthand for [`EllpackGraph::from_coo`]
    pub fn to_ellpack(&self, width: Option<usize>) -> Result<EllpackGraph<T>> {
        EllpackGraph::from_coo(self, width)
    }

    /// Shorthand for [`DenseGraph::from_coo`]
    pub fn to_dense(&self) -> DenseGraph<T> {
        DenseGraph::from_coo(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{Edge, SparseRows};

    fn graph() -> CooGraph<f64> {
        // Row 1 and row 3 have no out-edges
        CooGraph::from_edges(
            5,
            vec![
                Edge::new(0, 1, 1.0),
                Edge::new(0, 4, 2.0),
                Edge::new(2, 0, 3.0),
                Edge::new(4, 3, 4.0),
            ],
            vec![1.0; 5],
        )
        .unwrap()
    }

    #[test]
    fn test_csr_with_empty_rows() {
        let csr = graph().to_csr();

        assert_eq!(csr.row_ptr, vec![0, 2, 2, 3, 3, 4]);
        assert_eq!(csr.col_idx, vec![1, 4, 0, 3]);
        assert_eq!(csr.values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_csr_trailing_empty_rows() {
        let coo = CooGraph::from_edges(4, vec![Edge::new(0, 1, 1.0)], vec![1.0; 4]).unwrap();
        let csr = coo.to_csr();
        assert_eq!(csr.row_ptr, vec![0, 1, 1, 1, 1]);
    }

    #[test]
    fn test_csr_no_vertices() {
        let coo = CooGraph::<f32>::from_edges(0, vec![], vec![]).unwrap();
        assert_eq!(coo.to_csr().row_ptr, vec![0]);
    }

    #[test]
    fn test_ellpack_padding() {
        let ell = graph().to_ellpack(None).unwrap();

        assert_eq!(ell.width(), 2);
        assert_eq!(ell.col_indices(), &[1, 4, 0, 0, 0, 0, 0, 0, 3, 0]);
        assert_eq!(ell.values(), &[1.0, 2.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 4.0, 0.0]);
        assert_eq!(ell.row_degree(0), 2);
        assert_eq!(ell.row_degree(1), 0);
        assert_eq!(ell.row_len(1), 2);
    }

    #[test]
    fn test_ellpack_wider_than_needed() {
        let ell = graph().to_ellpack(Some(4)).unwrap();
        assert_eq!(ell.width(), 4);
        assert_eq!(ell.stored_entries(), 20);
    }

    #[test]
    fn test_ellpack_width_too_small() {
        let err = graph().to_ellpack(Some(1)).unwrap_err();
        assert!(matches!(
            err,
            Error::LayoutMismatch { row: 0, degree: 2, width: 1 }
        ));
    }
}
