//! Utilities for handing our CSR graphs to the sprs reference implementation

use ndarray::Array1;
use num_traits::Num;
use sprs::CsMat;

use crate::error::{Error, Result};
use crate::matrix::{check_weights, CsrGraph, Scalar};

/// Scalars the sprs matrix-vector product is available for
pub trait ReferenceScalar: Scalar + Default {
    /// `matrix * x` computed by sprs
    fn sprs_mat_vec(matrix: &CsMat<Self>, x: &Array1<Self>) -> Array1<Self>;
}

macro_rules! impl_reference_scalar {
    ($($t:ty),*) => {
        $(
            impl ReferenceScalar for $t {
                fn sprs_mat_vec(matrix: &CsMat<$t>, x: &Array1<$t>) -> Array1<$t> {
                    matrix * x
                }
            }
        )*
    };
}

impl_reference_scalar!(f32, f64);

/// Converts our CSR graph to a sprs CsMat in CSR storage
///
/// # Errors
///
/// [`Error::ExternalLibrary`] if sprs rejects the arrays.
pub fn to_sprs_csr<T>(graph: &CsrGraph<T>) -> Result<CsMat<T>>
where
    T: Copy + Num + Default,
{
    CsMat::try_new(
        (graph.n_vertices, graph.n_vertices),
        graph.row_ptr.clone(),
        graph.col_idx.clone(),
        graph.values.clone(),
    )
    .map_err(|(_, _, _, e)| Error::ExternalLibrary(e.to_string()))
}

/// Converts a square sprs matrix back into a CSR graph
///
/// # Errors
///
/// [`Error::ExternalLibrary`] if the matrix is not square, or the error from
/// [`CsrGraph::try_new`] if its raw arrays are inconsistent.
pub fn from_sprs_csr<T: Scalar + Default>(matrix: CsMat<T>) -> Result<CsrGraph<T>> {
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (rows, cols) = matrix.shape();
    if rows != cols {
        return Err(Error::ExternalLibrary(format!(
            "expected a square matrix, got {} × {}",
            rows, cols
        )));
    }
    let (indptr, indices, data) = matrix.into_raw_storage();
    CsrGraph::try_new(rows, indptr, indices, data)
}

/// Weighted flow computed by sprs, used as a comparison baseline
///
/// # Errors
///
/// Fails on a weight vector of the wrong length or if sprs rejects the CSR
/// arrays.
pub fn reference_flow<T: ReferenceScalar>(graph: &CsrGraph<T>, weights: &[T]) -> Result<Vec<T>> {
    check_weights(graph.n_vertices, weights)?;
    let matrix = to_sprs_csr(graph)?;
    let x = Array1::from(weights.to_vec());
    Ok(T::sprs_mat_vec(&matrix, &x).to_vec())
}
