//! ELLPACK graph layout
//!
//! Every row occupies exactly `width` slots in two row-major arrays. Slots
//! past a row's true degree hold value zero and column zero, so they add
//! nothing to a weighted sum over finite weights. The buffers are cache-line
//! aligned so a 16-lane `f32` row starts on a 64-byte boundary.

use std::ops::Range;

use aligned_vec::AVec;
use ndarray::ArrayView2;

use crate::error::Result;
use crate::flow::{FlowKernel, ScalarKernel};
use crate::matrix::{FlowGraph, LayoutSummary, Scalar, SparseRows};

/// Alignment of the ELLPACK buffers in bytes
pub const ELL_ALIGN: usize = 64;

/// A fixed-width padded sparse layout
#[derive(Clone, Debug)]
pub struct EllpackGraph<T> {
    n_vertices: usize,
    width: usize,
    col_idx: AVec<usize>,
    values: AVec<T>,
    degrees: Vec<usize>,
}

impl<T: Scalar> EllpackGraph<T> {
    pub(crate) fn from_parts(
        n_vertices: usize,
        width: usize,
        col_idx: AVec<usize>,
        values: AVec<T>,
        degrees: Vec<usize>,
    ) -> Self {
        debug_assert_eq!(col_idx.len(), n_vertices * width);
        debug_assert_eq!(values.len(), n_vertices * width);
        Self {
            n_vertices,
            width,
            col_idx,
            values,
            degrees,
        }
    }

    /// Slots per row
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of real (unpadded) entries in row `i`
    pub fn row_degree(&self, i: usize) -> usize {
        self.degrees[i]
    }

    /// Views the buffers as `n_vertices × width` arrays (values, columns)
    pub fn as_array_views(&self) -> Result<(ArrayView2<'_, T>, ArrayView2<'_, usize>)> {
        let shape = (self.n_vertices, self.width);
        Ok((
            ArrayView2::from_shape(shape, &self.values[..])?,
            ArrayView2::from_shape(shape, &self.col_idx[..])?,
        ))
    }
}

impl<T: Scalar> SparseRows<T> for EllpackGraph<T> {
    fn n_rows(&self) -> usize {
        self.n_vertices
    }

    fn row_range(&self, i: usize) -> Range<usize> {
        i * self.width..(i + 1) * self.width
    }

    fn col_indices(&self) -> &[usize] {
        &self.col_idx
    }

    fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T: Scalar> FlowGraph<T> for EllpackGraph<T> {
    fn vertex_count(&self) -> usize {
        self.n_vertices
    }

    fn nnz(&self) -> usize {
        self.degrees.iter().sum()
    }

    fn compute_flow(&self, weights: &[T]) -> Result<Vec<T>> {
        ScalarKernel.compute(self, weights)
    }

    fn describe(&self) -> LayoutSummary {
        let slots = self.values.len();
        LayoutSummary {
            layout: "ellpack",
            vertices: self.n_vertices,
            nnz: self.nnz(),
            stored_slots: slots,
            bytes: slots * (std::mem::size_of::<usize>() + std::mem::size_of::<T>()),
        }
    }
}
