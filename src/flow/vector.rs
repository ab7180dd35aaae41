//! Lane-vectorized kernels
//!
//! Both kernels require every row to hold exactly `L` stored entries. The
//! ELLPACK converter produces that shape when its width equals `L`; a CSR
//! graph satisfies it only when every vertex has out-degree `L`. The check
//! runs before any arithmetic and reports the first offending row.

use log::debug;

use crate::error::{Error, Result};
use crate::flow::lane::Lane;
use crate::flow::FlowKernel;
use crate::matrix::{check_weights, Scalar, SparseRows, LANE_WIDTH};

/// Fails with [`Error::LaneWidthMismatch`] unless every row has `lanes` entries
pub fn check_uniform_rows<T>(rows: &dyn SparseRows<T>, lanes: usize) -> Result<()> {
    match (0..rows.n_rows()).find(|&i| rows.row_len(i) != lanes) {
        Some(row) => Err(Error::LaneWidthMismatch {
            row,
            degree: rows.row_len(row),
            lanes,
        }),
        None => Ok(()),
    }
}

#[inline]
fn row_lane<T: Scalar, const L: usize>(cols: &[usize], vals: &[T], start: usize, weights: &[T]) -> T {
    let v = Lane::<T, L>::load(&vals[start..start + L]);
    let w = Lane::<T, L>::gather(weights, &cols[start..start + L]);
    (v * w).horizontal_add()
}

/// One row per lane register, reduced with a horizontal sum
#[derive(Debug, Clone, Copy, Default)]
pub struct RowLaneKernel<const L: usize = LANE_WIDTH>;

impl<T: Scalar, const L: usize> FlowKernel<T> for RowLaneKernel<L> {
    fn name(&self) -> &'static str {
        "vector-row"
    }

    fn compute(&self, rows: &dyn SparseRows<T>, weights: &[T]) -> Result<Vec<T>> {
        check_weights(rows.n_rows(), weights)?;
        check_uniform_rows(rows, L)?;
        let cols = rows.col_indices();
        let vals = rows.values();

        Ok((0..rows.n_rows())
            .map(|i| row_lane::<T, L>(cols, vals, rows.row_range(i).start, weights))
            .collect())
    }
}

/// `L` rows per block, one column slot per step
///
/// Lane `k` of the accumulator belongs to row `base + k`; at slot `j` it loads
/// that row's `j`-th value and gathered weight. After `L` slots the
/// accumulator holds the flow of the whole block and is stored directly into
/// `flow[base..base + L]`. A final partial block (fewer than `L` rows) is
/// reduced row by row with the row-lane path.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransposedLaneKernel<const L: usize = LANE_WIDTH>;

impl<T: Scalar, const L: usize> FlowKernel<T> for TransposedLaneKernel<L> {
    fn name(&self) -> &'static str {
        "vector-transposed"
    }

    fn compute(&self, rows: &dyn SparseRows<T>, weights: &[T]) -> Result<Vec<T>> {
        check_weights(rows.n_rows(), weights)?;
        check_uniform_rows(rows, L)?;
        let cols = rows.col_indices();
        let vals = rows.values();
        let n = rows.n_rows();

        let mut flow = vec![T::zero(); n];
        let full = if L == 0 { 0 } else { n - n % L };

        for base in (0..full).step_by(L.max(1)) {
            let starts: [usize; L] = std::array::from_fn(|k| rows.row_range(base + k).start);
            let mut acc = Lane::<T, L>::zero();
            for j in 0..L {
                let v = Lane::from_fn(|k| vals[starts[k] + j]);
                let w = Lane::from_fn(|k| weights[cols[starts[k] + j]]);
                acc = acc.mul_add(v, w);
            }
            acc.store(&mut flow[base..base + L]);
        }

        if full < n {
            debug!("transposed kernel: {} tail rows use the row-lane path", n - full);
            for i in full..n {
                flow[i] = row_lane::<T, L>(cols, vals, rows.row_range(i).start, weights);
            }
        }

        Ok(flow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::ScalarKernel;
    use crate::matrix::{CooGraph, CsrGraph, Edge};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_close(a: &[f32], b: &[f32]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() <= 1e-5 * y.abs().max(1.0), "{} vs {}", x, y);
        }
    }

    #[test]
    fn test_short_row_fails_fast() {
        // Row 0 has degree 3, lanes are 16
        let coo = CooGraph::from_edges(
            20,
            vec![Edge::new(0, 1, 1.0f32), Edge::new(0, 2, 1.0), Edge::new(0, 3, 1.0)],
            vec![1.0; 20],
        )
        .unwrap();
        let csr = coo.to_csr();

        let err = RowLaneKernel::<16>.compute(&csr, coo.weights()).unwrap_err();
        assert!(matches!(
            err,
            Error::LaneWidthMismatch { row: 0, degree: 3, lanes: 16 }
        ));

        let err = TransposedLaneKernel::<16>.compute(&csr, coo.weights()).unwrap_err();
        assert!(matches!(err, Error::LaneWidthMismatch { row: 0, .. }));
    }

    #[test]
    fn test_padded_ellpack_satisfies_lanes() {
        let coo = CooGraph::from_edges(
            20,
            vec![Edge::new(0, 1, 2.0f32), Edge::new(0, 2, 3.0), Edge::new(5, 3, 1.0)],
            vec![1.0; 20],
        )
        .unwrap();
        let ell = coo.to_ellpack(Some(16)).unwrap();

        let row = RowLaneKernel::<16>.compute(&ell, coo.weights()).unwrap();
        let transposed = TransposedLaneKernel::<16>.compute(&ell, coo.weights()).unwrap();

        assert_eq!(row[0], 5.0);
        assert_eq!(row[5], 1.0);
        assert_eq!(row, transposed);
    }

    #[test]
    fn test_regular_csr_matches_scalar() {
        let mut rng = StdRng::seed_from_u64(21);
        // 70 rows: four full blocks of 16 and a tail of 6
        let coo = CooGraph::<f32>::random_regular(70, 16, &mut rng).unwrap();
        let csr = coo.to_csr();

        let expected = ScalarKernel.compute(&csr, coo.weights()).unwrap();
        let row = RowLaneKernel::<16>.compute(&csr, coo.weights()).unwrap();
        let transposed = TransposedLaneKernel::<16>.compute(&csr, coo.weights()).unwrap();

        assert_close(&row, &expected);
        assert_close(&transposed, &expected);
    }

    #[test]
    fn test_small_lane_width() {
        // 3 rows of width 2 with lanes of 2: one block plus a tail row
        let csr = CsrGraph::new(
            3,
            vec![0, 2, 4, 6],
            vec![1, 2, 0, 2, 0, 1],
            vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0],
        );
        let weights = [1.0, 10.0, 100.0];

        let flow = TransposedLaneKernel::<2>.compute(&csr, &weights).unwrap();
        assert_eq!(flow, vec![210.0, 403.0, 65.0]);
    }
}
