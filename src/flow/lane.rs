//! Fixed-width lane register
//!
//! A portable stand-in for a hardware vector register. The operations are
//! written as straight-line loops over a fixed-size array so the compiler
//! lowers them to SIMD instructions when the target has them.

use std::ops::{Add, Mul};

use crate::matrix::Scalar;

/// `L` elements of `T`, aligned to a cache line
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, align(64))]
pub struct Lane<T, const L: usize>([T; L]);

impl<T: Scalar, const L: usize> Lane<T, L> {
    /// All lanes zero
    #[inline]
    pub fn zero() -> Self {
        Self([T::zero(); L])
    }

    /// All lanes set to `value`
    #[inline]
    pub fn splat(value: T) -> Self {
        Self([value; L])
    }

    /// Builds a lane from a per-lane function
    #[inline]
    pub fn from_fn<F: FnMut(usize) -> T>(f: F) -> Self {
        Self(std::array::from_fn(f))
    }

    /// Loads the first `L` elements of `src`
    ///
    /// Callers guarantee `src.len() >= L`.
    #[inline]
    pub fn load(src: &[T]) -> Self {
        let mut lanes = [T::zero(); L];
        lanes.copy_from_slice(&src[..L]);
        Self(lanes)
    }

    /// Gathers `table[idx[k]]` into lane `k`
    #[inline]
    pub fn gather(table: &[T], idx: &[usize]) -> Self {
        Self::from_fn(|k| table[idx[k]])
    }

    /// `self + a * b`, lane-wise
    #[inline]
    pub fn mul_add(self, a: Self, b: Self) -> Self {
        let mut out = self.0;
        for k in 0..L {
            out[k] = out[k] + a.0[k] * b.0[k];
        }
        Self(out)
    }

    /// Sums all lanes by pairwise halving
    #[inline]
    pub fn horizontal_add(self) -> T {
        let mut lanes = self.0;
        let mut len = L;
        while len > 1 {
            let half = len / 2;
            for k in 0..half {
                lanes[k] = lanes[k] + lanes[k + half];
            }
            // An odd element folds into the front
            if len % 2 == 1 {
                lanes[0] = lanes[0] + lanes[len - 1];
            }
            len = half;
        }
        if L == 0 {
            T::zero()
        } else {
            lanes[0]
        }
    }

    /// Writes the lanes into the first `L` slots of `dst`
    #[inline]
    pub fn store(self, dst: &mut [T]) {
        dst[..L].copy_from_slice(&self.0);
    }

    /// Lane contents
    pub fn as_array(&self) -> &[T; L] {
        &self.0
    }
}

impl<T: Scalar, const L: usize> Mul for Lane<T, L> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let mut out = self.0;
        for k in 0..L {
            out[k] = out[k] * rhs.0[k];
        }
        Self(out)
    }
}

impl<T: Scalar, const L: usize> Add for Lane<T, L> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let mut out = self.0;
        for k in 0..L {
            out[k] = out[k] + rhs.0[k];
        }
        Self(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment() {
        assert_eq!(std::mem::align_of::<Lane<f32, 16>>(), 64);
        assert_eq!(std::mem::size_of::<Lane<f32, 16>>(), 64);
    }

    #[test]
    fn test_horizontal_add() {
        let lane = Lane::<f64, 16>::from_fn(|k| k as f64);
        assert_eq!(lane.horizontal_add(), 120.0);

        let odd = Lane::<f64, 5>::from_fn(|k| (k + 1) as f64);
        assert_eq!(odd.horizontal_add(), 15.0);

        let single = Lane::<f64, 1>::splat(2.5);
        assert_eq!(single.horizontal_add(), 2.5);
    }

    #[test]
    fn test_gather_mul_store() {
        let table = [10.0f32, 20.0, 30.0, 40.0];
        let w = Lane::<f32, 4>::gather(&table, &[3, 0, 0, 2]);
        let v = Lane::<f32, 4>::load(&[1.0, 2.0, 0.0, 0.5, 99.0]);

        let mut out = [0.0f32; 4];
        (v * w).store(&mut out);
        assert_eq!(out, [40.0, 20.0, 0.0, 15.0]);
    }

    #[test]
    fn test_mul_add_accumulates() {
        let acc = Lane::<f32, 4>::splat(1.0);
        let a = Lane::from_fn(|k| k as f32);
        let b = Lane::splat(2.0);
        assert_eq!(acc.mul_add(a, b).as_array(), &[1.0, 3.0, 5.0, 7.0]);
        assert_eq!((acc + acc).as_array(), &[2.0; 4]);
    }
}
