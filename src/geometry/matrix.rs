// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::{
    array,
    ops::{AddAssign, Index, IndexMut},
};

use crate::{geometry::vector::Vector, numeric::scalar::Scalar};

/// Generic row-major matrix R x C
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix<T: Scalar, const R: usize, const C: usize>(pub [[T; C]; R]);

// ---------- Basics ----------
impl<T: Scalar, const R: usize, const C: usize> Matrix<T, R, C> {
    #[inline]
    pub fn new(data: [[T; C]; R]) -> Self {
        Matrix(data)
    }

    #[inline]
    pub fn zero() -> Self {
        Matrix([[T::zero(); C]; R])
    }

    /// Scale all entries by `s`.
    #[inline]
    pub fn scale(&self, s: T) -> Self {
        Matrix(array::from_fn(|i| array::from_fn(|j| self[i][j] * s)))
    }

    /// Outer product: a (R) * b^T (C) => R x C
    #[inline]
    pub fn outer(a: &Vector<T, R>, b: &Vector<T, C>) -> Matrix<T, R, C> {
        Matrix(array::from_fn(|i| array::from_fn(|j| a[i] * b[j])))
    }

    /// Matrix-vector product.
    #[inline]
    pub fn mul_vec(&self, v: &Vector<T, C>) -> Vector<T, R> {
        Vector::from_coords(array::from_fn(|i| {
            let mut acc = T::zero();
            for j in 0..C {
                acc = acc + self[i][j] * v[j];
            }
            acc
        }))
    }
}

impl<T: Scalar> Matrix<T, 2, 2> {
    #[inline]
    pub fn determinant(&self) -> T {
        self[0][0] * self[1][1] - self[0][1] * self[1][0]
    }

    /// Solves `self * x = rhs` by Cramer's rule.
    ///
    /// Returns `None` when `|det| <= rel_tol * (|a00 a11| + |a01 a10|)`, i.e. when
    /// the determinant is lost in the cancellation of its own two products.
    pub fn solve(&self, rhs: &[T; 2], rel_tol: T) -> Option<[T; 2]> {
        let det = self.determinant();
        let scale = (self[0][0] * self[1][1]).abs() + (self[0][1] * self[1][0]).abs();
        if det.abs() <= rel_tol * scale {
            return None;
        }
        let x0 = (rhs[0] * self[1][1] - self[0][1] * rhs[1]) / det;
        let x1 = (self[0][0] * rhs[1] - rhs[0] * self[1][0]) / det;
        Some([x0, x1])
    }
}

// ---------- Indexing ----------
impl<T: Scalar, const R: usize, const C: usize> Index<usize> for Matrix<T, R, C> {
    type Output = [T; C];
    #[inline]
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl<T: Scalar, const R: usize, const C: usize> IndexMut<usize> for Matrix<T, R, C> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.0[i]
    }
}

impl<T: Scalar, const R: usize, const C: usize> Default for Matrix<T, R, C> {
    fn default() -> Self {
        Matrix::zero()
    }
}

// ---------- Arithmetic ----------
impl<T: Scalar, const R: usize, const C: usize> AddAssign<&Matrix<T, R, C>> for Matrix<T, R, C> {
    #[inline]
    fn add_assign(&mut self, rhs: &Matrix<T, R, C>) {
        for i in 0..R {
            for j in 0..C {
                self[i][j] = self[i][j] + rhs[i][j];
            }
        }
    }
}
