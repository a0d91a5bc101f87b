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

use std::ops::{Add, AddAssign};

use crate::{
    cell::triangle::compute_normal,
    geometry::{matrix::Matrix, point::Point3, vector::Vector},
    numeric::scalar::Scalar,
};

/// Symmetric 4x4 quadric error matrix.
///
/// Each plane `n . x + d = 0` with unit `n` adds `[n; d][n; d]^T`, so
/// [`Quadric::evaluate`] is the sum of squared distances to all planes added.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Quadric<T: Scalar> {
    pub matrix: Matrix<T, 4, 4>,
}

impl<T: Scalar> Quadric<T> {
    pub fn zero() -> Self {
        Quadric {
            matrix: Matrix::zero(),
        }
    }

    /// Rank-1 quadric of the plane through `origin` with unit normal `n`.
    pub fn from_plane(n: &Vector<T, 3>, origin: &Point3<T>) -> Self {
        let d = -n.dot(&origin.as_vector());
        let v = Vector::from_coords([n[0], n[1], n[2], d]);
        Quadric {
            matrix: Matrix::outer(&v, &v),
        }
    }

    /// Adds the plane of the triangle. Returns `false`, leaving the quadric
    /// unchanged, when the triangle is degenerate.
    pub fn add_triangle(&mut self, x1: &Point3<T>, x2: &Point3<T>, x3: &Point3<T>) -> bool {
        let n = compute_normal(x1, x2, x3);
        if n.is_zero() {
            log::trace!("quadric: skipping degenerate triangle");
            return false;
        }
        *self += Quadric::from_plane(&n, x1);
        true
    }

    /// `[x; 1]^T Q [x; 1]`.
    pub fn evaluate(&self, x: &Point3<T>) -> T {
        let v = Vector::from_coords([x[0], x[1], x[2], T::one()]);
        v.dot(&self.matrix.mul_vec(&v))
    }

    /// Coefficients of the implicit form
    /// `a0 x^2 + a1 y^2 + a2 z^2 + a3 xy + a4 yz + a5 xz + a6 x + a7 y + a8 z + a9`.
    pub fn coefficients(&self) -> [T; 10] {
        let q = &self.matrix;
        let two = T::from_constant(2.0);
        [
            q[0][0],
            q[1][1],
            q[2][2],
            two * q[0][1],
            two * q[1][2],
            two * q[0][2],
            two * q[0][3],
            two * q[1][3],
            two * q[2][3],
            q[3][3],
        ]
    }
}

impl<T: Scalar> AddAssign for Quadric<T> {
    fn add_assign(&mut self, rhs: Quadric<T>) {
        self.matrix += &rhs.matrix;
    }
}

impl<T: Scalar> Add for Quadric<T> {
    type Output = Quadric<T>;

    fn add(mut self, rhs: Quadric<T>) -> Quadric<T> {
        self += rhs;
        self
    }
}
