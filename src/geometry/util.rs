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

//! Tolerances used throughout the cell kernel.
//!
//! Each operation family has its own constant with its own units.

/// Relative to the projection numerator `(p2 - p1) . (x - p1)`. Below a squared
/// segment length of `DISTANCE_TO_LINE_TOL * |num|` the closest point is taken
/// to be an endpoint without interpolating.
pub const DISTANCE_TO_LINE_TOL: f64 = 1e-5;

/// Relative determinant tolerance of the 2x2 normal equations in
/// `distance_between_lines` / `distance_between_segments` (`D <= tol * a * c`).
pub const LINES_PARALLEL_REL_TOL: f64 = 1e-12;

/// Relative determinant tolerance of the least-squares system in
/// `line::intersection`.
pub const INTERSECTION_REL_TOL: f64 = 1e-12;

/// `line::intersection_3d` accepts closest approaches shorter than this
/// fraction of the longer segment's length.
pub const INTERSECTION_3D_REL_TOL: f64 = 1e-6;

/// Relative determinant tolerance for barycentric and in-plane parametric solves.
pub const BARYCENTRIC_REL_TOL: f64 = 1e-12;

/// Relative to `|n . (p0 - p1)|`. A line whose `|n . (p2 - p1)|` falls below
/// `PLANE_PARALLEL_TOL` times that numerator is parallel to the plane.
pub const PLANE_PARALLEL_TOL: f64 = 1e-6;

/// A triangle with `|e1 x e2|^2 <= ZERO_AREA_REL_TOL * |e1|^2 * |e2|^2` has no
/// usable in-plane frame.
pub const ZERO_AREA_REL_TOL: f64 = 1e-24;

#[inline(always)]
pub(crate) fn within_unit<T: crate::numeric::scalar::Scalar>(t: T) -> bool {
    t >= T::zero() && t <= T::one()
}
