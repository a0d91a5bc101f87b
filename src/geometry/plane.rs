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

use crate::{
    geometry::{point::Point3, util::PLANE_PARALLEL_TOL, vector::Vector3},
    numeric::scalar::Scalar,
};

/// Plane `normal . x + d = 0`. The normal need not be unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane<T: Scalar> {
    pub normal: Vector3<T>,
    pub d: T,
}

impl<T: Scalar> Plane<T> {
    /// Plane through `origin` with the given normal.
    pub fn from_normal_and_point(normal: Vector3<T>, origin: &Point3<T>) -> Self {
        let d = -normal.dot(&origin.as_vector());
        Plane { normal, d }
    }

    /// `normal . x + d`. A signed distance only if the normal is unit length.
    #[inline]
    pub fn evaluate(&self, x: &Point3<T>) -> T {
        self.normal.dot(&x.as_vector()) + self.d
    }

    /// Orthogonal projection of `x` onto the plane. Works for any non-zero
    /// normal; a zero normal returns `x` unchanged.
    pub fn project_point(&self, x: &Point3<T>) -> Point3<T> {
        let nn = self.normal.norm_squared();
        if nn.is_zero() {
            return *x;
        }
        let s = self.evaluate(x) / nn;
        x.add_vector(&self.normal.scale(-s))
    }

    /// Intersects the segment `p1 -> p2` with the plane.
    ///
    /// Returns `(t, x)` with `x = p1 + t (p2 - p1)` when the crossing lies within
    /// `t` in `[0, 1]`. A segment that is parallel to the plane (including one
    /// lying in it) does not intersect.
    pub fn intersect_segment(&self, p1: &Point3<T>, p2: &Point3<T>) -> Option<(T, Point3<T>)> {
        let p21 = p1.vector_to(p2);
        let num = -self.evaluate(p1);
        let den = self.normal.dot(&p21);

        if den.abs() <= (T::from_constant(PLANE_PARALLEL_TOL) * num).abs() {
            return None;
        }
        let t = num / den;
        if t >= T::zero() && t <= T::one() {
            Some((t, p1.add_vector(&p21.scale(t))))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_lands_on_plane() {
        let normal = Vector3::new(0.0, 0.0, -3.0);
        let plane = Plane::from_normal_and_point(normal, &Point3::new(4.0, 4.0, 1.0));
        let p = plane.project_point(&Point3::new(0.3, -2.0, 7.0));
        assert_eq!(p, Point3::new(0.3, -2.0, 1.0));
        assert_eq!(plane.evaluate(&p), 0.0);
    }

    #[test]
    fn segment_crossing_and_parallel() {
        let plane = Plane::from_normal_and_point(Vector3::new(0.0, 0.0, 2.0), &Point3::zero());
        let (t, x) = plane
            .intersect_segment(&Point3::new(1.0, 1.0, -1.0), &Point3::new(1.0, 1.0, 3.0))
            .expect("segment crosses z = 0");
        assert_eq!(t, 0.25);
        assert_eq!(x, Point3::new(1.0, 1.0, 0.0));

        assert!(
            plane
                .intersect_segment(&Point3::new(0.0, 0.0, 1.0), &Point3::new(1.0, 0.0, 1.0))
                .is_none()
        );
        assert!(
            plane
                .intersect_segment(&Point3::new(0.0, 0.0, 1.0), &Point3::new(0.0, 0.0, 2.0))
                .is_none()
        );
    }
}
