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

//! Boolean triangle/triangle overlap after O. Devillers and P. Guigue,
//! "Faster Triangle-Triangle Intersection Tests" (INRIA RR-4488, 2002).
//!
//! Only orientation predicates are evaluated; the intersection segment is
//! never constructed.

use crate::{
    geometry::{
        point::{Point2, Point3},
        vector::Vector3,
    },
    kernel::orientation::{orient2d, orient3d},
    numeric::scalar::Scalar,
};

/// Returns true if triangles `(p1, q1, r1)` and `(p2, q2, r2)` share at least
/// one point (touching counts).
pub fn tri_tri_overlap<T: Scalar>(
    p1: &Point3<T>,
    q1: &Point3<T>,
    r1: &Point3<T>,
    p2: &Point3<T>,
    q2: &Point3<T>,
    r2: &Point3<T>,
) -> bool {
    // Vertices of T1 against the plane of T2.
    let dp1 = orient3d(r2, p2, q2, p1).sign();
    let dq1 = orient3d(r2, p2, q2, q1).sign();
    let dr1 = orient3d(r2, p2, q2, r1).sign();

    if dp1 * dq1 > 0 && dp1 * dr1 > 0 {
        return false;
    }

    // Vertices of T2 against the plane of T1.
    let dp2 = orient3d(r1, p1, q1, p2).sign();
    let dq2 = orient3d(r1, p1, q1, q2).sign();
    let dr2 = orient3d(r1, p1, q1, r2).sign();

    if dp2 * dq2 > 0 && dp2 * dr2 > 0 {
        return false;
    }

    let n1 = r1.vector_to(p1).cross(&r1.vector_to(q1));

    // Permute T1 so that p1 is alone on its side of T2's plane.
    if dp1 > 0 {
        if dq1 > 0 {
            tri_tri_3d([r1, p1, q1], [p2, r2, q2], [dp2, dr2, dq2], &n1)
        } else if dr1 > 0 {
            tri_tri_3d([q1, r1, p1], [p2, r2, q2], [dp2, dr2, dq2], &n1)
        } else {
            tri_tri_3d([p1, q1, r1], [p2, q2, r2], [dp2, dq2, dr2], &n1)
        }
    } else if dp1 < 0 {
        if dq1 < 0 {
            tri_tri_3d([r1, p1, q1], [p2, q2, r2], [dp2, dq2, dr2], &n1)
        } else if dr1 < 0 {
            tri_tri_3d([q1, r1, p1], [p2, q2, r2], [dp2, dq2, dr2], &n1)
        } else {
            tri_tri_3d([p1, q1, r1], [p2, r2, q2], [dp2, dr2, dq2], &n1)
        }
    } else if dq1 < 0 {
        if dr1 >= 0 {
            tri_tri_3d([q1, r1, p1], [p2, r2, q2], [dp2, dr2, dq2], &n1)
        } else {
            tri_tri_3d([p1, q1, r1], [p2, q2, r2], [dp2, dq2, dr2], &n1)
        }
    } else if dq1 > 0 {
        if dr1 > 0 {
            tri_tri_3d([p1, q1, r1], [p2, r2, q2], [dp2, dr2, dq2], &n1)
        } else {
            tri_tri_3d([q1, r1, p1], [p2, q2, r2], [dp2, dq2, dr2], &n1)
        }
    } else if dr1 > 0 {
        tri_tri_3d([r1, p1, q1], [p2, q2, r2], [dp2, dq2, dr2], &n1)
    } else if dr1 < 0 {
        tri_tri_3d([r1, p1, q1], [p2, r2, q2], [dp2, dr2, dq2], &n1)
    } else {
        coplanar_overlap([p1, q1, r1], [p2, q2, r2], &n1)
    }
}

/// Second permutation step: bring T2 into canonical form with respect to the
/// signs of its vertices against T1's plane, then run the interval test.
fn tri_tri_3d<T: Scalar>(
    t1: [&Point3<T>; 3],
    t2: [&Point3<T>; 3],
    s: [i8; 3],
    n1: &Vector3<T>,
) -> bool {
    let [p1, q1, r1] = t1;
    let [p2, q2, r2] = t2;
    let [dp2, dq2, dr2] = s;

    if dp2 > 0 {
        if dq2 > 0 {
            check_min_max([p1, r1, q1], [r2, p2, q2])
        } else if dr2 > 0 {
            check_min_max([p1, r1, q1], [q2, r2, p2])
        } else {
            check_min_max([p1, q1, r1], [p2, q2, r2])
        }
    } else if dp2 < 0 {
        if dq2 < 0 {
            check_min_max([p1, q1, r1], [r2, p2, q2])
        } else if dr2 < 0 {
            check_min_max([p1, q1, r1], [q2, r2, p2])
        } else {
            check_min_max([p1, r1, q1], [p2, q2, r2])
        }
    } else if dq2 < 0 {
        if dr2 >= 0 {
            check_min_max([p1, r1, q1], [q2, r2, p2])
        } else {
            check_min_max([p1, q1, r1], [p2, q2, r2])
        }
    } else if dq2 > 0 {
        if dr2 > 0 {
            check_min_max([p1, r1, q1], [p2, q2, r2])
        } else {
            check_min_max([p1, q1, r1], [q2, r2, p2])
        }
    } else if dr2 > 0 {
        check_min_max([p1, q1, r1], [r2, p2, q2])
    } else if dr2 < 0 {
        check_min_max([p1, r1, q1], [r2, p2, q2])
    } else {
        coplanar_overlap(t1, t2, n1)
    }
}

/// Overlap of the two intervals cut on the planes' intersection line.
#[inline]
fn check_min_max<T: Scalar>(t1: [&Point3<T>; 3], t2: [&Point3<T>; 3]) -> bool {
    let [p1, q1, r1] = t1;
    let [p2, q2, r2] = t2;

    if orient3d(q1, p2, p1, q2) > T::zero() {
        return false;
    }
    orient3d(p1, p2, r1, r2) <= T::zero()
}

/// Coplanar case: project both triangles on the axis plane that maximizes the
/// projected area of T1 and run the 2D test.
fn coplanar_overlap<T: Scalar>(t1: [&Point3<T>; 3], t2: [&Point3<T>; 3], n1: &Vector3<T>) -> bool {
    let drop = n1.dominant_axis();
    let a = t1.map(|p| p.drop_axis(drop));
    let b = t2.map(|p| p.drop_axis(drop));
    tri_tri_overlap_2d(&a, &b)
}

/// 2D triangle overlap for either winding of either triangle.
pub fn tri_tri_overlap_2d<T: Scalar>(t1: &[Point2<T>; 3], t2: &[Point2<T>; 3]) -> bool {
    let [p1, q1, r1] = t1;
    let [p2, q2, r2] = t2;
    let zero = T::zero();

    if orient2d(p1, q1, r1) < zero {
        if orient2d(p2, q2, r2) < zero {
            ccw_tri_tri_2d(p1, r1, q1, p2, r2, q2)
        } else {
            ccw_tri_tri_2d(p1, r1, q1, p2, q2, r2)
        }
    } else if orient2d(p2, q2, r2) < zero {
        ccw_tri_tri_2d(p1, q1, r1, p2, r2, q2)
    } else {
        ccw_tri_tri_2d(p1, q1, r1, p2, q2, r2)
    }
}

/// Both triangles counter-clockwise. Locates `p1` in one of the regions cut by
/// the edge lines of T2 and dispatches to the vertex/edge sub-tests.
fn ccw_tri_tri_2d<T: Scalar>(
    p1: &Point2<T>,
    q1: &Point2<T>,
    r1: &Point2<T>,
    p2: &Point2<T>,
    q2: &Point2<T>,
    r2: &Point2<T>,
) -> bool {
    let zero = T::zero();
    if orient2d(p2, q2, p1) >= zero {
        if orient2d(q2, r2, p1) >= zero {
            if orient2d(r2, p2, p1) >= zero {
                true
            } else {
                intersection_test_edge(p1, q1, r1, p2, q2, r2)
            }
        } else if orient2d(r2, p2, p1) >= zero {
            intersection_test_edge(p1, q1, r1, r2, p2, q2)
        } else {
            intersection_test_vertex(p1, q1, r1, p2, q2, r2)
        }
    } else if orient2d(q2, r2, p1) >= zero {
        if orient2d(r2, p2, p1) >= zero {
            intersection_test_edge(p1, q1, r1, q2, r2, p2)
        } else {
            intersection_test_vertex(p1, q1, r1, q2, r2, p2)
        }
    } else {
        intersection_test_vertex(p1, q1, r1, r2, p2, q2)
    }
}

fn intersection_test_vertex<T: Scalar>(
    p1: &Point2<T>,
    q1: &Point2<T>,
    r1: &Point2<T>,
    p2: &Point2<T>,
    q2: &Point2<T>,
    r2: &Point2<T>,
) -> bool {
    let zero = T::zero();
    if orient2d(r2, p2, q1) >= zero {
        if orient2d(r2, q2, q1) <= zero {
            if orient2d(p1, p2, q1) > zero {
                orient2d(p1, q2, q1) <= zero
            } else {
                orient2d(p1, p2, r1) >= zero && orient2d(q1, r1, p2) >= zero
            }
        } else {
            orient2d(p1, q2, q1) <= zero
                && orient2d(r2, q2, r1) <= zero
                && orient2d(q1, r1, q2) >= zero
        }
    } else if orient2d(r2, p2, r1) >= zero {
        if orient2d(q1, r1, r2) >= zero {
            orient2d(p1, p2, r1) >= zero
        } else {
            orient2d(q1, r1, q2) >= zero && orient2d(r2, r1, q2) >= zero
        }
    } else {
        false
    }
}

fn intersection_test_edge<T: Scalar>(
    p1: &Point2<T>,
    q1: &Point2<T>,
    r1: &Point2<T>,
    p2: &Point2<T>,
    _q2: &Point2<T>,
    r2: &Point2<T>,
) -> bool {
    let zero = T::zero();
    if orient2d(r2, p2, q1) >= zero {
        if orient2d(p1, p2, q1) >= zero {
            orient2d(p1, q1, r2) >= zero
        } else {
            orient2d(q1, r1, p2) >= zero && orient2d(r1, p1, p2) >= zero
        }
    } else if orient2d(r2, p2, r1) >= zero {
        orient2d(p1, p2, r1) >= zero
            && (orient2d(p1, r1, r2) >= zero || orient2d(q1, r1, r2) >= zero)
    } else {
        false
    }
}
