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
    cell::{
        CellBoundary, ClipOpts, Location,
        output::{PointAttributes, PolyOutput, edge_crossing},
    },
    error::{GeometryError, Result},
    geometry::{
        matrix::Matrix,
        point::Point3,
        segment::Segment3,
        util::{
            DISTANCE_TO_LINE_TOL, INTERSECTION_3D_REL_TOL, INTERSECTION_REL_TOL,
            LINES_PARALLEL_REL_TOL, within_unit,
        },
    },
    numeric::scalar::Scalar,
};

/// Parametric coordinates of the two line vertices.
pub const PARAMETRIC_COORDS: [[f64; 3]; 2] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];

/// Closest point on a finite segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineProjection<T: Scalar> {
    pub dist2: T,
    /// Projection parameter on the infinite line, not clamped.
    pub t: T,
    /// Closest point, clamped to the segment.
    pub closest: Point3<T>,
}

/// Closest approach of two lines or segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinePair<T: Scalar> {
    pub dist2: T,
    pub closest1: Point3<T>,
    pub closest2: Point3<T>,
    pub t1: T,
    pub t2: T,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineIntersection<T: Scalar> {
    None,
    /// Parameters of the crossing on the first and second segment.
    Intersect { u: T, v: T },
    /// The lines are parallel or degenerate; `u`, `v` locate the endpoint
    /// closest to the other line.
    Parallel { u: T, v: T },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineEvaluation<T: Scalar> {
    pub closest: Point3<T>,
    pub t: T,
    pub dist2: T,
    pub weights: [T; 2],
    pub location: Location,
}

/// Intersection of a query segment with a line cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineHit<T: Scalar> {
    /// Parameter along the query segment.
    pub t: T,
    pub x: Point3<T>,
    /// Parametric coordinate on the cell.
    pub u: T,
}

/// Squared distance from `x` to the segment `p1 - p2`.
///
/// A zero-length segment is the point `p1` with `t = 0`. When the segment is
/// short relative to how far `x` projects, the closest point is the endpoint
/// on the side of `x`.
pub fn distance_to_line<T: Scalar>(
    x: &Point3<T>,
    p1: &Point3<T>,
    p2: &Point3<T>,
) -> LineProjection<T> {
    let p21 = p1.vector_to(p2);
    let num = p21.dot(&p1.vector_to(x));
    let denom = p21.norm_squared();
    let tolerance = (T::from_constant(DISTANCE_TO_LINE_TOL) * num).abs();

    let (t, closest) = if denom <= T::zero() {
        log::trace!("distance_to_line: zero-length segment, using first endpoint");
        (T::zero(), *p1)
    } else if denom < tolerance {
        // |t| > 1 / DISTANCE_TO_LINE_TOL, far outside the segment.
        let t = num / denom;
        (t, if num > T::zero() { *p2 } else { *p1 })
    } else {
        let t = num / denom;
        let closest = if t < T::zero() {
            *p1
        } else if t > T::one() {
            *p2
        } else {
            p1.add_vector(&p21.scale(t))
        };
        (t, closest)
    };

    LineProjection {
        dist2: closest.distance_squared_to(x),
        t,
        closest,
    }
}

/// Squared distance from `x` to the infinite line through `p1` and `p2`.
pub fn distance_to_infinite_line<T: Scalar>(x: &Point3<T>, p1: &Point3<T>, p2: &Point3<T>) -> T {
    let np1 = p1.vector_to(x);
    let dir = p2.vector_to(p1);
    let len = dir.norm();
    if len.is_zero() {
        return np1.norm_squared();
    }
    let proj = np1.dot(&dir.scale(T::one() / len));
    (np1.norm_squared() - proj * proj).max(T::zero())
}

// Dot products shared by the line/line distance routines; `w = l0 - m0`.
struct PairTerms<T: Scalar> {
    a: T,
    b: T,
    c: T,
    d: T,
    e: T,
    det: T,
}

impl<T: Scalar> PairTerms<T> {
    fn new(l0: &Point3<T>, l1: &Point3<T>, m0: &Point3<T>, m1: &Point3<T>) -> Self {
        let u = l0.vector_to(l1);
        let v = m0.vector_to(m1);
        let w = m0.vector_to(l0);
        let a = u.dot(&u);
        let b = u.dot(&v);
        let c = v.dot(&v);
        PairTerms {
            a,
            b,
            c,
            d: u.dot(&w),
            e: v.dot(&w),
            det: a * c - b * b,
        }
    }

    fn parallel(&self) -> bool {
        self.det <= T::from_constant(LINES_PARALLEL_REL_TOL) * self.a * self.c
    }
}

fn pair_at<T: Scalar>(
    l0: &Point3<T>,
    l1: &Point3<T>,
    m0: &Point3<T>,
    m1: &Point3<T>,
    t1: T,
    t2: T,
) -> LinePair<T> {
    let closest1 = l0.lerp(l1, t1);
    let closest2 = m0.lerp(m1, t2);
    LinePair {
        dist2: closest1.distance_squared_to(&closest2),
        closest1,
        closest2,
        t1,
        t2,
    }
}

/// Closest approach of the infinite lines `l0 l1` and `m0 m1`.
pub fn distance_between_lines<T: Scalar>(
    l0: &Point3<T>,
    l1: &Point3<T>,
    m0: &Point3<T>,
    m1: &Point3<T>,
) -> LinePair<T> {
    let k = PairTerms::new(l0, l1, m0, m1);

    let (t1, t2) = if k.parallel() {
        log::trace!("distance_between_lines: parallel or degenerate lines");
        if k.c > T::zero() {
            (T::zero(), distance_to_line(l0, m0, m1).t)
        } else if k.a > T::zero() {
            (distance_to_line(m0, l0, l1).t, T::zero())
        } else {
            (T::zero(), T::zero())
        }
    } else {
        ((k.b * k.e - k.c * k.d) / k.det, (k.a * k.e - k.b * k.d) / k.det)
    };

    pair_at(l0, l1, m0, m1, t1, t2)
}

fn ratio01<T: Scalar>(num: T, den: T) -> T {
    if den.is_zero() {
        T::zero()
    } else {
        (num / den).max(T::zero()).min(T::one())
    }
}

/// Closest approach of the finite segments `l0 l1` and `m0 m1`.
pub fn distance_between_segments<T: Scalar>(
    l0: &Point3<T>,
    l1: &Point3<T>,
    m0: &Point3<T>,
    m1: &Point3<T>,
) -> LinePair<T> {
    let k = PairTerms::new(l0, l1, m0, m1);
    let zero = T::zero();

    let (mut s_n, mut s_d) = (zero, k.det);
    let (mut t_n, mut t_d) = (zero, k.det);

    if k.parallel() {
        log::trace!("distance_between_segments: parallel or degenerate segments");
        s_d = T::one();
        t_n = k.e;
        t_d = k.c;
    } else {
        s_n = k.b * k.e - k.c * k.d;
        t_n = k.a * k.e - k.b * k.d;
        if s_n < zero {
            s_n = zero;
            t_n = k.e;
            t_d = k.c;
        } else if s_n > s_d {
            s_n = s_d;
            t_n = k.e + k.b;
            t_d = k.c;
        }
    }

    // At most one re-optimization along the violated edge of the unit square.
    if t_n < zero {
        t_n = zero;
        let num = -k.d;
        if num < zero {
            s_n = zero;
        } else if num > k.a {
            s_n = s_d;
        } else {
            s_n = num;
            s_d = k.a;
        }
    } else if t_n > t_d {
        t_n = t_d;
        let num = k.b - k.d;
        if num < zero {
            s_n = zero;
        } else if num > k.a {
            s_n = s_d;
        } else {
            s_n = num;
            s_d = k.a;
        }
    }

    pair_at(l0, l1, m0, m1, ratio01(s_n, s_d), ratio01(t_n, t_d))
}

/// Intersection of the segments `p1 p2` and `x1 x2`, projected on the plane
/// perpendicular to both.
pub fn intersection<T: Scalar>(
    p1: &Point3<T>,
    p2: &Point3<T>,
    x1: &Point3<T>,
    x2: &Point3<T>,
) -> LineIntersection<T> {
    let a21 = p1.vector_to(p2);
    let b21 = x1.vector_to(x2);
    let b1a1 = p1.vector_to(x1);

    let ab = a21.dot(&b21);
    let system = Matrix::new([[a21.dot(&a21), -ab], [-ab, b21.dot(&b21)]]);
    let rhs = [a21.dot(&b1a1), -b21.dot(&b1a1)];

    match system.solve(&rhs, T::from_constant(INTERSECTION_REL_TOL)) {
        Some([u, v]) => {
            if within_unit(u) && within_unit(v) {
                LineIntersection::Intersect { u, v }
            } else {
                LineIntersection::None
            }
        }
        None => {
            log::trace!("intersection: singular system, falling back to endpoints");
            let (u, v) = closest_endpoint(p1, p2, x1, x2);
            LineIntersection::Parallel { u, v }
        }
    }
}

// The endpoint of either segment that lies closest to the other segment.
fn closest_endpoint<T: Scalar>(
    p1: &Point3<T>,
    p2: &Point3<T>,
    x1: &Point3<T>,
    x2: &Point3<T>,
) -> (T, T) {
    let zero = T::zero();
    let one = T::one();
    let candidates = [
        (distance_to_line(p1, x1, x2), Some(zero)),
        (distance_to_line(p2, x1, x2), Some(one)),
        (distance_to_line(x1, p1, p2), None),
        (distance_to_line(x2, p1, p2), None),
    ];

    let mut best = (zero, zero);
    let mut best_dist2 = T::infinity();
    for (i, (proj, u_on_first)) in candidates.iter().enumerate() {
        if proj.dist2 < best_dist2 {
            best_dist2 = proj.dist2;
            best = match u_on_first {
                Some(u) => (*u, proj.t),
                None => (proj.t, if i == 2 { zero } else { one }),
            };
        }
    }
    best
}

/// [`intersection`] that also requires the segments to actually meet in 3D,
/// within `INTERSECTION_3D_REL_TOL` of the longer segment length.
pub fn intersection_3d<T: Scalar>(
    p1: &Point3<T>,
    p2: &Point3<T>,
    x1: &Point3<T>,
    x2: &Point3<T>,
) -> LineIntersection<T> {
    match intersection(p1, p2, x1, x2) {
        LineIntersection::Intersect { .. } => {
            let pair = distance_between_segments(p1, p2, x1, x2);
            let len2 = p1.distance_squared_to(p2).max(x1.distance_squared_to(x2));
            let tol = T::from_constant(INTERSECTION_3D_REL_TOL);
            if pair.dist2 <= tol * tol * len2 {
                LineIntersection::Intersect {
                    u: pair.t1,
                    v: pair.t2,
                }
            } else {
                LineIntersection::None
            }
        }
        other => other,
    }
}

#[inline]
pub fn interpolate_functions<T: Scalar>(t: T) -> [T; 2] {
    [T::one() - t, t]
}

#[inline]
pub fn interpolate_derivs<T: Scalar>() -> [T; 2] {
    [-T::one(), T::one()]
}

#[inline]
pub fn parametric_center<T: Scalar>() -> T {
    T::from_num_den(1, 2)
}

/// Parametric distance of `t` from the cell; zero inside.
pub fn parametric_distance<T: Scalar>(t: T) -> T {
    if t < T::zero() {
        -t
    } else if t > T::one() {
        t - T::one()
    } else {
        T::zero()
    }
}

/// Two-point linear cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line<T: Scalar> {
    pub segment: Segment3<T>,
    /// Global ids of the two points, used for attribute lookup.
    pub point_ids: [usize; 2],
}

impl<T: Scalar> Line<T> {
    pub fn new(a: Point3<T>, b: Point3<T>) -> Self {
        Line {
            segment: Segment3::new(&a, &b),
            point_ids: [0, 1],
        }
    }

    pub fn with_ids(a: Point3<T>, b: Point3<T>, point_ids: [usize; 2]) -> Self {
        Line {
            segment: Segment3::new(&a, &b),
            point_ids,
        }
    }

    #[inline]
    pub fn points(&self) -> [Point3<T>; 2] {
        [self.segment.a, self.segment.b]
    }

    pub fn evaluate_position(&self, x: &Point3<T>) -> LineEvaluation<T> {
        let proj = distance_to_line(x, &self.segment.a, &self.segment.b);
        let location = if within_unit(proj.t) {
            Location::Inside
        } else {
            Location::Outside
        };
        LineEvaluation {
            closest: proj.closest,
            t: proj.t,
            dist2: proj.dist2,
            weights: interpolate_functions(proj.t),
            location,
        }
    }

    pub fn evaluate_location(&self, t: T) -> (Point3<T>, [T; 2]) {
        (self.segment.point_at(t), interpolate_functions(t))
    }

    /// Closest vertex for parametric `t`, and whether `t` lies on the cell.
    pub fn cell_boundary(&self, t: T) -> CellBoundary<1> {
        let id = if t >= parametric_center() {
            self.point_ids[1]
        } else {
            self.point_ids[0]
        };
        CellBoundary {
            point_ids: [id],
            inside: within_unit(t),
        }
    }

    /// The cell is its own simplex.
    pub fn triangulate(&self) -> ([usize; 2], [Point3<T>; 2]) {
        (self.point_ids, self.points())
    }

    /// Gradient of linearly interpolated per-vertex data.
    ///
    /// `values` holds `dim` components for the first vertex followed by the
    /// second; the result holds `3 * dim` values, `d/dx d/dy d/dz` per component.
    pub fn derivatives(&self, values: &[T], dim: usize) -> Result<Vec<T>> {
        if values.len() != 2 * dim {
            log::debug!("line derivatives: {} values for dim {}", values.len(), dim);
            return Err(GeometryError::ValueCount {
                expected: 2 * dim,
                got: values.len(),
                dim,
            });
        }

        let dx = self.segment.direction();
        let len2 = dx.norm_squared();
        let mut derivs = vec![T::zero(); 3 * dim];
        if len2.is_zero() {
            log::trace!("line derivatives: zero-length line");
            return Ok(derivs);
        }
        for i in 0..dim {
            let delta = values[dim + i] - values[i];
            for j in 0..3 {
                derivs[3 * i + j] = delta * dx[j] / len2;
            }
        }
        Ok(derivs)
    }

    /// Intersects the query segment `p1 p2` with this line within the absolute
    /// distance `tol`.
    pub fn intersect_with_line(
        &self,
        p1: &Point3<T>,
        p2: &Point3<T>,
        tol: T,
    ) -> Option<LineHit<T>> {
        let [a1, a2] = self.points();
        let tol2 = tol * tol;

        let (t, u) = match intersection(p1, p2, &a1, &a2) {
            LineIntersection::Intersect { u, v } | LineIntersection::Parallel { u, v } => (u, v),
            LineIntersection::None => {
                // Out-of-range parameters of the same least-squares optimum.
                let pair = distance_between_lines(p1, p2, &a1, &a2);
                (pair.t1, pair.t2)
            }
        };

        if within_unit(t) && within_unit(u) {
            let x = a1.lerp(&a2, u);
            let on_query = p1.lerp(p2, t);
            return (x.distance_squared_to(&on_query) <= tol2).then_some(LineHit { t, x, u });
        }

        // One parameter left its segment: test the nearest endpoint against
        // the other segment.
        if t < T::zero() {
            let proj = distance_to_line(p1, &a1, &a2);
            (proj.dist2 <= tol2).then_some(LineHit {
                t: T::zero(),
                x: proj.closest,
                u: proj.t,
            })
        } else if t > T::one() {
            let proj = distance_to_line(p2, &a1, &a2);
            (proj.dist2 <= tol2).then_some(LineHit {
                t: T::one(),
                x: proj.closest,
                u: proj.t,
            })
        } else if u < T::zero() {
            let proj = distance_to_line(&a1, p1, p2);
            (proj.dist2 <= tol2).then_some(LineHit {
                t: proj.t,
                x: proj.closest,
                u: T::zero(),
            })
        } else {
            let proj = distance_to_line(&a2, p1, p2);
            (proj.dist2 <= tol2).then_some(LineHit {
                t: proj.t,
                x: proj.closest,
                u: T::one(),
            })
        }
    }

    /// Emits the `value` crossing as a vertex when the endpoint scalars
    /// straddle it. A scalar equal to `value` counts as below.
    pub fn contour(
        &self,
        value: T,
        scalars: &[T; 2],
        point_data: &PointAttributes<T>,
        cell_id: usize,
        out: &mut PolyOutput<T>,
    ) -> Result<()> {
        if (scalars[0] > value) == (scalars[1] > value) {
            return Ok(());
        }
        out.prepare(point_data, &self.point_ids)?;
        let points = self.points();
        let (from, to, t) = edge_crossing(0, 1, scalars, value);
        let x = points[from].lerp(&points[to], t);
        let [a, b] = [self.point_ids[from], self.point_ids[to]];
        let id = out.insert_interpolated(x, point_data, a, b, t)?;
        out.push_vert(id, cell_id);
        Ok(())
    }

    /// Emits the kept part of the line, see [`ClipOpts::keeps`].
    pub fn clip(
        &self,
        opts: &ClipOpts<T>,
        scalars: &[T; 2],
        point_data: &PointAttributes<T>,
        cell_id: usize,
        out: &mut PolyOutput<T>,
    ) -> Result<()> {
        let points = self.points();
        let keep = [opts.keeps(scalars[0]), opts.keeps(scalars[1])];
        if keep == [false, false] {
            return Ok(());
        }
        out.prepare(point_data, &self.point_ids)?;

        let ids = match keep {
            [true, true] => [
                out.insert_copied(points[0], point_data, self.point_ids[0])?,
                out.insert_copied(points[1], point_data, self.point_ids[1])?,
            ],
            [kept0, _] => {
                let (from, to, t) = edge_crossing(0, 1, scalars, opts.value);
                let x = points[from].lerp(&points[to], t);
                let [a, b] = [self.point_ids[from], self.point_ids[to]];
                let crossing = out.insert_interpolated(x, point_data, a, b, t)?;
                if kept0 {
                    [out.insert_copied(points[0], point_data, self.point_ids[0])?, crossing]
                } else {
                    [crossing, out.insert_copied(points[1], point_data, self.point_ids[1])?]
                }
            }
        };
        out.push_line(ids, cell_id);
        Ok(())
    }
}
