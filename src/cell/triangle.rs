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

use std::array;

use crate::{
    cell::{
        CellBoundary, ClipOpts, Location,
        line::Line,
        output::{PointAttributes, PolyOutput, edge_crossing},
        quadric::Quadric,
    },
    error::{GeometryError, Result},
    geometry::{
        matrix::Matrix,
        plane::Plane,
        point::{Point2, Point3},
        tri_tri_intersect::tri_tri_overlap,
        util::{BARYCENTRIC_REL_TOL, ZERO_AREA_REL_TOL},
        vector::Vector3,
    },
    numeric::scalar::Scalar,
};

/// Vertex pairs of the three edges, in cell order.
pub const EDGES: [[usize; 2]; 3] = [[0, 1], [1, 2], [2, 0]];

/// Parametric coordinates of the three triangle vertices.
pub const PARAMETRIC_COORDS: [[f64; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

// Case index: bit i set when vertex i is above the value.
const CONTOUR_CASES: [Option<[usize; 2]>; 8] = [
    None,
    Some([0, 2]),
    Some([1, 0]),
    Some([1, 2]),
    Some([2, 1]),
    Some([0, 1]),
    Some([2, 0]),
    None,
];

// Case index: bit i set when vertex i is kept. Ids 0..3 are the vertices,
// 3..6 the crossings on edges 0..3.
const CLIP_CASES: [&[[usize; 3]]; 8] = [
    &[],
    &[[0, 3, 5]],
    &[[1, 4, 3]],
    &[[0, 1, 4], [0, 4, 5]],
    &[[2, 5, 4]],
    &[[0, 3, 4], [0, 4, 2]],
    &[[3, 1, 2], [3, 2, 5]],
    &[[0, 1, 2]],
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleEvaluation<T: Scalar> {
    pub closest: Point3<T>,
    pub pcoords: [T; 2],
    pub dist2: T,
    pub weights: [T; 3],
    pub location: Location,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleHit<T: Scalar> {
    /// Parameter along the query segment.
    pub t: T,
    pub x: Point3<T>,
    pub pcoords: [T; 2],
}

/// Orthonormal frame in the plane of a triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneFrame<T: Scalar> {
    pub origin: Point3<T>,
    pub x_axis: Vector3<T>,
    pub y_axis: Vector3<T>,
    pub normal: Vector3<T>,
}

impl<T: Scalar> PlaneFrame<T> {
    /// In-plane coordinates of `p`; the out-of-plane component is dropped.
    pub fn project(&self, p: &Point3<T>) -> Point2<T> {
        let d = self.origin.vector_to(p);
        Point2::new(d.dot(&self.x_axis), d.dot(&self.y_axis))
    }

    pub fn unproject(&self, q: &Point2<T>) -> Point3<T> {
        self.origin
            .add_vector(&(self.x_axis.scale(q[0]) + self.y_axis.scale(q[1])))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection2D<T: Scalar> {
    pub frame: PlaneFrame<T>,
    pub points: [Point2<T>; 3],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circumcircle<T: Scalar> {
    pub center: Point2<T>,
    pub radius2: T,
}

/// Unnormalized normal `(p3 - p2) x (p1 - p2)`.
#[inline]
pub fn compute_normal_direction<T: Scalar>(
    p1: &Point3<T>,
    p2: &Point3<T>,
    p3: &Point3<T>,
) -> Vector3<T> {
    p2.vector_to(p3).cross(&p2.vector_to(p1))
}

/// Unit normal, or the zero vector for a degenerate triangle.
pub fn compute_normal<T: Scalar>(p1: &Point3<T>, p2: &Point3<T>, p3: &Point3<T>) -> Vector3<T> {
    compute_normal_direction(p1, p2, p3).normalized()
}

/// Normal of the triangle formed by the first three `ids` into `points`.
pub fn normal_from_ids<T: Scalar>(points: &[Point3<T>], ids: &[usize]) -> Option<Vector3<T>> {
    let [a, b, c] = [ids.first()?, ids.get(1)?, ids.get(2)?];
    Some(compute_normal(points.get(*a)?, points.get(*b)?, points.get(*c)?))
}

pub fn triangle_area<T: Scalar>(p1: &Point3<T>, p2: &Point3<T>, p3: &Point3<T>) -> T {
    compute_normal_direction(p1, p2, p3).norm() * T::from_num_den(1, 2)
}

pub fn triangle_center<T: Scalar>(p1: &Point3<T>, p2: &Point3<T>, p3: &Point3<T>) -> Point3<T> {
    let third = T::from_num_den(1, 3);
    Point3::from_coords(array::from_fn(|i| (p1[i] + p2[i] + p3[i]) * third))
}

/// Barycentric weights of `x` with respect to the 2D triangle `x1 x2 x3`.
pub fn barycentric_coords<T: Scalar>(
    x: &Point2<T>,
    x1: &Point2<T>,
    x2: &Point2<T>,
    x3: &Point2<T>,
) -> Option<[T; 3]> {
    let a = x3.vector_to(x1);
    let b = x3.vector_to(x2);
    let r = x3.vector_to(x);
    let system = Matrix::new([[a[0], b[0]], [a[1], b[1]]]);
    match system.solve(&[r[0], r[1]], T::from_constant(BARYCENTRIC_REL_TOL)) {
        Some([b0, b1]) => Some([b0, b1, T::one() - b0 - b1]),
        None => {
            log::trace!("barycentric_coords: degenerate triangle");
            None
        }
    }
}

/// Places the triangle in its own plane: `x1` at the origin, `x2` on the
/// positive x axis and `x3` with non-negative y for counter-clockwise input.
pub fn project_to_2d<T: Scalar>(
    x1: &Point3<T>,
    x2: &Point3<T>,
    x3: &Point3<T>,
) -> Option<Projection2D<T>> {
    let e1 = x1.vector_to(x2);
    let e2 = x1.vector_to(x3);
    let n = compute_normal_direction(x1, x2, x3);
    let scale = e1.norm_squared() * e2.norm_squared();
    if n.norm_squared() <= T::from_constant(ZERO_AREA_REL_TOL) * scale {
        log::trace!("project_to_2d: zero-area triangle");
        return None;
    }

    let len21 = e1.norm();
    let normal = n.normalized();
    let x_axis = e1.scale(T::one() / len21);
    let y_axis = normal.cross(&x_axis);
    let frame = PlaneFrame {
        origin: *x1,
        x_axis,
        y_axis,
        normal,
    };
    Some(Projection2D {
        frame,
        points: [
            Point2::new(T::zero(), T::zero()),
            Point2::new(len21, T::zero()),
            Point2::new(e2.dot(&x_axis), e2.dot(&y_axis)),
        ],
    })
}

/// Whether `x`, assumed to lie in the triangle's plane, is inside it.
///
/// Points outside are still accepted within squared distance `tol2` of one
/// of the three vertices. There is no edge tolerance.
pub fn point_in_triangle<T: Scalar>(
    x: &Point3<T>,
    p1: &Point3<T>,
    p2: &Point3<T>,
    p3: &Point3<T>,
    tol2: T,
) -> bool {
    let x1 = p1.vector_to(x);
    let x2 = p2.vector_to(x);
    let x3 = p3.vector_to(x);
    let v13 = p3.vector_to(p1);
    let v21 = p1.vector_to(p2);
    let v32 = p2.vector_to(p3);

    let n1 = x1.cross(&v13);
    let n2 = x2.cross(&v21);
    let n3 = x3.cross(&v32);
    if n1.dot(&n2) >= T::zero() && n2.dot(&n3) >= T::zero() {
        return true;
    }

    x1.norm_squared() <= tol2 || x2.norm_squared() <= tol2 || x3.norm_squared() <= tol2
}

/// Whether triangles `(p1, q1, r1)` and `(p2, q2, r2)` share a point.
pub fn triangles_intersect<T: Scalar>(
    p1: &Point3<T>,
    q1: &Point3<T>,
    r1: &Point3<T>,
    p2: &Point3<T>,
    q2: &Point3<T>,
    r2: &Point3<T>,
) -> bool {
    tri_tri_overlap(p1, q1, r1, p2, q2, r2)
}

/// Quadric of the triangle's plane, zero for a degenerate triangle.
pub fn compute_quadric<T: Scalar>(x1: &Point3<T>, x2: &Point3<T>, x3: &Point3<T>) -> Quadric<T> {
    let mut q = Quadric::zero();
    q.add_triangle(x1, x2, x3);
    q
}

/// Circle through three 2D points, `None` when they are collinear.
pub fn circumcircle<T: Scalar>(
    p1: &Point2<T>,
    p2: &Point2<T>,
    p3: &Point2<T>,
) -> Option<Circumcircle<T>> {
    let half = T::from_num_den(1, 2);
    let n12 = p1.vector_to(p2);
    let n13 = p1.vector_to(p3);
    let rhs = [
        n12.dot(&(p1.as_vector() + p2.as_vector())) * half,
        n13.dot(&(p1.as_vector() + p3.as_vector())) * half,
    ];
    let system = Matrix::new([[n12[0], n12[1]], [n13[0], n13[1]]]);
    let Some(c) = system.solve(&rhs, T::from_constant(BARYCENTRIC_REL_TOL)) else {
        log::trace!("circumcircle: collinear points");
        return None;
    };
    let center = Point2::from_coords(c);
    let radius2 = (center.distance_squared_to(p1)
        + center.distance_squared_to(p2)
        + center.distance_squared_to(p3))
        * T::from_num_den(1, 3);
    Some(Circumcircle { center, radius2 })
}

#[inline]
pub fn interpolate_functions<T: Scalar>(pcoords: [T; 2]) -> [T; 3] {
    [T::one() - pcoords[0] - pcoords[1], pcoords[0], pcoords[1]]
}

/// `d/dr` for the three vertices, then `d/ds`.
#[inline]
pub fn interpolate_derivs<T: Scalar>() -> [T; 6] {
    let (o, z) = (T::one(), T::zero());
    [-o, o, z, -o, z, o]
}

#[inline]
pub fn parametric_center<T: Scalar>() -> [T; 2] {
    let third = T::from_num_den(1, 3);
    [third, third]
}

/// Largest parametric distance of `[r, s, 1 - r - s]` from `[0, 1]`.
pub fn parametric_distance<T: Scalar>(pcoords: [T; 2]) -> T {
    let pc = interpolate_functions(pcoords);
    pc.iter().fold(T::zero(), |acc, &c| {
        let d = if c < T::zero() {
            -c
        } else if c > T::one() {
            c - T::one()
        } else {
            T::zero()
        };
        acc.max(d)
    })
}

/// Three-point linear cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle<T: Scalar> {
    pub points: [Point3<T>; 3],
    /// Global ids of the three points, used for attribute lookup.
    pub point_ids: [usize; 3],
}

impl<T: Scalar> Triangle<T> {
    pub fn new(p1: Point3<T>, p2: Point3<T>, p3: Point3<T>) -> Self {
        Triangle {
            points: [p1, p2, p3],
            point_ids: [0, 1, 2],
        }
    }

    pub fn with_ids(points: [Point3<T>; 3], point_ids: [usize; 3]) -> Self {
        Triangle { points, point_ids }
    }

    pub fn normal(&self) -> Vector3<T> {
        let [p1, p2, p3] = &self.points;
        compute_normal(p1, p2, p3)
    }

    pub fn area(&self) -> T {
        let [p1, p2, p3] = &self.points;
        triangle_area(p1, p2, p3)
    }

    pub fn center(&self) -> Point3<T> {
        let [p1, p2, p3] = &self.points;
        triangle_center(p1, p2, p3)
    }

    /// Edge `i` (wrapping modulo 3) as a line with the matching point ids.
    pub fn edge(&self, i: usize) -> Line<T> {
        let [a, b] = EDGES[i % 3];
        Line::with_ids(self.points[a], self.points[b], [self.point_ids[a], self.point_ids[b]])
    }

    // Solves cp = p1 + r (p2 - p1) + s (p3 - p1) in the coordinate plane most
    // parallel to the triangle.
    fn plane_pcoords(&self, cp: &Point3<T>, n: &Vector3<T>) -> Option<[T; 2]> {
        let drop = n.dominant_axis();
        let [p1, p2, p3] = self.points.map(|p| p.drop_axis(drop));
        let c1 = p1.vector_to(&p2);
        let c2 = p1.vector_to(&p3);
        let rhs = p1.vector_to(&cp.drop_axis(drop));
        Matrix::new([[c1[0], c2[0]], [c1[1], c2[1]]])
            .solve(&[rhs[0], rhs[1]], T::from_constant(BARYCENTRIC_REL_TOL))
    }

    // Closest point over the three edges, first edge wins ties.
    fn closest_on_boundary(&self, x: &Point3<T>, location: Location) -> TriangleEvaluation<T> {
        let one = T::one();
        let zero = T::zero();
        let mut best: Option<(T, Point3<T>, [T; 2])> = None;
        for (i, _) in EDGES.iter().enumerate() {
            let ev = self.edge(i).evaluate_position(x);
            let t = ev.t.max(zero).min(one);
            let pcoords = match i {
                0 => [t, zero],
                1 => [one - t, t],
                _ => [zero, one - t],
            };
            if best.as_ref().is_none_or(|(d, _, _)| ev.dist2 < *d) {
                best = Some((ev.dist2, ev.closest, pcoords));
            }
        }
        let (dist2, closest, pcoords) = best.unwrap_or((zero, *x, [zero, zero]));
        TriangleEvaluation {
            closest,
            pcoords,
            dist2,
            weights: interpolate_functions(pcoords),
            location,
        }
    }

    pub fn evaluate_position(&self, x: &Point3<T>) -> TriangleEvaluation<T> {
        let n = compute_normal_direction(&self.points[0], &self.points[1], &self.points[2]);
        let cp = Plane::from_normal_and_point(n, &self.points[0]).project_point(x);

        let Some(pcoords) = self.plane_pcoords(&cp, &n) else {
            log::trace!("triangle evaluate_position: degenerate triangle, using edges");
            return self.closest_on_boundary(x, Location::Degenerate);
        };

        let weights = interpolate_functions(pcoords);
        if weights.iter().all(|&w| w >= T::zero() && w <= T::one()) {
            TriangleEvaluation {
                closest: cp,
                pcoords,
                dist2: cp.distance_squared_to(x),
                weights,
                location: Location::Inside,
            }
        } else {
            self.closest_on_boundary(x, Location::Outside)
        }
    }

    pub fn evaluate_location(&self, pcoords: [T; 2]) -> (Point3<T>, [T; 3]) {
        let weights = interpolate_functions(pcoords);
        let x = Point3::from_coords(array::from_fn(|i| {
            (0..3).fold(T::zero(), |acc, k| acc + self.points[k][i] * weights[k])
        }));
        (x, weights)
    }

    /// Closest edge for the parametric location, and whether it lies inside.
    pub fn cell_boundary(&self, pcoords: [T; 2]) -> CellBoundary<2> {
        let [r, s] = pcoords;
        let half = T::from_num_den(1, 2);
        let t1 = r - s;
        let t2 = half * (T::one() - r) - s;
        let t3 = T::from_constant(2.0) * r + s - T::one();

        let [a, b] = if t1 >= T::zero() && t2 >= T::zero() {
            EDGES[0]
        } else if t2 < T::zero() && t3 >= T::zero() {
            EDGES[1]
        } else {
            EDGES[2]
        };
        CellBoundary {
            point_ids: [self.point_ids[a], self.point_ids[b]],
            inside: parametric_distance(pcoords).is_zero(),
        }
    }

    pub fn triangulate(&self) -> ([usize; 3], [Point3<T>; 3]) {
        (self.point_ids, self.points)
    }

    /// Intersects the segment `p1 p2` with the triangle.
    ///
    /// A plane crossing outside the triangle still counts when it lies within
    /// the absolute distance `tol` of the boundary. `pcoords` are those of the
    /// crossing itself and may then fall outside the unit triangle.
    pub fn intersect_with_line(
        &self,
        p1: &Point3<T>,
        p2: &Point3<T>,
        tol: T,
    ) -> Option<TriangleHit<T>> {
        let n = self.normal();
        if n.is_zero() {
            log::trace!("triangle intersect_with_line: degenerate triangle");
            return None;
        }
        let (t, x) = Plane::from_normal_and_point(n, &self.points[0]).intersect_segment(p1, p2)?;
        let pcoords = self.plane_pcoords(&x, &n)?;
        let inside = interpolate_functions(pcoords)
            .iter()
            .all(|&w| w >= T::zero() && w <= T::one());
        if inside || self.closest_on_boundary(&x, Location::Outside).dist2 <= tol * tol {
            Some(TriangleHit { t, x, pcoords })
        } else {
            None
        }
    }

    /// Gradient of linearly interpolated per-vertex data.
    ///
    /// `values` holds `dim` components per vertex, vertex after vertex. The
    /// result holds `d/dx d/dy d/dz` for each component.
    pub fn derivatives(&self, values: &[T], dim: usize) -> Result<Vec<T>> {
        if values.len() != 3 * dim {
            log::debug!("triangle derivatives: {} values for dim {}", values.len(), dim);
            return Err(GeometryError::ValueCount {
                expected: 3 * dim,
                got: values.len(),
                dim,
            });
        }

        let mut derivs = vec![T::zero(); 3 * dim];
        let [p1, p2, p3] = &self.points;
        let Some(proj) = project_to_2d(p1, p2, p3) else {
            log::trace!("triangle derivatives: degenerate triangle");
            return Ok(derivs);
        };

        let [v1, v2, v3] = proj.points;
        let jac = Matrix::new([
            [v2[0] - v1[0], v2[1] - v1[1]],
            [v3[0] - v1[0], v3[1] - v1[1]],
        ]);
        let det = jac.determinant();
        if det.is_zero() {
            log::trace!("triangle derivatives: singular jacobian");
            return Ok(derivs);
        }
        let inv =
            Matrix::new([[jac[1][1], -jac[0][1]], [-jac[1][0], jac[0][0]]]).scale(T::one() / det);

        let fd = interpolate_derivs::<T>();
        let dndx: [T; 3] = array::from_fn(|k| inv[0][0] * fd[k] + inv[0][1] * fd[3 + k]);
        let dndy: [T; 3] = array::from_fn(|k| inv[1][0] * fd[k] + inv[1][1] * fd[3 + k]);

        let frame = &proj.frame;
        for i in 0..dim {
            let (mut sx, mut sy) = (T::zero(), T::zero());
            for k in 0..3 {
                sx = sx + dndx[k] * values[dim * k + i];
                sy = sy + dndy[k] * values[dim * k + i];
            }
            for j in 0..3 {
                derivs[3 * i + j] = sx * frame.x_axis[j] + sy * frame.y_axis[j];
            }
        }
        Ok(derivs)
    }

    fn crossing(
        &self,
        edge: usize,
        scalars: &[T; 3],
        value: T,
        point_data: &PointAttributes<T>,
        out: &mut PolyOutput<T>,
    ) -> Result<usize> {
        let [v0, v1] = EDGES[edge];
        let (from, to, t) = edge_crossing(v0, v1, scalars, value);
        let x = self.points[from].lerp(&self.points[to], t);
        out.insert_interpolated(x, point_data, self.point_ids[from], self.point_ids[to], t)
    }

    /// Emits the `value` iso-line through the triangle. A vertex scalar equal
    /// to `value` counts as below.
    pub fn contour(
        &self,
        value: T,
        scalars: &[T; 3],
        point_data: &PointAttributes<T>,
        cell_id: usize,
        out: &mut PolyOutput<T>,
    ) -> Result<()> {
        let case = (0..3)
            .filter(|&i| scalars[i] > value)
            .fold(0usize, |acc, i| acc | (1 << i));
        let Some([e0, e1]) = CONTOUR_CASES[case] else {
            return Ok(());
        };
        out.prepare(point_data, &self.point_ids)?;
        let a = self.crossing(e0, scalars, value, point_data, out)?;
        let b = self.crossing(e1, scalars, value, point_data, out)?;
        out.push_line([a, b], cell_id);
        Ok(())
    }

    /// Emits the kept part of the triangle as at most two triangles, see
    /// [`ClipOpts::keeps`].
    pub fn clip(
        &self,
        opts: &ClipOpts<T>,
        scalars: &[T; 3],
        point_data: &PointAttributes<T>,
        cell_id: usize,
        out: &mut PolyOutput<T>,
    ) -> Result<()> {
        let case = (0..3)
            .filter(|&i| opts.keeps(scalars[i]))
            .fold(0usize, |acc, i| acc | (1 << i));
        if CLIP_CASES[case].is_empty() {
            return Ok(());
        }
        out.prepare(point_data, &self.point_ids)?;
        let mut ids: [Option<usize>; 6] = [None; 6];

        for tri in CLIP_CASES[case] {
            let mut cell = [0; 3];
            for (slot, &k) in cell.iter_mut().zip(tri) {
                *slot = match ids[k] {
                    Some(id) => id,
                    None => {
                        let id = if k < 3 {
                            out.insert_copied(self.points[k], point_data, self.point_ids[k])?
                        } else {
                            self.crossing(k - 3, scalars, opts.value, point_data, out)?
                        };
                        ids[k] = Some(id);
                        id
                    }
                };
            }
            out.push_triangle(cell, cell_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Triangle<f64> {
        Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn normal_follows_vertex_order() {
        assert_eq!(unit().normal(), Vector3::new(0.0, 0.0, 1.0));
        let [a, b, c] = unit().points;
        assert_eq!(compute_normal(&a, &c, &b), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn cell_boundary_picks_nearest_edge() {
        let t = unit();
        assert_eq!(t.cell_boundary([0.5, 0.1]).point_ids, [0, 1]);
        assert_eq!(t.cell_boundary([0.45, 0.5]).point_ids, [1, 2]);
        assert_eq!(t.cell_boundary([0.1, 0.5]).point_ids, [2, 0]);
        assert!(t.cell_boundary([0.2, 0.2]).inside);
        assert!(!t.cell_boundary([0.8, 0.8]).inside);
    }

    #[test]
    fn edges_wrap() {
        let t = unit();
        assert_eq!(t.edge(4), t.edge(1));
        assert_eq!(t.edge(2).point_ids, [2, 0]);
    }

    #[test]
    fn normal_from_ids_needs_three_valid_ids() {
        let pts = unit().points;
        assert_eq!(normal_from_ids(&pts, &[0, 1, 2, 7]), Some(Vector3::new(0.0, 0.0, 1.0)));
        assert_eq!(normal_from_ids(&pts, &[0, 1]), None);
        assert_eq!(normal_from_ids(&pts, &[0, 1, 5]), None);
    }
}
