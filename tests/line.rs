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

use approx::assert_relative_eq;
use rand::{Rng, SeedableRng, rngs::StdRng};

use cellgeom::{
    cell::{
        Line, Location,
        line::{
            LineIntersection, distance_between_lines, distance_between_segments,
            distance_to_infinite_line, distance_to_line, interpolate_derivs, interpolate_functions,
            intersection, intersection_3d,
        },
    },
    geometry::Point3,
};

fn random_point(rng: &mut StdRng) -> Point3<f64> {
    Point3::new(
        rng.random_range(-10.0..10.0),
        rng.random_range(-10.0..10.0),
        rng.random_range(-10.0..10.0),
    )
}

#[test]
fn evaluate_position_above_unit_segment() {
    let line = Line::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
    let ev = line.evaluate_position(&Point3::new(0.5, 1.0, 0.0));
    assert_eq!(ev.closest, Point3::new(0.5, 0.0, 0.0));
    assert_eq!(ev.t, 0.5);
    assert_eq!(ev.dist2, 1.0);
    assert_eq!(ev.weights, [0.5, 0.5]);
    assert_eq!(ev.location, Location::Inside);
}

#[test]
fn evaluate_position_beyond_end_is_outside() {
    let line = Line::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0));
    let ev = line.evaluate_position(&Point3::new(3.0, 0.0, 0.0));
    assert_eq!(ev.location, Location::Outside);
    assert_eq!(ev.t, 1.5);
    assert_eq!(ev.closest, Point3::new(2.0, 0.0, 0.0));
    assert_eq!(ev.dist2, 1.0);
}

#[test]
fn degenerate_line_is_a_point() {
    let p = Point3::new(1.0, 2.0, 3.0);
    let line = Line::new(p, p);
    let ev = line.evaluate_position(&Point3::new(1.0, 2.0, 5.0));
    assert_eq!(ev.t, 0.0);
    assert_eq!(ev.closest, p);
    assert_eq!(ev.dist2, 4.0);
    assert_eq!(ev.location, Location::Inside);
}

#[test]
fn closest_point_is_never_farther_than_an_endpoint() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let (a, b, x) = (random_point(&mut rng), random_point(&mut rng), random_point(&mut rng));
        let p = distance_to_line(&x, &a, &b);
        assert!(p.dist2 <= x.distance_squared_to(&a) + 1e-9);
        assert!(p.dist2 <= x.distance_squared_to(&b) + 1e-9);
        assert!(p.dist2 + 1e-9 >= distance_to_infinite_line(&x, &a, &b));
    }
}

#[test]
fn infinite_line_distance_ignores_segment_ends() {
    let d = distance_to_infinite_line(
        &Point3::new(5.0, 3.0, 0.0),
        &Point3::new(0.0, 0.0, 0.0),
        &Point3::new(1.0, 0.0, 0.0),
    );
    assert_relative_eq!(d, 9.0, epsilon = 1e-12);
}

#[test]
fn crossing_segments_meet_at_zero_distance() {
    let l0 = Point3::new(0.0, 0.0, 0.0);
    let l1 = Point3::new(1.0, 1.0, 0.0);
    let m0 = Point3::new(0.0, 1.0, 0.0);
    let m1 = Point3::new(1.0, 0.0, 0.0);

    let pair = distance_between_segments(&l0, &l1, &m0, &m1);
    assert_eq!(pair.dist2, 0.0);
    assert_eq!((pair.t1, pair.t2), (0.5, 0.5));

    assert_eq!(intersection(&l0, &l1, &m0, &m1), LineIntersection::Intersect { u: 0.5, v: 0.5 });
    assert_eq!(intersection_3d(&l0, &l1, &m0, &m1), LineIntersection::Intersect { u: 0.5, v: 0.5 });
}

#[test]
fn skew_lines_pass_the_2d_test_but_not_the_3d_one() {
    let p1 = Point3::new(0.0, 0.0, 0.0);
    let p2 = Point3::new(1.0, 1.0, 0.0);
    let x1 = Point3::new(0.0, 1.0, 1.0);
    let x2 = Point3::new(1.0, 0.0, 1.0);
    assert!(matches!(intersection(&p1, &p2, &x1, &x2), LineIntersection::Intersect { .. }));
    assert_eq!(intersection_3d(&p1, &p2, &x1, &x2), LineIntersection::None);

    let lines = distance_between_lines(&p1, &p2, &x1, &x2);
    assert_relative_eq!(lines.dist2, 1.0, epsilon = 1e-12);
}

#[test]
fn segments_missing_each_other() {
    let r = intersection(
        &Point3::new(0.0, 0.0, 0.0),
        &Point3::new(1.0, 0.0, 0.0),
        &Point3::new(2.0, -1.0, 0.0),
        &Point3::new(2.0, 1.0, 0.0),
    );
    assert_eq!(r, LineIntersection::None);
}

#[test]
fn parallel_segments_report_closest_endpoint() {
    let p1 = Point3::new(0.0, 0.0, 0.0);
    let p2 = Point3::new(1.0, 0.0, 0.0);
    let x1 = Point3::new(1.5, 1.0, 0.0);
    let x2 = Point3::new(3.0, 1.0, 0.0);
    match intersection(&p1, &p2, &x1, &x2) {
        LineIntersection::Parallel { u, v } => {
            // p2 is the endpoint nearest the other segment; v is its
            // unclamped projection on that segment.
            assert_eq!(u, 1.0);
            assert_relative_eq!(v, -1.0 / 3.0, epsilon = 1e-12);
        }
        other => panic!("expected parallel, got {other:?}"),
    }

    let lines = distance_between_lines(&p1, &p2, &x1, &x2);
    assert_eq!(lines.t1, 0.0);
    assert_relative_eq!(lines.dist2, 1.0, epsilon = 1e-12);

    let segs = distance_between_segments(&p1, &p2, &x1, &x2);
    assert_relative_eq!(segs.dist2, 1.25, epsilon = 1e-12);
    assert_eq!((segs.t1, segs.t2), (1.0, 0.0));
}

#[test]
fn segment_distance_is_symmetric_and_bounded() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let (a, b, c, d) = (
            random_point(&mut rng),
            random_point(&mut rng),
            random_point(&mut rng),
            random_point(&mut rng),
        );
        let ab = distance_between_segments(&a, &b, &c, &d);
        let ba = distance_between_segments(&c, &d, &a, &b);
        assert_relative_eq!(ab.dist2, ba.dist2, epsilon = 1e-8, max_relative = 1e-8);
        assert!((0.0..=1.0).contains(&ab.t1) && (0.0..=1.0).contains(&ab.t2));

        let lines = distance_between_lines(&a, &b, &c, &d);
        assert!(lines.dist2 <= ab.dist2 + 1e-8);
        // Endpoint pairs are feasible, so the optimum cannot be worse.
        assert!(ab.dist2 <= a.distance_squared_to(&c) + 1e-8);
        assert!(ab.dist2 <= b.distance_squared_to(&d) + 1e-8);
    }
}

#[test]
fn intersect_with_line_inside_and_near_endpoint() {
    let line = Line::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0));
    let hit = line
        .intersect_with_line(&Point3::new(1.0, -1.0, 0.0), &Point3::new(1.0, 1.0, 0.0), 1e-6)
        .expect("segments cross");
    assert_relative_eq!(hit.t, 0.5, epsilon = 1e-12);
    assert_relative_eq!(hit.u, 0.5, epsilon = 1e-12);

    // Query stops just short of the cell.
    let start = Point3::new(1.0, 1.0, 0.0);
    let near = line.intersect_with_line(&start, &Point3::new(1.0, 0.001, 0.0), 0.01);
    assert!(near.is_some_and(|h| h.t == 1.0));
    let far = line.intersect_with_line(&start, &Point3::new(1.0, 0.5, 0.0), 0.01);
    assert!(far.is_none());
}

#[test]
fn shape_functions_and_derivatives() {
    assert_eq!(interpolate_functions(0.25), [0.75, 0.25]);
    assert_eq!(interpolate_derivs::<f64>(), [-1.0, 1.0]);

    let line = Line::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 2.0, 0.0));
    // Two components: f = y, g = 3.
    let d = line.derivatives(&[0.0, 3.0, 2.0, 3.0], 2).unwrap();
    assert_eq!(d, vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    assert!(line.derivatives(&[0.0, 1.0, 2.0], 2).is_err());

    let (x, w) = line.evaluate_location(0.5);
    assert_eq!(x, Point3::new(0.0, 1.0, 0.0));
    assert_eq!(w, [0.5, 0.5]);
}

#[test]
fn cell_boundary_picks_nearest_vertex() {
    let line = Line::with_ids(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), [10, 20]);
    let b = line.cell_boundary(0.7);
    assert_eq!(b.point_ids, [20]);
    assert!(b.inside);
    let b = line.cell_boundary(-0.2);
    assert_eq!(b.point_ids, [10]);
    assert!(!b.inside);
    assert_eq!(line.triangulate().0, [10, 20]);
}

#[test]
fn disjoint_segments_keep_a_positive_distance() {
    let pair = distance_between_segments(
        &Point3::new(0.0, 0.0, 0.0),
        &Point3::new(1.0, 0.0, 0.0),
        &Point3::new(2.0, 1.0, 0.0),
        &Point3::new(2.0, 3.0, 0.0),
    );
    assert_relative_eq!(pair.dist2, 2.0, epsilon = 1e-12);
    assert_eq!((pair.t1, pair.t2), (1.0, 0.0));
    assert_eq!(pair.closest1, Point3::new(1.0, 0.0, 0.0));
    assert_eq!(pair.closest2, Point3::new(2.0, 1.0, 0.0));
}

#[test]
fn far_point_along_the_line_is_outside() {
    let line = Line::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
    let ev = line.evaluate_position(&Point3::new(200000.0, 0.0, 0.0));
    assert_eq!(ev.location, Location::Outside);
    assert!(!ev.location.is_inside());
    assert!(ev.t > 1.0);
    assert_eq!(ev.closest, Point3::new(1.0, 0.0, 0.0));
    assert_eq!(ev.dist2, 199999.0 * 199999.0);
}

#[test]
fn distance_matches_dense_sampling() {
    let mut rng = StdRng::seed_from_u64(31);
    let n = 2000;
    for _ in 0..50 {
        let line = Line::new(random_point(&mut rng), random_point(&mut rng));
        let x = if rng.random_range(0.0..1.0) < 0.2 {
            // Far along the line, where the short-segment fallback applies.
            let [a, b] = line.points();
            a.lerp(&b, rng.random_range(2.0e5..5.0e5))
        } else {
            random_point(&mut rng)
        };
        let ev = line.evaluate_position(&x);

        let mut sampled = f64::INFINITY;
        for i in 0..=n {
            let (p, _) = line.evaluate_location(i as f64 / n as f64);
            sampled = sampled.min(p.distance_squared_to(&x));
        }
        assert!(ev.dist2 <= sampled * (1.0 + 1e-12) + 1e-9);
        assert_eq!(ev.location.is_inside(), (0.0..=1.0).contains(&ev.t));

        let [a, b] = line.points();
        let spacing = a.distance_squared_to(&b).sqrt() / n as f64;
        assert!(sampled.sqrt() <= ev.dist2.sqrt() + spacing + 1e-9);
    }
}
