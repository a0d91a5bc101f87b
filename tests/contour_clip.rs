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
        AttributeArray, ClipOpts, Line, PointAttributes, PolyOutput, Triangle,
        triangle::triangle_area,
    },
    error::GeometryError,
    geometry::Point3,
};

fn unit() -> Triangle<f64> {
    Triangle::new(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    )
}

fn scalar_data(values: &[f64]) -> PointAttributes<f64> {
    PointAttributes::new().with_array(AttributeArray::new("scalars", 1, values.to_vec()).unwrap())
}

fn output_area(out: &PolyOutput<f64>) -> f64 {
    out.triangles
        .iter()
        .map(|t| triangle_area(&out.points[t[0]], &out.points[t[1]], &out.points[t[2]]))
        .sum()
}

#[test]
fn line_contour_emits_one_vertex() {
    let line = Line::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
    let pd = scalar_data(&[0.0, 2.0]);
    let mut out = PolyOutput::new();
    line.contour(0.5, &[0.0, 2.0], &pd, 3, &mut out).unwrap();

    assert_eq!(out.verts, vec![0]);
    assert_eq!(out.vert_cells, vec![3]);
    assert_eq!(out.points[0], Point3::new(0.25, 0.0, 0.0));
    assert_eq!(out.point_data.get("scalars").unwrap().values(), &[0.5]);

    // Same side: nothing.
    line.contour(5.0, &[0.0, 2.0], &pd, 3, &mut out).unwrap();
    assert_eq!(out.num_cells(), 1);
}

#[test]
fn line_clip_keeps_orientation() {
    let line = Line::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
    let pd = scalar_data(&[0.0, 2.0]);

    let mut out = PolyOutput::new();
    line.clip(&ClipOpts::new(0.5), &[0.0, 2.0], &pd, 0, &mut out).unwrap();
    let [a, b] = out.lines[0];
    assert_eq!(out.points[a], Point3::new(0.25, 0.0, 0.0));
    assert_eq!(out.points[b], Point3::new(1.0, 0.0, 0.0));

    let mut out = PolyOutput::new();
    line.clip(&ClipOpts::new(0.5).inside_out(true), &[0.0, 2.0], &pd, 0, &mut out)
        .unwrap();
    let [a, b] = out.lines[0];
    assert_eq!(out.points[a], Point3::new(0.0, 0.0, 0.0));
    assert_eq!(out.points[b], Point3::new(0.25, 0.0, 0.0));
}

#[test]
fn triangle_contour_crosses_two_edges() {
    let pd = scalar_data(&[0.0, 1.0, 1.0]);
    let mut out = PolyOutput::new();
    unit().contour(0.5, &[0.0, 1.0, 1.0], &pd, 0, &mut out).unwrap();

    assert_eq!(out.lines.len(), 1);
    let [a, b] = out.lines[0];
    assert_eq!(out.points[a], Point3::new(0.0, 0.5, 0.0));
    assert_eq!(out.points[b], Point3::new(0.5, 0.0, 0.0));
    assert_eq!(out.point_data.get("scalars").unwrap().values(), &[0.5, 0.5]);
}

#[test]
fn vertex_on_isovalue_counts_as_below() {
    let pd = scalar_data(&[0.5, 1.0, 0.0]);
    let mut out = PolyOutput::new();
    unit().contour(0.5, &[0.5, 1.0, 0.0], &pd, 0, &mut out).unwrap();
    assert_eq!(out.lines.len(), 1);
    let [a, b] = out.lines[0];
    assert_eq!(out.points[a], Point3::new(0.5, 0.5, 0.0));
    assert_eq!(out.points[b], Point3::new(0.0, 0.0, 0.0));

    // Clipping: the on-value vertex is dropped, its crossings collapse onto it.
    let mut out = PolyOutput::new();
    unit()
        .clip(&ClipOpts::new(0.5), &[0.5, 1.0, 1.0], &scalar_data(&[0.5, 1.0, 1.0]), 0, &mut out)
        .unwrap();
    assert_eq!(out.triangles.len(), 1);
    assert_relative_eq!(output_area(&out), 0.5, epsilon = 1e-15);
}

#[test]
fn shared_edge_gives_one_crossing_point() {
    let points = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
    ];
    let s = [0.0, 0.3, 0.9, 1.7];
    let pd = scalar_data(&s);
    let first = Triangle::with_ids([points[0], points[1], points[2]], [0, 1, 2]);
    let second = Triangle::with_ids([points[1], points[3], points[2]], [1, 3, 2]);

    let mut out = PolyOutput::for_input(&pd);
    first.contour(0.37, &[s[0], s[1], s[2]], &pd, 0, &mut out).unwrap();
    second.contour(0.37, &[s[1], s[3], s[2]], &pd, 1, &mut out).unwrap();

    assert_eq!(out.lines.len(), 2);
    assert_eq!(out.line_cells, vec![0, 1]);
    assert_eq!(out.num_points(), 3);
    let shared: Vec<usize> = out.lines[0]
        .iter()
        .filter(|id| out.lines[1].contains(*id))
        .copied()
        .collect();
    assert_eq!(shared.len(), 1);
    for v in out.point_data.get("scalars").unwrap().values() {
        assert_relative_eq!(*v, 0.37, epsilon = 1e-12);
    }
}

#[test]
fn clip_keeps_corner_or_quad() {
    let s = [1.0, 0.0, 0.0];
    let pd = scalar_data(&s);

    let mut kept = PolyOutput::new();
    unit().clip(&ClipOpts::new(0.5), &s, &pd, 9, &mut kept).unwrap();
    assert_eq!(kept.triangles.len(), 1);
    assert_eq!(kept.triangle_cells, vec![9]);
    assert_relative_eq!(output_area(&kept), 0.125, epsilon = 1e-15);

    let mut rest = PolyOutput::new();
    unit()
        .clip(&ClipOpts::new(0.5).inside_out(true), &s, &pd, 9, &mut rest)
        .unwrap();
    assert_eq!(rest.triangles.len(), 2);
    assert_relative_eq!(output_area(&rest), 0.375, epsilon = 1e-15);
}

#[test]
fn clip_halves_cover_the_triangle() {
    let mut rng = StdRng::seed_from_u64(19);
    for _ in 0..200 {
        let t = Triangle::new(
            Point3::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0), 0.0),
            Point3::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0), 0.0),
            Point3::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0), 0.0),
        );
        let s = [
            rng.random_range(0.0..1.0),
            rng.random_range(0.0..1.0),
            rng.random_range(0.0..1.0),
        ];
        let pd = scalar_data(&s);
        let value = rng.random_range(0.0..1.0);

        let mut above = PolyOutput::new();
        let mut below = PolyOutput::new();
        t.clip(&ClipOpts::new(value), &s, &pd, 0, &mut above).unwrap();
        t.clip(&ClipOpts::new(value).inside_out(true), &s, &pd, 0, &mut below)
            .unwrap();
        assert!(above.triangles.len() <= 2 && below.triangles.len() <= 2);
        assert_relative_eq!(output_area(&above) + output_area(&below), t.area(), epsilon = 1e-12);

        for v in above.point_data.get("scalars").unwrap().values() {
            assert!(*v >= value - 1e-12);
        }
        for v in below.point_data.get("scalars").unwrap().values() {
            assert!(*v <= value + 1e-12);
        }
    }
}

#[test]
fn contour_reports_bad_point_data() {
    let line = Line::with_ids(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), [0, 5]);
    let pd = scalar_data(&[0.0, 1.0]);
    let mut out = PolyOutput::new();
    let err = line.contour(0.5, &[0.0, 1.0], &pd, 0, &mut out).unwrap_err();
    assert!(matches!(err, GeometryError::PointIdOutOfRange { id: 5, .. }));
    assert_eq!(out.num_points(), 0);

    let mut out = PolyOutput::for_input(&PointAttributes::new());
    out.insert_unique_point(Point3::new(9.0, 9.0, 9.0));
    let err = unit()
        .contour(0.5, &[0.0, 1.0, 1.0], &scalar_data(&[0.0, 1.0, 1.0]), 0, &mut out)
        .unwrap_err();
    assert_eq!(err, GeometryError::LayoutMismatch);
}

#[test]
fn bad_vertex_id_leaves_no_partial_output() {
    let pd = scalar_data(&[1.0, 1.0, 1.0]);
    let t = Triangle::with_ids(unit().points, [0, 1, 5]);
    let mut out = PolyOutput::new();
    let err = t.clip(&ClipOpts::new(0.5), &[1.0, 1.0, 1.0], &pd, 0, &mut out).unwrap_err();
    assert!(matches!(err, GeometryError::PointIdOutOfRange { id: 5, tuples: 3, .. }));
    assert_eq!(out.num_points(), 0);
    assert_eq!(out.num_cells(), 0);
    assert!(out.point_data.is_empty());

    let err = t.contour(0.5, &[1.0, 0.0, 0.0], &pd, 0, &mut out).unwrap_err();
    assert!(matches!(err, GeometryError::PointIdOutOfRange { id: 5, .. }));
    assert_eq!(out.num_points(), 0);

    let line = Line::with_ids(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), [2, 7]);
    let err = line.clip(&ClipOpts::new(0.5), &[1.0, 1.0], &pd, 0, &mut out).unwrap_err();
    assert!(matches!(err, GeometryError::PointIdOutOfRange { id: 7, .. }));
    assert_eq!(out.num_points(), 0);

    // The same output still accepts a valid cell afterwards.
    unit().clip(&ClipOpts::new(0.5), &[1.0, 1.0, 1.0], &pd, 3, &mut out).unwrap();
    assert_eq!(out.triangles, vec![[0, 1, 2]]);
    assert_eq!(out.triangle_cells, vec![3]);
    assert_eq!(out.point_data.get("scalars").unwrap().tuple(2), Some(&[1.0][..]));
}
