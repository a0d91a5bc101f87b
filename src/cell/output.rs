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

use ahash::AHashMap;

use crate::{
    error::{GeometryError, Result},
    geometry::point::Point3,
    numeric::scalar::Scalar,
};

/// A named attribute array with a fixed number of components per point.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeArray<T: Scalar> {
    name: String,
    components: usize,
    values: Vec<T>,
}

impl<T: Scalar> AttributeArray<T> {
    /// `values` holds `components` values per point, point after point.
    pub fn new(name: impl Into<String>, components: usize, values: Vec<T>) -> Result<Self> {
        let name = name.into();
        if components == 0 || values.len() % components != 0 {
            log::debug!(
                "rejecting attribute array `{}`: {} values, {} components",
                name,
                values.len(),
                components
            );
            return Err(GeometryError::AttributeLayout {
                name,
                len: values.len(),
                components,
            });
        }
        Ok(AttributeArray {
            name,
            components,
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn components(&self) -> usize {
        self.components
    }

    pub fn num_tuples(&self) -> usize {
        self.values.len() / self.components
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn tuple(&self, id: usize) -> Option<&[T]> {
        let start = id.checked_mul(self.components)?;
        self.values.get(start..start + self.components)
    }

    fn empty_like(&self) -> Self {
        AttributeArray {
            name: self.name.clone(),
            components: self.components,
            values: Vec::new(),
        }
    }

    fn check_id(&self, id: usize) -> Result<()> {
        if id < self.num_tuples() {
            Ok(())
        } else {
            log::debug!("point id {} out of range for `{}`", id, self.name);
            Err(GeometryError::PointIdOutOfRange {
                name: self.name.clone(),
                id,
                tuples: self.num_tuples(),
            })
        }
    }
}

/// Per-point attributes indexed by global point id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointAttributes<T: Scalar> {
    arrays: Vec<AttributeArray<T>>,
}

impl<T: Scalar> PointAttributes<T> {
    pub fn new() -> Self {
        PointAttributes { arrays: Vec::new() }
    }

    pub fn add_array(&mut self, array: AttributeArray<T>) {
        self.arrays.push(array);
    }

    pub fn with_array(mut self, array: AttributeArray<T>) -> Self {
        self.add_array(array);
        self
    }

    pub fn arrays(&self) -> &[AttributeArray<T>] {
        &self.arrays
    }

    pub fn get(&self, name: &str) -> Option<&AttributeArray<T>> {
        self.arrays.iter().find(|a| a.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// Same arrays (names and component counts) without any values.
    pub fn empty_like(&self) -> Self {
        PointAttributes {
            arrays: self.arrays.iter().map(AttributeArray::empty_like).collect(),
        }
    }

    fn same_layout(&self, other: &Self) -> bool {
        self.arrays.len() == other.arrays.len()
            && self
                .arrays
                .iter()
                .zip(&other.arrays)
                .all(|(a, b)| a.name == b.name && a.components == b.components)
    }

    fn check_ids(&self, ids: &[usize]) -> Result<()> {
        for array in &self.arrays {
            for &id in ids {
                array.check_id(id)?;
            }
        }
        Ok(())
    }

    // Callers validate ids with `check_ids` first.
    fn push_copy(&mut self, src: &Self, id: usize) {
        for (dst, src) in self.arrays.iter_mut().zip(&src.arrays) {
            let c = src.components;
            dst.values.extend_from_slice(&src.values[id * c..(id + 1) * c]);
        }
    }

    fn push_interpolated(&mut self, src: &Self, a: usize, b: usize, t: T) {
        for (dst, src) in self.arrays.iter_mut().zip(&src.arrays) {
            let c = src.components;
            for k in 0..c {
                let va = src.values[a * c + k];
                let vb = src.values[b * c + k];
                dst.values.push(va + t * (vb - va));
            }
        }
    }
}

/// Poly data produced by contouring and clipping.
///
/// Points are merged by exact coordinate match, so cells sharing an edge
/// produce a single crossing point for it. Every output cell records the id
/// of the input cell it was generated from.
#[derive(Clone, Debug, Default)]
pub struct PolyOutput<T: Scalar> {
    pub points: Vec<Point3<T>>,
    pub point_data: PointAttributes<T>,
    pub verts: Vec<usize>,
    pub lines: Vec<[usize; 2]>,
    pub triangles: Vec<[usize; 3]>,
    pub vert_cells: Vec<usize>,
    pub line_cells: Vec<usize>,
    pub triangle_cells: Vec<usize>,
    merge: AHashMap<[u64; 3], usize>,
}

impl<T: Scalar> PolyOutput<T> {
    pub fn new() -> Self {
        PolyOutput {
            points: Vec::new(),
            point_data: PointAttributes::new(),
            verts: Vec::new(),
            lines: Vec::new(),
            triangles: Vec::new(),
            vert_cells: Vec::new(),
            line_cells: Vec::new(),
            triangle_cells: Vec::new(),
            merge: AHashMap::new(),
        }
    }

    /// Output whose point data mirrors the layout of `input`.
    pub fn for_input(input: &PointAttributes<T>) -> Self {
        let mut out = PolyOutput::new();
        out.point_data = input.empty_like();
        out
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_cells(&self) -> usize {
        self.verts.len() + self.lines.len() + self.triangles.len()
    }

    /// Returns the id of `x`, inserting it if no identical point exists yet.
    /// The flag is `true` when a new point was created.
    pub fn insert_unique_point(&mut self, x: Point3<T>) -> (usize, bool) {
        let key = x.coords.map(T::key_bits);
        if let Some(&id) = self.merge.get(&key) {
            return (id, false);
        }
        let id = self.points.len();
        self.points.push(x);
        self.merge.insert(key, id);
        (id, true)
    }

    /// Inserts a copy of input point `src_id` located at `x`.
    pub fn insert_copied(
        &mut self,
        x: Point3<T>,
        input: &PointAttributes<T>,
        src_id: usize,
    ) -> Result<usize> {
        self.prepare(input, &[src_id])?;
        let (id, created) = self.insert_unique_point(x);
        if created {
            self.point_data.push_copy(input, src_id);
        }
        Ok(id)
    }

    /// Inserts the point `x` lying at `t` from input point `a` to input point `b`,
    /// interpolating the attributes with the same `t`.
    pub fn insert_interpolated(
        &mut self,
        x: Point3<T>,
        input: &PointAttributes<T>,
        a: usize,
        b: usize,
        t: T,
    ) -> Result<usize> {
        self.prepare(input, &[a, b])?;
        let (id, created) = self.insert_unique_point(x);
        if created {
            self.point_data.push_interpolated(input, a, b, t);
        }
        Ok(id)
    }

    pub fn push_vert(&mut self, id: usize, cell_id: usize) {
        self.verts.push(id);
        self.vert_cells.push(cell_id);
    }

    /// Appends a line unless both ends merged into one point.
    pub fn push_line(&mut self, ids: [usize; 2], cell_id: usize) -> bool {
        if ids[0] == ids[1] {
            log::trace!("dropping collapsed line {:?} from cell {}", ids, cell_id);
            return false;
        }
        self.lines.push(ids);
        self.line_cells.push(cell_id);
        true
    }

    /// Appends a triangle unless two of its corners merged into one point.
    pub fn push_triangle(&mut self, ids: [usize; 3], cell_id: usize) -> bool {
        if ids[0] == ids[1] || ids[1] == ids[2] || ids[2] == ids[0] {
            log::trace!("dropping collapsed triangle {:?} from cell {}", ids, cell_id);
            return false;
        }
        self.triangles.push(ids);
        self.triangle_cells.push(cell_id);
        true
    }

    /// Checks that `input` matches the output layout and covers every id in
    /// `ids`. Nothing is modified on error. An output that has not received
    /// any point yet adopts the input layout.
    pub(crate) fn prepare(&mut self, input: &PointAttributes<T>, ids: &[usize]) -> Result<()> {
        let adopt = self.points.is_empty() && self.point_data.is_empty();
        if !adopt && !self.point_data.same_layout(input) {
            log::debug!(
                "point data layout mismatch: {} output arrays, {} input arrays",
                self.point_data.arrays.len(),
                input.arrays.len()
            );
            return Err(GeometryError::LayoutMismatch);
        }
        input.check_ids(ids)?;
        if adopt {
            self.point_data = input.empty_like();
        }
        Ok(())
    }
}

/// Locates the `value` crossing on the edge `v0 - v1`.
///
/// Returns `(from, to, t)` with `from` the endpoint of lower scalar, so the
/// crossing `x = p[from] + t (p[to] - p[from])` does not depend on the
/// direction the edge is walked in.
pub(crate) fn edge_crossing<T: Scalar>(
    v0: usize,
    v1: usize,
    scalars: &[T],
    value: T,
) -> (usize, usize, T) {
    let (from, to) = if scalars[v1] - scalars[v0] > T::zero() {
        (v0, v1)
    } else {
        (v1, v0)
    };
    let delta = scalars[to] - scalars[from];
    let t = if delta.is_zero() {
        T::zero()
    } else {
        (value - scalars[from]) / delta
    };
    (from, to, t)
}
