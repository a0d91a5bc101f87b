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

//! Linear cells: the two-point line and the three-point triangle.

pub mod line;
pub mod output;
pub mod quadric;
pub mod triangle;

pub use line::Line;
pub use output::{AttributeArray, PointAttributes, PolyOutput};
pub use quadric::Quadric;
pub use triangle::Triangle;

use crate::numeric::scalar::Scalar;

/// Where a query point projects relative to a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Inside,
    Outside,
    /// The cell has no usable parametric frame; the answer comes from the
    /// nearest boundary instead.
    Degenerate,
}

impl Location {
    #[inline]
    pub fn is_inside(self) -> bool {
        matches!(self, Location::Inside)
    }
}

/// Closest boundary entity of a cell for a parametric location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellBoundary<const K: usize> {
    pub point_ids: [usize; K],
    /// `true` when the parametric location lies inside the cell.
    pub inside: bool,
}

/// Options shared by line and triangle clipping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipOpts<T: Scalar> {
    /// Iso-value separating kept from discarded parts.
    pub value: T,
    /// Keep the part with scalars `<= value` instead of `> value`.
    pub inside_out: bool,
}

impl<T: Scalar> Default for ClipOpts<T> {
    fn default() -> Self {
        Self {
            value: T::zero(),
            inside_out: false,
        }
    }
}

impl<T: Scalar> ClipOpts<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }

    pub fn inside_out(mut self, inside_out: bool) -> Self {
        self.inside_out = inside_out;
        self
    }

    /// Whether a vertex with scalar `s` belongs to the kept part.
    #[inline]
    pub fn keeps(&self, s: T) -> bool {
        if self.inside_out {
            s <= self.value
        } else {
            s > self.value
        }
    }
}
