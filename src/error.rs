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

/// Caller contract violations.
///
/// Degenerate geometry is not an error: it is reported through `Option`,
/// `Location::Degenerate`, `LineIntersection::Parallel` or zero normals.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("attribute array `{name}` holds {len} values for {components} components")]
    AttributeLayout {
        name: String,
        len: usize,
        components: usize,
    },

    #[error("point id {id} is out of range for attribute array `{name}` with {tuples} tuples")]
    PointIdOutOfRange {
        name: String,
        id: usize,
        tuples: usize,
    },

    #[error("output point data does not have the layout of the input point data")]
    LayoutMismatch,

    #[error("expected {expected} values ({dim} per vertex), got {got}")]
    ValueCount {
        expected: usize,
        got: usize,
        dim: usize,
    },
}

pub type Result<T> = std::result::Result<T, GeometryError>;
