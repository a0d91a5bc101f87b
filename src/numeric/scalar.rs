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

use num_traits::{Float, FloatConst};

use std::fmt::Debug;

/// Coordinate type of every cell computation.
///
/// `f64` is the reference type: all tolerances in `geometry::util` are tuned
/// for double precision. `f32` is provided for callers that store meshes in
/// single precision and accept the looser results.
pub trait Scalar: Float + FloatConst + Debug + Default + Send + Sync + 'static {
    /// Converts an `f64` literal (tolerance, weight, constant) to `Self`.
    fn from_constant(v: f64) -> Self;

    fn from_num_den(num: i32, den: i32) -> Self {
        Self::from_constant(num as f64 / den as f64)
    }

    /// Bit pattern used as an exact hash key. `-0.0` and `0.0` map to the same key.
    fn key_bits(self) -> u64;

    /// Returns -1, 0, or +1.
    fn sign(self) -> i8 {
        if self > Self::zero() {
            1
        } else if self < Self::zero() {
            -1
        } else {
            0
        }
    }
}

impl Scalar for f64 {
    #[inline(always)]
    fn from_constant(v: f64) -> Self {
        v
    }

    #[inline(always)]
    fn key_bits(self) -> u64 {
        if self == 0.0 { 0 } else { self.to_bits() }
    }
}

impl Scalar for f32 {
    #[inline(always)]
    fn from_constant(v: f64) -> Self {
        v as f32
    }

    #[inline(always)]
    fn key_bits(self) -> u64 {
        if self == 0.0 { 0 } else { self.to_bits() as u64 }
    }
}
