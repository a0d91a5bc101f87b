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

use std::{
    array,
    ops::{Add, Index, IndexMut, Sub},
};

use crate::{geometry::vector::Vector, numeric::scalar::Scalar};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<T: Scalar, const N: usize> {
    pub coords: [T; N],
}

impl<T: Scalar, const N: usize> Point<T, N> {
    #[inline]
    pub const fn from_coords(coords: [T; N]) -> Self {
        Point { coords }
    }

    #[inline]
    pub fn zero() -> Self {
        Point {
            coords: [T::zero(); N],
        }
    }

    #[inline]
    pub fn coords(&self) -> &[T; N] {
        &self.coords
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.coords.iter()
    }

    #[inline]
    pub fn as_vector(&self) -> Vector<T, N> {
        Vector::from_coords(self.coords)
    }

    /// Vector from `self` to `other`.
    #[inline]
    pub fn vector_to(&self, other: &Self) -> Vector<T, N> {
        Vector::from_coords(array::from_fn(|i| other.coords[i] - self.coords[i]))
    }

    #[inline]
    pub fn add_vector(&self, v: &Vector<T, N>) -> Self {
        Point {
            coords: array::from_fn(|i| self.coords[i] + v.coords[i]),
        }
    }

    #[inline]
    pub fn distance_squared_to(&self, other: &Self) -> T {
        self.vector_to(other).norm_squared()
    }

    /// `self + t * (other - self)`.
    #[inline]
    pub fn lerp(&self, other: &Self, t: T) -> Self {
        Point {
            coords: array::from_fn(|i| self.coords[i] + t * (other.coords[i] - self.coords[i])),
        }
    }
}

impl<T: Scalar> Point<T, 2> {
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Point { coords: [x, y] }
    }
}

impl<T: Scalar> Point<T, 3> {
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Self {
        Point { coords: [x, y, z] }
    }

    /// Drops the coordinate at `drop`, keeping the other two in order.
    pub fn drop_axis(&self, drop: usize) -> Point<T, 2> {
        match drop {
            0 => Point::<T, 2>::new(self.coords[1], self.coords[2]),
            1 => Point::<T, 2>::new(self.coords[0], self.coords[2]),
            _ => Point::<T, 2>::new(self.coords[0], self.coords[1]),
        }
    }
}

impl<T: Scalar, const N: usize> Default for Point<T, N> {
    fn default() -> Point<T, N> {
        Point::zero()
    }
}

impl<T: Scalar, const N: usize> Index<usize> for Point<T, N> {
    type Output = T;
    fn index(&self, i: usize) -> &Self::Output {
        &self.coords[i]
    }
}

impl<T: Scalar, const N: usize> IndexMut<usize> for Point<T, N> {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.coords[i]
    }
}

impl<T: Scalar, const N: usize> Sub for Point<T, N> {
    type Output = Vector<T, N>;
    #[inline]
    fn sub(self, rhs: Point<T, N>) -> Vector<T, N> {
        rhs.vector_to(&self)
    }
}

impl<T: Scalar, const N: usize> Add<Vector<T, N>> for Point<T, N> {
    type Output = Point<T, N>;
    #[inline]
    fn add(self, rhs: Vector<T, N>) -> Point<T, N> {
        self.add_vector(&rhs)
    }
}

impl<T: Scalar, const N: usize> Sub<Vector<T, N>> for Point<T, N> {
    type Output = Point<T, N>;
    #[inline]
    fn sub(self, rhs: Vector<T, N>) -> Point<T, N> {
        self.add_vector(&-rhs)
    }
}

impl<T: Scalar, const N: usize> From<[T; N]> for Point<T, N> {
    fn from(coords: [T; N]) -> Self {
        Point { coords }
    }
}

impl<T: Scalar, const N: usize> From<Point<T, N>> for [T; N] {
    fn from(p: Point<T, N>) -> [T; N] {
        p.coords
    }
}

pub type Point2<T> = Point<T, 2>;
pub type Point3<T> = Point<T, 3>;
