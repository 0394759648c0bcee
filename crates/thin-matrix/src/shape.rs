// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Matrix shape descriptor.

use std::fmt;

/// Size in bytes of one encoded element.
pub const ELEMENT_BYTES: usize = std::mem::size_of::<f32>();

/// The `(rows, cols)` extent of a [`crate::Matrix`].
///
/// Either dimension may be zero. Element and byte counts are computed with
/// checked arithmetic, so a shape read from an untrusted header never wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    rows: usize,
    cols: usize,
}

impl Shape {
    /// Creates a shape with the given number of rows and columns.
    ///
    /// # Examples
    /// ```
    /// use thin_matrix::Shape;
    /// let s = Shape::new(2, 3);
    /// assert_eq!(s.num_elements(), Some(6));
    /// assert_eq!(s.payload_bytes(), Some(24));
    /// ```
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `true` if the shape holds no elements.
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Total number of elements, or `None` on overflow.
    pub fn num_elements(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Size of the encoded payload in bytes, or `None` on overflow.
    pub fn payload_bytes(&self) -> Option<usize> {
        self.num_elements()?.checked_mul(ELEMENT_BYTES)
    }

    /// Flat row-major offset of `(row, col)`, or `None` if out of bounds.
    pub fn offset(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Convenience: `Shape::from((2, 3))`.
impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self::new(rows, cols)
    }
}
