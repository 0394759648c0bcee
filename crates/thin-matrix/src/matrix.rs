// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! In-memory matrix type and the [`RowMajor`] source abstraction.

use crate::{Shape, ThinMatrixError};
use std::fmt;

/// An owned, row-major matrix of `f32` values.
///
/// `Matrix` is what [`crate::MatrixCodec::decode`] produces. Once built it
/// only exposes read access; callers that need to transform the values take
/// them out with [`into_vec`](Matrix::into_vec).
///
/// # Memory Layout
/// Elements are stored contiguously: all columns of row 0, then row 1, etc.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    shape: Shape,
    data: Vec<f32>,
}

impl Matrix {
    /// Creates a matrix filled with zeros.
    ///
    /// Returns an error if `rows * cols` overflows `usize`.
    ///
    /// # Examples
    /// ```
    /// use thin_matrix::Matrix;
    /// let m = Matrix::zeros(2, 3).unwrap();
    /// assert_eq!(m.len(), 6);
    /// ```
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, ThinMatrixError> {
        let shape = Shape::new(rows, cols);
        let len = shape
            .num_elements()
            .ok_or_else(|| overflow(rows, cols))?;
        Ok(Self {
            shape,
            data: vec![0.0; len],
        })
    }

    /// Creates a matrix from a flat row-major buffer.
    ///
    /// Returns an error if `data.len()` is not `rows * cols`.
    ///
    /// # Examples
    /// ```
    /// use thin_matrix::Matrix;
    /// let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(m.get(1, 0), Some(3.0));
    /// ```
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self, ThinMatrixError> {
        let shape = Shape::new(rows, cols);
        let expected = shape
            .num_elements()
            .ok_or_else(|| overflow(rows, cols))?;
        if data.len() != expected {
            return Err(ThinMatrixError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Creates a matrix from nested rows.
    ///
    /// The column count is taken from the first row; an empty outer vector
    /// yields a `0x0` matrix.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self, ThinMatrixError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len().saturating_mul(cols));
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(ThinMatrixError::RaggedRows {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            shape: Shape::new(rows.len(), cols),
            data,
        })
    }

    /// Returns the matrix shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.shape.cols()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the matrix holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the element at `(row, col)`, or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.shape.offset(row, col).map(|i| self.data[i])
    }

    /// Returns one row as a slice, or `None` if out of bounds.
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if index >= self.rows() {
            return None;
        }
        let start = index * self.cols();
        Some(&self.data[start..start + self.cols()])
    }

    /// Iterates over rows in order.
    ///
    /// A matrix with zero columns yields `rows` empty slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        (0..self.rows()).map(move |i| {
            let start = i * self.cols();
            &self.data[start..start + self.cols()]
        })
    }

    /// Returns the flat row-major element slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Consumes the matrix and returns its row-major elements.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Compares shape and element bit patterns.
    ///
    /// Unlike `==`, two NaNs with the same payload compare equal and
    /// `0.0` differs from `-0.0`.
    pub fn bitwise_eq(&self, other: &Matrix) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

fn overflow(rows: usize, cols: usize) -> ThinMatrixError {
    ThinMatrixError::InvalidDimensions {
        rows: rows as u64,
        cols: cols as u64,
        detail: "element count overflows usize".into(),
    }
}

/// Formats as `[a, b;c, d]`: columns separated by `", "`, rows by `";"`.
///
/// A matrix without elements formats as `[]`, whatever its row count.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "[]");
        }
        write!(f, "[")?;
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{v}")?;
            }
        }
        write!(f, "]")
    }
}

/// Anything the codec can encode: a shape plus row-major access to each row.
///
/// Implemented for [`Matrix`], nested `Vec`s and slices of rows, and fixed
/// size arrays. Unless a source reports itself
/// [`is_rectangular`](RowMajor::is_rectangular), the encoder checks every row
/// against [`cols`](RowMajor::cols), so ragged nested input is rejected rather
/// than written corrupt.
pub trait RowMajor {
    /// Number of rows.
    fn rows(&self) -> usize;

    /// Number of columns.
    fn cols(&self) -> usize;

    /// Row `index`, left to right. `index` is always `< rows()`.
    fn row(&self, index: usize) -> &[f32];

    /// `true` if every row is guaranteed to hold exactly `cols()` values,
    /// letting the encoder skip its per-row length check.
    fn is_rectangular(&self) -> bool {
        false
    }
}

impl RowMajor for Matrix {
    fn rows(&self) -> usize {
        self.shape.rows()
    }

    fn cols(&self) -> usize {
        self.shape.cols()
    }

    fn row(&self, index: usize) -> &[f32] {
        let start = index * self.cols();
        &self.data[start..start + self.cols()]
    }

    fn is_rectangular(&self) -> bool {
        true
    }
}

impl<R: AsRef<[f32]>> RowMajor for [R] {
    fn rows(&self) -> usize {
        self.len()
    }

    fn cols(&self) -> usize {
        self.first().map_or(0, |r| r.as_ref().len())
    }

    fn row(&self, index: usize) -> &[f32] {
        self[index].as_ref()
    }
}

impl<R: AsRef<[f32]>> RowMajor for Vec<R> {
    fn rows(&self) -> usize {
        self.as_slice().rows()
    }

    fn cols(&self) -> usize {
        self.as_slice().cols()
    }

    fn row(&self, index: usize) -> &[f32] {
        self.as_slice().row(index)
    }
}

impl<const R: usize, const C: usize> RowMajor for [[f32; C]; R] {
    fn rows(&self) -> usize {
        R
    }

    fn cols(&self) -> usize {
        C
    }

    fn row(&self, index: usize) -> &[f32] {
        &self[index]
    }

    fn is_rectangular(&self) -> bool {
        true
    }
}
