// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The fixed 16-byte shape prefix.
//!
//! ```text
//! offset  size  field
//!      0     8  rows  (u64)
//!      8     8  cols  (u64)
//!     16   4*n  data  (f32, row-major), n = rows * cols
//! ```

use crate::{ByteOrder, Section, Shape, ThinMatrixError};
use std::io::{Read, Write};

/// Size of the encoded header in bytes.
pub const HEADER_BYTES: usize = 16;

/// The decoded shape prefix of a thin matrix buffer.
///
/// Fields are kept as raw `u64`s so that a header can be inspected even when
/// its dimensions do not fit this platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub rows: u64,
    pub cols: u64,
}

impl Header {
    /// Builds a header for the given shape.
    pub fn from_shape(shape: Shape) -> Result<Self, ThinMatrixError> {
        let unrepresentable = || ThinMatrixError::UnrepresentableDimensions {
            rows: shape.rows(),
            cols: shape.cols(),
        };
        Ok(Self {
            rows: u64::try_from(shape.rows()).map_err(|_| unrepresentable())?,
            cols: u64::try_from(shape.cols()).map_err(|_| unrepresentable())?,
        })
    }

    /// Parses a header from its 16 encoded bytes.
    pub fn from_bytes(bytes: [u8; HEADER_BYTES], order: ByteOrder) -> Self {
        let mut rows = [0u8; 8];
        let mut cols = [0u8; 8];
        rows.copy_from_slice(&bytes[..8]);
        cols.copy_from_slice(&bytes[8..]);
        Self {
            rows: order.u64_from_bytes(rows),
            cols: order.u64_from_bytes(cols),
        }
    }

    /// Encodes the header into 16 bytes.
    pub fn to_bytes(&self, order: ByteOrder) -> [u8; HEADER_BYTES] {
        let mut out = [0u8; HEADER_BYTES];
        out[..8].copy_from_slice(&order.u64_to_bytes(self.rows));
        out[8..].copy_from_slice(&order.u64_to_bytes(self.cols));
        out
    }

    /// Reads exactly [`HEADER_BYTES`] from `reader`.
    ///
    /// Fails with [`ThinMatrixError::TruncatedInput`] if the source ends early.
    pub fn read_from<R: Read + ?Sized>(
        reader: &mut R,
        order: ByteOrder,
    ) -> Result<Self, ThinMatrixError> {
        let mut buf = [0u8; HEADER_BYTES];
        let got = crate::codec::read_full(reader, &mut buf)?;
        if got < HEADER_BYTES {
            return Err(ThinMatrixError::TruncatedInput {
                section: Section::Header,
                expected: HEADER_BYTES as u64,
                actual: got as u64,
            });
        }
        Ok(Self::from_bytes(buf, order))
    }

    /// Writes the 16 header bytes to `writer`.
    pub fn write_to<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        order: ByteOrder,
    ) -> Result<(), ThinMatrixError> {
        writer.write_all(&self.to_bytes(order))?;
        Ok(())
    }

    /// Declared payload length in bytes, without platform limits.
    ///
    /// `None` if `4 * rows * cols` does not fit a `u64`.
    pub fn declared_payload_len(&self) -> Option<u64> {
        self.rows.checked_mul(self.cols)?.checked_mul(4)
    }

    /// Total encoded length (header plus payload), or `None` on overflow.
    pub fn encoded_len(&self) -> Option<u64> {
        self.declared_payload_len()?
            .checked_add(HEADER_BYTES as u64)
    }

    /// Converts the declared dimensions into a [`Shape`] for this platform.
    ///
    /// Fails with [`ThinMatrixError::InvalidDimensions`] if either field does
    /// not fit `usize` or the payload byte count overflows it.
    pub fn shape(&self) -> Result<Shape, ThinMatrixError> {
        let invalid = |detail: &str| ThinMatrixError::InvalidDimensions {
            rows: self.rows,
            cols: self.cols,
            detail: detail.to_string(),
        };
        let rows = usize::try_from(self.rows).map_err(|_| invalid("rows exceed usize"))?;
        let cols = usize::try_from(self.cols).map_err(|_| invalid("cols exceed usize"))?;
        let shape = Shape::new(rows, cols);
        shape
            .payload_bytes()
            .ok_or_else(|| invalid("payload size overflows usize"))?;
        Ok(shape)
    }

    /// Payload length in bytes as a `usize`; see [`shape`](Header::shape).
    pub fn payload_len(&self) -> Result<usize, ThinMatrixError> {
        let shape = self.shape()?;
        // shape() already proved the multiplication fits.
        Ok(shape.rows() * shape.cols() * crate::shape::ELEMENT_BYTES)
    }
}
