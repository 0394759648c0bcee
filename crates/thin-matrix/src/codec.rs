// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Encoding and decoding between [`Matrix`] values and the thin matrix layout.
//!
//! Both directions are single-pass. The header is always fully produced or
//! consumed before the first payload byte, and the payload moves through a
//! fixed-size chunk buffer so memory use does not depend on a header that
//! has not been validated against the actual input yet.

use crate::header::{Header, HEADER_BYTES};
use crate::shape::ELEMENT_BYTES;
use crate::{ByteLimit, ByteOrder, Matrix, RowMajor, Section, Shape, ThinMatrixError};
use std::io::{ErrorKind, Read, Write};

/// Payload bytes moved per read or write call. Multiple of [`ELEMENT_BYTES`].
const CHUNK_BYTES: usize = 64 * 1024;

/// Elements reserved up front when decoding; the vector grows past this
/// only as payload actually arrives.
const PREALLOC_ELEMENTS: usize = 1 << 20;

/// Reads and writes thin matrix data in a fixed byte order.
///
/// The default codec uses little-endian headers and payload and has no
/// payload limit.
///
/// # Examples
/// ```
/// use thin_matrix::{ByteOrder, Matrix, MatrixCodec};
///
/// let codec = MatrixCodec::new(ByteOrder::Big);
/// let m = Matrix::from_rows(&[[1.0f32, 2.0], [3.0, 4.0]]).unwrap();
/// let bytes = codec.to_bytes(&m).unwrap();
/// assert_eq!(bytes.len(), 16 + 4 * 4);
/// assert!(codec.from_bytes(&bytes).unwrap().bitwise_eq(&m));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatrixCodec {
    byte_order: ByteOrder,
    limit: Option<ByteLimit>,
}

impl MatrixCodec {
    /// Creates a codec for the given byte order with no payload limit.
    pub fn new(byte_order: ByteOrder) -> Self {
        Self {
            byte_order,
            limit: None,
        }
    }

    /// Rejects payloads larger than `limit` during decode.
    pub fn with_limit(mut self, limit: ByteLimit) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns the byte order used for header and payload.
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Returns the payload limit, if any.
    pub fn limit(&self) -> Option<ByteLimit> {
        self.limit
    }

    /// Decodes one matrix from `reader`.
    ///
    /// Consumes exactly `16 + 4 * rows * cols` bytes; anything after the
    /// payload is left unread.
    ///
    /// # Errors
    /// - [`ThinMatrixError::TruncatedInput`] if the header or payload ends early.
    /// - [`ThinMatrixError::InvalidDimensions`] if the declared shape does not
    ///   fit this platform or exceeds the configured limit.
    /// - [`ThinMatrixError::Io`] if the reader fails.
    pub fn decode<R: Read + ?Sized>(&self, reader: &mut R) -> Result<Matrix, ThinMatrixError> {
        let header = Header::read_from(reader, self.byte_order)?;
        let shape = header.shape()?;
        let payload_len = header.payload_len()?;

        if let Some(limit) = self.limit {
            if !limit.allows(payload_len) {
                return Err(ThinMatrixError::InvalidDimensions {
                    rows: header.rows,
                    cols: header.cols,
                    detail: format!("payload of {payload_len} bytes exceeds limit of {limit}"),
                });
            }
        }

        let num_elements = payload_len / ELEMENT_BYTES;
        let mut data = Vec::with_capacity(num_elements.min(PREALLOC_ELEMENTS));
        let mut chunk = vec![0u8; payload_len.min(CHUNK_BYTES)];
        let mut consumed = 0usize;

        while consumed < payload_len {
            let want = (payload_len - consumed).min(chunk.len());
            let got = read_full(reader, &mut chunk[..want])?;
            if got < want {
                return Err(ThinMatrixError::TruncatedInput {
                    section: Section::Payload,
                    expected: payload_len as u64,
                    actual: (consumed + got) as u64,
                });
            }
            let order = self.byte_order;
            data.extend(
                chunk[..want]
                    .chunks_exact(ELEMENT_BYTES)
                    .map(|b| order.f32_from_bytes([b[0], b[1], b[2], b[3]])),
            );
            consumed += want;
        }

        tracing::trace!(shape = %shape, order = %self.byte_order, "decoded thin matrix");
        Matrix::from_vec(shape.rows(), shape.cols(), data)
    }

    /// Encodes `matrix` to `writer` and returns the number of bytes written.
    ///
    /// Every row is checked against the column count before anything is
    /// written, so ragged input never leaves a partial header behind.
    ///
    /// # Errors
    /// - [`ThinMatrixError::UnrepresentableDimensions`] if the shape does not
    ///   fit the 8-byte header fields or the byte count overflows `u64`.
    /// - [`ThinMatrixError::RaggedRows`] if a row's length differs from `cols`.
    /// - [`ThinMatrixError::Io`] if the writer fails.
    pub fn encode<M, W>(&self, matrix: &M, writer: &mut W) -> Result<u64, ThinMatrixError>
    where
        M: RowMajor + ?Sized,
        W: Write + ?Sized,
    {
        let rows = matrix.rows();
        let cols = matrix.cols();
        let header = Header::from_shape(Shape::new(rows, cols))?;
        let total = header
            .encoded_len()
            .ok_or(ThinMatrixError::UnrepresentableDimensions { rows, cols })?;

        if !matrix.is_rectangular() {
            for r in 0..rows {
                let len = matrix.row(r).len();
                if len != cols {
                    return Err(ThinMatrixError::RaggedRows {
                        row: r,
                        expected: cols,
                        actual: len,
                    });
                }
            }
        }

        header.write_to(writer, self.byte_order)?;
        if cols == 0 {
            tracing::trace!(rows, cols, bytes = total, "encoded thin matrix");
            return Ok(total);
        }

        let mut buf = Vec::with_capacity(cols.saturating_mul(ELEMENT_BYTES).min(CHUNK_BYTES));
        for r in 0..rows {
            for values in matrix.row(r).chunks(CHUNK_BYTES / ELEMENT_BYTES) {
                buf.clear();
                for &v in values {
                    buf.extend_from_slice(&self.byte_order.f32_to_bytes(v));
                }
                writer.write_all(&buf)?;
            }
        }

        tracing::trace!(rows, cols, bytes = total, "encoded thin matrix");
        Ok(total)
    }

    /// Encodes `matrix` into a new buffer of exactly `16 + 4 * rows * cols` bytes.
    pub fn to_bytes<M: RowMajor + ?Sized>(&self, matrix: &M) -> Result<Vec<u8>, ThinMatrixError> {
        let capacity = matrix
            .rows()
            .saturating_mul(matrix.cols())
            .saturating_mul(ELEMENT_BYTES)
            .saturating_add(HEADER_BYTES);
        let mut out = Vec::with_capacity(capacity.min(HEADER_BYTES + CHUNK_BYTES * 16));
        self.encode(matrix, &mut out)?;
        Ok(out)
    }

    /// Decodes a buffer that must contain exactly one matrix.
    ///
    /// Unlike [`decode`](MatrixCodec::decode), bytes after the payload are an
    /// error ([`ThinMatrixError::TrailingBytes`]).
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<Matrix, ThinMatrixError> {
        let mut rest = bytes;
        let matrix = self.decode(&mut rest)?;
        if !rest.is_empty() {
            let expected = (bytes.len() - rest.len()) as u64;
            tracing::warn!(
                expected,
                actual = bytes.len(),
                "thin matrix buffer has trailing bytes"
            );
            return Err(ThinMatrixError::TrailingBytes {
                expected,
                actual: bytes.len() as u64,
            });
        }
        Ok(matrix)
    }
}

/// Decodes one matrix from `reader` with the default little-endian codec.
pub fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Matrix, ThinMatrixError> {
    MatrixCodec::default().decode(reader)
}

/// Encodes `matrix` to `writer` with the default little-endian codec.
pub fn encode<M, W>(matrix: &M, writer: &mut W) -> Result<u64, ThinMatrixError>
where
    M: RowMajor + ?Sized,
    W: Write + ?Sized,
{
    MatrixCodec::default().encode(matrix, writer)
}

/// Encodes `matrix` into a new little-endian buffer.
pub fn to_bytes<M: RowMajor + ?Sized>(matrix: &M) -> Result<Vec<u8>, ThinMatrixError> {
    MatrixCodec::default().to_bytes(matrix)
}

/// Decodes a little-endian buffer that must contain exactly one matrix.
pub fn from_bytes(bytes: &[u8]) -> Result<Matrix, ThinMatrixError> {
    MatrixCodec::default().from_bytes(bytes)
}

/// Fills `buf` from `reader`, stopping early only at end of input.
///
/// Returns the number of bytes read, which is less than `buf.len()` only if
/// the source is exhausted.
pub(crate) fn read_full<R: Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
) -> Result<usize, ThinMatrixError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn payload_floats(bytes: &[u8]) -> Vec<f32> {
        bytes[HEADER_BYTES..]
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect()
    }

    #[test]
    fn test_row_major_order() {
        let bytes = to_bytes(&[[1.0f32, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(&bytes[..8], &2u64.to_le_bytes());
        assert_eq!(&bytes[8..16], &2u64.to_le_bytes());
        assert_eq!(payload_floats(&bytes), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_two_by_three_scenario() {
        let rows = [[1.5f32, -2.0, 0.0], [3.25, 4.0, -0.5]];
        let bytes = to_bytes(&rows).unwrap();
        assert_eq!(bytes.len(), 16 + 4 * 6);
        assert_eq!(&bytes[..8], &2u64.to_le_bytes());
        assert_eq!(&bytes[8..16], &3u64.to_le_bytes());
        assert_eq!(payload_floats(&bytes), vec![1.5, -2.0, 0.0, 3.25, 4.0, -0.5]);

        let m = from_bytes(&bytes).unwrap();
        assert_eq!(m, Matrix::from_rows(&rows).unwrap());
    }

    #[test]
    fn test_empty_matrix() {
        let m = Matrix::default();
        let bytes = to_bytes(&m).unwrap();
        assert_eq!(bytes, vec![0u8; 16]);
        let back = from_bytes(&bytes).unwrap();
        assert_eq!(back.shape(), Shape::new(0, 0));
    }

    #[test]
    fn test_zero_cols_with_huge_row_count() {
        let header = Header {
            rows: usize::MAX as u64,
            cols: 0,
        };
        let bytes = header.to_bytes(ByteOrder::Little);
        let m = from_bytes(&bytes).unwrap();
        assert_eq!(m.shape(), Shape::new(usize::MAX, 0));
        assert!(m.is_empty());

        let mut out = Vec::new();
        assert_eq!(encode(&m, &mut out).unwrap(), 16);
        assert_eq!(out, bytes);
    }

    #[test]
    fn test_empty_first_row_still_checks_ragged() {
        let rows = vec![vec![], vec![1.0f32]];
        let mut out = Vec::new();
        let err = encode(&rows, &mut out).unwrap_err();
        assert!(matches!(
            err,
            ThinMatrixError::RaggedRows {
                row: 1,
                expected: 0,
                actual: 1
            }
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_special_values_roundtrip() {
        let values = vec![
            0.0,
            -0.0,
            f32::NAN,
            f32::from_bits(0xffc0_1234),
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::MIN_POSITIVE,
            f32::MAX,
        ];
        let m = Matrix::from_vec(2, 4, values).unwrap();
        let back = from_bytes(&to_bytes(&m).unwrap()).unwrap();
        assert!(back.bitwise_eq(&m));
    }

    #[test]
    fn test_truncated_header() {
        let err = from_bytes(&[0u8; 15]).unwrap_err();
        assert!(matches!(
            err,
            ThinMatrixError::TruncatedInput {
                section: Section::Header,
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn test_truncated_payload() {
        let mut bytes = to_bytes(&[[1.0f32, 2.0, 3.0]]).unwrap();
        bytes.truncate(bytes.len() - 1);
        let err = from_bytes(&bytes).unwrap_err();
        assert!(matches!(
            err,
            ThinMatrixError::TruncatedInput {
                section: Section::Payload,
                expected: 12,
                actual: 11
            }
        ));
    }

    #[test]
    fn test_huge_header_without_payload_is_truncated() {
        // Large but addressable: must fail on missing data, not on allocation.
        let header = Header {
            rows: 1 << 16,
            cols: 1 << 10,
        };
        let bytes = header.to_bytes(ByteOrder::Little);
        let err = from_bytes(&bytes).unwrap_err();
        assert!(matches!(
            err,
            ThinMatrixError::TruncatedInput {
                section: Section::Payload,
                actual: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_overflowing_header() {
        let header = Header {
            rows: u64::MAX,
            cols: u64::MAX,
        };
        let err = from_bytes(&header.to_bytes(ByteOrder::Little)).unwrap_err();
        assert!(matches!(err, ThinMatrixError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_limit_exceeded() {
        let codec = MatrixCodec::default().with_limit(ByteLimit::from_bytes(8));
        let bytes = to_bytes(&[[1.0f32, 2.0, 3.0]]).unwrap();
        let err = codec.from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, ThinMatrixError::InvalidDimensions { .. }));

        let ok = MatrixCodec::default().with_limit(ByteLimit::from_bytes(12));
        assert_eq!(ok.from_bytes(&bytes).unwrap().len(), 3);
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = to_bytes(&[[1.0f32]]).unwrap();
        bytes.push(0);
        let err = from_bytes(&bytes).unwrap_err();
        assert!(matches!(
            err,
            ThinMatrixError::TrailingBytes {
                expected: 20,
                actual: 21
            }
        ));
    }

    #[test]
    fn test_stream_decode_leaves_rest_unread() {
        let mut bytes = to_bytes(&[[1.0f32, 2.0]]).unwrap();
        bytes.extend(to_bytes(&[[3.0f32], [4.0]]).unwrap());
        let mut cursor = Cursor::new(bytes);
        let first = decode(&mut cursor).unwrap();
        let second = decode(&mut cursor).unwrap();
        assert_eq!(first.as_slice(), &[1.0, 2.0]);
        assert_eq!(second.shape(), Shape::new(2, 1));
        assert_eq!(second.as_slice(), &[3.0, 4.0]);
    }

    #[test]
    fn test_ragged_rows_write_nothing() {
        let rows = vec![vec![1.0f32, 2.0], vec![3.0]];
        let mut out = Vec::new();
        let err = encode(&rows, &mut out).unwrap_err();
        assert!(matches!(err, ThinMatrixError::RaggedRows { row: 1, .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_big_endian_roundtrip() {
        let codec = MatrixCodec::new(ByteOrder::Big);
        let m = Matrix::from_vec(1, 2, vec![1.0, -1.0]).unwrap();
        let bytes = codec.to_bytes(&m).unwrap();
        assert_eq!(&bytes[..8], &1u64.to_be_bytes());
        assert_eq!(&bytes[16..20], &1.0f32.to_be_bytes());
        assert_eq!(codec.from_bytes(&bytes).unwrap(), m);
    }

    #[test]
    fn test_wrong_order_misreads_header() {
        let bytes = MatrixCodec::new(ByteOrder::Big)
            .to_bytes(&[[1.0f32]])
            .unwrap();
        // rows = 1 in big-endian reads as 1 << 56 in little-endian.
        assert!(from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_encode_returns_length() {
        let m = Matrix::zeros(3, 5).unwrap();
        let mut out = Vec::new();
        let n = encode(&m, &mut out).unwrap();
        assert_eq!(n, 16 + 4 * 15);
        assert_eq!(out.len() as u64, n);
    }

    #[test]
    fn test_multi_chunk_payload() {
        // More than one CHUNK_BYTES worth of elements.
        let cols = CHUNK_BYTES / ELEMENT_BYTES + 7;
        let data: Vec<f32> = (0..cols * 2).map(|i| i as f32).collect();
        let m = Matrix::from_vec(2, cols, data).unwrap();
        let back = from_bytes(&to_bytes(&m).unwrap()).unwrap();
        assert_eq!(back, m);
    }

    struct Interrupting<'a> {
        inner: &'a [u8],
        interrupted: bool,
    }

    impl Read for Interrupting<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            // One byte at a time to exercise short reads.
            let n = buf.len().min(self.inner.len()).min(1);
            buf[..n].copy_from_slice(&self.inner[..n]);
            self.inner = &self.inner[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_short_and_interrupted_reads() {
        let bytes = to_bytes(&[[1.0f32, 2.0], [3.0, 4.0]]).unwrap();
        let mut reader = Interrupting {
            inner: &bytes,
            interrupted: false,
        };
        let m = decode(&mut reader).unwrap();
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn test_io_error_surfaces() {
        let err = decode(&mut FailingReader).unwrap_err();
        assert!(matches!(err, ThinMatrixError::Io(_)));
    }
}
