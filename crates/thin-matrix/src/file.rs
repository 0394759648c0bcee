// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Reading and writing thin matrix files.
//!
//! [`MatrixCodec::load`] memory-maps the file and decodes it strictly: the
//! file length must be exactly `16 + 4 * rows * cols`. [`MatrixCodec::save`]
//! writes through a buffered writer and flushes before returning. File
//! handles are dropped on every path, including errors.

use crate::header::{Header, HEADER_BYTES};
use crate::{Matrix, MatrixCodec, RowMajor, ThinMatrixError};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Header and on-disk length of a thin matrix file, read without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
    /// The decoded 16-byte prefix.
    pub header: Header,
    /// Actual length of the file in bytes.
    pub file_len: u64,
}

impl FileInfo {
    /// Length the header says the file should have, or `None` on overflow.
    pub fn expected_len(&self) -> Option<u64> {
        self.header.encoded_len()
    }

    /// Returns `true` if the file length matches the declared shape exactly.
    pub fn is_consistent(&self) -> bool {
        self.expected_len() == Some(self.file_len)
    }
}

impl MatrixCodec {
    /// Loads a matrix from a file.
    ///
    /// # Errors
    /// Everything [`MatrixCodec::from_bytes`] returns, plus
    /// [`ThinMatrixError::Io`] if the file cannot be opened or mapped.
    pub fn load(&self, path: &Path) -> Result<Matrix, ThinMatrixError> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();

        // Zero-length files cannot be mapped on every platform.
        if len == 0 {
            return self.from_bytes(&[]);
        }

        // SAFETY: the map is read-only and dropped before this function
        // returns. Concurrent truncation by another process is outside what
        // this crate can guard against.
        let mmap = unsafe { memmap2::Mmap::map(&file) }?;
        let matrix = self.from_bytes(&mmap)?;
        tracing::debug!(
            path = %path.display(),
            shape = %matrix.shape(),
            bytes = len,
            "loaded thin matrix"
        );
        Ok(matrix)
    }

    /// Saves a matrix to a file, replacing any existing content.
    ///
    /// Returns the number of bytes written.
    pub fn save<M: RowMajor + ?Sized>(
        &self,
        path: &Path,
        matrix: &M,
    ) -> Result<u64, ThinMatrixError> {
        let mut writer = BufWriter::new(File::create(path)?);
        let written = self.encode(matrix, &mut writer)?;
        writer.flush()?;
        tracing::debug!(
            path = %path.display(),
            rows = matrix.rows(),
            cols = matrix.cols(),
            bytes = written,
            "saved thin matrix"
        );
        Ok(written)
    }

    /// Reads only the header of a file, together with the file's length.
    pub fn inspect(&self, path: &Path) -> Result<FileInfo, ThinMatrixError> {
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        let mut reader = BufReader::with_capacity(HEADER_BYTES, file);
        let header = Header::read_from(&mut reader, self.byte_order())?;
        Ok(FileInfo { header, file_len })
    }
}

/// Loads a little-endian thin matrix file.
pub fn load(path: impl AsRef<Path>) -> Result<Matrix, ThinMatrixError> {
    MatrixCodec::default().load(path.as_ref())
}

/// Saves a matrix as a little-endian thin matrix file.
pub fn save<M: RowMajor + ?Sized>(path: impl AsRef<Path>, matrix: &M) -> Result<u64, ThinMatrixError> {
    MatrixCodec::default().save(path.as_ref(), matrix)
}
