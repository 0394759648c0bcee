// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for encoding and decoding thin matrix data.

/// Which part of an encoded buffer ran short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// The fixed 16-byte shape prefix.
    Header,
    /// The row-major element data.
    Payload,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Header => f.write_str("header"),
            Section::Payload => f.write_str("payload"),
        }
    }
}

/// Errors that can occur while building, encoding or decoding a matrix.
#[derive(Debug, thiserror::Error)]
pub enum ThinMatrixError {
    /// The input ended before the header or the declared payload was complete.
    #[error("truncated {section}: expected {expected} bytes, got {actual}")]
    TruncatedInput {
        section: Section,
        expected: u64,
        actual: u64,
    },

    /// Declared dimensions cannot be processed on this platform.
    #[error("invalid dimensions {rows}x{cols}: {detail}")]
    InvalidDimensions { rows: u64, cols: u64, detail: String },

    /// Dimensions cannot be stored in the 8-byte header fields.
    #[error("dimensions {rows}x{cols} cannot be represented in the header")]
    UnrepresentableDimensions { rows: usize, cols: usize },

    /// Bytes follow the payload of a buffer that must hold exactly one matrix.
    #[error("trailing bytes: expected {expected} bytes in total, got {actual}")]
    TrailingBytes { expected: u64, actual: u64 },

    /// A flat element buffer does not match the requested shape.
    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A row of nested input has a different length than the first row.
    #[error("ragged rows: row {row} has {actual} elements, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A human-readable byte limit could not be parsed.
    #[error("invalid byte limit: {0}")]
    InvalidLimit(String),

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ThinMatrixError>;
