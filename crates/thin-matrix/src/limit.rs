// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Upper bound on the payload a codec is willing to decode.

use crate::ThinMatrixError;
use std::fmt;

/// Binary units, largest first.
const UNITS: [(&str, usize); 3] = [("GB", 1 << 30), ("MB", 1 << 20), ("KB", 1 << 10)];

/// A ceiling on decoded payload size.
///
/// A header is only a pair of integers, so a corrupt or hostile file can
/// declare an enormous matrix. A `ByteLimit` lets callers reject such files
/// before any payload is read.
///
/// [`parse`](ByteLimit::parse) takes a count with an optional binary suffix:
/// `K`, `M`, `G`, optionally followed by `B` or `iB` (`"512M"`, `"2048KiB"`,
/// `"1gb"`). A bare count or a `B` suffix is taken as bytes.
///
/// # Examples
/// ```
/// use thin_matrix::ByteLimit;
///
/// let l = ByteLimit::parse("1G").unwrap();
/// assert_eq!(l.as_bytes(), 1024 * 1024 * 1024);
/// assert_eq!(l.to_string(), "1 GB");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ByteLimit {
    bytes: usize,
}

impl ByteLimit {
    /// Creates a limit from a byte count.
    pub fn from_bytes(bytes: usize) -> Self {
        Self { bytes }
    }

    /// Creates a limit from mebibytes, saturating at `usize::MAX`.
    pub fn from_mb(mb: usize) -> Self {
        Self::from_bytes(mb.saturating_mul(1 << 20))
    }

    /// Returns the limit in bytes.
    pub fn as_bytes(&self) -> usize {
        self.bytes
    }

    /// Returns `true` if `len` bytes fit under the limit.
    pub fn allows(&self, len: usize) -> bool {
        len <= self.bytes
    }

    /// Parses a limit such as `"512M"` or `"1048576"`. Case-insensitive.
    pub fn parse(s: &str) -> Result<Self, ThinMatrixError> {
        let input = s.trim();
        let split = input
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(input.len());
        let (digits, suffix) = input.split_at(split);
        if digits.is_empty() {
            return Err(ThinMatrixError::InvalidLimit(format!(
                "'{input}': expected a byte count such as 1048576, 2048K, 512M or 1G"
            )));
        }

        let scale = unit_scale(suffix.trim()).ok_or_else(|| {
            ThinMatrixError::InvalidLimit(format!("'{input}': unknown unit '{}'", suffix.trim()))
        })?;
        digits
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_mul(scale))
            .map(Self::from_bytes)
            .ok_or_else(|| ThinMatrixError::InvalidLimit(format!("'{input}' overflows usize")))
    }
}

fn unit_scale(suffix: &str) -> Option<usize> {
    match suffix.to_ascii_uppercase().as_str() {
        "" | "B" => Some(1),
        "K" | "KB" | "KIB" => Some(1 << 10),
        "M" | "MB" | "MIB" => Some(1 << 20),
        "G" | "GB" | "GIB" => Some(1 << 30),
        _ => None,
    }
}

impl fmt::Display for ByteLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = UNITS
            .iter()
            .find(|&&(_, scale)| self.bytes >= scale && self.bytes % scale == 0);
        match unit {
            Some(&(name, scale)) => write!(f, "{} {name}", self.bytes / scale),
            None => write!(f, "{} B", self.bytes),
        }
    }
}
