// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Byte order of the header integers and payload floats.

use std::str::FromStr;

/// Enumerates the byte orders a [`crate::MatrixCodec`] can read and write.
///
/// Both header fields and every payload element use the same order.
/// [`ByteOrder::Little`] is the default on-disk layout; [`ByteOrder::Native`]
/// matches files written by host-order tools on the current machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
    /// Whatever the running host uses.
    Native,
}

impl ByteOrder {
    /// Returns a human-readable label for this byte order.
    pub fn as_str(self) -> &'static str {
        match self {
            ByteOrder::Little => "little",
            ByteOrder::Big => "big",
            ByteOrder::Native => "native",
        }
    }

    /// Resolves [`ByteOrder::Native`] to the concrete order of this host.
    pub fn resolve(self) -> Self {
        match self {
            ByteOrder::Native if cfg!(target_endian = "big") => ByteOrder::Big,
            ByteOrder::Native => ByteOrder::Little,
            other => other,
        }
    }

    pub(crate) fn u64_to_bytes(self, value: u64) -> [u8; 8] {
        match self {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
            ByteOrder::Native => value.to_ne_bytes(),
        }
    }

    pub(crate) fn u64_from_bytes(self, bytes: [u8; 8]) -> u64 {
        match self {
            ByteOrder::Little => u64::from_le_bytes(bytes),
            ByteOrder::Big => u64::from_be_bytes(bytes),
            ByteOrder::Native => u64::from_ne_bytes(bytes),
        }
    }

    pub(crate) fn f32_to_bytes(self, value: f32) -> [u8; 4] {
        match self {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
            ByteOrder::Native => value.to_ne_bytes(),
        }
    }

    pub(crate) fn f32_from_bytes(self, bytes: [u8; 4]) -> f32 {
        match self {
            ByteOrder::Little => f32::from_le_bytes(bytes),
            ByteOrder::Big => f32::from_be_bytes(bytes),
            ByteOrder::Native => f32::from_ne_bytes(bytes),
        }
    }
}

impl std::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ByteOrder {
    type Err = crate::ThinMatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "little" | "le" => Ok(ByteOrder::Little),
            "big" | "be" => Ok(ByteOrder::Big),
            "native" | "ne" => Ok(ByteOrder::Native),
            other => Err(crate::ThinMatrixError::Config(format!(
                "unknown byte order '{other}'; expected 'little', 'big', or 'native'"
            ))),
        }
    }
}
