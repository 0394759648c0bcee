// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Codec configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! byte_order = "little"
//! payload_limit = "512M"
//! ```

use crate::{ByteLimit, ByteOrder, MatrixCodec, ThinMatrixError};
use std::path::Path;

/// Configuration for a [`MatrixCodec`].
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CodecConfig {
    /// Byte order of header and payload: `"little"`, `"big"` or `"native"`.
    #[serde(default)]
    pub byte_order: ByteOrder,
    /// Largest payload to decode (human-readable, e.g. `"512M"`). Unlimited if absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_limit: Option<String>,
}

impl CodecConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ThinMatrixError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ThinMatrixError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ThinMatrixError> {
        toml::from_str(toml_str)
            .map_err(|e| ThinMatrixError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ThinMatrixError> {
        toml::to_string_pretty(self)
            .map_err(|e| ThinMatrixError::Config(format!("TOML serialise error: {e}")))
    }

    /// Parses the payload limit, if one is set.
    pub fn parse_limit(&self) -> Result<Option<ByteLimit>, ThinMatrixError> {
        self.payload_limit.as_deref().map(ByteLimit::parse).transpose()
    }

    /// Builds the codec described by this config.
    pub fn build(&self) -> Result<MatrixCodec, ThinMatrixError> {
        let codec = MatrixCodec::new(self.byte_order);
        Ok(match self.parse_limit()? {
            Some(limit) => codec.with_limit(limit),
            None => codec,
        })
    }
}
