// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `thinmatrix inspect` command: print the header and verify the file length.
//!
//! Only the 16-byte header is read. The command fails if the file length
//! disagrees with the declared shape, which usually means truncation, a
//! wrong `--byte-order`, or a file that is not a thin matrix at all.

use std::path::Path;
use thin_matrix::{ByteOrder, MatrixCodec};

pub fn execute(codec: &MatrixCodec, file: &Path) -> anyhow::Result<()> {
    let info = codec
        .inspect(file)
        .map_err(|e| anyhow::anyhow!("failed to read header of '{}': {e}", file.display()))?;

    println!("  File:        {}", file.display());
    let order = codec.byte_order();
    if order == ByteOrder::Native {
        println!("  Byte order:  {order} ({})", order.resolve());
    } else {
        println!("  Byte order:  {order}");
    }
    println!("  Rows:        {}", info.header.rows);
    println!("  Cols:        {}", info.header.cols);

    match info.header.declared_payload_len() {
        Some(payload) => println!("  Payload:     {payload} bytes"),
        None => println!("  Payload:     overflows u64"),
    }
    println!("  File length: {} bytes", info.file_len);

    if info.is_consistent() {
        println!("  Status:      OK");
        return Ok(());
    }

    match info.expected_len() {
        Some(expected) if expected > info.file_len => {
            println!("  Status:      TRUNCATED ({} bytes missing)", expected - info.file_len);
        }
        Some(expected) => {
            println!(
                "  Status:      TRAILING DATA ({} extra bytes)",
                info.file_len - expected
            );
        }
        None => println!("  Status:      INVALID (declared size overflows)"),
    }
    anyhow::bail!(
        "'{}' does not match its header (wrong byte order?)",
        file.display()
    )
}
