// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `thinmatrix convert` command: rewrite a file in another byte order.
//!
//! The main use is migrating files written in host order by older tools to
//! the portable little-endian layout.

use anyhow::Context;
use std::path::Path;
use thin_matrix::{ByteOrder, MatrixCodec};

pub fn execute(
    codec: &MatrixCodec,
    input: &Path,
    output: &Path,
    from: ByteOrder,
    to: ByteOrder,
) -> anyhow::Result<()> {
    let mut reader = MatrixCodec::new(from);
    if let Some(limit) = codec.limit() {
        reader = reader.with_limit(limit);
    }

    let matrix = reader
        .load(input)
        .with_context(|| format!("failed to load '{}' as {from}-endian", input.display()))?;
    let written = MatrixCodec::new(to)
        .save(output, &matrix)
        .with_context(|| format!("failed to write '{}'", output.display()))?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        %from,
        %to,
        "converted thin matrix"
    );
    println!(
        "  {} ({from}) -> {} ({to}): {} matrix, {written} bytes",
        input.display(),
        output.display(),
        matrix.shape(),
    );
    Ok(())
}
