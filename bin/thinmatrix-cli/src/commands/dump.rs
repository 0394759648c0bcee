// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `thinmatrix dump` command: print a matrix.

use anyhow::Context;
use std::path::Path;
use thin_matrix::MatrixCodec;

pub fn execute(codec: &MatrixCodec, file: &Path) -> anyhow::Result<()> {
    let matrix = codec
        .load(file)
        .with_context(|| format!("failed to load '{}'", file.display()))?;
    println!("{} {matrix}", matrix.shape());
    Ok(())
}
