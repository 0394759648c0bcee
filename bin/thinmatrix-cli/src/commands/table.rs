// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `thinmatrix import` / `thinmatrix export`: CSV interop.
//!
//! One CSV record per matrix row, no header line. Files ending in `.tsv`
//! use tabs. Non-finite values are written as `NaN`, `inf` and `-inf`,
//! which parse back unchanged.

use anyhow::Context;
use std::path::Path;
use thin_matrix::{Matrix, MatrixCodec};

fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("tsv") => b'\t',
        _ => b',',
    }
}

pub fn import(codec: &MatrixCodec, csv_path: &Path, output: &Path) -> anyhow::Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_for(csv_path))
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("failed to open '{}'", csv_path.display()))?;

    let mut rows: Vec<Vec<f32>> = Vec::new();
    for (r, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to read CSV line {}", r + 1))?;
        let row = record
            .iter()
            .enumerate()
            .map(|(c, field)| {
                field.parse::<f32>().with_context(|| {
                    format!("line {}, column {}: '{field}' is not a number", r + 1, c + 1)
                })
            })
            .collect::<anyhow::Result<Vec<f32>>>()?;
        rows.push(row);
    }

    let matrix = Matrix::from_rows(&rows)
        .with_context(|| format!("'{}' is not rectangular", csv_path.display()))?;
    let written = codec
        .save(output, &matrix)
        .with_context(|| format!("failed to write '{}'", output.display()))?;

    println!(
        "  Imported {} matrix into {} ({written} bytes)",
        matrix.shape(),
        output.display()
    );
    Ok(())
}

pub fn export(codec: &MatrixCodec, file: &Path, csv_path: &Path) -> anyhow::Result<()> {
    let matrix = codec
        .load(file)
        .with_context(|| format!("failed to load '{}'", file.display()))?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter_for(csv_path))
        .has_headers(false)
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("failed to create '{}'", csv_path.display()))?;

    // A matrix without columns has no representable records.
    if matrix.cols() > 0 {
        for row in matrix.iter_rows() {
            writer.write_record(row.iter().map(|v| v.to_string()))?;
        }
    } else {
        tracing::warn!(shape = %matrix.shape(), "matrix has no columns, CSV left empty");
    }
    writer.flush()?;

    println!(
        "  Exported {} matrix to {}",
        matrix.shape(),
        csv_path.display()
    );
    Ok(())
}
