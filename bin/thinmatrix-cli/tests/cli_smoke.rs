// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! CLI binary smoke tests using assert_cmd.
//!
//! These run the compiled `thinmatrix` binary against files in a temporary
//! directory and check output, exit status and the bytes left on disk.

use assert_cmd::Command;
use predicates::prelude::*;
use thin_matrix::{ByteOrder, Matrix, MatrixCodec};

fn cmd() -> Command {
    Command::cargo_bin("thinmatrix").unwrap()
}

fn sample() -> Matrix {
    Matrix::from_rows(&[[1.5f32, -2.0, 0.0], [3.25, 4.0, -0.5]]).unwrap()
}

// ── Top-level ──────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn rejects_unknown_byte_order() {
    cmd()
        .args(["--byte-order", "middle", "inspect", "x.tm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("middle"));
}

// ── inspect / dump ─────────────────────────────────────────────

#[test]
fn inspect_reports_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.tm");
    thin_matrix::save(&path, &sample()).unwrap();

    cmd()
        .arg("inspect")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows:        2"))
        .stdout(predicate::str::contains("Cols:        3"))
        .stdout(predicate::str::contains("OK"));
}

#[test]
fn inspect_flags_truncated_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.tm");
    let mut bytes = thin_matrix::to_bytes(&sample()).unwrap();
    bytes.truncate(30);
    std::fs::write(&path, &bytes).unwrap();

    cmd()
        .arg("inspect")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("TRUNCATED (10 bytes missing)"));
}

#[test]
fn dump_prints_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.tm");
    thin_matrix::save(&path, &sample()).unwrap();

    cmd()
        .arg("dump")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2x3 [1.5, -2, 0;3.25, 4, -0.5]"));
}

#[test]
fn inspect_names_host_order_for_native() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.tm");
    MatrixCodec::new(ByteOrder::Native).save(&path, &sample()).unwrap();
    let host = if cfg!(target_endian = "big") { "big" } else { "little" };

    cmd()
        .args(["--byte-order", "native", "inspect"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Byte order:  native ({host})")));
}

#[test]
fn zero_column_file_with_huge_row_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.tm");
    let csv_out = dir.path().join("out.csv");
    let mut bytes = (usize::MAX as u64).to_le_bytes().to_vec();
    bytes.extend_from_slice(&0u64.to_le_bytes());
    std::fs::write(&path, &bytes).unwrap();

    cmd()
        .arg("dump")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{}x0 []", usize::MAX)));

    cmd().arg("export").arg(&path).arg(&csv_out).assert().success();
    assert_eq!(std::fs::read_to_string(&csv_out).unwrap(), "");
}

#[test]
fn dump_respects_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.tm");
    thin_matrix::save(&path, &sample()).unwrap();

    cmd()
        .args(["--limit", "8"])
        .arg("dump")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds limit"));
}

#[test]
fn dump_uses_config_byte_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.tm");
    let config = dir.path().join("codec.toml");
    MatrixCodec::new(ByteOrder::Big).save(&path, &sample()).unwrap();
    std::fs::write(&config, "byte_order = \"big\"\n").unwrap();

    cmd()
        .arg("--config")
        .arg(&config)
        .arg("dump")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2x3"));
}

// ── convert ────────────────────────────────────────────────────

#[test]
fn convert_big_to_little() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("big.tm");
    let output = dir.path().join("little.tm");
    MatrixCodec::new(ByteOrder::Big).save(&input, &sample()).unwrap();

    cmd()
        .arg("convert")
        .arg(&input)
        .arg(&output)
        .args(["--from", "big", "--to", "little"])
        .assert()
        .success();

    assert_eq!(thin_matrix::load(&output).unwrap(), sample());
}

// ── import / export ────────────────────────────────────────────

#[test]
fn csv_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let csv_in = dir.path().join("in.csv");
    let tm = dir.path().join("m.tm");
    let csv_out = dir.path().join("out.tsv");
    std::fs::write(&csv_in, "1.5, -2, 0\n3.25, 4, NaN\n").unwrap();

    cmd().arg("import").arg(&csv_in).arg(&tm).assert().success();

    let m = thin_matrix::load(&tm).unwrap();
    assert_eq!(m.shape(), thin_matrix::Shape::new(2, 3));
    assert!(m.get(1, 2).unwrap().is_nan());

    cmd().arg("export").arg(&tm).arg(&csv_out).assert().success();
    let text = std::fs::read_to_string(&csv_out).unwrap();
    assert_eq!(text, "1.5\t-2\t0\n3.25\t4\tNaN\n");
}

#[test]
fn import_rejects_ragged_csv() {
    let dir = tempfile::tempdir().unwrap();
    let csv_in = dir.path().join("in.csv");
    std::fs::write(&csv_in, "1,2\n3\n").unwrap();

    cmd()
        .arg("import")
        .arg(&csv_in)
        .arg(dir.path().join("m.tm"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not rectangular"));
}

#[test]
fn import_rejects_non_numeric_field() {
    let dir = tempfile::tempdir().unwrap();
    let csv_in = dir.path().join("in.csv");
    std::fs::write(&csv_in, "1,two\n").unwrap();

    cmd()
        .arg("import")
        .arg(&csv_in)
        .arg(dir.path().join("m.tm"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("'two' is not a number"));
}
