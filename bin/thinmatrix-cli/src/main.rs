// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # thinmatrix
//!
//! Command-line tools for thin matrix files.
//!
//! ## Usage
//! ```bash
//! # Show the header and check the file length against it
//! thinmatrix inspect weights.tm
//!
//! # Print the matrix
//! thinmatrix dump weights.tm
//!
//! # Migrate a legacy host-order file to little-endian
//! thinmatrix convert legacy.tm weights.tm --from native --to little
//!
//! # CSV interop
//! thinmatrix import table.csv weights.tm
//! thinmatrix export weights.tm table.csv
//! ```

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thin_matrix::{ByteOrder, CodecConfig};

#[derive(Parser)]
#[command(
    name = "thinmatrix",
    about = "Inspect, print and convert thin matrix files",
    version,
    author
)]
struct Cli {
    /// Path to a TOML codec configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Byte order of header and payload: little, big, native (overrides the config).
    #[arg(short = 'o', long, global = true)]
    byte_order: Option<ByteOrder>,

    /// Largest payload to decode, e.g. "512M" (overrides the config).
    #[arg(short, long, global = true)]
    limit: Option<String>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the header and check the file length against it.
    Inspect {
        /// Thin matrix file.
        file: PathBuf,
    },

    /// Print the matrix as `[a, b;c, d]`.
    Dump {
        /// Thin matrix file.
        file: PathBuf,
    },

    /// Re-encode a file in another byte order.
    Convert {
        /// Source file.
        input: PathBuf,

        /// Destination file.
        output: PathBuf,

        /// Byte order of the source file.
        #[arg(long, default_value = "native")]
        from: ByteOrder,

        /// Byte order of the destination file.
        #[arg(long, default_value = "little")]
        to: ByteOrder,
    },

    /// Build a thin matrix file from CSV (one matrix row per line, no header).
    Import {
        /// CSV or TSV input.
        csv: PathBuf,

        /// Destination thin matrix file.
        output: PathBuf,
    },

    /// Write a thin matrix file out as CSV.
    Export {
        /// Thin matrix file.
        file: PathBuf,

        /// CSV or TSV output.
        csv: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => CodecConfig::from_file(path)?,
        None => CodecConfig::default(),
    };
    if let Some(order) = cli.byte_order {
        config.byte_order = order;
    }
    if let Some(limit) = cli.limit {
        config.payload_limit = Some(limit);
    }
    let codec = config.build().context("invalid codec configuration")?;
    tracing::debug!(?codec, "codec configured");

    match cli.command {
        Commands::Inspect { file } => commands::inspect::execute(&codec, &file),
        Commands::Dump { file } => commands::dump::execute(&codec, &file),
        Commands::Convert {
            input,
            output,
            from,
            to,
        } => commands::convert::execute(&codec, &input, &output, from, to),
        Commands::Import { csv, output } => commands::table::import(&codec, &csv, &output),
        Commands::Export { file, csv } => commands::table::export(&codec, &file, &csv),
    }
}
