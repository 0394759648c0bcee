// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # thin-matrix
//!
//! Reader and writer for the "thin matrix" binary format: a 2-D array of
//! `f32` values behind a 16-byte shape header.
//!
//! ```text
//! offset  size        field
//!      0  8           rows  (u64)
//!      8  8           cols  (u64)
//!     16  4*rows*cols data  (f32, row-major)
//! ```
//!
//! This crate provides:
//! - [`MatrixCodec`] — encode/decode in a chosen [`ByteOrder`], with an
//!   optional [`ByteLimit`] on decoded payloads.
//! - [`Matrix`] and [`Shape`] — the in-memory form, read-only once built.
//! - [`RowMajor`] — the trait the encoder accepts, implemented for
//!   [`Matrix`], nested `Vec`s and fixed-size arrays.
//! - [`Header`] — the 16-byte prefix on its own, for tooling.
//! - [`CodecConfig`] — TOML-loadable codec settings.
//! - [`load`] / [`save`] — file helpers (memory-mapped reads).
//!
//! # Byte Order
//! The legacy layout used the writing host's native integer order. Files
//! written by this crate default to little-endian for both header and
//! payload; [`ByteOrder::Native`] reads legacy files on the machine (or
//! architecture) that produced them.
//!
//! # Example
//! ```
//! use thin_matrix::{from_bytes, to_bytes};
//!
//! let bytes = to_bytes(&[[1.0f32, 2.0], [3.0, 4.0]]).unwrap();
//! assert_eq!(bytes.len(), 16 + 4 * 4);
//!
//! let m = from_bytes(&bytes).unwrap();
//! assert_eq!(m.get(1, 0), Some(3.0));
//! ```

mod byte_order;
mod codec;
mod config;
mod error;
mod file;
mod header;
mod limit;
mod matrix;
mod shape;

pub use byte_order::ByteOrder;
pub use codec::{decode, encode, from_bytes, to_bytes, MatrixCodec};
pub use config::CodecConfig;
pub use error::{Result, Section, ThinMatrixError};
pub use file::{load, save, FileInfo};
pub use header::{Header, HEADER_BYTES};
pub use limit::ByteLimit;
pub use matrix::{Matrix, RowMajor};
pub use shape::{Shape, ELEMENT_BYTES};
