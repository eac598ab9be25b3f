//! Field value codec for the forgelink tracker client
//!
//! This crate converts between the service's heterogeneous JSON field
//! payloads and the typed [`FieldValue`](forgelink_core::FieldValue) union,
//! dispatched by each field's declared kind:
//! - decode: read-path conversion, total and panic-free — malformed input
//!   degrades the single field, never the record
//! - encode: write-path conversion into per-kind request fragments
//! - html: rich-text detection and visible-text extraction
//!
//! The codec is pure and synchronous. It performs no I/O, holds no mutable
//! state and may be called concurrently without coordination.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decode;
pub mod encode;
pub mod html;

pub use decode::{decode_field, WIRE_DATE_READ_FORMAT};
pub use encode::{encode_field, WIRE_DATE_WRITE_FORMAT};
