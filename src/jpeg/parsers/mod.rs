//! Segment sub-parsers
//!
//! One parser per marker family. Each takes the complete segment bytes
//! (marker and length field included) plus the declared length, and slices
//! its fixed-layout fields out of the payload. Parsers that return `Option`
//! yield `None` when the payload is too short for their fixed fields; the
//! scanner then keeps the segment as a generic one.

pub mod app;
pub mod comment;
pub mod frame;
pub mod generic;
pub mod huffman;
pub mod icc;
pub mod jfif;
pub mod quantization;
pub mod scan;

use crate::jpeg::constants::SEGMENT_HEADER_SIZE;

/// Returns the bytes after the marker and length field
pub(crate) fn payload(segment: &[u8]) -> &[u8] {
    segment.get(SEGMENT_HEADER_SIZE..).unwrap_or(&[])
}
