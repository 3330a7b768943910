//! JPEG container parsing module
//!
//! This module provides the segment scanner, marker classification,
//! segment types and the per-marker sub-parsers.

pub mod constants;
pub mod document;
pub mod errors;
pub mod marker;
pub mod parsers;
pub mod scanner;
pub mod segment;
#[cfg(test)]
pub(crate) mod tests;

pub use document::Document;
pub use errors::{JpegError, JpegResult};
pub use marker::{FrameKind, MarkerKind};
pub use scanner::JpegScanner;
pub use segment::Segment;
