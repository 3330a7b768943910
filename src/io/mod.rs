//! I/O utilities for reading binary structures
//!
//! This module provides the seekable reader trait and the byte order
//! strategies used when reading multi-byte EXIF values.

pub mod seekable;
pub mod byte_order;
