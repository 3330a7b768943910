//! Seekable reader trait
//!
//! Segment and EXIF parsing walks borrowed byte slices through
//! `Cursor<&[u8]>`, which satisfies this trait.

use std::io::{Read, Seek};

/// Trait for readers that can both read and seek
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
