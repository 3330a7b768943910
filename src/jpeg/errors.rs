//! Custom error types for JPEG structure parsing

use std::fmt;
use std::io;

/// JPEG-specific error types
#[derive(Debug)]
pub enum JpegError {
    /// I/O error
    IoError(io::Error),
    /// Buffer does not start with SOI and end with EOI
    NotAJpeg,
    /// A segment's declared length runs past the end of the buffer
    TruncatedSegment {
        /// Offset of the segment's marker in the buffer
        offset: usize,
        /// Length field as declared in the segment
        declared: usize,
        /// Bytes available after the marker
        available: usize,
    },
    /// EXIF directory inconsistent with the segment bounds
    MalformedDirectory(String),
    /// Invalid byte order marker in an EXIF TIFF header
    InvalidByteOrder(u16),
    /// Tag catalog could not be parsed
    CatalogError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for JpegError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JpegError::IoError(e) => write!(f, "I/O error: {}", e),
            JpegError::NotAJpeg => write!(f, "Not a JPEG file: SOI and/or EOI marker not found"),
            JpegError::TruncatedSegment { offset, declared, available } => write!(
                f,
                "Truncated segment at offset {}: declared length {} but only {} bytes available",
                offset, declared, available
            ),
            JpegError::MalformedDirectory(msg) => write!(f, "Malformed EXIF directory: {}", msg),
            JpegError::InvalidByteOrder(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            JpegError::CatalogError(msg) => write!(f, "Tag catalog error: {}", msg),
            JpegError::GenericError(msg) => write!(f, "JPEG error: {}", msg),
        }
    }
}

impl std::error::Error for JpegError {}

impl From<io::Error> for JpegError {
    fn from(error: io::Error) -> Self {
        JpegError::IoError(error)
    }
}

/// Result type for JPEG operations
pub type JpegResult<T> = Result<T, JpegError>;

impl From<String> for JpegError {
    fn from(msg: String) -> Self {
        JpegError::GenericError(msg)
    }
}
